use contracts::domain::a005_venta::{EstadoComprobante, EstadoPago, EstadoVenta};
use thaw::BadgeColor;

pub fn estado_color(e: &EstadoVenta) -> BadgeColor {
    match e {
        EstadoVenta::PendientePago => BadgeColor::Warning,
        EstadoVenta::EnPreparacion | EstadoVenta::Listo => BadgeColor::Informative,
        EstadoVenta::Entregado | EstadoVenta::Cerrado => BadgeColor::Success,
        EstadoVenta::Anulado => BadgeColor::Danger,
    }
}

pub fn pago_color(e: &EstadoPago) -> BadgeColor {
    match e {
        EstadoPago::Pendiente => BadgeColor::Warning,
        EstadoPago::Parcial | EstadoPago::Credito => BadgeColor::Informative,
        EstadoPago::Pagado => BadgeColor::Success,
    }
}

pub fn comprobante_color(e: &EstadoComprobante) -> BadgeColor {
    match e {
        EstadoComprobante::Pendiente => BadgeColor::Warning,
        EstadoComprobante::Aprobado => BadgeColor::Success,
        EstadoComprobante::Anulado => BadgeColor::Danger,
    }
}
