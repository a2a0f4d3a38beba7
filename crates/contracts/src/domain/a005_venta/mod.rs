//! Orders (ventas) and payment vouchers.
//!
//! Status fields are a server-enforced state machine; the client only offers
//! the enumeration and forwards the requested transition.

use crate::domain::common::{Choice, EntityId};
use crate::shared::serde_utils::de_money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoVenta {
    PendientePago,
    EnPreparacion,
    Listo,
    Entregado,
    Cerrado,
    Anulado,
}

impl Choice for EstadoVenta {
    fn all() -> &'static [Self] {
        &[
            EstadoVenta::PendientePago,
            EstadoVenta::EnPreparacion,
            EstadoVenta::Listo,
            EstadoVenta::Entregado,
            EstadoVenta::Cerrado,
            EstadoVenta::Anulado,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoVenta::PendientePago => "PENDIENTE_PAGO",
            EstadoVenta::EnPreparacion => "EN_PREPARACION",
            EstadoVenta::Listo => "LISTO",
            EstadoVenta::Entregado => "ENTREGADO",
            EstadoVenta::Cerrado => "CERRADO",
            EstadoVenta::Anulado => "ANULADO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoVenta::PendientePago => "Pendiente de pago",
            EstadoVenta::EnPreparacion => "En preparación",
            EstadoVenta::Listo => "Listo para retiro",
            EstadoVenta::Entregado => "Entregado",
            EstadoVenta::Cerrado => "Cerrado",
            EstadoVenta::Anulado => "Anulado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPago {
    Pendiente,
    Parcial,
    Pagado,
    Credito,
}

impl Choice for EstadoPago {
    fn all() -> &'static [Self] {
        &[
            EstadoPago::Pendiente,
            EstadoPago::Parcial,
            EstadoPago::Pagado,
            EstadoPago::Credito,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoPago::Pendiente => "PENDIENTE",
            EstadoPago::Parcial => "PARCIAL",
            EstadoPago::Pagado => "PAGADO",
            EstadoPago::Credito => "CREDITO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoPago::Pendiente => "Pendiente",
            EstadoPago::Parcial => "Pago parcial",
            EstadoPago::Pagado => "Pagado",
            EstadoPago::Credito => "Crédito",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoComprobante {
    Pendiente,
    Aprobado,
    Anulado,
}

impl Choice for EstadoComprobante {
    fn all() -> &'static [Self] {
        &[
            EstadoComprobante::Pendiente,
            EstadoComprobante::Aprobado,
            EstadoComprobante::Anulado,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoComprobante::Pendiente => "PENDIENTE",
            EstadoComprobante::Aprobado => "APROBADO",
            EstadoComprobante::Anulado => "ANULADO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoComprobante::Pendiente => "Por revisar",
            EstadoComprobante::Aprobado => "Aprobado",
            EstadoComprobante::Anulado => "Anulado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentaItem {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub producto: EntityId,
    #[serde(default)]
    pub producto_codigo: Option<String>,
    #[serde(default)]
    pub producto_descripcion: Option<String>,
    pub cantidad: u32,
    #[serde(deserialize_with = "de_money")]
    pub precio_unitario: f64,
    #[serde(default, deserialize_with = "de_money")]
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comprobante {
    pub id: EntityId,
    #[serde(default)]
    pub archivo: Option<String>,
    #[serde(default, deserialize_with = "de_money")]
    pub monto: f64,
    pub estado: EstadoComprobante,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
    #[serde(default)]
    pub observacion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: EntityId,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub cliente: Option<EntityId>,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub vendedor: Option<EntityId>,
    #[serde(default)]
    pub vendedor_nombre: Option<String>,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_money")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "de_money")]
    pub total: f64,
    pub estado: EstadoVenta,
    pub estado_pago: EstadoPago,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub items: Vec<VentaItem>,
    #[serde(default)]
    pub comprobantes: Vec<Comprobante>,
}

impl Venta {
    pub fn display_number(&self) -> String {
        self.numero
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    pub fn pending_vouchers(&self) -> usize {
        self.comprobantes
            .iter()
            .filter(|c| c.estado == EstadoComprobante::Pendiente)
            .count()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Line of `POST /ventas/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrearVentaItem {
    pub producto: EntityId,
    pub cantidad: u32,
    pub precio_unitario: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrearVentaRequest {
    /// Set when staff sells on behalf of a customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub items: Vec<CrearVentaItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualizarEstadoRequest {
    pub estado: EstadoVenta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualizarPagoRequest {
    pub estado_pago: EstadoPago,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsignarVendedorRequest {
    pub vendedor: EntityId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprobanteActionRequest {
    pub comprobante: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacion: Option<String>,
}

/// Staff member that can be assigned to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendedor {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
}

impl Vendedor {
    pub fn display_name(&self) -> String {
        self.nombre
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.username.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_venta_deserialize() {
        let v: Venta = serde_json::from_value(json!({
            "id": 15,
            "numero": "V-000015",
            "cliente": 3,
            "fecha": "2024-05-02T13:45:00Z",
            "total": "36720.00",
            "estado": "PENDIENTE_PAGO",
            "estado_pago": "PENDIENTE",
            "items": [
                {"producto": 7, "cantidad": 8, "precio_unitario": "4590.00", "subtotal": "36720.00"}
            ],
            "comprobantes": [
                {"id": 1, "monto": "36720", "estado": "PENDIENTE"}
            ]
        }))
        .unwrap();
        assert_eq!(v.estado, EstadoVenta::PendientePago);
        assert_eq!(v.total, 36720.0);
        assert_eq!(v.items[0].cantidad, 8);
        assert_eq!(v.pending_vouchers(), 1);
        assert_eq!(v.display_number(), "V-000015");
    }

    #[test]
    fn test_status_codes_match_serde() {
        for estado in EstadoVenta::all() {
            let json = serde_json::to_string(estado).unwrap();
            assert_eq!(json, format!("\"{}\"", estado.code()));
        }
        for estado in EstadoPago::all() {
            let json = serde_json::to_string(estado).unwrap();
            assert_eq!(json, format!("\"{}\"", estado.code()));
        }
    }

    #[test]
    fn test_crear_venta_skips_empty_customer() {
        let req = CrearVentaRequest {
            cliente: None,
            observaciones: None,
            items: vec![CrearVentaItem {
                producto: 1,
                cantidad: 16,
                precio_unitario: 1000.0,
            }],
        };
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("cliente").is_none());
        assert_eq!(v["items"][0]["cantidad"], 16);
    }
}
