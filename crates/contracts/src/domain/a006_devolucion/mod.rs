use crate::domain::common::{Choice, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoDevolucion {
    Pendiente,
    Aprobada,
    Rechazada,
}

impl Choice for EstadoDevolucion {
    fn all() -> &'static [Self] {
        &[
            EstadoDevolucion::Pendiente,
            EstadoDevolucion::Aprobada,
            EstadoDevolucion::Rechazada,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoDevolucion::Pendiente => "PENDIENTE",
            EstadoDevolucion::Aprobada => "APROBADA",
            EstadoDevolucion::Rechazada => "RECHAZADA",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoDevolucion::Pendiente => "Pendiente",
            EstadoDevolucion::Aprobada => "Aprobada",
            EstadoDevolucion::Rechazada => "Rechazada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Devolucion {
    pub id: EntityId,
    pub venta: EntityId,
    #[serde(default)]
    pub venta_numero: Option<String>,
    pub producto: EntityId,
    #[serde(default)]
    pub producto_codigo: Option<String>,
    pub cantidad: u32,
    pub motivo: String,
    pub estado: EstadoDevolucion,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevolucionDto {
    pub venta: Option<EntityId>,
    pub producto: Option<EntityId>,
    pub cantidad: u32,
    pub motivo: String,
}

impl DevolucionDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.venta.is_none() || self.producto.is_none() {
            return Err("Indique la venta y el producto a devolver".into());
        }
        if self.cantidad == 0 {
            return Err("La cantidad debe ser mayor que cero".into());
        }
        if self.motivo.trim().is_empty() {
            return Err("Indique el motivo de la devolución".into());
        }
        Ok(())
    }
}
