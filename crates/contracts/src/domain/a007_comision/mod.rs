use crate::domain::common::{Choice, EntityId};
use crate::shared::serde_utils::de_money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoComision {
    Pendiente,
    Pagada,
    Anulada,
}

impl Choice for EstadoComision {
    fn all() -> &'static [Self] {
        &[
            EstadoComision::Pendiente,
            EstadoComision::Pagada,
            EstadoComision::Anulada,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoComision::Pendiente => "PENDIENTE",
            EstadoComision::Pagada => "PAGADA",
            EstadoComision::Anulada => "ANULADA",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoComision::Pendiente => "Pendiente",
            EstadoComision::Pagada => "Pagada",
            EstadoComision::Anulada => "Anulada",
        }
    }
}

/// Commission computed server-side for a closed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comision {
    pub id: EntityId,
    pub vendedor: EntityId,
    #[serde(default)]
    pub vendedor_nombre: Option<String>,
    pub venta: EntityId,
    #[serde(default)]
    pub venta_numero: Option<String>,
    #[serde(deserialize_with = "de_money")]
    pub monto: f64,
    #[serde(default, deserialize_with = "de_money")]
    pub porcentaje: f64,
    pub estado: EstadoComision,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
}
