use crate::domain::common::{Choice, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoConteo {
    Borrador,
    Aplicado,
}

impl Choice for EstadoConteo {
    fn all() -> &'static [Self] {
        &[EstadoConteo::Borrador, EstadoConteo::Aplicado]
    }

    fn code(&self) -> &'static str {
        match self {
            EstadoConteo::Borrador => "BORRADOR",
            EstadoConteo::Aplicado => "APLICADO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EstadoConteo::Borrador => "Borrador",
            EstadoConteo::Aplicado => "Aplicado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConteoFisico {
    pub id: EntityId,
    pub producto: EntityId,
    #[serde(default)]
    pub producto_codigo: Option<String>,
    #[serde(default)]
    pub cantidad_sistema: i64,
    pub cantidad_contada: i64,
    pub estado: EstadoConteo,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
}

impl ConteoFisico {
    /// Counted minus recorded stock; positive means surplus.
    pub fn diferencia(&self) -> i64 {
        self.cantidad_contada - self.cantidad_sistema
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConteoFisicoDto {
    pub producto: Option<EntityId>,
    pub cantidad_contada: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

impl ConteoFisicoDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.producto.is_none() {
            return Err("Seleccione el producto contado".into());
        }
        if self.cantidad_contada < 0 {
            return Err("La cantidad contada no puede ser negativa".into());
        }
        Ok(())
    }
}
