use crate::domain::common::{Choice, EntityId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoInteraccion {
    Llamada,
    Email,
    Visita,
    Whatsapp,
    Otro,
}

impl Choice for TipoInteraccion {
    fn all() -> &'static [Self] {
        &[
            TipoInteraccion::Llamada,
            TipoInteraccion::Email,
            TipoInteraccion::Visita,
            TipoInteraccion::Whatsapp,
            TipoInteraccion::Otro,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            TipoInteraccion::Llamada => "LLAMADA",
            TipoInteraccion::Email => "EMAIL",
            TipoInteraccion::Visita => "VISITA",
            TipoInteraccion::Whatsapp => "WHATSAPP",
            TipoInteraccion::Otro => "OTRO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TipoInteraccion::Llamada => "Llamada",
            TipoInteraccion::Email => "Correo",
            TipoInteraccion::Visita => "Visita",
            TipoInteraccion::Whatsapp => "WhatsApp",
            TipoInteraccion::Otro => "Otro",
        }
    }
}

/// CRM touchpoint with a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaccion {
    pub id: EntityId,
    pub cliente: EntityId,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    pub tipo: TipoInteraccion,
    pub descripcion: String,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_seguimiento: Option<NaiveDate>,
    #[serde(default)]
    pub usuario_nombre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteraccionDto {
    pub cliente: Option<EntityId>,
    pub tipo: TipoInteraccion,
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_seguimiento: Option<NaiveDate>,
}

impl InteraccionDto {
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if self.cliente.is_none() {
            return Err("Seleccione un cliente".into());
        }
        if self.descripcion.trim().is_empty() {
            return Err("Describa la interacción".into());
        }
        if let Some(fecha) = self.fecha_seguimiento {
            if fecha < today {
                return Err("La fecha de seguimiento no puede estar en el pasado".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_in_past_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut dto = InteraccionDto {
            cliente: Some(4),
            tipo: TipoInteraccion::Llamada,
            descripcion: "Cotización guías".into(),
            fecha_seguimiento: NaiveDate::from_ymd_opt(2024, 6, 9),
        };
        assert!(dto.validate(today).is_err());
        dto.fecha_seguimiento = Some(today);
        assert!(dto.validate(today).is_ok());
    }
}
