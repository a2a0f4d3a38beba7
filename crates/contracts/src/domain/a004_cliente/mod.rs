use crate::domain::common::EntityId;
use crate::shared::serde_utils::de_money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: EntityId,
    pub nombre: String,
    #[serde(default)]
    pub rut: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default, deserialize_with = "de_money")]
    pub limite_credito: f64,
    /// Linked web account, when the customer self-registered.
    #[serde(default)]
    pub usuario: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClienteDto {
    pub nombre: String,
    pub rut: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub limite_credito: f64,
}

impl From<&Cliente> for ClienteDto {
    fn from(c: &Cliente) -> Self {
        Self {
            nombre: c.nombre.clone(),
            rut: c.rut.clone(),
            email: c.email.clone(),
            telefono: c.telefono.clone(),
            direccion: c.direccion.clone(),
            limite_credito: c.limite_credito,
        }
    }
}

impl ClienteDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty() {
            return Err("El nombre del cliente es obligatorio".into());
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            let valid = email
                .split_once('@')
                .map(|(user, domain)| !user.is_empty() && domain.contains('.'))
                .unwrap_or(false);
            if !valid {
                return Err("Correo electrónico inválido".into());
            }
        }
        if self.limite_credito < 0.0 {
            return Err("El límite de crédito no puede ser negativo".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cliente_validation() {
        let mut dto = ClienteDto {
            nombre: "Taller El Pistón".into(),
            email: Some("contacto@piston.cl".into()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.email = Some("sin-arroba".into());
        assert!(dto.validate().is_err());
        dto.email = Some("".into());
        assert!(dto.validate().is_ok());
        dto.limite_credito = -1.0;
        assert!(dto.validate().is_err());
    }
}
