use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marca {
    pub id: EntityId,
    pub nombre: String,
    /// Prefix used by the backend when suggesting internal product codes.
    #[serde(default)]
    pub prefijo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarcaDto {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefijo: Option<String>,
}

impl MarcaDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.nombre.trim().is_empty() {
            return Err("El nombre de la marca es obligatorio".into());
        }
        Ok(())
    }
}
