use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehiculo {
    pub id: EntityId,
    pub marca: EntityId,
    #[serde(default)]
    pub marca_nombre: Option<String>,
    pub modelo: String,
    #[serde(default)]
    pub cilindrada: Option<String>,
    #[serde(default)]
    pub cilindros: Option<u8>,
    #[serde(default)]
    pub motor: Option<String>,
    #[serde(default)]
    pub anio_desde: Option<i32>,
    #[serde(default)]
    pub anio_hasta: Option<i32>,
}

impl Vehiculo {
    /// "Toyota Hilux 2.4 (2KD) 2005-2015"
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(marca) = &self.marca_nombre {
            parts.push(marca.clone());
        }
        parts.push(self.modelo.clone());
        if let Some(c) = self.cilindrada.as_deref().filter(|c| !c.is_empty()) {
            parts.push(c.to_string());
        }
        if let Some(m) = self.motor.as_deref().filter(|m| !m.is_empty()) {
            parts.push(format!("({})", m));
        }
        match (self.anio_desde, self.anio_hasta) {
            (Some(a), Some(b)) => parts.push(format!("{}-{}", a, b)),
            (Some(a), None) => parts.push(format!("{}+", a)),
            (None, Some(b)) => parts.push(format!("-{}", b)),
            (None, None) => {}
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehiculoDto {
    pub marca: Option<EntityId>,
    pub modelo: String,
    pub cilindrada: Option<String>,
    pub cilindros: Option<u8>,
    pub motor: Option<String>,
    pub anio_desde: Option<i32>,
    pub anio_hasta: Option<i32>,
}

impl VehiculoDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.marca.is_none() {
            return Err("Seleccione la marca del vehículo".into());
        }
        if self.modelo.trim().is_empty() {
            return Err("El modelo es obligatorio".into());
        }
        if let (Some(desde), Some(hasta)) = (self.anio_desde, self.anio_hasta) {
            if desde > hasta {
                return Err("El año inicial no puede ser mayor que el año final".into());
            }
        }
        if let Some(c) = self.cilindros {
            if c == 0 || c > 16 {
                return Err("Cantidad de cilindros fuera de rango".into());
            }
        }
        Ok(())
    }
}

/// Fitment record linking a product with a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aplicacion {
    pub id: EntityId,
    pub producto: EntityId,
    pub vehiculo: EntityId,
    #[serde(default)]
    pub vehiculo_detalle: Option<Vehiculo>,
    #[serde(default)]
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AplicacionDto {
    pub producto: EntityId,
    pub vehiculo: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let v = Vehiculo {
            id: 1,
            marca: 2,
            marca_nombre: Some("Toyota".into()),
            modelo: "Hilux".into(),
            cilindrada: Some("2.4".into()),
            cilindros: Some(4),
            motor: Some("2KD".into()),
            anio_desde: Some(2005),
            anio_hasta: Some(2015),
        };
        assert_eq!(v.display_name(), "Toyota Hilux 2.4 (2KD) 2005-2015");
    }

    #[test]
    fn test_year_range_validation() {
        let dto = VehiculoDto {
            marca: Some(1),
            modelo: "Corsa".into(),
            anio_desde: Some(2010),
            anio_hasta: Some(2001),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let ok = VehiculoDto {
            anio_hasta: Some(2012),
            ..dto
        };
        assert!(ok.validate().is_ok());
    }
}
