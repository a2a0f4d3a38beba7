use crate::domain::a002_vehiculo::Aplicacion;
use crate::domain::common::{Choice, EntityId};
use crate::shared::serde_utils::{de_money, de_opt_money};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Product type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoProducto {
    Valvula,
    GuiaValvula,
    Filtro,
    Bujia,
    Cable,
    Otro,
}

impl Choice for TipoProducto {
    fn all() -> &'static [Self] {
        &[
            TipoProducto::Valvula,
            TipoProducto::GuiaValvula,
            TipoProducto::Filtro,
            TipoProducto::Bujia,
            TipoProducto::Cable,
            TipoProducto::Otro,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            TipoProducto::Valvula => "VALVULA",
            TipoProducto::GuiaValvula => "GUIA_VALVULA",
            TipoProducto::Filtro => "FILTRO",
            TipoProducto::Bujia => "BUJIA",
            TipoProducto::Cable => "CABLE",
            TipoProducto::Otro => "OTRO",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TipoProducto::Valvula => "Válvula",
            TipoProducto::GuiaValvula => "Guía de válvula",
            TipoProducto::Filtro => "Filtro",
            TipoProducto::Bujia => "Bujía",
            TipoProducto::Cable => "Cable",
            TipoProducto::Otro => "Otro",
        }
    }
}

// ============================================================================
// Nested records
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foto {
    pub id: EntityId,
    #[serde(default)]
    pub producto: Option<EntityId>,
    /// Image URL; the backend keeps rows whose file was lost, with an empty value.
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub es_principal: bool,
    #[serde(default)]
    pub orden: i32,
}

impl Foto {
    pub fn is_valid(&self) -> bool {
        self.imagen
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumeroParte {
    pub id: EntityId,
    pub producto: EntityId,
    pub numero: String,
    #[serde(default)]
    pub fabricante: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumeroParteDto {
    pub producto: EntityId,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabricante: Option<String>,
}

// ============================================================================
// Aggregate
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: EntityId,
    pub codigo: String,
    pub tipo_producto: TipoProducto,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub marca: Option<EntityId>,
    #[serde(default)]
    pub marca_nombre: Option<String>,
    #[serde(default)]
    pub especificaciones: Map<String, Value>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub stock_minimo: i64,
    #[serde(default, deserialize_with = "de_money")]
    pub precio_costo: f64,
    #[serde(deserialize_with = "de_money")]
    pub precio_venta: f64,
    #[serde(default, deserialize_with = "de_opt_money")]
    pub peso: Option<f64>,
    #[serde(default)]
    pub fotos: Vec<Foto>,
    #[serde(default)]
    pub numeros_parte: Vec<NumeroParte>,
    #[serde(default)]
    pub aplicaciones: Vec<Aplicacion>,
    /// Only meaningful for valve guides.
    #[serde(default)]
    pub valvulas_compatibles: Vec<EntityId>,
}

impl Producto {
    /// At least one photo row with a non-empty image reference.
    pub fn has_valid_photo(&self) -> bool {
        self.fotos.iter().any(Foto::is_valid)
    }

    /// Main photo, falling back to the first valid one.
    pub fn foto_principal(&self) -> Option<&str> {
        self.fotos
            .iter()
            .filter(|f| f.is_valid())
            .find(|f| f.es_principal)
            .or_else(|| self.fotos.iter().find(|f| f.is_valid()))
            .and_then(|f| f.imagen.as_deref())
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_minimo
    }

    /// Attribute value rendered for tables.
    pub fn spec_text(&self, key: &str) -> String {
        match self.especificaciones.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => if *b { "Sí" } else { "No" }.to_string(),
            _ => String::new(),
        }
    }
}

/// Items of `items` without any usable photo.
pub fn count_missing_photo<'a, I>(items: I) -> u64
where
    I: IntoIterator<Item = &'a Producto>,
{
    items.into_iter().filter(|p| !p.has_valid_photo()).count() as u64
}

// ============================================================================
// Write model
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductoDto {
    pub codigo: String,
    pub tipo_producto: TipoProducto,
    pub descripcion: String,
    pub marca: Option<EntityId>,
    pub especificaciones: Map<String, Value>,
    pub stock: i64,
    pub stock_minimo: i64,
    pub precio_costo: f64,
    pub precio_venta: f64,
    pub peso: Option<f64>,
    pub valvulas_compatibles: Vec<EntityId>,
}

impl Default for ProductoDto {
    fn default() -> Self {
        Self {
            codigo: String::new(),
            tipo_producto: TipoProducto::Valvula,
            descripcion: String::new(),
            marca: None,
            especificaciones: Map::new(),
            stock: 0,
            stock_minimo: 0,
            precio_costo: 0.0,
            precio_venta: 0.0,
            peso: None,
            valvulas_compatibles: Vec::new(),
        }
    }
}

impl From<&Producto> for ProductoDto {
    fn from(p: &Producto) -> Self {
        Self {
            codigo: p.codigo.clone(),
            tipo_producto: p.tipo_producto,
            descripcion: p.descripcion.clone(),
            marca: p.marca,
            especificaciones: p.especificaciones.clone(),
            stock: p.stock,
            stock_minimo: p.stock_minimo,
            precio_costo: p.precio_costo,
            precio_venta: p.precio_venta,
            peso: p.peso,
            valvulas_compatibles: p.valvulas_compatibles.clone(),
        }
    }
}

impl ProductoDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.descripcion.trim().is_empty() {
            return Err("La descripción es obligatoria".into());
        }
        if self.stock < 0 || self.stock_minimo < 0 {
            return Err("El stock no puede ser negativo".into());
        }
        if self.precio_costo < 0.0 || self.precio_venta < 0.0 {
            return Err("Los precios no pueden ser negativos".into());
        }
        if let Some(peso) = self.peso {
            if peso < 0.0 {
                return Err("El peso no puede ser negativo".into());
            }
        }
        super::especificaciones::validate(self.tipo_producto, &self.especificaciones)
    }
}

/// Answer of `sugerir_codigo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SugerenciaCodigo {
    pub codigo: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn producto_with_fotos(fotos: Value) -> Producto {
        serde_json::from_value(json!({
            "id": 7,
            "codigo": "VAL-TRW-0007",
            "tipo_producto": "VALVULA",
            "precio_venta": "4590.00",
            "fotos": fotos
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_minimal_product() {
        let p = producto_with_fotos(json!([]));
        assert_eq!(p.tipo_producto, TipoProducto::Valvula);
        assert_eq!(p.precio_venta, 4590.0);
        assert!(p.especificaciones.is_empty());
        assert!(!p.has_valid_photo());
    }

    #[test]
    fn test_photo_validity() {
        let empty = producto_with_fotos(json!([
            {"id": 1, "imagen": ""},
            {"id": 2, "imagen": null},
            {"id": 3}
        ]));
        assert!(!empty.has_valid_photo());

        let ok = producto_with_fotos(json!([
            {"id": 1, "imagen": " "},
            {"id": 2, "imagen": "https://cdn/x.jpg"}
        ]));
        assert!(ok.has_valid_photo());
        assert_eq!(ok.foto_principal(), Some("https://cdn/x.jpg"));

        assert_eq!(count_missing_photo([&empty, &ok, &empty]), 2);
    }

    #[test]
    fn test_main_photo_prefers_flag() {
        let p = producto_with_fotos(json!([
            {"id": 1, "imagen": "a.jpg"},
            {"id": 2, "imagen": "b.jpg", "es_principal": true},
            {"id": 3, "imagen": "", "es_principal": true}
        ]));
        assert_eq!(p.foto_principal(), Some("b.jpg"));
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(TipoProducto::from_code("GUIA_VALVULA"), Some(TipoProducto::GuiaValvula));
        assert_eq!(TipoProducto::from_code("nope"), None);
        let json = serde_json::to_string(&TipoProducto::GuiaValvula).unwrap();
        assert_eq!(json, "\"GUIA_VALVULA\"");
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = ProductoDto {
            descripcion: "Válvula admisión".into(),
            precio_venta: 1000.0,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.stock = -1;
        assert!(dto.validate().is_err());
        dto.stock = 0;
        dto.descripcion = "  ".into();
        assert!(dto.validate().is_err());
    }
}
