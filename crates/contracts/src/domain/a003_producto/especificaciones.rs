//! Attribute schema per product type.
//!
//! `especificaciones` is a free-form JSON object on the backend; the keys a
//! product may carry depend on its type. The editor renders one input per
//! field and the catalog filter form builds range filters from the numeric ones.

use super::aggregate::TipoProducto;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    /// Millimetres or other numeric measure.
    Number,
    Text,
    Choice(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: SpecKind,
}

const fn num(key: &'static str, label: &'static str) -> SpecField {
    SpecField {
        key,
        label,
        kind: SpecKind::Number,
    }
}

const fn text(key: &'static str, label: &'static str) -> SpecField {
    SpecField {
        key,
        label,
        kind: SpecKind::Text,
    }
}

pub const TIPO_VALVULA: &[(&str, &str)] = &[("INTAKE", "Admisión"), ("EXHAUST", "Escape")];

const VALVULA: &[SpecField] = &[
    SpecField {
        key: "tipo",
        label: "Tipo",
        kind: SpecKind::Choice(TIPO_VALVULA),
    },
    num("diametro_cabeza", "Diámetro cabeza (mm)"),
    num("diametro_vastago", "Diámetro vástago (mm)"),
    num("largo_total", "Largo total (mm)"),
    num("angulo_asiento", "Ángulo asiento (°)"),
    num("ranuras", "Ranuras"),
];

const GUIA_VALVULA: &[SpecField] = &[
    num("diametro_exterior", "Diámetro exterior (mm)"),
    num("diametro_interior", "Diámetro interior (mm)"),
    num("largo_total", "Largo total (mm)"),
    text("material", "Material"),
];

const FILTRO: &[SpecField] = &[
    SpecField {
        key: "tipo_filtro",
        label: "Tipo de filtro",
        kind: SpecKind::Choice(&[
            ("ACEITE", "Aceite"),
            ("AIRE", "Aire"),
            ("COMBUSTIBLE", "Combustible"),
            ("CABINA", "Cabina"),
        ]),
    },
    text("rosca", "Rosca"),
    num("altura", "Altura (mm)"),
    num("diametro", "Diámetro (mm)"),
];

const BUJIA: &[SpecField] = &[
    text("rosca", "Rosca"),
    num("alcance", "Alcance (mm)"),
    num("grado_termico", "Grado térmico"),
    text("electrodo", "Electrodo"),
];

const CABLE: &[SpecField] = &[num("largo", "Largo (mm)"), text("terminal", "Terminal")];

pub fn schema(tipo: TipoProducto) -> &'static [SpecField] {
    match tipo {
        TipoProducto::Valvula => VALVULA,
        TipoProducto::GuiaValvula => GUIA_VALVULA,
        TipoProducto::Filtro => FILTRO,
        TipoProducto::Bujia => BUJIA,
        TipoProducto::Cable => CABLE,
        TipoProducto::Otro => &[],
    }
}

/// Numeric fields usable as `<key>_min` / `<key>_max` range filters.
pub fn range_fields(tipo: TipoProducto) -> impl Iterator<Item = &'static SpecField> {
    schema(tipo)
        .iter()
        .filter(|f| matches!(f.kind, SpecKind::Number))
}

/// Reject keys outside the type's schema and values of the wrong shape.
/// `OTRO` accepts any key.
pub fn validate(tipo: TipoProducto, values: &Map<String, Value>) -> Result<(), String> {
    let fields = schema(tipo);
    if fields.is_empty() {
        return Ok(());
    }
    for (key, value) in values {
        let Some(field) = fields.iter().find(|f| f.key == key.as_str()) else {
            return Err(format!("Atributo '{}' no permitido para este tipo de producto", key));
        };
        match (field.kind, value) {
            (_, Value::Null) => {}
            (SpecKind::Number, Value::Number(n)) => {
                if n.as_f64().map(|v| v < 0.0).unwrap_or(false) {
                    return Err(format!("{} no puede ser negativo", field.label));
                }
            }
            (SpecKind::Number, _) => {
                return Err(format!("{} debe ser numérico", field.label));
            }
            (SpecKind::Text, Value::String(_)) => {}
            (SpecKind::Choice(options), Value::String(s)) => {
                if !options.iter().any(|(code, _)| *code == s.as_str()) {
                    return Err(format!("Valor '{}' inválido para {}", s, field.label));
                }
            }
            _ => return Err(format!("Valor inválido para {}", field.label)),
        }
    }
    Ok(())
}

/// Convert raw form input into a JSON value of the field's kind.
/// Blank input yields `None` so the key is dropped.
pub fn parse_input(field: &SpecField, raw: &str) -> Result<Option<Value>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match field.kind {
        SpecKind::Number => {
            let normalized = raw.replace(',', ".");
            let n: f64 = normalized
                .parse()
                .map_err(|_| format!("{} debe ser numérico", field.label))?;
            serde_json::Number::from_f64(n)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| format!("{} debe ser numérico", field.label))
        }
        SpecKind::Text | SpecKind::Choice(_) => Ok(Some(Value::String(raw.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valve_schema_accepts_known_keys() {
        let values = json!({"tipo": "INTAKE", "diametro_cabeza": 34.5, "largo_total": null});
        assert!(validate(TipoProducto::Valvula, values.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let values = json!({"rosca": "M14"});
        assert!(validate(TipoProducto::Valvula, values.as_object().unwrap()).is_err());
        assert!(validate(TipoProducto::Otro, values.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_wrong_shapes_rejected() {
        let bad_choice = json!({"tipo": "TURBO"});
        assert!(validate(TipoProducto::Valvula, bad_choice.as_object().unwrap()).is_err());
        let bad_number = json!({"diametro_vastago": "siete"});
        assert!(validate(TipoProducto::Valvula, bad_number.as_object().unwrap()).is_err());
        let negative = json!({"largo": -3});
        assert!(validate(TipoProducto::Cable, negative.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_parse_input() {
        let field = num("diametro_cabeza", "Diámetro");
        assert_eq!(parse_input(&field, " 34,5 ").unwrap(), Some(json!(34.5)));
        assert_eq!(parse_input(&field, "").unwrap(), None);
        assert!(parse_input(&field, "abc").is_err());
        assert_eq!(
            parse_input(&text("rosca", "Rosca"), "M14x1.25").unwrap(),
            Some(json!("M14x1.25"))
        );
    }

    #[test]
    fn test_range_fields_are_numeric() {
        let keys: Vec<_> = range_fields(TipoProducto::Valvula).map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec!["diametro_cabeza", "diametro_vastago", "largo_total", "angulo_asiento", "ranuras"]
        );
        assert_eq!(range_fields(TipoProducto::Otro).count(), 0);
    }
}
