//! Error taxonomy for calls against the REST API.
//!
//! Four failure classes exist: transport failures, non-2xx responses with a
//! structured body, non-2xx responses without one, and client-side validation
//! that stops a request before it is sent. A request superseded by a newer one
//! is reported as [`ApiError::Cancelled`] and must never reach the user.

use serde_json::Value;
use thiserror::Error;

/// Message shown when the server gives us nothing usable.
pub const GENERIC_ERROR: &str = "Ocurrió un error inesperado. Intenta nuevamente.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Error de conexión: {0}")]
    Network(String),

    /// Non-2xx with a structured error body, already flattened.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Non-2xx with an empty or unparseable body.
    #[error("Error del servidor ({status})")]
    Http { status: u16 },

    #[error("{0}")]
    Validation(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Parse(String),

    #[error("Solicitud cancelada")]
    Cancelled,
}

impl ApiError {
    /// Classify a non-2xx response by its body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body.trim()).ok();
        match parsed.as_ref().and_then(flatten_error_body) {
            Some(message) => ApiError::Server { status, message },
            None => ApiError::Http { status },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// True for 401/403, which invalidate the stored credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Server { status: 401 | 403, .. } | ApiError::Http { status: 401 | 403 }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Best available text for a transient notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Validation(message) => message.clone(),
            ApiError::Network(_) => "No se pudo conectar con el servidor.".to_string(),
            ApiError::Http { status: 404 } => "El recurso solicitado no existe.".to_string(),
            ApiError::Http { status: 401 | 403 } => {
                "No tienes permisos para realizar esta acción.".to_string()
            }
            _ => GENERIC_ERROR.to_string(),
        }
    }
}

/// Keys whose messages are shown without a field prefix.
const GENERAL_KEYS: &[&str] = &["detail", "non_field_errors", "error", "message", "__all__"];

/// Flatten a DRF-style error body into one multi-line message.
///
/// Returns `None` when the body carries no text at all.
pub fn flatten_error_body(body: &Value) -> Option<String> {
    let mut lines = Vec::new();
    collect_messages(body, None, &mut lines);
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn collect_messages(value: &Value, field: Option<&str>, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return;
            }
            match field {
                Some(f) => out.push(format!("{}: {}", f, s)),
                None => out.push(s.to_string()),
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_messages(item, field, out);
            }
        }
        Value::Object(map) => {
            for (key, inner) in map {
                let label = if GENERAL_KEYS.contains(&key.as_str()) {
                    field
                } else {
                    Some(key.as_str())
                };
                collect_messages(inner, label, out);
            }
        }
        Value::Number(n) => match field {
            Some(f) => out.push(format!("{}: {}", f, n)),
            None => out.push(n.to_string()),
        },
        Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_message() {
        let err = ApiError::from_response(400, r#"{"detail": "Stock insuficiente"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Stock insuficiente".into()
            }
        );
        assert_eq!(err.user_message(), "Stock insuficiente");
    }

    #[test]
    fn test_field_errors_are_concatenated() {
        let body = json!({
            "codigo": ["Ya existe un producto con este código."],
            "precio_venta": ["Debe ser mayor que cero.", "Formato inválido."],
            "non_field_errors": ["Revise los datos."]
        });
        let message = flatten_error_body(&body).unwrap();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&"codigo: Ya existe un producto con este código."));
        assert!(lines.contains(&"precio_venta: Formato inválido."));
        assert!(lines.contains(&"Revise los datos."));
    }

    #[test]
    fn test_nested_item_errors_keep_inner_field() {
        let body = json!({"items": [{}, {"cantidad": ["Debe ser múltiplo de 8."]}]});
        assert_eq!(
            flatten_error_body(&body).as_deref(),
            Some("cantidad: Debe ser múltiplo de 8.")
        );
    }

    #[test]
    fn test_unstructured_bodies() {
        assert_eq!(ApiError::from_response(502, ""), ApiError::Http { status: 502 });
        assert_eq!(
            ApiError::from_response(500, "<html>Server Error</html>"),
            ApiError::Http { status: 500 }
        );
        assert_eq!(ApiError::from_response(400, "{}"), ApiError::Http { status: 400 });
        assert_eq!(ApiError::Http { status: 500 }.user_message(), GENERIC_ERROR);
    }

    #[test]
    fn test_bare_array_body() {
        let err = ApiError::from_response(400, r#"["La venta ya fue anulada."]"#);
        assert_eq!(err.user_message(), "La venta ya fue anulada.");
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::Http { status: 401 }.is_unauthorized());
        assert!(ApiError::from_response(403, r#"{"detail":"x"}"#).is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
        assert!(ApiError::Cancelled.is_cancelled());
    }
}
