use crate::shared::http;
use contracts::domain::a006_devolucion::{Devolucion, DevolucionDto};
use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;

pub const ENDPOINT: &str = "/devoluciones/";

fn action_path(id: EntityId, action: &str) -> String {
    format!("{}{}/{}/", ENDPOINT, id, action)
}

pub async fn crear_devolucion(dto: &DevolucionDto) -> Result<Devolucion, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}

/// Approval restocks the product server-side.
pub async fn aprobar(id: EntityId) -> Result<Devolucion, ApiError> {
    http::post_action(&action_path(id, "aprobar")).await
}

pub async fn rechazar(id: EntityId) -> Result<Devolucion, ApiError> {
    http::post_action(&action_path(id, "rechazar")).await
}
