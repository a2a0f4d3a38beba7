use crate::shared::http;
use contracts::domain::a008_conteo_fisico::{ConteoFisico, ConteoFisicoDto};
use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;

pub const ENDPOINT: &str = "/conteos-fisicos/";

/// Draft count; stock is untouched until [`aplicar`].
pub async fn crear_conteo(dto: &ConteoFisicoDto) -> Result<ConteoFisico, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}

/// Overwrite the product stock with the counted quantity.
pub async fn aplicar(id: EntityId) -> Result<ConteoFisico, ApiError> {
    http::post_action(&format!("{}{}/aplicar/", ENDPOINT, id)).await
}
