use crate::shared::date_utils::today;
use crate::shared::http;
use contracts::domain::a009_interaccion::{Interaccion, InteraccionDto};
use contracts::shared::api_error::ApiError;

pub const ENDPOINT: &str = "/interacciones/";

/// Follow-up dates are checked against the browser's local date.
pub async fn crear_interaccion(dto: &InteraccionDto) -> Result<Interaccion, ApiError> {
    dto.validate(today()).map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}
