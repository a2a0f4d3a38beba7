use crate::shared::http;
use contracts::domain::a001_marca::{Marca, MarcaDto};
use contracts::shared::api_error::ApiError;
use contracts::shared::pagination::Page;

pub const ENDPOINT: &str = "/marcas/";

/// Every brand; the list is short and feeds selects.
pub async fn list_marcas() -> Result<Vec<Marca>, ApiError> {
    let page: Page<Marca> = http::get_json(&format!("{}?page_size=1000&ordering=nombre", ENDPOINT)).await?;
    Ok(page.into_results())
}

pub async fn create_marca(dto: &MarcaDto) -> Result<Marca, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}
