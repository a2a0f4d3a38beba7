use crate::shared::http;
use contracts::domain::a002_vehiculo::{Vehiculo, VehiculoDto};
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::encode_pairs;
use contracts::shared::pagination::Page;

pub const ENDPOINT: &str = "/vehiculos/";

pub async fn search_vehiculos(search: &str) -> Result<Vec<Vehiculo>, ApiError> {
    let qs = encode_pairs(&[
        ("search".to_string(), search.trim().to_string()),
        ("page_size".to_string(), "50".to_string()),
    ]);
    let page: Page<Vehiculo> = http::get_json(&format!("{}?{}", ENDPOINT, qs)).await?;
    Ok(page.into_results())
}

pub async fn create_vehiculo(dto: &VehiculoDto) -> Result<Vehiculo, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}
