use crate::shared::http;
use contracts::domain::a004_cliente::{Cliente, ClienteDto};
use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::encode_pairs;
use contracts::shared::pagination::Page;

pub const ENDPOINT: &str = "/clientes/";

pub async fn get_cliente(id: EntityId) -> Result<Cliente, ApiError> {
    http::get_json(&format!("{}{}/", ENDPOINT, id)).await
}

/// Picker search: name, RUT or email.
pub async fn search_clientes(search: &str) -> Result<Vec<Cliente>, ApiError> {
    let qs = encode_pairs(&[
        ("search".to_string(), search.trim().to_string()),
        ("page_size".to_string(), "20".to_string()),
    ]);
    let page: Page<Cliente> = http::get_json(&format!("{}?{}", ENDPOINT, qs)).await?;
    Ok(page.into_results())
}

pub async fn create_cliente(dto: &ClienteDto) -> Result<Cliente, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}

pub async fn update_cliente(id: EntityId, dto: &ClienteDto) -> Result<Cliente, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::put_json(&format!("{}{}/", ENDPOINT, id), dto).await
}
