use crate::shared::http;
use contracts::domain::a007_comision::Comision;
use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;

pub const ENDPOINT: &str = "/comisiones/";

pub async fn marcar_pagada(id: EntityId) -> Result<Comision, ApiError> {
    http::post_action(&format!("{}{}/marcar_pagada/", ENDPOINT, id)).await
}
