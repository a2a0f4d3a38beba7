use crate::shared::http;
use contracts::domain::a010_notificacion::{self as notificacion, Notificacion};
use contracts::domain::common::{ActionResponse, EntityId};
use contracts::shared::api_error::ApiError;
use contracts::shared::pagination::Page;

pub const ENDPOINT: &str = "/notificaciones/";

/// Trust the server count only when the `leida=false` filter was applied;
/// otherwise count the unread rows we got.
fn count_from_page(page: &Page<Notificacion>) -> u64 {
    let visible = notificacion::unread_count(&page.results) as u64;
    if page.results.iter().all(|n| !n.leida) {
        page.count.unwrap_or(visible).max(visible)
    } else {
        visible
    }
}

/// Badge number for the header bell.
pub async fn unread_count() -> Result<u64, ApiError> {
    let page: Page<Notificacion> =
        http::get_json(&format!("{}?leida=false&page_size=50", ENDPOINT)).await?;
    Ok(count_from_page(&page))
}

pub async fn marcar_leida(id: EntityId) -> Result<ActionResponse, ApiError> {
    http::post_action(&format!("{}{}/marcar_leida/", ENDPOINT, id)).await
}

pub async fn marcar_todas_leidas() -> Result<ActionResponse, ApiError> {
    http::post_action(&format!("{}marcar_todas_leidas/", ENDPOINT)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_uses_server_total_when_filtered() {
        let page: Page<Notificacion> = serde_json::from_value(json!({
            "count": 73,
            "next": "http://x/api/notificaciones/?page=2",
            "previous": null,
            "results": [{"id": 1, "titulo": "Nueva venta"}]
        }))
        .unwrap();
        assert_eq!(count_from_page(&page), 73);
    }

    #[test]
    fn test_count_when_filter_ignored() {
        let page: Page<Notificacion> = serde_json::from_value(json!([
            {"id": 1, "titulo": "a", "leida": true},
            {"id": 2, "titulo": "b"},
            {"id": 3, "titulo": "c", "leida": false}
        ]))
        .unwrap();
        assert_eq!(count_from_page(&page), 2);
    }
}
