//! `/productos/` and the resources hanging off a product.

use crate::shared::export::{dated_filename, download_pdf};
use crate::shared::date_utils::today;
use crate::shared::http;
use contracts::domain::a002_vehiculo::{Aplicacion, AplicacionDto};
use contracts::domain::a003_producto::{
    count_missing_photo, Foto, NumeroParte, NumeroParteDto, Producto, ProductoDto,
    SugerenciaCodigo, TipoProducto,
};
use contracts::domain::common::{ActionResponse, Choice, CountResponse, EntityId};
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::encode_pairs;
use contracts::shared::pagination::Page;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

pub const ENDPOINT: &str = "/productos/";

/// Page size used when walking the whole filtered set.
const WALK_PAGE_SIZE: u32 = 100;
/// Upper bound on pages followed by the fallback walk.
const MAX_WALK_PAGES: usize = 500;

pub async fn get_producto(id: EntityId) -> Result<Producto, ApiError> {
    http::get_json(&format!("{}{}/", ENDPOINT, id)).await
}

pub async fn create_producto(dto: &ProductoDto) -> Result<Producto, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::post_json(ENDPOINT, dto).await
}

pub async fn update_producto(id: EntityId, dto: &ProductoDto) -> Result<Producto, ApiError> {
    dto.validate().map_err(ApiError::validation)?;
    http::patch_json(&format!("{}{}/", ENDPOINT, id), dto).await
}

pub async fn delete_producto(id: EntityId) -> Result<(), ApiError> {
    http::delete(&format!("{}{}/", ENDPOINT, id)).await
}

/// Search helper for pickers.
pub async fn search_productos(search: &str) -> Result<Vec<Producto>, ApiError> {
    let qs = encode_pairs(&[
        ("search".to_string(), search.trim().to_string()),
        ("page_size".to_string(), "20".to_string()),
    ]);
    let page: Page<Producto> = http::get_json(&format!("{}?{}", ENDPOINT, qs)).await?;
    Ok(page.into_results())
}

/// Next free internal code for a type and brand.
pub async fn sugerir_codigo(
    tipo: TipoProducto,
    marca: Option<EntityId>,
) -> Result<String, ApiError> {
    let mut pairs = vec![("tipo_producto".to_string(), tipo.code().to_string())];
    if let Some(marca) = marca {
        pairs.push(("marca".to_string(), marca.to_string()));
    }
    let path = format!("{}sugerir_codigo/?{}", ENDPOINT, encode_pairs(&pairs));
    let answer: SugerenciaCodigo = http::get_json(&path).await?;
    Ok(answer.codigo)
}

// ---------------------------------------------------------------------------
// Missing photo count
// ---------------------------------------------------------------------------

/// Server-side count of the filtered set without a usable photo.
pub async fn contar_sin_foto(filters: &[(String, String)]) -> Result<u64, ApiError> {
    let path = format!("{}contar_sin_foto/?{}", ENDPOINT, encode_pairs(filters));
    let answer: CountResponse = http::get_json(&path).await?;
    Ok(answer.count)
}

/// Running state of the fallback walk over `next` links.
#[derive(Debug, Default)]
struct MissingPhotoWalk {
    missing: u64,
    pages: usize,
}

impl MissingPhotoWalk {
    /// Folds one page in and returns the link to follow, if any.
    fn absorb(&mut self, page: Page<Producto>) -> Result<Option<String>, ApiError> {
        self.pages += 1;
        if self.pages > MAX_WALK_PAGES {
            return Err(ApiError::Parse("too many pages while counting".into()));
        }
        self.missing += count_missing_photo(&page.results);
        Ok(page.next)
    }
}

/// Client-side count: walk every page of the filtered set.
pub async fn walk_missing_photo(filters: &[(String, String)]) -> Result<u64, ApiError> {
    let mut pairs = filters.to_vec();
    pairs.push(("page_size".to_string(), WALK_PAGE_SIZE.to_string()));
    let mut next = Some(format!("{}?{}", ENDPOINT, encode_pairs(&pairs)));
    let mut walk = MissingPhotoWalk::default();

    while let Some(url) = next.take() {
        let page: Page<Producto> = http::get_json(&url).await?;
        next = walk.absorb(page)?;
    }
    Ok(walk.missing)
}

/// What to do after the fast path answered.
#[derive(Debug, PartialEq)]
enum FastPath {
    Counted(u64),
    Cancelled,
    Fallback,
}

fn fast_path_outcome(result: Result<u64, ApiError>) -> FastPath {
    match result {
        Ok(count) => FastPath::Counted(count),
        Err(e) if e.is_cancelled() => FastPath::Cancelled,
        Err(e) => {
            log::debug!("contar_sin_foto unavailable ({}), walking pages", e);
            FastPath::Fallback
        }
    }
}

/// Walk failures degrade to "unknown", never to zero.
fn walk_outcome(result: Result<u64, ApiError>) -> Option<u64> {
    match result {
        Ok(count) => Some(count),
        Err(e) => {
            log::warn!("missing photo count failed: {}", e);
            None
        }
    }
}

/// Fast path first, then the walk. `None` means unknown.
pub async fn count_missing_photo_best_effort(filters: &[(String, String)]) -> Option<u64> {
    match fast_path_outcome(contar_sin_foto(filters).await) {
        FastPath::Counted(count) => Some(count),
        FastPath::Cancelled => None,
        FastPath::Fallback => walk_outcome(walk_missing_photo(filters).await),
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub async fn download_listado() -> Result<(), ApiError> {
    download_pdf(
        &format!("{}imprimir_listado/", ENDPOINT),
        &dated_filename("listado_productos", today()),
    )
    .await
}

pub async fn download_bajo_stock() -> Result<(), ApiError> {
    download_pdf(
        &format!("{}imprimir_bajo_stock/", ENDPOINT),
        &dated_filename("productos_bajo_stock", today()),
    )
    .await
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

fn js_error(e: JsValue) -> ApiError {
    ApiError::validation(format!("{:?}", e))
}

pub async fn upload_foto(producto: EntityId, file: &File) -> Result<Foto, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str("producto", &producto.to_string())
        .map_err(js_error)?;
    form.append_with_blob_and_filename("imagen", file, &file.name())
        .map_err(js_error)?;
    http::post_form("/fotos/", form).await
}

pub async fn delete_foto(id: EntityId) -> Result<(), ApiError> {
    http::delete(&format!("/fotos/{}/", id)).await
}

pub async fn marcar_principal(id: EntityId) -> Result<ActionResponse, ApiError> {
    http::post_action(&format!("/fotos/{}/marcar_principal/", id)).await
}

// ---------------------------------------------------------------------------
// Part numbers and applications
// ---------------------------------------------------------------------------

pub async fn add_numero_parte(dto: &NumeroParteDto) -> Result<NumeroParte, ApiError> {
    if dto.numero.trim().is_empty() {
        return Err(ApiError::validation("Ingrese el número de parte"));
    }
    http::post_json("/numeros-parte/", dto).await
}

pub async fn delete_numero_parte(id: EntityId) -> Result<(), ApiError> {
    http::delete(&format!("/numeros-parte/{}/", id)).await
}

pub async fn add_aplicacion(dto: &AplicacionDto) -> Result<Aplicacion, ApiError> {
    http::post_json("/aplicaciones/", dto).await
}

pub async fn delete_aplicacion(id: EntityId) -> Result<(), ApiError> {
    http::delete(&format!("/aplicaciones/{}/", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(fotos: &[&str], next: Option<&str>) -> Page<Producto> {
        let results: Vec<_> = fotos
            .iter()
            .enumerate()
            .map(|(i, img)| {
                json!({
                    "id": i + 1,
                    "codigo": format!("VAL-{:04}", i + 1),
                    "tipo_producto": "VALVULA",
                    "precio_venta": "1000.00",
                    "fotos": [{"id": i + 1, "imagen": img}]
                })
            })
            .collect();
        serde_json::from_value(json!({
            "count": 250,
            "next": next,
            "previous": null,
            "results": results
        }))
        .unwrap()
    }

    #[test]
    fn test_walk_follows_next_until_none() {
        let mut walk = MissingPhotoWalk::default();
        let link = walk
            .absorb(page(&["", "a.jpg", ""], Some("http://h/api/productos/?page=2&page_size=100")))
            .unwrap();
        assert_eq!(link.as_deref(), Some("http://h/api/productos/?page=2&page_size=100"));
        let link = walk.absorb(page(&["b.jpg", ""], None)).unwrap();
        assert_eq!(link, None);
        assert_eq!(walk.missing, 3);
        assert_eq!(walk.pages, 2);
    }

    #[test]
    fn test_walk_stops_past_page_cap() {
        let mut walk = MissingPhotoWalk {
            missing: 4,
            pages: MAX_WALK_PAGES,
        };
        let result = walk.absorb(page(&[""], Some("http://h/api/productos/?page=501")));
        assert!(matches!(result, Err(ApiError::Parse(_))));
        assert_eq!(walk.missing, 4);
    }

    #[test]
    fn test_fast_path_and_fallback_outcomes() {
        assert_eq!(fast_path_outcome(Ok(12)), FastPath::Counted(12));
        assert_eq!(fast_path_outcome(Err(ApiError::Cancelled)), FastPath::Cancelled);
        assert_eq!(
            fast_path_outcome(Err(ApiError::from_response(404, ""))),
            FastPath::Fallback
        );
        assert_eq!(fast_path_outcome(Err(ApiError::Network("offline".into()))), FastPath::Fallback);

        assert_eq!(walk_outcome(Ok(0)), Some(0));
        assert_eq!(walk_outcome(Err(ApiError::Network("offline".into()))), None);
    }
}
