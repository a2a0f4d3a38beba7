//! localStorage access.
//!
//! Every read tolerates a missing window, disabled storage and corrupted
//! values; callers always get a default rather than an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::window;

pub const CART_KEY: &str = "carrito";
pub const CATALOG_FILTERS_KEY: &str = "catalogo_filtros";
pub const CATALOG_SORT_KEY: &str = "catalogo_orden";
pub const CATALOG_PAGE_SIZE_KEY: &str = "catalogo_page_size";
pub const CATALOG_VIEW_KEY: &str = "catalogo_vista";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn get_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub fn set_raw(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write failed for '{}'", key);
        }
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// Typed read; unparseable content is treated as absent.
pub fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_raw(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring corrupted localStorage value '{}': {}", key, e);
            None
        }
    }
}

pub fn set_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => set_raw(key, &raw),
        Err(e) => log::warn!("failed to serialize '{}': {}", key, e),
    }
}
