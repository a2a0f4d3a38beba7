//! Catalog preferences that survive reloads.

use crate::shared::storage;
use contracts::shared::catalog_query::{
    CatalogQuery, FilterSet, SortState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Cards,
    Table,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogPrefs {
    pub filters: FilterSet,
    pub sort: Option<SortState>,
    pub page_size: Option<u32>,
}

impl CatalogPrefs {
    /// Starting descriptor for a page pinned to `fixed`. Unknown page sizes
    /// fall back to the default.
    pub fn initial_query(&self, fixed: FilterSet) -> CatalogQuery {
        let page_size = self
            .page_size
            .filter(|s| PAGE_SIZE_OPTIONS.contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        CatalogQuery::new(fixed)
            .with_filters(self.filters.clone().sanitized())
            .with_sort(self.sort.clone())
            .with_page_size(page_size)
    }
}

pub fn load_persisted() -> CatalogPrefs {
    CatalogPrefs {
        filters: storage::get_json(storage::CATALOG_FILTERS_KEY).unwrap_or_default(),
        sort: storage::get_json(storage::CATALOG_SORT_KEY),
        page_size: storage::get_json(storage::CATALOG_PAGE_SIZE_KEY),
    }
}

pub fn save_filters(filters: &FilterSet) {
    storage::set_json(storage::CATALOG_FILTERS_KEY, filters);
}

pub fn save_sort(sort: Option<&SortState>) {
    match sort {
        Some(sort) => storage::set_json(storage::CATALOG_SORT_KEY, sort),
        None => storage::remove(storage::CATALOG_SORT_KEY),
    }
}

pub fn save_page_size(page_size: u32) {
    storage::set_json(storage::CATALOG_PAGE_SIZE_KEY, &page_size);
}

pub fn load_view_mode(default: ViewMode) -> ViewMode {
    storage::get_json(storage::CATALOG_VIEW_KEY).unwrap_or(default)
}

pub fn save_view_mode(mode: ViewMode) {
    storage::set_json(storage::CATALOG_VIEW_KEY, &mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_from_prefs() {
        let prefs = CatalogPrefs {
            filters: FilterSet::from_pairs([("search", "TRW"), ("marca", "")]),
            sort: Some(SortState::asc("precio_venta")),
            page_size: Some(48),
        };
        let fixed = FilterSet::from_pairs([("tipo_producto", "VALVULA")]);
        let q = prefs.initial_query(fixed);
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 48);
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.sort, Some(SortState::asc("precio_venta")));
        assert_eq!(q.fixed.get("tipo_producto"), Some("VALVULA"));
    }

    #[test]
    fn test_unknown_page_size_falls_back() {
        let prefs = CatalogPrefs {
            page_size: Some(7),
            ..Default::default()
        };
        assert_eq!(prefs.initial_query(FilterSet::new()).page_size, DEFAULT_PAGE_SIZE);
    }
}
