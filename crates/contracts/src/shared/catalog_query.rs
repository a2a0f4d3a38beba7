//! Catalog query descriptor.
//!
//! A [`CatalogQuery`] is the complete, immutable description of one product
//! list request: filters, pinned parameters, ordering, page size, page cursor
//! and the "only items without a photo" toggle. Every mutation returns a new
//! descriptor, and [`CatalogQuery::query_string`] is the only place that turns
//! one into request parameters, so two equal descriptors always produce the
//! same request.

use crate::shared::pagination::link_params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const PAGE_SIZE_OPTIONS: &[u32] = &[12, 24, 48, 96];

/// Server-side predicate for "no valid photo".
pub const MISSING_PHOTO_PARAM: (&str, &str) = ("has_photo", "false");

/// Flat filter set with empty values already removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw object a filter form emits, dropping null, blank
    /// strings, `false` and numeric zero.
    pub fn from_object(raw: &Map<String, Value>) -> Self {
        let mut out = BTreeMap::new();
        for (key, value) in raw {
            if let Some(v) = normalize_value(value) {
                out.insert(key.clone(), v);
            }
        }
        Self(out)
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut out = BTreeMap::new();
        for (k, v) in pairs {
            let v: String = v.into();
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                out.insert(k.into(), trimmed.to_string());
            }
        }
        Self(out)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Re-validate a set restored from storage.
    pub fn sanitized(self) -> Self {
        Self::from_pairs(self.0)
    }
}

fn normalize_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        // Nested values never come out of the filter form.
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Click on a column header: flip on the active column, ascending otherwise.
    pub fn toggled(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(s) if s.key == key => SortState {
                key: s.key.clone(),
                direction: s.direction.flipped(),
            },
            _ => SortState::asc(key),
        }
    }

    /// `field` or `-field`, as expected by the `ordering` parameter.
    pub fn ordering_param(&self) -> String {
        match self.direction {
            SortDirection::Asc => self.key.clone(),
            SortDirection::Desc => format!("-{}", self.key),
        }
    }

    pub fn from_ordering_param(raw: &str) -> Option<SortState> {
        let raw = raw.trim();
        let (key, direction) = match raw.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };
        if key.is_empty() {
            None
        } else {
            Some(SortState {
                key: key.to_string(),
                direction,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub filters: FilterSet,
    /// Parameters pinned by the hosting page; they override filters with the same key.
    pub fixed: FilterSet,
    pub sort: Option<SortState>,
    pub page: u32,
    pub page_size: u32,
    pub missing_photo_only: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            filters: FilterSet::new(),
            fixed: FilterSet::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            missing_photo_only: false,
        }
    }
}

impl CatalogQuery {
    pub fn new(fixed: FilterSet) -> Self {
        Self {
            fixed,
            ..Self::default()
        }
    }

    pub fn with_filters(&self, filters: FilterSet) -> Self {
        Self {
            filters,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_sort_toggled(&self, key: &str) -> Self {
        Self {
            sort: Some(SortState::toggled(self.sort.as_ref(), key)),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<SortState>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Absolute page, clamped to `[1, total_pages]`.
    pub fn with_page(&self, requested: i64, total_pages: u32) -> Self {
        Self {
            page: clamp_page(requested, total_pages),
            ..self.clone()
        }
    }

    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_missing_photo_only(&self, flag: bool) -> Self {
        Self {
            missing_photo_only: flag,
            page: 1,
            ..self.clone()
        }
    }

    /// Follow an opaque `next`/`previous` link: only its page number is taken,
    /// the request itself is rebuilt from this descriptor.
    pub fn with_page_from_link(&self, link: &str, total_pages: u32) -> Self {
        let page = link_params(link).page.unwrap_or(1);
        self.with_page(page as i64, total_pages)
    }

    /// The request parameters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .filters
            .iter()
            .filter(|(k, _)| !self.fixed.contains_key(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        pairs.extend(self.fixed.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        if let Some(sort) = &self.sort {
            pairs.push(("ordering".to_string(), sort.ordering_param()));
        }
        pairs.push(("page_size".to_string(), self.page_size.to_string()));
        pairs.push(("page".to_string(), self.page.max(1).to_string()));

        if self.missing_photo_only {
            pairs.push((
                MISSING_PHOTO_PARAM.0.to_string(),
                MISSING_PHOTO_PARAM.1.to_string(),
            ));
        }
        pairs
    }

    pub fn query_string(&self) -> String {
        encode_pairs(&self.query_pairs())
    }

    /// Filter parameters only (user + fixed), used by auxiliary queries that
    /// walk the whole filtered set.
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.query_pairs()
            .into_iter()
            .filter(|(k, _)| {
                !matches!(k.as_str(), "ordering" | "page" | "page_size")
                    && k != MISSING_PHOTO_PARAM.0
            })
            .collect()
    }

    /// Full list URL for `endpoint` (e.g. `https://host/api/productos/`).
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}?{}", endpoint, self.query_string())
    }

    /// Number of user filters, for the filter panel badge.
    pub fn active_filters(&self) -> usize {
        self.filters.len() + usize::from(self.missing_photo_only)
    }
}

pub fn clamp_page(requested: i64, total_pages: u32) -> u32 {
    let last = total_pages.max(1) as i64;
    requested.clamp(1, last) as u32
}

pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(q: &CatalogQuery) -> BTreeMap<String, String> {
        q.query_pairs().into_iter().collect()
    }

    fn object(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_search_strips_empty_values_and_resets_page() {
        let filters = FilterSet::from_object(&object(json!({
            "search": "TRW",
            "marca": "",
            "tipo": "   ",
            "stock_bajo": false,
            "diametro_cabeza_min": 0,
            "diametro_cabeza_max": 32.5,
            "solo_activos": true,
            "vehiculo": null
        })));
        let q = CatalogQuery::default().with_page(5, 10).with_filters(filters);

        let p = params(&q);
        assert_eq!(q.page, 1);
        assert_eq!(p.get("page").map(String::as_str), Some("1"));
        assert_eq!(p.get("search").map(String::as_str), Some("TRW"));
        assert_eq!(p.get("diametro_cabeza_max").map(String::as_str), Some("32.5"));
        assert_eq!(p.get("solo_activos").map(String::as_str), Some("true"));
        for absent in ["marca", "tipo", "stock_bajo", "diametro_cabeza_min", "vehiculo"] {
            assert!(!p.contains_key(absent), "{} should be stripped", absent);
        }
        assert!(q.query_pairs().iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_fixed_product_type_is_always_sent() {
        let q = CatalogQuery::new(FilterSet::from_pairs([("tipo_producto", "VALVULA")]))
            .with_filters(FilterSet::from_object(&object(json!({
                "search": "TRW",
                "tipo": "INTAKE"
            }))));
        let qs = q.query_string();
        assert!(qs.contains("search=TRW"));
        assert!(qs.contains("tipo=INTAKE"));
        assert!(qs.contains("tipo_producto=VALVULA"));
        assert!(!qs.contains("=&"));
        assert!(!qs.ends_with('='));
    }

    #[test]
    fn test_fixed_param_overrides_user_filter() {
        let q = CatalogQuery::new(FilterSet::from_pairs([("tipo_producto", "VALVULA")]))
            .with_filters(FilterSet::from_pairs([("tipo_producto", "FILTRO")]));
        let values: Vec<_> = q
            .query_pairs()
            .into_iter()
            .filter(|(k, _)| k == "tipo_producto")
            .collect();
        assert_eq!(values, vec![("tipo_producto".into(), "VALVULA".into())]);
    }

    #[test]
    fn test_sort_toggle() {
        let q = CatalogQuery::default().with_sort_toggled("codigo");
        assert_eq!(q.sort, Some(SortState::asc("codigo")));
        assert_eq!(params(&q).get("ordering").map(String::as_str), Some("codigo"));

        let q = q.with_sort_toggled("codigo");
        assert_eq!(params(&q).get("ordering").map(String::as_str), Some("-codigo"));

        let q = q.with_sort_toggled("codigo");
        assert_eq!(params(&q).get("ordering").map(String::as_str), Some("codigo"));

        let q = q.with_sort_toggled("codigo").with_sort_toggled("precio_venta");
        assert_eq!(q.sort, Some(SortState::asc("precio_venta")));
    }

    #[test]
    fn test_sort_preserves_filters() {
        let filters = FilterSet::from_pairs([("search", "mahle")]);
        let q = CatalogQuery::default()
            .with_filters(filters.clone())
            .with_sort_toggled("stock");
        assert_eq!(q.filters, filters);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let q = CatalogQuery::default();
        assert_eq!(q.with_page(0, 5).page, 1);
        assert_eq!(q.with_page(-3, 5).page, 1);
        assert_eq!(q.with_page(3, 5).page, 3);
        assert_eq!(q.with_page(99, 5).page, 5);
        assert_eq!(q.with_page(2, 0).page, 1);
        let once = q.with_page(4, 5);
        assert_eq!(once.with_page(4, 5), once);
    }

    #[test]
    fn test_page_size_resets_cursor() {
        let q = CatalogQuery::default().with_page(3, 9).with_page_size(48);
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 48);
        assert_eq!(CatalogQuery::default().with_page_size(0).page_size, 1);
    }

    #[test]
    fn test_missing_photo_survives_link_navigation() {
        let q = CatalogQuery::default()
            .with_filters(FilterSet::from_pairs([("search", "guia")]))
            .with_missing_photo_only(true);
        // The server link dropped the client-only predicate.
        let next = "http://api.local/api/productos/?page=2&page_size=24&search=guia";
        let moved = q.with_page_from_link(next, 4);
        let p = params(&moved);
        assert_eq!(p.get("page").map(String::as_str), Some("2"));
        assert_eq!(p.get("has_photo").map(String::as_str), Some("false"));
        assert_eq!(p.get("search").map(String::as_str), Some("guia"));

        let off = moved.with_missing_photo_only(false);
        assert!(!params(&off).contains_key("has_photo"));
    }

    #[test]
    fn test_filter_pairs_excludes_paging() {
        let q = CatalogQuery::new(FilterSet::from_pairs([("tipo_producto", "BUJIA")]))
            .with_filters(FilterSet::from_pairs([("search", "ngk")]))
            .with_sort_toggled("codigo")
            .with_missing_photo_only(true);
        let keys: Vec<String> = q.filter_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["search".to_string(), "tipo_producto".to_string()]);
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let q = CatalogQuery::default().with_filters(FilterSet::from_pairs([("search", "a&b c")]));
        assert!(q.query_string().contains("search=a%26b%20c"));
        assert!(q.url("http://h/api/productos/").starts_with("http://h/api/productos/?"));
    }

    #[test]
    fn test_ordering_param_round_trip() {
        let desc = SortState::from_ordering_param("-precio_venta").unwrap();
        assert_eq!(desc.direction, SortDirection::Desc);
        assert_eq!(desc.ordering_param(), "-precio_venta");
        assert_eq!(SortState::from_ordering_param("-"), None);
    }

    #[test]
    fn test_restored_filters_are_sanitized() {
        let raw: FilterSet = serde_json::from_str(r#"{"search":" ","marca":"3"}"#).unwrap();
        let clean = raw.sanitized();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean.get("marca"), Some("3"));
    }
}
