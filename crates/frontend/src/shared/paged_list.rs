//! Server-paged list state for the back-office tables.
//!
//! Same request discipline as the catalog: one descriptor, one loader,
//! last request wins. Secondary lists have no search debounce and no
//! persisted preferences.

use super::http;
use super::request_gate::LatestRequest;
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::{CatalogQuery, FilterSet};
use contracts::shared::pagination::{derive_page_meta, Page, PageMeta};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

pub struct PagedList<T: Send + Sync + 'static> {
    endpoint: &'static str,
    pub query: RwSignal<CatalogQuery>,
    pub items: RwSignal<Vec<T>>,
    pub meta: RwSignal<PageMeta>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    latest: LatestRequest,
}

impl<T: Send + Sync + 'static> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PagedList<T> {}

impl<T> PagedList<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates the list and wires the loader; the first load runs immediately.
    pub fn new(endpoint: &'static str, page_size: u32) -> Self {
        let list = Self {
            endpoint,
            query: RwSignal::new(CatalogQuery::default().with_page_size(page_size)),
            items: RwSignal::new(Vec::new()),
            meta: RwSignal::new(PageMeta::default()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            latest: LatestRequest::new(),
        };

        Effect::new(move |_| {
            let query = list.query.get();
            list.fetch(query);
        });

        on_cleanup(move || list.latest.cancel());

        list
    }

    fn fetch(&self, query: CatalogQuery) {
        let list = *self;
        let (ticket, signal) = self.latest.start();
        let url = query.url(self.endpoint);
        self.loading.set(true);

        spawn_local(async move {
            let result = http::get_json_abortable::<Page<T>>(&url, signal.as_ref()).await;
            if !list.latest.is_current(ticket) {
                return;
            }
            list.latest.finish(ticket);
            match result {
                Ok(page) => {
                    list.meta.set(derive_page_meta(&page, query.page_size));
                    list.items.set(page.results);
                    list.error.set(None);
                }
                Err(ApiError::Cancelled) => {}
                Err(e) => {
                    log::warn!("list {} failed: {}", list.endpoint, e);
                    list.items.set(Vec::new());
                    list.error.set(Some(e.user_message()));
                }
            }
            list.loading.set(false);
        });
    }

    pub fn reload(&self) {
        self.query.notify();
    }

    /// Set or clear (`""`) one filter; back to page 1.
    pub fn set_param(&self, key: &str, value: &str) {
        let current = self.query.get_untracked();
        let mut pairs: Vec<(String, String)> = current
            .filters
            .iter()
            .filter(|(k, _)| *k != key)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.push((key.to_string(), value.to_string()));
        self.query.set(current.with_filters(FilterSet::from_pairs(pairs)));
    }

    pub fn param(&self, key: &str) -> String {
        self.query
            .with(|q| q.filters.get(key).map(str::to_string))
            .unwrap_or_default()
    }

    pub fn go_to_page(&self, page: u32) {
        let total = self.meta.get_untracked().total_pages;
        self.query
            .update(|q| *q = q.with_page(page as i64, total));
    }

    pub fn set_page_size(&self, size: u32) {
        self.query.update(|q| *q = q.with_page_size(size));
    }

    pub fn toggle_sort(&self, key: &str) {
        self.query.update(|q| *q = q.with_sort_toggled(key));
    }

    /// Replace one row in place after an action returned the fresh record.
    pub fn replace_where(&self, pred: impl Fn(&T) -> bool, fresh: T) {
        self.items.update(|items| {
            replace_first(items, pred, fresh);
        });
    }
}

/// Overwrites the first row matching `pred`. Rows that are no longer on the
/// page are left alone.
fn replace_first<T>(items: &mut [T], pred: impl Fn(&T) -> bool, fresh: T) -> bool {
    match items.iter_mut().find(|i| pred(i)) {
        Some(slot) => {
            *slot = fresh;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        estado: &'static str,
    }

    #[test]
    fn test_replace_first_by_id() {
        let mut rows = vec![
            Row { id: 1, estado: "PENDIENTE" },
            Row { id: 2, estado: "PENDIENTE" },
        ];
        let fresh = Row { id: 2, estado: "PAGADA" };
        let id = fresh.id;
        assert!(replace_first(&mut rows, move |r| r.id == id, fresh));
        assert_eq!(rows[0].estado, "PENDIENTE");
        assert_eq!(rows[1], Row { id: 2, estado: "PAGADA" });

        let gone = Row { id: 9, estado: "PAGADA" };
        assert!(!replace_first(&mut rows, |r| r.id == 9, gone));
        assert_eq!(rows.len(), 2);
    }
}
