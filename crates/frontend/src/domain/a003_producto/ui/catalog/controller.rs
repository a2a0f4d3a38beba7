//! Catalog query controller.
//!
//! Every user action produces a new [`CatalogQuery`] and stores it in one
//! signal. A single effect subscribed to that signal issues the list request,
//! so there is exactly one place where fetching happens. Each dispatch aborts
//! the previous request and responses from superseded requests are dropped.

use super::state::{self, CatalogPrefs};
use crate::config::config;
use crate::domain::a003_producto::api;
use crate::layout::notice_service::{use_notices, NoticeService};
use crate::shared::debounce::Debouncer;
use crate::shared::http;
use crate::shared::request_gate::LatestRequest;
use contracts::domain::a003_producto::Producto;
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::{CatalogQuery, FilterSet};
use contracts::shared::pagination::{derive_page_meta, Page, PageMeta};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct CatalogController {
    pub query: RwSignal<CatalogQuery>,
    pub items: RwSignal<Vec<Producto>>,
    pub meta: RwSignal<PageMeta>,
    /// `next` / `previous` of the last response.
    links: RwSignal<(Option<String>, Option<String>)>,
    pub loading: RwSignal<bool>,
    /// `None` while unknown or when counting failed.
    pub missing_photo: RwSignal<Option<u64>>,
    pub counting: RwSignal<bool>,
    /// Filters as submitted, ahead of the debounce.
    pub submitted_filters: RwSignal<FilterSet>,
    latest: LatestRequest,
    count_latest: LatestRequest,
    debounce: Debouncer,
    notices: NoticeService,
}

impl CatalogController {
    /// Restores persisted preferences and starts loading right away.
    pub fn new(fixed: FilterSet) -> Self {
        let prefs: CatalogPrefs = state::load_persisted();
        let initial = prefs.initial_query(fixed);

        let ctrl = Self {
            submitted_filters: RwSignal::new(initial.filters.clone()),
            query: RwSignal::new(initial),
            items: RwSignal::new(Vec::new()),
            meta: RwSignal::new(PageMeta::default()),
            links: RwSignal::new((None, None)),
            loading: RwSignal::new(false),
            missing_photo: RwSignal::new(None),
            counting: RwSignal::new(false),
            latest: LatestRequest::new(),
            count_latest: LatestRequest::new(),
            debounce: Debouncer::new(config().search_debounce_ms),
            notices: use_notices(),
        };

        Effect::new(move |_| {
            let query = ctrl.query.get();
            ctrl.dispatch(query);
        });

        // The auxiliary count follows the filter set, not paging or sorting.
        let filter_key = Memo::new(move |_| ctrl.query.with(|q| q.filter_pairs()));
        Effect::new(move |_| {
            filter_key.track();
            ctrl.count_missing_photo();
        });

        on_cleanup(move || {
            ctrl.debounce.cancel();
            ctrl.latest.cancel();
            ctrl.count_latest.cancel();
        });

        ctrl
    }

    fn dispatch(&self, query: CatalogQuery) {
        let ctrl = *self;
        let (ticket, signal) = self.latest.start();
        let url = query.url(api::ENDPOINT);
        log!("catalog: GET {}", url);
        self.loading.set(true);

        spawn_local(async move {
            let result = http::get_json_abortable::<Page<Producto>>(&url, signal.as_ref()).await;
            if !ctrl.latest.is_current(ticket) {
                return;
            }
            ctrl.latest.finish(ticket);
            match result {
                Ok(page) => {
                    ctrl.meta.set(derive_page_meta(&page, query.page_size));
                    ctrl.links.set((page.next.clone(), page.previous.clone()));
                    ctrl.items.set(page.results);
                }
                Err(ApiError::Cancelled) => {}
                Err(e) => {
                    log::warn!("catalog fetch failed: {}", e);
                    ctrl.items.set(Vec::new());
                    ctrl.meta.set(PageMeta::default());
                    ctrl.links.set((None, None));
                    ctrl.notices.api_error(&e);
                }
            }
            ctrl.loading.set(false);
        });
    }

    fn replace_query(&self, next: CatalogQuery) {
        if self.query.with_untracked(|q| *q != next) {
            self.query.set(next);
        }
    }

    /// Replace the filter set. Persisted at once; the request follows after
    /// the quiet period, from page 1.
    pub fn search(&self, filters: FilterSet) {
        let filters = filters.sanitized();
        state::save_filters(&filters);
        self.submitted_filters.set(filters.clone());

        let ctrl = *self;
        self.debounce.schedule(move || {
            match ctrl.query.with_untracked(|q| search_step(q, filters)) {
                SearchStep::Replace(next) => ctrl.query.set(next),
                SearchStep::Refetch => ctrl.query.notify(),
            }
        });
    }

    /// Flip on the active column, ascending on any other.
    pub fn sort(&self, column: &str) {
        let next = self.query.with_untracked(|q| q.with_sort_toggled(column));
        state::save_sort(next.sort.as_ref());
        self.replace_query(next);
    }

    /// Absolute page, clamped to the known range.
    pub fn go_to_page(&self, page: i64) {
        let total = self.meta.with_untracked(|m| m.total_pages);
        let next = self.query.with_untracked(|q| q.with_page(page, total));
        self.replace_query(next);
    }

    /// Follow a server `next`/`previous` link. Only its page number is used;
    /// the request is rebuilt with every active predicate.
    pub fn go_to_link(&self, link: &str) {
        let total = self.meta.with_untracked(|m| m.total_pages);
        let next = self.query.with_untracked(|q| q.with_page_from_link(link, total));
        self.replace_query(next);
    }

    /// Page chosen in the pagination bar. Adjacent pages go through the
    /// server links when the last response carried them.
    pub fn navigate(&self, page: u32) {
        let current = self.meta.with_untracked(|m| m.current_page);
        let link = self.links.with_untracked(|(next, previous)| {
            adjacent_link(page, current, next.as_deref(), previous.as_deref())
        });
        match link {
            Some(link) => self.go_to_link(&link),
            None => self.go_to_page(page as i64),
        }
    }

    pub fn set_page_size(&self, page_size: u32) {
        state::save_page_size(page_size);
        let next = self.query.with_untracked(|q| q.with_page_size(page_size));
        self.replace_query(next);
    }

    pub fn toggle_missing_photo_only(&self, flag: bool) {
        let next = self.query.with_untracked(|q| q.with_missing_photo_only(flag));
        self.replace_query(next);
    }

    /// Re-run the current request.
    pub fn refresh(&self) {
        self.query.notify();
    }

    /// Best-effort count of the filtered set without a photo. Runs on its own
    /// task and never touches the listing.
    pub fn count_missing_photo(&self) {
        let ctrl = *self;
        let filters = self.query.with_untracked(|q| q.filter_pairs());
        let (ticket, _) = self.count_latest.start();
        self.counting.set(true);

        spawn_local(async move {
            let count = api::count_missing_photo_best_effort(&filters).await;
            if !ctrl.count_latest.is_current(ticket) {
                return;
            }
            ctrl.count_latest.finish(ticket);
            ctrl.missing_photo.set(count);
            ctrl.counting.set(false);
        });
    }

    pub fn active_filters_count(&self) -> Signal<usize> {
        let query = self.query;
        Signal::derive(move || query.with(|q| q.active_filters()))
    }
}

/// A submitted search always hits the server, even with the same filters.
#[derive(Debug, PartialEq)]
enum SearchStep {
    Replace(CatalogQuery),
    Refetch,
}

fn search_step(current: &CatalogQuery, filters: FilterSet) -> SearchStep {
    let next = current.with_filters(filters);
    if next == *current {
        SearchStep::Refetch
    } else {
        SearchStep::Replace(next)
    }
}

/// Server link for a move to the neighbouring page; `None` means jump by
/// absolute page number.
fn adjacent_link(
    page: u32,
    current: u32,
    next: Option<&str>,
    previous: Option<&str>,
) -> Option<String> {
    if page == current.saturating_add(1) {
        next.map(str::to_string)
    } else if page.saturating_add(1) == current {
        previous.map(str::to_string)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT: &str = "http://h/api/productos/?page=3&page_size=20";
    const PREV: &str = "http://h/api/productos/?page=1&page_size=20";

    #[test]
    fn test_adjacent_pages_use_server_links() {
        assert_eq!(adjacent_link(3, 2, Some(NEXT), Some(PREV)).as_deref(), Some(NEXT));
        assert_eq!(adjacent_link(1, 2, Some(NEXT), Some(PREV)).as_deref(), Some(PREV));
    }

    #[test]
    fn test_far_pages_and_missing_links_jump() {
        assert_eq!(adjacent_link(5, 2, Some(NEXT), Some(PREV)), None);
        assert_eq!(adjacent_link(2, 2, Some(NEXT), Some(PREV)), None);
        assert_eq!(adjacent_link(3, 2, None, Some(PREV)), None);
        assert_eq!(adjacent_link(0, 1, Some(NEXT), None), None);
    }

    #[test]
    fn test_same_search_refetches() {
        let filters = FilterSet::from_pairs([("search", "TRW")]);
        let query = CatalogQuery::default().with_filters(filters.clone());
        assert_eq!(search_step(&query, filters.clone()), SearchStep::Refetch);

        let on_page_3 = query.with_page(3, 5);
        assert_eq!(
            search_step(&on_page_3, filters),
            SearchStep::Replace(query.clone())
        );

        let other = FilterSet::from_pairs([("search", "Mahle")]);
        match search_step(&query, other) {
            SearchStep::Replace(next) => {
                assert_eq!(next.page, 1);
                assert_eq!(next.filters.get("search"), Some("Mahle"));
            }
            SearchStep::Refetch => panic!("filters changed"),
        }
    }

    #[test]
    fn test_link_page_keeps_missing_photo_predicate() {
        let query = CatalogQuery::default()
            .with_page_size(20)
            .with_missing_photo_only(true);
        let link = adjacent_link(3, 2, Some(NEXT), Some(PREV)).unwrap();
        let next = query.with_page_from_link(&link, 3);
        assert_eq!(next.page, 3);
        assert!(next.query_string().contains("has_photo=false"));
    }
}
