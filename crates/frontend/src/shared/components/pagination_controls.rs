use crate::shared::icons::icon;
use contracts::shared::pagination::PageMeta;
use leptos::prelude::*;

fn pagination_label(m: &PageMeta) -> String {
    format!(
        "página {} de {} ({})",
        m.current_page.max(1),
        m.total_pages.max(1),
        m.count
    )
}

/// Pagination bar for server-paged lists. Pages are 1-based.
#[component]
pub fn PaginationControls(
    #[prop(into)] meta: Signal<PageMeta>,

    /// Requested page; the owner clamps it.
    on_page_change: Callback<u32>,

    #[prop(optional)] on_page_size_change: Option<Callback<u32>>,

    /// Defaults to 12/24/48/96.
    #[prop(optional)]
    page_size_options: Option<Vec<u32>>,

    /// Size the list actually requests. Falls back to the one echoed in
    /// `meta`, which is zero after a failed load.
    #[prop(optional, into)]
    page_size: Option<Signal<u32>>,

    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let selected_size = move || match page_size {
        Some(size) => size.get(),
        None => meta.with(|m| m.page_size),
    };
    let options = page_size_options
        .unwrap_or_else(|| contracts::shared::catalog_query::PAGE_SIZE_OPTIONS.to_vec());

    let at_start = move || disabled.get() || meta.get().current_page <= 1;
    let at_end = move || {
        let m = meta.get();
        disabled.get() || m.current_page >= m.total_pages
    };

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_start
                title="Primera página"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(meta.get_untracked().current_page.saturating_sub(1))
                disabled=at_start
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || meta.with(pagination_label)}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(meta.get_untracked().current_page + 1)
                disabled=at_end
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(meta.get_untracked().total_pages)
                disabled=at_end
                title="Última página"
            >
                {icon("chevrons-right")}
            </button>
            {on_page_size_change.map(|on_size| view! {
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                            on_size.run(size);
                        }
                    }
                    prop:value=move || selected_size().to_string()
                >
                    {options.iter().map(|&size| view! {
                        <option value=size.to_string() selected=move || selected_size() == size>
                            {format!("{} por página", size)}
                        </option>
                    }).collect_view()}
                </select>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pagination::{derive_page_meta, Page};

    #[test]
    fn test_pagination_label() {
        let page: Page<u32> = Page {
            count: Some(47),
            next: Some("http://h/api/productos/?page=3&page_size=20".into()),
            previous: Some("http://h/api/productos/?page=1&page_size=20".into()),
            results: vec![1, 2, 3],
        };
        assert_eq!(pagination_label(&derive_page_meta(&page, 20)), "página 2 de 3 (47)");
    }

    #[test]
    fn test_pagination_label_after_failed_load() {
        assert_eq!(pagination_label(&PageMeta::default()), "página 1 de 1 (0)");
    }
}
