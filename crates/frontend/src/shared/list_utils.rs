/// Shared helpers for server-paged lists (sorting indicators, search box).
use contracts::shared::catalog_query::{SortDirection, SortState};
use leptos::prelude::*;

/// Header indicator for column `key` under the current sort.
pub fn get_sort_indicator(sort: Option<&SortState>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => match s.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

pub fn get_sort_class(sort: Option<&SortState>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => "sort-icon sort-icon--active",
        _ => "sort-icon",
    }
}

/// Search box with a clear button.
///
/// Every keystroke is forwarded; debouncing belongs to whoever turns the
/// text into a request.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar por código, descripción o N° de parte…".to_string()
    } else {
        placeholder
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button
                    class="search-input__clear"
                    title="Limpiar"
                    on:click=move |_| on_change.run(String::new())
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let sort = SortState {
            key: "precio_venta".into(),
            direction: SortDirection::Desc,
        };
        assert_eq!(get_sort_indicator(Some(&sort), "precio_venta"), " ▼");
        assert_eq!(get_sort_indicator(Some(&sort), "codigo"), " ⇅");
        assert_eq!(get_sort_indicator(None, "codigo"), " ⇅");
        assert_eq!(get_sort_class(Some(&sort), "precio_venta"), "sort-icon sort-icon--active");
    }
}
