use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use thaw::*;

/// Table header that toggles server ordering on click.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,

    /// Ordering key sent to the API.
    sort_key: &'static str,

    #[prop(into)] current: Signal<Option<SortState>>,

    on_sort: Callback<&'static str>,

    #[prop(optional, default = 100.0)] min_width: f64,

    #[prop(optional)] align_right: bool,
) -> impl IntoView {
    let header_style = if align_right {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_key)
            >
                {label}
                <span class=move || current.with(|s| get_sort_class(s.as_ref(), sort_key))>
                    {move || current.with(|s| get_sort_indicator(s.as_ref(), sort_key))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
