use super::traits::{Searchable, TableDisplayable};
use crate::config::config;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::debounce::Debouncer;
use crate::shared::list_utils::SearchInput;
use crate::shared::request_gate::LatestRequest;
use contracts::domain::common::EntityId;
use leptos::html::Tr;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Table of candidates; click selects, double click or "Seleccionar"
/// confirms.
#[component]
pub fn GenericAggregatePicker<T>(
    #[prop(into)] items: Signal<Vec<T>>,
    #[prop(optional, into)] loading: Signal<bool>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional)] initial_selected_id: Option<EntityId>,
    on_confirm: Callback<T>,
    #[prop(optional_no_strip)] on_cancel: Option<Callback<()>>,
) -> impl IntoView
where
    T: TableDisplayable + Clone + Send + Sync + 'static,
{
    let selected_id = RwSignal::new(initial_selected_id);
    let selected_row_ref = NodeRef::<Tr>::new();

    Effect::new(move |_| {
        if selected_id.get().is_some() && !loading.get() {
            if let Some(element) = selected_row_ref.get() {
                element.scroll_into_view_with_bool(false);
            }
        }
    });

    let confirm = move |_| {
        let Some(id) = selected_id.get_untracked() else {
            return;
        };
        let chosen = items.with_untracked(|list| list.iter().find(|i| i.id() == id).cloned());
        if let Some(item) = chosen {
            on_confirm.run(item);
        }
    };

    view! {
        <div class="picker-container">
            <div class="picker-content">
                <ErrorBox error=error />
                {move || {
                    if loading.get() {
                        return view! {
                            <div class="picker-loading">
                                <Spinner size=SpinnerSize::Tiny />
                                " Buscando…"
                            </div>
                        }
                        .into_any();
                    }
                    items.with(|list| {
                        if list.is_empty() {
                            return view! { <div class="picker-empty">"Sin resultados"</div> }
                                .into_any();
                        }
                        let rows = list
                            .iter()
                            .map(|item| {
                                let id = item.id();
                                let row = item.clone();
                                let node_ref = if initial_selected_id == Some(id) {
                                    selected_row_ref
                                } else {
                                    NodeRef::new()
                                };
                                view! {
                                    <tr
                                        node_ref=node_ref
                                        class="picker-row"
                                        class:selected=move || selected_id.get() == Some(id)
                                        on:click=move |_| selected_id.set(Some(id))
                                        on:dblclick=move |_| on_confirm.run(row.clone())
                                    >
                                        <td>{item.code()}</td>
                                        <td>{item.description()}</td>
                                    </tr>
                                }
                            })
                            .collect_view();
                        view! {
                            <table class="picker-table">
                                <thead>
                                    <tr>
                                        <th>"Código"</th>
                                        <th>"Descripción"</th>
                                    </tr>
                                </thead>
                                <tbody>{rows}</tbody>
                            </table>
                        }
                        .into_any()
                    })
                }}
            </div>

            <div class="picker-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=confirm
                    disabled=Signal::derive(move || selected_id.get().is_none())
                >
                    "Seleccionar"
                </Button>
                {on_cancel.map(|cancel| view! {
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel.run(())>
                        "Cancelar"
                    </Button>
                })}
            </div>
        </div>
    }
}

/// Search box over [`GenericAggregatePicker`]. Typing is debounced and only
/// the latest answer is shown.
#[component]
pub fn AggregateSearchPicker<T>(
    #[prop(into)] title: String,
    on_confirm: Callback<T>,
    #[prop(optional_no_strip)] on_cancel: Option<Callback<()>>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    let search = RwSignal::new(String::new());
    let items = RwSignal::new(Vec::<T>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let debouncer = Debouncer::new(config().search_debounce_ms);
    let latest = LatestRequest::new();

    let run_search = move |text: String| {
        let (ticket, _) = latest.start();
        loading.set(true);
        spawn_local(async move {
            let result = T::search(text).await;
            if !latest.is_current(ticket) {
                return;
            }
            latest.finish(ticket);
            match result {
                Ok(found) => {
                    items.set(found);
                    error.set(None);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    log::warn!("picker search failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };

    run_search(String::new());

    on_cleanup(move || {
        debouncer.cancel();
        latest.cancel();
    });

    let on_search = Callback::new(move |text: String| {
        search.set(text.clone());
        debouncer.schedule(move || run_search(text));
    });

    view! {
        <div class="picker">
            <div class="picker-header">
                <Label>{title}</Label>
                <SearchInput value=search on_change=on_search placeholder=placeholder />
            </div>
            <GenericAggregatePicker
                items=items
                loading=loading
                error=error
                on_confirm=on_confirm
                on_cancel=on_cancel
            />
        </div>
    }
}
