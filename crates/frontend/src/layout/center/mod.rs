use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabPage;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Tab strip plus the stacked pages of every open tab.
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs">
            <div class="tabs__strip">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| {
                        let key_activate = tab.key.clone();
                        let key_close = tab.key.clone();
                        let key_active = tab.key.clone();
                        let key_title = tab.key.clone();
                        view! {
                            <div
                                class="tabs__tab"
                                class:tabs__tab--active=move || {
                                    tabs_store.active.get().as_deref() == Some(key_active.as_str())
                                }
                                on:click=move |_| tabs_store.activate_tab(&key_activate)
                            >
                                <span class="tabs__title">
                                    {move || {
                                        tabs_store.opened.with(|tabs| {
                                            tabs.iter()
                                                .find(|t| t.key == key_title)
                                                .map(|t| t.title.clone())
                                                .unwrap_or_default()
                                        })
                                    }}
                                </span>
                                <button
                                    class="tabs__close"
                                    title="Cerrar"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        tabs_store.close_tab(&key_close);
                                    }
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            <div class="tabs__content">
                <Show
                    when=move || tabs_store.opened.with(|t| !t.is_empty())
                    fallback=|| view! {
                        <div class="tabs__empty">"Seleccione una sección en el menú lateral."</div>
                    }
                >
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                </Show>
            </div>
        </div>
    }
}
