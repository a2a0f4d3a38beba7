//! Top bar: sidebar toggle, brand, cart, notifications and the user menu.

use crate::config::config;
use crate::domain::a010_notificacion::api as notificaciones_api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::cart_context::use_cart;
use crate::shared::icons::icon;
use crate::shared::poller::use_poller;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();
    let cart = use_cart();

    let unread = RwSignal::new(0u64);
    let signed_in = Signal::derive(move || auth_state.with(|s| s.is_authenticated()));
    use_poller(config().notifications_poll_ms, signed_in, move || async move {
        match notificaciones_api::unread_count().await {
            Ok(count) => unread.set(count),
            Err(e) if e.is_cancelled() => {}
            Err(e) => log::warn!("notification poll failed: {}", e),
        }
    });

    let open = move |key: &'static str| ctx.open_tab(key, tab_label_for_key(key));

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
            cart.clear_acting_customer();
            ctx.close_all();
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Válvulas · Tienda y gestión"</span>
            </div>

            <div class="top-header__actions">
                {move || cart.acting_customer.get().map(|c| view! {
                    <span class="top-header__acting" title="Vendiendo a nombre de">
                        {icon("user")}
                        {c.nombre}
                    </span>
                })}

                <button
                    class="top-header__icon-btn"
                    title="Carrito"
                    on:click=move |_| open("u501_checkout")
                >
                    {icon("cart")}
                    <Show when=move || { cart.line_count() > 0 }>
                        <span class="top-header__badge">{move || cart.line_count()}</span>
                    </Show>
                </button>

                <button
                    class="top-header__icon-btn"
                    title="Notificaciones"
                    on:click=move |_| open("a010_notificacion")
                >
                    {icon("bell")}
                    <Show when=move || { unread.get() > 0 }>
                        <span class="top-header__badge">{move || unread.get()}</span>
                    </Show>
                </button>

                <div
                    class="top-header__user"
                    title="Mi perfil"
                    on:click=move |_| open("sys_profile")
                >
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user
                                .as_ref()
                                .map(|u| u.display_name())
                                .unwrap_or_else(|| "…".to_string())
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Salir">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
