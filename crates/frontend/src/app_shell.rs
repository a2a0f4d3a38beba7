//! Auth gate: the public store for visitors, the tab workspace once signed in.

use crate::domain::a003_producto::ui::catalog::ProductCatalog;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use crate::shared::cart_context::use_cart;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;
use contracts::domain::a003_producto::TipoProducto;
use leptos::prelude::*;

const HOME_TAB: &str = "a003_producto_valvulas";

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    tabs_store.init_router_integration();
    if tabs_store.opened.with_untracked(|t| t.is_empty()) {
        tabs_store.open_tab(HOME_TAB, tab_label_for_key(HOME_TAB));
    }

    view! { <Shell left=|| view! { <Sidebar /> }.into_any() /> }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthPanel {
    Login,
    Register,
}

/// Store for visitors. The cart works without an account; checkout asks
/// for one.
#[component]
fn PublicLayout() -> impl IntoView {
    let cart = use_cart();
    let panel = RwSignal::new(AuthPanel::Login);

    view! {
        <div class="app-layout app-layout--public">
            <div class="top-header">
                <div class="top-header__brand">
                    <span class="top-header__title">"Válvulas · Tienda"</span>
                </div>
                <div class="top-header__actions">
                    <span class="top-header__icon-btn" title="Carrito">
                        {icon("cart")}
                        <Show when=move || { cart.line_count() > 0 }>
                            <span class="top-header__badge">{move || cart.line_count()}</span>
                        </Show>
                    </span>
                </div>
            </div>
            <div class="public-body">
                <div class="public-body__store">
                    <ProductCatalog fixed_tipo=TipoProducto::Valvula />
                </div>
                <div class="public-body__auth">
                    {move || match panel.get() {
                        AuthPanel::Login => view! {
                            <LoginPage on_register=Callback::new(move |_| panel.set(AuthPanel::Register)) />
                        }
                        .into_any(),
                        AuthPanel::Register => view! {
                            <RegisterPage on_login=Callback::new(move |_| panel.set(AuthPanel::Login)) />
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <PublicLayout /> }
        >
            <MainLayout />
        </Show>
    }
}
