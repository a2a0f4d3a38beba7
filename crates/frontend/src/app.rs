use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notice_service::{NoticeHost, NoticeService};
use crate::shared::cart_context::CartContext;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(NoticeService::new());
    provide_context(CartContext::restore());

    view! {
        <AuthProvider>
            <AppShell />
            <NoticeHost />
        </AuthProvider>
    }
}
