use contracts::system::auth::Rol;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for signed-in users.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <div class="access-denied">"Inicie sesión para continuar."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders children only when the user holds one of `roles`.
#[component]
pub fn RequireRole(
    roles: &'static [Rol],
    #[prop(optional)] quiet: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.has_any_role(roles))
            fallback=move || {
                (!quiet).then(|| view! {
                    <div class="access-denied">"No tiene permisos para ver esta sección."</div>
                })
            }
        >
            {children()}
        </Show>
    }
}

pub const STAFF: &[Rol] = &[Rol::Administrador, Rol::Vendedor, Rol::Bodega];
pub const SALES: &[Rol] = &[Rol::Administrador, Rol::Vendedor];
pub const WAREHOUSE: &[Rol] = &[Rol::Administrador, Rol::Bodega];
pub const ADMIN: &[Rol] = &[Rol::Administrador];
