//! Sidebar with collapsible groups, filtered by the user's roles.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::{use_auth, AuthState};
use crate::system::auth::guard::{SALES, STAFF, WAREHOUSE};
use contracts::system::auth::Rol;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<MenuItem>,
    /// `None`: any signed-in user.
    roles: Option<&'static [Rol]>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    roles: Option<&'static [Rol]>,
}

fn item(id: &'static str, icon: &'static str) -> MenuItem {
    MenuItem {
        id,
        label: tab_label_for_key(id),
        icon,
        roles: None,
    }
}

fn staff_item(id: &'static str, icon: &'static str, roles: &'static [Rol]) -> MenuItem {
    MenuItem {
        roles: Some(roles),
        ..item(id, icon)
    }
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "tienda",
            label: "Tienda",
            icon: "package",
            items: vec![
                item("a003_producto_valvulas", "grid"),
                item("a003_producto", "list"),
                item("u501_checkout", "cart"),
                item("a005_venta", "file-text"),
                item("a010_notificacion", "bell"),
            ],
            roles: None,
        },
        MenuGroup {
            id: "inventario",
            label: "Inventario",
            icon: "clipboard",
            items: vec![
                staff_item("a003_producto_new", "plus", STAFF),
                staff_item("a001_marca", "tag", STAFF),
                staff_item("a002_vehiculo", "car", STAFF),
                staff_item("a008_conteo_fisico", "clipboard", WAREHOUSE),
                staff_item("a006_devolucion", "package-x", STAFF),
            ],
            roles: Some(STAFF),
        },
        MenuGroup {
            id: "ventas",
            label: "Ventas y clientes",
            icon: "customers",
            items: vec![
                staff_item("d400_resumen", "bar-chart", STAFF),
                staff_item("a004_cliente", "users", SALES),
                staff_item("a009_interaccion", "message-square", SALES),
                staff_item("a007_comision", "percent", SALES),
            ],
            roles: Some(STAFF),
        },
    ]
}

fn visible(state: &AuthState, roles: Option<&'static [Rol]>) -> bool {
    match roles {
        None => true,
        Some(roles) => state.has_any_role(roles),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let expanded_groups = RwSignal::new(vec!["tienda".to_string()]);

    let render_group = move |group: MenuGroup| {
        let gid = group.id.to_string();
        let gid_chevron = gid.clone();
        let gid_show = gid.clone();
        let items = StoredValue::new(group.items);

        view! {
            <div>
                <div
                    class="app-sidebar__item"
                    style:padding-left="12px"
                    on:click=move |_| {
                        let gid = gid.clone();
                        expanded_groups.update(move |items| {
                            if let Some(pos) = items.iter().position(|x| x == &gid) {
                                items.remove(pos);
                            } else {
                                items.push(gid);
                            }
                        });
                    }
                >
                    <div class="app-sidebar__item-content">
                        {icon(group.icon)}
                        <span>{group.label}</span>
                    </div>
                    <div
                        class="app-sidebar__chevron"
                        class:app-sidebar__chevron--expanded=move || {
                            expanded_groups.get().contains(&gid_chevron)
                        }
                    >
                        {icon("chevron-right")}
                    </div>
                </div>

                <Show when=move || expanded_groups.get().contains(&gid_show)>
                    <div class="app-sidebar__children">
                        {move || {
                            let state = auth_state.get();
                            items
                                .get_value()
                                .into_iter()
                                .filter(|i| visible(&state, i.roles))
                                .map(|i| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(i.id)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(i.id, i.label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(i.icon)}
                                                <span>{i.label}</span>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <div class="app-sidebar__content">
            {move || {
                let state = auth_state.get();
                get_menu_groups()
                    .into_iter()
                    .filter(|g| visible(&state, g.roles))
                    .map(render_group)
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserInfo;

    fn state_with_groups(groups: &[&str]) -> AuthState {
        AuthState {
            token: Some("t".into()),
            user: Some(UserInfo {
                id: 1,
                username: "u".into(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                groups: groups.iter().map(|g| g.to_string()).collect(),
                is_staff: false,
                is_superuser: false,
                cliente: None,
            }),
            profile_loading: false,
        }
    }

    #[test]
    fn test_customer_sees_only_store() {
        let state = state_with_groups(&["Cliente"]);
        let ids: Vec<_> = get_menu_groups()
            .into_iter()
            .filter(|g| visible(&state, g.roles))
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["tienda"]);
    }

    #[test]
    fn test_warehouse_items() {
        let state = state_with_groups(&["Bodega"]);
        let inventory = get_menu_groups()
            .into_iter()
            .find(|g| g.id == "inventario")
            .unwrap();
        assert!(visible(&state, inventory.roles));
        let items: Vec<_> = inventory
            .items
            .iter()
            .filter(|i| visible(&state, i.roles))
            .map(|i| i.id)
            .collect();
        assert!(items.contains(&"a008_conteo_fisico"));

        let sales = get_menu_groups().into_iter().find(|g| g.id == "ventas").unwrap();
        let sales_items: Vec<_> = sales
            .items
            .iter()
            .filter(|i| visible(&state, i.roles))
            .map(|i| i.id)
            .collect();
        assert_eq!(sales_items, vec!["d400_resumen"]);
    }
}
