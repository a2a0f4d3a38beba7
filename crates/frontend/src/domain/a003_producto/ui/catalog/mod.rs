//! Product catalog page, shared by the store and the back office.

pub mod controller;
pub mod filter_form;
pub mod state;
pub mod widget;

use controller::CatalogController;
use filter_form::FilterForm;
use state::ViewMode;
use widget::{ProductCards, ProductTable};

use crate::domain::a003_producto::api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::domain::a003_producto::TipoProducto;
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::catalog_query::FilterSet;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ProductCatalog(
    /// Pins the product type, e.g. the valve store.
    #[prop(optional)]
    fixed_tipo: Option<TipoProducto>,
) -> impl IntoView {
    let fixed = match fixed_tipo {
        Some(t) => FilterSet::from_pairs([("tipo_producto", t.code())]),
        None => FilterSet::new(),
    };
    let ctrl = CatalogController::new(fixed);
    let notices = use_notices();
    let (auth_state, _) = use_auth();
    let is_staff = Signal::derive(move || auth_state.with(|s| s.is_staff()));
    let tabs_store = use_context::<AppGlobalContext>();

    let default_view = if fixed_tipo.is_some() {
        ViewMode::Cards
    } else {
        ViewMode::Table
    };
    let view_mode = RwSignal::new(state::load_view_mode(default_view));
    let is_filter_expanded = RwSignal::new(true);
    let missing_only = RwSignal::new(ctrl.query.get_untracked().missing_photo_only);
    let exporting = RwSignal::new(false);

    Effect::new(move |prev: Option<()>| {
        let flag = missing_only.get();
        if prev.is_some() {
            ctrl.toggle_missing_photo_only(flag);
        }
    });

    let title = fixed_tipo
        .map(|_| tab_label_for_key("a003_producto_valvulas"))
        .unwrap_or_else(|| tab_label_for_key("a003_producto"));

    let on_edit = Callback::new(move |id: EntityId| {
        if let Some(tabs) = tabs_store {
            let label = ctrl
                .items
                .with_untracked(|items| items.iter().find(|p| p.id == id).map(|p| p.codigo.clone()))
                .unwrap_or_else(|| format!("#{}", id));
            tabs.open_tab(&detail_key("a003_producto", id), &detail_tab_label("Producto", &label));
        }
    });

    let open_new = move |_| {
        if let Some(tabs) = tabs_store {
            tabs.open_tab("a003_producto_new", tab_label_for_key("a003_producto_new"));
        }
    };

    let export = move |listado: bool| {
        if exporting.get_untracked() {
            return;
        }
        exporting.set(true);
        spawn_local(async move {
            let result = if listado {
                api::download_listado().await
            } else {
                api::download_bajo_stock().await
            };
            if let Err(e) = result {
                notices.api_error(&e);
            }
            exporting.set(false);
        });
    };

    let set_view = move |mode: ViewMode| {
        view_mode.set(mode);
        state::save_view_mode(mode);
    };

    let missing_label = move || {
        if ctrl.counting.get() {
            "Sin foto: …".to_string()
        } else {
            match ctrl.missing_photo.get() {
                Some(n) => format!("Sin foto: {}", n),
                None => "Sin foto: ?".to_string(),
            }
        }
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("package")}
                    <h1 class="page__title">{title}</h1>
                    <span class="page__subtitle">{move || format!("{} productos", ctrl.meta.get().count)}</span>
                </div>
                <div class="page__header-right">
                    <Show when=move || is_staff.get()>
                        <Button appearance=ButtonAppearance::Primary on_click=open_new>
                            {icon("plus")} " Nuevo"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| export(true)
                            disabled=Signal::derive(move || exporting.get())
                        >
                            {icon("printer")} " Listado PDF"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| export(false)
                            disabled=Signal::derive(move || exporting.get())
                        >
                            {icon("printer")} " Bajo stock PDF"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| ctrl.refresh()>
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=ctrl.active_filters_count()
                    pagination_controls=move || view! {
                        <PaginationControls
                            meta=ctrl.meta
                            on_page_change=Callback::new(move |page: u32| ctrl.navigate(page))
                            on_page_size_change=Callback::new(move |size: u32| ctrl.set_page_size(size))
                            page_size=Signal::derive(move || ctrl.query.with(|q| q.page_size))
                            disabled=Signal::derive(move || ctrl.loading.get())
                        />
                    }
                    header_right=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <span class="missing-photo">
                                {missing_label}
                                <button
                                    class="missing-photo__recount"
                                    title="Recontar"
                                    on:click=move |_| ctrl.count_missing_photo()
                                >
                                    {icon("refresh")}
                                </button>
                            </span>
                            <Checkbox checked=missing_only label="Solo sin foto" />
                            <div class="view-toggle">
                                <button
                                    class="view-toggle__btn"
                                    class:view-toggle__btn--active=move || view_mode.get() == ViewMode::Cards
                                    title="Tarjetas"
                                    on:click=move |_| set_view(ViewMode::Cards)
                                >
                                    {icon("grid")}
                                </button>
                                <button
                                    class="view-toggle__btn"
                                    class:view-toggle__btn--active=move || view_mode.get() == ViewMode::Table
                                    title="Tabla"
                                    on:click=move |_| set_view(ViewMode::Table)
                                >
                                    {icon("list")}
                                </button>
                            </div>
                        </Flex>
                    }
                    filter_content=move || view! {
                        <FilterForm controller=ctrl show_tipo_producto=fixed_tipo.is_none() />
                    }
                />

                <div class="catalog-results" class:catalog-results--loading=move || ctrl.loading.get()>
                    <Show when=move || ctrl.loading.get()>
                        <div class="loading-bar">
                            <Spinner size=SpinnerSize::Tiny />
                        </div>
                    </Show>
                    <Show
                        when=move || !ctrl.items.with(|i| i.is_empty())
                        fallback=move || {
                            (!ctrl.loading.get()).then(|| view! {
                                <div class="empty-state">"No hay productos que coincidan con los filtros."</div>
                            })
                        }
                    >
                        {move || match view_mode.get() {
                            ViewMode::Table => view! {
                                <ProductTable controller=ctrl is_staff=is_staff on_edit=on_edit />
                            }.into_any(),
                            ViewMode::Cards => view! {
                                <ProductCards controller=ctrl is_staff=is_staff on_edit=on_edit />
                            }.into_any(),
                        }}
                    </Show>
                </div>
            </div>
        </div>
    }
}
