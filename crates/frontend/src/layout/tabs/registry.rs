//! Page key → view. Every tab the workspace can open is listed here.

use crate::dashboards::d400_resumen::ResumenDashboard;
use crate::domain::a001_marca::ui::list::MarcaList;
use crate::domain::a002_vehiculo::ui::list::VehiculoList;
use crate::domain::a003_producto::ui::catalog::ProductCatalog;
use crate::domain::a003_producto::ui::details::ProductoDetail;
use crate::domain::a004_cliente::ui::details::ClienteDetail;
use crate::domain::a004_cliente::ui::list::ClienteList;
use crate::domain::a005_venta::ui::details::VentaDetail;
use crate::domain::a005_venta::ui::list::VentaList;
use crate::domain::a006_devolucion::ui::list::DevolucionList;
use crate::domain::a007_comision::ui::list::ComisionList;
use crate::domain::a008_conteo_fisico::ui::list::ConteoFisicoList;
use crate::domain::a009_interaccion::ui::list::InteraccionList;
use crate::domain::a010_notificacion::ui::list::NotificacionList;
use crate::layout::global_context::{parse_detail_key, AppGlobalContext};
use crate::system::auth::guard::{RequireAuth, RequireRole, SALES, STAFF, WAREHOUSE};
use crate::system::pages::profile::ProfilePage;
use crate::usecases::u501_checkout::CheckoutPage;
use contracts::domain::a003_producto::TipoProducto;
use leptos::logging::log;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| {
        tabs_store.close_tab(&key_for_close);
    });

    match key {
        "d400_resumen" => view! {
            <RequireRole roles=STAFF>
                <ResumenDashboard />
            </RequireRole>
        }
        .into_any(),

        // Catalog
        "a003_producto_valvulas" => {
            view! { <ProductCatalog fixed_tipo=TipoProducto::Valvula /> }.into_any()
        }
        "a003_producto" => view! { <ProductCatalog /> }.into_any(),
        "a003_producto_new" => view! {
            <RequireRole roles=STAFF>
                <ProductoDetail id=None on_close=on_close />
            </RequireRole>
        }
        .into_any(),
        k if parse_detail_key(k, "a003_producto").is_some() => {
            let id = parse_detail_key(k, "a003_producto");
            log!("registry: ProductoDetail {:?}", id);
            view! {
                <RequireRole roles=STAFF>
                    <ProductoDetail id=id on_close=on_close />
                </RequireRole>
            }
            .into_any()
        }
        "a001_marca" => view! {
            <RequireRole roles=STAFF>
                <MarcaList />
            </RequireRole>
        }
        .into_any(),
        "a002_vehiculo" => view! {
            <RequireRole roles=STAFF>
                <VehiculoList />
            </RequireRole>
        }
        .into_any(),

        // Sales
        "a004_cliente" => view! {
            <RequireRole roles=SALES>
                <ClienteList />
            </RequireRole>
        }
        .into_any(),
        "a004_cliente_new" => view! {
            <RequireRole roles=SALES>
                <ClienteDetail id=None on_close=on_close />
            </RequireRole>
        }
        .into_any(),
        k if parse_detail_key(k, "a004_cliente").is_some() => {
            let id = parse_detail_key(k, "a004_cliente");
            view! {
                <RequireRole roles=SALES>
                    <ClienteDetail id=id on_close=on_close />
                </RequireRole>
            }
            .into_any()
        }
        "a005_venta" => view! { <VentaList /> }.into_any(),
        k if parse_detail_key(k, "a005_venta").is_some() => {
            let id = parse_detail_key(k, "a005_venta").unwrap_or_default();
            view! { <VentaDetail id=id on_close=on_close /> }.into_any()
        }
        "a006_devolucion" => view! {
            <RequireRole roles=STAFF>
                <DevolucionList />
            </RequireRole>
        }
        .into_any(),
        "a007_comision" => view! {
            <RequireRole roles=SALES>
                <ComisionList />
            </RequireRole>
        }
        .into_any(),
        "a008_conteo_fisico" => view! {
            <RequireRole roles=WAREHOUSE>
                <ConteoFisicoList />
            </RequireRole>
        }
        .into_any(),
        "a009_interaccion" => view! {
            <RequireRole roles=SALES>
                <InteraccionList />
            </RequireRole>
        }
        .into_any(),
        "a010_notificacion" => view! {
            <RequireAuth>
                <NotificacionList />
            </RequireAuth>
        }
        .into_any(),

        "u501_checkout" => view! { <CheckoutPage /> }.into_any(),
        "sys_profile" => view! {
            <RequireAuth>
                <ProfilePage />
            </RequireAuth>
        }
        .into_any(),

        _ => {
            log!("registry: unknown tab key '{}'", key);
            view! {
                <div class="placeholder">{format!("Página desconocida: {}", key)}</div>
            }
            .into_any()
        }
    }
}
