use crate::config::config;
use crate::dashboards::d400_resumen::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use crate::shared::poller::use_poller;
use crate::system::auth::context::use_auth;
use chrono::{DateTime, Utc};
use contracts::dashboards::d400_resumen::{ResumenDashboard as Resumen, UsuarioEnLinea};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// "hace N min" for the online panel.
fn last_seen(ultimo: Option<&DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ultimo) = ultimo else {
        return String::new();
    };
    let minutes = (now - *ultimo).num_minutes().max(0);
    match minutes {
        0 => "ahora".to_string(),
        m if m < 60 => format!("hace {} min", m),
        m => format!("hace {} h", m / 60),
    }
}

#[component]
pub fn ResumenDashboard() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    let resumen = RwSignal::new(None::<Resumen>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match api::get_resumen().await {
                Ok(r) => {
                    resumen.set(Some(r));
                    error.set(None);
                }
                Err(e) => {
                    log::warn!("dashboard load failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let online = RwSignal::new(Vec::<UsuarioEnLinea>::new());
    let signed_in = Signal::derive(move || auth_state.with(|s| s.is_authenticated()));
    use_poller(config().online_poll_ms, signed_in, move || async move {
        match api::get_usuarios_en_linea().await {
            Ok(users) => online.set(users),
            Err(e) if e.is_cancelled() => {}
            Err(e) => log::warn!("online users poll failed: {}", e),
        }
    });

    let money = move |f: fn(&Resumen) -> f64| {
        Signal::derive(move || resumen.with(|r| r.as_ref().map(|r| format_money(f(r)))))
    };
    let count = move |f: fn(&Resumen) -> u64| {
        Signal::derive(move || resumen.with(|r| r.as_ref().map(|r| f(r).to_string())))
    };
    let backlog = move |f: fn(&Resumen) -> u64| {
        Signal::derive(move || {
            resumen.with(|r| r.as_ref().map(|r| StatTone::for_backlog(f(r))).unwrap_or_default())
        })
    };
    let open = move |key: &'static str| {
        Callback::new(move |_: ()| tabs_store.open_tab(key, tab_label_for_key(key)))
    };

    view! {
        <div class="page">
            <PageHeader title="Resumen" icon_name="bar-chart">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")} " Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorBox error=error />

                <div class="stat-grid">
                    <StatCard label="Ventas de hoy" icon_name="activity" value=money(|r| r.ventas_hoy) />
                    <StatCard label="Ventas del mes" icon_name="bar-chart" value=money(|r| r.ventas_mes) />
                    <StatCard
                        label="Pedidos pendientes"
                        icon_name="file-text"
                        value=count(|r| r.pedidos_pendientes)
                        tone=backlog(|r| r.pedidos_pendientes)
                        on_click=open("a005_venta")
                    />
                    <StatCard
                        label="Comprobantes por revisar"
                        icon_name="clipboard"
                        value=count(|r| r.comprobantes_pendientes)
                        tone=backlog(|r| r.comprobantes_pendientes)
                        on_click=open("a005_venta")
                    />
                    <StatCard
                        label="Productos bajo stock"
                        icon_name="package"
                        value=count(|r| r.productos_bajo_stock)
                        tone=backlog(|r| r.productos_bajo_stock)
                        on_click=open("a003_producto")
                    />
                    <StatCard
                        label="Devoluciones pendientes"
                        icon_name="package-x"
                        value=count(|r| r.devoluciones_pendientes)
                        tone=backlog(|r| r.devoluciones_pendientes)
                        on_click=open("a006_devolucion")
                    />
                </div>

                <Card attr:style="margin-top: 16px; max-width: 480px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Flex align=FlexAlign::Center gap=FlexGap::Small>
                            {icon("users")}
                            <strong>"Usuarios en línea"</strong>
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                {move || online.with(|u| u.len())}
                            </Badge>
                        </Flex>
                        <For
                            each=move || online.get()
                            key=|u| u.id
                            children=move |u: UsuarioEnLinea| {
                                let seen = last_seen(u.ultimo_acceso.as_ref(), Utc::now());
                                let name = u
                                    .nombre
                                    .clone()
                                    .filter(|n| !n.trim().is_empty())
                                    .unwrap_or_else(|| u.username.clone());
                                view! {
                                    <div class="online-user">
                                        <span class="online-user__dot"></span>
                                        <span class="online-user__name">{name}</span>
                                        <span class="online-user__seen">{seen}</span>
                                    </div>
                                }
                            }
                        />
                    </Flex>
                </Card>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_last_seen() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(last_seen(None, now), "");
        assert_eq!(last_seen(Some(&now), now), "ahora");
        assert_eq!(last_seen(Some(&(now - Duration::minutes(7))), now), "hace 7 min");
        assert_eq!(last_seen(Some(&(now - Duration::minutes(130))), now), "hace 2 h");
        assert_eq!(last_seen(Some(&(now + Duration::minutes(3))), now), "ahora");
    }
}
