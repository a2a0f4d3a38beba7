use crate::domain::a010_notificacion::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::restored_tab_title;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::paged_list::PagedList;
use contracts::domain::a010_notificacion::Notificacion;
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn NotificacionList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let notices = use_notices();
    let list = PagedList::<Notificacion>::new(api::ENDPOINT, 24);
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));

    let only_unread = RwSignal::new(false);
    Effect::new(move |prev: Option<()>| {
        let flag = only_unread.get();
        if prev.is_some() {
            list.set_param("leida", if flag { "false" } else { "" });
        }
    });

    let marking_all = RwSignal::new(false);
    let mark_all = move |_| {
        marking_all.set(true);
        spawn_local(async move {
            match api::marcar_todas_leidas().await {
                Ok(_) => {
                    notices.info("Todas las notificaciones quedaron leídas");
                    list.reload();
                }
                Err(e) => notices.api_error(&e),
            }
            marking_all.set(false);
        });
    };

    let open = move |n: Notificacion| {
        if !n.leida {
            let mut read = n.clone();
            read.leida = true;
            list.replace_where(|x| x.id == n.id, read);
            spawn_local(async move {
                if let Err(e) = api::marcar_leida(n.id).await {
                    log::warn!("marcar_leida {} failed: {}", n.id, e);
                }
            });
        }
        if let Some(key) = n.enlace.as_deref().filter(|k| !k.trim().is_empty()) {
            tabs_store.open_tab(key, &restored_tab_title(key));
        }
    };

    view! {
        <div class="page">
            <PageHeader title="Notificaciones" icon_name="bell">
                <Checkbox checked=only_unread label="Solo no leídas" />
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=mark_all
                    disabled=Signal::derive(move || marking_all.get())
                >
                    {icon("check")} " Marcar todas como leídas"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <PaginationControls
                    meta=list.meta
                    on_page_change=Callback::new(move |p: u32| list.go_to_page(p))
                    disabled=Signal::derive(move || list.loading.get())
                />
                <ErrorBox error=list.error />

                <div class="notification-list">
                    <For
                        each=move || list.items.get()
                        key=|n| (n.id, n.leida)
                        children=move |n: Notificacion| {
                            let unread = !n.leida;
                            let row = n.clone();
                            view! {
                                <div
                                    class="notification-list__item"
                                    class:notification-list__item--unread=unread
                                    on:click=move |_| open(row.clone())
                                >
                                    <div class="notification-list__title">
                                        {unread.then(|| view! { <span class="notification-list__dot"></span> })}
                                        {n.titulo.clone()}
                                    </div>
                                    <div class="notification-list__body">{n.mensaje.clone()}</div>
                                    <div class="notification-list__date">{format_opt_datetime(n.fecha.as_ref())}</div>
                                </div>
                            }
                        }
                    />
                    <Show when=move || list.items.with(|i| i.is_empty()) && !list.loading.get()>
                        <div class="placeholder">"No hay notificaciones"</div>
                    </Show>
                </div>
            </div>
        </div>
    }
}
