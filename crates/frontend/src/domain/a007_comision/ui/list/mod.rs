use crate::domain::a005_venta::api as ventas_api;
use crate::domain::a007_comision::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header_cell::SortableHeaderCell;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_number_with_decimals};
use crate::shared::paged_list::PagedList;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::ADMIN;
use contracts::domain::a005_venta::Vendedor;
use contracts::domain::a007_comision::{Comision, EstadoComision};
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn estado_color(e: &EstadoComision) -> BadgeColor {
    match e {
        EstadoComision::Pendiente => BadgeColor::Warning,
        EstadoComision::Pagada => BadgeColor::Success,
        EstadoComision::Anulada => BadgeColor::Subtle,
    }
}

/// Amount still owed on the visible page.
fn pending_total(items: &[Comision]) -> f64 {
    items
        .iter()
        .filter(|c| c.estado == EstadoComision::Pendiente)
        .map(|c| c.monto)
        .sum()
}

#[component]
pub fn ComisionList() -> impl IntoView {
    let notices = use_notices();
    let (auth_state, _) = use_auth();
    let is_admin = Signal::derive(move || auth_state.with(|s| s.has_any_role(ADMIN)));

    let list = PagedList::<Comision>::new(api::ENDPOINT, 24);
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));
    let current_sort = Signal::derive(move || list.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |key: &'static str| list.toggle_sort(key));

    let vendedores = RwSignal::new(Vec::<Vendedor>::new());
    spawn_local(async move {
        match ventas_api::list_vendedores().await {
            Ok(v) => vendedores.set(v),
            Err(e) => log::warn!("vendedores not loaded: {}", e),
        }
    });

    let vendedor = RwSignal::new(String::new());
    let estado = RwSignal::new(String::new());
    Effect::new(move |prev: Option<()>| {
        let v = vendedor.get();
        if prev.is_some() {
            list.set_param("vendedor", &v);
        }
    });
    Effect::new(move |prev: Option<()>| {
        let v = estado.get();
        if prev.is_some() {
            list.set_param("estado", &v);
        }
    });

    let paying = RwSignal::new(None::<EntityId>);
    let mark_paid = move |id: EntityId| {
        if paying.get_untracked().is_some() {
            return;
        }
        paying.set(Some(id));
        spawn_local(async move {
            match api::marcar_pagada(id).await {
                Ok(c) => {
                    notices.success("Comisión marcada como pagada");
                    let id = c.id;
                    list.replace_where(move |x| x.id == id, c);
                }
                Err(e) => notices.api_error(&e),
            }
            paying.set(None);
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Comisiones" icon_name="percent">
                <span class="page-header__meta" title="Pendiente de pago en esta página">
                    {move || list.items.with(|i| format!("Pendiente: {}", format_money(pending_total(i))))}
                </span>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin-bottom: 12px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Vendedor"</Label>
                        <Select value=vendedor size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            <For
                                each=move || vendedores.get()
                                key=|v| v.id
                                children=move |v: Vendedor| view! {
                                    <option value=v.id.to_string()>{v.display_name()}</option>
                                }
                            />
                        </Select>
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Estado"</Label>
                        <Select value=estado size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {EstadoComision::all()
                                .iter()
                                .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <PaginationControls
                        meta=list.meta
                        on_page_change=Callback::new(move |p: u32| list.go_to_page(p))
                        on_page_size_change=Callback::new(move |s: u32| list.set_page_size(s))
                        page_size=Signal::derive(move || list.query.with(|q| q.page_size))
                        disabled=Signal::derive(move || list.loading.get())
                    />
                </Flex>

                <ErrorBox error=list.error />

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Fecha" sort_key="fecha" current=current_sort on_sort=on_sort min_width=130.0 />
                            <TableHeaderCell min_width=150.0>"Vendedor"</TableHeaderCell>
                            <TableHeaderCell>"Venta"</TableHeaderCell>
                            <TableHeaderCell>"%"</TableHeaderCell>
                            <SortableHeaderCell label="Monto" sort_key="monto" current=current_sort on_sort=on_sort align_right=true />
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|c| (c.id, c.estado)
                            children=move |c: Comision| {
                                let id = c.id;
                                let pending = c.estado == EstadoComision::Pendiente;
                                view! {
                                    <TableRow>
                                        <TableCell>{format_opt_datetime(c.fecha.as_ref())}</TableCell>
                                        <TableCell>{c.vendedor_nombre.clone().unwrap_or_else(|| format!("#{}", c.vendedor))}</TableCell>
                                        <TableCell>{c.venta_numero.clone().unwrap_or_else(|| format!("#{}", c.venta))}</TableCell>
                                        <TableCell>{format_number_with_decimals(c.porcentaje, 1)}</TableCell>
                                        <TableCell attr:style="text-align: right;">{format_money(c.monto)}</TableCell>
                                        <TableCell><StatusBadge value=c.estado color=estado_color /></TableCell>
                                        <TableCell>
                                            <Show when=move || pending && is_admin.get()>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Primary
                                                    disabled=Signal::derive(move || paying.get().is_some())
                                                    on_click=move |_| mark_paid(id)
                                                >
                                                    {icon("check")} " Marcar pagada"
                                                </Button>
                                            </Show>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pending_total_ignores_settled() {
        let items: Vec<Comision> = serde_json::from_value(json!([
            {"id": 1, "vendedor": 2, "venta": 10, "monto": "1500.50", "estado": "PENDIENTE"},
            {"id": 2, "vendedor": 2, "venta": 11, "monto": "900", "estado": "PAGADA"},
            {"id": 3, "vendedor": 4, "venta": 12, "monto": 499.5, "estado": "PENDIENTE"}
        ]))
        .unwrap();
        assert_eq!(pending_total(&items), 2000.0);
        assert_eq!(pending_total(&[]), 0.0);
    }
}
