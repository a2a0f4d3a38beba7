use super::colors::{estado_color, pago_color};
use crate::domain::a005_venta::api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header_cell::SortableHeaderCell;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::number_format::format_money;
use crate::shared::paged_list::PagedList;
use contracts::domain::a005_venta::{EstadoPago, EstadoVenta, Venta};
use contracts::domain::common::Choice;
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use thaw::*;

/// Orders, newest first. Customers see only their own; the API scopes it.
#[component]
pub fn VentaList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let list = PagedList::<Venta>::new(api::ENDPOINT, 24);
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));
    let current_sort = Signal::derive(move || list.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |key: &'static str| list.toggle_sort(key));

    let estado = RwSignal::new(String::new());
    let estado_pago = RwSignal::new(String::new());
    Effect::new(move |prev: Option<()>| {
        let v = estado.get();
        if prev.is_some() {
            list.set_param("estado", &v);
        }
    });
    Effect::new(move |prev: Option<()>| {
        let v = estado_pago.get();
        if prev.is_some() {
            list.set_param("estado_pago", &v);
        }
    });

    let open = move |v: &Venta| {
        tabs_store.open_tab(
            &detail_key("a005_venta", v.id),
            &detail_tab_label("Venta", &v.display_number()),
        );
    };

    view! {
        <div class="page">
            <PageHeader title="Ventas" icon_name="file-text">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")} " Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin-bottom: 12px; flex-wrap: wrap;">
                    <SearchInput
                        value=Signal::derive(move || list.param("search"))
                        on_change=Callback::new(move |v: String| list.set_param("search", &v))
                        placeholder="Número o cliente"
                    />
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Estado"</Label>
                        <Select value=estado size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {EstadoVenta::all()
                                .iter()
                                .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Pago"</Label>
                        <Select value=estado_pago size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {EstadoPago::all()
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
                            <SortableHeaderCell label="Número" sort_key="numero" current=current_sort on_sort=on_sort />
                            <SortableHeaderCell label="Fecha" sort_key="fecha" current=current_sort on_sort=on_sort min_width=130.0 />
                            <TableHeaderCell min_width=180.0>"Cliente"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Vendedor"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"Estado"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Pago"</TableHeaderCell>
                            <SortableHeaderCell label="Total" sort_key="total" current=current_sort on_sort=on_sort align_right=true />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|v| (v.id, v.estado, v.estado_pago)
                            children=move |v: Venta| {
                                let pending = v.pending_vouchers();
                                let numero = v.display_number();
                                let fecha = format_opt_datetime(v.fecha.as_ref());
                                let cliente = v.cliente_nombre.clone().unwrap_or_else(|| "-".to_string());
                                let vendedor = v.vendedor_nombre.clone().unwrap_or_else(|| "Sin asignar".to_string());
                                let (estado, estado_pago) = (v.estado, v.estado_pago);
                                let total = format_money(v.total);
                                view! {
                                    <TableRow attr:class="table__row--clickable" on:click=move |_| open(&v)>
                                        <TableCell>
                                            {numero}
                                            {(pending > 0).then(|| view! {
                                                <span class="badge badge--warning" title="Comprobantes por revisar">{pending}</span>
                                            })}
                                        </TableCell>
                                        <TableCell>{fecha}</TableCell>
                                        <TableCell>{cliente}</TableCell>
                                        <TableCell>{vendedor}</TableCell>
                                        <TableCell><StatusBadge value=estado color=estado_color /></TableCell>
                                        <TableCell><StatusBadge value=estado_pago color=pago_color /></TableCell>
                                        <TableCell attr:style="text-align: right;">{total}</TableCell>
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
