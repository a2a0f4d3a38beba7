use crate::domain::a005_venta::api as ventas_api;
use crate::domain::a006_devolucion::api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::paged_list::PagedList;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::SALES;
use contracts::domain::a005_venta::Venta;
use contracts::domain::a006_devolucion::{Devolucion, DevolucionDto, EstadoDevolucion};
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::api_error::ApiError;
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn estado_color(e: &EstadoDevolucion) -> BadgeColor {
    match e {
        EstadoDevolucion::Pendiente => BadgeColor::Warning,
        EstadoDevolucion::Aprobada => BadgeColor::Success,
        EstadoDevolucion::Rechazada => BadgeColor::Danger,
    }
}

/// Lines of an order a return can point at: (product, label, units sold).
fn returnable_items(venta: &Venta) -> Vec<(EntityId, String, u32)> {
    venta
        .items
        .iter()
        .map(|item| {
            let codigo = item
                .producto_codigo
                .clone()
                .unwrap_or_else(|| format!("#{}", item.producto));
            (item.producto, format!("{} ({} u.)", codigo, item.cantidad), item.cantidad)
        })
        .collect()
}

/// Returned units must be positive and not exceed what was sold.
fn check_quantity(raw: &str, sold: u32) -> Result<u32, String> {
    let cantidad: u32 = raw
        .trim()
        .parse()
        .map_err(|_| "La cantidad debe ser un número entero".to_string())?;
    if cantidad == 0 {
        return Err("La cantidad debe ser mayor que cero".into());
    }
    if cantidad > sold {
        return Err(format!("No se pueden devolver más de {} unidades", sold));
    }
    Ok(cantidad)
}

#[component]
fn DevolucionForm(on_created: Callback<Devolucion>) -> impl IntoView {
    let venta_id = RwSignal::new(String::new());
    let venta = RwSignal::new(None::<Venta>);
    let producto = RwSignal::new(String::new());
    let cantidad = RwSignal::new(String::new());
    let motivo = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let load_venta = move |_| {
        let Ok(id) = venta_id.get_untracked().trim().parse::<EntityId>() else {
            error.set(Some("Ingrese el número interno de la venta".into()));
            return;
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match ventas_api::get_venta(id).await {
                Ok(v) => {
                    let first = v.items.first().map(|i| i.producto.to_string());
                    producto.set(first.unwrap_or_default());
                    venta.set(Some(v));
                }
                Err(e) => {
                    venta.set(None);
                    error.set(Some(e.user_message()));
                }
            }
            busy.set(false);
        });
    };

    let submit = move |_| {
        let Some(v) = venta.get_untracked() else {
            error.set(Some("Cargue primero la venta".into()));
            return;
        };
        let producto_id = producto.get_untracked().parse::<EntityId>().ok();
        let sold = returnable_items(&v)
            .into_iter()
            .find(|(id, _, _)| Some(*id) == producto_id)
            .map(|(_, _, sold)| sold)
            .unwrap_or(0);
        let cantidad = match check_quantity(&cantidad.get_untracked(), sold) {
            Ok(c) => c,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        let dto = DevolucionDto {
            venta: Some(v.id),
            producto: producto_id,
            cantidad,
            motivo: motivo.get_untracked().trim().to_string(),
        };
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            match api::crear_devolucion(&dto).await {
                Ok(d) => {
                    venta.set(None);
                    venta_id.set(String::new());
                    motivo.set(String::new());
                    on_created.run(d);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <Card>
            <Flex vertical=true gap=FlexGap::Medium>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Venta N°"</Label>
                        <Input value=venta_id input_type=InputType::Number placeholder="Ej: 15" />
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=load_venta
                        disabled=Signal::derive(move || busy.get())
                    >
                        {icon("search")} " Cargar"
                    </Button>
                    {move || venta.get().map(|v| view! {
                        <span class="form-hint">
                            {format!("{} · {}", v.display_number(), v.cliente_nombre.clone().unwrap_or_default())}
                        </span>
                    })}
                </Flex>

                <Show when=move || venta.with(|v| v.is_some())>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Producto"</Label>
                            <Select value=producto>
                                {move || venta.with(|v| {
                                    v.as_ref()
                                        .map(returnable_items)
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|(id, label, _)| view! { <option value=id.to_string()>{label}</option> })
                                        .collect_view()
                                })}
                            </Select>
                        </Flex>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Unidades"</Label>
                            <Input value=cantidad input_type=InputType::Number />
                        </Flex>
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Motivo"</Label>
                        <Textarea value=motivo placeholder="Ej: medida incorrecta" attr:rows=2 />
                    </Flex>
                    <div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=Signal::derive(move || busy.get())
                        >
                            "Registrar devolución"
                        </Button>
                    </div>
                </Show>

                <ErrorBox error=error />
            </Flex>
        </Card>
    }
}

#[component]
pub fn DevolucionList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let notices = use_notices();
    let (auth_state, _) = use_auth();
    let can_decide = Signal::derive(move || auth_state.with(|s| s.has_any_role(SALES)));

    let list = PagedList::<Devolucion>::new(api::ENDPOINT, 24);
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));

    let estado = RwSignal::new(String::new());
    Effect::new(move |prev: Option<()>| {
        let v = estado.get();
        if prev.is_some() {
            list.set_param("estado", &v);
        }
    });

    let show_form = RwSignal::new(false);
    let busy = RwSignal::new(None::<EntityId>);

    let decide = move |id: EntityId, approve: bool| {
        if busy.get_untracked().is_some() {
            return;
        }
        busy.set(Some(id));
        spawn_local(async move {
            let result: Result<Devolucion, ApiError> = if approve {
                api::aprobar(id).await
            } else {
                api::rechazar(id).await
            };
            match result {
                Ok(d) => {
                    notices.success(format!("Devolución {}", d.estado.label().to_lowercase()));
                    let id = d.id;
                    list.replace_where(move |x| x.id == id, d);
                }
                Err(e) => notices.api_error(&e),
            }
            busy.set(None);
        });
    };

    let on_created = Callback::new(move |d: Devolucion| {
        notices.success(format!("Devolución #{} registrada", d.id));
        show_form.set(false);
        list.reload();
    });

    view! {
        <div class="page">
            <PageHeader title="Devoluciones" icon_name="package-x">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_form.update(|s| *s = !*s)>
                    {icon("plus")} " Nueva devolución"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show when=move || show_form.get()>
                    <DevolucionForm on_created=on_created />
                </Show>

                <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin: 12px 0;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Estado"</Label>
                        <Select value=estado size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {EstadoDevolucion::all()
                                .iter()
                                .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <PaginationControls
                        meta=list.meta
                        on_page_change=Callback::new(move |p: u32| list.go_to_page(p))
                        disabled=Signal::derive(move || list.loading.get())
                    />
                </Flex>

                <ErrorBox error=list.error />

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=130.0>"Fecha"</TableHeaderCell>
                            <TableHeaderCell>"Venta"</TableHeaderCell>
                            <TableHeaderCell>"Producto"</TableHeaderCell>
                            <TableHeaderCell>"Unidades"</TableHeaderCell>
                            <TableHeaderCell min_width=200.0>"Motivo"</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|d| (d.id, d.estado)
                            children=move |d: Devolucion| {
                                let id = d.id;
                                let venta_id = d.venta;
                                let venta_label = d.venta_numero.clone().unwrap_or_else(|| format!("#{}", d.venta));
                                let venta_tab = venta_label.clone();
                                let pending = d.estado == EstadoDevolucion::Pendiente;
                                view! {
                                    <TableRow>
                                        <TableCell>{format_opt_datetime(d.fecha.as_ref())}</TableCell>
                                        <TableCell>
                                            <a
                                                href="#"
                                                on:click=move |ev| {
                                                    ev.prevent_default();
                                                    tabs_store.open_tab(
                                                        &detail_key("a005_venta", venta_id),
                                                        &detail_tab_label("Venta", &venta_tab),
                                                    );
                                                }
                                            >
                                                {venta_label}
                                            </a>
                                        </TableCell>
                                        <TableCell>{d.producto_codigo.clone().unwrap_or_else(|| format!("#{}", d.producto))}</TableCell>
                                        <TableCell>{d.cantidad}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{d.motivo.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell><StatusBadge value=d.estado color=estado_color /></TableCell>
                                        <TableCell>
                                            <Show when=move || pending && can_decide.get()>
                                                <Flex gap=FlexGap::Small>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Primary
                                                        disabled=Signal::derive(move || busy.get().is_some())
                                                        on_click=move |_| decide(id, true)
                                                    >
                                                        {icon("check")} " Aprobar"
                                                    </Button>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=Signal::derive(move || busy.get().is_some())
                                                        on_click=move |_| decide(id, false)
                                                    >
                                                        {icon("x")} " Rechazar"
                                                    </Button>
                                                </Flex>
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
    fn test_returnable_items_and_quantity() {
        let venta: Venta = serde_json::from_value(json!({
            "id": 3,
            "estado": "ENTREGADO",
            "estado_pago": "PAGADO",
            "items": [
                {"producto": 7, "producto_codigo": "VAL-0007", "cantidad": 16, "precio_unitario": "100"},
                {"producto": 9, "cantidad": 8, "precio_unitario": "50"}
            ]
        }))
        .unwrap();
        let items = returnable_items(&venta);
        assert_eq!(items[0], (7, "VAL-0007 (16 u.)".to_string(), 16));
        assert_eq!(items[1].1, "#9 (8 u.)");

        assert_eq!(check_quantity(" 4 ", 16), Ok(4));
        assert!(check_quantity("0", 16).is_err());
        assert!(check_quantity("17", 16).is_err());
        assert!(check_quantity("dos", 16).is_err());
    }
}
