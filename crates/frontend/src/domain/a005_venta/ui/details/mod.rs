//! Order page: lines, status actions and payment vouchers.

use super::colors::{comprobante_color, estado_color, pago_color};
use crate::domain::a005_venta::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_number_int, parse_amount};
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::SALES;
use contracts::domain::a005_venta::{
    Comprobante, EstadoComprobante, EstadoPago, EstadoVenta, Venta, VentaItem, Vendedor,
};
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn VentaDetail(id: EntityId, on_close: Callback<()>) -> impl IntoView {
    let notices = use_notices();
    let (auth_state, _) = use_auth();
    let can_manage = Signal::derive(move || auth_state.with(|s| s.has_any_role(SALES)));

    let venta = RwSignal::new(None::<Venta>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let estado_sel = RwSignal::new(String::new());
    let pago_sel = RwSignal::new(String::new());
    let vendedor_sel = RwSignal::new(String::new());
    let vendedores = RwSignal::new(Vec::<Vendedor>::new());

    // Every action answers with the updated order.
    let apply = move |v: Venta| {
        estado_sel.set(v.estado.code().to_string());
        pago_sel.set(v.estado_pago.code().to_string());
        vendedor_sel.set(v.vendedor.map(|id| id.to_string()).unwrap_or_default());
        venta.set(Some(v));
    };

    let load = move || {
        spawn_local(async move {
            match api::get_venta(id).await {
                Ok(v) => apply(v),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };
    load();

    Effect::new(move |_| {
        if can_manage.get() {
            spawn_local(async move {
                match api::list_vendedores().await {
                    Ok(list) => vendedores.set(list),
                    Err(e) => log::warn!("vendedores: {}", e),
                }
            });
        }
    });

    let run = move |success: &'static str, fut: std::pin::Pin<Box<dyn Future<Output = Result<Venta, ApiError>>>>| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            match fut.await {
                Ok(v) => {
                    notices.success(success);
                    apply(v);
                }
                Err(e) => notices.api_error(&e),
            }
            busy.set(false);
        });
    };

    let update_estado = move |_| {
        if let Some(estado) = EstadoVenta::from_code(&estado_sel.get_untracked()) {
            run("Estado actualizado", Box::pin(api::actualizar_estado(id, estado)));
        }
    };
    let update_pago = move |_| {
        if let Some(estado) = EstadoPago::from_code(&pago_sel.get_untracked()) {
            run("Pago actualizado", Box::pin(api::actualizar_pago(id, estado)));
        }
    };
    let assign = move |_| {
        if let Ok(vendedor) = vendedor_sel.get_untracked().parse::<EntityId>() {
            run("Vendedor asignado", Box::pin(api::asignar_vendedor(id, vendedor)));
        }
    };
    let on_voucher_action = Callback::new(move |(comprobante, approve): (EntityId, bool)| {
        if approve {
            run("Comprobante aprobado", Box::pin(api::aprobar_comprobante(id, comprobante, None)));
        } else {
            run("Comprobante anulado", Box::pin(api::anular_comprobante(id, comprobante, None)));
        }
    });

    let download = move |_| {
        if let Some(v) = venta.get_untracked() {
            spawn_local(async move {
                if let Err(e) = api::generar_pdf(&v).await {
                    notices.api_error(&e);
                }
            });
        }
    };

    view! {
        <div class="page page--detail">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("file-text")}
                    <h1 class="page__title">
                        {move || venta.with(|v| v.as_ref().map(|v| format!("Venta {}", v.display_number())))
                            .unwrap_or_else(|| "Venta".to_string())}
                    </h1>
                    {move || venta.get().map(|v| view! {
                        <StatusBadge value=v.estado color=estado_color />
                        <StatusBadge value=v.estado_pago color=pago_color />
                    })}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=download>
                        {icon("printer")} " PDF"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                        {icon("refresh")}
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "Cerrar"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            {move || venta.get().map(|v| {
                let items = v.items.clone();
                let comprobantes = v.comprobantes.clone();
                view! {
                    <div class="page__content detail-grid">
                        <Card>
                            <dl class="detail-list">
                                <dt>"Cliente"</dt>
                                <dd>{v.cliente_nombre.clone().unwrap_or_else(|| "-".to_string())}</dd>
                                <dt>"Vendedor"</dt>
                                <dd>{v.vendedor_nombre.clone().unwrap_or_else(|| "Sin asignar".to_string())}</dd>
                                <dt>"Fecha"</dt>
                                <dd>{format_opt_datetime(v.fecha.as_ref())}</dd>
                                <dt>"Observaciones"</dt>
                                <dd>{v.observaciones.clone().unwrap_or_default()}</dd>
                            </dl>
                        </Card>

                        <Card>
                            <h3 class="detail-section__title">"Detalle"</h3>
                            <ItemsTable items=items subtotal=v.subtotal total=v.total />
                        </Card>

                        <Card>
                            <h3 class="detail-section__title">"Comprobantes de pago"</h3>
                            <VoucherList
                                comprobantes=comprobantes
                                can_manage=can_manage
                                on_action=on_voucher_action
                            />
                            <VoucherUpload id=id on_uploaded=Callback::new(move |v: Venta| apply(v)) />
                        </Card>
                    </div>
                }
            })}

            <Show when=move || can_manage.get() && venta.with(Option::is_some)>
                <Card class="detail-actions">
                    <h3 class="detail-section__title">"Gestión"</h3>
                    <Flex gap=FlexGap::Large align=FlexAlign::End attr:style="flex-wrap: wrap;">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Estado"</Label>
                                <Select value=estado_sel size=SelectSize::Small>
                                    {EstadoVenta::all()
                                        .iter()
                                        .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                        .collect_view()}
                                </Select>
                            </Flex>
                            <Button size=ButtonSize::Small on_click=update_estado disabled=busy>
                                "Actualizar"
                            </Button>
                        </Flex>
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Pago"</Label>
                                <Select value=pago_sel size=SelectSize::Small>
                                    {EstadoPago::all()
                                        .iter()
                                        .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                        .collect_view()}
                                </Select>
                            </Flex>
                            <Button size=ButtonSize::Small on_click=update_pago disabled=busy>
                                "Actualizar"
                            </Button>
                        </Flex>
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <Flex vertical=true gap=FlexGap::Small>
                                <Label>"Vendedor"</Label>
                                <Select value=vendedor_sel size=SelectSize::Small>
                                    <option value="">"Sin asignar"</option>
                                    <For
                                        each=move || vendedores.get()
                                        key=|v| v.id
                                        children=|v: Vendedor| view! {
                                            <option value=v.id.to_string()>{v.display_name()}</option>
                                        }
                                    />
                                </Select>
                            </Flex>
                            <Button size=ButtonSize::Small on_click=assign disabled=busy>
                                "Asignar"
                            </Button>
                        </Flex>
                    </Flex>
                </Card>
            </Show>
        </div>
    }
}

#[component]
fn ItemsTable(items: Vec<VentaItem>, subtotal: f64, total: f64) -> impl IntoView {
    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Producto"</TableHeaderCell>
                    <TableHeaderCell>"Cantidad"</TableHeaderCell>
                    <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                    <TableHeaderCell>"Subtotal"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {items
                    .into_iter()
                    .map(|item| {
                        let name = match (item.producto_codigo, item.producto_descripcion) {
                            (Some(c), Some(d)) => format!("{} · {}", c, d),
                            (Some(c), None) => c,
                            (None, Some(d)) => d,
                            (None, None) => format!("Producto #{}", item.producto),
                        };
                        let line_total = if item.subtotal > 0.0 {
                            item.subtotal
                        } else {
                            item.precio_unitario * item.cantidad as f64
                        };
                        view! {
                            <TableRow>
                                <TableCell>{name}</TableCell>
                                <TableCell attr:style="text-align: right;">{format_number_int(item.cantidad as f64)}</TableCell>
                                <TableCell attr:style="text-align: right;">{format_money(item.precio_unitario)}</TableCell>
                                <TableCell attr:style="text-align: right;">{format_money(line_total)}</TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view()}
                <TableRow attr:class="table__totals-row">
                    <TableCell>"Subtotal"</TableCell>
                    <TableCell>""</TableCell>
                    <TableCell>""</TableCell>
                    <TableCell attr:style="text-align: right;">{format_money(subtotal)}</TableCell>
                </TableRow>
                <TableRow attr:class="table__totals-row">
                    <TableCell><strong>"Total"</strong></TableCell>
                    <TableCell>""</TableCell>
                    <TableCell>""</TableCell>
                    <TableCell attr:style="text-align: right;"><strong>{format_money(total)}</strong></TableCell>
                </TableRow>
            </TableBody>
        </Table>
    }
}

#[component]
fn VoucherList(
    comprobantes: Vec<Comprobante>,
    can_manage: Signal<bool>,
    /// `(comprobante, approve)`
    on_action: Callback<(EntityId, bool)>,
) -> impl IntoView {
    if comprobantes.is_empty() {
        return view! { <div class="hint">"Aún no hay comprobantes."</div> }.into_any();
    }
    view! {
        <ul class="voucher-list">
            {comprobantes
                .into_iter()
                .map(|c| {
                    let id = c.id;
                    let pending = c.estado == EstadoComprobante::Pendiente;
                    view! {
                        <li class="voucher-list__item">
                            {match c.archivo.clone().filter(|a| !a.is_empty()) {
                                Some(href) => view! {
                                    <a href=href target="_blank" rel="noopener">{icon("file-text")} " Ver"</a>
                                }.into_any(),
                                None => view! { <span>"Sin archivo"</span> }.into_any(),
                            }}
                            <span class="voucher-list__amount">{format_money(c.monto)}</span>
                            <span>{format_opt_datetime(c.fecha.as_ref())}</span>
                            <StatusBadge value=c.estado color=comprobante_color />
                            {c.observacion.clone().map(|o| view! { <span class="hint">{o}</span> })}
                            <Show when=move || pending && can_manage.get()>
                                <Button size=ButtonSize::Small on_click=move |_| on_action.run((id, true))>
                                    {icon("check")} " Aprobar"
                                </Button>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| on_action.run((id, false))
                                >
                                    {icon("x")} " Anular"
                                </Button>
                            </Show>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

#[component]
fn VoucherUpload(id: EntityId, on_uploaded: Callback<Venta>) -> impl IntoView {
    let notices = use_notices();
    let monto = RwSignal::new(String::new());
    let file = StoredValue::new_local(None::<File>);
    let file_name = RwSignal::new(String::new());
    let uploading = RwSignal::new(false);

    let on_file = move |ev: leptos::ev::Event| {
        let picked = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        file_name.set(picked.as_ref().map(|f| f.name()).unwrap_or_default());
        file.set_value(picked);
    };

    let submit = move |_| {
        let Some(f) = file.get_value() else {
            notices.error("Seleccione el archivo del comprobante");
            return;
        };
        let amount = parse_amount(&monto.get_untracked()).unwrap_or(0.0);
        uploading.set(true);
        spawn_local(async move {
            match api::subir_comprobante(id, &f, amount).await {
                Ok(v) => {
                    notices.success("Comprobante enviado");
                    monto.set(String::new());
                    file_name.set(String::new());
                    file.set_value(None);
                    on_uploaded.run(v);
                }
                Err(e) => notices.api_error(&e),
            }
            uploading.set(false);
        });
    };

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin-top: 12px;">
            <label class="upload-button">
                {icon("upload")}
                {move || {
                    let n = file_name.get();
                    if n.is_empty() { " Elegir archivo".to_string() } else { format!(" {}", n) }
                }}
                <input type="file" accept="image/*,application/pdf" style="display: none;" on:change=on_file />
            </label>
            <Input value=monto placeholder="Monto" attr:style="width: 120px;" />
            <Button
                appearance=ButtonAppearance::Primary
                size=ButtonSize::Small
                on_click=submit
                disabled=uploading
            >
                "Subir comprobante"
            </Button>
        </Flex>
    }
}
