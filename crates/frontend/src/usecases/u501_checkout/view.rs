use crate::domain::a004_cliente::ui::picker::ClientePicker;
use crate::domain::a005_venta::api as ventas_api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::cart_context::use_cart;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use crate::system::auth::context::use_auth;
use contracts::domain::a004_cliente::Cliente;
use contracts::shared::cart::CartLine;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Hint shown when the snapshot stock cannot cover the line. The server has
/// the final word.
fn stock_warning(line: &CartLine) -> Option<String> {
    let stock = line.producto.stock.max(0) as u64;
    if (line.cantidad as u64) > stock {
        Some(format!("Stock disponible: {}", stock))
    } else {
        None
    }
}

#[component]
fn CheckoutLine(line: CartLine) -> impl IntoView {
    let cart = use_cart();
    let id = line.producto.id;
    let sets = move || {
        cart.cart
            .with(|c| c.line(id).map(|l| c.sets_of(l)))
            .unwrap_or(0)
    };
    let warning = stock_warning(&line);
    let foto = line.producto.foto.clone();
    let codigo = line.producto.codigo.clone();
    let descripcion = line.producto.descripcion.clone();
    let precio = format_money(line.producto.precio_venta);
    let unidades = line.cantidad;
    let subtotal = format_money(line.subtotal());

    view! {
        <TableRow>
            <TableCell>
                {match foto {
                    Some(src) => view! { <img class="checkout__thumb" src=src alt="" /> }.into_any(),
                    None => view! { <span class="checkout__thumb checkout__thumb--empty">{icon("image-off")}</span> }.into_any(),
                }}
            </TableCell>
            <TableCell>
                <div class="checkout__code">{codigo}</div>
                <div class="checkout__desc">{descripcion}</div>
                {warning.map(|w| view! { <div class="checkout__warning">{w}</div> })}
            </TableCell>
            <TableCell attr:style="text-align: right;">{precio}</TableCell>
            <TableCell>
                <div class="add-to-cart">
                    <button
                        class="add-to-cart__step"
                        title="Quitar un juego"
                        on:click=move |_| cart.set_sets(id, sets().saturating_sub(1))
                    >
                        {icon("minus")}
                    </button>
                    <span class="add-to-cart__sets">{move || format!("{} juego(s)", sets())}</span>
                    <button
                        class="add-to-cart__step"
                        title="Agregar un juego"
                        on:click=move |_| cart.set_sets(id, sets() + 1)
                    >
                        {icon("plus")}
                    </button>
                </div>
            </TableCell>
            <TableCell>{unidades}</TableCell>
            <TableCell attr:style="text-align: right;">{subtotal}</TableCell>
            <TableCell>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| cart.remove(id)
                >
                    {icon("trash")}
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[component]
fn ActingCustomer() -> impl IntoView {
    let cart = use_cart();
    let picking = RwSignal::new(false);

    view! {
        <Card>
            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Vender a nombre de"</Label>
                {move || match cart.acting_customer.get() {
                    Some(c) => view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            {icon("user")}
                            <strong>{c.nombre.clone()}</strong>
                            <span>{c.rut.clone().unwrap_or_default()}</span>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| cart.clear_acting_customer()
                            >
                                "Quitar"
                            </Button>
                        </Flex>
                    }
                    .into_any(),
                    None if picking.get() => view! {
                        <ClientePicker
                            on_select=Callback::new(move |c: Cliente| {
                                cart.select_acting_customer(c);
                                picking.set(false);
                            })
                            on_cancel=Callback::new(move |_| picking.set(false))
                        />
                    }
                    .into_any(),
                    None => view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <span class="form-hint">"Venta sin cliente asignado"</span>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| picking.set(true)
                            >
                                {icon("search")} " Elegir cliente"
                            </Button>
                        </Flex>
                    }
                    .into_any(),
                }}
            </Flex>
        </Card>
    }
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let cart = use_cart();
    let notices = use_notices();
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();
    let is_staff = Signal::derive(move || auth_state.with(|s| s.is_staff()));

    let observaciones = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let is_empty = move || cart.cart.with(|c| c.is_empty());

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let cliente = if is_staff.get_untracked() {
            cart.acting_customer.with_untracked(|c| c.as_ref().map(|c| c.id))
        } else {
            None
        };
        let request = cart
            .cart
            .with_untracked(|c| c.checkout_request(cliente, Some(observaciones.get_untracked())));
        let request = match request {
            Ok(r) => r,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };

        submitting.set(true);
        error.set(None);
        spawn_local(async move {
            match ventas_api::crear_venta(&request).await {
                Ok(venta) => {
                    log::info!("order {} created with {} line(s)", venta.id, request.items.len());
                    cart.clear();
                    cart.clear_acting_customer();
                    observaciones.set(String::new());
                    notices.success(format!("Pedido {} creado", venta.display_number()));
                    tabs_store.open_tab(
                        &detail_key("a005_venta", venta.id),
                        &detail_tab_label("Venta", &venta.display_number()),
                    );
                }
                Err(e) => {
                    log::warn!("checkout failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Carrito" icon_name="cart">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| tabs_store.open_tab("a003_producto_valvulas", tab_label_for_key("a003_producto_valvulas"))
                >
                    {icon("chevron-left")} " Seguir comprando"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show
                    when=move || !is_empty()
                    fallback=|| view! {
                        <div class="placeholder">
                            {icon("cart")}
                            <p>"El carrito está vacío"</p>
                        </div>
                    }
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=64.0>""</TableHeaderCell>
                                <TableHeaderCell min_width=220.0>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Precio unitario"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Juegos"</TableHeaderCell>
                                <TableHeaderCell>"Unidades"</TableHeaderCell>
                                <TableHeaderCell>"Subtotal"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || cart.cart.with(|c| c.lines().to_vec())
                                key=|l| (l.producto.id, l.cantidad)
                                children=move |line: CartLine| view! { <CheckoutLine line=line /> }
                            />
                        </TableBody>
                    </Table>

                    <div class="checkout__totals">
                        <span>{move || cart.cart.with(|c| format!("{} juego(s) · {} unidades", c.total_sets(), c.total_units()))}</span>
                        <strong>{move || cart.cart.with(|c| format!("Total: {}", format_money(c.total())))}</strong>
                    </div>

                    <Flex vertical=true gap=FlexGap::Medium attr:style="max-width: 560px;">
                        <Show when=move || is_staff.get()>
                            <ActingCustomer />
                        </Show>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Observaciones"</Label>
                            <Textarea value=observaciones placeholder="Retiro en tienda, despacho, etc." attr:rows=2 />
                        </Flex>
                        <ErrorBox error=error />
                        <div>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=submit
                                disabled=Signal::derive(move || submitting.get())
                            >
                                {move || if submitting.get() { "Enviando…" } else { "Confirmar pedido" }}
                            </Button>
                        </div>
                    </Flex>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::cart::ProductoSnapshot;

    fn line(cantidad: u32, stock: i64) -> CartLine {
        CartLine {
            producto: ProductoSnapshot {
                id: 1,
                codigo: "VAL-0001".into(),
                descripcion: String::new(),
                precio_venta: 1000.0,
                foto: None,
                stock,
            },
            cantidad,
        }
    }

    #[test]
    fn test_stock_warning() {
        assert_eq!(stock_warning(&line(8, 8)), None);
        assert_eq!(stock_warning(&line(16, 8)), Some("Stock disponible: 8".to_string()));
        assert_eq!(stock_warning(&line(8, -3)), Some("Stock disponible: 0".to_string()));
    }
}
