//! Catalog results: sortable table for the back office, cards for the store.

use super::controller::CatalogController;
use crate::shared::cart_context::use_cart;
use crate::shared::components::sortable_header_cell::SortableHeaderCell;
use crate::shared::number_format::{format_money, format_number_int};
use contracts::domain::a003_producto::Producto;
use contracts::domain::common::{Choice, EntityId};
use leptos::prelude::*;
use thaw::*;

/// Sets selector plus "add to cart". The count resets after adding.
#[component]
fn AddToCart(producto: Producto) -> impl IntoView {
    let cart = use_cart();
    let sets = RwSignal::new(1u32);
    let producto = StoredValue::new(producto);
    let set_size = move || cart.cart.with(|c| c.set_size());
    let in_cart = move || {
        let id = producto.with_value(|p| p.id);
        cart.cart
            .with(|c| c.line(id).map(|l| c.sets_of(l)))
            .unwrap_or(0)
    };

    view! {
        <div class="add-to-cart">
            <button
                class="add-to-cart__step"
                on:click=move |_| sets.update(|s| *s = s.saturating_sub(1).max(1))
            >"−"</button>
            <span class="add-to-cart__sets" title=move || format!("{} unidades", sets.get() * set_size())>
                {move || format!("{} juego(s)", sets.get())}
            </span>
            <button class="add-to-cart__step" on:click=move |_| sets.update(|s| *s += 1)>"+"</button>
            <Button
                appearance=ButtonAppearance::Primary
                size=ButtonSize::Small
                on_click=move |_| {
                    producto.with_value(|p| cart.add(p, sets.get_untracked()));
                    sets.set(1);
                }
            >
                "Agregar"
            </Button>
            <Show when=move || { in_cart() > 0 }>
                <span class="add-to-cart__in-cart">{move || format!("En carrito: {}", in_cart())}</span>
            </Show>
        </div>
    }
}

fn stock_class(p: &Producto) -> &'static str {
    if p.stock <= 0 {
        "stock stock--out"
    } else if p.is_low_stock() {
        "stock stock--low"
    } else {
        "stock"
    }
}

#[component]
pub fn ProductTable(
    controller: CatalogController,
    #[prop(into)] is_staff: Signal<bool>,
    on_edit: Callback<EntityId>,
) -> impl IntoView {
    let current_sort = Signal::derive(move || controller.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |key: &'static str| controller.sort(key));

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=60.0>"Foto"</TableHeaderCell>
                        <SortableHeaderCell label="Código" sort_key="codigo" current=current_sort on_sort=on_sort min_width=120.0 />
                        <SortableHeaderCell label="Descripción" sort_key="descripcion" current=current_sort on_sort=on_sort min_width=220.0 />
                        <SortableHeaderCell label="Marca" sort_key="marca__nombre" current=current_sort on_sort=on_sort />
                        <TableHeaderCell min_width=90.0>"Tipo"</TableHeaderCell>
                        <SortableHeaderCell label="Stock" sort_key="stock" current=current_sort on_sort=on_sort min_width=70.0 align_right=true />
                        <SortableHeaderCell label="Precio" sort_key="precio_venta" current=current_sort on_sort=on_sort align_right=true />
                        <TableHeaderCell min_width=220.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || controller.items.get()
                        key=|p| (p.id, p.stock, p.precio_venta.to_bits())
                        children=move |p: Producto| {
                            let id = p.id;
                            let foto = p.foto_principal().map(str::to_string);
                            let tipo = p.spec_text("tipo");
                            let tipo = if tipo.is_empty() { p.tipo_producto.label().to_string() } else { tipo };
                            let class = stock_class(&p);
                            let codigo = p.codigo.clone();
                            let descripcion = p.descripcion.clone();
                            let marca = p.marca_nombre.clone().unwrap_or_default();
                            let stock = format_number_int(p.stock as f64);
                            let precio = format_money(p.precio_venta);
                            view! {
                                <TableRow>
                                    <TableCell>
                                        {match foto {
                                            Some(src) => view! { <img class="thumb" src=src alt="" /> }.into_any(),
                                            None => view! { <span class="thumb thumb--missing">"sin foto"</span> }.into_any(),
                                        }}
                                    </TableCell>
                                    <TableCell><TableCellLayout>{codigo}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{descripcion}</TableCellLayout></TableCell>
                                    <TableCell>{marca}</TableCell>
                                    <TableCell>{tipo}</TableCell>
                                    <TableCell attr:style="text-align: right;">
                                        <span class=class>{stock}</span>
                                    </TableCell>
                                    <TableCell attr:style="text-align: right;">{precio}</TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                            <AddToCart producto=p />
                                            <Show when=move || is_staff.get()>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    size=ButtonSize::Small
                                                    on_click=move |_| on_edit.run(id)
                                                >
                                                    "Editar"
                                                </Button>
                                            </Show>
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </div>
    }
}

#[component]
pub fn ProductCards(
    controller: CatalogController,
    #[prop(into)] is_staff: Signal<bool>,
    on_edit: Callback<EntityId>,
) -> impl IntoView {
    view! {
        <div class="product-grid">
            <For
                each=move || controller.items.get()
                key=|p| (p.id, p.stock, p.precio_venta.to_bits())
                children=move |p: Producto| {
                    let id = p.id;
                    let specs: Vec<String> = ["diametro_cabeza", "diametro_vastago", "largo_total"]
                        .iter()
                        .filter_map(|k| {
                            let v = p.spec_text(k);
                            (!v.is_empty()).then(|| format!("{} mm", v))
                        })
                        .collect();
                    let class = stock_class(&p);
                    view! {
                        <Card class="product-card">
                            <div class="product-card__photo">
                                {match p.foto_principal() {
                                    Some(src) => view! { <img src=src.to_string() alt=p.codigo.clone() /> }.into_any(),
                                    None => view! { <div class="product-card__no-photo">"Sin foto"</div> }.into_any(),
                                }}
                            </div>
                            <div class="product-card__body">
                                <div class="product-card__code">{p.codigo.clone()}</div>
                                <div class="product-card__title">{p.descripcion.clone()}</div>
                                <div class="product-card__brand">{p.marca_nombre.clone().unwrap_or_default()}</div>
                                <div class="product-card__specs">{specs.join(" · ")}</div>
                                <div class="product-card__footer">
                                    <span class="product-card__price">{format_money(p.precio_venta)}</span>
                                    <span class=class>{format!("Stock {}", p.stock)}</span>
                                </div>
                                <AddToCart producto=p.clone() />
                                <Show when=move || is_staff.get()>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        size=ButtonSize::Small
                                        on_click=move |_| on_edit.run(id)
                                    >
                                        "Editar"
                                    </Button>
                                </Show>
                            </div>
                        </Card>
                    }
                }
            />
        </div>
    }
}
