//! Cart shared by the store pages, the header badge and checkout.
//!
//! Every mutation writes the whole cart back to local storage. The acting
//! customer (staff selling on someone's behalf) is kept in memory only.

use super::storage;
use crate::config::config;
use contracts::domain::a003_producto::Producto;
use contracts::domain::a004_cliente::Cliente;
use contracts::domain::common::EntityId;
use contracts::shared::cart::{Cart, ProductoSnapshot};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct CartContext {
    pub cart: RwSignal<Cart>,
    pub acting_customer: RwSignal<Option<Cliente>>,
}

impl CartContext {
    /// Rebuild from storage; a corrupted entry gives an empty cart.
    pub fn restore() -> Self {
        let raw = storage::get_raw(storage::CART_KEY);
        let cart = Cart::from_storage(raw.as_deref(), config().juego_unidades);
        log::debug!("cart restored with {} line(s)", cart.lines().len());
        Self {
            cart: RwSignal::new(cart),
            acting_customer: RwSignal::new(None),
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut Cart)) {
        self.cart.update(f);
        let serialized = self.cart.with_untracked(Cart::to_storage);
        storage::set_raw(storage::CART_KEY, &serialized);
    }

    pub fn add(&self, producto: &Producto, sets: u32) {
        let snapshot = ProductoSnapshot::from(producto);
        self.mutate(|c| c.add(snapshot, sets));
    }

    pub fn remove(&self, producto_id: EntityId) {
        self.mutate(|c| c.remove(producto_id));
    }

    pub fn set_sets(&self, producto_id: EntityId, sets: u32) {
        self.mutate(|c| c.set_quantity_in_sets(producto_id, sets));
    }

    pub fn clear(&self) {
        self.mutate(Cart::clear);
    }

    pub fn select_acting_customer(&self, cliente: Cliente) {
        self.acting_customer.set(Some(cliente));
    }

    pub fn clear_acting_customer(&self) {
        self.acting_customer.set(None);
    }

    /// Number of lines, for the header badge.
    pub fn line_count(&self) -> usize {
        self.cart.with(|c| c.lines().len())
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext not provided in context")
}
