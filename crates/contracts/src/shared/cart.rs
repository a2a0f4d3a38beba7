//! Shopping cart model.
//!
//! Products are sold in sets (juegos) of a fixed number of units. The user
//! picks a number of sets; every line stores units, and the invariant is
//! `cantidad == sets * set_size` with `sets >= 1`. The cart lives only in the
//! browser and is serialized whole on every mutation.

use crate::domain::a003_producto::Producto;
use crate::domain::a005_venta::{CrearVentaItem, CrearVentaRequest};
use crate::domain::common::EntityId;
use serde::{Deserialize, Serialize};

/// Units per set unless configured otherwise.
pub const JUEGO_UNIDADES: u32 = 8;

/// Product snapshot kept in the cart, enough to render and check out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductoSnapshot {
    pub id: EntityId,
    pub codigo: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio_venta: f64,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub stock: i64,
}

impl From<&Producto> for ProductoSnapshot {
    fn from(p: &Producto) -> Self {
        Self {
            id: p.id,
            codigo: p.codigo.clone(),
            descripcion: p.descripcion.clone(),
            precio_venta: p.precio_venta,
            foto: p.foto_principal().map(str::to_string),
            stock: p.stock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub producto: ProductoSnapshot,
    /// Units, always a multiple of the set size.
    pub cantidad: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.producto.precio_venta * self.cantidad as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    set_size: u32,
    lines: Vec<CartLine>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(JUEGO_UNIDADES)
    }
}

impl Cart {
    pub fn new(set_size: u32) -> Self {
        Self {
            set_size: set_size.max(1),
            lines: Vec::new(),
        }
    }

    pub fn set_size(&self) -> u32 {
        self.set_size
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, producto_id: EntityId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.producto.id == producto_id)
    }

    /// Sets for a line, derived from its units.
    pub fn sets_of(&self, line: &CartLine) -> u32 {
        line.cantidad / self.set_size
    }

    /// Add `sets` sets; merges into an existing line for the same product.
    pub fn add(&mut self, producto: ProductoSnapshot, sets: u32) {
        let units = self.units_for_sets(sets);
        let max_units = self.max_units();
        match self.lines.iter_mut().find(|l| l.producto.id == producto.id) {
            Some(line) => {
                line.cantidad = line.cantidad.saturating_add(units).min(max_units);
                // Keep the freshest price/description snapshot.
                line.producto = producto;
            }
            None => self.lines.push(CartLine {
                producto,
                cantidad: units,
            }),
        }
    }

    pub fn remove(&mut self, producto_id: EntityId) {
        self.lines.retain(|l| l.producto.id != producto_id);
    }

    /// Set a line to `sets` sets, clamped to at least one.
    pub fn set_quantity_in_sets(&mut self, producto_id: EntityId, sets: u32) {
        let units = self.units_for_sets(sets);
        self.set_quantity_in_units(producto_id, units);
    }

    /// Units are rounded up to the next whole set, minimum one set.
    pub fn set_quantity_in_units(&mut self, producto_id: EntityId, units: u32) {
        let normalized = self.normalize_units(units);
        if let Some(line) = self.lines.iter_mut().find(|l| l.producto.id == producto_id) {
            line.cantidad = normalized;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total_units(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.cantidad))
    }

    pub fn total_sets(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(self.sets_of(l)))
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Largest quantity that is still a whole number of sets.
    fn max_units(&self) -> u32 {
        (u32::MAX / self.set_size) * self.set_size
    }

    fn units_for_sets(&self, sets: u32) -> u32 {
        sets.max(1)
            .checked_mul(self.set_size)
            .unwrap_or(self.max_units())
    }

    fn normalize_units(&self, units: u32) -> u32 {
        let sets = units.div_ceil(self.set_size).max(1);
        self.units_for_sets(sets)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialized line array, as stored under the `carrito` key.
    pub fn to_storage(&self) -> String {
        serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string())
    }

    /// Rebuild from storage. Anything unparseable yields an empty cart; lines
    /// written with another set size are re-normalized, duplicates merged.
    pub fn from_storage(raw: Option<&str>, set_size: u32) -> Self {
        let mut cart = Cart::new(set_size);
        let Some(raw) = raw else {
            return cart;
        };
        let Ok(lines) = serde_json::from_str::<Vec<CartLine>>(raw) else {
            return cart;
        };
        for line in lines {
            let units = cart.normalize_units(line.cantidad);
            match cart
                .lines
                .iter_mut()
                .find(|l| l.producto.id == line.producto.id)
            {
                Some(existing) => existing.cantidad = existing.cantidad.saturating_add(units),
                None => cart.lines.push(CartLine {
                    producto: line.producto,
                    cantidad: units,
                }),
            }
        }
        cart
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    pub fn checkout_request(
        &self,
        cliente: Option<EntityId>,
        observaciones: Option<String>,
    ) -> Result<CrearVentaRequest, String> {
        if self.lines.is_empty() {
            return Err("El carrito está vacío".into());
        }
        Ok(CrearVentaRequest {
            cliente,
            observaciones: observaciones.filter(|o| !o.trim().is_empty()),
            items: self
                .lines
                .iter()
                .map(|l| CrearVentaItem {
                    producto: l.producto.id,
                    cantidad: l.cantidad,
                    precio_unitario: l.producto.precio_venta,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: EntityId, price: f64) -> ProductoSnapshot {
        ProductoSnapshot {
            id,
            codigo: format!("VAL-{:04}", id),
            descripcion: String::new(),
            precio_venta: price,
            foto: None,
            stock: 100,
        }
    }

    fn assert_invariant(cart: &Cart) {
        for line in cart.lines() {
            assert!(line.cantidad >= cart.set_size());
            assert_eq!(line.cantidad % cart.set_size(), 0);
        }
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new(8);
        cart.add(product(1, 1000.0), 2);
        cart.add(product(1, 1000.0), 1);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].cantidad, 24);
        assert_eq!(cart.total(), 24000.0);
    }

    #[test]
    fn test_zero_sets_means_one() {
        let mut cart = Cart::new(8);
        cart.add(product(1, 10.0), 0);
        assert_eq!(cart.lines()[0].cantidad, 8);
        cart.set_quantity_in_sets(1, 0);
        assert_eq!(cart.lines()[0].cantidad, 8);
        cart.set_quantity_in_sets(1, 5);
        assert_eq!(cart.sets_of(&cart.lines()[0]), 5);
    }

    #[test]
    fn test_units_round_up_to_sets() {
        let mut cart = Cart::new(8);
        cart.add(product(3, 10.0), 1);
        cart.set_quantity_in_units(3, 9);
        assert_eq!(cart.lines()[0].cantidad, 16);
        cart.set_quantity_in_units(3, 0);
        assert_eq!(cart.lines()[0].cantidad, 8);
    }

    #[test]
    fn test_invariant_after_mixed_operations() {
        let mut cart = Cart::new(8);
        let ops: [(EntityId, u32, bool); 8] = [
            (1, 3, true),
            (2, 0, true),
            (1, 0, false),
            (3, 7, true),
            (2, 11, false),
            (1, 1, true),
            (3, 2, false),
            (4, 1, true),
        ];
        for (id, n, is_add) in ops {
            if is_add {
                cart.add(product(id, 5.0), n);
            } else {
                cart.set_quantity_in_sets(id, n);
            }
            assert_invariant(&cart);
        }
        assert_eq!(cart.lines().len(), 4);
    }

    #[test]
    fn test_huge_quantities_stay_whole_sets() {
        let mut cart = Cart::new(8);
        cart.add(product(1, 1.0), u32::MAX / 8);
        cart.add(product(1, 1.0), 1);
        assert_invariant(&cart);
        assert_eq!(cart.lines()[0].cantidad, u32::MAX - 7);

        cart.set_quantity_in_sets(1, u32::MAX);
        assert_invariant(&cart);
        cart.set_quantity_in_units(1, u32::MAX);
        assert_invariant(&cart);

        cart.add(product(2, 1.0), u32::MAX);
        assert_invariant(&cart);
        assert_eq!(cart.total_units(), u32::MAX);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new(8);
        cart.add(product(1, 1.0), 1);
        cart.add(product(2, 1.0), 1);
        cart.remove(1);
        assert!(cart.line(1).is_none());
        assert!(cart.line(2).is_some());
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_storage_round_trip() {
        let mut cart = Cart::new(8);
        cart.add(product(1, 1500.0), 2);
        cart.add(product(9, 990.0), 1);

        let restored = Cart::from_storage(Some(&cart.to_storage()), 8);
        let pairs: Vec<(EntityId, u32)> = restored
            .lines()
            .iter()
            .map(|l| (l.producto.id, l.cantidad))
            .collect();
        assert_eq!(pairs, vec![(1, 16), (9, 8)]);
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_corrupted_storage_yields_empty_cart() {
        assert!(Cart::from_storage(Some("{not json"), 8).is_empty());
        assert!(Cart::from_storage(Some("{\"a\":1}"), 8).is_empty());
        assert!(Cart::from_storage(None, 8).is_empty());
    }

    #[test]
    fn test_storage_with_foreign_quantities_is_normalized() {
        let raw = r#"[
            {"producto": {"id": 1, "codigo": "A", "precio_venta": 10.0}, "cantidad": 5},
            {"producto": {"id": 1, "codigo": "A", "precio_venta": 10.0}, "cantidad": 8},
            {"producto": {"id": 2, "codigo": "B", "precio_venta": 10.0}, "cantidad": 0}
        ]"#;
        let cart = Cart::from_storage(Some(raw), 8);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(1).map(|l| l.cantidad), Some(16));
        assert_eq!(cart.line(2).map(|l| l.cantidad), Some(8));
    }

    #[test]
    fn test_checkout_request() {
        let mut cart = Cart::new(8);
        assert!(cart.checkout_request(None, None).is_err());

        cart.add(product(5, 4590.0), 1);
        let req = cart.checkout_request(Some(12), Some("  ".into())).unwrap();
        assert_eq!(req.cliente, Some(12));
        assert_eq!(req.observaciones, None);
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].cantidad, 8);
        assert_eq!(req.items[0].precio_unitario, 4590.0);
    }
}
