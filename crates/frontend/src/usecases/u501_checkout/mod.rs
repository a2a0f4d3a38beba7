//! Cart review and order placement.

pub mod view;

pub use view::CheckoutPage;
