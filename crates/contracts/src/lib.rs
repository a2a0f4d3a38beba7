//! Shared contracts between the storefront frontend and the valve inventory REST API.
//!
//! Everything in this crate is plain Rust with no browser dependencies, so the
//! deterministic parts of the client (query building, pagination, cart rules,
//! error flattening) are testable on the host.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
