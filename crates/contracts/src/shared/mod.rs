pub mod api_error;
pub mod cart;
pub mod catalog_query;
pub mod pagination;
pub mod serde_utils;
