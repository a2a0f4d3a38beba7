//! Product editor.
//!
//! - view_model.rs: form state and commands
//! - view.rs: the editor page and its sub-sections

mod view;
mod view_model;

pub use view::ProductoDetail;
pub use view_model::ProductoDetailVm;
