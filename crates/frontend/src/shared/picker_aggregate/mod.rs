//! Pickers for choosing a record by search.
//!
//! Implement [`TableDisplayable`] and [`Searchable`] for a record type, then
//! drop an [`AggregateSearchPicker`] into a form:
//!
//! ```ignore
//! view! {
//!     <AggregateSearchPicker<Producto>
//!         title="Producto"
//!         on_confirm=Callback::new(move |p: Producto| selected.set(Some(p)))
//!     />
//! }
//! ```

pub mod component;
pub mod traits;

pub use component::{AggregateSearchPicker, GenericAggregatePicker};
pub use traits::{AggregatePickerResult, Searchable, SearchFuture, TableDisplayable};
