use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;
use std::future::Future;
use std::pin::Pin;

/// Anything a picker can hand back to its caller.
pub trait AggregatePickerResult {
    fn id(&self) -> EntityId;
    fn display_name(&self) -> String;
}

/// Row shape of the picker table.
pub trait TableDisplayable: AggregatePickerResult {
    fn code(&self) -> String;
    fn description(&self) -> String;
}

pub type SearchFuture<T> = Pin<Box<dyn Future<Output = Result<Vec<T>, ApiError>>>>;

/// Server-side lookup used by [`super::AggregateSearchPicker`].
pub trait Searchable: TableDisplayable + Sized {
    fn search(text: String) -> SearchFuture<Self>;
}
