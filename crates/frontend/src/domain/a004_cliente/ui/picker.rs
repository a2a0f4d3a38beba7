use crate::domain::a004_cliente::api;
use crate::shared::picker_aggregate::{
    AggregatePickerResult, AggregateSearchPicker, SearchFuture, Searchable, TableDisplayable,
};
use contracts::domain::a004_cliente::Cliente;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

impl AggregatePickerResult for Cliente {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        self.nombre.clone()
    }
}

impl TableDisplayable for Cliente {
    fn code(&self) -> String {
        self.rut.clone().unwrap_or_default()
    }

    fn description(&self) -> String {
        self.nombre.clone()
    }
}

impl Searchable for Cliente {
    fn search(text: String) -> SearchFuture<Self> {
        Box::pin(async move { api::search_clientes(&text).await })
    }
}

#[component]
pub fn ClientePicker(
    on_select: Callback<Cliente>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <AggregateSearchPicker<Cliente>
            title="Cliente"
            placeholder="Nombre, RUT o correo"
            on_confirm=on_select
            on_cancel=on_cancel
        />
    }
}
