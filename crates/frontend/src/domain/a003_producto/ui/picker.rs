use crate::domain::a003_producto::api;
use crate::shared::picker_aggregate::{
    AggregatePickerResult, AggregateSearchPicker, SearchFuture, Searchable, TableDisplayable,
};
use contracts::domain::a003_producto::Producto;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

impl AggregatePickerResult for Producto {
    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} · {}", self.codigo, self.descripcion)
    }
}

impl TableDisplayable for Producto {
    fn code(&self) -> String {
        self.codigo.clone()
    }

    fn description(&self) -> String {
        match self.marca_nombre.as_deref() {
            Some(marca) if !marca.is_empty() => format!("{} ({})", self.descripcion, marca),
            _ => self.descripcion.clone(),
        }
    }
}

impl Searchable for Producto {
    fn search(text: String) -> SearchFuture<Self> {
        Box::pin(async move { api::search_productos(&text).await })
    }
}

#[component]
pub fn ProductoPicker(
    on_select: Callback<Producto>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <AggregateSearchPicker<Producto>
            title="Producto"
            placeholder="Código, descripción o N° de parte"
            on_confirm=on_select
            on_cancel=on_cancel
        />
    }
}
