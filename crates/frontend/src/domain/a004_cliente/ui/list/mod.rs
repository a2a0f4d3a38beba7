use crate::domain::a004_cliente::api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header_cell::SortableHeaderCell;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::number_format::format_money;
use crate::shared::paged_list::PagedList;
use contracts::domain::a004_cliente::Cliente;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ClienteList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let list = PagedList::<Cliente>::new(api::ENDPOINT, 24);
    let current_sort = Signal::derive(move || list.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |key: &'static str| list.toggle_sort(key));

    let open = move |c: &Cliente| {
        tabs_store.open_tab(
            &detail_key("a004_cliente", c.id),
            &detail_tab_label("Cliente", &c.nombre),
        );
    };

    view! {
        <div class="page">
            <PageHeader title="Clientes" icon_name="users">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| tabs_store.open_tab("a004_cliente_new", tab_label_for_key("a004_cliente_new"))
                >
                    {icon("plus")} " Nuevo cliente"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small align=FlexAlign::Center attr:style="margin-bottom: 12px;">
                    <SearchInput
                        value=Signal::derive(move || list.param("search"))
                        on_change=Callback::new(move |v: String| list.set_param("search", &v))
                        placeholder="Nombre, RUT o correo"
                    />
                    <PaginationControls
                        meta=list.meta
                        on_page_change=Callback::new(move |p: u32| list.go_to_page(p))
                        on_page_size_change=Callback::new(move |s: u32| list.set_page_size(s))
                        page_size=Signal::derive(move || list.query.with(|q| q.page_size))
                        disabled=Signal::derive(move || list.loading.get())
                    />
                </Flex>

                <ErrorBox error=list.error />

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Nombre" sort_key="nombre" current=current_sort on_sort=on_sort min_width=200.0 />
                            <SortableHeaderCell label="RUT" sort_key="rut" current=current_sort on_sort=on_sort />
                            <TableHeaderCell min_width=180.0>"Correo"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Teléfono"</TableHeaderCell>
                            <SortableHeaderCell label="Crédito" sort_key="limite_credito" current=current_sort on_sort=on_sort align_right=true />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|c| c.id
                            children=move |c: Cliente| {
                                let row = c.clone();
                                view! {
                                    <TableRow attr:class="table__row--clickable" on:click=move |_| open(&row)>
                                        <TableCell>{c.nombre}</TableCell>
                                        <TableCell>{c.rut.unwrap_or_default()}</TableCell>
                                        <TableCell>{c.email.unwrap_or_default()}</TableCell>
                                        <TableCell>{c.telefono.unwrap_or_default()}</TableCell>
                                        <TableCell attr:style="text-align: right;">{format_money(c.limite_credito)}</TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
