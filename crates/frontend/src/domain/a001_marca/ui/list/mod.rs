use crate::domain::a001_marca::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use contracts::domain::a001_marca::{Marca, MarcaDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn MarcaList() -> impl IntoView {
    let notices = use_notices();
    let items = RwSignal::new(Vec::<Marca>::new());
    let error = RwSignal::new(None::<String>);
    let nombre = RwSignal::new(String::new());
    let prefijo = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    let fetch = move || {
        spawn_local(async move {
            match api::list_marcas().await {
                Ok(list) => {
                    items.set(list);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    let create = move |_| {
        let dto = MarcaDto {
            nombre: nombre.get_untracked().trim().to_string(),
            prefijo: Some(prefijo.get_untracked().trim().to_uppercase()).filter(|p| !p.is_empty()),
        };
        if let Err(msg) = dto.validate() {
            form_error.set(Some(msg));
            return;
        }
        form_error.set(None);
        spawn_local(async move {
            match api::create_marca(&dto).await {
                Ok(m) => {
                    notices.success(format!("Marca {} creada", m.nombre));
                    nombre.set(String::new());
                    prefijo.set(String::new());
                    fetch();
                }
                Err(e) => form_error.set(Some(e.user_message())),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Marcas" icon_name="tag">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Actualizar"
                </Button>
            </PageHeader>

            <ErrorBox error=error />

            <div class="page__content">
                <Card>
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Nombre"</Label>
                            <Input value=nombre placeholder="TRW, Mahle, ..." />
                        </Flex>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Prefijo de código"</Label>
                            <Input value=prefijo placeholder="TRW" />
                        </Flex>
                        <Button appearance=ButtonAppearance::Primary on_click=create>
                            {icon("plus")} " Agregar"
                        </Button>
                    </Flex>
                    <ErrorBox error=form_error />
                </Card>

                <Table attr:style="width: 100%; margin-top: 12px;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=200.0>"Nombre"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=100.0>"Prefijo"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || items.get()
                            key=|m| m.id
                            children=|m: Marca| view! {
                                <TableRow>
                                    <TableCell>{m.nombre}</TableCell>
                                    <TableCell>{m.prefijo.unwrap_or_else(|| "-".to_string())}</TableCell>
                                </TableRow>
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
