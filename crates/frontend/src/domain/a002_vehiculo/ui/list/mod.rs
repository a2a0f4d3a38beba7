use crate::domain::a001_marca::api as marcas_api;
use crate::domain::a002_vehiculo::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::sortable_header_cell::SortableHeaderCell;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::paged_list::PagedList;
use contracts::domain::a001_marca::Marca;
use contracts::domain::a002_vehiculo::{Vehiculo, VehiculoDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn opt_text(raw: String) -> Option<String> {
    let raw = raw.trim().to_string();
    (!raw.is_empty()).then_some(raw)
}

fn opt_year(raw: &str) -> Result<Option<i32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| format!("Año inválido: {}", raw))
}

#[component]
fn VehiculoForm(on_created: Callback<()>) -> impl IntoView {
    let notices = use_notices();
    let marcas = RwSignal::new(Vec::<Marca>::new());
    let marca = RwSignal::new(String::new());
    let modelo = RwSignal::new(String::new());
    let cilindrada = RwSignal::new(String::new());
    let cilindros = RwSignal::new(String::new());
    let motor = RwSignal::new(String::new());
    let desde = RwSignal::new(String::new());
    let hasta = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        if let Ok(list) = marcas_api::list_marcas().await {
            marcas.set(list);
        }
    });

    let build = move || -> Result<VehiculoDto, String> {
        let dto = VehiculoDto {
            marca: marca.get_untracked().parse().ok(),
            modelo: modelo.get_untracked().trim().to_string(),
            cilindrada: opt_text(cilindrada.get_untracked()),
            cilindros: match opt_text(cilindros.get_untracked()) {
                Some(c) => Some(c.parse().map_err(|_| "Cilindros debe ser un número".to_string())?),
                None => None,
            },
            motor: opt_text(motor.get_untracked()),
            anio_desde: opt_year(&desde.get_untracked())?,
            anio_hasta: opt_year(&hasta.get_untracked())?,
        };
        dto.validate()?;
        Ok(dto)
    };

    let submit = move |_| {
        let dto = match build() {
            Ok(dto) => dto,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        error.set(None);
        spawn_local(async move {
            match api::create_vehiculo(&dto).await {
                Ok(v) => {
                    notices.success(format!("Vehículo {} creado", v.display_name()));
                    for field in [modelo, cilindrada, cilindros, motor, desde, hasta] {
                        field.set(String::new());
                    }
                    on_created.run(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <Card>
            <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Marca"</Label>
                    <Select value=marca size=SelectSize::Small>
                        <option value="">"Seleccione"</option>
                        <For
                            each=move || marcas.get()
                            key=|m| m.id
                            children=|m: Marca| view! { <option value=m.id.to_string()>{m.nombre}</option> }
                        />
                    </Select>
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Modelo"</Label>
                    <Input value=modelo />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Cilindrada"</Label>
                    <Input value=cilindrada placeholder="1.6" attr:style="width: 80px;" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Cilindros"</Label>
                    <Input value=cilindros attr:style="width: 70px;" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Motor"</Label>
                    <Input value=motor placeholder="4G18" />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Años"</Label>
                    <Flex gap=FlexGap::Small>
                        <Input value=desde placeholder="desde" attr:style="width: 80px;" />
                        <Input value=hasta placeholder="hasta" attr:style="width: 80px;" />
                    </Flex>
                </Flex>
                <Button appearance=ButtonAppearance::Primary on_click=submit>
                    {icon("plus")} " Agregar"
                </Button>
            </Flex>
            <ErrorBox error=error />
        </Card>
    }
}

#[component]
pub fn VehiculoList() -> impl IntoView {
    let list = PagedList::<Vehiculo>::new(api::ENDPOINT, 24);
    let current_sort = Signal::derive(move || list.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |key: &'static str| list.toggle_sort(key));

    view! {
        <div class="page">
            <PageHeader title="Vehículos" icon_name="car">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")} " Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <VehiculoForm on_created=Callback::new(move |_| list.reload()) />

                <Flex gap=FlexGap::Small align=FlexAlign::Center attr:style="margin: 12px 0;">
                    <SearchInput
                        value=Signal::derive(move || list.param("search"))
                        on_change=Callback::new(move |v: String| list.set_param("search", &v))
                        placeholder="Marca, modelo o motor"
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
                            <SortableHeaderCell label="Marca" sort_key="marca__nombre" current=current_sort on_sort=on_sort />
                            <SortableHeaderCell label="Modelo" sort_key="modelo" current=current_sort on_sort=on_sort min_width=160.0 />
                            <TableHeaderCell min_width=80.0>"Cilindrada"</TableHeaderCell>
                            <TableHeaderCell min_width=70.0>"Cil."</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Motor"</TableHeaderCell>
                            <SortableHeaderCell label="Años" sort_key="anio_desde" current=current_sort on_sort=on_sort />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|v| v.id
                            children=|v: Vehiculo| {
                                let anios = match (v.anio_desde, v.anio_hasta) {
                                    (Some(a), Some(b)) => format!("{}-{}", a, b),
                                    (Some(a), None) => format!("{}+", a),
                                    (None, Some(b)) => format!("hasta {}", b),
                                    (None, None) => "-".to_string(),
                                };
                                view! {
                                    <TableRow>
                                        <TableCell>{v.marca_nombre.unwrap_or_default()}</TableCell>
                                        <TableCell>{v.modelo}</TableCell>
                                        <TableCell>{v.cilindrada.unwrap_or_default()}</TableCell>
                                        <TableCell>{v.cilindros.map(|c| c.to_string()).unwrap_or_default()}</TableCell>
                                        <TableCell>{v.motor.unwrap_or_default()}</TableCell>
                                        <TableCell>{anios}</TableCell>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_parsing() {
        assert_eq!(opt_year(" ").unwrap(), None);
        assert_eq!(opt_year("2005").unwrap(), Some(2005));
        assert!(opt_year("dos mil").is_err());
    }

    #[test]
    fn test_opt_text_trims() {
        assert_eq!(opt_text("  4G18 ".into()), Some("4G18".into()));
        assert_eq!(opt_text("   ".into()), None);
    }
}
