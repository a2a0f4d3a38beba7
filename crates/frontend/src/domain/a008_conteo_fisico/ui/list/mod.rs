use crate::domain::a003_producto::ui::picker::ProductoPicker;
use crate::domain::a008_conteo_fisico::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::StatusBadge;
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::paged_list::PagedList;
use contracts::domain::a003_producto::Producto;
use contracts::domain::a008_conteo_fisico::{ConteoFisico, ConteoFisicoDto, EstadoConteo};
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn estado_color(e: &EstadoConteo) -> BadgeColor {
    match e {
        EstadoConteo::Borrador => BadgeColor::Informative,
        EstadoConteo::Aplicado => BadgeColor::Success,
    }
}

fn diferencia_class(d: i64) -> &'static str {
    match d {
        0 => "diff diff--zero",
        d if d > 0 => "diff diff--surplus",
        _ => "diff diff--shortage",
    }
}

fn format_diferencia(d: i64) -> String {
    if d > 0 {
        format!("+{}", d)
    } else {
        d.to_string()
    }
}

fn parse_count(raw: &str) -> Result<i64, String> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| "La cantidad contada debe ser un número entero".to_string())?;
    if n < 0 {
        return Err("La cantidad contada no puede ser negativa".into());
    }
    Ok(n)
}

#[component]
fn ConteoForm(on_created: Callback<ConteoFisico>) -> impl IntoView {
    let producto = RwSignal::new(None::<Producto>);
    let cantidad = RwSignal::new(String::new());
    let notas = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |_| {
        let cantidad_contada = match parse_count(&cantidad.get_untracked()) {
            Ok(n) => n,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        let notas = notas.get_untracked();
        let dto = ConteoFisicoDto {
            producto: producto.with_untracked(|p| p.as_ref().map(|p| p.id)),
            cantidad_contada,
            notas: (!notas.trim().is_empty()).then(|| notas.trim().to_string()),
        };
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::crear_conteo(&dto).await {
                Ok(c) => {
                    producto.set(None);
                    cantidad.set(String::new());
                    on_created.run(c);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    view! {
        <Card>
            <Flex vertical=true gap=FlexGap::Medium>
                {move || match producto.get() {
                    None => view! {
                        <ProductoPicker on_select=Callback::new(move |p: Producto| producto.set(Some(p))) />
                    }
                    .into_any(),
                    Some(p) => view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <strong>{p.codigo.clone()}</strong>
                            <span>{p.descripcion.clone()}</span>
                            <Badge appearance=BadgeAppearance::Outline>
                                {format!("Stock en sistema: {}", p.stock)}
                            </Badge>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| producto.set(None)
                            >
                                "Cambiar"
                            </Button>
                        </Flex>
                    }
                    .into_any(),
                }}
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Cantidad contada"</Label>
                        <Input value=cantidad input_type=InputType::Number />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small attr:style="flex: 1;">
                        <Label>"Notas"</Label>
                        <Input value=notas placeholder="Ubicación, observaciones…" />
                    </Flex>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || saving.get() || producto.with(|p| p.is_none()))
                    >
                        "Guardar conteo"
                    </Button>
                </Flex>
                <ErrorBox error=error />
            </Flex>
        </Card>
    }
}

#[component]
pub fn ConteoFisicoList() -> impl IntoView {
    let notices = use_notices();
    let list = PagedList::<ConteoFisico>::new(api::ENDPOINT, 24);
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));

    let estado = RwSignal::new(String::new());
    Effect::new(move |prev: Option<()>| {
        let v = estado.get();
        if prev.is_some() {
            list.set_param("estado", &v);
        }
    });

    let show_form = RwSignal::new(false);
    let applying = RwSignal::new(None::<EntityId>);

    let apply = move |id: EntityId| {
        if applying.get_untracked().is_some() {
            return;
        }
        applying.set(Some(id));
        spawn_local(async move {
            match api::aplicar(id).await {
                Ok(c) => {
                    notices.success(format!(
                        "Stock ajustado a {} unidades",
                        c.cantidad_contada
                    ));
                    let id = c.id;
                    list.replace_where(move |x| x.id == id, c);
                }
                Err(e) => notices.api_error(&e),
            }
            applying.set(None);
        });
    };

    let on_created = Callback::new(move |_: ConteoFisico| {
        notices.success("Conteo registrado");
        show_form.set(false);
        list.reload();
    });

    view! {
        <div class="page">
            <PageHeader title="Conteos físicos" icon_name="clipboard">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_form.update(|s| *s = !*s)>
                    {icon("plus")} " Nuevo conteo"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                    {icon("refresh")}
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show when=move || show_form.get()>
                    <ConteoForm on_created=on_created />
                </Show>

                <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin: 12px 0;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Estado"</Label>
                        <Select value=estado size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {EstadoConteo::all()
                                .iter()
                                .map(|e| view! { <option value=e.code()>{e.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <PaginationControls
                        meta=list.meta
                        on_page_change=Callback::new(move |p: u32| list.go_to_page(p))
                        disabled=Signal::derive(move || list.loading.get())
                    />
                </Flex>

                <ErrorBox error=list.error />

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=130.0>"Fecha"</TableHeaderCell>
                            <TableHeaderCell>"Producto"</TableHeaderCell>
                            <TableHeaderCell>"Sistema"</TableHeaderCell>
                            <TableHeaderCell>"Contado"</TableHeaderCell>
                            <TableHeaderCell>"Diferencia"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Notas"</TableHeaderCell>
                            <TableHeaderCell>"Estado"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|c| (c.id, c.estado)
                            children=move |c: ConteoFisico| {
                                let id = c.id;
                                let draft = c.estado == EstadoConteo::Borrador;
                                let diff = c.diferencia();
                                view! {
                                    <TableRow>
                                        <TableCell>{format_opt_datetime(c.fecha.as_ref())}</TableCell>
                                        <TableCell>{c.producto_codigo.clone().unwrap_or_else(|| format!("#{}", c.producto))}</TableCell>
                                        <TableCell>{c.cantidad_sistema}</TableCell>
                                        <TableCell>{c.cantidad_contada}</TableCell>
                                        <TableCell>
                                            <span class=diferencia_class(diff)>{format_diferencia(diff)}</span>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{c.notas.clone().unwrap_or_default()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell><StatusBadge value=c.estado color=estado_color /></TableCell>
                                        <TableCell>
                                            <Show when=move || draft>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Primary
                                                    disabled=Signal::derive(move || applying.get().is_some())
                                                    on_click=move |_| apply(id)
                                                >
                                                    "Aplicar"
                                                </Button>
                                            </Show>
                                        </TableCell>
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
    fn test_diferencia_rendering() {
        assert_eq!(format_diferencia(3), "+3");
        assert_eq!(format_diferencia(-2), "-2");
        assert_eq!(format_diferencia(0), "0");
        assert_eq!(diferencia_class(-1), "diff diff--shortage");
        assert_eq!(diferencia_class(0), "diff diff--zero");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(" 12 "), Ok(12));
        assert_eq!(parse_count("0"), Ok(0));
        assert!(parse_count("-1").is_err());
        assert!(parse_count("doce").is_err());
    }
}
