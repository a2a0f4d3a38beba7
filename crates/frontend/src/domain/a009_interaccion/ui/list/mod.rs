use crate::domain::a004_cliente::ui::picker::ClientePicker;
use crate::domain::a009_interaccion::api;
use crate::layout::notice_service::use_notices;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{format_date, format_opt_datetime, today};
use crate::shared::icons::icon;
use crate::shared::paged_list::PagedList;
use chrono::NaiveDate;
use contracts::domain::a004_cliente::Cliente;
use contracts::domain::a009_interaccion::{Interaccion, InteraccionDto, TipoInteraccion};
use contracts::domain::common::{Choice, EntityId};
use contracts::shared::catalog_query::SortState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// `<input type="date">` value; blank means no follow-up.
fn parse_follow_up(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| "Fecha de seguimiento inválida".to_string())
}

fn is_follow_up_due(i: &Interaccion, today: NaiveDate) -> bool {
    i.fecha_seguimiento.map(|f| f <= today).unwrap_or(false)
}

#[component]
fn InteraccionForm(
    cliente: Option<EntityId>,
    on_created: Callback<Interaccion>,
) -> impl IntoView {
    let picked = RwSignal::new(None::<Cliente>);
    let tipo = RwSignal::new(TipoInteraccion::Llamada.code().to_string());
    let descripcion = RwSignal::new(String::new());
    let seguimiento = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let submit = move |_| {
        let fecha_seguimiento = match parse_follow_up(&seguimiento.get_untracked()) {
            Ok(f) => f,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        let dto = InteraccionDto {
            cliente: cliente.or_else(|| picked.with_untracked(|c| c.as_ref().map(|c| c.id))),
            tipo: TipoInteraccion::from_code(&tipo.get_untracked())
                .unwrap_or(TipoInteraccion::Otro),
            descripcion: descripcion.get_untracked().trim().to_string(),
            fecha_seguimiento,
        };
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::crear_interaccion(&dto).await {
                Ok(i) => {
                    descripcion.set(String::new());
                    seguimiento.set(String::new());
                    on_created.run(i);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    view! {
        <Card>
            <Flex vertical=true gap=FlexGap::Medium>
                {cliente.is_none().then(|| view! {
                    {move || match picked.get() {
                        None => view! {
                            <ClientePicker on_select=Callback::new(move |c: Cliente| picked.set(Some(c))) />
                        }
                        .into_any(),
                        Some(c) => view! {
                            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                {icon("user")}
                                <strong>{c.nombre.clone()}</strong>
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| picked.set(None)
                                >
                                    "Cambiar"
                                </Button>
                            </Flex>
                        }
                        .into_any(),
                    }}
                })}
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Tipo"</Label>
                        <Select value=tipo>
                            {TipoInteraccion::all()
                                .iter()
                                .map(|t| view! { <option value=t.code()>{t.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <div class="form-group">
                        <label>"Seguimiento"</label>
                        <input
                            type="date"
                            min=today().format("%Y-%m-%d").to_string()
                            prop:value=move || seguimiento.get()
                            on:input=move |ev| seguimiento.set(event_target_value(&ev))
                        />
                    </div>
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Descripción"</Label>
                    <Textarea value=descripcion placeholder="Qué se conversó, qué quedó pendiente" attr:rows=3 />
                </Flex>
                <div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Registrar"
                    </Button>
                </div>
                <ErrorBox error=error />
            </Flex>
        </Card>
    }
}

/// CRM history. With `cliente` set, the list and the form are scoped to that
/// customer.
#[component]
pub fn InteraccionList(#[prop(optional)] cliente: Option<EntityId>) -> impl IntoView {
    let notices = use_notices();
    let list = PagedList::<Interaccion>::new(api::ENDPOINT, if cliente.is_some() { 10 } else { 24 });
    list.query
        .update(|q| *q = q.with_sort(SortState::from_ordering_param("-fecha")));
    if let Some(id) = cliente {
        list.set_param("cliente", &id.to_string());
    }

    let tipo = RwSignal::new(String::new());
    Effect::new(move |prev: Option<()>| {
        let v = tipo.get();
        if prev.is_some() {
            list.set_param("tipo", &v);
        }
    });

    let show_form = RwSignal::new(false);
    let on_created = Callback::new(move |_: Interaccion| {
        notices.success("Interacción registrada");
        show_form.set(false);
        list.reload();
    });
    let scoped = cliente.is_some();
    let root_class = if scoped { "section" } else { "page" };
    let hoy = today();

    view! {
        <div class=root_class>
            {if scoped {
                view! {
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                        <h3>"Interacciones"</h3>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_form.update(|s| *s = !*s)>
                            {icon("plus")} " Registrar"
                        </Button>
                    </Flex>
                }
                .into_any()
            } else {
                view! {
                    <PageHeader title="Interacciones" icon_name="message-square">
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| show_form.update(|s| *s = !*s)>
                            {icon("plus")} " Nueva interacción"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| list.reload()>
                            {icon("refresh")}
                        </Button>
                    </PageHeader>
                }
                .into_any()
            }}

            <div class="page__content">
                <Show when=move || show_form.get()>
                    <InteraccionForm cliente=cliente on_created=on_created />
                </Show>

                <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="margin: 12px 0;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Tipo"</Label>
                        <Select value=tipo size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {TipoInteraccion::all()
                                .iter()
                                .map(|t| view! { <option value=t.code()>{t.label()}</option> })
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
                            {(!scoped).then(|| view! { <TableHeaderCell min_width=160.0>"Cliente"</TableHeaderCell> })}
                            <TableHeaderCell>"Tipo"</TableHeaderCell>
                            <TableHeaderCell min_width=240.0>"Descripción"</TableHeaderCell>
                            <TableHeaderCell>"Seguimiento"</TableHeaderCell>
                            <TableHeaderCell>"Usuario"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || list.items.get()
                            key=|i| i.id
                            children=move |i: Interaccion| {
                                let due = is_follow_up_due(&i, hoy);
                                view! {
                                    <TableRow>
                                        <TableCell>{format_opt_datetime(i.fecha.as_ref())}</TableCell>
                                        {(!scoped).then(|| view! {
                                            <TableCell>{i.cliente_nombre.clone().unwrap_or_else(|| format!("#{}", i.cliente))}</TableCell>
                                        })}
                                        <TableCell>{i.tipo.label()}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{i.descripcion.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <span class=if due { "follow-up follow-up--due" } else { "follow-up" }>
                                                {i.fecha_seguimiento.as_ref().map(format_date).unwrap_or_default()}
                                            </span>
                                        </TableCell>
                                        <TableCell>{i.usuario_nombre.clone().unwrap_or_default()}</TableCell>
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
    use serde_json::json;

    #[test]
    fn test_parse_follow_up() {
        assert_eq!(parse_follow_up("  "), Ok(None));
        assert_eq!(
            parse_follow_up("2024-06-11"),
            Ok(NaiveDate::from_ymd_opt(2024, 6, 11))
        );
        assert!(parse_follow_up("11/06/2024").is_err());
    }

    #[test]
    fn test_follow_up_due() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut i: Interaccion = serde_json::from_value(json!({
            "id": 1,
            "cliente": 4,
            "tipo": "VISITA",
            "descripcion": "Entrega de muestras",
            "fecha_seguimiento": "2024-06-10"
        }))
        .unwrap();
        assert!(is_follow_up_due(&i, today));
        i.fecha_seguimiento = NaiveDate::from_ymd_opt(2024, 6, 12);
        assert!(!is_follow_up_due(&i, today));
        i.fecha_seguimiento = None;
        assert!(!is_follow_up_due(&i, today));
    }
}
