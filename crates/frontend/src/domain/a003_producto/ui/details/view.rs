use super::view_model::ProductoDetailVm;
use crate::domain::a001_marca::api as marcas_api;
use crate::domain::a002_vehiculo::api as vehiculos_api;
use crate::domain::a003_producto::api;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::icons::icon;
use contracts::domain::a001_marca::Marca;
use contracts::domain::a002_vehiculo::Vehiculo;
use contracts::domain::a003_producto::especificaciones::{schema, SpecField, SpecKind};
use contracts::domain::a003_producto::{Producto, TipoProducto};
use contracts::domain::common::{Choice, EntityId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

fn parse_i64(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_f64(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse().unwrap_or(0.0)
}

#[component]
pub fn ProductoDetail(id: Option<EntityId>, on_close: Callback<()>) -> impl IntoView {
    let vm = ProductoDetailVm::new(use_notices());
    let tabs_store = use_context::<AppGlobalContext>();
    if let Some(id) = id {
        vm.load(id);
    }

    let marcas = RwSignal::new(Vec::<Marca>::new());
    spawn_local(async move {
        if let Ok(list) = marcas_api::list_marcas().await {
            marcas.set(list);
        }
    });

    // Newly created products move to their own record tab.
    let on_saved = Callback::new(move |p: Producto| {
        if id.is_none() {
            if let Some(tabs) = tabs_store {
                tabs.open_tab(
                    &detail_key("a003_producto", p.id),
                    &detail_tab_label("Producto", &p.codigo),
                );
            }
            on_close.run(());
        }
    });
    let confirm_delete = RwSignal::new(false);

    let tipo_value = RwSignal::new(vm.form.get_untracked().tipo_producto.code().to_string());
    Effect::new(move |_| {
        let code = vm.form.with(|f| f.tipo_producto.code());
        if tipo_value.get_untracked() != code {
            tipo_value.set(code.to_string());
        }
    });
    Effect::new(move |_| {
        if let Some(tipo) = TipoProducto::from_code(&tipo_value.get()) {
            if vm.form.with_untracked(|f| f.tipo_producto) != tipo {
                vm.set_tipo(tipo);
            }
        }
    });

    let title = move || {
        if vm.is_edit_mode() {
            format!("Producto {}", vm.form.with(|f| f.codigo.clone()))
        } else {
            "Nuevo producto".to_string()
        }
    };

    view! {
        <div class="page page--detail">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("package")}
                    <h1 class="page__title">{title}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save(on_saved)
                        disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
                    >
                        {move || if vm.saving.get() { "Guardando..." } else { "Guardar" }}
                    </Button>
                    <Show when=move || vm.is_edit_mode()>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| confirm_delete.set(true)
                        >
                            {icon("trash")} " Eliminar"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "Cerrar"
                    </Button>
                </div>
            </div>

            <Show when=move || confirm_delete.get()>
                <MessageBar intent=MessageBarIntent::Warning>
                    <MessageBarBody>
                        "¿Eliminar este producto? Esta acción no se puede deshacer. "
                        <Button
                            size=ButtonSize::Small
                            on_click=move |_| {
                                confirm_delete.set(false);
                                vm.delete(on_close);
                            }
                        >
                            "Eliminar"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| confirm_delete.set(false)
                        >
                            "Cancelar"
                        </Button>
                    </MessageBarBody>
                </MessageBar>
            </Show>

            <ErrorBox error=vm.error />

            <div class="page__content detail-grid">
                <Card>
                    <h3 class="detail-section__title">"Datos generales"</h3>
                    <div class="details-form">
                        <div class="form-group">
                            <label>"Código"</label>
                            <Flex gap=FlexGap::Small>
                                <input
                                    type="text"
                                    prop:value=move || vm.form.with(|f| f.codigo.clone())
                                    on:input=move |ev| vm.form.update(|f| f.codigo = event_target_value(&ev))
                                    placeholder="Se asigna automáticamente si se deja vacío"
                                />
                                <Button size=ButtonSize::Small on_click=move |_| vm.suggest_code()>
                                    "Sugerir"
                                </Button>
                            </Flex>
                        </div>
                        <div class="form-group">
                            <label>"Tipo de producto"</label>
                            <Select value=tipo_value>
                                {TipoProducto::all()
                                    .iter()
                                    .map(|t| view! { <option value=t.code()>{t.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </div>
                        <div class="form-group">
                            <label>"Descripción"</label>
                            <input
                                type="text"
                                prop:value=move || vm.form.with(|f| f.descripcion.clone())
                                on:input=move |ev| vm.form.update(|f| f.descripcion = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>"Marca"</label>
                            <select
                                prop:value=move || vm.form.with(|f| f.marca.map(|m| m.to_string()).unwrap_or_default())
                                on:change=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.form.update(|f| f.marca = v.parse().ok());
                                }
                            >
                                <option value="">"Sin marca"</option>
                                <For
                                    each=move || marcas.get()
                                    key=|m| m.id
                                    children=move |m: Marca| view! {
                                        <option value=m.id.to_string()>{m.nombre}</option>
                                    }
                                />
                            </select>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label>"Stock"</label>
                                <input
                                    type="number"
                                    min="0"
                                    prop:value=move || vm.form.with(|f| f.stock.to_string())
                                    on:input=move |ev| vm.form.update(|f| f.stock = parse_i64(&event_target_value(&ev)))
                                />
                            </div>
                            <div class="form-group">
                                <label>"Stock mínimo"</label>
                                <input
                                    type="number"
                                    min="0"
                                    prop:value=move || vm.form.with(|f| f.stock_minimo.to_string())
                                    on:input=move |ev| vm.form.update(|f| f.stock_minimo = parse_i64(&event_target_value(&ev)))
                                />
                            </div>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label>"Precio costo"</label>
                                <input
                                    type="number"
                                    min="0"
                                    step="any"
                                    prop:value=move || vm.form.with(|f| f.precio_costo.to_string())
                                    on:input=move |ev| vm.form.update(|f| f.precio_costo = parse_f64(&event_target_value(&ev)))
                                />
                            </div>
                            <div class="form-group">
                                <label>"Precio venta"</label>
                                <input
                                    type="number"
                                    min="0"
                                    step="any"
                                    prop:value=move || vm.form.with(|f| f.precio_venta.to_string())
                                    on:input=move |ev| vm.form.update(|f| f.precio_venta = parse_f64(&event_target_value(&ev)))
                                />
                            </div>
                            <div class="form-group">
                                <label>"Peso (kg)"</label>
                                <input
                                    type="number"
                                    min="0"
                                    step="any"
                                    prop:value=move || vm.form.with(|f| f.peso.map(|p| p.to_string()).unwrap_or_default())
                                    on:input=move |ev| {
                                        let v = event_target_value(&ev);
                                        vm.form.update(|f| {
                                            f.peso = if v.trim().is_empty() { None } else { Some(parse_f64(&v)) }
                                        });
                                    }
                                />
                            </div>
                        </div>
                    </div>
                </Card>

                <Card>
                    <h3 class="detail-section__title">"Especificaciones"</h3>
                    <SpecFields vm=vm />
                </Card>

                <Show
                    when=move || vm.is_edit_mode()
                    fallback=|| view! {
                        <div class="hint">"Guarde el producto para agregar fotos, números de parte y aplicaciones."</div>
                    }
                >
                    <PhotoSection vm=vm />
                    <PartNumberSection vm=vm />
                    <ApplicationSection vm=vm />
                    <Show when=move || vm.form.with(|f| f.tipo_producto == TipoProducto::GuiaValvula)>
                        <CompatibleValvesSection vm=vm />
                    </Show>
                </Show>
            </div>
        </div>
    }
}

/// One input per attribute of the current product type.
#[component]
fn SpecFields(vm: ProductoDetailVm) -> impl IntoView {
    let fields = move || vm.form.with(|f| schema(f.tipo_producto).to_vec());

    view! {
        <div class="details-form">
            <Show when=move || fields().is_empty()>
                <div class="hint">"Este tipo de producto no tiene atributos definidos."</div>
            </Show>
            <For
                each=fields
                key=|f| f.key
                children=move |field: SpecField| {
                    let key = field.key;
                    let value = move || {
                        vm.spec_inputs.with(|m| m.get(key).cloned().unwrap_or_default())
                    };
                    let input = match field.kind {
                        SpecKind::Choice(options) => view! {
                            <select
                                prop:value=value
                                on:change=move |ev| vm.set_spec_input(key, event_target_value(&ev))
                            >
                                <option value="">"—"</option>
                                {options
                                    .iter()
                                    .map(|(code, label)| view! { <option value=*code>{*label}</option> })
                                    .collect_view()}
                            </select>
                        }
                        .into_any(),
                        SpecKind::Number => view! {
                            <input
                                type="text"
                                inputmode="decimal"
                                prop:value=value
                                on:input=move |ev| vm.set_spec_input(key, event_target_value(&ev))
                            />
                        }
                        .into_any(),
                        SpecKind::Text => view! {
                            <input
                                type="text"
                                prop:value=value
                                on:input=move |ev| vm.set_spec_input(key, event_target_value(&ev))
                            />
                        }
                        .into_any(),
                    };
                    view! {
                        <div class="form-group">
                            <label>{field.label}</label>
                            {input}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
fn PhotoSection(vm: ProductoDetailVm) -> impl IntoView {
    let fotos = move || {
        vm.record
            .with(|r| r.as_ref().map(|p| p.fotos.clone()).unwrap_or_default())
    };

    let on_file = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|list| list.get(0)) {
            vm.upload_photo(file);
        }
        input.set_value("");
    };

    view! {
        <Card>
            <h3 class="detail-section__title">"Fotos"</h3>
            <label class="upload-button">
                {icon("upload")} " Subir foto"
                <input type="file" accept="image/*" style="display: none;" on:change=on_file />
            </label>
            <div class="photo-grid">
                <For
                    each=fotos
                    key=|f| (f.id, f.es_principal)
                    children=move |foto| {
                        let id = foto.id;
                        let principal = foto.es_principal;
                        view! {
                            <div class="photo-grid__item" class:photo-grid__item--main=principal>
                                {match foto.imagen.filter(|s| !s.trim().is_empty()) {
                                    Some(src) => view! { <img src=src alt="" /> }.into_any(),
                                    None => view! {
                                        <div class="photo-grid__broken">{icon("image-off")} " Archivo perdido"</div>
                                    }.into_any(),
                                }}
                                <div class="photo-grid__actions">
                                    <Show when=move || !principal fallback=|| view! { <Badge>"Principal"</Badge> }>
                                        <button title="Marcar principal" on:click=move |_| vm.mark_main_photo(id)>
                                            {icon("star")}
                                        </button>
                                    </Show>
                                    <button title="Eliminar" on:click=move |_| vm.delete_photo(id)>
                                        {icon("trash")}
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </Card>
    }
}

#[component]
fn PartNumberSection(vm: ProductoDetailVm) -> impl IntoView {
    let numero = RwSignal::new(String::new());
    let fabricante = RwSignal::new(String::new());
    let numeros = move || {
        vm.record
            .with(|r| r.as_ref().map(|p| p.numeros_parte.clone()).unwrap_or_default())
    };

    view! {
        <Card>
            <h3 class="detail-section__title">"Números de parte"</h3>
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Input value=numero placeholder="Número" />
                <Input value=fabricante placeholder="Fabricante" />
                <Button
                    size=ButtonSize::Small
                    on_click=move |_| {
                        vm.add_part_number(numero.get_untracked(), fabricante.get_untracked());
                        numero.set(String::new());
                        fabricante.set(String::new());
                    }
                >
                    {icon("plus")}
                </Button>
            </Flex>
            <ul class="chip-list">
                <For
                    each=numeros
                    key=|n| n.id
                    children=move |n| {
                        let id = n.id;
                        let text = match n.fabricante {
                            Some(f) => format!("{} ({})", n.numero, f),
                            None => n.numero,
                        };
                        view! {
                            <li class="chip">
                                {text}
                                <button class="chip__remove" on:click=move |_| vm.delete_part_number(id)>
                                    {icon("x")}
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </Card>
    }
}

#[component]
fn ApplicationSection(vm: ProductoDetailVm) -> impl IntoView {
    let notices = use_notices();
    let search = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<Vehiculo>::new());
    let selected = RwSignal::new(String::new());
    let notas = RwSignal::new(String::new());
    let aplicaciones = move || {
        vm.record
            .with(|r| r.as_ref().map(|p| p.aplicaciones.clone()).unwrap_or_default())
    };

    let find = move |_| {
        let text = search.get_untracked();
        spawn_local(async move {
            match vehiculos_api::search_vehiculos(&text).await {
                Ok(list) => {
                    selected.set(list.first().map(|v| v.id.to_string()).unwrap_or_default());
                    results.set(list);
                }
                Err(e) => notices.api_error(&e),
            }
        });
    };

    let add = move |_| {
        if let Ok(vehiculo) = selected.get_untracked().parse::<EntityId>() {
            vm.add_application(vehiculo, notas.get_untracked());
            notas.set(String::new());
        }
    };

    view! {
        <Card>
            <h3 class="detail-section__title">"Aplicaciones"</h3>
            <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="flex-wrap: wrap;">
                <Input value=search placeholder="Buscar vehículo" />
                <Button size=ButtonSize::Small on_click=find>{icon("search")}</Button>
                <select
                    prop:value=move || selected.get()
                    on:change=move |ev| selected.set(event_target_value(&ev))
                >
                    <For
                        each=move || results.get()
                        key=|v| v.id
                        children=move |v: Vehiculo| view! {
                            <option value=v.id.to_string()>{v.display_name()}</option>
                        }
                    />
                </select>
                <Input value=notas placeholder="Notas" />
                <Button
                    size=ButtonSize::Small
                    on_click=add
                    disabled=Signal::derive(move || selected.get().is_empty())
                >
                    {icon("plus")}
                </Button>
            </Flex>
            <table class="simple-table">
                <tbody>
                    <For
                        each=aplicaciones
                        key=|a| a.id
                        children=move |a| {
                            let id = a.id;
                            let vehiculo = a
                                .vehiculo_detalle
                                .as_ref()
                                .map(Vehiculo::display_name)
                                .unwrap_or_else(|| format!("Vehículo #{}", a.vehiculo));
                            view! {
                                <tr>
                                    <td>{icon("car")} " " {vehiculo}</td>
                                    <td>{a.notas.unwrap_or_default()}</td>
                                    <td>
                                        <button on:click=move |_| vm.delete_application(id)>{icon("trash")}</button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Card>
    }
}

/// Valves a guide fits, stored on the guide itself.
#[component]
fn CompatibleValvesSection(vm: ProductoDetailVm) -> impl IntoView {
    let notices = use_notices();
    let search = RwSignal::new(String::new());
    let results = RwSignal::new(Vec::<Producto>::new());

    let find = move |_| {
        let text = search.get_untracked();
        spawn_local(async move {
            match api::search_productos(&text).await {
                Ok(list) => results.set(
                    list.into_iter()
                        .filter(|p| p.tipo_producto == TipoProducto::Valvula)
                        .collect(),
                ),
                Err(e) => notices.api_error(&e),
            }
        });
    };

    let is_selected = move |id: EntityId| vm.form.with(|f| f.valvulas_compatibles.contains(&id));

    view! {
        <Card>
            <h3 class="detail-section__title">"Válvulas compatibles"</h3>
            <div class="hint">
                {move || format!("{} seleccionada(s). Se guardan con el producto.", vm.form.with(|f| f.valvulas_compatibles.len()))}
            </div>
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Input value=search placeholder="Código o descripción de válvula" />
                <Button size=ButtonSize::Small on_click=find>{icon("search")}</Button>
            </Flex>
            <ul class="check-list">
                <For
                    each=move || results.get()
                    key=|p| p.id
                    children=move |p: Producto| {
                        let id = p.id;
                        view! {
                            <li>
                                <label>
                                    <input
                                        type="checkbox"
                                        prop:checked=move || is_selected(id)
                                        on:change=move |_| vm.toggle_compatible(id)
                                    />
                                    {format!(" {} · {}", p.codigo, p.descripcion)}
                                </label>
                            </li>
                        }
                    }
                />
            </ul>
        </Card>
    }
}
