//! Customer editor with the CRM history of the customer underneath.

use crate::domain::a004_cliente::api;
use crate::domain::a009_interaccion::ui::list::InteraccionList;
use crate::layout::global_context::{detail_key, AppGlobalContext};
use crate::layout::notice_service::use_notices;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::cart_context::use_cart;
use crate::shared::components::error_box::ErrorBox;
use crate::shared::icons::icon;
use contracts::domain::a004_cliente::{Cliente, ClienteDto};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn opt(raw: String) -> Option<String> {
    let raw = raw.trim().to_string();
    (!raw.is_empty()).then_some(raw)
}

#[component]
pub fn ClienteDetail(id: Option<EntityId>, on_close: Callback<()>) -> impl IntoView {
    let notices = use_notices();
    let cart = use_cart();
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let form = RwSignal::new(ClienteDto::default());
    let record = RwSignal::new(None::<Cliente>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    if let Some(id) = id {
        spawn_local(async move {
            match api::get_cliente(id).await {
                Ok(c) => {
                    form.set(ClienteDto::from(&c));
                    record.set(Some(c));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    }

    let save = move |_| {
        let dto = form.get_untracked();
        if let Err(msg) = dto.validate() {
            error.set(Some(msg));
            return;
        }
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            let result = match id {
                Some(id) => api::update_cliente(id, &dto).await,
                None => api::create_cliente(&dto).await,
            };
            match result {
                Ok(c) => {
                    notices.success(format!("Cliente {} guardado", c.nombre));
                    if id.is_none() {
                        tabs_store.open_tab(
                            &detail_key("a004_cliente", c.id),
                            &detail_tab_label("Cliente", &c.nombre),
                        );
                        on_close.run(());
                    } else {
                        record.set(Some(c));
                    }
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            saving.set(false);
        });
    };

    let sell_to = move |_| {
        if let Some(c) = record.get_untracked() {
            notices.info(format!("Vendiendo a {}", c.nombre));
            cart.select_acting_customer(c);
            tabs_store.open_tab(
                "a003_producto_valvulas",
                tab_label_for_key("a003_producto_valvulas"),
            );
        }
    };

    let text_field = move |label: &'static str,
                           get: fn(&ClienteDto) -> Option<String>,
                           set: fn(&mut ClienteDto, Option<String>)| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    prop:value=move || form.with(|f| get(f).unwrap_or_default())
                    on:input=move |ev| form.update(|f| set(f, opt(event_target_value(&ev))))
                />
            </div>
        }
    };

    view! {
        <div class="page page--detail">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("user")}
                    <h1 class="page__title">
                        {move || record.with(|r| r.as_ref().map(|c| c.nombre.clone()))
                            .unwrap_or_else(|| "Nuevo cliente".to_string())}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=save
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Guardar"
                    </Button>
                    <Show when=move || record.with(Option::is_some)>
                        <Button appearance=ButtonAppearance::Secondary on_click=sell_to>
                            {icon("cart")} " Vender a este cliente"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "Cerrar"
                    </Button>
                </div>
            </div>

            <ErrorBox error=error />

            <div class="page__content">
                <Card>
                    <div class="details-form">
                        <div class="form-group">
                            <label>"Nombre"</label>
                            <input
                                type="text"
                                prop:value=move || form.with(|f| f.nombre.clone())
                                on:input=move |ev| form.update(|f| f.nombre = event_target_value(&ev))
                            />
                        </div>
                        {text_field("RUT", |f| f.rut.clone(), |f, v| f.rut = v)}
                        {text_field("Correo", |f| f.email.clone(), |f, v| f.email = v)}
                        {text_field("Teléfono", |f| f.telefono.clone(), |f, v| f.telefono = v)}
                        {text_field("Dirección", |f| f.direccion.clone(), |f, v| f.direccion = v)}
                        <div class="form-group">
                            <label>"Límite de crédito"</label>
                            <input
                                type="number"
                                min="0"
                                step="any"
                                prop:value=move || form.with(|f| f.limite_credito.to_string())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev).replace(',', ".");
                                    form.update(|f| f.limite_credito = v.trim().parse().unwrap_or(0.0));
                                }
                            />
                        </div>
                    </div>
                </Card>

                {id.map(|id| view! {
                    <div class="detail-section">
                        <InteraccionList cliente=id />
                    </div>
                })}
            </div>
        </div>
    }
}
