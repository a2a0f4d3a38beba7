//! Own profile: contact data and password change.

use contracts::system::auth::{PasswordChangeRequest, ProfileUpdateRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::notice_service::use_notices;
use crate::shared::components::page_header::PageHeader;
use crate::system::auth::api;
use crate::system::auth::context::use_auth;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let notices = use_notices();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    // Fill the form once the profile is known, and again if it is reloaded.
    Effect::new(move |_| {
        if let Some(user) = auth_state.with(|s| s.user.clone()) {
            let req = ProfileUpdateRequest::from(&user);
            username.set(req.username);
            email.set(req.email);
            first_name.set(req.first_name);
            last_name.set(req.last_name);
        }
    });

    let save_profile = move |_| {
        let request = ProfileUpdateRequest {
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
        };
        if request.username.is_empty() {
            notices.error("El nombre de usuario es obligatorio");
            return;
        }
        saving.set(true);
        spawn_local(async move {
            match api::update_profile(&request).await {
                Ok(user) => {
                    set_auth_state.update(|s| s.user = Some(user));
                    notices.success("Perfil actualizado");
                }
                Err(e) => notices.api_error(&e),
            }
            saving.set(false);
        });
    };

    let old_password = RwSignal::new(String::new());
    let new_password1 = RwSignal::new(String::new());
    let new_password2 = RwSignal::new(String::new());
    let changing = RwSignal::new(false);

    let change_password = move |_| {
        let request = PasswordChangeRequest {
            old_password: old_password.get_untracked(),
            new_password1: new_password1.get_untracked(),
            new_password2: new_password2.get_untracked(),
        };
        if let Err(msg) = request.validate() {
            notices.error(msg);
            return;
        }
        changing.set(true);
        spawn_local(async move {
            match api::change_password(&request).await {
                Ok(()) => {
                    old_password.set(String::new());
                    new_password1.set(String::new());
                    new_password2.set(String::new());
                    notices.success("Contraseña cambiada");
                }
                Err(e) => notices.api_error(&e),
            }
            changing.set(false);
        });
    };

    let roles = move || {
        auth_state.with(|s| {
            s.user
                .as_ref()
                .map(|u| {
                    u.roles()
                        .iter()
                        .map(|r| format!("{:?}", r))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="page">
            <PageHeader title="Mi perfil" icon_name="user" />
            <p class="page__hint">"Roles: " {roles}</p>

            <div class="detail-grid">
                <Card>
                    <h3>"Datos de la cuenta"</h3>
                    <div class="form__group">
                        <Label>"Usuario"</Label>
                        <Input value=username />
                    </div>
                    <div class="form__group">
                        <Label>"Correo electrónico"</Label>
                        <Input value=email />
                    </div>
                    <div class="form__group">
                        <Label>"Nombre"</Label>
                        <Input value=first_name />
                    </div>
                    <div class="form__group">
                        <Label>"Apellido"</Label>
                        <Input value=last_name />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=save_profile
                        disabled=saving
                    >
                        "Guardar"
                    </Button>
                </Card>

                <Card>
                    <h3>"Cambiar contraseña"</h3>
                    <div class="form__group">
                        <Label>"Contraseña actual"</Label>
                        <Input value=old_password input_type=InputType::Password />
                    </div>
                    <div class="form__group">
                        <Label>"Nueva contraseña"</Label>
                        <Input value=new_password1 input_type=InputType::Password />
                    </div>
                    <div class="form__group">
                        <Label>"Repita la nueva contraseña"</Label>
                        <Input value=new_password2 input_type=InputType::Password />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=change_password
                        disabled=changing
                    >
                        "Cambiar contraseña"
                    </Button>
                </Card>
            </div>
        </div>
    }
}
