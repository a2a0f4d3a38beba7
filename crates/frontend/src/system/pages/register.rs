use contracts::system::auth::RegistrationRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api;
use crate::system::auth::context::{start_session, use_auth};

/// Customer self-registration. A successful answer carries a token, so the
/// new account is signed in right away.
#[component]
pub fn RegisterPage(on_login: Callback<()>) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password1 = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = RegistrationRequest {
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password1: password1.get_untracked(),
            password2: password2.get_untracked(),
        };
        if let Err(msg) = request.validate() {
            set_error_message.set(Some(msg));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::register(&request).await {
                Ok(response) => start_session(response.key, set_auth_state),
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    set_error_message.set(Some(e.user_message()));
                }
            }
            set_is_loading.set(false);
        });
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    required
                    disabled=move || is_loading.get()
                />
            </div>
        }
    };

    view! {
        <div class="login-box">
            <h2>"Crear cuenta"</h2>

            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <form on:submit=on_submit>
                {field("reg-username", "Usuario", "text", username)}
                {field("reg-email", "Correo electrónico", "email", email)}
                {field("reg-password1", "Contraseña", "password", password1)}
                {field("reg-password2", "Repita la contraseña", "password", password2)}

                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Creando..." } else { "Crear cuenta" }}
                </button>
            </form>

            <div class="login-info">
                <span>"¿Ya tiene cuenta? "</span>
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_login.run(());
                }>
                    "Ingresar"
                </a>
            </div>
        </div>
    }
}
