use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage(
    /// Switch to the registration form.
    on_register: Callback<()>,
) -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get_untracked();
        let password_val = password.get_untracked();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            if let Err(e) = do_login(username_val, password_val, set_auth_state).await {
                log::warn!("login failed: {}", e);
                set_error_message.set(Some(e.user_message()));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-box">
            <h2>"Ingresar"</h2>

            <Show when=move || error_message.get().is_some()>
                <div class="error-message">
                    {move || error_message.get().unwrap_or_default()}
                </div>
            </Show>

            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="username">"Usuario"</label>
                    <input
                        type="text"
                        id="username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        required
                        disabled=move || is_loading.get()
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Contraseña"</label>
                    <input
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        required
                        disabled=move || is_loading.get()
                    />
                </div>

                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                </button>
            </form>

            <div class="login-info">
                <span>"¿No tiene cuenta? "</span>
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_register.run(());
                }>
                    "Crear cuenta"
                </a>
            </div>
        </div>
    }
}
