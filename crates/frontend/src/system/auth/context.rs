use contracts::shared::api_error::ApiError;
use contracts::system::auth::{Rol, UserInfo};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::http;
use crate::shared::request_gate::LatestRequest;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    /// True while the profile for the current token is being fetched.
    pub profile_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_any_role(&self, roles: &[Rol]) -> bool {
        self.user
            .as_ref()
            .map(|u| u.is_superuser || u.has_any_role(roles))
            .unwrap_or(false)
    }

    /// Staff can edit the catalog and sell on behalf of customers.
    pub fn is_staff(&self) -> bool {
        self.user
            .as_ref()
            .map(UserInfo::is_staff_member)
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(UserInfo::is_admin).unwrap_or(false)
    }
}

/// Session root. Restores the stored token, loads the profile whenever the
/// token changes and ends the session when the API answers 401.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        token: storage::get_token(),
        ..AuthState::default()
    });

    http::set_unauthorized_handler(move || {
        storage::clear_token();
        set_auth_state.set(AuthState::default());
    });

    let token = Memo::new(move |_| auth_state.with(|s| s.token.clone()));
    let latest = LatestRequest::new();

    Effect::new(move |_| {
        let Some(current) = token.get() else {
            latest.cancel();
            set_auth_state.update(|s| {
                s.user = None;
                s.profile_loading = false;
            });
            return;
        };

        let (ticket, _) = latest.start();
        set_auth_state.update(|s| s.profile_loading = true);
        spawn_local(async move {
            let result = api::get_current_user().await;
            if !latest.is_current(ticket) {
                return;
            }
            latest.finish(ticket);
            match result {
                Ok(user) => {
                    log!("session: profile loaded for '{}'", user.username);
                    set_auth_state.update(|s| {
                        s.user = Some(user);
                        s.profile_loading = false;
                    });
                }
                Err(e) if e.is_unauthorized() => {
                    log::warn!("session: stored token rejected, signing out");
                    storage::clear_token();
                    set_auth_state.set(AuthState::default());
                }
                Err(e) => {
                    log::error!("session: profile load failed: {}", e);
                    set_auth_state.update(|s| {
                        if s.token.as_deref() == Some(current.as_str()) {
                            s.profile_loading = false;
                        }
                    });
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Sign in and store the token; the profile follows through the provider.
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let response = api::login(username, password).await?;
    start_session(response.key, set_auth_state);
    Ok(())
}

pub fn start_session(token: String, set_auth_state: WriteSignal<AuthState>) {
    storage::save_token(&token);
    set_auth_state.set(AuthState {
        token: Some(token),
        ..AuthState::default()
    });
}

/// Revoke server-side when possible, then forget everything locally.
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if storage::get_token().is_some() {
        if let Err(e) = api::logout().await {
            log::debug!("logout request failed, clearing locally anyway: {}", e);
        }
    }
    storage::clear_token();
    set_auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_with_groups(groups: &[&str]) -> AuthState {
        AuthState {
            token: Some("abc".into()),
            user: Some(
                serde_json::from_value(json!({
                    "pk": 3, "username": "maria", "groups": groups
                }))
                .unwrap(),
            ),
            profile_loading: false,
        }
    }

    #[test]
    fn test_anonymous_state() {
        let s = AuthState::default();
        assert!(!s.is_authenticated());
        assert!(!s.is_staff());
        assert!(!s.has_any_role(&[Rol::Cliente]));
    }

    #[test]
    fn test_roles_from_profile() {
        let seller = state_with_groups(&["Vendedor"]);
        assert!(seller.is_staff());
        assert!(!seller.is_admin());
        assert!(seller.has_any_role(&[Rol::Vendedor, Rol::Administrador]));

        let customer = state_with_groups(&["Cliente"]);
        assert!(!customer.is_staff());
        assert!(customer.has_any_role(&[Rol::Cliente]));
    }

    #[test]
    fn test_token_without_profile_has_no_roles() {
        let s = AuthState {
            token: Some("abc".into()),
            ..AuthState::default()
        };
        assert!(s.is_authenticated());
        assert!(!s.has_any_role(&[Rol::Administrador]));
    }
}
