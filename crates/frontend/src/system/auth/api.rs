use crate::shared::http;
use contracts::shared::api_error::ApiError;
use contracts::system::auth::{
    LoginRequest, PasswordChangeRequest, ProfileUpdateRequest, RegistrationRequest,
    TokenResponse, UserInfo,
};
use serde_json::Value;

pub async fn login(username: String, password: String) -> Result<TokenResponse, ApiError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ApiError::validation("Ingrese usuario y contraseña"));
    }
    let request = LoginRequest { username, password };
    http::post_json("/auth/login/", &request).await
}

pub async fn register(request: &RegistrationRequest) -> Result<TokenResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    http::post_json("/auth/registration/", request).await
}

/// Best-effort server-side token revocation.
pub async fn logout() -> Result<(), ApiError> {
    http::post_action::<Value>("/auth/logout/").await.map(|_| ())
}

pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    http::get_json("/auth/user/").await
}

pub async fn update_profile(request: &ProfileUpdateRequest) -> Result<UserInfo, ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::validation("El nombre de usuario es obligatorio"));
    }
    http::put_json("/auth/user/", request).await
}

pub async fn change_password(request: &PasswordChangeRequest) -> Result<(), ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    http::post_json::<_, Value>("/auth/password/change/", request)
        .await
        .map(|_| ())
}
