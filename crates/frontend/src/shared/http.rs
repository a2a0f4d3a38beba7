//! Thin HTTP layer over `gloo-net`.
//!
//! Attaches the session token, maps every failure onto [`ApiError`] and
//! reports aborted requests as [`ApiError::Cancelled`]. A 401 anywhere ends
//! the session through the handler registered by the session provider.

use super::api_utils::api_url;
use crate::system::auth::storage;
use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{AbortSignal, FormData};

thread_local! {
    static UNAUTHORIZED_HANDLER: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Register what happens when the API rejects the stored credential.
pub fn set_unauthorized_handler(handler: impl Fn() + 'static) {
    UNAUTHORIZED_HANDLER.with(|h| *h.borrow_mut() = Some(Rc::new(handler)));
}

fn notify_unauthorized() {
    let handler = UNAUTHORIZED_HANDLER.with(|h| h.borrow().clone());
    if let Some(handler) = handler {
        handler();
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Token {}", token)),
        None => builder,
    }
}

fn transport_error(err: gloo_net::Error, signal: Option<&AbortSignal>) -> ApiError {
    if signal.map(|s| s.aborted()).unwrap_or(false) {
        return ApiError::Cancelled;
    }
    ApiError::Network(err.to_string())
}

async fn dispatch(request: Request, signal: Option<&AbortSignal>) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(e, signal))?;
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    if status == 401 {
        log::warn!("API rejected the session token ({})", response.url());
        notify_unauthorized();
    }
    Err(err)
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    signal: Option<&AbortSignal>,
) -> Result<T, ApiError> {
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, signal))?;
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn build_error(err: gloo_net::Error) -> ApiError {
    ApiError::Parse(err.to_string())
}

// ---------------------------------------------------------------------------
// JSON verbs
// ---------------------------------------------------------------------------

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    get_json_abortable(path, None).await
}

/// GET that can be aborted through `signal`; an abort yields `Cancelled`.
pub async fn get_json_abortable<T: DeserializeOwned>(
    path: &str,
    signal: Option<&AbortSignal>,
) -> Result<T, ApiError> {
    let request = authorized(Request::get(&api_url(path)))
        .abort_signal(signal)
        .build()
        .map_err(build_error)?;
    let response = dispatch(request, signal).await?;
    read_json(response, signal).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    read_json(response, None).await
}

/// POST without a body, for action endpoints.
pub async fn post_action<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let request = authorized(Request::post(&api_url(path)))
        .build()
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    read_json(response, None).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::put(&api_url(path)))
        .json(body)
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    read_json(response, None).await
}

pub async fn patch_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::patch(&api_url(path)))
        .json(body)
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    read_json(response, None).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let request = authorized(Request::delete(&api_url(path)))
        .build()
        .map_err(build_error)?;
    dispatch(request, None).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Multipart and binary
// ---------------------------------------------------------------------------

/// Multipart POST. The browser sets the boundary header itself.
pub async fn post_form<T: DeserializeOwned>(path: &str, form: FormData) -> Result<T, ApiError> {
    let request = authorized(Request::post(&api_url(path)))
        .body(form)
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    read_json(response, None).await
}

/// GET raw bytes, used for server-generated PDFs.
pub async fn get_bytes(path: &str) -> Result<Vec<u8>, ApiError> {
    let request = authorized(Request::get(&api_url(path)))
        .header("Accept", "application/pdf")
        .build()
        .map_err(build_error)?;
    let response = dispatch(request, None).await?;
    response
        .binary()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}
