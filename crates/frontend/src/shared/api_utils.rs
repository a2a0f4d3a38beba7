//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::config::config;

/// Base URL for API requests, without trailing slash.
///
/// `VALVULAS_API_URL` wins when set at build time; otherwise the backend is
/// assumed on port 8000 of the host serving the page.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/productos/{}/", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(url) = &config().api_url {
        return url.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000/api", protocol, hostname)
}

/// Full URL for an API path such as `/productos/?page=2`.
/// Absolute URLs (pagination links) are passed through.
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://h:8000/api", "/productos/"),
            "http://h:8000/api/productos/"
        );
        assert_eq!(
            join_url("http://h:8000/api/", "marcas/"),
            "http://h:8000/api/marcas/"
        );
        assert_eq!(
            join_url("http://h:8000/api", "https://cdn/x/?page=2"),
            "https://cdn/x/?page=2"
        );
    }
}
