//! Build-time configuration.
//!
//! Values are baked into the wasm bundle from environment variables present
//! when `trunk build` runs; anything missing falls back to the defaults below.

use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST base without trailing slash, e.g. `https://api.valvulas.cl/api`.
    /// `None` means "derive from the page location".
    pub api_url: Option<String>,
    pub juego_unidades: u32,
    pub search_debounce_ms: u32,
    pub notifications_poll_ms: u32,
    pub online_poll_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            juego_unidades: contracts::shared::cart::JUEGO_UNIDADES,
            search_debounce_ms: 300,
            notifications_poll_ms: 30_000,
            online_poll_ms: 60_000,
        }
    }
}

impl AppConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("VALVULAS_API_URL")
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            juego_unidades: parse_or(option_env!("VALVULAS_JUEGO_UNIDADES"), defaults.juego_unidades)
                .max(1),
            search_debounce_ms: parse_or(
                option_env!("VALVULAS_SEARCH_DEBOUNCE_MS"),
                defaults.search_debounce_ms,
            ),
            notifications_poll_ms: parse_or(
                option_env!("VALVULAS_NOTIFICATIONS_POLL_MS"),
                defaults.notifications_poll_ms,
            )
            .max(1_000),
            online_poll_ms: parse_or(option_env!("VALVULAS_ONLINE_POLL_MS"), defaults.online_poll_ms)
                .max(1_000),
        }
    }
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or(Some(" 12 "), 8), 12);
        assert_eq!(parse_or(Some("doce"), 8), 8);
        assert_eq!(parse_or(None, 8), 8);
    }

    #[test]
    fn test_defaults() {
        let c = AppConfig::default();
        assert_eq!(c.juego_unidades, 8);
        assert_eq!(c.search_debounce_ms, 300);
    }
}
