use crate::shared::storage::{get_raw, remove, set_raw};

const TOKEN_KEY: &str = "token";

/// Stored session token, if any.
pub fn get_token() -> Option<String> {
    get_raw(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub fn save_token(token: &str) {
    set_raw(TOKEN_KEY, token);
}

pub fn clear_token() {
    remove(TOKEN_KEY);
}
