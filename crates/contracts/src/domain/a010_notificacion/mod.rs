use crate::domain::common::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notificacion {
    pub id: EntityId,
    pub titulo: String,
    #[serde(default)]
    pub mensaje: String,
    #[serde(default)]
    pub leida: bool,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
    /// Page key the notification points to (e.g. an order).
    #[serde(default)]
    pub enlace: Option<String>,
}

pub fn unread_count(items: &[Notificacion]) -> usize {
    items.iter().filter(|n| !n.leida).count()
}
