use crate::domain::common::EntityId;
use crate::shared::serde_utils::de_money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// KPI block returned by `GET /dashboard/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumenDashboard {
    #[serde(default, deserialize_with = "de_money")]
    pub ventas_hoy: f64,
    #[serde(default, deserialize_with = "de_money")]
    pub ventas_mes: f64,
    #[serde(default)]
    pub pedidos_pendientes: u64,
    #[serde(default)]
    pub productos_bajo_stock: u64,
    #[serde(default)]
    pub comprobantes_pendientes: u64,
    #[serde(default)]
    pub devoluciones_pendientes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioEnLinea {
    pub id: EntityId,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub ultimo_acceso: Option<DateTime<Utc>>,
}
