use crate::shared::http;
use contracts::dashboards::d400_resumen::{ResumenDashboard, UsuarioEnLinea};
use contracts::shared::api_error::ApiError;

pub async fn get_resumen() -> Result<ResumenDashboard, ApiError> {
    http::get_json("/dashboard/").await
}

pub async fn get_usuarios_en_linea() -> Result<Vec<UsuarioEnLinea>, ApiError> {
    http::get_json("/dashboard/usuarios_en_linea/").await
}
