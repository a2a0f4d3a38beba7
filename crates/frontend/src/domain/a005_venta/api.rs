//! `/ventas/` and its actions. Status transitions are validated by the
//! server; refusals come back as `ApiError::Server` with the flattened reason.

use crate::shared::export::download_pdf;
use crate::shared::http;
use contracts::domain::a005_venta::{
    ActualizarEstadoRequest, ActualizarPagoRequest, AsignarVendedorRequest,
    ComprobanteActionRequest, CrearVentaRequest, EstadoPago, EstadoVenta, Venta, Vendedor,
};
use contracts::domain::common::EntityId;
use contracts::shared::api_error::ApiError;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

pub const ENDPOINT: &str = "/ventas/";

fn action_path(id: EntityId, action: &str) -> String {
    format!("{}{}/{}/", ENDPOINT, id, action)
}

pub async fn get_venta(id: EntityId) -> Result<Venta, ApiError> {
    http::get_json(&format!("{}{}/", ENDPOINT, id)).await
}

pub async fn crear_venta(request: &CrearVentaRequest) -> Result<Venta, ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::validation("El carrito está vacío"));
    }
    http::post_json(ENDPOINT, request).await
}

pub async fn actualizar_estado(id: EntityId, estado: EstadoVenta) -> Result<Venta, ApiError> {
    http::post_json(
        &action_path(id, "actualizar_estado"),
        &ActualizarEstadoRequest { estado },
    )
    .await
}

pub async fn actualizar_pago(id: EntityId, estado_pago: EstadoPago) -> Result<Venta, ApiError> {
    http::post_json(
        &action_path(id, "actualizar_pago"),
        &ActualizarPagoRequest { estado_pago },
    )
    .await
}

pub async fn asignar_vendedor(id: EntityId, vendedor: EntityId) -> Result<Venta, ApiError> {
    http::post_json(
        &action_path(id, "asignar_vendedor"),
        &AsignarVendedorRequest { vendedor },
    )
    .await
}

/// Staff that can take an order.
pub async fn list_vendedores() -> Result<Vec<Vendedor>, ApiError> {
    http::get_json(&format!("{}vendedores/", ENDPOINT)).await
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::validation(format!("{:?}", e))
}

/// Multipart upload of a payment voucher.
pub async fn subir_comprobante(id: EntityId, file: &File, monto: f64) -> Result<Venta, ApiError> {
    if monto <= 0.0 {
        return Err(ApiError::validation("Indique el monto del comprobante"));
    }
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("archivo", file, &file.name())
        .map_err(js_error)?;
    form.append_with_str("monto", &monto.to_string())
        .map_err(js_error)?;
    http::post_form(&action_path(id, "subir_comprobante"), form).await
}

pub async fn aprobar_comprobante(
    id: EntityId,
    comprobante: EntityId,
    observacion: Option<String>,
) -> Result<Venta, ApiError> {
    http::post_json(
        &action_path(id, "aprobar_comprobante"),
        &ComprobanteActionRequest {
            comprobante,
            observacion,
        },
    )
    .await
}

pub async fn anular_comprobante(
    id: EntityId,
    comprobante: EntityId,
    observacion: Option<String>,
) -> Result<Venta, ApiError> {
    http::post_json(
        &action_path(id, "anular_comprobante"),
        &ComprobanteActionRequest {
            comprobante,
            observacion,
        },
    )
    .await
}

pub async fn generar_pdf(venta: &Venta) -> Result<(), ApiError> {
    download_pdf(
        &action_path(venta.id, "generar_pdf"),
        &format!("venta_{}.pdf", venta.display_number().trim_start_matches('#')),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_path() {
        assert_eq!(action_path(15, "generar_pdf"), "/ventas/15/generar_pdf/");
    }
}
