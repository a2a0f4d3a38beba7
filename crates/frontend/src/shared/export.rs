//! Downloads of server-generated documents (PDF listings, order receipts).
use crate::shared::http;
use contracts::shared::api_error::ApiError;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Fetch a PDF from `path` and hand it to the browser as `filename`.
pub async fn download_pdf(path: &str, filename: &str) -> Result<(), ApiError> {
    let bytes = http::get_bytes(path).await?;
    if bytes.is_empty() {
        return Err(ApiError::Parse("documento vacío".to_string()));
    }
    let blob = create_blob(&bytes, "application/pdf").map_err(ApiError::Parse)?;
    download_blob(&blob, filename).map_err(ApiError::Parse)
}

fn create_blob(bytes: &[u8], mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

/// `listado_productos_2024-05-02.pdf`
pub fn dated_filename(stem: &str, date: chrono::NaiveDate) -> String {
    format!("{}_{}.pdf", stem, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_filename() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(dated_filename("bajo_stock", d), "bajo_stock_2024-05-02.pdf");
    }
}
