use anyhow::Result;
use js_sys::{Array, Uint8Array};
use shared::ExportFile;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::services::dom::js_error;

/// Offer an export to the user as a file download
pub fn offer(file: &ExportFile) -> Result<()> {
    let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let link: HtmlAnchorElement = gloo::utils::document()
        .create_element("a")
        .map_err(js_error)?
        .unchecked_into();
    link.set_href(&url);
    link.set_download(&file.file_name);
    link.click();

    Url::revoke_object_url(&url).map_err(js_error)?;
    Ok(())
}
