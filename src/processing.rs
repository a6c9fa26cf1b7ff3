//! Client for the external image-processing service.

use gloo::net::http::{Request, Response};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, FormData, HtmlAnchorElement, Url};

use crate::error::CommitError;
use crate::model::ImageHandle;
use crate::state::CommitRequest;

const FALLBACK_MIME: &str = "image/png";

#[derive(Clone, Debug, PartialEq)]
pub struct ProcessClient {
    endpoint: String,
}

impl ProcessClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    /// Posts the source image with its effect and params, and returns a handle
    /// to the processed bytes.
    pub async fn run(&self, req: &CommitRequest) -> Result<ImageHandle, CommitError> {
        let source = Request::get(req.source.url()).send().await?;
        let source = ensure_ok(source).await?;
        let mime = content_type(&source);
        let bytes = source.binary().await?;
        log::debug!("commit #{}: uploading {} bytes to {}", req.ticket.id, bytes.len(), self.endpoint);

        let params = serde_json::to_string(&req.params).map_err(|e| CommitError::Browser(e.to_string()))?;
        let form = FormData::new()?;
        form.append_with_blob_and_filename("image", &bytes_to_blob(&bytes, &mime)?, "image")?;
        form.append_with_str("effect", &req.effect)?;
        form.append_with_str("params", &params)?;

        let response = Request::post(&self.endpoint).body(form)?.send().await?;
        let response = ensure_ok(response).await?;
        let mime = content_type(&response);
        let processed = response.binary().await?;
        let url = create_object_url(&processed, &mime)?;
        Ok(ImageHandle::new(url))
    }
}

async fn ensure_ok(response: Response) -> Result<Response, CommitError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => response.status_text(),
    };
    Err(CommitError::Processing { status, message })
}

fn content_type(response: &Response) -> String {
    response
        .headers()
        .get("content-type")
        .filter(|m| m.starts_with("image/"))
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}

fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, CommitError> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = BlobPropertyBag::new();
    if !mime.trim().is_empty() {
        options.set_type(mime);
    }
    Ok(Blob::new_with_u8_array_sequence_and_options(&parts, &options)?)
}

pub fn create_object_url(bytes: &[u8], mime: &str) -> Result<String, CommitError> {
    let blob = bytes_to_blob(bytes, mime)?;
    Ok(Url::create_object_url_with_blob(&blob)?)
}

/// Object URL for a user-picked file.
pub fn object_url_for_file(file: &web_sys::File) -> Result<ImageHandle, CommitError> {
    Ok(ImageHandle::new(Url::create_object_url_with_blob(file)?))
}

pub fn revoke(handle: &ImageHandle) {
    if handle.url().starts_with("blob:") {
        let _ = Url::revoke_object_url(handle.url());
    }
}

/// Saves the image through a temporary download link.
pub fn download(handle: &ImageHandle, file_name: &str) -> Result<(), CommitError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CommitError::Browser("no document".into()))?;
    let body = document.body().ok_or_else(|| CommitError::Browser("no document body".into()))?;
    let link: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| CommitError::Browser("could not create download link".into()))?;
    link.set_href(handle.url());
    link.set_download(file_name);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    log::info!("exported {}", file_name);
    Ok(())
}
