//! Descriptor fetching through `window.fetch`

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::{Result, ViewerError};
use crate::links::DescriptorSource;

/// Fetches text relative to the host page
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowFetch;

#[async_trait(?Send)]
impl DescriptorSource for WindowFetch {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let window = web_sys::window().ok_or_else(|| ViewerError::dom("No window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(path))
            .await?
            .dyn_into()
            .map_err(|_| ViewerError::dom("fetch did not resolve to a Response"))?;

        // status is not checked; an HTML error page fails in the JSON parser
        let text = JsFuture::from(response.text()?).await?;
        text.as_string()
            .ok_or_else(|| ViewerError::Js(format!("{} body is not text", path)))
    }
}
