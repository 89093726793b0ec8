//! Error types for the CV viewer

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Viewer error type
#[derive(Error, Debug)]
pub enum ViewerError {
    /// A rejected promise or a thrown JavaScript value
    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Invalid link descriptors: {0}")]
    Descriptors(#[from] serde_json::Error),

    #[error("Value conversion error: {0}")]
    Bindgen(#[from] serde_wasm_bindgen::Error),

    #[error("PDF engine error: {0}")]
    Engine(String),
}

impl ViewerError {
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}

impl From<JsValue> for ViewerError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Js(message)
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
