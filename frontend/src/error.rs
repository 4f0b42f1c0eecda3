use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("server responded with {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
