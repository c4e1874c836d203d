//! Error types for the navigation controller

use thiserror::Error;

#[cfg(feature = "web")]
use wasm_bindgen::JsCast;

/// Main error type for navigation operations.
///
/// A page element that is simply absent is never an error; the behaviour
/// that depends on it is skipped instead.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No global window available")]
    MissingWindow,

    #[error("Window has no document")]
    MissingDocument,

    #[error("Invalid selector or media query: {0}")]
    InvalidSelector(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavError>;

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for NavError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        NavError::Js(message)
    }
}

#[cfg(feature = "web")]
impl From<NavError> for wasm_bindgen::JsValue {
    fn from(err: NavError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
