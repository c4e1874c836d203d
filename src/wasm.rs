//! WASM bindings for the site navigation
//!
//! The page loads the module, which installs the panic hook and console
//! logger, then calls `mount()` once the sidebar markup is in the document.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::NavConfig;
use crate::controller::{NavController, SharedController};
use crate::error::NavError;
use crate::host::WebHost;
use crate::logging;

thread_local! {
    // Keeps the mounted controller alive; listeners only hold weak references.
    static MOUNTED: RefCell<Option<SharedController<WebHost>>> = const { RefCell::new(None) };
}

/// Initialize panic hook and logging for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Mount the navigation controller on the current page.
///
/// `config` is an optional object overriding any `NavConfig` field
/// (`{ sidebarId: "nav", mobileBreakpoint: 600 }`). Mounting twice is a no-op.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue> {
    if MOUNTED.with(|mounted| mounted.borrow().is_some()) {
        log::warn!("Navigation already mounted");
        return Ok(());
    }

    let config = if config.is_undefined() || config.is_null() {
        NavConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<NavConfig>(config)
            .map_err(|e| NavError::InvalidConfig(e.to_string()))?
    };
    config.validate()?;
    logging::init(config.level_filter()?);

    let host = WebHost::new()?;
    let (controller, _wiring) = NavController::mount(host, config)?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(controller));
    Ok(())
}

/// Whether the sidebar is currently open. False before `mount()`.
#[wasm_bindgen(js_name = "isSidebarOpen")]
pub fn is_sidebar_open() -> bool {
    MOUNTED.with(|mounted| {
        mounted
            .borrow()
            .as_ref()
            .and_then(|controller| controller.try_borrow().ok().map(|c| c.is_open()))
            .unwrap_or(false)
    })
}

/// Close the sidebar from page script, e.g. before a client-side transition.
#[wasm_bindgen(js_name = "closeSidebar")]
pub fn close_sidebar() -> Result<(), JsValue> {
    MOUNTED.with(|mounted| -> Result<(), JsValue> {
        if let Some(controller) = mounted.borrow().as_ref() {
            controller.borrow_mut().close()?;
        }
        Ok(())
    })
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
