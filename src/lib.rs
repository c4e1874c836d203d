//! Site navigation - sidebar controller for a static website
//!
//! Highlights the sidebar link for the current page and runs the mobile
//! sidebar: toggle button, overlay backdrop, Escape key, closing after a link
//! is followed on small screens, and resetting when the viewport grows past
//! the mobile breakpoint.
//!
//! The controller is written against the [`host::Host`] trait. In the browser
//! it runs on [`host::WebHost`] (enabled by the default `web` feature); tests
//! drive it through the in-memory [`host::MemoryHost`].
//!
//! ## Example
//! ```rust
//! use site_nav::prelude::*;
//!
//! let page = MemoryHost::new("/blog/", 500.0);
//! let blog = page.add_link("/blog/");
//! let (toggle, sidebar, _overlay) = page.add_sidebar_chrome();
//!
//! let (nav, _wiring) = NavController::mount(page.clone(), NavConfig::default()).unwrap();
//! assert!(page.has_class(&blog, "active"));
//!
//! page.click(toggle);
//! assert!(nav.borrow().is_open());
//! assert!(page.has_class(&sidebar, "open"));
//!
//! page.press_key("Escape");
//! assert_eq!(nav.borrow().state(), SidebarState::Closed);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod links;
pub mod sidebar;

#[cfg(feature = "web")]
pub mod logging;
#[cfg(feature = "web")]
pub mod wasm;

// Re-export common types
pub mod prelude {
    pub use crate::config::{ActiveMatch, NavConfig};
    pub use crate::controller::{NavController, SharedController, Wiring};
    pub use crate::error::{NavError, NavResult};
    pub use crate::host::memory::{MemoryElement, NodeId};
    pub use crate::host::{EventSource, Host, HostEvent, Listener, MemoryHost};
    pub use crate::links::{path_matches, NavLink};
    pub use crate::sidebar::{NavEvent, SidebarState, Transition};
}
