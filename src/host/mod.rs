//! Document capability the controller is written against.
//!
//! `WebHost` talks to the real browser through web-sys; `MemoryHost` keeps an
//! in-memory element table so the controller can be exercised without one.

pub mod memory;
#[cfg(feature = "web")]
pub mod web;

pub use memory::MemoryHost;
#[cfg(feature = "web")]
pub use web::WebHost;

use crate::error::NavResult;

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum EventSource<E> {
    /// Clicks on one element.
    Click(E),
    /// Key presses anywhere in the document.
    KeyDown,
    /// Match-state changes of a media query.
    MediaChange(String),
}

/// Browser event as seen by a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Click,
    Key(String),
    MediaChange { matches: bool },
}

pub type Listener = Box<dyn FnMut(HostEvent)>;

pub trait Host {
    type Element: Clone;

    /// Path component of the current location.
    fn location_path(&self) -> NavResult<String>;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> NavResult<f64>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> NavResult<Vec<Self::Element>>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> NavResult<()>;

    fn remove_attribute(&self, element: &Self::Element, name: &str) -> NavResult<()>;

    fn add_class(&self, element: &Self::Element, class: &str) -> NavResult<()>;

    fn remove_class(&self, element: &Self::Element, class: &str) -> NavResult<()>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Attach `listener` for the lifetime of the page.
    fn listen(&self, source: EventSource<Self::Element>, listener: Listener) -> NavResult<()>;
}
