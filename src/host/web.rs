//! Browser host backed by web-sys.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MediaQueryListEvent, Window};

use super::{EventSource, Host, HostEvent, Listener};
use crate::error::{NavError, NavResult};

#[derive(Debug, Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> NavResult<Self> {
        let window = web_sys::window().ok_or(NavError::MissingWindow)?;
        let document = window.document().ok_or(NavError::MissingDocument)?;
        Ok(Self { window, document })
    }

    fn attach(
        target: &EventTarget,
        event_type: &str,
        convert: fn(Event) -> Option<HostEvent>,
        mut listener: Listener,
    ) -> NavResult<()> {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(host_event) = convert(event) {
                listener(host_event);
            }
        });
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        // Listeners live as long as the page.
        closure.forget();
        Ok(())
    }
}

fn click_event(_: Event) -> Option<HostEvent> {
    Some(HostEvent::Click)
}

fn key_event(event: Event) -> Option<HostEvent> {
    event
        .dyn_into::<KeyboardEvent>()
        .ok()
        .map(|event| HostEvent::Key(event.key()))
}

fn media_event(event: Event) -> Option<HostEvent> {
    event
        .dyn_into::<MediaQueryListEvent>()
        .ok()
        .map(|event| HostEvent::MediaChange {
            matches: event.matches(),
        })
}

impl Host for WebHost {
    type Element = Element;

    fn location_path(&self) -> NavResult<String> {
        Ok(self.window.location().pathname()?)
    }

    fn viewport_width(&self) -> NavResult<f64> {
        self.window
            .inner_width()?
            .as_f64()
            .ok_or_else(|| NavError::Js("innerWidth is not a number".to_string()))
    }

    fn query_all(&self, selector: &str) -> NavResult<Vec<Element>> {
        let nodes = self.document.query_selector_all(selector)?;
        Ok((0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> NavResult<()> {
        Ok(element.set_attribute(name, value)?)
    }

    fn remove_attribute(&self, element: &Element, name: &str) -> NavResult<()> {
        Ok(element.remove_attribute(name)?)
    }

    fn add_class(&self, element: &Element, class: &str) -> NavResult<()> {
        Ok(element.class_list().add_1(class)?)
    }

    fn remove_class(&self, element: &Element, class: &str) -> NavResult<()> {
        Ok(element.class_list().remove_1(class)?)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn listen(&self, source: EventSource<Element>, listener: Listener) -> NavResult<()> {
        match source {
            EventSource::Click(element) => Self::attach(&element, "click", click_event, listener),
            EventSource::KeyDown => Self::attach(&self.document, "keydown", key_event, listener),
            EventSource::MediaChange(query) => {
                let list = self
                    .window
                    .match_media(&query)?
                    .ok_or_else(|| NavError::InvalidSelector(query.clone()))?;
                Self::attach(&list, "change", media_event, listener)
            }
        }
    }
}
