//! In-memory document.
//!
//! Holds a flat list of elements with ids, classes and attributes, plus the
//! registered listeners. Clones share the same document, so a test can keep
//! one handle for driving events while the controller owns another.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use super::{EventSource, Host, HostEvent, Listener};
use crate::error::{NavError, NavResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct Document {
    path: String,
    width: f64,
    elements: Vec<MemoryElement>,
    listeners: Vec<(EventSource<NodeId>, Listener)>,
}

#[derive(Clone, Default)]
pub struct MemoryHost {
    doc: Rc<RefCell<Document>>,
}

impl MemoryHost {
    pub fn new(path: &str, width: f64) -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document {
                path: path.to_string(),
                width,
                ..Default::default()
            })),
        }
    }

    pub fn insert(&self, element: MemoryElement) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        doc.elements.push(element);
        NodeId(doc.elements.len() - 1)
    }

    /// Add an `<a class="sidebar__link" href=...>`.
    pub fn add_link(&self, href: &str) -> NodeId {
        self.insert(
            MemoryElement::new("a")
                .with_class("sidebar__link")
                .with_attribute("href", href),
        )
    }

    /// Add the toggle button, sidebar and overlay with their default ids.
    pub fn add_sidebar_chrome(&self) -> (NodeId, NodeId, NodeId) {
        (
            self.insert(MemoryElement::new("button").with_id("sidebar-toggle")),
            self.insert(MemoryElement::new("aside").with_id("sidebar")),
            self.insert(MemoryElement::new("div").with_id("sidebar-overlay")),
        )
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.doc.borrow().elements[node.0]
            .classes
            .iter()
            .cloned()
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.doc.borrow().listeners.len()
    }

    pub fn click(&self, node: NodeId) {
        self.dispatch(
            |source| matches!(source, EventSource::Click(target) if *target == node),
            HostEvent::Click,
        );
    }

    pub fn press_key(&self, key: &str) {
        self.dispatch(
            |source| matches!(source, EventSource::KeyDown),
            HostEvent::Key(key.to_string()),
        );
    }

    /// Change the viewport width, notifying media-query listeners whose
    /// match state flips.
    pub fn resize(&self, width: f64) {
        let old_width = {
            let mut doc = self.doc.borrow_mut();
            std::mem::replace(&mut doc.width, width)
        };
        let queries: Vec<String> = self
            .doc
            .borrow()
            .listeners
            .iter()
            .filter_map(|(source, _)| match source {
                EventSource::MediaChange(query) => Some(query.clone()),
                _ => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for query in queries {
            let Some(max_width) = parse_max_width(&query) else {
                continue;
            };
            let was = old_width <= max_width;
            let now = width <= max_width;
            if was != now {
                self.dispatch(
                    |source| matches!(source, EventSource::MediaChange(q) if *q == query),
                    HostEvent::MediaChange { matches: now },
                );
            }
        }
    }

    fn dispatch(&self, wants: impl Fn(&EventSource<NodeId>) -> bool, event: HostEvent) {
        // Listeners run without the document borrowed so they can call back
        // into the host.
        let mut listeners = std::mem::take(&mut self.doc.borrow_mut().listeners);
        for (source, listener) in listeners.iter_mut() {
            if wants(source) {
                listener(event.clone());
            }
        }
        let mut doc = self.doc.borrow_mut();
        listeners.append(&mut doc.listeners);
        doc.listeners = listeners;
    }

    fn with_element<T>(&self, node: &NodeId, f: impl FnOnce(&mut MemoryElement) -> T) -> T {
        f(&mut self.doc.borrow_mut().elements[node.0])
    }
}

/// Supports the one media feature the controller uses: `(max-width: Npx)`.
fn parse_max_width(query: &str) -> Option<f64> {
    let inner = query.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (feature, value) = inner.split_once(':')?;
    if feature.trim() != "max-width" {
        return None;
    }
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

fn selector_matches(selector: &str, element: &MemoryElement) -> bool {
    if let Some(class) = selector.strip_prefix('.') {
        element.classes.contains(class)
    } else if let Some(id) = selector.strip_prefix('#') {
        element.id.as_deref() == Some(id)
    } else {
        element.tag == selector
    }
}

fn is_simple_selector(selector: &str) -> bool {
    let body = selector
        .strip_prefix('.')
        .or_else(|| selector.strip_prefix('#'))
        .unwrap_or(selector);
    !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl Host for MemoryHost {
    type Element = NodeId;

    fn location_path(&self) -> NavResult<String> {
        Ok(self.doc.borrow().path.clone())
    }

    fn viewport_width(&self) -> NavResult<f64> {
        Ok(self.doc.borrow().width)
    }

    fn query_all(&self, selector: &str) -> NavResult<Vec<NodeId>> {
        let selector = selector.trim();
        if !is_simple_selector(selector) {
            return Err(NavError::InvalidSelector(selector.to_string()));
        }
        Ok(self
            .doc
            .borrow()
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| selector_matches(selector, element))
            .map(|(index, _)| NodeId(index))
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.doc
            .borrow()
            .elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_element(element, |el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> NavResult<()> {
        self.with_element(element, |el| {
            el.attributes.insert(name.to_string(), value.to_string())
        });
        Ok(())
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) -> NavResult<()> {
        self.with_element(element, |el| el.attributes.remove(name));
        Ok(())
    }

    fn add_class(&self, element: &NodeId, class: &str) -> NavResult<()> {
        self.with_element(element, |el| el.classes.insert(class.to_string()));
        Ok(())
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> NavResult<()> {
        self.with_element(element, |el| el.classes.remove(class));
        Ok(())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.with_element(element, |el| el.classes.contains(class))
    }

    fn listen(&self, source: EventSource<NodeId>, listener: Listener) -> NavResult<()> {
        if let EventSource::MediaChange(query) = &source {
            if parse_max_width(query).is_none() {
                return Err(NavError::InvalidSelector(query.clone()));
            }
        }
        self.doc.borrow_mut().listeners.push((source, listener));
        Ok(())
    }
}
