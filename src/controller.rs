//! Navigation controller: active link highlighting and sidebar ownership.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::NavConfig;
use crate::error::NavResult;
use crate::host::{EventSource, Host, HostEvent, Listener};
use crate::links::{select_active, NavLink};
use crate::sidebar::{transition, Effect, NavEvent, SidebarState, Transition};

pub type SharedController<H> = Rc<RefCell<NavController<H>>>;

/// Which listeners `mount` attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wiring {
    pub toggle: bool,
    pub overlay: bool,
    pub links: usize,
}

pub struct NavController<H: Host> {
    host: H,
    config: NavConfig,
    links: Vec<NavLink<H::Element>>,
    toggle: Option<H::Element>,
    sidebar: Option<H::Element>,
    overlay: Option<H::Element>,
    state: SidebarState,
}

impl<H: Host> NavController<H> {
    /// Collect the page elements named by `config`. Missing optional
    /// elements are recorded as absent, not reported as errors.
    pub fn new(host: H, config: NavConfig) -> NavResult<Self> {
        config.validate()?;

        let links = host
            .query_all(&config.link_selector)?
            .into_iter()
            .map(|element| {
                let target = host.attribute(&element, "href");
                NavLink::new(element, target)
            })
            .collect::<Vec<_>>();

        let lookup = |role: &str, id: &str| {
            let element = host.element_by_id(id);
            if element.is_none() {
                log::debug!("No {} element with id '{}', its behaviour is disabled", role, id);
            }
            element
        };
        let toggle = lookup("toggle", &config.toggle_id);
        let sidebar = lookup("sidebar", &config.sidebar_id);
        let overlay = lookup("overlay", &config.overlay_id);

        Ok(Self {
            host,
            config,
            links,
            toggle,
            sidebar,
            overlay,
            state: SidebarState::Closed,
        })
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn links(&self) -> &[NavLink<H::Element>] {
        &self.links
    }

    /// Mark the link(s) matching the current location. Returns how many are active.
    pub fn highlight_active_link(&mut self) -> NavResult<usize> {
        let path = self.host.location_path()?;
        let selected = select_active(&self.links, &path, self.config.active_match);

        for (index, link) in self.links.iter_mut().enumerate() {
            let active = selected.contains(&index);
            // The attribute goes first so a rejected write leaves the link unmarked.
            if active {
                self.host.set_attribute(
                    &link.element,
                    &self.config.current_attribute,
                    &self.config.current_value,
                )?;
                self.host.add_class(&link.element, &self.config.active_class)?;
                link.active = true;
            } else if link.active {
                self.host.remove_class(&link.element, &self.config.active_class)?;
                self.host.remove_attribute(&link.element, &self.config.current_attribute)?;
                link.active = false;
            }
        }

        log::debug!("Highlighted {} link(s) for path '{}'", selected.len(), path);
        Ok(selected.len())
    }

    pub fn open(&mut self) -> NavResult<()> {
        self.state = SidebarState::Open;
        self.paint(Effect::ShowOpen)
    }

    pub fn close(&mut self) -> NavResult<()> {
        self.state = SidebarState::Closed;
        self.paint(Effect::ShowClosed)
    }

    pub fn toggle(&mut self) -> NavResult<()> {
        self.handle(NavEvent::ToggleClicked).map(|_| ())
    }

    /// Run one event through the state machine and update the page.
    pub fn handle(&mut self, event: NavEvent) -> NavResult<Transition> {
        let step = transition(self.state, &event, &self.config);
        if step.changed(self.state) {
            log::debug!("Sidebar {:?} -> {:?} on {:?}", self.state, step.next, event);
        }
        self.state = step.next;
        self.paint(step.effect)?;
        Ok(step)
    }

    /// Apply or clear the open/visible markers on every element present.
    fn paint(&self, effect: Effect) -> NavResult<()> {
        let show = match effect {
            Effect::None => return Ok(()),
            Effect::ShowOpen => true,
            Effect::ShowClosed => false,
        };
        let targets = [
            (&self.toggle, &self.config.open_class),
            (&self.sidebar, &self.config.open_class),
            (&self.overlay, &self.config.visible_class),
        ];
        for (element, class) in targets {
            let Some(element) = element else {
                continue;
            };
            if show {
                self.host.add_class(element, class)?;
            } else {
                self.host.remove_class(element, class)?;
            }
        }
        Ok(())
    }
}

impl<H: Host + 'static> NavController<H> {
    /// Build the controller, highlight the active link and attach every
    /// listener whose element exists. A failed highlight is logged and does
    /// not stop the sidebar from being wired.
    pub fn mount(host: H, config: NavConfig) -> NavResult<(SharedController<H>, Wiring)> {
        let mut controller = NavController::new(host, config)?;
        if let Err(err) = controller.highlight_active_link() {
            log::warn!("Active link not highlighted: {}", err);
        }

        let shared = Rc::new(RefCell::new(controller));
        let wiring = Self::attach(&shared)?;
        log::info!(
            "Navigation mounted: {} link(s), toggle={}, overlay={}",
            wiring.links,
            wiring.toggle,
            wiring.overlay
        );
        Ok((shared, wiring))
    }

    fn attach(shared: &SharedController<H>) -> NavResult<Wiring> {
        let controller = shared.borrow();
        let host = &controller.host;
        let mut wiring = Wiring::default();

        if let Some(toggle) = controller.toggle.clone() {
            host.listen(
                EventSource::Click(toggle),
                dispatcher(shared, |_, _| Ok(Some(NavEvent::ToggleClicked))),
            )?;
            wiring.toggle = true;
        }

        if let Some(overlay) = controller.overlay.clone() {
            host.listen(
                EventSource::Click(overlay),
                dispatcher(shared, |_, _| Ok(Some(NavEvent::OverlayClicked))),
            )?;
            wiring.overlay = true;
        }

        host.listen(
            EventSource::KeyDown,
            dispatcher(shared, |_, event| {
                Ok(match event {
                    HostEvent::Key(key) => Some(NavEvent::KeyPressed(key)),
                    _ => None,
                })
            }),
        )?;

        for link in &controller.links {
            host.listen(
                EventSource::Click(link.element.clone()),
                dispatcher(shared, |controller, _| {
                    let viewport_width = controller.host.viewport_width()?;
                    Ok(Some(NavEvent::LinkClicked { viewport_width }))
                }),
            )?;
            wiring.links += 1;
        }

        host.listen(
            EventSource::MediaChange(controller.config.mobile_media_query()),
            dispatcher(shared, |_, event| {
                Ok(match event {
                    HostEvent::MediaChange { matches } => {
                        Some(NavEvent::BreakpointChanged { mobile: matches })
                    }
                    _ => None,
                })
            }),
        )?;

        Ok(wiring)
    }
}

/// Wrap a host-event translator into a listener that drives the controller.
/// The listener holds only a weak reference, so it never keeps the
/// controller alive by itself.
fn dispatcher<H, F>(shared: &SharedController<H>, translate: F) -> Listener
where
    H: Host + 'static,
    F: Fn(&NavController<H>, HostEvent) -> NavResult<Option<NavEvent>> + 'static,
{
    let weak = Rc::downgrade(shared);
    Box::new(move |host_event: HostEvent| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut controller) = shared.try_borrow_mut() else {
            log::warn!("Navigation event dropped: controller busy");
            return;
        };
        let result = translate(&*controller, host_event).and_then(|event| match event {
            Some(event) => controller.handle(event).map(|_| ()),
            None => Ok(()),
        });
        if let Err(err) = result {
            log::warn!("Navigation event failed: {}", err);
        }
    })
}
