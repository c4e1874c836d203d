//! Sidebar open/close state machine.
//!
//! Transitions are pure: the controller feeds in an event, gets back the next
//! state plus the marker update to apply to the page, and performs the DOM
//! writes itself.

use crate::config::NavConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarState {
    #[default]
    Closed,
    Open,
}

impl SidebarState {
    pub fn is_open(self) -> bool {
        matches!(self, SidebarState::Open)
    }
}

/// Inputs the sidebar reacts to, already stripped of browser details.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    ToggleClicked,
    OverlayClicked,
    KeyPressed(String),
    /// A navigation link was clicked while the window had this width.
    LinkClicked { viewport_width: f64 },
    /// The mobile media query flipped; `mobile` is its new match state.
    BreakpointChanged { mobile: bool },
}

/// Marker update to apply to toggle, sidebar and overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ShowOpen,
    ShowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: SidebarState,
    pub effect: Effect,
}

impl Transition {
    fn stay(state: SidebarState) -> Self {
        Self {
            next: state,
            effect: Effect::None,
        }
    }

    fn open() -> Self {
        Self {
            next: SidebarState::Open,
            effect: Effect::ShowOpen,
        }
    }

    fn close() -> Self {
        Self {
            next: SidebarState::Closed,
            effect: Effect::ShowClosed,
        }
    }

    pub fn changed(&self, from: SidebarState) -> bool {
        self.next != from
    }
}

/// Compute the transition for `event` from `state`.
///
/// Link clicks on mobile and desktop-ward breakpoint crossings close
/// unconditionally, so they re-apply the closed markers even when already
/// closed; removing an absent class is harmless.
pub fn transition(state: SidebarState, event: &NavEvent, config: &NavConfig) -> Transition {
    match event {
        NavEvent::ToggleClicked => match state {
            SidebarState::Closed => Transition::open(),
            SidebarState::Open => Transition::close(),
        },
        NavEvent::OverlayClicked => Transition::close(),
        NavEvent::KeyPressed(key) if *key == config.close_key && state.is_open() => {
            Transition::close()
        }
        NavEvent::KeyPressed(_) => Transition::stay(state),
        NavEvent::LinkClicked { viewport_width } if config.is_mobile(*viewport_width) => {
            Transition::close()
        }
        NavEvent::LinkClicked { .. } => Transition::stay(state),
        NavEvent::BreakpointChanged { mobile: false } => Transition::close(),
        NavEvent::BreakpointChanged { mobile: true } => Transition::stay(state),
    }
}
