//! Page contract: which elements the controller looks for and which
//! classes/attributes it toggles on them.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{NavError, NavResult};

/// How many links may be marked active when several targets match the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveMatch {
    /// Only the first matching link, in document order.
    #[default]
    First,
    /// Every matching link.
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    pub link_selector: String,
    pub toggle_id: String,
    pub sidebar_id: String,
    pub overlay_id: String,
    pub active_class: String,
    pub open_class: String,
    pub visible_class: String,
    pub current_attribute: String,
    pub current_value: String,
    pub close_key: String,
    /// Widest viewport (in CSS pixels) still treated as mobile.
    pub mobile_breakpoint: u32,
    pub active_match: ActiveMatch,
    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            link_selector: ".sidebar__link".to_string(),
            toggle_id: "sidebar-toggle".to_string(),
            sidebar_id: "sidebar".to_string(),
            overlay_id: "sidebar-overlay".to_string(),
            active_class: "active".to_string(),
            open_class: "open".to_string(),
            visible_class: "visible".to_string(),
            current_attribute: "aria-current".to_string(),
            current_value: "page".to_string(),
            close_key: "Escape".to_string(),
            mobile_breakpoint: 768,
            active_match: ActiveMatch::First,
            log_level: "info".to_string(),
        }
    }
}

impl NavConfig {
    /// Parse a JSON object, filling missing fields with defaults, and validate it.
    pub fn from_json(json: &str) -> NavResult<Self> {
        let config: NavConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> NavResult<()> {
        let required = [
            ("linkSelector", &self.link_selector),
            ("toggleId", &self.toggle_id),
            ("sidebarId", &self.sidebar_id),
            ("overlayId", &self.overlay_id),
            ("activeClass", &self.active_class),
            ("openClass", &self.open_class),
            ("visibleClass", &self.visible_class),
            ("currentAttribute", &self.current_attribute),
            ("closeKey", &self.close_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(NavError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        for (name, value) in [
            ("activeClass", &self.active_class),
            ("openClass", &self.open_class),
            ("visibleClass", &self.visible_class),
        ] {
            if value.chars().any(char::is_whitespace) {
                return Err(NavError::InvalidConfig(format!(
                    "{} must be a single class name, got '{}'",
                    name, value
                )));
            }
        }
        if !is_attribute_name(&self.current_attribute) {
            return Err(NavError::InvalidConfig(format!(
                "currentAttribute '{}' is not a valid attribute name",
                self.current_attribute
            )));
        }
        if self.mobile_breakpoint == 0 {
            return Err(NavError::InvalidConfig(
                "mobileBreakpoint must be positive".to_string(),
            ));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> NavResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            NavError::InvalidConfig(format!("unknown log level '{}'", self.log_level))
        })
    }

    /// Media query that matches while the viewport is mobile-sized.
    pub fn mobile_media_query(&self) -> String {
        format!("(max-width: {}px)", self.mobile_breakpoint)
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= f64::from(self.mobile_breakpoint)
    }
}

/// Names `setAttribute` accepts: no whitespace, quotes, `>`, `/` or `=`, and
/// not starting with a digit, `-` or `.`.
fn is_attribute_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    let forbidden = |c: char| {
        c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=')
    };
    !(first.is_ascii_digit() || first == '-' || first == '.') && !name.chars().any(forbidden)
}
