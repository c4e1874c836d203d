//! Active link detection

use crate::config::ActiveMatch;

/// A sidebar link discovered at mount time.
#[derive(Debug, Clone)]
pub struct NavLink<E> {
    pub element: E,
    /// Value of the `href` attribute, if the element has one.
    pub target: Option<String>,
    pub active: bool,
}

impl<E> NavLink<E> {
    pub fn new(element: E, target: Option<String>) -> Self {
        Self {
            element,
            target,
            active: false,
        }
    }

    pub fn matches(&self, current_path: &str) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| path_matches(current_path, target))
    }
}

/// A link target matches when it equals the current path or is a suffix of it.
///
/// The suffix rule lets a site deployed under a base path (`/docs/blog/`)
/// still highlight `/blog/`. It is imprecise: `/about/` also matches the
/// unrelated `/team/about/`, a target without a leading slash such as `blog/`
/// matches `/my-blog/`, and `/` matches every path ending in a slash. An empty
/// target matches everything.
pub fn path_matches(current_path: &str, target: &str) -> bool {
    current_path == target || current_path.ends_with(target)
}

/// Indices of the links that should be marked active for `current_path`.
pub fn select_active<E>(
    links: &[NavLink<E>],
    current_path: &str,
    policy: ActiveMatch,
) -> Vec<usize> {
    let matching = links
        .iter()
        .enumerate()
        .filter(|(_, link)| link.matches(current_path))
        .map(|(index, _)| index);

    match policy {
        ActiveMatch::First => matching.take(1).collect(),
        ActiveMatch::All => matching.collect(),
    }
}
