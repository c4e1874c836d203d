use site_nav::prelude::*;

struct Page {
    host: MemoryHost,
    links: Vec<NodeId>,
    toggle: NodeId,
    sidebar: NodeId,
    overlay: NodeId,
}

impl Page {
    fn new(path: &str, width: f64, hrefs: &[&str]) -> Self {
        let host = MemoryHost::new(path, width);
        let links = hrefs.iter().map(|href| host.add_link(href)).collect();
        let (toggle, sidebar, overlay) = host.add_sidebar_chrome();
        Self {
            host,
            links,
            toggle,
            sidebar,
            overlay,
        }
    }

    fn mount(&self) -> (SharedController<MemoryHost>, Wiring) {
        NavController::mount(self.host.clone(), NavConfig::default()).unwrap()
    }

    /// Open/visible markers on toggle, sidebar, overlay.
    fn markers(&self) -> [bool; 3] {
        [
            self.host.has_class(&self.toggle, "open"),
            self.host.has_class(&self.sidebar, "open"),
            self.host.has_class(&self.overlay, "visible"),
        ]
    }

    fn assert_consistent<H: Host>(&self, nav: &SharedController<H>) {
        let open = nav.borrow().is_open();
        assert_eq!(self.markers(), [open; 3]);
    }
}

#[test]
fn test_mount_highlights_blog_post_scenario() {
    let page = Page::new("/blog/post-1/", 1024.0, &["/", "/blog/", "/about/"]);
    let (nav, wiring) = page.mount();

    assert!(page.host.has_class(&page.links[0], "active"));
    assert_eq!(
        page.host.attribute(&page.links[0], "aria-current").as_deref(),
        Some("page")
    );
    assert!(!page.host.has_class(&page.links[1], "active"));
    assert!(!page.host.has_class(&page.links[2], "active"));
    assert_eq!(nav.borrow().links().iter().filter(|l| l.active).count(), 1);
    assert_eq!(
        wiring,
        Wiring {
            toggle: true,
            overlay: true,
            links: 3,
        }
    );
}

#[test]
fn test_base_path_deployment_highlights_suffix() {
    let page = Page::new("/docs/about/", 1024.0, &["/blog/", "/about/"]);
    let _nav = page.mount();
    assert!(!page.host.has_class(&page.links[0], "active"));
    assert!(page.host.has_class(&page.links[1], "active"));
}

#[test]
fn test_suffix_rule_false_positive() {
    let page = Page::new("/team/about/", 1024.0, &["/blog/", "/about/"]);
    let _nav = page.mount();
    assert!(!page.host.has_class(&page.links[0], "active"));
    assert!(page.host.has_class(&page.links[1], "active"));

    // A leading slash on the target keeps a mere word suffix from matching.
    let page = Page::new("/my-blog/", 1024.0, &["/blog/", "blog/"]);
    let _nav = page.mount();
    assert!(!page.host.has_class(&page.links[0], "active"));
    assert!(page.host.has_class(&page.links[1], "active"));
}

#[test]
fn test_toggle_and_overlay_clicks() {
    let page = Page::new("/", 500.0, &["/"]);
    let (nav, _) = page.mount();
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    assert_eq!(page.markers(), [false, false, false]);

    page.host.click(page.toggle);
    assert!(nav.borrow().is_open());
    page.assert_consistent(&nav);

    page.host.click(page.toggle);
    assert!(!nav.borrow().is_open());
    page.assert_consistent(&nav);

    page.host.click(page.toggle);
    page.host.click(page.overlay);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    page.assert_consistent(&nav);
}

#[test]
fn test_escape_key() {
    let page = Page::new("/", 500.0, &[]);
    let (nav, _) = page.mount();

    page.host.press_key("Escape");
    assert_eq!(nav.borrow().state(), SidebarState::Closed);

    page.host.click(page.toggle);
    page.host.press_key("Enter");
    assert!(nav.borrow().is_open());

    page.host.press_key("Escape");
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    page.assert_consistent(&nav);
}

#[test]
fn test_link_click_closes_only_on_mobile() {
    let page = Page::new("/", 800.0, &["/", "/about/"]);
    let (nav, _) = page.mount();

    page.host.click(page.toggle);
    page.host.click(page.links[1]);
    assert!(nav.borrow().is_open());

    // Shrinking to mobile does not itself close the sidebar.
    page.host.resize(500.0);
    assert!(nav.borrow().is_open());

    page.host.click(page.links[1]);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    page.assert_consistent(&nav);
}

#[test]
fn test_leaving_mobile_forces_closed() {
    let page = Page::new("/", 500.0, &["/"]);
    let (nav, _) = page.mount();

    page.host.click(page.toggle);
    assert!(nav.borrow().is_open());

    page.host.resize(1024.0);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    page.assert_consistent(&nav);

    page.host.resize(600.0);
    page.host.resize(900.0);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
}

#[test]
fn test_missing_elements_disable_only_their_handlers() {
    let host = MemoryHost::new("/", 500.0);
    let link = host.add_link("/");
    let sidebar = host.insert(MemoryElement::new("aside").with_id("sidebar"));

    let (nav, wiring) = NavController::mount(host.clone(), NavConfig::default()).unwrap();
    assert!(!wiring.toggle);
    assert!(!wiring.overlay);
    assert_eq!(wiring.links, 1);
    // keydown, one link, media query
    assert_eq!(host.listener_count(), 3);

    nav.borrow_mut().open().unwrap();
    assert!(host.has_class(&sidebar, "open"));

    host.click(link);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
    assert!(!host.has_class(&sidebar, "open"));
}

#[test]
fn test_empty_page_mounts() {
    let host = MemoryHost::new("/", 1280.0);
    let (nav, wiring) = NavController::mount(host.clone(), NavConfig::default()).unwrap();
    assert_eq!(wiring.links, 0);
    host.press_key("Escape");
    host.resize(320.0);
    host.resize(1280.0);
    assert_eq!(nav.borrow().state(), SidebarState::Closed);
}

#[test]
fn test_custom_config_from_json() {
    let host = MemoryHost::new("/guides/", 640.0);
    let link = host.insert(
        MemoryElement::new("a")
            .with_class("menu-item")
            .with_attribute("href", "/guides/"),
    );
    let toggle = host.insert(MemoryElement::new("button").with_id("menu-button"));
    let panel = host.insert(MemoryElement::new("nav").with_id("menu"));

    let config = NavConfig::from_json(
        r#"{
            "linkSelector": ".menu-item",
            "toggleId": "menu-button",
            "sidebarId": "menu",
            "activeClass": "current",
            "openClass": "expanded",
            "mobileBreakpoint": 600
        }"#,
    )
    .unwrap();
    let (nav, _) = NavController::mount(host.clone(), config).unwrap();
    assert!(host.has_class(&link, "current"));

    host.click(toggle);
    assert!(host.has_class(&panel, "expanded"));

    // 640px is above the custom breakpoint, so following a link keeps it open.
    host.click(link);
    assert!(nav.borrow().is_open());
}

#[test]
fn test_dropped_controller_ignores_events() {
    let page = Page::new("/", 500.0, &["/"]);
    let (nav, _) = page.mount();
    drop(nav);
    page.host.click(page.toggle);
    assert_eq!(page.markers(), [false, false, false]);
}

/// Page whose `setAttribute` always throws, as a browser does for a name it
/// rejects.
#[derive(Clone)]
struct RejectingHost {
    page: MemoryHost,
}

impl Host for RejectingHost {
    type Element = NodeId;

    fn location_path(&self) -> NavResult<String> {
        self.page.location_path()
    }

    fn viewport_width(&self) -> NavResult<f64> {
        self.page.viewport_width()
    }

    fn query_all(&self, selector: &str) -> NavResult<Vec<NodeId>> {
        self.page.query_all(selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.page.element_by_id(id)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.page.attribute(element, name)
    }

    fn set_attribute(&self, _: &NodeId, name: &str, _: &str) -> NavResult<()> {
        Err(NavError::Js(format!("InvalidCharacterError: '{}'", name)))
    }

    fn remove_attribute(&self, element: &NodeId, name: &str) -> NavResult<()> {
        self.page.remove_attribute(element, name)
    }

    fn add_class(&self, element: &NodeId, class: &str) -> NavResult<()> {
        self.page.add_class(element, class)
    }

    fn remove_class(&self, element: &NodeId, class: &str) -> NavResult<()> {
        self.page.remove_class(element, class)
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.page.has_class(element, class)
    }

    fn listen(&self, source: EventSource<NodeId>, listener: Listener) -> NavResult<()> {
        self.page.listen(source, listener)
    }
}

#[test]
fn test_rejected_attribute_leaves_link_unmarked_and_sidebar_wired() {
    let page = Page::new("/about/", 500.0, &["/", "/about/"]);
    let host = RejectingHost {
        page: page.host.clone(),
    };

    let (nav, wiring) = NavController::mount(host, NavConfig::default()).unwrap();
    for link in &page.links {
        assert!(!page.host.has_class(link, "active"));
        assert_eq!(page.host.attribute(link, "aria-current"), None);
    }
    assert!(nav.borrow().links().iter().all(|link| !link.active));

    assert!(nav.borrow_mut().highlight_active_link().is_err());
    assert!(page.links.iter().all(|link| !page.host.has_class(link, "active")));

    assert!(wiring.toggle);
    assert_eq!(wiring.links, 2);
    page.host.click(page.toggle);
    assert!(nav.borrow().is_open());
    page.assert_consistent(&nav);
}

#[test]
fn test_invalid_attribute_name_rejected_before_mount() {
    let page = Page::new("/about/", 500.0, &["/about/"]);
    let result = NavConfig::from_json(r#"{"currentAttribute": "aria current"}"#);
    assert!(matches!(result, Err(NavError::InvalidConfig(_))));

    let config = NavConfig {
        current_attribute: "aria current".to_string(),
        ..NavConfig::default()
    };
    assert!(NavController::mount(page.host.clone(), config).is_err());
    assert!(!page.host.has_class(&page.links[0], "active"));
    assert_eq!(page.host.listener_count(), 0);
}
