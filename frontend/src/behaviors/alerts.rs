use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use shared::{Alert, AlertBroadcaster, AlertId, AlertRegion};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::services::logging::Logger;
use crate::services::timers::BrowserScheduler;

/// Container alerts are stacked into
pub const REGION_SELECTOR: &str = "main .container-fluid";
const ALERT_ID_ATTR: &str = "data-alert-id";

pub type PageAlerts = AlertBroadcaster<BrowserScheduler, DomAlertRegion>;

enum Container {
    Fixed(Element),
    /// Looked up on every alert, so a region rendered late still gets them
    Lookup(String),
    Absent,
}

/// Alert stack rendered at the top of a page container
pub struct DomAlertRegion {
    container: Container,
}

impl DomAlertRegion {
    pub fn new(container: Option<Element>) -> Self {
        let container = match container {
            Some(element) => Container::Fixed(element),
            None => Container::Absent,
        };
        Self { container }
    }

    /// Region resolved from `selector` each time an alert is shown
    pub fn lookup(selector: &str) -> Self {
        Self {
            container: Container::Lookup(selector.to_string()),
        }
    }

    fn current(&self) -> Option<Element> {
        match &self.container {
            Container::Fixed(element) => Some(element.clone()),
            Container::Lookup(selector) => gloo::utils::document().query_selector(selector).ok().flatten(),
            Container::Absent => None,
        }
    }

    fn find(&self, id: AlertId) -> Option<Element> {
        let selector = format!("[{}=\"{}\"]", ALERT_ID_ATTR, id.0);
        match &self.container {
            Container::Fixed(element) => element.query_selector(&selector).ok().flatten(),
            // The region may have been replaced since the alert went in.
            Container::Lookup(_) => self
                .current()
                .and_then(|region| region.query_selector(&selector).ok().flatten())
                .or_else(|| gloo::utils::document().query_selector(&selector).ok().flatten()),
            Container::Absent => None,
        }
    }

    fn render(container: &Element, alert: &Alert) -> Option<Element> {
        let document = container.owner_document()?;
        let node = document.create_element("div").ok()?;
        node.set_class_name(&format!(
            "alert alert-{} alert-dismissible fade show",
            alert.severity.as_str()
        ));
        node.set_attribute("role", "alert").ok()?;
        node.set_attribute(ALERT_ID_ATTR, &alert.id.0.to_string()).ok()?;
        node.append_with_str_1(&alert.message).ok()?;

        let close = document.create_element("button").ok()?;
        close.set_attribute("type", "button").ok()?;
        close.set_class_name("btn-close");
        close.set_attribute("aria-label", "Close").ok()?;
        node.append_child(&close).ok()?;
        Some(node)
    }
}

impl AlertRegion for DomAlertRegion {
    fn insert_top(&mut self, alert: &Alert) -> bool {
        let Some(container) = self.current() else {
            Logger::debug_with_component("alerts", "no alert region on this page");
            return false;
        };
        let Some(node) = Self::render(&container, alert) else {
            return false;
        };
        container
            .insert_before(&node, container.first_child().as_ref())
            .is_ok()
    }

    fn remove(&mut self, id: AlertId) -> bool {
        match self.find(id) {
            Some(node) => {
                node.remove();
                true
            }
            None => false,
        }
    }
}

/// Wire the alert stack to the page's region, with close buttons routed
/// through `dismiss` so the expiry timer is cancelled along with the node.
pub fn install(ttl_ms: u32) -> Rc<PageAlerts> {
    let alerts = Rc::new(AlertBroadcaster::new(
        BrowserScheduler,
        DomAlertRegion::lookup(REGION_SELECTOR),
        ttl_ms,
    ));

    let weak: Weak<PageAlerts> = Rc::downgrade(&alerts);
    EventListener::new(&gloo::utils::document(), "click", move |event| {
        let Some(alerts) = weak.upgrade() else {
            return;
        };
        let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
            return;
        };
        if !target.class_list().contains("btn-close") {
            return;
        }
        let id = target
            .closest(&format!("[{}]", ALERT_ID_ATTR))
            .ok()
            .flatten()
            .and_then(|node| node.get_attribute(ALERT_ID_ATTR))
            .and_then(|raw| raw.parse::<u64>().ok());
        if let Some(id) = id {
            alerts.dismiss(AlertId(id));
        }
    })
    .forget();

    alerts
}
