//! Bridge to the page's component library (Bootstrap). Its widgets are only
//! created and hidden from here; a page without the library loses the
//! tooltips and Escape handling and nothing else.

use anyhow::Result;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

use crate::services::dom;
use crate::services::logging::Logger;

const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";
const OPEN_MODAL_SELECTOR: &str = ".modal.show";

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    type Tooltip;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;

    type Modal;

    #[wasm_bindgen(static_method_of = Modal, js_name = getInstance, catch)]
    fn get_instance(element: &Element) -> Result<Option<Modal>, JsValue>;

    #[wasm_bindgen(method)]
    fn hide(this: &Modal);
}

pub fn init_tooltips() -> Result<()> {
    let triggers = dom::query_document(TOOLTIP_SELECTOR)?;
    let mut created = 0;
    for trigger in &triggers {
        match Tooltip::new(trigger) {
            Ok(_) => created += 1,
            Err(err) => {
                Logger::debug_with_component("widgets", &format!("tooltip unavailable: {:?}", err));
                break;
            }
        }
    }
    Logger::debug_with_component("widgets", &format!("{}/{} tooltips created", created, triggers.len()));
    Ok(())
}

/// Hide every open modal
pub fn close_open_modals() -> Result<usize> {
    let mut closed = 0;
    for modal in dom::query_document(OPEN_MODAL_SELECTOR)? {
        match Modal::get_instance(&modal) {
            Ok(Some(instance)) => {
                instance.hide();
                closed += 1;
            }
            Ok(None) => {}
            Err(err) => {
                Logger::debug_with_component("widgets", &format!("modal unavailable: {:?}", err));
                break;
            }
        }
    }
    Ok(closed)
}

/// Close open modals when Escape is pressed anywhere on the page
pub fn install_escape_closes_modals() {
    EventListener::new(&gloo::utils::document(), "keydown", |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .map(|key| key.key() == "Escape")
            .unwrap_or(false);
        if !escape {
            return;
        }
        if let Err(err) = close_open_modals() {
            Logger::warn_with_component("widgets", &format!("closing modals failed: {:#}", err));
        }
    })
    .forget();
}
