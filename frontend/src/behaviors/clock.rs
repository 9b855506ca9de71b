use gloo::timers::callback::Interval;
use wasm_bindgen::JsValue;

use crate::services::dom;

const CLOCK_SELECTOR: &str = ".current-time";

/// Write the current local time into every `.current-time` element
pub fn refresh(locale: &str) {
    let Ok(targets) = dom::query_document(CLOCK_SELECTOR) else {
        return;
    };
    if targets.is_empty() {
        return;
    }
    let now: String = js_sys::Date::new_0()
        .to_locale_string(locale, &JsValue::UNDEFINED)
        .into();
    for target in targets {
        target.set_text_content(Some(&now));
    }
}

/// Refresh page clocks now and then every `interval_ms`
pub fn install(locale: String, interval_ms: u32) {
    refresh(&locale);
    Interval::new(interval_ms, move || refresh(&locale)).forget();
}
