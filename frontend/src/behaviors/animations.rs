use anyhow::Result;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::services::dom;

/// Fade cards in one after another, `stagger_secs` apart
pub fn stagger_cards(stagger_secs: f64) -> Result<()> {
    for (index, card) in dom::query_document(".card")?.into_iter().enumerate() {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let delay = format!("{:.3}s", index as f64 * stagger_secs);
        let _ = card.style().set_property("animation-delay", &delay);
        let _ = card.class_list().add_1("fade-in");
    }
    Ok(())
}

/// Briefly mark buttons as clicked
pub fn install_button_feedback(duration_ms: u32) -> Result<()> {
    for button in dom::query_document(".btn")? {
        let target = button.clone();
        EventListener::new(&button, "click", move |_| {
            let _ = target.class_list().add_1("btn-clicked");
            let target = target.clone();
            Timeout::new(duration_ms, move || {
                let _ = target.class_list().remove_1("btn-clicked");
            })
            .forget();
        })
        .forget();
    }
    Ok(())
}
