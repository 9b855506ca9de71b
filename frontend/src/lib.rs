//! Browser behaviors for the ledger's server-rendered pages.
//!
//! The page loads the generated module and calls `attach()` once the document
//! is parsed (module scripts run deferred). Every behavior is wired from there
//! and the returned `PageApi` is what page scripts call into.

mod api;
mod behaviors;
mod services;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use wasm_bindgen::prelude::*;

pub use api::PageApi;
use behaviors::{alerts, animations, clock, form_validation, live_search, number_formatting, widgets};
use services::config;
use services::currency::CurrencyFormatter;
use services::logging::{self, Logger};

thread_local! {
    static ATTACHED: RefCell<Option<PageApi>> = RefCell::new(None);
}

/// Wire every behavior onto the current page. Calling it again returns the
/// API of the first call without wiring anything twice.
#[wasm_bindgen]
pub fn attach() -> PageApi {
    if let Some(api) = ATTACHED.with(|attached| attached.borrow().clone()) {
        return api;
    }

    let api = wire_page();
    ATTACHED.with(|attached| *attached.borrow_mut() = Some(api.clone()));
    api
}

fn wire_page() -> PageApi {
    let config = Rc::new(config::load());
    logging::init(&config.log_level);

    let currency = Rc::new(CurrencyFormatter::new(&config.currency));
    let alerts = alerts::install(config.alert_ttl_ms);

    step("tooltips", widgets::init_tooltips);
    widgets::install_escape_closes_modals();
    step("form validation", form_validation::install);
    step("live search", || live_search::install(config.search_debounce_ms));
    step("number inputs", number_formatting::install_input_cleanup);
    step("amount cells", || number_formatting::format_amount_cells(&currency).map(|_| ()));
    step("cards", || animations::stagger_cards(config.card_stagger_secs));
    step("buttons", || animations::install_button_feedback(config.button_click_ms));
    clock::install(currency.locale().to_string(), config.clock_refresh_ms);

    Logger::info_with_component("bootstrap", "page behaviors attached");
    PageApi::new(alerts, currency, config)
}

/// Run one wiring step; a failing step is reported and the rest still run.
fn step(name: &str, run: impl FnOnce() -> Result<()>) {
    if let Err(err) = run() {
        Logger::error_with_component("bootstrap", &format!("{} failed: {:#}", name, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_attach_is_idempotent() {
        let document = gloo::utils::document();
        let host = document.create_element("div").unwrap();
        host.set_inner_html(
            r#"<form class="needs-validation"><input name="memo" required></form>
               <span class="current-time"></span>"#,
        );
        document.body().unwrap().append_child(&host).unwrap();

        let first = attach();
        let second = attach();
        assert_eq!(first.format_currency(5.0), second.format_currency(5.0));

        let clock = host.query_selector(".current-time").unwrap().unwrap();
        assert!(!clock.text_content().unwrap_or_default().is_empty());
    }
}
