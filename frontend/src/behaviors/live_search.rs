use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use gloo::events::EventListener;
use shared::{filter, SearchSession};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::services::dom::{self, TableRow};
use crate::services::logging::Logger;
use crate::services::timers::BrowserScheduler;

pub const SEARCH_SELECTOR: &str = ".live-search";
const ROW_SELECTOR: &str = "tbody tr";

/// Filter the rows of the table named by `selector`. A missing or broken
/// selector leaves the page untouched. Returns how many rows stay visible.
pub fn apply(selector: Option<&str>, term: &str) -> Option<usize> {
    let selector = selector.map(str::trim).filter(|selector| !selector.is_empty());
    let Some(selector) = selector else {
        Logger::debug_with_component("live-search", "search box has no data-target");
        return None;
    };

    let table = match gloo::utils::document().query_selector(selector) {
        Ok(Some(table)) => table,
        Ok(None) => {
            Logger::debug_with_component("live-search", &format!("no element matches {}", selector));
            return None;
        }
        Err(_) => {
            Logger::warn_with_component("live-search", &format!("invalid data-target selector {:?}", selector));
            return None;
        }
    };

    let mut rows: Vec<TableRow> = dom::query_within(&table, ROW_SELECTOR)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| row.dyn_into::<HtmlElement>().ok())
        .map(TableRow)
        .collect();
    let visible = filter(term, &mut rows);

    Logger::debug_with_component(
        "live-search",
        &format!("{:?}: {}/{} rows visible", term, visible, rows.len()),
    );
    Some(visible)
}

/// Debounce edits of a search control (input, select or textarea) and filter
/// its target table when they settle
pub fn attach(control: Element, delay_ms: u32) {
    let session = Rc::new(RefCell::new(SearchSession::new(BrowserScheduler, delay_ms)));
    let source = control.clone();

    EventListener::new(&control, "input", move |_| {
        let Some(term) = dom::control_value(&source) else {
            return;
        };
        let target = source.clone();
        session.borrow_mut().input(term, move |term| {
            apply(target.get_attribute("data-target").as_deref(), term);
        });
    })
    .forget();
}

pub fn install(delay_ms: u32) -> Result<()> {
    for control in dom::query_document(SEARCH_SELECTOR)? {
        if dom::control_value(&control).is_some() {
            attach(control, delay_ms);
        } else {
            Logger::debug_with_component(
                "live-search",
                &format!("<{}> cannot be a search box", control.local_name()),
            );
        }
    }
    Ok(())
}
