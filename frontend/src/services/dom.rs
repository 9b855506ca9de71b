//! Thin adapters between page elements and the pure logic in `shared`.

use anyhow::{anyhow, Result};
use shared::presenter::FEEDBACK_CLASS;
use shared::{Field, FieldAnnotations, RowVisibility};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList};

pub fn js_error(err: JsValue) -> anyhow::Error {
    match err.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{:?}", err),
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements in the document matching `selector`
pub fn query_document(selector: &str) -> Result<Vec<Element>> {
    let list = gloo::utils::document()
        .query_selector_all(selector)
        .map_err(js_error)?;
    Ok(elements(list))
}

/// All descendants of `root` matching `selector`
pub fn query_within(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let list = root.query_selector_all(selector).map_err(js_error)?;
    Ok(elements(list))
}

/// Snapshot a form control as a `Field`. Returns `None` for elements that
/// carry no value. Disabled (directly or through a fieldset) and read-only
/// controls come back barred.
pub fn read_field(element: &Element) -> Option<Field> {
    let value = control_value(element)?;
    let type_attr = match element.dyn_ref::<HtmlInputElement>() {
        Some(input) => input.type_(),
        None => element.local_name(),
    };

    let mut field = Field::from_attributes(
        &type_attr,
        element.has_attribute("required"),
        value,
        element.get_attribute("min").as_deref(),
        element.get_attribute("max").as_deref(),
    );
    if element.matches(":disabled").unwrap_or(false) || element.has_attribute("readonly") {
        field.barred = true;
    }
    Some(field)
}

/// Current value of an input, select or textarea
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        Some(select.value())
    } else {
        element.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
    }
}

/// A form control whose verdict is shown through classes and a feedback
/// element placed right after it.
pub struct FieldNode(pub Element);

impl FieldAnnotations for FieldNode {
    fn add_class(&mut self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&mut self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn attach_feedback(&mut self, message: &str) {
        let Some(document) = self.0.owner_document() else {
            return;
        };
        let Ok(feedback) = document.create_element("div") else {
            return;
        };
        feedback.set_class_name(FEEDBACK_CLASS);
        feedback.set_text_content(Some(message));
        let _ = self.0.after_with_node_1(&feedback);
    }

    fn detach_feedback(&mut self) {
        if let Some(next) = self.0.next_element_sibling() {
            if next.class_list().contains(FEEDBACK_CLASS) {
                next.remove();
            }
        }
    }
}

/// A table row shown or hidden through its inline `display` style
pub struct TableRow(pub HtmlElement);

impl RowVisibility for TableRow {
    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_visible(&mut self, visible: bool) {
        let style = self.0.style();
        let _ = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
    }
}
