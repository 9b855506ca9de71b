use anyhow::Result;
use gloo::events::{EventListener, EventListenerOptions};
use shared::presenter::SUBMITTED_CLASS;
use shared::{present, validate, Field, Form, Verdict};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement};

use crate::services::dom::{self, FieldNode};
use crate::services::logging::Logger;

pub const FORM_SELECTOR: &str = ".needs-validation";
const CONTROL_SELECTOR: &str = "input, select, textarea";
const BLUR_SELECTOR: &str = "input[required], select[required], textarea[required], \
     input[type=email], input[type=number], input[min], input[max]";

/// Validate one control and show the result on it. Disabled, read-only and
/// hidden controls are left untouched.
pub fn validate_element(element: &Element) -> Option<Verdict> {
    let field = dom::read_field(element)?;
    if field.barred {
        return None;
    }
    let verdict = validate(&field);
    present(&mut FieldNode(element.clone()), &verdict);
    Some(verdict)
}

fn constrained_controls(form: &HtmlFormElement) -> Vec<(Element, Field)> {
    dom::query_within(form, CONTROL_SELECTOR)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|element| {
            let field = dom::read_field(&element)?;
            field.is_constrained().then_some((element, field))
        })
        .collect()
}

/// Gate a form's submission on its fields' verdicts
pub fn attach_form(form: HtmlFormElement) {
    let gate = form.clone();
    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let controls = constrained_controls(&gate);
            let mut model = Form::new(controls.iter().map(|(_, field)| field.clone()).collect());
            let decision = model.attempt_submit(Some(gate.check_validity()));

            for ((element, _), verdict) in controls.iter().zip(&decision.verdicts) {
                present(&mut FieldNode(element.clone()), verdict);
            }

            if !decision.proceed {
                event.prevent_default();
                event.stop_propagation();
                Logger::debug_with_component("form-gate", "submission blocked by invalid fields");
            }
            if model.submitted {
                let _ = gate.class_list().add_1(SUBMITTED_CLASS);
            }
        },
    )
    .forget();
}

/// Install the submit gate on every `.needs-validation` form and early
/// feedback on blur for every constrained control.
pub fn install() -> Result<()> {
    let forms = dom::query_document(FORM_SELECTOR)?;
    let form_count = forms.len();
    for form in forms {
        if let Ok(form) = form.dyn_into::<HtmlFormElement>() {
            attach_form(form);
        }
    }

    let controls = dom::query_document(BLUR_SELECTOR)?;
    let control_count = controls.len();
    for control in controls {
        let target = control.clone();
        EventListener::new(&control, "blur", move |_| {
            validate_element(&target);
        })
        .forget();
    }

    Logger::debug_with_component(
        "form-gate",
        &format!("{} form(s), {} control(s) wired", form_count, control_count),
    );
    Ok(())
}
