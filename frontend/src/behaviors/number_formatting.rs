use std::rc::Rc;

use anyhow::Result;
use gloo::events::EventListener;
use shared::sanitize_numeric_input;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::services::currency::CurrencyFormatter;
use crate::services::dom;

const NUMBER_INPUT_SELECTOR: &str = "input[type=\"number\"]";
const AMOUNT_CELL_SELECTOR: &str = ".format-number";

/// Strip stray characters from number inputs while typing
pub fn install_input_cleanup() -> Result<()> {
    for input in dom::query_document(NUMBER_INPUT_SELECTOR)? {
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let target = input.clone();
        EventListener::new(&input, "input", move |_| {
            if let Some(cleaned) = sanitize_numeric_input(&target.value()) {
                if cleaned != target.value() {
                    target.set_value(&cleaned);
                }
            }
        })
        .forget();
    }
    Ok(())
}

/// Render numeric `.format-number` cells as currency. Cells whose text is not
/// a number are left alone. Returns how many cells were rewritten.
pub fn format_amount_cells(currency: &Rc<CurrencyFormatter>) -> Result<usize> {
    let mut formatted = 0;
    for cell in dom::query_document(AMOUNT_CELL_SELECTOR)? {
        let amount = cell
            .text_content()
            .and_then(|text| text.trim().parse::<f64>().ok())
            .filter(|amount| amount.is_finite());
        if let Some(amount) = amount {
            cell.set_text_content(Some(&currency.format(amount)));
            formatted += 1;
        }
    }
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CurrencyConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_amount_cells() {
        let document = gloo::utils::document();
        let host = document.create_element("div").unwrap();
        host.set_inner_html(
            r#"<span class="format-number">1500</span><span class="format-number">n/a</span>"#,
        );
        document.body().unwrap().append_child(&host).unwrap();

        let currency = Rc::new(CurrencyFormatter::new(&CurrencyConfig {
            locale: "en-US".to_string(),
            currency: "USD".to_string(),
            minimum_fraction_digits: 2,
        }));
        assert!(format_amount_cells(&currency).unwrap() >= 1);

        let cells = dom::query_within(&host, ".format-number").unwrap();
        assert_eq!(cells[0].text_content().unwrap(), "$1,500.00");
        assert_eq!(cells[1].text_content().unwrap(), "n/a");
    }
}
