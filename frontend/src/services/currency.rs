use js_sys::{Array, Function, Intl, Object, Reflect};
use shared::CurrencyConfig;
use wasm_bindgen::{JsCast, JsValue};

use crate::services::logging::Logger;

/// Locale-aware currency display backed by `Intl.NumberFormat`
pub struct CurrencyFormatter {
    config: CurrencyConfig,
    format: Option<Intl::NumberFormat>,
}

impl CurrencyFormatter {
    /// Build a formatter for `config`. A locale or currency the browser rejects
    /// falls back to the default configuration.
    pub fn new(config: &CurrencyConfig) -> Self {
        match number_format(config) {
            Ok(format) => Self {
                config: config.clone(),
                format: Some(format),
            },
            Err(err) => {
                Logger::warn_with_component(
                    "currency",
                    &format!("{}/{} rejected ({:?}); using defaults", config.locale, config.currency, err),
                );
                let fallback = CurrencyConfig::default();
                let format = number_format(&fallback).ok();
                Self {
                    config: fallback,
                    format,
                }
            }
        }
    }

    /// Locale actually in use
    pub fn locale(&self) -> &str {
        &self.config.locale
    }

    pub fn format(&self, amount: f64) -> String {
        self.format
            .as_ref()
            .and_then(|format| {
                format
                    .format()
                    .call1(&JsValue::NULL, &JsValue::from_f64(amount))
                    .ok()
            })
            .and_then(|formatted| formatted.as_string())
            .unwrap_or_else(|| {
                format!(
                    "{:.*} {}",
                    usize::from(self.config.minimum_fraction_digits),
                    amount,
                    self.config.currency
                )
            })
    }
}

fn number_format(config: &CurrencyConfig) -> Result<Intl::NumberFormat, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"style".into(), &"currency".into())?;
    Reflect::set(&options, &"currency".into(), &config.currency.as_str().into())?;
    Reflect::set(
        &options,
        &"minimumFractionDigits".into(),
        &JsValue::from(u32::from(config.minimum_fraction_digits)),
    )?;

    // Constructed through Reflect so a RangeError comes back as Err instead of trapping.
    let intl = Reflect::get(&js_sys::global(), &"Intl".into())?;
    let constructor: Function = Reflect::get(&intl, &"NumberFormat".into())?.dyn_into()?;
    let args = Array::of2(&config.locale.as_str().into(), &options);
    Ok(Reflect::construct(&constructor, &args)?.unchecked_into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_formats_with_fraction_digits() {
        let formatter = CurrencyFormatter::new(&CurrencyConfig {
            locale: "en-US".to_string(),
            currency: "USD".to_string(),
            minimum_fraction_digits: 2,
        });
        assert_eq!(formatter.format(1234.5), "$1,234.50");
        assert_eq!(formatter.locale(), "en-US");
    }

    #[wasm_bindgen_test]
    fn test_rejected_currency_falls_back_to_defaults() {
        let formatter = CurrencyFormatter::new(&CurrencyConfig {
            locale: "en-US".to_string(),
            currency: "not-a-currency".to_string(),
            minimum_fraction_digits: 2,
        });
        assert_eq!(formatter.locale(), "ar-SY");
        assert!(!formatter.format(10.0).is_empty());
    }
}
