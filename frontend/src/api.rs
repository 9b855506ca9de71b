use std::rc::Rc;

use anyhow::{anyhow, Result};
use shared::{export_table, records_from_json, BehaviorConfig, ExportFormat, Severity};
use wasm_bindgen::prelude::*;

use crate::behaviors::alerts::PageAlerts;
use crate::services::currency::CurrencyFormatter;
use crate::services::dom::js_error;
use crate::services::download;
use crate::services::logging::Logger;

/// Functions page scripts may call, handed out by `attach()`
#[wasm_bindgen]
#[derive(Clone)]
pub struct PageApi {
    alerts: Rc<PageAlerts>,
    currency: Rc<CurrencyFormatter>,
    config: Rc<BehaviorConfig>,
}

impl PageApi {
    pub fn new(alerts: Rc<PageAlerts>, currency: Rc<CurrencyFormatter>, config: Rc<BehaviorConfig>) -> Self {
        Self {
            alerts,
            currency,
            config,
        }
    }

    /// Serialize `data` (an array of plain objects) and offer it as a download
    pub fn export(&self, format: &str, data: &JsValue) -> Result<()> {
        let format: ExportFormat = format.parse()?;
        let json = js_sys::JSON::stringify(data)
            .map_err(js_error)?
            .as_string()
            .ok_or_else(|| anyhow!("export data is not serializable"))?;
        let records = records_from_json(serde_json::from_str(&json)?)?;
        let file = export_table(
            format,
            &records,
            self.config.max_export_records,
            js_sys::Date::now() as i64,
        )?;
        download::offer(&file)?;
        Logger::info_with_component("export", &format!("offered {}", file.file_name));
        Ok(())
    }
}

#[wasm_bindgen]
impl PageApi {
    /// Ask a yes/no question; `callback` runs only on yes.
    #[wasm_bindgen(js_name = showConfirmDialog)]
    pub fn show_confirm_dialog(&self, message: &str, callback: &js_sys::Function) -> Result<(), JsValue> {
        if gloo::dialogs::confirm(message) {
            callback.call0(&JsValue::NULL)?;
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = showSuccessMessage)]
    pub fn show_success_message(&self, message: &str) {
        self.alerts.show(message, Severity::Success);
    }

    #[wasm_bindgen(js_name = showErrorMessage)]
    pub fn show_error_message(&self, message: &str) {
        self.alerts.show(message, Severity::Danger);
    }

    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    /// `format` is "csv" or "excel"; anything else is rejected with an error.
    #[wasm_bindgen(js_name = exportData)]
    pub fn export_data(&self, format: &str, data: JsValue) -> Result<(), JsError> {
        self.export(format, &data).map_err(|err| {
            Logger::error_with_component("export", &format!("{:#}", err));
            JsError::new(&format!("{:#}", err))
        })
    }

    #[wasm_bindgen(js_name = printPage)]
    pub fn print_page(&self) -> Result<(), JsValue> {
        gloo::utils::window().print()
    }
}
