//! Flat-file export of tabular page data.
//!
//! Tables arrive as a list of JSON objects. The header is taken from the keys
//! of the first record and every record is written in that key order; keys a
//! record lacks become empty cells.

use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    /// Tab-separated sheet that spreadsheet applications open directly
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Excel => "application/vnd.ms-excel;charset=utf-8;",
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Excel => b'\t',
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Excel),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),
    #[error("export has {count} records, the limit is {limit}")]
    TooManyRecords { count: usize, limit: usize },
    #[error("export data must be an array of objects (item {index} is not an object)")]
    InvalidRecord { index: usize },
    #[error("export data must be an array of objects")]
    NotATable,
    #[error("failed to write export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer")]
    Flush,
}

/// A finished export, ready to be offered as a download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Turn a JSON array of objects into records
pub fn records_from_json(data: Value) -> Result<Vec<Record>, ExportError> {
    let Value::Array(items) = data else {
        return Err(ExportError::NotATable);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ExportError::InvalidRecord { index }),
        })
        .collect()
}

/// Serialize `records` in `format`. The file is named after `now_ms`.
pub fn export_table(
    format: ExportFormat,
    records: &[Record],
    max_records: usize,
    now_ms: i64,
) -> Result<ExportFile, ExportError> {
    if records.len() > max_records {
        return Err(ExportError::TooManyRecords {
            count: records.len(),
            limit: max_records,
        });
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if let Some(first) = records.first() {
        let header: Vec<&str> = first.keys().map(String::as_str).collect();
        writer.write_record(&header)?;

        for record in records {
            let row: Vec<String> = header
                .iter()
                .map(|key| record.get(*key).map(cell_text).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }
    }

    let bytes = writer.into_inner().map_err(|_| ExportError::Flush)?;
    info!("exported {} records as {:?}", records.len(), format);

    Ok(ExportFile {
        file_name: format!("export_{}.{}", now_ms, format.extension()),
        mime_type: format.mime_type(),
        bytes,
    })
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => nested.to_string(),
    }
}
