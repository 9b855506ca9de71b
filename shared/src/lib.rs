//! Target-independent behavior logic for the ledger web pages.
//!
//! Everything in this crate is free of DOM access: decisions (field
//! validation, row matching, submit gating) are plain functions, and the
//! stateful pieces (debouncing, alert lifetimes) run against the
//! [`timer::Scheduler`] trait so they can be driven by a browser timer or by
//! a virtual clock in tests.

pub mod alerts;
pub mod config;
pub mod export;
pub mod field;
pub mod form;
pub mod live_filter;
pub mod presenter;
pub mod timer;

pub use alerts::{Alert, AlertBroadcaster, AlertId, AlertRegion, Severity};
pub use config::{BehaviorConfig, ConfigError, CurrencyConfig};
pub use export::{export_table, records_from_json, ExportError, ExportFile, ExportFormat, Record};
pub use field::{sanitize_numeric_input, validate, Field, FieldKind, Verdict};
pub use form::{Form, SubmitDecision};
pub use live_filter::{filter, row_matches, Row, RowVisibility, SearchSession};
pub use presenter::{present, FieldAnnotations};
pub use timer::{Debouncer, ManualScheduler, Scheduler, TimerHandle};
