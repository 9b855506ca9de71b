use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// `\s` does not cover U+FEFF, which form controls treat as whitespace.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern compiles")
});

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const NUMBER_MESSAGE: &str = "Please enter a valid number";

/// Input type as declared by the `type` attribute
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    /// Any other input type (date, tel, select, textarea, ...)
    Other(String),
}

impl FieldKind {
    pub fn parse(type_attr: &str) -> Self {
        match type_attr.trim().to_ascii_lowercase().as_str() {
            "" | "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "number" => FieldKind::Number,
            other => FieldKind::Other(other.to_string()),
        }
    }
}

/// Logical view of one form control at the time it is validated
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Hidden, disabled or read-only controls take no part in validation
    pub barred: bool,
}

impl Field {
    pub fn new(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            required: false,
            value: value.into(),
            min: None,
            max: None,
            barred: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn barred(mut self) -> Self {
        self.barred = true;
        self
    }

    /// Build a field from raw attribute values.
    ///
    /// Bounds that do not parse as numbers are dropped, so the matching range
    /// rule never fires for them. `hidden` inputs are always barred.
    pub fn from_attributes(
        type_attr: &str,
        required: bool,
        value: impl Into<String>,
        min_attr: Option<&str>,
        max_attr: Option<&str>,
    ) -> Self {
        Self {
            kind: FieldKind::parse(type_attr),
            required,
            value: value.into(),
            min: min_attr.and_then(|raw| parse_bound("min", raw)),
            max: max_attr.and_then(|raw| parse_bound("max", raw)),
            barred: type_attr.trim().eq_ignore_ascii_case("hidden"),
        }
    }

    /// Whether any rule can apply to this field
    pub fn is_constrained(&self) -> bool {
        !self.barred
            && (self.required
                || self.min.is_some()
                || self.max.is_some()
                || matches!(self.kind, FieldKind::Email | FieldKind::Number))
    }
}

fn parse_bound(name: &str, raw: &str) -> Option<f64> {
    let parsed = parse_number(raw);
    if parsed.is_none() {
        debug!("ignoring non-numeric {} bound {:?}", name, raw);
    }
    parsed
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Validity of one field's value at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub valid: bool,
    /// Empty iff `valid`
    pub message: String,
}

impl Verdict {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Check a field against its declared constraints. The first failing rule
/// decides the message. Barred fields are always valid.
pub fn validate(field: &Field) -> Verdict {
    if field.barred {
        return Verdict::ok();
    }

    if field.required && field.value.trim().is_empty() {
        return Verdict::invalid(REQUIRED_MESSAGE);
    }

    if field.value.is_empty() {
        return Verdict::ok();
    }

    match field.kind {
        FieldKind::Email if !EMAIL_PATTERN.is_match(&field.value) => Verdict::invalid(EMAIL_MESSAGE),
        FieldKind::Number => validate_number(field),
        _ => Verdict::ok(),
    }
}

fn validate_number(field: &Field) -> Verdict {
    let Some(value) = parse_number(&field.value) else {
        return Verdict::invalid(NUMBER_MESSAGE);
    };

    if let Some(min) = field.min {
        if value < min {
            return Verdict::invalid(format!("Value must be greater than or equal to {}", min));
        }
    }

    if let Some(max) = field.max {
        if value > max {
            return Verdict::invalid(format!("Value must be less than or equal to {}", max));
        }
    }

    Verdict::ok()
}

/// Clean a numeric input as the user types: keep digits, `.` and `-`.
///
/// Returns the cleaned text only when it is a usable number, otherwise the
/// input should be left as it is.
pub fn sanitize_numeric_input(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || parse_number(&cleaned).is_none() {
        return None;
    }
    Some(cleaned)
}
