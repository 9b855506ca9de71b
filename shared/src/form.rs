use log::debug;

use crate::field::{validate, Field, Verdict};

/// Ordered collection of a form's constrained fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub fields: Vec<Field>,
    /// Set on the first submit attempt; enables failure styling for the whole form
    pub submitted: bool,
}

/// Outcome of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitDecision {
    /// Whether the submission may reach its destination
    pub proceed: bool,
    /// One verdict per field, in field order
    pub verdicts: Vec<Verdict>,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            submitted: false,
        }
    }

    /// Decide whether a submit may go ahead.
    ///
    /// `native_valid` is the environment's own constraint check when one is
    /// available. The form is marked submitted whatever the outcome.
    pub fn attempt_submit(&mut self, native_valid: Option<bool>) -> SubmitDecision {
        self.submitted = true;

        let verdicts: Vec<Verdict> = self.fields.iter().map(validate).collect();
        let invalid = verdicts.iter().filter(|verdict| !verdict.valid).count();
        let proceed = invalid == 0 && native_valid.unwrap_or(true);

        if !proceed {
            debug!(
                "submit blocked: {} invalid field(s), native check {:?}",
                invalid, native_valid
            );
        }

        SubmitDecision { proceed, verdicts }
    }
}
