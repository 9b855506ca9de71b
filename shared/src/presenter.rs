use crate::field::Verdict;

pub const VALID_CLASS: &str = "is-valid";
pub const INVALID_CLASS: &str = "is-invalid";
pub const FEEDBACK_CLASS: &str = "invalid-feedback";
pub const SUBMITTED_CLASS: &str = "was-validated";

/// Mutations a field's rendered form must support to show a verdict
pub trait FieldAnnotations {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    /// Attach an error annotation next to the field
    fn attach_feedback(&mut self, message: &str);
    /// Remove the annotation attached by `attach_feedback`, if any
    fn detach_feedback(&mut self);
}

/// Apply a verdict to a field.
///
/// Every step starts from a clean slate, so presenting the same verdict twice
/// leaves one marker and at most one annotation.
pub fn present<N: FieldAnnotations + ?Sized>(node: &mut N, verdict: &Verdict) {
    node.detach_feedback();
    node.remove_class(VALID_CLASS);
    node.remove_class(INVALID_CLASS);

    if verdict.valid {
        node.add_class(VALID_CLASS);
    } else {
        node.add_class(INVALID_CLASS);
        node.attach_feedback(&verdict.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Stands in for an element: a class list plus the sibling annotations
    #[derive(Default)]
    struct FakeField {
        classes: BTreeSet<String>,
        feedback: Vec<String>,
    }

    impl FieldAnnotations for FakeField {
        fn add_class(&mut self, class: &str) {
            self.classes.insert(class.to_string());
        }

        fn remove_class(&mut self, class: &str) {
            self.classes.remove(class);
        }

        fn attach_feedback(&mut self, message: &str) {
            self.feedback.push(message.to_string());
        }

        fn detach_feedback(&mut self) {
            self.feedback.pop();
        }
    }

    fn markers(field: &FakeField) -> usize {
        [VALID_CLASS, INVALID_CLASS]
            .iter()
            .filter(|class| field.classes.contains(**class))
            .count()
    }

    #[test]
    fn test_present_invalid_twice_keeps_one_annotation() {
        let mut field = FakeField::default();
        let verdict = Verdict::invalid("This field is required");

        present(&mut field, &verdict);
        present(&mut field, &verdict);

        assert_eq!(field.feedback, vec!["This field is required".to_string()]);
        assert!(field.classes.contains(INVALID_CLASS));
        assert_eq!(markers(&field), 1);
    }

    #[test]
    fn test_present_valid_clears_annotation() {
        let mut field = FakeField::default();
        present(&mut field, &Verdict::invalid("Please enter a valid number"));
        present(&mut field, &Verdict::ok());

        assert!(field.feedback.is_empty());
        assert!(field.classes.contains(VALID_CLASS));
        assert_eq!(markers(&field), 1);
    }

    #[test]
    fn test_present_replaces_message() {
        let mut field = FakeField::default();
        present(&mut field, &Verdict::invalid("first"));
        present(&mut field, &Verdict::invalid("second"));
        assert_eq!(field.feedback, vec!["second".to_string()]);
    }

    #[test]
    fn test_unrelated_classes_survive() {
        let mut field = FakeField::default();
        field.add_class("form-control");
        present(&mut field, &Verdict::ok());
        assert!(field.classes.contains("form-control"));
    }
}
