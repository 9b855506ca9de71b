use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::{Debouncer, Scheduler};

/// Whether a row with `text` stays visible for `term`. Case-insensitive
/// substring match; an empty term matches everything.
pub fn row_matches(term: &str, text: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

/// A row whose visibility the live filter controls
pub trait RowVisibility {
    fn text(&self) -> String;
    fn set_visible(&mut self, visible: bool);
}

/// Plain in-memory row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    pub visible: bool,
}

impl Row {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }
}

impl RowVisibility for Row {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Recompute visibility of every row for `term`. Returns how many rows are
/// left visible.
pub fn filter<R: RowVisibility>(term: &str, rows: &mut [R]) -> usize {
    let needle = term.to_lowercase();
    let mut visible = 0;
    for row in rows.iter_mut() {
        let matches = needle.is_empty() || row.text().to_lowercase().contains(&needle);
        row.set_visible(matches);
        if matches {
            visible += 1;
        }
    }
    visible
}

/// Search box state: the latest term plus the one pending commit timer.
pub struct SearchSession<S: Scheduler> {
    term: Rc<RefCell<String>>,
    debouncer: Debouncer<S>,
    delay_ms: u32,
}

impl<S: Scheduler> SearchSession<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            term: Rc::new(RefCell::new(String::new())),
            debouncer: Debouncer::new(scheduler),
            delay_ms,
        }
    }

    pub fn term(&self) -> String {
        self.term.borrow().clone()
    }

    /// Record a keystroke. `commit` runs once the input has been quiet for the
    /// session delay and receives the term current at that moment.
    pub fn input<F>(&mut self, term: impl Into<String>, commit: F)
    where
        F: FnOnce(&str) + 'static,
    {
        *self.term.borrow_mut() = term.into();
        let term = Rc::clone(&self.term);
        self.debouncer.schedule(self.delay_ms, move || {
            let current = term.borrow().clone();
            commit(&current);
        });
    }

    /// Drop the pending commit, if any
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;
    use proptest::prelude::*;

    fn payment_rows() -> Vec<Row> {
        ["Apple Pay", "Bank Transfer", "Cash"]
            .into_iter()
            .map(Row::new)
            .collect()
    }

    fn visible_texts(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .filter(|row| row.visible)
            .map(|row| row.text.as_str())
            .collect()
    }

    #[test]
    fn test_filter_examples() {
        let mut rows = payment_rows();

        assert_eq!(filter("a", &mut rows), 3);
        assert_eq!(visible_texts(&rows), vec!["Apple Pay", "Bank Transfer", "Cash"]);

        assert_eq!(filter("ban", &mut rows), 1);
        assert_eq!(visible_texts(&rows), vec!["Bank Transfer"]);

        assert_eq!(filter("", &mut rows), 3);
        assert_eq!(visible_texts(&rows), vec!["Apple Pay", "Bank Transfer", "Cash"]);
    }

    #[test]
    fn test_filter_recomputes_hidden_rows() {
        let mut rows = payment_rows();
        filter("zzz", &mut rows);
        assert!(visible_texts(&rows).is_empty());

        filter("CASH", &mut rows);
        assert_eq!(visible_texts(&rows), vec!["Cash"]);
    }

    #[test]
    fn test_row_matches() {
        assert!(row_matches("", "anything"));
        assert!(row_matches("TRANS", "Bank Transfer"));
        assert!(!row_matches("card", "Cash"));
    }

    #[test]
    fn test_search_session_commits_last_term() {
        let clock = ManualScheduler::new();
        let mut session = SearchSession::new(clock.clone(), 300);
        let rows = Rc::new(RefCell::new(payment_rows()));
        let commits = Rc::new(RefCell::new(0));

        for term in ["b", "ba", "ban"] {
            let rows = Rc::clone(&rows);
            let commits = Rc::clone(&commits);
            session.input(term, move |committed| {
                *commits.borrow_mut() += 1;
                filter(committed, rows.borrow_mut().as_mut_slice());
            });
            clock.advance(50);
        }

        assert_eq!(session.term(), "ban");
        assert_eq!(*commits.borrow(), 0);

        clock.advance(250);
        assert_eq!(*commits.borrow(), 1);
        assert_eq!(visible_texts(&rows.borrow()), vec!["Bank Transfer"]);
    }

    #[test]
    fn test_search_session_cancel() {
        let clock = ManualScheduler::new();
        let mut session = SearchSession::new(clock.clone(), 300);
        let commits = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&commits);
        session.input("cash", move |_| *counter.borrow_mut() += 1);
        session.cancel();
        session.cancel();
        clock.advance(1_000);

        assert_eq!(*commits.borrow(), 0);
        assert_eq!(clock.pending(), 0);
    }

    proptest! {
        #[test]
        fn prop_filter_agrees_with_row_matches(term in "[a-zA-Z ]{0,4}", texts in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..8)) {
            let mut rows: Vec<Row> = texts.iter().map(Row::new).collect();
            filter(&term, &mut rows);
            for row in &rows {
                prop_assert_eq!(row.visible, row_matches(&term, &row.text));
            }
        }

        #[test]
        fn prop_filter_ignores_case(term in "[a-z]{1,4}", text in "[a-zA-Z]{0,12}") {
            prop_assert_eq!(row_matches(&term, &text), row_matches(&term.to_uppercase(), &text));
        }
    }
}
