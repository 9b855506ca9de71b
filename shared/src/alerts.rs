use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use log::debug;

use crate::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    /// Suffix of the `alert-*` style class
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Where alerts are rendered
pub trait AlertRegion {
    /// Insert above every alert already shown. Returns `false` when there is
    /// nowhere to put it.
    fn insert_top(&mut self, alert: &Alert) -> bool;
    /// Remove the alert if it is still shown. Returns whether anything was removed.
    fn remove(&mut self, id: AlertId) -> bool;
}

struct Entry<H> {
    alert: Alert,
    expiry: Option<H>,
}

struct Registry<R, H> {
    region: R,
    next_id: u64,
    // Newest first.
    live: Vec<Entry<H>>,
}

impl<R: AlertRegion, H: TimerHandle> Registry<R, H> {
    fn remove(&mut self, id: AlertId) -> bool {
        let Some(index) = self.live.iter().position(|entry| entry.alert.id == id) else {
            return false;
        };
        let entry = self.live.remove(index);
        if let Some(expiry) = entry.expiry {
            expiry.cancel();
        }
        self.region.remove(id)
    }
}

/// Shows transient notifications, each with its own expiry timer.
pub struct AlertBroadcaster<S: Scheduler, R: AlertRegion> {
    scheduler: S,
    ttl_ms: u32,
    registry: Rc<RefCell<Registry<R, S::Handle>>>,
}

impl<S, R> AlertBroadcaster<S, R>
where
    S: Scheduler,
    R: AlertRegion + 'static,
{
    pub fn new(scheduler: S, region: R, ttl_ms: u32) -> Self {
        Self {
            scheduler,
            ttl_ms,
            registry: Rc::new(RefCell::new(Registry {
                region,
                next_id: 1,
                live: Vec::new(),
            })),
        }
    }

    /// Show an alert and arm its expiry. Returns `None` when the region is
    /// missing, in which case nothing is scheduled.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> Option<AlertId> {
        let created_at = DateTime::from_timestamp_millis(self.scheduler.now_ms()).unwrap_or_default();
        let mut registry = self.registry.borrow_mut();
        let alert = Alert {
            id: AlertId(registry.next_id),
            message: message.into(),
            severity,
            created_at,
        };
        registry.next_id += 1;

        if !registry.region.insert_top(&alert) {
            debug!("no alert region on this page, dropping {:?} alert", severity);
            return None;
        }

        let id = alert.id;
        let weak: Weak<RefCell<Registry<R, S::Handle>>> = Rc::downgrade(&self.registry);
        let expiry = self.scheduler.schedule(
            self.ttl_ms,
            Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    if registry.borrow_mut().remove(id) {
                        debug!("{} expired", id);
                    }
                }
            }),
        );
        registry.live.insert(0, Entry { alert, expiry: Some(expiry) });
        Some(id)
    }

    /// Remove an alert before its expiry. Safe to call repeatedly or after
    /// the alert already expired.
    pub fn dismiss(&self, id: AlertId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    /// Alerts currently shown, newest first
    pub fn live(&self) -> Vec<Alert> {
        self.registry
            .borrow()
            .live
            .iter()
            .map(|entry| entry.alert.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualScheduler;

    /// Region backed by a shared list so tests can look at it after handing it over
    #[derive(Clone, Default)]
    struct ListRegion {
        shown: Rc<RefCell<Vec<AlertId>>>,
        removals: Rc<RefCell<usize>>,
        missing: bool,
    }

    impl AlertRegion for ListRegion {
        fn insert_top(&mut self, alert: &Alert) -> bool {
            if self.missing {
                return false;
            }
            self.shown.borrow_mut().insert(0, alert.id);
            true
        }

        fn remove(&mut self, id: AlertId) -> bool {
            let mut shown = self.shown.borrow_mut();
            match shown.iter().position(|shown_id| *shown_id == id) {
                Some(index) => {
                    shown.remove(index);
                    *self.removals.borrow_mut() += 1;
                    true
                }
                None => false,
            }
        }
    }

    fn broadcaster() -> (ManualScheduler, ListRegion, AlertBroadcaster<ManualScheduler, ListRegion>) {
        let clock = ManualScheduler::starting_at(1_700_000_000_000);
        let region = ListRegion::default();
        let alerts = AlertBroadcaster::new(clock.clone(), region.clone(), 5000);
        (clock, region, alerts)
    }

    #[test]
    fn test_alert_expires_after_ttl() {
        let (clock, region, alerts) = broadcaster();
        let id = alerts.show("Saved", Severity::Success).unwrap();
        assert_eq!(*region.shown.borrow(), vec![id]);

        clock.advance(4999);
        assert_eq!(region.shown.borrow().len(), 1);

        clock.advance(1);
        assert!(region.shown.borrow().is_empty());
        assert!(alerts.live().is_empty());
    }

    #[test]
    fn test_dismiss_before_expiry() {
        let (clock, region, alerts) = broadcaster();
        let id = alerts.show("ok", Severity::Success).unwrap();

        clock.advance(1000);
        assert!(alerts.dismiss(id));
        assert!(!alerts.dismiss(id));
        assert_eq!(clock.pending(), 0);

        clock.advance(10_000);
        assert_eq!(*region.removals.borrow(), 1);
    }

    #[test]
    fn test_dismiss_after_expiry_is_noop() {
        let (clock, region, alerts) = broadcaster();
        let id = alerts.show("ok", Severity::Info).unwrap();
        clock.advance(5000);
        assert!(!alerts.dismiss(id));
        assert_eq!(*region.removals.borrow(), 1);
    }

    #[test]
    fn test_alerts_stack_newest_first_with_independent_timers() {
        let (clock, region, alerts) = broadcaster();
        let first = alerts.show("first", Severity::Success).unwrap();
        clock.advance(2000);
        let second = alerts.show("second", Severity::Danger).unwrap();
        let third = alerts.show("third", Severity::Warning).unwrap();

        assert_eq!(*region.shown.borrow(), vec![third, second, first]);
        let messages: Vec<String> = alerts.live().into_iter().map(|alert| alert.message).collect();
        assert_eq!(messages, vec!["third", "second", "first"]);

        alerts.dismiss(second);
        clock.advance(3000);
        assert_eq!(*region.shown.borrow(), vec![third]);

        clock.advance(2000);
        assert!(region.shown.borrow().is_empty());
    }

    #[test]
    fn test_missing_region_is_a_noop() {
        let clock = ManualScheduler::new();
        let region = ListRegion {
            missing: true,
            ..ListRegion::default()
        };
        let alerts = AlertBroadcaster::new(clock.clone(), region, 5000);

        assert_eq!(alerts.show("lost", Severity::Danger), None);
        assert_eq!(clock.pending(), 0);
        assert!(alerts.live().is_empty());
    }

    #[test]
    fn test_created_at_comes_from_scheduler_clock() {
        let (_clock, _region, alerts) = broadcaster();
        alerts.show("ok", Severity::Success);
        let alert = &alerts.live()[0];
        assert_eq!(alert.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(alert.id.to_string(), "alert-1");
        assert_eq!(alert.severity.as_str(), "success");
    }
}
