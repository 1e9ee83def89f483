use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifies one of the reminder windows leading up to kickoff.
///
/// The serialized labels double as the persisted mark keys on a `Match`,
/// so renaming a variant invalidates marks written by earlier versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowLabel {
    #[serde(rename = "D-2")]
    DayMinus2,
    #[serde(rename = "D-1")]
    DayMinus1,
    #[serde(rename = "same-day")]
    SameDay,
}

impl WindowLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayMinus2 => "D-2",
            Self::DayMinus1 => "D-1",
            Self::SameDay => "same-day",
        }
    }
}

impl Display for WindowLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-relative slot before kickoff during which a reminder should
/// fire at most once per match.
#[derive(Debug, Clone)]
pub struct ReminderWindow {
    pub label: WindowLabel,
    /// Target offset in hours before kickoff
    pub hours_before: f64,
    /// Message template registered with the dispatch gateway for this window
    pub template_id: String,
}

impl ReminderWindow {
    pub fn new(label: WindowLabel, hours_before: f64, template_id: &str) -> Self {
        Self {
            label,
            hours_before,
            template_id: template_id.into(),
        }
    }
}

/// How far on either side of its target offset a window is considered active
const WINDOW_TOLERANCE_HOURS: f64 = 1.0;

/// Ordered list of reminder windows. Windows are expected to be separated
/// by more than twice the tolerance so that at most one is active at a
/// time; should the list ever contain overlapping offsets, the first
/// matching window in list order wins.
#[derive(Debug, Clone)]
pub struct WindowPolicy {
    windows: Vec<ReminderWindow>,
}

impl WindowPolicy {
    pub fn new(windows: Vec<ReminderWindow>) -> Self {
        Self { windows }
    }

    /// The window active at `hours_until` before kickoff, if any.
    ///
    /// A window with target offset `H` is active when
    /// `hours_until ∈ [H - 1, H + 1)`. Total over all inputs: a match that
    /// already started (negative `hours_until`) resolves to `None`.
    pub fn resolve(&self, hours_until: f64) -> Option<&ReminderWindow> {
        if hours_until < 0.0 {
            return None;
        }
        self.windows.iter().find(|w| {
            hours_until >= w.hours_before - WINDOW_TOLERANCE_HOURS
                && hours_until < w.hours_before + WINDOW_TOLERANCE_HOURS
        })
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self::new(vec![
            ReminderWindow::new(WindowLabel::DayMinus2, 48.0, "pg-reminder-d2"),
            ReminderWindow::new(WindowLabel::DayMinus1, 24.0, "pg-reminder-d1"),
            ReminderWindow::new(WindowLabel::SameDay, 6.0, "pg-reminder-day"),
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn resolve(hours_until: f64) -> Option<WindowLabel> {
        WindowPolicy::default()
            .resolve(hours_until)
            .map(|w| w.label)
    }

    #[test]
    fn it_resolves_window_boundaries() {
        assert_eq!(resolve(47.0), Some(WindowLabel::DayMinus2));
        assert_eq!(resolve(48.0), Some(WindowLabel::DayMinus2));
        assert_eq!(resolve(48.9), Some(WindowLabel::DayMinus2));
        assert_eq!(resolve(49.0), None);

        assert_eq!(resolve(23.0), Some(WindowLabel::DayMinus1));
        assert_eq!(resolve(24.0), Some(WindowLabel::DayMinus1));
        assert_eq!(resolve(24.3), Some(WindowLabel::DayMinus1));
        assert_eq!(resolve(25.0), None);

        assert_eq!(resolve(5.0), Some(WindowLabel::SameDay));
        assert_eq!(resolve(6.0), Some(WindowLabel::SameDay));
        assert_eq!(resolve(6.99), Some(WindowLabel::SameDay));
        assert_eq!(resolve(7.0), None);
    }

    #[test]
    fn it_resolves_no_window_outside_the_slots() {
        assert_eq!(resolve(50.0), None);
        assert_eq!(resolve(36.0), None);
        assert_eq!(resolve(12.0), None);
        assert_eq!(resolve(0.0), None);
        assert_eq!(resolve(1000.0), None);
    }

    #[test]
    fn it_never_resolves_a_started_match() {
        assert_eq!(resolve(-0.1), None);
        assert_eq!(resolve(-48.0), None);
    }

    #[test]
    fn it_resolves_at_most_one_window_across_the_range() {
        let policy = WindowPolicy::default();
        let mut hours = -72.0;
        while hours < 72.0 {
            let active = policy
                .windows
                .iter()
                .filter(|w| hours >= w.hours_before - 1.0 && hours < w.hours_before + 1.0)
                .count();
            assert!(active <= 1, "more than one window active at {}h", hours);
            if active == 1 {
                assert!(policy.resolve(hours).is_some());
            }
            hours += 0.25;
        }
    }

    #[test]
    fn it_picks_the_first_window_on_overlap() {
        let policy = WindowPolicy::new(vec![
            ReminderWindow::new(WindowLabel::DayMinus1, 24.0, "first"),
            ReminderWindow::new(WindowLabel::SameDay, 24.5, "second"),
        ]);
        let resolved = policy.resolve(24.0).unwrap();
        assert_eq!(resolved.label, WindowLabel::DayMinus1);
        assert_eq!(resolved.template_id, "first");
    }
}
