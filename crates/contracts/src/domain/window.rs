use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::PeriodCode;

/// Admin-defined time range during which ordering is permitted.
///
/// Field names follow the backend wire format. `orderanke` is the packed
/// period code; older rows may carry only a textual `order_no` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWindow {
    pub id: Uuid,

    #[serde(default)]
    pub order_no: Option<String>,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    #[serde(default)]
    pub orderanke: Option<PeriodCode>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub announced_open: bool,

    #[serde(default)]
    pub announced_close: bool,
}

/// Lifecycle state of a window at a given instant.
///
/// Evaluated in strict priority order: an explicit inactive flag wins over
/// any time comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    Inactive,
    NotStarted,
    Ended,
    OpenNow,
}

impl OrderWindow {
    /// Classify the window at `now`. `now` is always supplied by the caller
    /// so the evaluation stays pure and deterministically testable.
    pub fn state(&self, now: DateTime<Utc>) -> WindowState {
        if !self.is_active {
            WindowState::Inactive
        } else if now < self.start_time {
            WindowState::NotStarted
        } else if now > self.end_time {
            WindowState::Ended
        } else {
            WindowState::OpenNow
        }
    }

    /// Two-state gate for the customer order form.
    pub fn is_ordering_open(&self, now: DateTime<Utc>) -> bool {
        self.state(now) == WindowState::OpenNow
    }

    /// Period code of this window: the stored `orderanke`, falling back to
    /// whatever can be parsed out of the textual order number.
    pub fn period_code(&self) -> Option<PeriodCode> {
        self.orderanke.or_else(|| {
            self.order_no
                .as_deref()
                .and_then(PeriodCode::parse_order_no)
        })
    }

    /// Display label for announcements; `"Periode"` when no code is known.
    pub fn period_label(&self) -> String {
        match self.period_code() {
            Some(code) => code.label(),
            None => "Periode".to_string(),
        }
    }
}

/// DTO for creating a window from the admin schedule form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowDraft {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub month: u32,
    pub week: u32,
}

impl WindowDraft {
    pub fn period_code(&self) -> PeriodCode {
        PeriodCode::encode(self.month, self.week)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err("Month must be between 1 and 12".into());
        }
        if !(1..=5).contains(&self.week) {
            return Err("Week must be between 1 and 5".into());
        }
        if self.start_time >= self.end_time {
            return Err("Start time must be before end time".into());
        }
        Ok(())
    }
}
