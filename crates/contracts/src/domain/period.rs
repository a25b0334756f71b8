use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reporting/ordering period packed into a single integer: `month * 10 + week`.
///
/// The code is what gets stored on windows (`orderanke`) and orders, so the
/// scheme must stay unchanged for wire compatibility. A week number of 10 or
/// more would carry into the month digit; the encoding is only defined for
/// weeks 1–9 (months never produce more than 6 partial weeks in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodCode(pub i32);

impl PeriodCode {
    pub fn encode(month: u32, week: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month out of range: {month}");
        debug_assert!((1..=9).contains(&week), "week not encodable: {week}");
        Self((month * 10 + week) as i32)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn month(&self) -> u32 {
        (self.0 / 10) as u32
    }

    pub fn week(&self) -> u32 {
        (self.0 % 10) as u32
    }

    /// Human-readable form, e.g. `M3-W2`.
    pub fn label(&self) -> String {
        format!("M{}-W{}", self.month(), self.week())
    }

    /// Label with the raw code appended, e.g. `M3-W2 (#32)`.
    pub fn label_with_code(&self) -> String {
        format!("{} (#{})", self.label(), self.0)
    }

    /// Period for `now`: calendar month plus a locale-naive week-of-month
    /// number, `ceil((day + offset) / 7)` where `offset` is the Sunday-based
    /// weekday index of the first day of the month. Used as the fallback
    /// order number when no admin window is active.
    pub fn compute_current(now: DateTime<Utc>) -> Self {
        let month = now.month();
        let first = NaiveDate::from_ymd_opt(now.year(), month, 1)
            .expect("first day of month is always a valid date");
        let offset = first.weekday().num_days_from_sunday();
        let week = (now.day() + offset).div_ceil(7);
        Self::encode(month, week)
    }

    /// Extract a period code from a free-text order number such as
    /// `"M3-W2 (#32)"`. Case-insensitive; a missing pattern or a zero
    /// month/week is a no-match, not an error.
    pub fn parse_order_no(s: &str) -> Option<Self> {
        for (i, ch) in s.char_indices() {
            if ch != 'M' && ch != 'm' {
                continue;
            }
            let rest = &s[i + ch.len_utf8()..];
            let month_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if month_len == 0 {
                continue;
            }
            let (month_str, rest) = rest.split_at(month_len);
            let rest = match rest.strip_prefix('-') {
                Some(r) => r,
                None => continue,
            };
            let rest = match rest.strip_prefix(['W', 'w']) {
                Some(r) => r,
                None => continue,
            };
            let week_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if week_len == 0 {
                continue;
            }
            let month: i32 = match month_str.parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            let week: i32 = match rest[..week_len].parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            // First structural match decides, exactly like a regex search.
            if month == 0 || week == 0 {
                return None;
            }
            return Some(Self(month * 10 + week));
        }
        None
    }
}
