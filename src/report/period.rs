//! Symbolic report periods and their resolution to UTC instants.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Longest `last_N_days` window accepted.
pub const MAX_DAYS: u32 = 150;

/// Period tokens as listed to users.
pub const PERIOD_VOCABULARY: [&str; 7] = [
    "today",
    "yesterday",
    "last_week",
    "last_month",
    "this_week",
    "this_month",
    "last_N_days",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Invalid period")]
    Invalid,
    #[error("Please input correct number of days (must be >0)")]
    NotEnoughDays,
    #[error("Please search at most 150 days (must be ≤150)")]
    TooManyDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    ThisWeek,
    ThisMonth,
    LastDays(u32),
}

/// A resolved `[start, end]` window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last_week" => Ok(Self::LastWeek),
            "last_month" => Ok(Self::LastMonth),
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            _ => parse_last_days(s),
        }
    }
}

fn parse_last_days(s: &str) -> Result<Period, PeriodError> {
    let digits = s
        .strip_prefix("last_")
        .and_then(|rest| rest.strip_suffix("_days"))
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or(PeriodError::Invalid)?;

    // All digits, so a failed parse can only be an overflow.
    let days = digits.parse::<u32>().map_err(|_| PeriodError::TooManyDays)?;
    match days {
        0 => Err(PeriodError::NotEnoughDays),
        d if d > MAX_DAYS => Err(PeriodError::TooManyDays),
        d => Ok(Period::LastDays(d)),
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Yesterday => f.write_str("yesterday"),
            Self::LastWeek => f.write_str("last_week"),
            Self::LastMonth => f.write_str("last_month"),
            Self::ThisWeek => f.write_str("this_week"),
            Self::ThisMonth => f.write_str("this_month"),
            Self::LastDays(days) => write!(f, "last_{days}_days"),
        }
    }
}

/// 23:59:59.999999, one microsecond before midnight wraps around.
fn end_of_day() -> NaiveTime {
    NaiveTime::MIN - Duration::microseconds(1)
}

fn start_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(end_of_day())
}

/// Attach `tz` to a wall clock time and convert it to UTC.
///
/// An ambiguous time (DST fall back) takes its earliest instant, a time in a
/// DST gap moves forward by the usual one hour shift.
fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = local + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&local))
        }
    }
}

/// First day of the month before the one containing `date`.
fn first_of_previous_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = match date.month() {
        1 => (date.year() - 1, 12),
        m => (date.year(), m - 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Last day of the month starting at `first`: day 28 plus four days always
/// lands in the next month, stepping back by that date's day of month gives
/// the last day.
fn last_of_month(first: NaiveDate) -> NaiveDate {
    let overshoot = first.with_day(28).unwrap_or(first) + Duration::days(4);
    overshoot - Duration::days(i64::from(overshoot.day()))
}

impl Period {
    /// Resolve the period around `now` as seen from `tz`.
    ///
    /// Periods still running end at `now` itself, only calendar boundaries go
    /// through the timezone.
    pub fn resolve(&self, now: DateTime<Utc>, tz: Tz) -> TimeWindow {
        let local_now = now.with_timezone(&tz).naive_local();
        let today = local_now.date();
        // Monday = 0 .. Sunday = 6
        let weekday = i64::from(today.weekday().num_days_from_monday());

        let (start, end) = match self {
            Self::Today => (start_of(today), None),
            Self::Yesterday => {
                let yesterday = today - Duration::days(1);
                (start_of(yesterday), Some(end_of(yesterday)))
            }
            Self::LastWeek => {
                let last_sunday = today - Duration::days((weekday + 1) % 7 + 7);
                let last_saturday = last_sunday + Duration::days(6);
                (start_of(last_sunday), Some(end_of(last_saturday)))
            }
            Self::LastMonth => {
                let first = first_of_previous_month(today);
                (start_of(first), Some(end_of(last_of_month(first))))
            }
            Self::ThisWeek => {
                let sunday = today - Duration::days((weekday + 1) % 7);
                (start_of(sunday), None)
            }
            Self::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                (start_of(first), None)
            }
            Self::LastDays(days) => (local_now - Duration::days(i64::from(*days)), None),
        };

        TimeWindow {
            start: localize(tz, start),
            end: end.map_or(now, |end| localize(tz, end)),
        }
    }
}

/// Parse a period token and resolve it in one step.
pub fn resolve(token: &str, now: DateTime<Utc>, tz: Tz) -> Result<TimeWindow, PeriodError> {
    Ok(token.parse::<Period>()?.resolve(now, tz))
}
