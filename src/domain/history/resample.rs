//! History resampling — derives chart-ready series from the history log.
//!
//! Stateless: every call takes a read-only view of the log and returns a new
//! derived sequence. The caller decides what to do with an empty result
//! (e.g. render an explicit empty state).

use super::HistoryPoint;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ─── RangeMode ───────────────────────────────────────────────────────────────

/// Chart range selector.
///
/// `Mo1` is treated identically to `D30` (a trailing 30-day window, not a
/// calendar month), matching the backend dashboard's observed behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeMode {
    #[serde(rename = "1h")]
    H1,
    #[default]
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "30d")]
    D30,
    #[serde(rename = "1mo")]
    Mo1,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "1h",
            Self::H24 => "24h",
            Self::D7 => "7d",
            Self::D30 => "30d",
            Self::Mo1 => "1mo",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Which point attribute the chart's X axis should read for this mode.
    pub fn x_axis(&self) -> XAxis {
        match self {
            Self::H1 | Self::H24 => XAxis::Time,
            Self::D7 | Self::D30 | Self::Mo1 | Self::All => XAxis::Date,
            Self::Week | Self::Month => XAxis::Bucket,
        }
    }

    /// Trailing window for the plain filter modes, `None` for bucketed/all.
    fn window(&self) -> Option<Duration> {
        match self {
            Self::H1 => Some(Duration::hours(1)),
            Self::H24 => Some(Duration::hours(24)),
            Self::D7 => Some(Duration::days(7)),
            Self::D30 | Self::Mo1 => Some(Duration::days(30)),
            Self::Week | Self::Month | Self::All => None,
        }
    }
}

impl std::fmt::Display for RangeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── XAxis ───────────────────────────────────────────────────────────────────

/// The point attribute plotted on the X axis, with its label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Short time label (`HH:MM:SS`), used as-is.
    Time,
    /// Full timestamp, labeled as short month + day (e.g. `"Jan 5"`).
    Date,
    /// Bucket key (`YYYY-Www` / `YYYY-M`), used as-is.
    Bucket,
}

impl XAxis {
    /// Axis label for one point.
    pub fn label_for(&self, point: &HistoryPoint) -> String {
        match self {
            Self::Time => point.label.clone(),
            Self::Date => point.at.format("%b %-d").to_string(),
            Self::Bucket => point.bucket.clone().unwrap_or_default(),
        }
    }
}

// ─── Resampling ──────────────────────────────────────────────────────────────

/// A derived series ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub points: Vec<HistoryPoint>,
    pub x_axis: XAxis,
}

impl Resampled {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Resample the history log for the given range mode, relative to now.
pub fn resample(history: &[HistoryPoint], mode: RangeMode) -> Resampled {
    resample_at(history, mode, Utc::now())
}

/// Resample relative to an explicit reference time.
///
/// Filter modes keep entries with `at >= now − window`; `week`/`month` keep
/// the last entry seen per bucket (in iteration order — not an aggregate);
/// `all` returns the full sequence. The input is never mutated, and an empty
/// input yields an empty series for every mode.
pub fn resample_at(history: &[HistoryPoint], mode: RangeMode, now: DateTime<Utc>) -> Resampled {
    let points = if let Some(window) = mode.window() {
        let cutoff = now - window;
        history.iter().filter(|p| p.at >= cutoff).cloned().collect()
    } else {
        match mode {
            RangeMode::Week => bucket_last(history, week_key),
            RangeMode::Month => bucket_last(history, month_key),
            _ => history.to_vec(),
        }
    };

    Resampled {
        points,
        x_axis: mode.x_axis(),
    }
}

/// Group entries by bucket key, keeping the last entry seen for each key.
///
/// Buckets come out in first-appearance order; the kept point carries its
/// bucket key for X-axis labeling.
fn bucket_last(history: &[HistoryPoint], key_fn: fn(DateTime<Utc>) -> String) -> Vec<HistoryPoint> {
    let mut buckets: IndexMap<String, HistoryPoint> = IndexMap::new();
    for point in history {
        let key = key_fn(point.at);
        let mut tagged = point.clone();
        tagged.bucket = Some(key.clone());
        buckets.insert(key, tagged);
    }
    buckets.into_values().collect()
}

/// Year-week bucket key (`YYYY-Www`), from UTC date components.
///
/// Week number is `ceil((day_of_year + jan1_weekday + 1) / 7)` with days
/// counted zero-based from January 1 and weekdays counted from Sunday. This
/// is an approximation of ISO-8601 week numbering kept for compatibility
/// with the backend dashboard; it does not handle year-boundary week-53
/// cases the way the ISO standard does.
fn week_key(at: DateTime<Utc>) -> String {
    let year = at.year();
    let day_of_year = at.ordinal0();
    let jan1_weekday = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let week = (day_of_year + jan1_weekday + 1).div_ceil(7);
    format!("{year}-W{week}")
}

/// Year-month bucket key (`YYYY-M`, month number not zero-padded).
fn month_key(at: DateTime<Utc>) -> String {
    format!("{}-{}", at.year(), at.month())
}
