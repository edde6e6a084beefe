use crate::domain::market_data::Timestamp;
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Zone used for chart labels and tooltip times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelClock {
    /// Browser local time, as a user reads a wall clock.
    #[default]
    Local,
    Utc,
}

impl LabelClock {
    fn render(&self, ts: Timestamp, pattern: &str) -> Option<String> {
        let millis = i64::try_from(ts.value()).ok()?;
        let text = match self {
            Self::Local => Local.timestamp_millis_opt(millis).single()?.format(pattern).to_string(),
            Self::Utc => Utc.timestamp_millis_opt(millis).single()?.format(pattern).to_string(),
        };
        Some(text)
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Utc => Utc::now().date_naive(),
        }
    }
}

/// `HH:MM` axis label; `--:--` when the row carried no time.
pub fn format_time_label(ts: Option<Timestamp>, clock: LabelClock) -> String {
    ts.and_then(|ts| clock.render(ts, "%H:%M")).unwrap_or_else(|| "--:--".to_string())
}

/// en-US style date and time for the tooltip, e.g. `1/2/2024, 3:04:05 PM`.
pub fn format_tooltip_time(ts: Option<Timestamp>, clock: LabelClock) -> String {
    ts.and_then(|ts| clock.render(ts, "%-m/%-d/%Y, %-I:%M:%S %p")).unwrap_or_else(|| "--".to_string())
}

/// Parses an OHLCV `time_period_start`, with or without a zone suffix.
///
/// Zone-less values are read as UTC.
pub fn parse_period_start(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    let millis = DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.timestamp_millis())
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc().timestamp_millis()))
        .ok()?;
    u64::try_from(millis).ok().map(Timestamp::from_millis)
}

/// The given day of the month after `today`.
pub fn next_month_day(today: NaiveDate, day: u32) -> Option<NaiveDate> {
    let (year, month) = if today.month() == 12 { (today.year() + 1, 1) } else { (today.year(), today.month() + 1) };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_in_utc() {
        let ts = Some(Timestamp::from_millis(1_700_000_000_000)); // 2023-11-14 22:13:20 UTC
        assert_eq!(format_time_label(ts, LabelClock::Utc), "22:13");
        assert_eq!(format_tooltip_time(ts, LabelClock::Utc), "11/14/2023, 10:13:20 PM");
        assert_eq!(format_time_label(None, LabelClock::Utc), "--:--");
        assert_eq!(format_tooltip_time(None, LabelClock::Utc), "--");
    }

    #[test]
    fn period_start_variants() {
        let expected = Some(Timestamp::from_millis(1_704_067_200_000));
        assert_eq!(parse_period_start("2024-01-01T00:00:00.0000000Z"), expected);
        assert_eq!(parse_period_start("2024-01-01T00:00:00Z"), expected);
        assert_eq!(parse_period_start("2024-01-01T00:00:00"), expected);
        assert_eq!(parse_period_start("2024-01-01T01:00:00+01:00"), expected);
        assert_eq!(parse_period_start("yesterday"), None);
    }

    #[test]
    fn next_month_rolls_the_year() {
        let dec = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        assert_eq!(next_month_day(dec, 12), NaiveDate::from_ymd_opt(2026, 1, 12));
        let jan = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(next_month_day(jan, 12), NaiveDate::from_ymd_opt(2026, 2, 12));
    }
}
