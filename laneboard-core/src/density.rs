//! Density aggregation for the board heatmap.
//!
//! Groups events into per-day or per-week buckets over a fixed window and
//! normalizes each bucket's count against the busiest bucket in that window,
//! so intensity is always relative to what is currently on screen. Pure
//! functions only; the board recomputes buckets whenever the event set or
//! window changes.

use crate::types::EventRecord;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bucket width for density aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day
    #[default]
    Day,
    /// One bucket per ISO week, keyed by its Monday
    Week,
}

/// The time span and resolution to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// First day of the window, inclusive
    pub start: NaiveDate,
    /// Last day of the window, inclusive
    pub end: NaiveDate,
    pub granularity: Granularity,
}

impl TimeWindow {
    /// A day-granularity window covering the `days` days ending at `end`.
    pub fn trailing_days(end: NaiveDate, days: u32) -> Self {
        let days = days.max(1);
        Self {
            start: end - Duration::days(i64::from(days) - 1),
            end,
            granularity: Granularity::Day,
        }
    }
}

/// A density rollup for one time slot.
///
/// Always rebuilt from scratch; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityBucket {
    /// Slot key: the day itself, or the Monday of the week
    pub date: NaiveDate,
    /// Day of week of the slot key (0 = Monday .. 6 = Sunday)
    pub day_of_week: u8,
    /// Number of events whose timestamp falls in this slot
    pub event_count: usize,
    /// `event_count / max_count_across_slots`, clamped to `[0, 1]`;
    /// zero when the slot (or the whole window) is empty
    pub intensity: f64,
}

/// Aggregate `events` into density buckets covering `window`.
///
/// A bucket is emitted for every slot in `[start, end]` even when empty, so
/// quiet days render as low-opacity stubs rather than gaps. An inverted
/// window (`start > end`) yields no buckets.
pub fn aggregate(events: &[EventRecord], window: &TimeWindow) -> Vec<DensityBucket> {
    if window.start > window.end {
        return Vec::new();
    }

    let mut buckets: Vec<DensityBucket> = slot_keys(window)
        .into_iter()
        .map(|date| DensityBucket {
            date,
            day_of_week: date.weekday().num_days_from_monday() as u8,
            event_count: 0,
            intensity: 0.0,
        })
        .collect();

    for event in events {
        let day = event.timestamp.date_naive();
        if day < window.start || day > window.end {
            continue;
        }
        let key = match window.granularity {
            Granularity::Day => day,
            Granularity::Week => week_key(day),
        };
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == key) {
            bucket.event_count += 1;
        }
    }

    let max_count = buckets.iter().map(|b| b.event_count).max().unwrap_or(0);
    if max_count > 0 {
        for bucket in &mut buckets {
            bucket.intensity = (bucket.event_count as f64 / max_count as f64).clamp(0.0, 1.0);
        }
    }

    buckets
}

/// Slot keys for the window, in ascending order.
fn slot_keys(window: &TimeWindow) -> Vec<NaiveDate> {
    match window.granularity {
        Granularity::Day => {
            let mut keys = Vec::new();
            let mut day = window.start;
            while day <= window.end {
                keys.push(day);
                day = day + Duration::days(1);
            }
            keys
        }
        Granularity::Week => {
            let mut keys = Vec::new();
            let mut monday = week_key(window.start);
            let last = week_key(window.end);
            while monday <= last {
                keys.push(monday);
                monday = monday + Duration::weeks(1);
            }
            keys
        }
    }
}

/// The Monday of the week containing `day`.
fn week_key(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventStatus, Role};
    use chrono::{TimeZone, Utc};

    fn event_on(date: NaiveDate, id: &str) -> EventRecord {
        let ts = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        EventRecord {
            id: id.to_string(),
            session_id: "s1".to_string(),
            timestamp: ts,
            role: Role::User,
            tool_kind: None,
            status: EventStatus::Ok,
            model: None,
            touched_files: vec![],
            token_counts: None,
            made_commit: false,
            preview: String::new(),
            content: String::new(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_two_day_window_with_empty_day() {
        let events: Vec<_> = (0..10)
            .map(|i| event_on(day("2026-02-08"), &format!("e{i}")))
            .collect();
        let window = TimeWindow {
            start: day("2026-02-08"),
            end: day("2026-02-09"),
            granularity: Granularity::Day,
        };

        let buckets = aggregate(&events, &window);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, day("2026-02-08"));
        assert_eq!(buckets[0].event_count, 10);
        assert_eq!(buckets[0].intensity, 1.0);
        assert_eq!(buckets[1].date, day("2026-02-09"));
        assert_eq!(buckets[1].event_count, 0);
        assert_eq!(buckets[1].intensity, 0.0);
    }

    #[test]
    fn test_counts_sum_to_events_in_window() {
        let mut events = Vec::new();
        for i in 0..7 {
            events.push(event_on(day("2026-03-01") + Duration::days(i % 3), &format!("a{i}")));
        }
        // Outside the window, must not be counted
        events.push(event_on(day("2026-04-01"), "outside"));

        let window = TimeWindow {
            start: day("2026-03-01"),
            end: day("2026-03-07"),
            granularity: Granularity::Day,
        };
        let buckets = aggregate(&events, &window);

        let total: usize = buckets.iter().map(|b| b.event_count).sum();
        assert_eq!(total, 7);
        for bucket in &buckets {
            assert!(bucket.intensity >= 0.0 && bucket.intensity <= 1.0);
        }
        let max = buckets.iter().map(|b| b.event_count).max().unwrap();
        let busiest = buckets.iter().find(|b| b.event_count == max).unwrap();
        assert_eq!(busiest.intensity, 1.0);
    }

    #[test]
    fn test_empty_events_yield_zero_intensity_buckets() {
        let window = TimeWindow {
            start: day("2026-01-01"),
            end: day("2026-01-03"),
            granularity: Granularity::Day,
        };
        let buckets = aggregate(&[], &window);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.event_count == 0 && b.intensity == 0.0));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let window = TimeWindow {
            start: day("2026-01-03"),
            end: day("2026-01-01"),
            granularity: Granularity::Day,
        };
        assert!(aggregate(&[], &window).is_empty());
    }

    #[test]
    fn test_week_granularity_keys_on_monday() {
        // 2026-02-08 is a Sunday; its week key is Monday 2026-02-02.
        let events = vec![event_on(day("2026-02-08"), "e1")];
        let window = TimeWindow {
            start: day("2026-02-02"),
            end: day("2026-02-15"),
            granularity: Granularity::Week,
        };
        let buckets = aggregate(&events, &window);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, day("2026-02-02"));
        assert_eq!(buckets[0].event_count, 1);
        assert_eq!(buckets[0].day_of_week, 0);
        assert_eq!(buckets[1].event_count, 0);
    }
}
