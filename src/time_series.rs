use crate::core::units::SECONDS_PER_HOUR;
use crate::errors::ValidationError;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use itertools::Itertools;
use std::ops::Range;

/// Check that `timestamps` form a strictly increasing index at one-hour
/// steps. Every downstream alignment (daily buckets, midday anchors,
/// hour-of-day lookups) assumes this.
pub(crate) fn validate_hourly_index(timestamps: &[NaiveDateTime]) -> Result<(), ValidationError> {
    if timestamps.is_empty() {
        return Err(ValidationError::EmptySeries);
    }
    for (position, pair) in timestamps.windows(2).enumerate() {
        if pair[1] - pair[0] != TimeDelta::hours(1) {
            return Err(ValidationError::IrregularTimeIndex {
                position: position + 1,
            });
        }
    }
    Ok(())
}

pub(crate) fn hour_of_day(timestamp: &NaiveDateTime) -> u32 {
    timestamp.hour()
}

/// Group a strictly increasing index into runs of entries sharing a calendar
/// date, returned as `(date, index range)` pairs in order.
pub(crate) fn day_ranges(timestamps: &[NaiveDateTime]) -> Vec<(NaiveDate, Range<usize>)> {
    let mut ranges = vec![];
    for (date, group) in &timestamps
        .iter()
        .enumerate()
        .chunk_by(|(_, timestamp)| timestamp.date())
    {
        let indices: Vec<usize> = group.map(|(index, _)| index).collect();
        ranges.push((date, indices[0]..indices[indices.len() - 1] + 1));
    }
    ranges
}

/// Fractional hours from `reference` to `timestamp` (negative when the
/// timestamp precedes the reference).
pub(crate) fn hours_since(timestamp: NaiveDateTime, reference: NaiveDateTime) -> f64 {
    (timestamp - reference).num_seconds() as f64 / SECONDS_PER_HOUR as f64
}

pub(crate) fn noon_of(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).expect("noon is a valid time of day")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn hourly(start: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        (0..count)
            .map(|hour| start + TimeDelta::hours(hour as i64))
            .collect()
    }

    #[fixture]
    fn midnight() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[rstest]
    fn should_accept_hourly_index(midnight: NaiveDateTime) {
        assert!(validate_hourly_index(&hourly(midnight, 30)).is_ok());
    }

    #[rstest]
    fn should_reject_empty_index() {
        assert!(matches!(
            validate_hourly_index(&[]),
            Err(ValidationError::EmptySeries)
        ));
    }

    #[rstest]
    fn should_reject_gap_in_index(midnight: NaiveDateTime) {
        let mut timestamps = hourly(midnight, 5);
        timestamps.remove(2);
        assert!(matches!(
            validate_hourly_index(&timestamps),
            Err(ValidationError::IrregularTimeIndex { position: 2 })
        ));
    }

    #[rstest]
    fn should_reject_duplicate_timestamp(midnight: NaiveDateTime) {
        let timestamps = vec![midnight, midnight];
        assert!(validate_hourly_index(&timestamps).is_err());
    }

    #[rstest]
    fn should_group_whole_days(midnight: NaiveDateTime) {
        let ranges = day_ranges(&hourly(midnight, 48));
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].1, 0..24);
        assert_eq!(ranges[1].1, 24..48);
        assert_eq!(ranges[1].0, NaiveDate::from_ymd_opt(2019, 6, 2).unwrap());
    }

    #[rstest]
    fn should_group_partial_leading_day(midnight: NaiveDateTime) {
        // starting at 22:00 leaves two hours in the first bucket
        let ranges = day_ranges(&hourly(midnight + TimeDelta::hours(22), 26));
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].1, 0..2);
        assert_eq!(ranges[1].1, 2..26);
    }

    #[rstest]
    fn should_calculate_hour_offsets(midnight: NaiveDateTime) {
        assert_eq!(hours_since(midnight + TimeDelta::hours(36), midnight), 36.);
        assert_eq!(hours_since(midnight, midnight + TimeDelta::hours(12)), -12.);
        assert_eq!(hours_since(noon_of(midnight.date()), midnight), 12.);
    }

    #[rstest]
    fn should_read_hour_of_day(midnight: NaiveDateTime) {
        assert_eq!(hour_of_day(&midnight), 0);
        assert_eq!(hour_of_day(&(midnight + TimeDelta::hours(27))), 3);
    }
}
