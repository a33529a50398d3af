use std::collections::BTreeMap;

use tracing::trace;

use crate::analyzers::types::{Dimension, GroupTotals, HourlyRow, LongRow, RiderStatus};
use crate::labels::{self, UNKNOWN_LABEL, WeekdayOrigin};
use crate::parser::RideRecord;

/// Groups records by `dimension`, summing casual, registered and cnt.
///
/// Only keys that occur are returned, in ascending key order.
pub fn group_totals(records: &[&RideRecord], dimension: Dimension) -> Vec<GroupTotals> {
    let mut groups: BTreeMap<u8, GroupTotals> = BTreeMap::new();

    for record in records {
        let key = dimension.key(record);
        groups
            .entry(key)
            .or_insert_with(|| GroupTotals::new(key))
            .add_record(record);
    }

    trace!(dimension = dimension.column(), groups = groups.len(), "Grouped records");
    groups.into_values().collect()
}

/// Wide to long: every casual row (in group order), then every registered row.
pub fn melt(groups: &[GroupTotals], label: impl Fn(u8) -> Option<&'static str>) -> Vec<LongRow> {
    RiderStatus::ALL
        .iter()
        .flat_map(|&status| groups.iter().map(move |g| (status, g)))
        .map(|(status, g)| LongRow {
            code: g.key,
            label: label(g.key).unwrap_or(UNKNOWN_LABEL),
            status,
            count: g.count_for(status),
        })
        .collect()
}

/// Hourly sums in ascending hour order.
pub fn hourly_view(records: &[&RideRecord]) -> Vec<HourlyRow> {
    group_totals(records, Dimension::Hour)
        .into_iter()
        .map(HourlyRow::from)
        .collect()
}

/// Long form ordered January..December.
pub fn monthly_view(records: &[&RideRecord]) -> Vec<LongRow> {
    let mut rows = melt(&group_totals(records, Dimension::Month), labels::month_label);
    rows.sort_by_key(|r| calendar_position(labels::month_label(r.code), &labels::MONTH_LABELS));
    rows
}

/// Long form ordered Monday..Sunday, codes read through `origin`.
pub fn weekly_view(records: &[&RideRecord], origin: WeekdayOrigin) -> Vec<LongRow> {
    let mut rows = melt(&group_totals(records, Dimension::Weekday), |code| origin.label(code));
    rows.sort_by_key(|r| origin.position(r.code).unwrap_or(usize::MAX));
    rows
}

/// Long form ordered by ascending count.
pub fn weather_view(records: &[&RideRecord]) -> Vec<LongRow> {
    let mut rows = melt(&group_totals(records, Dimension::Weather), labels::weather_label);
    rows.sort_by_key(|r| r.count);
    rows
}

/// Long form ordered by ascending count.
pub fn season_view(records: &[&RideRecord]) -> Vec<LongRow> {
    let mut rows = melt(&group_totals(records, Dimension::Season), labels::season_label);
    rows.sort_by_key(|r| r.count);
    rows
}

fn calendar_position(label: Option<&str>, sequence: &[&str]) -> usize {
    label
        .and_then(|l| sequence.iter().position(|s| *s == l))
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DateRange;
    use crate::dataset::tests::{day, record, sample_dataset};
    use crate::stats::RideTotals;

    fn with(mut r: RideRecord, f: impl FnOnce(&mut RideRecord)) -> RideRecord {
        f(&mut r);
        r
    }

    /// A week of records spread over several months, weathers and seasons.
    fn mixed() -> Vec<RideRecord> {
        vec![
            with(record(day(2011, 3, 1), 8, 10, 90), |r| {
                r.mnth = 3;
                r.weekday = 2;
                r.weathersit = 1;
                r.season = 1;
            }),
            with(record(day(2011, 7, 3), 17, 40, 60), |r| {
                r.mnth = 7;
                r.weekday = 0;
                r.weathersit = 2;
                r.season = 3;
            }),
            with(record(day(2011, 1, 8), 8, 5, 20), |r| {
                r.mnth = 1;
                r.weekday = 6;
                r.weathersit = 3;
                r.season = 1;
            }),
            with(record(day(2011, 12, 5), 23, 1, 4), |r| {
                r.mnth = 12;
                r.weekday = 1;
                r.weathersit = 1;
                r.season = 4;
            }),
        ]
    }

    fn refs(records: &[RideRecord]) -> Vec<&RideRecord> {
        records.iter().collect()
    }

    #[test]
    fn test_hourly_view_worked_example() {
        let ds = sample_dataset();
        let set = ds.filter(DateRange::single_day(day(2011, 1, 1)));
        let hourly = hourly_view(set.records());

        assert_eq!(
            hourly,
            vec![
                HourlyRow {
                    hr: 0,
                    casual: 1,
                    registered: 2,
                    cnt: 3
                },
                HourlyRow {
                    hr: 1,
                    casual: 0,
                    registered: 5,
                    cnt: 5
                },
            ]
        );
    }

    #[test]
    fn test_hourly_keys_are_distinct_hours_ascending() {
        let data = mixed();
        let hourly = hourly_view(&refs(&data));
        let hours: Vec<u8> = hourly.iter().map(|h| h.hr).collect();
        assert_eq!(hours, vec![8, 17, 23]);
        assert_eq!(hourly[0].cnt, 125);
    }

    #[test]
    fn test_melt_order() {
        let groups = vec![
            GroupTotals {
                key: 1,
                casual: 1,
                registered: 2,
                cnt: 3,
            },
            GroupTotals {
                key: 2,
                casual: 4,
                registered: 5,
                cnt: 9,
            },
        ];
        let rows = melt(&groups, labels::season_label);
        let shape: Vec<(u8, RiderStatus, u64)> =
            rows.iter().map(|r| (r.code, r.status, r.count)).collect();
        assert_eq!(
            shape,
            vec![
                (1, RiderStatus::Casual, 1),
                (2, RiderStatus::Casual, 4),
                (1, RiderStatus::Registered, 2),
                (2, RiderStatus::Registered, 5),
            ]
        );
        assert_eq!(rows[0].label, "Spring");
    }

    #[test]
    fn test_monthly_view_calendar_order() {
        let data = mixed();
        let rows = monthly_view(&refs(&data));
        let labels: Vec<(&str, RiderStatus)> = rows.iter().map(|r| (r.label, r.status)).collect();
        assert_eq!(
            labels,
            vec![
                ("January", RiderStatus::Casual),
                ("January", RiderStatus::Registered),
                ("March", RiderStatus::Casual),
                ("March", RiderStatus::Registered),
                ("July", RiderStatus::Casual),
                ("July", RiderStatus::Registered),
                ("December", RiderStatus::Casual),
                ("December", RiderStatus::Registered),
            ]
        );
    }

    #[test]
    fn test_weekly_view_monday_first_with_sunday_origin() {
        let data = mixed();
        let rows = weekly_view(&refs(&data), WeekdayOrigin::Sunday);
        let order: Vec<&str> = rows.iter().step_by(2).map(|r| r.label).collect();
        assert_eq!(order, vec!["Monday", "Tuesday", "Saturday", "Sunday"]);
    }

    #[test]
    fn test_weekly_view_monday_origin() {
        let data = mixed();
        let rows = weekly_view(&refs(&data), WeekdayOrigin::Monday);
        let order: Vec<&str> = rows.iter().step_by(2).map(|r| r.label).collect();
        assert_eq!(order, vec!["Monday", "Tuesday", "Wednesday", "Sunday"]);
    }

    #[test]
    fn test_weather_view_sorted_by_count() {
        let data = mixed();
        let rows = weather_view(&refs(&data));
        let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![5, 11, 20, 40, 60, 94]);
        assert_eq!(rows[0].label, "Light Rain/Snow");
        assert_eq!(rows[5].label, "Clear");
    }

    #[test]
    fn test_count_ties_keep_melt_order() {
        let data = vec![
            with(record(day(2011, 1, 1), 0, 3, 3), |r| r.season = 4),
            with(record(day(2011, 1, 1), 1, 3, 3), |r| r.season = 2),
        ];
        let rows = season_view(&refs(&data));
        let shape: Vec<(u8, RiderStatus)> = rows.iter().map(|r| (r.code, r.status)).collect();
        assert_eq!(
            shape,
            vec![
                (2, RiderStatus::Casual),
                (4, RiderStatus::Casual),
                (2, RiderStatus::Registered),
                (4, RiderStatus::Registered),
            ]
        );
    }

    #[test]
    fn test_grouped_views_reaggregate_to_totals() {
        let data = mixed();
        let records = refs(&data);
        let totals = RideTotals::from_records(&records);

        for rows in [
            monthly_view(&records),
            weekly_view(&records, WeekdayOrigin::Sunday),
            weather_view(&records),
            season_view(&records),
        ] {
            let casual: u64 = rows
                .iter()
                .filter(|r| r.status == RiderStatus::Casual)
                .map(|r| r.count)
                .sum();
            let registered: u64 = rows
                .iter()
                .filter(|r| r.status == RiderStatus::Registered)
                .map(|r| r.count)
                .sum();
            assert_eq!(casual, totals.total_casual);
            assert_eq!(registered, totals.total_registered);
        }

        let hourly = hourly_view(&records);
        assert_eq!(hourly.iter().map(|h| h.cnt).sum::<u64>(), totals.total_rides);
        assert!(hourly.iter().all(|h| h.cnt == h.casual + h.registered));
    }

    #[test]
    fn test_empty_input_gives_empty_views() {
        assert!(hourly_view(&[]).is_empty());
        assert!(monthly_view(&[]).is_empty());
        assert!(weekly_view(&[], WeekdayOrigin::Sunday).is_empty());
        assert!(weather_view(&[]).is_empty());
        assert!(season_view(&[]).is_empty());
    }

    #[test]
    fn test_unknown_code_sorts_last() {
        let data = vec![
            with(record(day(2011, 1, 1), 0, 1, 1), |r| r.mnth = 14),
            with(record(day(2011, 1, 1), 1, 1, 1), |r| r.mnth = 2),
        ];
        let rows = monthly_view(&refs(&data));
        assert_eq!(rows[0].label, "February");
        assert_eq!(rows[3].label, UNKNOWN_LABEL);
    }
}
