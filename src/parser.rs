//! CSV parser for the hourly bike-sharing dataset.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatasetError;
use crate::labels::{self, WeekdayOrigin};

/// One hour of observations.
///
/// Categorical fields hold raw codes; see [`crate::labels`] for their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RideRecord {
    pub dteday: NaiveDate,
    pub hr: u8,
    pub weekday: u8,
    pub mnth: u8,
    pub season: u8,
    pub weathersit: u8,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

/// Row shape as it appears in the file. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: String,
    hr: String,
    weekday: String,
    mnth: String,
    season: String,
    weathersit: String,
    casual: String,
    registered: String,
    cnt: String,
}

impl RawRow {
    fn into_record(self, line: u64, origin: WeekdayOrigin) -> Result<RideRecord, DatasetError> {
        let dteday = parse_field(line, "dteday", &self.dteday, parse_date)?;
        let hr = parse_field(line, "hr", &self.hr, |v| {
            v.parse::<u8>().ok().filter(|h| *h <= 23)
        })?;
        let weekday = parse_field(line, "weekday", &self.weekday, |v| origin.parse(v))?;
        let mnth = parse_field(line, "mnth", &self.mnth, labels::parse_month)?;
        let season = parse_field(line, "season", &self.season, labels::parse_season)?;
        let weathersit = parse_field(line, "weathersit", &self.weathersit, labels::parse_weather)?;
        let casual = parse_field(line, "casual", &self.casual, parse_count)?;
        let registered = parse_field(line, "registered", &self.registered, parse_count)?;
        let cnt = parse_field(line, "cnt", &self.cnt, parse_count)?;

        if casual.checked_add(registered) != Some(cnt) {
            return Err(DatasetError::CountMismatch {
                line,
                casual,
                registered,
                cnt,
            });
        }

        Ok(RideRecord {
            dteday,
            hr,
            weekday,
            mnth,
            season,
            weathersit,
            casual,
            registered,
            cnt,
        })
    }
}

fn parse_field<T>(
    line: u64,
    field: &'static str,
    value: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, DatasetError> {
    if value.is_empty() {
        return Err(DatasetError::MissingField { line, field });
    }
    parse(value).ok_or_else(|| DatasetError::InvalidValue {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_count(value: &str) -> Option<u64> {
    value.parse::<u64>().ok()
}

/// Accepts `YYYY-MM-DD`, or a timestamp whose time part is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Decodes a header-led CSV document into ride records.
///
/// # Errors
///
/// Fails on the first malformed row; nothing partial is returned.
pub fn parse_records(bytes: &[u8], origin: WeekdayOrigin) -> Result<Vec<RideRecord>, DatasetError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let headers = rdr
        .headers()
        .map_err(|source| DatasetError::Csv { line: 1, source })?
        .clone();

    let mut records = Vec::new();
    let mut row = StringRecord::new();

    loop {
        match rdr.read_record(&mut row) {
            Ok(true) => {}
            Ok(false) => break,
            Err(source) => {
                let line = source.position().map_or(0, |p| p.line());
                return Err(DatasetError::Csv { line, source });
            }
        }

        let line = row.position().map_or(0, |p| p.line());
        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|source| DatasetError::Csv { line, source })?;
        records.push(raw.into_record(line, origin)?);
    }

    debug!(rows = records.len(), "Dataset parsed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,\
                          weathersit,temp,casual,registered,cnt";

    fn doc(rows: &[&str]) -> String {
        let mut s = HEADER.to_string();
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s
    }

    #[test]
    fn test_parse_numeric_codes() {
        let csv = doc(&["1,2011-01-01,1,0,1,0,0,6,0,1,0.24,3,13,16"]);
        let records = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap();

        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.dteday, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(r.hr, 0);
        assert_eq!(r.weekday, 6);
        assert_eq!(r.mnth, 1);
        assert_eq!(r.season, 1);
        assert_eq!(r.weathersit, 1);
        assert_eq!((r.casual, r.registered, r.cnt), (3, 13, 16));
    }

    #[test]
    fn test_labels_and_codes_parse_identically() {
        let coded = doc(&["1,2011-01-01,1,0,1,0,0,6,0,1,0.24,3,13,16"]);
        let labelled = doc(&["1,2011-01-01,Spring,0,January,0,0,Saturday,0,Clear,0.24,3,13,16"]);

        let a = parse_records(coded.as_bytes(), WeekdayOrigin::Sunday).unwrap();
        let b = parse_records(labelled.as_bytes(), WeekdayOrigin::Sunday).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cleaned_weather_labels() {
        let csv = doc(&[
            "1,2011-01-01,Spring,0,January,0,0,Saturday,0,Clear/Partly Cloudy,0.24,3,13,16",
            "2,2011-01-01,Spring,0,January,1,0,Saturday,0,Misty/Cloudy,0.22,8,32,40",
            "3,2011-01-01,Spring,0,January,2,0,Saturday,0,Light Snow/Rain,0.22,5,27,32",
            "4,2011-01-01,Spring,0,January,3,0,Saturday,0,Severe Weather,0.24,3,10,13",
        ]);
        let records = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap();
        let weather: Vec<u8> = records.iter().map(|r| r.weathersit).collect();
        assert_eq!(weather, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_timestamp_dates_are_truncated() {
        let csv = doc(&["1,2011-01-01 00:00:00,1,0,1,5,0,6,0,1,0.24,0,1,1"]);
        let records = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap();
        assert_eq!(records[0].dteday, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
    }

    #[test]
    fn test_empty_document_has_no_records() {
        let records = parse_records(HEADER.as_bytes(), WeekdayOrigin::Sunday).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let csv = doc(&[
            "1,2011-01-01,1,0,1,0,0,6,0,1,0.24,3,13,16",
            "2,2011-01-01,1,0,1,1,0,6,0,1,0.22,8,32,41",
        ]);
        let err = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap_err();
        match err {
            DatasetError::CountMismatch { line, cnt, .. } => {
                assert_eq!(line, 3);
                assert_eq!(cnt, 41);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_numeric_field_rejected() {
        let csv = doc(&["1,2011-01-01,1,0,1,0,0,6,0,1,0.24,,13,16"]);
        let err = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingField {
                line: 2,
                field: "casual"
            }
        ));
    }

    #[test]
    fn test_out_of_range_hour_rejected() {
        let csv = doc(&["1,2011-01-01,1,0,1,24,0,6,0,1,0.24,3,13,16"]);
        let err = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { field: "hr", .. }));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let csv = "dteday,hr,casual,registered,cnt\n2011-01-01,0,1,2,3";
        let err = parse_records(csv.as_bytes(), WeekdayOrigin::Sunday).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { line: 2, .. }));
    }
}
