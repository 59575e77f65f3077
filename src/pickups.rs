//! NYC pickup records: CSV loading, hour-of-day filter and histogram.
//!
//! The source files use a `Date/Time,Lat,Lon,Base` header with timestamps
//! such as `9/1/2014 0:01:00`. Header names are lower-cased on load so lookups
//! do not depend on the file's capitalisation.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_COLUMN: &str = "date/time";
pub const HOURS_PER_DAY: usize = 24;

// M/D/YYYY H:MM with optional :SS
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})\s+(\d{1,2}):(\d{2})(?::(\d{2}))?$")
        .expect("timestamp pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum PickupError {
    #[error("Failed to read pickup CSV: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("Missing column '{column}' in pickup CSV")]
    MissingColumn { column: String },

    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("Hour {hour} is out of range (must be 0-23)")]
    HourOutOfRange { hour: u32 },
}

/// Calendar timestamp of a pickup, to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PickupTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl FromStr for PickupTime {
    type Err = PickupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PickupError::InvalidTimestamp {
            value: s.to_string(),
        };
        let caps = TIMESTAMP_REGEX.captures(s.trim()).ok_or_else(invalid)?;
        let field = |i: usize| -> Result<u16, PickupError> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().map_err(|_| invalid()),
                None => Ok(0),
            }
        };

        let (month, day, year) = (field(1)?, field(2)?, field(3)?);
        let (hour, minute, second) = (field(4)?, field(5)?, field(6)?);
        if !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(invalid());
        }

        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        })
    }
}

fn days_in_month(year: u16, month: u16) -> u16 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pickup {
    pub time: PickupTime,
    pub lat: f64,
    pub lon: f64,
    pub base: String,
}

#[derive(Deserialize)]
struct PickupRecord {
    #[serde(rename = "date/time")]
    date_time: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    base: String,
}

/// Read at most `nrows` pickups from CSV text.
pub fn load_pickups(csv_content: &str, nrows: usize) -> Result<Vec<Pickup>, PickupError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    for required in [DATE_COLUMN, "lat", "lon"] {
        if !headers.iter().any(|h| h == required) {
            return Err(PickupError::MissingColumn {
                column: required.to_string(),
            });
        }
    }
    reader.set_headers(headers);

    let mut pickups = Vec::with_capacity(nrows.min(1024));
    for record in reader.deserialize::<PickupRecord>().take(nrows) {
        let record = record?;
        pickups.push(Pickup {
            time: record.date_time.parse()?,
            lat: record.lat,
            lon: record.lon,
            base: record.base,
        });
    }

    info!("Loaded {} pickups from CSV content", pickups.len());
    Ok(pickups)
}

/// Pickups whose timestamp hour equals `hour`.
pub fn filter_by_hour(pickups: &[Pickup], hour: u32) -> Result<Vec<Pickup>, PickupError> {
    if hour as usize >= HOURS_PER_DAY {
        return Err(PickupError::HourOutOfRange { hour });
    }
    let filtered: Vec<Pickup> = pickups
        .iter()
        .filter(|p| u32::from(p.time.hour) == hour)
        .cloned()
        .collect();
    debug!("{} of {} pickups at {}:00", filtered.len(), pickups.len(), hour);
    Ok(filtered)
}

/// Number of pickups in each hour of the day.
pub fn hourly_histogram(pickups: &[Pickup]) -> [u32; HOURS_PER_DAY] {
    let mut bins = [0u32; HOURS_PER_DAY];
    for p in pickups {
        bins[usize::from(p.time.hour)] += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "\
Date/Time,Lat,Lon,Base
9/1/2014 0:01:00,40.2201,-74.0021,B02512
9/1/2014 17:45:00,40.7500,-73.9900,B02512
9/1/2014 17:05:00,40.7370,-73.9891,B02598
9/2/2014 5:30:00,40.6449,-73.7822,B02617
9/2/2014 17:59:59,40.7219,-73.9940,B02682
";

    fn sample() -> Vec<Pickup> {
        load_pickups(SAMPLE, 100).unwrap()
    }

    #[test]
    fn loads_and_lowercases_headers() {
        let pickups = sample();
        assert_eq!(pickups.len(), 5);
        assert_eq!(pickups[1].time.hour, 17);
        assert_eq!(pickups[1].time.minute, 45);
        assert_eq!(pickups[3].base, "B02617");
        assert_eq!(pickups[0].time.to_string(), "2014-09-01 00:01:00");
    }

    #[test]
    fn respects_row_limit() {
        assert_eq!(load_pickups(SAMPLE, 2).unwrap().len(), 2);
        assert!(load_pickups(SAMPLE, 0).unwrap().is_empty());
    }

    #[test]
    fn missing_date_column_is_reported() {
        let err = load_pickups("Lat,Lon\n1.0,2.0\n", 10).unwrap_err();
        assert!(matches!(err, PickupError::MissingColumn { column } if column == DATE_COLUMN));
    }

    #[test]
    fn bad_timestamp_is_reported() {
        let csv = "Date/Time,Lat,Lon,Base\n9/1/2014 25:00:00,1.0,2.0,B1\n";
        assert!(matches!(
            load_pickups(csv, 10),
            Err(PickupError::InvalidTimestamp { .. })
        ));
    }

    #[rstest]
    #[case(17, 3)]
    #[case(0, 1)]
    #[case(5, 1)]
    #[case(12, 0)]
    fn filter_keeps_only_matching_hour(#[case] hour: u32, #[case] expected: usize) {
        let filtered = filter_by_hour(&sample(), hour).unwrap();
        assert_eq!(filtered.len(), expected);
        assert!(filtered.iter().all(|p| u32::from(p.time.hour) == hour));
    }

    #[test]
    fn filter_rejects_invalid_hour() {
        assert!(matches!(
            filter_by_hour(&sample(), 24),
            Err(PickupError::HourOutOfRange { hour: 24 })
        ));
    }

    #[test]
    fn histogram_counts_every_pickup() {
        let bins = hourly_histogram(&sample());
        assert_eq!(bins[17], 3);
        assert_eq!(bins[0], 1);
        assert_eq!(bins.iter().sum::<u32>(), 5);
    }

    #[rstest]
    #[case("9/1/2014 0:01:00", (2014, 9, 1, 0, 1, 0))]
    #[case("12/31/2014 23:59", (2014, 12, 31, 23, 59, 0))]
    #[case("2/29/2016 6:30:15", (2016, 2, 29, 6, 30, 15))]
    fn parses_timestamps(#[case] input: &str, #[case] expected: (u16, u8, u8, u8, u8, u8)) {
        let t: PickupTime = input.parse().unwrap();
        assert_eq!((t.year, t.month, t.day, t.hour, t.minute, t.second), expected);
    }

    #[rstest]
    #[case("")]
    #[case("2014-09-01 00:01:00")]
    #[case("13/1/2014 0:01:00")]
    #[case("9/1/2014 10:60:00")]
    #[case("2/31/2014 8:00:00")]
    #[case("2/29/2014 8:00:00")]
    #[case("4/31/2014 8:00:00")]
    fn rejects_malformed_timestamps(#[case] input: &str) {
        assert!(input.parse::<PickupTime>().is_err());
    }
}
