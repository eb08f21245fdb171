//! Decoding of stored option values into what a date card displays.
//!
//! An option value is either a calendar date (`2022-03-14`) or a time slot
//! written as two local date-times joined by a slash
//! (`2022-03-14T08:00:00/2022-03-14T09:00:00`). Time slots are local to the
//! poll's time zone and get converted into the viewer's zone; dates are
//! never shifted.

use crate::model::types::Error;
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const TIME_DISPLAY_FORMAT: &str = "%I:%M %p";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    /// short month name, `Mar`
    pub month: String,
    /// short day of week, `Mon`
    pub dow: String,
}

impl DateParts {
    fn of(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.format("%b").to_string(),
            dow: date.format("%a").to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum DateOption {
    Date(DateParts),
    TimeSlot {
        date: DateParts,
        start_time: String,
        end_time: String,
    },
}

impl DateOption {
    pub fn date(&self) -> &DateParts {
        match self {
            DateOption::Date(date) => date,
            DateOption::TimeSlot { date, .. } => date,
        }
    }

    pub fn is_time_slot(&self) -> bool {
        matches!(self, DateOption::TimeSlot { .. })
    }
}

fn invalid(value: &str, reason: impl Into<String>) -> Error {
    Error::InvalidDateOption {
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn parse_time_zone(name: &str) -> Result<Tz, Error> {
    name.parse::<Tz>()
        .map_err(|e| Error::InvalidRequest(format!("unknown time zone {name}: {e}")))
}

fn parse_date_time(value: &str, part: &str) -> Result<NaiveDateTime, Error> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(part, format).ok())
        .ok_or_else(|| invalid(value, format!("{part:?} is not a local date-time")))
}

fn parse_date(value: &str) -> Result<NaiveDate, Error> {
    if value.contains('T') {
        return Ok(parse_date_time(value, value)?.date());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| invalid(value, format!("not a date: {e}")))
}

/// Reads `time` as wall-clock time in `from` and returns the wall-clock time in `to`.
fn convert(value: &str, time: NaiveDateTime, from: Tz, to: Tz) -> Result<NaiveDateTime, Error> {
    let instant = from
        .from_local_datetime(&time)
        .earliest()
        .ok_or_else(|| invalid(value, format!("{time} does not exist in {}", from.name())))?;
    Ok(instant.with_timezone(&to).naive_local())
}

/// Decodes a stored option value for display.
///
/// Time slots are converted only when both zones are known, otherwise they
/// are floating and shown as stored.
pub fn decode_date_option(
    value: &str,
    time_zone: Option<&str>,
    target_time_zone: Option<&str>,
) -> Result<DateOption, Error> {
    let Some((start, end)) = value.split_once('/') else {
        return Ok(DateOption::Date(DateParts::of(parse_date(value)?)));
    };

    let mut start = parse_date_time(value, start)?;
    let mut end = parse_date_time(value, end)?;
    if end < start {
        return Err(invalid(value, "time slot ends before it starts"));
    }

    if let (Some(from), Some(to)) = (time_zone, target_time_zone) {
        let from = parse_time_zone(from)?;
        let to = parse_time_zone(to)?;
        start = convert(value, start, from, to)?;
        end = convert(value, end, from, to)?;
    }

    Ok(DateOption::TimeSlot {
        date: DateParts::of(start.date()),
        start_time: start.format(TIME_DISPLAY_FORMAT).to_string(),
        end_time: end.format(TIME_DISPLAY_FORMAT).to_string(),
    })
}

pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn encode_time_slot(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "{}/{}",
        start.format(DATE_TIME_FORMATS[0]),
        end.format(DATE_TIME_FORMATS[0])
    )
}

/// All IANA zone names, for the time zone picker.
pub fn time_zone_names() -> impl Iterator<Item = &'static str> {
    chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name())
}
