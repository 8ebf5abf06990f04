use std::io::BufRead;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use failure::Error;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{Coordinate, Point};
use crate::errors::TrackError;

/// A single ADS-B report. Any of the measured fields may be missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdsbEvent {
    pub identifier: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    /// Feet
    #[serde(default, deserialize_with = "lenient_f64")]
    pub altitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    /// Degrees
    #[serde(default, deserialize_with = "lenient_f64")]
    pub heading: Option<f64>,
}

impl AdsbEvent {
    /// Parses one JSON encoded event. Numeric fields that are missing, `null`
    /// or not numbers are left empty.
    pub fn from_json(json: &str) -> Result<AdsbEvent, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// The reported position, with altitude and heading attached.
    pub fn coordinate(&self) -> Coordinate {
        let mut coordinate = Coordinate::from_parts(self.latitude, self.longitude);
        if let Some(altitude) = self.altitude {
            coordinate = coordinate.with_altitude(altitude);
        }
        if let Some(heading) = self.heading {
            coordinate = coordinate.with_bearing(heading);
        }
        coordinate
    }
}

impl Point for AdsbEvent {
    fn latitude(&self) -> Option<f64> {
        self.coordinate().latitude()
    }
    fn longitude(&self) -> Option<f64> {
        self.coordinate().longitude()
    }
    fn altitude(&self) -> Option<f64> {
        self.altitude.filter(|it| it.is_finite())
    }
}

/// Reads one event per line, skipping blank lines.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<AdsbEvent>, Error> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match AdsbEvent::from_json(&line) {
            Ok(event) => events.push(event),
            Err(error) => {
                warn!("Failed to parse event: {}", line);
                return Err(TrackError::InvalidEvent { line: index + 1, reason: error.to_string() }.into());
            }
        }
    }

    debug!("Read {} events", events.len());
    Ok(events)
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    use serde::de::Error;

    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", text)))
}

/// RFC 3339, or ISO 8601 without an offset which is taken as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
