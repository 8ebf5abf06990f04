use std::io::Write;

use chrono::{DateTime, Utc};
use failure::Error;
use serde::Serialize;

/// One leg of an aircraft between two airports.
///
/// A flight that has not landed yet has no arrival, one whose origin was
/// never observed on the ground has no departure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub aircraft_identifier: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub departure_airport: Option<String>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub arrival_airport: Option<String>,
}

impl Flight {
    pub fn new(aircraft_identifier: &str) -> Flight {
        Flight {
            aircraft_identifier: aircraft_identifier.to_string(),
            departure_time: None,
            departure_airport: None,
            arrival_time: None,
            arrival_airport: None,
        }
    }

    pub fn has_landed(&self) -> bool {
        self.arrival_airport.is_some()
    }
}

/// Writes the flights as a pretty-printed JSON array.
pub fn write_flights<W: Write>(flights: &[Flight], mut writer: W) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, flights)?;
    writeln!(writer)?;
    Ok(())
}
