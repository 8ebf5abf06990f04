use failure::Fail;

/// Failures of the airport/event glue. The geodesic functions never fail.
#[derive(Debug, Fail)]
pub enum TrackError {
    #[fail(display = "airport file not found: {}", path)]
    AirportFileNotFound { path: String },

    #[fail(display = "event for aircraft {} passed to the tracker of {}", found, expected)]
    MismatchedAircraft { expected: String, found: String },

    #[fail(display = "invalid event on line {}: {}", line, reason)]
    InvalidEvent { line: usize, reason: String },
}
