use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use failure::Error;
use log::{debug, trace};

use crate::Coordinate;
use crate::airports::{Airport, AirportCollection};
use crate::errors::TrackError;
use crate::events::AdsbEvent;
use crate::flight::Flight;
use crate::haversine::haversine_distance;
use crate::moving_average::MovingAverage;

/// Thresholds deciding whether an aircraft is on the ground.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Feet above the field elevation below which an aircraft counts as landed
    pub altitude_threshold: f64,
    /// Speed below which an aircraft counts as landed
    pub speed_threshold: f64,
    /// Miles; the averaged distance to the closest airport must stay within
    /// this for an aircraft to count as being at that airport
    pub airport_distance_threshold: f64,
    /// Minimum time between two status changes, suppresses flapping around
    /// the thresholds
    pub min_transition_delay: Duration,
    /// Window of the averaged distance to the closest airport
    pub moving_average_window: Duration,
}

impl Default for TrackerConfig {
    fn default() -> TrackerConfig {
        TrackerConfig {
            altitude_threshold: 500.,
            speed_threshold: 150.,
            airport_distance_threshold: 3.,
            min_transition_delay: Duration::minutes(10),
            moving_average_window: Duration::minutes(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample<T> {
    timestamp: DateTime<Utc>,
    value: T,
}

/// Earliest and latest reported speed, altitude and location of one
/// aircraft since the start of the current flight.
#[derive(Debug, Clone, Default)]
pub struct FlightStats {
    earliest_speed: Option<Sample<f64>>,
    earliest_altitude: Option<Sample<f64>>,
    earliest_location: Option<Sample<Coordinate>>,
    latest_speed: Option<Sample<f64>>,
    latest_altitude: Option<Sample<f64>>,
    latest_location: Option<Sample<Coordinate>>,
}

impl FlightStats {
    pub fn ingest(&mut self, event: &AdsbEvent) {
        let timestamp = event.timestamp;

        if let Some(speed) = event.speed.filter(|it| it.is_finite()) {
            record(&mut self.earliest_speed, &mut self.latest_speed, Sample { timestamp, value: speed });
        }

        if let Some(altitude) = event.altitude.filter(|it| it.is_finite()) {
            record(&mut self.earliest_altitude, &mut self.latest_altitude, Sample { timestamp, value: altitude });
        }

        let coordinate = event.coordinate();
        if coordinate.has_location() {
            record(&mut self.earliest_location, &mut self.latest_location, Sample { timestamp, value: coordinate });
        }
    }

    /// Starts a new flight: the latest samples become the earliest ones.
    pub fn reset(&mut self) {
        self.earliest_speed = self.latest_speed;
        self.earliest_altitude = self.latest_altitude;
        self.earliest_location = self.latest_location;
    }

    pub fn earliest_speed(&self) -> Option<f64> {
        self.earliest_speed.map(|it| it.value)
    }

    pub fn earliest_altitude(&self) -> Option<f64> {
        self.earliest_altitude.map(|it| it.value)
    }

    pub fn earliest_location(&self) -> Option<Coordinate> {
        self.earliest_location.map(|it| it.value)
    }

    pub fn earliest_location_time(&self) -> Option<DateTime<Utc>> {
        self.earliest_location.map(|it| it.timestamp)
    }

    pub fn latest_speed(&self) -> Option<f64> {
        self.latest_speed.map(|it| it.value)
    }

    pub fn latest_altitude(&self) -> Option<f64> {
        self.latest_altitude.map(|it| it.value)
    }

    pub fn latest_location(&self) -> Option<Coordinate> {
        self.latest_location.map(|it| it.value)
    }

    /// The most recent timestamp of the latest speed, altitude and location.
    pub fn latest_time(&self) -> Option<DateTime<Utc>> {
        let speed = self.latest_speed.map(|it| it.timestamp);
        let altitude = self.latest_altitude.map(|it| it.timestamp);
        let location = self.latest_location.map(|it| it.timestamp);

        speed.into_iter().chain(altitude).chain(location).max()
    }
}

fn record<T: Copy>(earliest: &mut Option<Sample<T>>, latest: &mut Option<Sample<T>>, sample: Sample<T>) {
    *latest = Some(sample);
    if earliest.is_none() {
        *earliest = Some(sample);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Grounded,
    Airborne,
}

/// Follows a single aircraft through its events and cuts them into flights
/// whenever it takes off or lands.
///
/// Events are expected in time order.
#[derive(Debug)]
pub struct PlaneTracker<'a> {
    identifier: String,
    airports: &'a AirportCollection,
    config: TrackerConfig,
    stats: FlightStats,
    distance_to_airport: MovingAverage,
    flights: Vec<Flight>,
    status: Option<Status>,
    last_transition: Option<DateTime<Utc>>,
    last_visited: Option<&'a Airport>,
    closest: Option<&'a Airport>,
}

impl<'a> PlaneTracker<'a> {
    pub fn new(identifier: &str, airports: &'a AirportCollection, config: TrackerConfig) -> PlaneTracker<'a> {
        PlaneTracker {
            identifier: identifier.to_string(),
            airports,
            distance_to_airport: MovingAverage::new(config.moving_average_window),
            config,
            stats: FlightStats::default(),
            flights: Vec::new(),
            status: None,
            last_transition: None,
            last_visited: None,
            closest: None,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// `None` until enough has been seen to tell.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn stats(&self) -> &FlightStats {
        &self.stats
    }

    pub fn process_event(&mut self, event: &AdsbEvent) -> Result<(), Error> {
        if event.identifier != self.identifier {
            return Err(TrackError::MismatchedAircraft {
                expected: self.identifier.clone(),
                found: event.identifier.clone(),
            }.into());
        }

        self.stats.ingest(event);

        let coordinate = event.coordinate();
        if !coordinate.has_location() {
            trace!("{}: no location at {}", self.identifier, event.timestamp);
            return Ok(());
        }

        let airports = self.airports;
        let closest = match airports.closest_airport(&coordinate) {
            Some(airport) => airport,
            None => return Ok(()),
        };

        if let Some(distance) = haversine_distance(closest, &coordinate) {
            self.distance_to_airport.ingest(distance, event.timestamp);
        }
        self.closest = Some(closest);

        let min_delay = self.config.min_transition_delay;
        let transition_allowed = self.last_transition
            .map_or(true, |last| event.timestamp - last > min_delay);
        if self.status.is_some() && !transition_allowed {
            return Ok(());
        }

        let previous = self.status;
        let status = match self.current_status(closest) {
            Some(status) => status,
            None => {
                trace!("{}: status undetermined at {}", self.identifier, event.timestamp);
                return Ok(());
            }
        };
        self.status = Some(status);

        if status == Status::Grounded && self.last_visited.is_none() {
            self.last_visited = Some(closest);
        }

        if let Some(previous) = previous {
            if previous != status {
                debug!("{}: {:?} -> {:?} near {} at {}", self.identifier, previous, status, closest.identifier, event.timestamp);
                self.last_transition = Some(event.timestamp);
                self.handle_transition(status);
            }
        }

        Ok(())
    }

    /// Closed flights, followed by the current one if the aircraft is still
    /// in the air.
    pub fn flights(&self) -> Vec<Flight> {
        let mut flights = self.flights.clone();
        if self.status == Some(Status::Airborne) {
            flights.push(self.generate_flight());
        }
        flights
    }

    fn current_status(&self, airport: &Airport) -> Option<Status> {
        let config = &self.config;

        let near_airport = self.distance_to_airport.average()
            .map_or(false, |distance| distance <= config.airport_distance_threshold);
        let low_altitude = self.stats.latest_altitude()
            .map(|altitude| altitude - f64::from(airport.elevation) < config.altitude_threshold);
        let low_speed = self.stats.latest_speed()
            .map(|speed| speed < config.speed_threshold);

        match (low_altitude, low_speed) {
            (Some(true), _) | (_, Some(true)) => Some(Status::Grounded),
            _ if !near_airport => Some(Status::Airborne),
            (None, None) => None,
            _ => Some(Status::Airborne),
        }
    }

    fn handle_transition(&mut self, status: Status) {
        match status {
            Status::Airborne => self.stats.reset(),
            Status::Grounded => {
                let flight = self.generate_flight();
                debug!("{}: flight {:?} -> {:?}", self.identifier, flight.departure_airport, flight.arrival_airport);
                self.flights.push(flight);
                self.last_visited = self.closest;
            }
        }
    }

    fn generate_flight(&self) -> Flight {
        let mut flight = Flight::new(&self.identifier);

        if let Some(airport) = self.last_visited {
            flight.departure_airport = Some(airport.identifier.clone());
            flight.departure_time = self.stats.earliest_location_time();
        }

        if self.status == Some(Status::Grounded) {
            let arrival = self.stats.latest_location()
                .and_then(|location| self.airports.closest_airport(&location));

            if let Some(airport) = arrival {
                flight.arrival_airport = Some(airport.identifier.clone());
                flight.arrival_time = self.stats.latest_time();
            }
        }

        flight
    }
}

/// Routes the events to one tracker per aircraft and collects all of their
/// flights, ordered by aircraft identifier.
pub fn reconstruct_flights(events: &[AdsbEvent], airports: &AirportCollection, config: &TrackerConfig) -> Result<Vec<Flight>, Error> {
    let mut trackers: BTreeMap<&str, PlaneTracker<'_>> = BTreeMap::new();

    for event in events {
        let tracker = trackers.entry(event.identifier.as_str()).or_insert_with(|| {
            debug!("Tracking aircraft {}", event.identifier);
            PlaneTracker::new(&event.identifier, airports, config.clone())
        });

        tracker.process_event(event)?;
    }

    debug!("Processed {} events for {} aircraft", events.len(), trackers.len());

    Ok(trackers.values().flat_map(|tracker| tracker.flights()).collect())
}
