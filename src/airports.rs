use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use failure::Error;
use log::debug;
use ord_subset::OrdSubsetIterExt;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, Point};
use crate::errors::TrackError;
use crate::haversine::haversine_distance;
use crate::parallel::opt_par_map;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Field elevation in feet
    pub elevation: i32,
}

impl Airport {
    /// The airport reference point, with the field elevation as altitude.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude).with_altitude(f64::from(self.elevation))
    }
}

impl Point for Airport {
    fn latitude(&self) -> Option<f64> {
        self.coordinate().latitude()
    }
    fn longitude(&self) -> Option<f64> {
        self.coordinate().longitude()
    }
    fn altitude(&self) -> Option<f64> {
        Some(f64::from(self.elevation))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AirportCollection {
    airports: Vec<Airport>,
}

impl AirportCollection {
    pub fn new(airports: Vec<Airport>) -> AirportCollection {
        AirportCollection { airports }
    }

    /// Reads a JSON array of airport records.
    pub fn from_reader<R: Read>(reader: R) -> Result<AirportCollection, Error> {
        let airports: Vec<Airport> = serde_json::from_reader(reader)?;
        debug!("Loaded {} airports", airports.len());

        Ok(AirportCollection::new(airports))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AirportCollection, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TrackError::AirportFileNotFound { path: path.display().to_string() }.into());
        }

        debug!("Loading airports from {}", path.display());
        let file = File::open(path)?;
        AirportCollection::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Airport> {
        self.airports.iter()
    }

    /// The airport with the shortest great-circle distance to `point`.
    ///
    /// Airports without a valid location are skipped. Returns `None` for an
    /// empty collection or when `point` has no location.
    pub fn closest_airport(&self, point: &dyn Point) -> Option<&Airport> {
        point.location()?;

        let distances = opt_par_map(&self.airports, |airport| haversine_distance(airport, point));

        distances.into_iter()
            .enumerate()
            .filter_map(|(index, distance)| distance.map(|distance| (index, distance)))
            .ord_subset_min_by_key(|&(_, distance)| distance)
            .map(|(index, _)| &self.airports[index])
    }
}
