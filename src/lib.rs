#[macro_use] extern crate cfg_if;
extern crate failure;

extern crate chrono;
extern crate ord_subset;
extern crate serde;
extern crate serde_json;

#[cfg(feature = "rayon")]
extern crate rayon;

pub mod airports;
pub mod bearing;
pub mod coordinate;
pub mod errors;
pub mod events;
pub mod flight;
pub mod haversine;
pub mod intersection;
pub mod moving_average;
pub mod tracker;
mod parallel;
mod point;

pub use crate::coordinate::Coordinate;
pub use crate::intersection::Intersection;
pub use crate::point::Point;
