use std::f64::consts::PI;

use crate::{Coordinate, Point};
use crate::haversine::central_angle;

// angles (radians) and sines below this are treated as zero
const EPSILON: f64 = 1e-12;

/// Outcome of intersecting two great-circle paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// The paths cross here. Coincident starting points, and paths that both
    /// run along the great circle through the two points without leaving
    /// each other behind, yield the first point.
    Crossing(Coordinate),
    /// The paths turn away from each other in opposite senses, or run apart
    /// along the great circle through both points, so there is no single
    /// crossing ahead of both.
    Ambiguous,
    /// A starting point has no location or a bearing is not a number.
    Undefined,
}

impl Intersection {
    pub fn coordinate(self) -> Option<Coordinate> {
        match self {
            Intersection::Crossing(coordinate) => Some(coordinate),
            _ => None,
        }
    }
}

/// Intersects the great circle leaving `p1` on `bearing1` with the one leaving
/// `p2` on `bearing2`. Bearings are in degrees.
pub fn intersection(p1: &Coordinate, bearing1: f64, p2: &Coordinate, bearing2: f64) -> Intersection {
    let ((lat1, lon1), (lat2, lon2)) = match (p1.location(), p2.location()) {
        (Some(l1), Some(l2)) => (l1, l2),
        _ => return Intersection::Undefined,
    };

    if !bearing1.is_finite() || !bearing2.is_finite() {
        return Intersection::Undefined;
    }

    let phi1 = lat1.to_radians();
    let lambda1 = lon1.to_radians();
    let phi2 = lat2.to_radians();
    let lambda2 = lon2.to_radians();
    let theta13 = bearing1.to_radians();
    let theta23 = bearing2.to_radians();

    let delta12 = match central_angle(p1, p2) {
        Some(delta12) => delta12,
        None => return Intersection::Undefined,
    };

    // also catches one point stored twice, e.g. a pole with two longitudes
    if delta12 < EPSILON {
        return Intersection::Crossing(*p1);
    }

    // initial/final bearings between the two points
    let theta_a = acos_or_zero((phi2.sin() - phi1.sin() * delta12.cos()) / (delta12.sin() * phi1.cos()));
    let theta_b = acos_or_zero((phi1.sin() - phi2.sin() * delta12.cos()) / (delta12.sin() * phi2.cos()));

    let (theta12, theta21) = if (lambda2 - lambda1).sin() > 0. {
        (theta_a, 2. * PI - theta_b)
    } else {
        (2. * PI - theta_a, theta_b)
    };

    let alpha1 = theta13 - theta12; // angle 2-1-3
    let alpha2 = theta21 - theta23; // angle 1-2-3

    // both paths lie on the great circle through p1 and p2
    if alpha1.sin().abs() < EPSILON && alpha2.sin().abs() < EPSILON {
        return if alpha1.cos() < 0. && alpha2.cos() < 0. {
            Intersection::Ambiguous
        } else {
            Intersection::Crossing(*p1)
        };
    }

    if alpha1.sin() * alpha2.sin() < 0. {
        return Intersection::Ambiguous;
    }

    let alpha3 = acos_or_zero(-alpha1.cos() * alpha2.cos() + alpha1.sin() * alpha2.sin() * delta12.cos());
    let delta13 = (delta12.sin() * alpha1.sin() * alpha2.sin())
        .atan2(alpha2.cos() + alpha1.cos() * alpha3.cos());

    let phi3 = (phi1.sin() * delta13.cos() + phi1.cos() * delta13.sin() * theta13.cos())
        .max(-1.)
        .min(1.)
        .asin();
    let delta_lambda13 = (theta13.sin() * delta13.sin() * phi1.cos())
        .atan2(delta13.cos() - phi1.sin() * phi3.sin());
    let lambda3 = lambda1 + delta_lambda13;

    let latitude = phi3.to_degrees().max(-90.).min(90.);
    let longitude = normalize_longitude(lambda3.to_degrees());

    Intersection::Crossing(Coordinate::new(latitude, longitude))
}

/// Folds any longitude in degrees into `(-180, 180]`.
pub fn normalize_longitude(degrees: f64) -> f64 {
    let longitude = (degrees + 180.).rem_euclid(360.) - 180.;
    if longitude <= -180. { 180. } else { longitude }
}

// rounding can push the argument slightly out of [-1, 1], and a division by a
// vanishing sine leaves it infinite or NaN
fn acos_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x.max(-1.).min(1.).acos()
    } else {
        0.
    }
}
