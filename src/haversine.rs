use std::f64::consts::PI;

use crate::Point;

/// Approximate radius of the earth in miles
pub const EARTH_RADIUS_MILES: f64 = 3962.17341;

/// Approximate circumference of the earth at the equator in miles
pub const EARTH_CIRCUMFERENCE_MILES: f64 = 2. * PI * EARTH_RADIUS_MILES;

/// Great-circle distance in miles between two points, `None` if either has no
/// location.
pub fn haversine_distance(fix1: &dyn Point, fix2: &dyn Point) -> Option<f64> {
    Some(EARTH_RADIUS_MILES * central_angle(fix1, fix2)?)
}

/// Angular separation of two points in radians.
pub(crate) fn central_angle(fix1: &dyn Point, fix2: &dyn Point) -> Option<f64> {
    let (lat1, lon1) = fix1.location()?;
    let (lat2, lon2) = fix2.location()?;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_rho = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.).sin() * (delta_phi / 2.).sin() +
        phi1.cos() * phi2.cos() *
            (delta_rho / 2.).sin() * (delta_rho / 2.).sin();

    // rounding can push `a` just past 1 for antipodal points
    let a = a.min(1.);

    Some(2. * a.sqrt().atan2((1. - a).sqrt()))
}
