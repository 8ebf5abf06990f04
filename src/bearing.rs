use crate::Point;

/// Initial compass bearing in degrees `[0, 360)` when leaving `from` on the
/// great circle towards `to`.
pub fn initial_bearing(from: &dyn Point, to: &dyn Point) -> Option<f64> {
    let (lat1, lon1) = from.location()?;
    let (lat2, lon2) = to.location()?;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    let theta = y.atan2(x);

    Some(normalize_bearing(theta.to_degrees()))
}

/// Folds any angle in degrees into `[0, 360)`.
pub fn normalize_bearing(degrees: f64) -> f64 {
    let bearing = degrees.rem_euclid(360.);
    // rem_euclid may round tiny negative inputs up to exactly 360
    if bearing >= 360. { 0. } else { bearing }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::Coordinate;

    #[test]
    fn washington_to_new_york() {
        let washington = Coordinate::new(38.8977, -77.0365);
        let new_york = Coordinate::new(40.7128, -74.0060);

        let bearing = initial_bearing(&washington, &new_york).unwrap();
        assert!(bearing > 50. && bearing < 55., "bearing was {}", bearing);
    }

    #[test]
    fn cardinal_directions() {
        let origin = Coordinate::new(0., 0.);
        assert_approx_eq!(initial_bearing(&origin, &Coordinate::new(10., 0.)).unwrap(), 0.);
        assert_approx_eq!(initial_bearing(&origin, &Coordinate::new(0., 10.)).unwrap(), 90.);
        assert_approx_eq!(initial_bearing(&origin, &Coordinate::new(-10., 0.)).unwrap(), 180.);
        assert_approx_eq!(initial_bearing(&origin, &Coordinate::new(0., -10.)).unwrap(), 270.);
    }

    #[test]
    fn always_within_range() {
        let points = [
            Coordinate::new(0., 0.),
            Coordinate::new(89.9, 179.9),
            Coordinate::new(-89.9, -179.9),
            Coordinate::new(45., -120.),
            Coordinate::new(-12.5, 77.7),
            Coordinate::new(0., -1e-12),
        ];

        for a in &points {
            for b in &points {
                let bearing = initial_bearing(a, b).unwrap();
                assert!(bearing >= 0. && bearing < 360., "bearing was {}", bearing);
            }
        }
    }

    #[test]
    fn normalize() {
        assert_approx_eq!(normalize_bearing(-90.), 270.);
        assert_approx_eq!(normalize_bearing(720.5), 0.5);
        assert_eq!(normalize_bearing(-1e-20), 0.);
    }

    #[test]
    fn unknown_location_propagates() {
        let known = Coordinate::new(10., 10.);
        assert_eq!(initial_bearing(&known, &Coordinate::unknown()), None);
        assert_eq!(initial_bearing(&Coordinate::unknown(), &known), None);
    }
}
