/// Anything that can be placed on the globe.
///
/// Each axis is `None` when the value is unknown. Implementors are expected
/// to only ever report in-range latitudes and longitudes.
pub trait Point: Sync {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
    fn altitude(&self) -> Option<f64>;

    /// Latitude and longitude, if both are known.
    fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude()?, self.longitude()?))
    }
}
