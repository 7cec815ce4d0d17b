use crate::location::LocationRecord;

/// Mean Earth radius used for every edge weight, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in kilometers.
///
/// The haversine terms are written as `(1 - cos θ) / 2` rather than `sin²(θ / 2)`.
/// Both are equal in exact arithmetic, but reference distances are produced with
/// this exact sequence of operations, so it must not be rewritten.
///
/// Coordinates are not checked: NaN propagates into the result and out-of-range
/// degrees are used as given.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat1 - lat2;
    let dlon = lon1 - lon2;
    let a = (1.0 - dlat.cos()) / 2.0 + lat1.cos() * lat2.cos() * (1.0 - dlon.cos()) / 2.0;
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Distance between two catalog records, in kilometers.
pub fn haversine_between(from: &LocationRecord, to: &LocationRecord) -> f64 {
    haversine_km(from.latitude(), from.longitude(), to.latitude(), to.longitude())
}
