use crate::error::GeoError;
use crate::models::order::{Address, GeoPoint};

const EARTH_RADIUS_KM: f64 = 6_371.0;

fn validate(point: &GeoPoint) -> Result<(), GeoError> {
    if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
        return Err(GeoError::InvalidCoordinate {
            axis: "lat",
            value: point.lat,
        });
    }
    if !point.lng.is_finite() || !(-180.0..=180.0).contains(&point.lng) {
        return Err(GeoError::InvalidCoordinate {
            axis: "lng",
            value: point.lng,
        });
    }
    Ok(())
}

/// Great-circle distance in kilometres. Symmetric and non-negative; exactly
/// zero for identical points.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> Result<f64, GeoError> {
    validate(a)?;
    validate(b)?;

    if a == b {
        return Ok(0.0);
    }

    Ok(haversine_km(a, b))
}

/// Straight-line distance between an order's endpoints. `None` means the
/// distance is unknown because one side has no coordinates; that is not an
/// error here, the pricing layer decides whether it can live without it.
pub fn order_distance(pickup: &Address, dropoff: &Address) -> Result<Option<f64>, GeoError> {
    match (&pickup.location, &dropoff.location) {
        (Some(a), Some(b)) => distance_km(a, b).map(Some),
        _ => Ok(None),
    }
}

fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lng = (delta_lng / 2.0).sin();

    let haversine = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;
    let central_angle = 2.0 * haversine.sqrt().asin();

    EARTH_RADIUS_KM * central_angle
}
