//! Great circle and 3D distances
use crate::constants::EARTH_RADIUS_KM;
use crate::position::GeodeticPoint;

/// Great circle surface distance between two points, in km,
/// using the haversine formula. Altitudes are ignored.
pub fn haversine_km(a: &GeodeticPoint, b: &GeodeticPoint) -> f64 {
    let phi_a = a.latitude_ddeg.to_radians();
    let phi_b = b.latitude_ddeg.to_radians();
    let d_phi = (b.latitude_ddeg - a.latitude_ddeg).to_radians();
    let d_lambda = (b.longitude_ddeg - a.longitude_ddeg).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    // rounding may push h slightly outside [0, 1] on antipodes
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// 3D distance between two points, in whole km (rounded up).
/// The surface distance and the altitude difference are combined
/// as two orthogonal components. Coordinates are not validated here:
/// out of range latitudes or longitudes still produce a value.
pub fn distance_3d(a: &GeodeticPoint, b: &GeodeticPoint) -> f64 {
    let surface_km = haversine_km(a, b);
    let d_alt_km = b.altitude_km - a.altitude_km;
    surface_km.hypot(d_alt_km).ceil()
}
