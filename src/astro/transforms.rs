//! Equatorial → horizontal coordinate transforms and angular separation.

use chrono::{DateTime, Utc};

use super::time::local_sidereal_time;
use crate::models::ObserverLocation;

/// Current altitude of an equatorial position in degrees, as seen from
/// `location` at `at`.
pub fn altitude(location: &ObserverLocation, ra: f64, dec: f64, at: DateTime<Utc>) -> f64 {
    horizontal(location, ra, dec, at).0
}

/// Current azimuth of an equatorial position in degrees, measured from North
/// through East, as seen from `location` at `at`.
pub fn azimuth(location: &ObserverLocation, ra: f64, dec: f64, at: DateTime<Utc>) -> f64 {
    horizontal(location, ra, dec, at).1
}

/// Both horizontal coordinates of an equatorial position: `(altitude,
/// azimuth)` in degrees, azimuth from North through East in [0, 360).
///
/// Standard local-sidereal-time → hour-angle → horizontal transform
/// (Meeus ch. 13). Right ascension and declination are degrees.
pub fn horizontal(location: &ObserverLocation, ra: f64, dec: f64, at: DateTime<Utc>) -> (f64, f64) {
    let hour_angle = (local_sidereal_time(at, location.longitude) - ra).to_radians();
    let latitude = location.latitude.to_radians();
    let dec = dec.to_radians();

    let sin_altitude = latitude.sin() * dec.sin() + latitude.cos() * dec.cos() * hour_angle.cos();
    let altitude = sin_altitude.clamp(-1.0, 1.0).asin();

    // Measured from South, westward; shifted to the from-North convention.
    let azimuth = hour_angle
        .sin()
        .atan2(hour_angle.cos() * latitude.sin() - dec.tan() * latitude.cos());

    (
        altitude.to_degrees(),
        (azimuth.to_degrees() + 180.0).rem_euclid(360.0),
    )
}

/// Great-circle separation between two equatorial positions, in degrees.
pub fn angular_separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let dec1 = dec1.to_radians();
    let dec2 = dec2.to_radians();
    let delta_ra = (ra1 - ra2).to_radians();

    let cos_theta = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * delta_ra.cos();
    cos_theta.clamp(-1.0, 1.0).acos().to_degrees()
}
