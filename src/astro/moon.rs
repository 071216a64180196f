//! Low-precision solar/lunar positions, synodic age, and the avoidance curve.
//!
//! The ephemeris is a truncated Meeus series (ch. 25 and 47), good to a few
//! arcminutes in longitude — far tighter than the degrees-scale thresholds of
//! the moon-avoidance gate it feeds.

use chrono::{DateTime, Utc};

use super::time::{julian_centuries, julian_date};
use super::transforms::angular_separation;
use crate::models::ObserverLocation;

/// Days in one synodic lunar cycle.
pub const DAYS_IN_LUNAR_CYCLE: f64 = 29.530_59;

/// Mean obliquity of the ecliptic in degrees at `t` Julian centuries.
fn mean_obliquity(t: f64) -> f64 {
    23.439_291_1 - 0.013_004_2 * t
}

/// Geometric solar ecliptic longitude in degrees at `t` Julian centuries.
fn sun_ecliptic_longitude(t: f64) -> f64 {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();

    let equation_of_center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mean_anomaly.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000_289 * (3.0 * mean_anomaly).sin();

    (mean_longitude + equation_of_center).rem_euclid(360.0)
}

/// Lunar ecliptic longitude and latitude in degrees at `t` Julian centuries.
fn moon_ecliptic(t: f64) -> (f64, f64) {
    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let d = (297.850_192_1 + 445_267.111_403_4 * t).to_radians(); // mean elongation
    let m = (357.529_109_2 + 35_999.050_290_9 * t).to_radians(); // solar anomaly
    let mp = (134.963_396_4 + 477_198.867_505_5 * t).to_radians(); // lunar anomaly
    let f = (93.272_095_0 + 483_202.017_523_3 * t).to_radians(); // argument of latitude

    let longitude = mean_longitude
        + 6.288_774 * mp.sin()
        + 1.274_027 * (2.0 * d - mp).sin()
        + 0.658_314 * (2.0 * d).sin()
        + 0.213_618 * (2.0 * mp).sin()
        - 0.185_116 * m.sin()
        - 0.114_332 * (2.0 * f).sin()
        + 0.058_793 * (2.0 * (d - mp)).sin()
        + 0.057_066 * (2.0 * d - m - mp).sin()
        + 0.053_322 * (2.0 * d + mp).sin()
        + 0.045_758 * (2.0 * d - m).sin();

    let latitude = 5.128_122 * f.sin()
        + 0.280_602 * (mp + f).sin()
        + 0.277_693 * (mp - f).sin()
        + 0.173_237 * (2.0 * d - f).sin()
        + 0.055_413 * (2.0 * d - mp + f).sin()
        + 0.046_271 * (2.0 * d - mp - f).sin();

    (longitude.rem_euclid(360.0), latitude)
}

/// Geocentric equatorial position of the Moon at `at`: `(ra, dec)` degrees.
pub fn moon_equatorial(at: DateTime<Utc>) -> (f64, f64) {
    let t = julian_centuries(julian_date(at));
    let (longitude, latitude) = moon_ecliptic(t);
    let obliquity = mean_obliquity(t).to_radians();
    let longitude = longitude.to_radians();
    let latitude = latitude.to_radians();

    let ra = (longitude.sin() * obliquity.cos() - latitude.tan() * obliquity.sin())
        .atan2(longitude.cos());
    let dec = (latitude.sin() * obliquity.cos()
        + latitude.cos() * obliquity.sin() * longitude.sin())
    .clamp(-1.0, 1.0)
    .asin();

    (ra.to_degrees().rem_euclid(360.0), dec.to_degrees())
}

/// Angular distance in degrees between the Moon and an equatorial position
/// at `at`.
///
/// The lunar position is geocentric; topocentric parallax (< 1 degree) is
/// negligible against the degrees-scale separation thresholds, so `location`
/// does not enter the computation.
pub fn moon_separation(_location: &ObserverLocation, ra: f64, dec: f64, at: DateTime<Utc>) -> f64 {
    let (moon_ra, moon_dec) = moon_equatorial(at);
    angular_separation(moon_ra, moon_dec, ra, dec)
}

/// Age of the Moon at `at` as a linear day count within the synodic cycle,
/// normalized to [0, [`DAYS_IN_LUNAR_CYCLE`]). 0 = new moon, half the cycle
/// = full moon.
pub fn moon_age(at: DateTime<Utc>) -> f64 {
    let t = julian_centuries(julian_date(at));
    let (moon_longitude, _) = moon_ecliptic(t);
    let elongation = (moon_longitude - sun_ecliptic_longitude(t)).rem_euclid(360.0);
    let age = elongation / 360.0 * DAYS_IN_LUNAR_CYCLE;
    // rem_euclid can round up to the modulus itself for tiny negative inputs.
    if age < DAYS_IN_LUNAR_CYCLE {
        age
    } else {
        0.0
    }
}

/// Required minimum lunar separation in degrees at `at`, for an exposure with
/// avoidance parameters `distance` (degrees) and `width` (days).
///
/// A Lorentzian centered on full moon: the value approaches `distance` at
/// full moon and falls off toward new moon, with `width` controlling how
/// narrow the high-avoidance window is. `width == 0` is treated as `1`.
pub fn moon_avoidance_separation(at: DateTime<Utc>, distance: f64, width: f64) -> f64 {
    let width = if width == 0.0 { 1.0 } else { width };
    let offset = (0.5 - moon_age(at) / DAYS_IN_LUNAR_CYCLE) / (width / DAYS_IN_LUNAR_CYCLE);
    distance / (1.0 + offset * offset)
}
