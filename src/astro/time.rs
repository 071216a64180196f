//! Time-scale helpers: Julian date and sidereal time.

use chrono::{DateTime, Utc};

/// Julian date of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of the J2000.0 epoch.
pub(crate) const J2000_JD: f64 = 2_451_545.0;

/// Julian date of a UTC instant.
#[inline]
pub fn julian_date(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp() as f64 + f64::from(at.timestamp_subsec_millis()) / 1_000.0;
    UNIX_EPOCH_JD + seconds / 86_400.0
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub(crate) fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Greenwich mean sidereal time in degrees, normalized to [0, 360).
pub fn greenwich_sidereal_time(at: DateTime<Utc>) -> f64 {
    let jd = julian_date(at);
    let t = julian_centuries(jd);
    let gmst = 280.460_618_37
        + 360.985_647_366_29 * (jd - J2000_JD)
        + t * t * (0.000_387_933 - t / 38_710_000.0);
    gmst.rem_euclid(360.0)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(at: DateTime<Utc>, longitude: f64) -> f64 {
    (greenwich_sidereal_time(at) + longitude).rem_euclid(360.0)
}
