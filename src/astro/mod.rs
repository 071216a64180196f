//! Astronomical geometry utilities.
//!
//! Pure, deterministic functions with no side effects: time-scale helpers,
//! equatorial → horizontal transforms, and a low-precision lunar ephemeris
//! feeding the phase-based moon-avoidance curve. All angles are degrees
//! unless noted otherwise; all functions are total for in-range inputs.

pub mod moon;
pub mod time;
pub mod transforms;

pub use moon::{
    moon_age, moon_avoidance_separation, moon_equatorial, moon_separation, DAYS_IN_LUNAR_CYCLE,
};
pub use time::{greenwich_sidereal_time, julian_date, local_sidereal_time};
pub use transforms::{altitude, angular_separation, azimuth, horizontal};
