//! Exposure plans: one capture configuration with a frame-count goal.

use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;

/// A capture configuration (filter/time/gain/offset/binning) with a
/// required-frame-count goal, progress counters, and the two shape
/// parameters of its lunar-avoidance curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exposure {
    pub filter: String,
    pub exposure_time: f64,
    pub gain: i32,
    pub offset: i32,
    /// Symmetric binning factor (n x n).
    pub binning: u32,
    /// Avoidance-curve amplitude: required separation at full moon, degrees.
    pub moon_separation_angle: f64,
    /// Avoidance-curve width in days; 0 behaves as 1.
    pub moon_separation_width: f64,
    pub required_amount: u32,
    #[serde(default)]
    pub accepted_amount: u32,

    /// Eligibility for the current pass. Owned by the filter pass; never
    /// persisted.
    #[serde(skip)]
    pub valid: bool,
}

impl Exposure {
    /// Accepted/required frame ratio. Defined as 1 when nothing is required,
    /// so degenerate plans read as already complete and never divide by zero.
    /// Exceeding the goal is visible as a ratio above 1, not clamped.
    pub fn completion(&self) -> f64 {
        if self.required_amount == 0 {
            1.0
        } else {
            f64::from(self.accepted_amount) / f64::from(self.required_amount)
        }
    }

    /// Moon-avoidance constraint strength: the `angle x width` product.
    /// Larger means the exposure is schedulable in fewer lunar windows.
    pub fn selectivity(&self) -> f64 {
        self.moon_separation_angle * self.moon_separation_width
    }

    /// Identity over the capture configuration; progress counters excluded.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::digest(&format!(
            "{}_{}_{}_{}_{}_{}_{}",
            self.filter,
            self.exposure_time,
            self.gain,
            self.offset,
            self.binning,
            self.moon_separation_angle,
            self.moon_separation_width,
        ))
    }
}
