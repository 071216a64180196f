//! Imaging targets: a sky coordinate owning exposure plans.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::exposure::Exposure;
use super::fingerprint::Fingerprint;
use super::ranking::{best_by_chain, ExposureCriterion};
use super::ObserverLocation;
use crate::astro;

/// Rotator position sentinel: no successful rotation cached yet.
pub const ROTATION_UNCACHED: f64 = -1.0;

/// A specific sky coordinate to be imaged, owning one or more exposure plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    /// Equatorial coordinates, degrees.
    pub right_ascension: f64,
    pub declination: f64,
    /// Sky position angle to frame the target at, degrees.
    #[serde(default)]
    pub sky_rotation: f64,
    /// Physical rotator position cached from the last successful rotation
    /// for this target; [`ROTATION_UNCACHED`] until one happened.
    #[serde(default = "uncached_rotation")]
    pub mechanical_rotation: f64,
    #[serde(default = "ExposureCriterion::default_chain")]
    pub exposure_selection_priority: Vec<ExposureCriterion>,
    pub exposures: Vec<Exposure>,

    // Horizontal coordinates cached by the most recent filter pass; feed the
    // ALTITUDE ranking criterion. Never persisted.
    #[serde(skip)]
    pub(crate) altitude: f64,
    #[serde(skip)]
    pub(crate) azimuth: f64,
}

fn uncached_rotation() -> f64 {
    ROTATION_UNCACHED
}

impl Target {
    /// A target is eligible iff at least one of its exposures is.
    pub fn is_valid(&self) -> bool {
        self.exposures.iter().any(|exposure| exposure.valid)
    }

    /// Force the target and every exposure under it ineligible.
    pub fn invalidate(&mut self) {
        for exposure in &mut self.exposures {
            exposure.valid = false;
        }
    }

    pub fn required_amount(&self) -> u32 {
        self.exposures.iter().map(|e| e.required_amount).sum()
    }

    pub fn accepted_amount(&self) -> u32 {
        self.exposures.iter().map(|e| e.accepted_amount).sum()
    }

    /// Accepted/required ratio over all exposures; 1 when nothing is required.
    pub fn completion(&self) -> f64 {
        let required = self.required_amount();
        if required == 0 {
            1.0
        } else {
            f64::from(self.accepted_amount()) / f64::from(required)
        }
    }

    /// Altitude in degrees as of the most recent filter pass.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Azimuth in degrees as of the most recent filter pass.
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Whether a mechanical rotator position has been cached for this target.
    pub fn has_cached_rotation(&self) -> bool {
        self.mechanical_rotation >= 0.0
    }

    /// Recompute exposure eligibility: completed plans are out, the rest are
    /// gated on lunar separation against each plan's avoidance curve.
    pub(crate) fn filter_exposures(&mut self, at: DateTime<Utc>, location: &ObserverLocation) {
        let separation =
            astro::moon_separation(location, self.right_ascension, self.declination, at);

        for exposure in &mut self.exposures {
            if exposure.completion() >= 1.0 {
                exposure.valid = false;
                debug!(
                    "filter: exposure '{}' rejected (completed)",
                    exposure.filter
                );
                continue;
            }

            let required = astro::moon_avoidance_separation(
                at,
                exposure.moon_separation_angle,
                exposure.moon_separation_width,
            );
            if separation < required {
                exposure.valid = false;
                debug!(
                    "filter: exposure '{}' rejected (moon separation {:.1} < {:.1})",
                    exposure.filter, separation, required
                );
                continue;
            }

            exposure.valid = true;
        }
    }

    /// Best eligible exposure by this target's criteria chain.
    ///
    /// Exposure selection carries no continuity memory: it re-evaluates every
    /// cycle so it can respond to the dither counter and moon movement.
    pub fn best_exposure(&self) -> Option<&Exposure> {
        let valid: Vec<&Exposure> = self.exposures.iter().filter(|e| e.valid).collect();
        best_by_chain(valid, &self.exposure_selection_priority)
    }

    /// Identity over name, coordinates, framing and selection configuration;
    /// progress and cached state excluded.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::digest(&format!(
            "{}_{}_{}_{}_{:?}",
            self.name,
            self.right_ascension,
            self.declination,
            self.sky_rotation,
            self.exposure_selection_priority,
        ))
    }
}
