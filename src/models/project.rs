//! Imaging projects: a top-level goal grouping targets under one policy.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;
use super::grader::Grader;
use super::horizon::Horizon;
use super::ranking::{best_by_chain, TargetCriterion};
use super::target::Target;
use super::ObserverLocation;
use crate::session::SessionState;

/// When flat-calibration frames become due for a project's exposures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlatType {
    /// Every accepted exposure is logged for flats immediately.
    Nightly,
    /// A target's exposures are logged once the target completes.
    UponTargetCompletion,
    /// Every exposure of every target is logged once the project completes.
    #[default]
    UponProjectCompletion,
}

/// A top-level imaging goal with its own priority, eligibility policy and
/// completion bookkeeping, owning an ordered sequence of targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub active: bool,
    /// Lower is more important.
    pub priority: i32,
    /// Dither cadence in accepted frames; 0 or negative disables dithering.
    #[serde(default)]
    pub dither_every: i32,
    /// Hard lower altitude bound for every target, degrees.
    pub minimum_altitude: f64,
    /// Added to the horizon profile's altitude bound, degrees.
    #[serde(default)]
    pub horizon_offset: f64,
    #[serde(default)]
    pub center_targets: bool,
    #[serde(default)]
    pub use_mechanical_rotation: bool,
    /// Flat frames pending for this project.
    #[serde(default)]
    pub take_flats: bool,
    #[serde(default)]
    pub flat_amount: u32,
    #[serde(default)]
    pub flat_type: FlatType,
    pub image_grader: Grader,
    #[serde(default = "TargetCriterion::default_chain")]
    pub target_selection_priority: Vec<TargetCriterion>,
    pub targets: Vec<Target>,

    /// Backing store file; set by the loader, never serialized.
    #[serde(skip)]
    pub(crate) source: Option<PathBuf>,
}

impl Project {
    /// A project is eligible iff at least one of its targets is.
    pub fn is_valid(&self) -> bool {
        self.targets.iter().any(|target| target.is_valid())
    }

    /// Force the project and every descendant ineligible.
    pub fn invalidate(&mut self) {
        for target in &mut self.targets {
            target.invalidate();
        }
    }

    pub fn required_amount(&self) -> u32 {
        self.targets.iter().map(|t| t.required_amount()).sum()
    }

    pub fn accepted_amount(&self) -> u32 {
        self.targets.iter().map(|t| t.accepted_amount()).sum()
    }

    /// Accepted/required ratio over all targets; 1 when nothing is required,
    /// so empty projects never block scheduling.
    pub fn completion(&self) -> f64 {
        let required = self.required_amount();
        if required == 0 {
            1.0
        } else {
            f64::from(self.accepted_amount()) / f64::from(required)
        }
    }

    /// Attach the store file this project is persisted to.
    pub fn attach_store_path(&mut self, path: PathBuf) {
        self.source = Some(path);
    }

    /// Recompute target eligibility depth-first: completed targets are out,
    /// then the altitude bound, then the horizon profile, then each
    /// surviving target's exposures.
    pub(crate) fn filter_targets(
        &mut self,
        at: DateTime<Utc>,
        location: &ObserverLocation,
        horizon: Option<&dyn Horizon>,
    ) {
        for target in &mut self.targets {
            debug!("filter: target '{}'", target.name);

            if target.completion() >= 1.0 {
                target.invalidate();
                debug!("filter: target '{}' rejected (completed)", target.name);
                continue;
            }

            let (altitude, azimuth) =
                crate::astro::horizontal(location, target.right_ascension, target.declination, at);
            target.altitude = altitude;
            target.azimuth = azimuth;

            if altitude < self.minimum_altitude {
                target.invalidate();
                debug!(
                    "filter: target '{}' rejected (altitude {:.1} below minimum {:.1})",
                    target.name, altitude, self.minimum_altitude
                );
                continue;
            }

            if let Some(horizon) = horizon {
                let bound = horizon.altitude_at(azimuth) + self.horizon_offset;
                if altitude < bound {
                    target.invalidate();
                    debug!(
                        "filter: target '{}' rejected (altitude {:.1} below horizon bound {:.1})",
                        target.name, altitude, bound
                    );
                    continue;
                }
            }

            target.filter_exposures(at, location);
            if !target.is_valid() {
                debug!(
                    "filter: target '{}' rejected (no eligible exposure)",
                    target.name
                );
            }
        }
    }

    /// Best eligible target: the remembered one if it is still eligible,
    /// otherwise the head of this project's criteria-chain ranking.
    pub fn best_target(&self, session: &SessionState) -> Option<&Target> {
        if let Some(current) = session.current_target() {
            if let Some(target) = self
                .targets
                .iter()
                .find(|t| t.is_valid() && t.fingerprint() == *current)
            {
                debug!("select: target '{}' kept (continuity)", target.name);
                return Some(target);
            }
        }

        let valid: Vec<&Target> = self.targets.iter().filter(|t| t.is_valid()).collect();
        best_by_chain(valid, &self.target_selection_priority)
    }

    /// Resolve a continuity fingerprint back into a live target.
    pub fn target_by_fingerprint(&self, fingerprint: &Fingerprint) -> Option<&Target> {
        self.targets.iter().find(|t| t.fingerprint() == *fingerprint)
    }

    /// Identity over scheduling configuration; `active`, progress counters
    /// and flat state excluded so identity survives deactivation and
    /// progress mutation.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::digest(&format!(
            "{}_{}_{}_{}_{}_{}_{}_{}_{:?}",
            self.name,
            self.priority,
            self.dither_every,
            self.minimum_altitude,
            self.horizon_offset,
            self.center_targets,
            self.use_mechanical_rotation,
            self.image_grader.identity(),
            self.target_selection_priority,
        ))
    }
}
