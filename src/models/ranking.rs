//! Configurable ranking-criteria chains.
//!
//! All three selection levels (project, target, exposure) rank their valid
//! candidates with the same protocol: an ordered chain of criteria, each
//! yielding a signed score, where the first criterion producing a non-zero
//! score decides the order. Score magnitudes below [`RANK_EPSILON`] count as
//! zero so floating-point jitter cannot flip an intended tie. If the chain
//! exhausts, store order is preserved (the sort is stable).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::exposure::Exposure;
use super::project::Project;
use super::target::Target;

/// Comparison deadband: score magnitudes below this are treated as ties.
pub(crate) const RANK_EPSILON: f64 = 1e-3;

/// One ranking criterion over candidates of type `T`.
///
/// `score` compares two candidates; a negative value places `a` first, a
/// positive value places `b` first.
pub trait Criterion<T> {
    fn score(&self, a: &T, b: &T) -> f64;
}

/// Order two candidates by an ordered criteria chain, first non-zero wins.
pub(crate) fn chain_ordering<T, C: Criterion<T>>(chain: &[C], a: &T, b: &T) -> Ordering {
    for criterion in chain {
        let score = criterion.score(a, b);
        if score <= -RANK_EPSILON {
            return Ordering::Less;
        }
        if score >= RANK_EPSILON {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Head of the stably chain-sorted candidate list, or `None` when empty.
pub(crate) fn best_by_chain<'a, T, C: Criterion<T>>(
    mut candidates: Vec<&'a T>,
    chain: &[C],
) -> Option<&'a T> {
    candidates.sort_by(|a, b| chain_ordering(chain, a, b));
    candidates.first().copied()
}

/// Project-level ranking criteria, configured store-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectCriterion {
    /// Lower numeric priority wins.
    Priority,
    /// Higher completion wins.
    Completion,
    /// Lower completion wins.
    NCompletion,
}

impl ProjectCriterion {
    pub fn default_chain() -> Vec<Self> {
        vec![ProjectCriterion::Priority, ProjectCriterion::Completion]
    }
}

impl Criterion<Project> for ProjectCriterion {
    fn score(&self, a: &Project, b: &Project) -> f64 {
        match self {
            ProjectCriterion::Priority => f64::from(a.priority) - f64::from(b.priority),
            ProjectCriterion::Completion => b.completion() - a.completion(),
            ProjectCriterion::NCompletion => a.completion() - b.completion(),
        }
    }
}

/// Target-level ranking criteria, configured per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetCriterion {
    /// Higher completion wins.
    Completion,
    /// Lower completion wins.
    NCompletion,
    /// Higher current altitude wins.
    Altitude,
    /// Lower current altitude wins.
    NAltitude,
}

impl TargetCriterion {
    pub fn default_chain() -> Vec<Self> {
        vec![TargetCriterion::Completion]
    }
}

impl Criterion<Target> for TargetCriterion {
    fn score(&self, a: &Target, b: &Target) -> f64 {
        match self {
            TargetCriterion::Completion => b.completion() - a.completion(),
            TargetCriterion::NCompletion => a.completion() - b.completion(),
            TargetCriterion::Altitude => b.altitude() - a.altitude(),
            TargetCriterion::NAltitude => a.altitude() - b.altitude(),
        }
    }
}

/// Exposure-level ranking criteria, configured per target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExposureCriterion {
    /// Higher completion wins.
    Completion,
    /// Lower completion wins.
    NCompletion,
    /// Larger moon-avoidance product wins: consume the most constrained
    /// exposure while the current window permits it.
    Selectivity,
    /// Smaller moon-avoidance product wins.
    NSelectivity,
}

impl ExposureCriterion {
    pub fn default_chain() -> Vec<Self> {
        vec![ExposureCriterion::Selectivity, ExposureCriterion::Completion]
    }
}

impl Criterion<Exposure> for ExposureCriterion {
    fn score(&self, a: &Exposure, b: &Exposure) -> f64 {
        match self {
            ExposureCriterion::Completion => b.completion() - a.completion(),
            ExposureCriterion::NCompletion => a.completion() - b.completion(),
            ExposureCriterion::Selectivity => b.selectivity() - a.selectivity(),
            ExposureCriterion::NSelectivity => a.selectivity() - b.selectivity(),
        }
    }
}
