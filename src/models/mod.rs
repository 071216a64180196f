//! Domain entities of the project store.
//!
//! The hierarchy is strictly owned top-down: a [`Project`] owns its
//! [`Target`]s, a target owns its [`Exposure`] plans. Validity is a
//! per-pass derived flag (recomputed bottom-up by the filter pass, cascaded
//! downward by the explicit invalidation setters) and is never serialized.

pub mod exposure;
pub mod fingerprint;
pub mod grader;
pub mod horizon;
pub mod project;
pub mod ranking;
pub mod target;

pub use exposure::Exposure;
pub use fingerprint::Fingerprint;
pub use grader::{FrameQuality, Grader};
pub use horizon::{Horizon, ObserverLocation, SampledHorizon};
pub use project::{FlatType, Project};
pub use ranking::{ExposureCriterion, ProjectCriterion, TargetCriterion};
pub use target::{Target, ROTATION_UNCACHED};
