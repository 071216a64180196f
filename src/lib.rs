//! Target-selection and imaging-session scheduling for unattended,
//! multi-night astrophotography.
//!
//! The scheduler owns a store of imaging *projects* (each project owns
//! *targets*, each target owns *exposure plans*) and, for any point in time,
//! answers the question "what should the rig photograph next". A planning
//! pass rebuilds the hierarchy from disk, recomputes per-entity eligibility
//! (`filter`), and then performs a three-level best-selection with a
//! continuity bias so that repeated calls do not oscillate between
//! equally-ranked candidates.
//!
//! Device control, plate solving, capture and image persistence are external
//! collaborators: they act on the returned [`planner::Selection`] and report
//! back through the mutation entry points (accepted frames, cached rotator
//! positions), which are persisted immediately.
//!
//! # Modules
//!
//! - [`astro`]: horizontal-coordinate transforms, lunar separation and the
//!   phase-based avoidance curve
//! - [`models`]: the Project → Target → Exposure hierarchy, grading and
//!   ranking configuration
//! - [`planner`]: the filter pass and best-selection engine
//! - [`session`]: cross-call continuity, dither cadence and flat bookkeeping
//! - [`store`]: the on-disk project store and global scheduler settings

pub mod astro;
pub mod error;
pub mod models;
pub mod planner;
pub mod session;
pub mod store;

pub use error::{PlannerError, PlannerResult, StoreError};
pub use models::{
    Exposure, Fingerprint, FlatType, FrameQuality, Grader, Horizon, ObserverLocation, Project,
    SampledHorizon, Target,
};
pub use planner::{FlatJob, Planner, Selection};
pub use session::SessionState;
pub use store::SchedulerSettings;
