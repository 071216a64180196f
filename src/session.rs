//! Process-lifetime scheduling state.
//!
//! Everything the scheduler must remember *between* planning passes lives
//! here, keyed by value fingerprints because entities themselves are rebuilt
//! from the store every pass. The state is an explicitly owned context
//! object — passed into selection and mutation calls — so the core stays
//! testable in isolation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::Fingerprint;

/// Continuity, dither-cadence and flat-requirement state for one imaging
/// session.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    current_project: Option<Fingerprint>,
    current_target: Option<Fingerprint>,
    /// Accepted frames per exposure since the last dither.
    dither_log: HashMap<Fingerprint, u32>,
    /// project → target → exposures still requiring calibration frames.
    /// Ordered maps so iteration (and thus flat-job resolution) is
    /// deterministic.
    flat_log: BTreeMap<Fingerprint, BTreeMap<Fingerprint, BTreeSet<Fingerprint>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of the project the host last committed to, if any.
    pub fn current_project(&self) -> Option<&Fingerprint> {
        self.current_project.as_ref()
    }

    /// Fingerprint of the target the host last committed to, if any.
    pub fn current_target(&self) -> Option<&Fingerprint> {
        self.current_target.as_ref()
    }

    /// Record the selection the host has successfully committed to (slew,
    /// center and rotation done). Committing to a different target restarts
    /// the dither cadence.
    pub fn commit_selection(&mut self, project: Fingerprint, target: Fingerprint) {
        if self.current_target.as_ref() != Some(&target) {
            self.dither_log.clear();
        }
        self.current_project = Some(project);
        self.current_target = Some(target);
    }

    /// Forget the committed selection; the next pass ranks from scratch.
    pub fn reset(&mut self) {
        self.current_project = None;
        self.current_target = None;
    }

    /// Count an accepted frame toward the dither cadence of an exposure.
    pub(crate) fn record_accepted(&mut self, exposure: &Fingerprint) {
        *self.dither_log.entry(exposure.clone()).or_insert(0) += 1;
    }

    /// Whether the dither cadence has been reached for an exposure.
    /// A cadence of 0 or below means dithering is disabled.
    pub fn dither_due(&self, dither_every: i32, exposure: &Fingerprint) -> bool {
        if dither_every <= 0 {
            return false;
        }
        self.dither_log
            .get(exposure)
            .is_some_and(|count| *count >= dither_every as u32)
    }

    /// A dither was issued: the cadence restarts for every exposure.
    pub fn mark_dithered(&mut self) {
        self.dither_log.clear();
    }

    /// Log an exposure as still requiring flat frames. Returns `true` if the
    /// entry is new.
    pub(crate) fn require_flat(
        &mut self,
        project: &Fingerprint,
        target: &Fingerprint,
        exposure: &Fingerprint,
    ) -> bool {
        self.flat_log
            .entry(project.clone())
            .or_default()
            .entry(target.clone())
            .or_default()
            .insert(exposure.clone())
    }

    /// All (project, target, exposure) triples still requiring flat frames,
    /// in deterministic order.
    pub fn pending_flats(
        &self,
    ) -> impl Iterator<Item = (&Fingerprint, &Fingerprint, &Fingerprint)> {
        self.flat_log.iter().flat_map(|(project, targets)| {
            targets.iter().flat_map(move |(target, exposures)| {
                exposures
                    .iter()
                    .map(move |exposure| (project, target, exposure))
            })
        })
    }

    /// Whether any flat requirement is logged for a project.
    pub fn has_pending_flats(&self, project: &Fingerprint) -> bool {
        self.flat_log
            .get(project)
            .is_some_and(|targets| targets.values().any(|exposures| !exposures.is_empty()))
    }

    /// Drop every flat requirement logged for a project.
    pub(crate) fn clear_flats_for_project(&mut self, project: &Fingerprint) {
        self.flat_log.remove(project);
    }
}
