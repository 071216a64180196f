//! The planning engine: store loading, the eligibility filter pass,
//! three-level best-selection, and the progress-mutation entry points.
//!
//! A planning pass is: [`Planner::load`] → [`Planner::filter`] →
//! [`Planner::best`] (or [`Planner::next_selection`]). The pass is
//! synchronous and deterministic: repeated calls with identical store
//! contents, time and session state yield identical selections. Collaborators
//! act on the selection and report back through [`Planner::accept_frame`] /
//! [`Planner::cache_mechanical_rotation`], which persist immediately.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, error, warn};

use crate::error::{PlannerError, PlannerResult, StoreError};
use crate::models::ranking::best_by_chain;
use crate::models::{Exposure, Fingerprint, FlatType, Horizon, ObserverLocation, Project, Target};
use crate::session::SessionState;
use crate::store::{self, SchedulerSettings};

/// One fully-resolved scheduling choice: the best eligible project, its best
/// eligible target, and that target's best eligible exposure.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub project: &'a Project,
    pub target: &'a Target,
    pub exposure: &'a Exposure,
}

/// Actionable flat-calibration work resolved from the flat-requirement log.
#[derive(Debug, Clone, Copy)]
pub struct FlatJob<'a> {
    pub project: &'a Project,
    pub target: &'a Target,
    pub exposure: &'a Exposure,
}

/// The scheduler core. Owns the project hierarchy for one planning pass.
pub struct Planner {
    projects: Vec<Project>,
    settings: SchedulerSettings,
}

impl Planner {
    /// Load every project record under `project_dir`.
    ///
    /// A read or parse failure aborts the load: scheduling must never run on
    /// a partially-loaded store.
    pub fn load(project_dir: &Path, settings: SchedulerSettings) -> Result<Self, StoreError> {
        Ok(Planner {
            projects: store::load_projects(project_dir)?,
            settings,
        })
    }

    /// Build a planner over an in-memory project list.
    pub fn from_projects(projects: Vec<Project>, settings: SchedulerSettings) -> Self {
        Planner { projects, settings }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Recompute eligibility for the whole hierarchy, depth-first.
    ///
    /// This is the single point where completion gates activity: a project
    /// whose completion has reached 1 is forced inactive here, and inactive
    /// projects are invalidated wholesale.
    pub fn filter(
        &mut self,
        at: DateTime<Utc>,
        location: &ObserverLocation,
        horizon: Option<&dyn Horizon>,
    ) {
        for project in &mut self.projects {
            debug!("filter: project '{}'", project.name);

            if project.completion() >= 1.0 {
                project.active = false;
                debug!("filter: project '{}' deactivated (complete)", project.name);
            }

            if !project.active {
                project.invalidate();
                debug!("filter: project '{}' rejected (inactive)", project.name);
                continue;
            }

            project.filter_targets(at, location, horizon);
        }
    }

    /// Best eligible project: the remembered one if it is still eligible,
    /// otherwise the head of the store-wide criteria-chain ranking.
    /// `None` means nothing is schedulable right now.
    pub fn best(&self, session: &SessionState) -> Option<&Project> {
        if let Some(current) = session.current_project() {
            if let Some(project) = self
                .projects
                .iter()
                .find(|p| p.is_valid() && p.fingerprint() == *current)
            {
                debug!("select: project '{}' kept (continuity)", project.name);
                return Some(project);
            }
        }

        let valid: Vec<&Project> = self.projects.iter().filter(|p| p.is_valid()).collect();
        best_by_chain(valid, &self.settings.project_selection_priority)
    }

    /// The full three-level descent. Each empty level propagates as its own
    /// skip error; there is no fallback to an invalid candidate.
    pub fn next_selection(&self, session: &SessionState) -> PlannerResult<Selection<'_>> {
        let project = self.best(session).ok_or(PlannerError::NoEligibleProject)?;
        let target = project
            .best_target(session)
            .ok_or(PlannerError::NoEligibleTarget)?;
        let exposure = target
            .best_exposure()
            .ok_or(PlannerError::NoEligibleExposure)?;

        debug!(
            "select: '{}' / '{}' / '{}'",
            project.name, target.name, exposure.filter
        );
        Ok(Selection {
            project,
            target,
            exposure,
        })
    }

    /// Resolve a continuity fingerprint back into a live project.
    pub fn project_by_fingerprint(&self, fingerprint: &Fingerprint) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.fingerprint() == *fingerprint)
    }

    /// Count one grader-accepted frame against an exposure plan.
    ///
    /// Increments the persisted progress counter and the session dither
    /// counter, performs flat bookkeeping according to the project's
    /// [`FlatType`], and writes the mutated record back immediately. The
    /// project's `active` flag is untouched; completion gating happens at
    /// the start of the next filter pass.
    pub fn accept_frame(
        &mut self,
        session: &mut SessionState,
        project_fp: &Fingerprint,
        target_fp: &Fingerprint,
        exposure_fp: &Fingerprint,
    ) -> PlannerResult<()> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.fingerprint() == *project_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(project_fp.to_string()))?;
        let target_idx = project
            .targets
            .iter()
            .position(|t| t.fingerprint() == *target_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(target_fp.to_string()))?;
        let exposure_idx = project.targets[target_idx]
            .exposures
            .iter()
            .position(|e| e.fingerprint() == *exposure_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(exposure_fp.to_string()))?;

        project.targets[target_idx].exposures[exposure_idx].accepted_amount += 1;
        let exposure = &project.targets[target_idx].exposures[exposure_idx];
        debug!(
            "accept: '{}' / '{}' now {}/{}",
            project.name,
            exposure.filter,
            exposure.accepted_amount,
            exposure.required_amount
        );
        session.record_accepted(exposure_fp);

        let mut logged = false;
        match project.flat_type {
            FlatType::Nightly => {
                logged |= session.require_flat(project_fp, target_fp, exposure_fp);
            }
            FlatType::UponTargetCompletion => {
                let target = &project.targets[target_idx];
                if target.completion() >= 1.0 {
                    for exposure in &target.exposures {
                        logged |=
                            session.require_flat(project_fp, target_fp, &exposure.fingerprint());
                    }
                }
            }
            FlatType::UponProjectCompletion => {
                if project.completion() >= 1.0 {
                    for target in &project.targets {
                        let target_fp = target.fingerprint();
                        for exposure in &target.exposures {
                            logged |= session.require_flat(
                                project_fp,
                                &target_fp,
                                &exposure.fingerprint(),
                            );
                        }
                    }
                }
            }
        }
        if logged {
            project.take_flats = true;
        }

        store::save_project(project)?;
        Ok(())
    }

    /// Cache the physical rotator position after a successful, externally
    /// performed rotation for a target, and persist it.
    pub fn cache_mechanical_rotation(
        &mut self,
        project_fp: &Fingerprint,
        target_fp: &Fingerprint,
        position: f64,
    ) -> PlannerResult<()> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.fingerprint() == *project_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(project_fp.to_string()))?;
        let target = project
            .targets
            .iter_mut()
            .find(|t| t.fingerprint() == *target_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(target_fp.to_string()))?;

        target.mechanical_rotation = position;
        debug!("rotation: '{}' cached at {:.1}", target.name, position);
        store::save_project(project)?;
        Ok(())
    }

    /// Resolve the flat-requirement log into actionable jobs.
    ///
    /// An entry is actionable only for a project that still wants flats
    /// (`take_flats`, positive `flat_amount`, mechanical rotation in use)
    /// and a target whose rotator position has been cached. Entries naming a
    /// filter absent from `filter_names` are skipped and logged at error
    /// level — that is a configuration defect, not a scheduling condition.
    pub fn flat_jobs<'a>(
        &'a self,
        session: &SessionState,
        filter_names: &[String],
    ) -> Vec<FlatJob<'a>> {
        let mut jobs = Vec::new();

        for (project_fp, target_fp, exposure_fp) in session.pending_flats() {
            let Some(project) = self.project_by_fingerprint(project_fp) else {
                warn!("flats: stale project entry {project_fp}, skipped");
                continue;
            };
            if !project.take_flats || project.flat_amount == 0 || !project.use_mechanical_rotation {
                continue;
            }
            let Some(target) = project.target_by_fingerprint(target_fp) else {
                warn!("flats: '{}': stale target entry, skipped", project.name);
                continue;
            };
            if !target.has_cached_rotation() {
                warn!(
                    "flats: '{}' - '{}' does not contain rotation info, skipped",
                    project.name, target.name
                );
                continue;
            }
            let Some(exposure) = target
                .exposures
                .iter()
                .find(|e| e.fingerprint() == *exposure_fp)
            else {
                warn!(
                    "flats: '{}' - '{}': stale exposure entry, skipped",
                    project.name, target.name
                );
                continue;
            };
            if let Err(err) = resolve_filter(filter_names, &exposure.filter) {
                error!("flats: {err}, skipped");
                continue;
            }

            jobs.push(FlatJob {
                project,
                target,
                exposure,
            });
        }

        jobs
    }

    /// Flats for a project were taken: clear its requirement log and pending
    /// flag, then persist.
    pub fn flats_done(
        &mut self,
        session: &mut SessionState,
        project_fp: &Fingerprint,
    ) -> PlannerResult<()> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.fingerprint() == *project_fp)
            .ok_or_else(|| PlannerError::UnknownFingerprint(project_fp.to_string()))?;

        project.take_flats = false;
        session.clear_flats_for_project(project_fp);
        store::save_project(project)?;
        Ok(())
    }

    /// Write every project record back to the store.
    pub fn save(&self) -> Result<(), StoreError> {
        for project in &self.projects {
            store::save_project(project)?;
        }
        Ok(())
    }
}

/// Look up a configured filter-wheel definition by name.
pub fn resolve_filter<'a>(filter_names: &'a [String], name: &str) -> PlannerResult<&'a str> {
    filter_names
        .iter()
        .find(|candidate| candidate.as_str() == name)
        .map(String::as_str)
        .ok_or_else(|| PlannerError::NoMatchingFilterDefinition(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro;
    use crate::models::{ExposureCriterion, Grader, TargetCriterion};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 14, 22, 30, 0).unwrap()
    }

    fn site() -> ObserverLocation {
        ObserverLocation {
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
        }
    }

    fn exposure(filter: &str, required: u32, accepted: u32) -> Exposure {
        Exposure {
            filter: filter.to_string(),
            exposure_time: 120.0,
            gain: 100,
            offset: 10,
            binning: 1,
            moon_separation_angle: 30.0,
            moon_separation_width: 10.0,
            required_amount: required,
            accepted_amount: accepted,
            valid: false,
        }
    }

    /// A target on the opposite side of the sky from the Moon, so the lunar
    /// gate always passes.
    fn anti_moon_target(name: &str, exposures: Vec<Exposure>) -> Target {
        let (moon_ra, moon_dec) = astro::moon_equatorial(at());
        Target {
            name: name.to_string(),
            right_ascension: (moon_ra + 180.0).rem_euclid(360.0),
            declination: -moon_dec,
            sky_rotation: 0.0,
            mechanical_rotation: -1.0,
            exposure_selection_priority: ExposureCriterion::default_chain(),
            exposures,
            altitude: 0.0,
            azimuth: 0.0,
        }
    }

    fn project(name: &str, priority: i32, targets: Vec<Target>) -> Project {
        Project {
            name: name.to_string(),
            active: true,
            priority,
            dither_every: 0,
            // Never reject on altitude unless a test wants it.
            minimum_altitude: -90.0,
            horizon_offset: 0.0,
            center_targets: false,
            use_mechanical_rotation: false,
            take_flats: false,
            flat_amount: 0,
            flat_type: FlatType::default(),
            image_grader: Grader {
                min_stars: 0,
                max_hfr: 10.0,
                max_guide_error: 10.0,
            },
            target_selection_priority: TargetCriterion::default_chain(),
            targets,
            source: None,
        }
    }

    fn planner(projects: Vec<Project>) -> Planner {
        Planner::from_projects(projects, SchedulerSettings::default())
    }

    #[test]
    fn filter_validates_a_schedulable_project() {
        let mut planner = planner(vec![project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
        )]);
        planner.filter(at(), &site(), None);
        assert!(planner.projects()[0].is_valid());
    }

    #[test]
    fn filter_rejects_inactive_projects() {
        let mut p = project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
        );
        p.active = false;
        let mut planner = planner(vec![p]);
        planner.filter(at(), &site(), None);
        assert!(!planner.projects()[0].is_valid());
    }

    #[test]
    fn filter_deactivates_completed_projects() {
        let mut planner = planner(vec![project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 5, 5)])],
        )]);
        planner.filter(at(), &site(), None);
        assert!(!planner.projects()[0].active);
        assert!(!planner.projects()[0].is_valid());
    }

    #[test]
    fn completed_exposure_is_excluded_regardless_of_moon() {
        let mut planner = planner(vec![project(
            "p",
            1,
            vec![anti_moon_target(
                "t",
                vec![exposure("done", 10, 10), exposure("open", 10, 0)],
            )],
        )]);
        planner.filter(at(), &site(), None);

        let target = &planner.projects()[0].targets[0];
        assert!(!target.exposures[0].valid);
        assert!(target.exposures[1].valid);
    }

    #[test]
    fn exposure_inside_moon_avoidance_window_is_rejected() {
        let (moon_ra, moon_dec) = astro::moon_equatorial(at());
        let mut near_moon = anti_moon_target("t", vec![exposure("L", 10, 0)]);
        near_moon.right_ascension = moon_ra;
        near_moon.declination = moon_dec;

        let mut planner = planner(vec![project("p", 1, vec![near_moon])]);
        planner.filter(at(), &site(), None);
        assert!(!planner.projects()[0].is_valid());
    }

    #[test]
    fn target_below_minimum_altitude_is_rejected_independent_of_exposures() {
        // On the equator, a dec -75 object on the meridian sits at 15 deg.
        let mut target = anti_moon_target("low", vec![exposure("L", 10, 0)]);
        target.right_ascension = astro::local_sidereal_time(at(), 0.0);
        target.declination = -75.0;

        let mut p = project("p", 1, vec![target]);
        p.minimum_altitude = 20.0;
        let mut planner = planner(vec![p]);
        planner.filter(at(), &site(), None);

        let target = &planner.projects()[0].targets[0];
        assert!((target.altitude() - 15.0).abs() < 0.1);
        assert!(!target.is_valid());
    }

    #[test]
    fn horizon_profile_with_offset_rejects_targets() {
        let mut planner = planner(vec![project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
        )]);
        let wall = |_azimuth: f64| 91.0;
        planner.filter(at(), &site(), Some(&wall));
        assert!(!planner.projects()[0].is_valid());
    }

    #[test]
    fn best_prefers_lower_priority_number() {
        let mut planner = planner(vec![
            project(
                "second",
                2,
                vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
            ),
            project(
                "first",
                1,
                vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
            ),
        ]);
        planner.filter(at(), &site(), None);
        let session = SessionState::new();
        assert_eq!(planner.best(&session).unwrap().name, "first");
    }

    #[test]
    fn continuity_overrides_ranking() {
        let mut planner = planner(vec![
            project(
                "a",
                1,
                vec![anti_moon_target("ta", vec![exposure("L", 10, 0)])],
            ),
            project(
                "b",
                2,
                vec![anti_moon_target("tb", vec![exposure("L", 10, 0)])],
            ),
        ]);
        planner.filter(at(), &site(), None);

        let mut session = SessionState::new();
        let b = &planner.projects()[1];
        session.commit_selection(b.fingerprint(), b.targets[0].fingerprint());
        assert_eq!(planner.best(&session).unwrap().name, "b");
    }

    #[test]
    fn continuity_does_not_resurrect_invalid_projects() {
        let mut planner = planner(vec![
            project(
                "a",
                1,
                vec![anti_moon_target("ta", vec![exposure("L", 10, 0)])],
            ),
            project(
                "b",
                2,
                vec![anti_moon_target("tb", vec![exposure("L", 5, 5)])],
            ),
        ]);
        planner.filter(at(), &site(), None);

        let mut session = SessionState::new();
        let b = &planner.projects()[1];
        session.commit_selection(b.fingerprint(), b.targets[0].fingerprint());
        assert_eq!(planner.best(&session).unwrap().name, "a");
    }

    #[test]
    fn selection_is_deterministic() {
        let mut planner = planner(vec![
            project(
                "a",
                1,
                vec![anti_moon_target("ta", vec![exposure("L", 10, 0)])],
            ),
            project(
                "b",
                1,
                vec![anti_moon_target("tb", vec![exposure("L", 10, 0)])],
            ),
        ]);
        planner.filter(at(), &site(), None);
        let session = SessionState::new();

        let first = planner.next_selection(&session).unwrap();
        let second = planner.next_selection(&session).unwrap();
        assert_eq!(first.project.name, second.project.name);
        assert_eq!(first.target.name, second.target.name);
        assert_eq!(first.exposure.filter, second.exposure.filter);
    }

    #[test]
    fn equal_ranking_falls_back_to_store_order() {
        let mut planner = planner(vec![
            project(
                "stored-first",
                1,
                vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
            ),
            project(
                "stored-second",
                1,
                vec![anti_moon_target("t", vec![exposure("L", 10, 0)])],
            ),
        ]);
        planner.filter(at(), &site(), None);
        let session = SessionState::new();
        assert_eq!(planner.best(&session).unwrap().name, "stored-first");
    }

    #[test]
    fn empty_store_propagates_no_eligible_project() {
        let planner = planner(vec![]);
        let session = SessionState::new();
        assert!(matches!(
            planner.next_selection(&session),
            Err(PlannerError::NoEligibleProject)
        ));
    }

    #[test]
    fn accept_frame_updates_counters_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 3, 0)])],
        );
        p.dither_every = 2;
        p.attach_store_path(dir.path().join("p.json"));

        let project_fp = p.fingerprint();
        let target_fp = p.targets[0].fingerprint();
        let exposure_fp = p.targets[0].exposures[0].fingerprint();

        let mut planner = planner(vec![p]);
        let mut session = SessionState::new();

        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &exposure_fp)
            .unwrap();
        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &exposure_fp)
            .unwrap();

        assert_eq!(planner.projects()[0].targets[0].exposures[0].accepted_amount, 2);
        assert!(session.dither_due(2, &exposure_fp));

        let reloaded = crate::store::load_project(&dir.path().join("p.json")).unwrap();
        assert_eq!(reloaded.targets[0].exposures[0].accepted_amount, 2);
    }

    #[test]
    fn accept_frame_rejects_unknown_fingerprints() {
        let mut planner = planner(vec![]);
        let mut session = SessionState::new();
        let bogus = Fingerprint::digest("bogus");
        assert!(matches!(
            planner.accept_frame(&mut session, &bogus, &bogus, &bogus),
            Err(PlannerError::UnknownFingerprint(_))
        ));
    }

    #[test]
    fn nightly_flats_log_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("L", 5, 0)])],
        );
        p.flat_type = FlatType::Nightly;
        p.flat_amount = 10;
        p.attach_store_path(dir.path().join("p.json"));

        let project_fp = p.fingerprint();
        let target_fp = p.targets[0].fingerprint();
        let exposure_fp = p.targets[0].exposures[0].fingerprint();

        let mut planner = planner(vec![p]);
        let mut session = SessionState::new();
        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &exposure_fp)
            .unwrap();

        assert!(session.has_pending_flats(&project_fp));
        assert!(planner.projects()[0].take_flats);
    }

    #[test]
    fn target_completion_flats_log_the_whole_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = project(
            "p",
            1,
            vec![
                anti_moon_target("done", vec![exposure("a", 1, 0), exposure("b", 5, 0)]),
                anti_moon_target("open", vec![exposure("c", 5, 0)]),
            ],
        );
        p.flat_type = FlatType::UponTargetCompletion;
        p.flat_amount = 10;
        p.attach_store_path(dir.path().join("p.json"));

        let project_fp = p.fingerprint();
        let target_fp = p.targets[0].fingerprint();
        let fp_a = p.targets[0].exposures[0].fingerprint();

        let mut planner = planner(vec![p]);
        let mut session = SessionState::new();

        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &fp_a)
            .unwrap();
        // "a" is done but its sibling keeps the target open.
        assert!(!session.has_pending_flats(&project_fp));

        let fp_b = planner.projects()[0].targets[0].exposures[1].fingerprint();
        for _ in 0..5 {
            planner
                .accept_frame(&mut session, &project_fp, &target_fp, &fp_b)
                .unwrap();
        }
        // The target completed: both of its exposures are logged, the open
        // sibling target contributes nothing.
        assert!(session.has_pending_flats(&project_fp));
        assert_eq!(session.pending_flats().count(), 2);
    }

    #[test]
    fn project_completion_flats_log_only_when_complete() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = project(
            "p",
            1,
            vec![anti_moon_target(
                "t",
                vec![exposure("a", 1, 0), exposure("b", 1, 0)],
            )],
        );
        p.flat_amount = 10;
        p.attach_store_path(dir.path().join("p.json"));

        let project_fp = p.fingerprint();
        let target_fp = p.targets[0].fingerprint();
        let fp_a = p.targets[0].exposures[0].fingerprint();
        let fp_b = p.targets[0].exposures[1].fingerprint();

        let mut planner = planner(vec![p]);
        let mut session = SessionState::new();

        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &fp_a)
            .unwrap();
        assert!(!session.has_pending_flats(&project_fp));

        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &fp_b)
            .unwrap();
        assert!(session.has_pending_flats(&project_fp));
        assert_eq!(session.pending_flats().count(), 2);
    }

    #[test]
    fn flat_jobs_require_cached_rotation_and_known_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = project(
            "p",
            1,
            vec![anti_moon_target("t", vec![exposure("Ha", 1, 0)])],
        );
        p.flat_type = FlatType::Nightly;
        p.flat_amount = 5;
        p.use_mechanical_rotation = true;
        p.attach_store_path(dir.path().join("p.json"));

        let project_fp = p.fingerprint();
        let target_fp = p.targets[0].fingerprint();
        let exposure_fp = p.targets[0].exposures[0].fingerprint();

        let mut planner = planner(vec![p]);
        let mut session = SessionState::new();
        planner
            .accept_frame(&mut session, &project_fp, &target_fp, &exposure_fp)
            .unwrap();

        let filters = vec!["Ha".to_string(), "OIII".to_string()];

        // No rotation cached yet: not actionable.
        assert!(planner.flat_jobs(&session, &filters).is_empty());

        planner
            .cache_mechanical_rotation(&project_fp, &target_fp, 42.0)
            .unwrap();
        let jobs = planner.flat_jobs(&session, &filters);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].exposure.filter, "Ha");

        // A filter missing from the wheel is a skip, not a job.
        let wrong_wheel = vec!["L".to_string()];
        assert!(planner.flat_jobs(&session, &wrong_wheel).is_empty());

        planner.flats_done(&mut session, &project_fp).unwrap();
        assert!(!session.has_pending_flats(&project_fp));
        assert!(!planner.projects()[0].take_flats);
    }

    #[test]
    fn resolve_filter_reports_configuration_defects() {
        let filters = vec!["L".to_string()];
        assert_eq!(resolve_filter(&filters, "L").unwrap(), "L");
        assert!(matches!(
            resolve_filter(&filters, "Ha"),
            Err(PlannerError::NoMatchingFilterDefinition(name)) if name == "Ha"
        ));
    }
}
