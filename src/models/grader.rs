//! Frame-quality grading.

use log::debug;
use serde::{Deserialize, Serialize};

/// Quality metrics of a captured frame, reported by the imaging collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameQuality {
    pub detected_stars: i32,
    /// Half-flux radius of the detected stars, pixels.
    pub hfr: f64,
    /// Total guiding RMS error over the exposure, arcseconds.
    pub guide_rms: f64,
}

/// Stateless pass/fail classifier for captured frames.
///
/// All three checks must pass for a frame to count toward progress. Missing
/// frame data always fails (the grader fails closed, never errors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grader {
    pub min_stars: i32,
    #[serde(rename = "maxHFR")]
    pub max_hfr: f64,
    pub max_guide_error: f64,
}

impl Grader {
    /// Pass/fail a captured frame.
    pub fn grade(&self, frame: Option<&FrameQuality>) -> bool {
        let Some(frame) = frame else {
            debug!("grader: no frame data");
            return false;
        };

        if frame.detected_stars < self.min_stars {
            debug!(
                "grader: rejected, star count {}/{}",
                frame.detected_stars, self.min_stars
            );
            return false;
        }

        if frame.hfr > self.max_hfr {
            debug!("grader: rejected, HFR {}/{}", frame.hfr, self.max_hfr);
            return false;
        }

        if frame.guide_rms > self.max_guide_error {
            debug!(
                "grader: rejected, guide error {}/{}",
                frame.guide_rms, self.max_guide_error
            );
            return false;
        }

        true
    }

    /// Ordered concatenation of the thresholds; used for change detection.
    pub fn identity(&self) -> String {
        format!("{}_{}_{}", self.min_stars, self.max_hfr, self.max_guide_error)
    }
}
