//! Observer site and custom horizon profiles.

use serde::{Deserialize, Serialize};

/// Geographic observer site. Latitude north-positive, longitude east-positive
/// (degrees), elevation in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Horizon-altitude lookup: the local obstruction altitude in degrees for a
/// given azimuth (degrees from North).
pub trait Horizon {
    fn altitude_at(&self, azimuth: f64) -> f64;
}

impl<F> Horizon for F
where
    F: Fn(f64) -> f64,
{
    fn altitude_at(&self, azimuth: f64) -> f64 {
        self(azimuth)
    }
}

/// Piecewise-linear horizon profile built from (azimuth, altitude) samples,
/// interpolating with wrap-around past the last sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledHorizon {
    samples: Vec<(f64, f64)>,
}

impl SampledHorizon {
    /// Build a profile; azimuths are normalized to [0, 360) and sorted.
    pub fn new(mut samples: Vec<(f64, f64)>) -> Self {
        for sample in &mut samples {
            sample.0 = sample.0.rem_euclid(360.0);
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        samples.dedup_by(|a, b| a.0 == b.0);
        SampledHorizon { samples }
    }
}

impl Horizon for SampledHorizon {
    fn altitude_at(&self, azimuth: f64) -> f64 {
        match self.samples.len() {
            0 => 0.0,
            1 => self.samples[0].1,
            len => {
                let azimuth = azimuth.rem_euclid(360.0);
                let idx = self.samples.partition_point(|s| s.0 <= azimuth);
                let (prev, next) = if idx == 0 || idx == len {
                    (self.samples[len - 1], self.samples[0])
                } else {
                    (self.samples[idx - 1], self.samples[idx])
                };

                let mut span = next.0 - prev.0;
                if span <= 0.0 {
                    span += 360.0;
                }
                let mut offset = azimuth - prev.0;
                if offset < 0.0 {
                    offset += 360.0;
                }
                prev.1 + (next.1 - prev.1) * (offset / span)
            }
        }
    }
}
