use nalgebra as na;

use crate::config::DetectionConfig;

/// Flags a vertical direction reversal over the last three smoothed points.
///
/// The result is recomputed from the trajectory tail on every call, so the
/// same bounce keeps being reported until new points push it out.
#[derive(Debug, Clone, Copy)]
pub struct BounceDetector {
    pub threshold: f32,
}

impl BounceDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.bounce_detection_threshold)
    }

    pub fn detect(
        &self,
        trajectory: &[na::Point2<f32>],
        velocity: Option<na::Vector2<f32>>,
    ) -> bool {
        if trajectory.len() < 3 || velocity.is_none() {
            return false;
        }

        let tail = &trajectory[trajectory.len() - 3..];
        let v1 = tail[1] - tail[0];
        let v2 = tail[2] - tail[1];

        if v1.y == 0.0 || v2.y == 0.0 {
            return false;
        }

        v1.y * v2.y < 0.0 && v2.norm() > self.threshold
    }
}

impl Default for BounceDetector {
    fn default() -> Self {
        Self::from_config(&DetectionConfig::default())
    }
}
