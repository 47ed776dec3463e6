use nalgebra as na;
use tracing::debug;

use crate::bounce::BounceDetector;
use crate::config::DetectionConfig;
use crate::Detection;

/// Single-ball tracker: distance gate, exponential smoothing and a per-frame
/// velocity estimate.
///
/// `detections` and `trajectory` always have the same length, `last_pos` is
/// the tail of `trajectory`.
#[derive(Debug, Clone)]
pub struct BallTracker {
    detections: Vec<Detection>,
    trajectory: Vec<na::Point2<f32>>,
    last_pos: Option<na::Point2<f32>>,
    vel: Option<na::Vector2<f32>>,
    max_tracking_distance: f32,
    smoothing: f32,
    bounce: BounceDetector,
}

impl BallTracker {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            detections: Vec::with_capacity(256),
            trajectory: Vec::with_capacity(256),
            last_pos: None,
            vel: None,
            max_tracking_distance: config.max_tracking_distance,
            smoothing: config.trajectory_smoothing,
            bounce: BounceDetector::from_config(config),
        }
    }

    /// Returns `false` and leaves the state untouched when the detection is
    /// too far from the current position.
    pub fn add_detection(&mut self, det: Detection) -> bool {
        if !self.is_valid_detection(&det) {
            debug!(
                "frame {}: rejected detection at ({:.1}, {:.1})",
                det.frame_number, det.x, det.y
            );
            return false;
        }

        self.update_trajectory(&det);
        self.detections.push(det);

        true
    }

    fn is_valid_detection(&self, det: &Detection) -> bool {
        match &self.last_pos {
            Some(pos) => det.distance_to(pos) <= self.max_tracking_distance,
            None => true,
        }
    }

    fn update_trajectory(&mut self, det: &Detection) {
        let raw = det.position();

        let pos = if let Some(last) = self.last_pos {
            let a = self.smoothing;
            let pos: na::Point2<f32> = (last.coords * a + raw.coords * (1.0 - a)).into();

            // frame interval is taken as 1, timestamps are not used
            if !self.trajectory.is_empty() {
                self.vel = Some(pos - last);
            }

            pos
        } else {
            raw
        };

        self.trajectory.push(pos);
        self.last_pos = Some(pos);
    }

    #[inline]
    pub fn detect_bounce(&self) -> bool {
        self.bounce.detect(&self.trajectory, self.vel)
    }

    #[inline]
    pub fn get_current_position(&self) -> Option<na::Point2<f32>> {
        self.last_pos
    }

    pub fn clear_trajectory(&mut self) {
        self.detections.clear();
        self.trajectory.clear();
        self.last_pos = None;
        self.vel = None;
    }

    #[inline]
    pub fn velocity(&self) -> Option<na::Vector2<f32>> {
        self.vel
    }

    #[inline]
    pub fn trajectory(&self) -> &[na::Point2<f32>] {
        &self.trajectory
    }

    #[inline]
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}

impl Default for BallTracker {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x: f32, y: f32, frame: u64) -> Detection {
        Detection::new(x, y, 0.9, frame as f32 * 0.04, frame)
    }

    fn assert_close(a: na::Point2<f32>, b: (f32, f32)) {
        assert!(
            (a.x - b.0).abs() < 1e-4 && (a.y - b.1).abs() < 1e-4,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn first_detection_is_taken_verbatim() {
        let mut t = BallTracker::default();

        assert!(t.add_detection(det(123.5, -7.25, 0)));
        assert_eq!(t.get_current_position(), Some(na::Point2::new(123.5, -7.25)));
        assert!(t.velocity().is_none());
        assert_eq!(t.len(), 1);
        assert_eq!(t.detections().len(), 1);
    }

    #[test]
    fn far_detection_is_rejected_without_side_effects() {
        let mut t = BallTracker::default();
        t.add_detection(det(0.0, 0.0, 0));
        t.add_detection(det(10.0, 0.0, 1));

        let before = t.clone();
        assert!(!t.add_detection(det(100.0, 100.0, 2)));

        assert_eq!(t.trajectory(), before.trajectory());
        assert_eq!(t.detections(), before.detections());
        assert_eq!(t.get_current_position(), before.get_current_position());
        assert_eq!(t.velocity(), before.velocity());
    }

    #[test]
    fn gate_is_inclusive() {
        let mut t = BallTracker::default();
        t.add_detection(det(0.0, 0.0, 0));

        assert!(t.add_detection(det(30.0, 40.0, 1)));
    }

    #[test]
    fn smoothing_blends_history_and_raw() {
        let mut t = BallTracker::default();
        t.add_detection(det(10.0, 10.0, 0));
        t.add_detection(det(20.0, 5.0, 1));

        assert_close(t.get_current_position().unwrap(), (13.0, 8.5));

        let v = t.velocity().unwrap();
        assert!((v.x - 3.0).abs() < 1e-4 && (v.y + 1.5).abs() < 1e-4);
    }

    #[test]
    fn full_smoothing_never_moves() {
        let config = DetectionConfig {
            trajectory_smoothing: 1.0,
            ..Default::default()
        };
        let mut t = BallTracker::new(&config);
        t.add_detection(det(40.0, 20.0, 0));

        for (i, (x, y)) in [(60.0, 30.0), (20.0, 0.0), (45.0, 45.0)].iter().enumerate() {
            assert!(t.add_detection(det(*x, *y, i as u64 + 1)));
            assert_eq!(t.get_current_position(), Some(na::Point2::new(40.0, 20.0)));
        }

        assert_eq!(t.velocity(), Some(na::Vector2::zeros()));
    }

    #[test]
    fn gate_measures_against_smoothed_position() {
        let mut t = BallTracker::default();
        t.add_detection(det(0.0, 0.0, 0));
        t.add_detection(det(45.0, 0.0, 1));

        // smoothed is 13.5, so 60 is within 50 of it even though 60 - 45 would be too
        assert!(t.add_detection(det(60.0, 0.0, 2)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut t = BallTracker::default();
        t.add_detection(det(0.0, 0.0, 0));
        t.add_detection(det(1.0, 1.0, 1));
        t.clear_trajectory();

        assert!(t.is_empty());
        assert!(t.detections().is_empty());
        assert!(t.get_current_position().is_none());
        assert!(t.velocity().is_none());

        // cold again, anything is accepted
        assert!(t.add_detection(det(500.0, 500.0, 2)));
    }

    #[test]
    fn bounce_needs_three_points() {
        let mut t = BallTracker::default();
        t.add_detection(det(10.0, 10.0, 0));
        assert!(!t.detect_bounce());
        t.add_detection(det(20.0, 5.0, 1));
        assert!(!t.detect_bounce());
    }

    #[test]
    fn bounce_is_reported_until_new_points_arrive() {
        let mut t = BallTracker::default();
        t.add_detection(det(10.0, 10.0, 1));
        t.add_detection(det(20.0, 5.0, 2));
        t.add_detection(det(30.0, 15.0, 3));

        assert!(t.detect_bounce());
        assert!(t.detect_bounce());
    }
}
