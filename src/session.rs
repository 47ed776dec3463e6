use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::{Call, InOutDetector};
use crate::config::DetectionConfig;
use crate::court::CourtGeometry;
use crate::tracker::BallTracker;
use crate::{Detection, Frame};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_frames: u64,
    pub balls_detected: u64,
    pub bounces_detected: u64,
    pub in_calls: u64,
    pub out_calls: u64,
}

impl Stats {
    /// Detections per processed frame in percent, `None` before the first frame
    pub fn detection_rate(&self) -> Option<f32> {
        if self.total_frames == 0 {
            return None;
        }

        Some(self.balls_detected as f32 / self.total_frames as f32 * 100.0)
    }
}

/// Outcome for one accepted detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    pub detection: Detection,
    pub position: na::Point2<f32>,
    pub bounce: bool,
    // absent when no court is calibrated
    pub call: Option<Call>,
}

/// Per-video processing state: one tracker, one optional line caller.
#[derive(Debug, Clone)]
pub struct Session {
    min_confidence: f32,
    tracker: BallTracker,
    in_out: Option<InOutDetector>,
    stats: Stats,
}

impl Session {
    pub fn new(config: &DetectionConfig, court: Option<CourtGeometry>) -> Self {
        Self {
            min_confidence: config.min_ball_confidence,
            tracker: BallTracker::new(config),
            in_out: court.map(InOutDetector::new),
            stats: Stats::default(),
        }
    }

    pub fn set_court(&mut self, court: CourtGeometry) {
        self.in_out = Some(InOutDetector::new(court));
    }

    pub fn process_frame(&mut self, frame: &Frame) -> Vec<FrameResult> {
        self.stats.total_frames += 1;
        self.stats.balls_detected += frame.len() as u64;

        let mut results = Vec::with_capacity(frame.len());

        for det in frame.iter() {
            if det.confidence < self.min_confidence {
                debug!(
                    "frame {}: skipped detection with confidence {:.2}",
                    frame.frame_number, det.confidence
                );
                continue;
            }

            if !self.tracker.add_detection(*det) {
                continue;
            }

            let bounce = self.tracker.detect_bounce();
            if bounce {
                self.stats.bounces_detected += 1;
                info!("bounce detected at frame {}", frame.frame_number);
            }

            // calls use the raw sighting, not the smoothed track
            let call = self
                .in_out
                .as_ref()
                .map(|d| d.is_ball_in_court(det.position()));

            match call {
                Some(Call::In) => self.stats.in_calls += 1,
                Some(Call::Out) => self.stats.out_calls += 1,
                None => (),
            }

            let position = self
                .tracker
                .get_current_position()
                .unwrap_or_else(|| det.position());

            results.push(FrameResult {
                detection: *det,
                position,
                bounce,
                call,
            });
        }

        results
    }

    /// Starts a new trajectory segment, stats are kept
    pub fn reset(&mut self) {
        self.tracker.clear_trajectory();
    }

    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    pub fn tracker(&self) -> &BallTracker {
        &self.tracker
    }

    #[inline]
    pub fn has_court(&self) -> bool {
        self.in_out.is_some()
    }
}
