use serde_derive::{Deserialize, Serialize};

use nalgebra as na;

/// A single ball sighting: (x,y) of the ball center in image coordinates
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "ts")]
    pub timestamp: f32, // in seconds
    #[serde(rename = "frame")]
    pub frame_number: u64,
}

impl Detection {
    pub fn new(x: f32, y: f32, confidence: f32, timestamp: f32, frame_number: u64) -> Self {
        Self {
            x,
            y,
            confidence,
            timestamp,
            frame_number,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> na::Point2<f32> {
        na::Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn distance_to(&self, pt: &na::Point2<f32>) -> f32 {
        na::distance(&self.position(), pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_short_field_names() {
        let det: Detection =
            serde_json::from_str(r#"{"x": 1.5, "y": 2.0, "p": 0.75, "ts": 0.5, "frame": 1}"#)
                .unwrap();

        assert_eq!(det, Detection::new(1.5, 2.0, 0.75, 0.5, 1));
    }

    #[test]
    fn distance_is_euclidean() {
        let det = Detection::new(3.0, 4.0, 1.0, 0.0, 0);

        assert!((det.distance_to(&na::Point2::origin()) - 5.0).abs() < 1e-6);
    }
}
