use std::fs;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};
use tracing::{error, info};

use crate::court::CourtGeometry;
use crate::error::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Detections below this are dropped by the session before tracking
    #[serde(default = "default_min_ball_confidence")]
    pub min_ball_confidence: f32,

    /// Largest jump (px) from the current smoothed position still accepted
    #[serde(default = "default_max_tracking_distance")]
    pub max_tracking_distance: f32,

    /// Minimal |v| (px/frame) of the outgoing direction for a bounce
    #[serde(default = "default_bounce_detection_threshold")]
    pub bounce_detection_threshold: f32,

    /// Weight of the previous smoothed position, 0..=1
    #[serde(default = "default_trajectory_smoothing")]
    pub trajectory_smoothing: f32,
}

fn default_min_ball_confidence() -> f32 {
    0.3
}

fn default_max_tracking_distance() -> f32 {
    50.0
}

fn default_bounce_detection_threshold() -> f32 {
    0.8
}

fn default_trajectory_smoothing() -> f32 {
    0.7
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_ball_confidence: default_min_ball_confidence(),
            max_tracking_distance: default_max_tracking_distance(),
            bounce_detection_threshold: default_bounce_detection_threshold(),
            trajectory_smoothing: default_trajectory_smoothing(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<CourtGeometry>,

    /// Sections owned by other tools (model credentials, overlay styles),
    /// carried through untouched so `save` writes them back
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&contents)?;

        info!("config loaded from {}", path.as_ref().display());

        Ok(config)
    }

    /// Falls back to defaults when the file is missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(err) => {
                error!(
                    "could not load config {}: {}, using defaults",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;

        info!("config saved to {}", path.as_ref().display());

        Ok(())
    }
}
