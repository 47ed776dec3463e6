pub mod bounce;
pub mod classifier;
pub mod config;
pub mod court;
pub mod detection;
pub mod error;
pub mod frame;
pub mod polygon;
pub mod session;
pub mod tracker;

pub use classifier::{Call, InOutDetector};
pub use config::{Config, DetectionConfig};
pub use court::{CourtCalibrator, CourtGeometry};
pub use detection::Detection;
pub use frame::Frame;
pub use session::{FrameResult, Session, Stats};
pub use tracker::BallTracker;

use error::Error;
use std::collections::HashMap;
use tracing::info;

pub trait LineCalling {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<Vec<FrameResult>, Error>;
    fn stats(&self, src: &str) -> Option<Stats>;
    fn reset(&mut self, src: &str);
}

/// Keeps one independent session per video source.
///
/// A session lives until `remove` is called for its source, `reset` only
/// starts a new trajectory segment.
pub struct HawkEye {
    config: Config,
    sessions: HashMap<String, Session>,
}

impl HawkEye {
    /// Fails when the config carries a court geometry that is not 4/4/4
    pub fn new(config: Config) -> Result<Self, Error> {
        if let Some(court) = &config.court {
            court.validate()?;
        }

        Ok(Self {
            config,
            sessions: HashMap::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn session(&self, src: &str) -> Option<&Session> {
        self.sessions.get(src)
    }

    /// Drops the session of a finished source and hands back its final state
    pub fn remove(&mut self, src: &str) -> Option<Session> {
        let session = self.sessions.remove(src)?;
        info!("closed session for {}", src);

        Some(session)
    }
}

impl crate::LineCalling for HawkEye {
    fn update(&mut self, frames: &[Frame], src: &str) -> Result<Vec<FrameResult>, Error> {
        let config = &self.config;
        let session = self.sessions.entry(src.to_string()).or_insert_with(|| {
            info!("new session for {}", src);
            Session::new(&config.detection, config.court.clone())
        });

        let mut results = Vec::new();
        for frame in frames {
            results.extend(session.process_frame(frame));
        }

        Ok(results)
    }

    #[inline]
    fn stats(&self, src: &str) -> Option<Stats> {
        self.sessions.get(src).map(|s| *s.stats())
    }

    fn reset(&mut self, src: &str) {
        if let Some(session) = self.sessions.get_mut(src) {
            session.reset();
        }
    }
}
