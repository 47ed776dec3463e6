use std::path::Path;

use serde_derive::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::Config;
use crate::error::Error;
use crate::polygon::Vertex;

pub const ZONE_CORNERS: usize = 4;

/// Three quadrilateral zones picked on a reference frame.
///
/// Only the vertex count is ever validated. Winding order, convexity and the
/// relationship between zones are the caller's responsibility.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CourtGeometry {
    #[serde(default)]
    pub court_corners: Vec<Vertex>,
    #[serde(default)]
    pub service_box_corners: Vec<Vertex>,
    #[serde(default)]
    pub baseline_corners: Vec<Vertex>,
}

impl CourtGeometry {
    pub fn new(
        court_corners: Vec<Vertex>,
        service_box_corners: Vec<Vertex>,
        baseline_corners: Vec<Vertex>,
    ) -> Self {
        Self {
            court_corners,
            service_box_corners,
            baseline_corners,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.court_corners.len() == ZONE_CORNERS
            && self.service_box_corners.len() == ZONE_CORNERS
            && self.baseline_corners.len() == ZONE_CORNERS
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry {
                court: self.court_corners.len(),
                service_box: self.service_box_corners.len(),
                baseline: self.baseline_corners.len(),
            })
        }
    }

    #[inline]
    fn is_complete(&self) -> bool {
        !self.court_corners.is_empty()
            && !self.service_box_corners.is_empty()
            && !self.baseline_corners.is_empty()
    }
}

/// Turns manually picked points into a geometry and keeps it in the config.
pub struct CourtCalibrator {
    config: Config,
    geometry: Option<CourtGeometry>,
}

impl CourtCalibrator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            geometry: None,
        }
    }

    pub fn calibrate_from_points(
        &mut self,
        court_corners: Vec<Vertex>,
        service_corners: Vec<Vertex>,
        baseline_corners: Vec<Vertex>,
    ) -> Result<CourtGeometry, Error> {
        let geometry = CourtGeometry::new(court_corners, service_corners, baseline_corners);

        if let Err(err) = geometry.validate() {
            error!("court calibration rejected: {}", err);
            return Err(err);
        }

        self.config.court = Some(geometry.clone());
        self.geometry = Some(geometry.clone());
        info!("court calibrated");

        Ok(geometry)
    }

    /// Geometry persisted in the config, only when all three zones are present
    pub fn load_geometry(&mut self) -> Option<CourtGeometry> {
        let geometry = self.config.court.as_ref().filter(|g| g.is_complete())?;
        self.geometry = Some(geometry.clone());

        self.geometry.clone()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.config.save(path)
    }

    #[inline]
    pub fn geometry(&self) -> Option<&CourtGeometry> {
        self.geometry.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn into_config(self) -> Config {
        self.config
    }
}
