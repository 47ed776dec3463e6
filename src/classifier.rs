use std::fmt;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::court::CourtGeometry;
use crate::polygon::point_in_polygon;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl Call {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Call::In => "IN",
            Call::Out => "OUT",
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line calls against a fixed geometry.
///
/// The outer court polygon gates first, then the service box and the
/// baseline zone are checked in that order. A point inside the court but in
/// neither inner zone is called out. The geometry is not re-validated here.
#[derive(Debug, Clone)]
pub struct InOutDetector {
    geometry: CourtGeometry,
}

impl InOutDetector {
    pub fn new(geometry: CourtGeometry) -> Self {
        Self { geometry }
    }

    pub fn is_ball_in_court(&self, pos: na::Point2<f32>) -> Call {
        if !point_in_polygon(pos, &self.geometry.court_corners) {
            return Call::Out;
        }

        if point_in_polygon(pos, &self.geometry.service_box_corners)
            || point_in_polygon(pos, &self.geometry.baseline_corners)
        {
            Call::In
        } else {
            Call::Out
        }
    }

    #[inline]
    pub fn geometry(&self) -> &CourtGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> InOutDetector {
        InOutDetector::new(CourtGeometry::new(
            vec![(0, 0), (100, 0), (100, 50), (0, 50)],
            vec![(20, 10), (80, 10), (80, 40), (20, 40)],
            vec![(10, 5), (90, 5), (90, 45), (10, 45)],
        ))
    }

    #[test]
    fn center_is_in() {
        assert_eq!(detector().is_ball_in_court(na::Point2::new(50.0, 25.0)), Call::In);
    }

    #[test]
    fn outside_court_is_out() {
        assert_eq!(detector().is_ball_in_court(na::Point2::new(150.0, 25.0)), Call::Out);
        assert_eq!(detector().is_ball_in_court(na::Point2::new(50.0, -3.0)), Call::Out);
    }

    #[test]
    fn baseline_zone_only_is_in() {
        // inside baseline zone, outside service box
        assert_eq!(detector().is_ball_in_court(na::Point2::new(15.0, 25.0)), Call::In);
    }

    #[test]
    fn court_margin_is_out() {
        // inside the court, in neither inner zone
        assert_eq!(detector().is_ball_in_court(na::Point2::new(5.0, 25.0)), Call::Out);
        assert_eq!(detector().is_ball_in_court(na::Point2::new(50.0, 48.0)), Call::Out);
    }

    #[test]
    fn inner_zone_outside_court_is_still_out() {
        let d = InOutDetector::new(CourtGeometry::new(
            vec![(0, 0), (10, 0), (10, 10), (0, 10)],
            vec![(20, 20), (40, 20), (40, 40), (20, 40)],
            vec![(20, 20), (40, 20), (40, 40), (20, 40)],
        ));

        assert_eq!(d.is_ball_in_court(na::Point2::new(30.0, 30.0)), Call::Out);
    }

    #[test]
    fn displays_as_upper_case() {
        assert_eq!(Call::In.to_string(), "IN");
        assert_eq!(Call::Out.to_string(), "OUT");
        assert_eq!(serde_json::to_string(&Call::Out).unwrap(), "\"OUT\"");
    }
}
