use nalgebra_glm as glm;

/// An authored camera pose: where the camera sits and what it looks at.
/// Waypoints are interpolation endpoints; declaration order is traversal
/// order and is immutable at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

/// The hand-authored path the about-page scroll drives the camera along.
pub const ABOUT_CAMERA_PATH: &[Waypoint] = &[
    Waypoint {
        position: [0.005775, 1.276720, -3.310397],
        target: [0.131217, 1.534274, 0.859131],
    },
    Waypoint {
        position: [4.407232, 3.694332, 6.836674],
        target: [-0.185710, 0.720304, 2.246814],
    },
    Waypoint {
        position: [-5.648253, 1.031125, -4.984693],
        target: [1.185256, -0.700784, 3.725735],
    },
    Waypoint {
        position: [6.210263, 2.653112, 4.164157],
        target: [-0.391628, 0.191081, 1.395586],
    },
    Waypoint {
        position: [-3.949448, 1.526291, 6.318589],
        target: [1.404053, 0.707201, 0.330522],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct CameraPath {
    waypoints: &'static [Waypoint],
}

impl CameraPath {
    pub const fn new(waypoints: &'static [Waypoint]) -> Self {
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    /// How many waypoint transitions `trigger_count` scroll regions can
    /// consume. Never more than `waypoints.len() - 1`: excess trigger
    /// regions are skipped, never clamped onto invented poses.
    pub fn transition_count(&self, trigger_count: usize) -> usize {
        self.waypoints.len().saturating_sub(1).min(trigger_count)
    }

    /// Pose along segment `i` (from `waypoints[i]` to `waypoints[i + 1]`)
    /// at an already-eased `t` in `[0, 1]`.
    pub fn pose(&self, segment: usize, t: f32) -> Option<(glm::Vec3, glm::Vec3)> {
        let a = self.waypoints.get(segment)?;
        let b = self.waypoints.get(segment + 1)?;
        let t = t.clamp(0.0, 1.0);
        let position = glm::lerp(&glm::Vec3::from(a.position), &glm::Vec3::from(b.position), t);
        let target = glm::lerp(&glm::Vec3::from(a.target), &glm::Vec3::from(b.target), t);
        Some((position, target))
    }
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::new(ABOUT_CAMERA_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &[Waypoint] = &[
        Waypoint {
            position: [0.0, 0.0, 0.0],
            target: [0.0, 0.0, -1.0],
        },
        Waypoint {
            position: [2.0, 4.0, 0.0],
            target: [0.0, 2.0, -1.0],
        },
    ];

    #[test]
    fn transitions_never_exceed_waypoints_minus_one() {
        let path = CameraPath::default();
        assert_eq!(path.len(), 5);
        assert_eq!(path.transition_count(3), 3);
        assert_eq!(path.transition_count(4), 4);
        assert_eq!(path.transition_count(7), 4);
        assert_eq!(path.transition_count(0), 0);
    }

    #[test]
    fn single_waypoint_yields_no_transitions() {
        let path = CameraPath::new(&TWO[..1]);
        assert_eq!(path.transition_count(3), 0);
    }

    #[test]
    fn pose_interpolates_position_and_target() {
        let path = CameraPath::new(TWO);
        let (pos, tgt) = path.pose(0, 0.5).unwrap();
        assert_eq!(pos, nalgebra_glm::vec3(1.0, 2.0, 0.0));
        assert_eq!(tgt, nalgebra_glm::vec3(0.0, 1.0, -1.0));
    }

    #[test]
    fn pose_endpoints_match_waypoints() {
        let path = CameraPath::new(TWO);
        let (start, _) = path.pose(0, 0.0).unwrap();
        let (end, _) = path.pose(0, 1.0).unwrap();
        assert_eq!(start, nalgebra_glm::Vec3::from(TWO[0].position));
        assert_eq!(end, nalgebra_glm::Vec3::from(TWO[1].position));
    }

    #[test]
    fn out_of_range_segment_is_none() {
        let path = CameraPath::new(TWO);
        assert!(path.pose(1, 0.5).is_none());
    }

    #[test]
    fn pose_clamps_t() {
        let path = CameraPath::new(TWO);
        let (pos, _) = path.pose(0, 2.0).unwrap();
        assert_eq!(pos, nalgebra_glm::Vec3::from(TWO[1].position));
    }
}
