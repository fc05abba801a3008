use nalgebra_glm as glm;

/// Free camera with a position and a look-at target.
///
/// Both may be mutated externally at any time (the scroll binder between
/// frames, the debug nudger on key presses); the view-projection matrix is
/// recomputed from whatever the current pose is.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub position: glm::Vec3,
    pub target: glm::Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    default_position: glm::Vec3,
    default_target: glm::Vec3,
}

impl CameraState {
    pub fn new(position: glm::Vec3, target: glm::Vec3) -> Self {
        Self {
            position,
            target,
            fov_y_deg: 30.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            default_position: position,
            default_target: target,
        }
    }

    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.target = self.default_target;
    }

    /// Keep the aspect ratio in step with the surface. Degenerate sizes
    /// (minimized window) are ignored; nothing else changes.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> glm::Mat4 {
        let proj = glm::perspective(self.aspect, self.fov_y_deg.to_radians(), self.near, self.far);
        let up = glm::vec3(0.0, 1.0, 0.0);
        let view = glm::look_at(&self.position, &self.target, &up);
        proj * view
    }

    /// Debug-only camera nudge along a world axis.
    pub fn nudge(&mut self, axis: usize, amount: f32) {
        if let Some(c) = self.position.get_mut(axis) {
            *c += amount;
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(glm::vec3(0.0, 0.0, 2.0), glm::vec3(0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_updates_aspect() {
        let mut camera = CameraState::default();
        camera.set_viewport(1600, 800);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let mut camera = CameraState::default();
        camera.set_viewport(1200, 800);
        camera.set_viewport(0, 800);
        camera.set_viewport(1200, 0);
        assert_eq!(camera.aspect, 1.5);
    }

    #[test]
    fn reset_restores_initial_pose() {
        let mut camera = CameraState::new(glm::vec3(1.0, 2.0, 3.0), glm::vec3(0.0, 1.0, 0.0));
        camera.position = glm::vec3(9.0, 9.0, 9.0);
        camera.target = glm::vec3(9.0, 0.0, 0.0);
        camera.reset();
        assert_eq!(camera.position, glm::vec3(1.0, 2.0, 3.0));
        assert_eq!(camera.target, glm::vec3(0.0, 1.0, 0.0));
    }

    #[test]
    fn nudge_moves_one_axis() {
        let mut camera = CameraState::default();
        camera.nudge(1, 0.1);
        assert!((camera.position.y - 0.1).abs() < 1e-6);
        assert_eq!(camera.position.x, 0.0);
    }
}
