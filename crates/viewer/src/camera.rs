//! Orbit camera for the cloth scene.

use glam::{Mat4, Vec3};

/// Yaw/pitch orbit around a fixed target, driven by the arrow keys.
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: std::f32::consts::FRAC_PI_2,
            pitch: 0.35,
            distance: 2.5,
            target: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.yaw.cos() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.sin() * self.pitch.cos(),
            )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, aspect, 0.01, 50.0);
        proj * view
    }

    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-1.4, 1.4);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(0.6, 12.0);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
