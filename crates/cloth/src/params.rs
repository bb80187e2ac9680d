//! Tunable simulation parameters.
//!
//! A plain struct owned by the driver and passed by reference into each
//! substep. The core accepts any non-negative value without validation;
//! the ranges below are what interactive controls should expose.

use serde::{Deserialize, Serialize};

/// Slider range for [`ClothParams::spring_stiffness`].
pub const SPRING_STIFFNESS_RANGE: (f32, f32) = (0.0, 43_500.0);
/// Slider range for [`ClothParams::dashpot_damping`].
pub const DASHPOT_DAMPING_RANGE: (f32, f32) = (0.0, 200_000.0);
/// Slider range for [`ClothParams::drag_damping`].
pub const DRAG_DAMPING_RANGE: (f32, f32) = (0.0, 5.0);
/// Slider range for [`ClothParams::friction`].
pub const FRICTION_RANGE: (f32, f32) = (0.0, 0.025);
/// Slider range for [`ClothParams::restitution`].
pub const RESTITUTION_RANGE: (f32, f32) = (0.0, 1.0);

/// Scalar knobs read by the force and collision phases.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClothParams {
    /// Elastic spring stiffness (Young's-modulus-like scale).
    pub spring_stiffness: f32,
    /// Dashpot damping along each spring axis.
    pub dashpot_damping: f32,
    /// Continuous velocity decay rate, applied as exp(-rate * dt).
    pub drag_damping: f32,
    /// Tangential damping fraction on sphere contact.
    pub friction: f32,
    /// Fraction of inward contact speed converted to bounce.
    pub restitution: f32,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            spring_stiffness: 3.0e4,
            dashpot_damping: 1.0e4,
            drag_damping: 1.0,
            friction: 0.01,
            restitution: 0.0,
        }
    }
}

impl ClothParams {
    /// Clamp every field to its documented slider range.
    pub fn clamp_to_ranges(&mut self) {
        self.spring_stiffness = self
            .spring_stiffness
            .clamp(SPRING_STIFFNESS_RANGE.0, SPRING_STIFFNESS_RANGE.1);
        self.dashpot_damping = self
            .dashpot_damping
            .clamp(DASHPOT_DAMPING_RANGE.0, DASHPOT_DAMPING_RANGE.1);
        self.drag_damping = self
            .drag_damping
            .clamp(DRAG_DAMPING_RANGE.0, DRAG_DAMPING_RANGE.1);
        self.friction = self.friction.clamp(FRICTION_RANGE.0, FRICTION_RANGE.1);
        self.restitution = self
            .restitution
            .clamp(RESTITUTION_RANGE.0, RESTITUTION_RANGE.1);
    }
}
