//! Reference-scene constants for the cloth simulation.
//!
//! All modules use these instead of defining their own copies. The viewer
//! may override resolution and gravity through its settings file.

use glam::Vec3;

/// Points along one side of the sheet in the reference scene.
pub const DEFAULT_RESOLUTION: usize = 256;

/// Gravity acceleration (m/s^2) - negative Y direction.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Height at which a freshly seeded sheet hangs above the ball.
pub const REST_HEIGHT: f32 = 0.6;

/// Full width of the shared seed jitter; each component lands within
/// plus/minus half of this.
pub const SEED_JITTER: f32 = 0.1;

/// Ball collider in the reference scene.
pub const BALL_CENTER: Vec3 = Vec3::ZERO;

/// Ball radius in the reference scene.
pub const BALL_RADIUS: f32 = 0.3;

/// Simulated seconds between automatic reseeds of the sheet.
pub const RESET_INTERVAL: f32 = 4.0;

/// Checkerboard block size (points per block along each axis).
pub const CHECKER_BLOCK: usize = 4;

/// Light checkerboard color [R, G, B, A].
pub const CHECKER_LIGHT: [f32; 4] = [0.2314, 0.7020, 0.3765, 1.0];

/// Dark checkerboard color [R, G, B, A].
pub const CHECKER_DARK: [f32; 4] = [0.0549, 0.2549, 0.1137, 1.0];

/// Fixed substep size, calibrated against the reference resolution.
///
/// Worst-case spring frequency grows with resolution, so a step that holds
/// at 256 holds at every lower resolution too.
pub const DEFAULT_DT: f32 = 4.0e-2 / DEFAULT_RESOLUTION as f32;
