//! The point grid holding cloth state.
//!
//! Positions and velocities live in two parallel row-major arrays
//! (`index = i * n + j`). A third pre-allocated array backs the spring
//! phase so neighbor reads always see phase-start velocities.

use crate::constants::{REST_HEIGHT, SEED_JITTER};
use glam::Vec3;
use rand::Rng;

/// An n x n sheet of unit point masses.
pub struct ClothGrid {
    n: usize,
    quad_size: f32,
    /// World position of every point.
    pub positions: Vec<Vec3>,
    /// Velocity of every point.
    pub velocities: Vec<Vec3>,
    /// Write target for the spring phase; swapped into `velocities` at the
    /// end of that phase.
    pub(crate) velocity_scratch: Vec<Vec3>,
}

impl ClothGrid {
    /// Create a grid of n x n points, all at the origin with zero velocity.
    ///
    /// Call [`seed`](Self::seed) before stepping.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "cloth grid needs at least 2x2 points");
        let count = n * n;
        Self {
            n,
            quad_size: 1.0 / n as f32,
            positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            velocity_scratch: vec![Vec3::ZERO; count],
        }
    }

    /// Points along one side.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Physical edge length of one grid cell.
    #[inline]
    pub fn quad_size(&self) -> f32 {
        self.quad_size
    }

    /// Total number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    /// Row-major index of point (i, j).
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Reseed the sheet: flat grid at rest height, all velocities zero.
    ///
    /// One jitter draw per call, shared by every point: the whole sheet
    /// shifts together instead of starting with per-point noise. Safe to
    /// call at any substep boundary.
    pub fn seed(&mut self, rng: &mut impl Rng) {
        let dx = (rng.gen::<f32>() - 0.5) * SEED_JITTER;
        let dz = (rng.gen::<f32>() - 0.5) * SEED_JITTER;

        for i in 0..self.n {
            for j in 0..self.n {
                let idx = self.index(i, j);
                self.positions[idx] = Vec3::new(
                    i as f32 * self.quad_size - 0.5 + dx,
                    REST_HEIGHT,
                    j as f32 * self.quad_size - 0.5 + dz,
                );
                self.velocities[idx] = Vec3::ZERO;
            }
        }
    }
}
