//! Mass-Spring Cloth Simulation
//!
//! A square sheet of unit point masses connected by a fixed spring stencil,
//! advanced by explicit integration under gravity, elastic/dashpot spring
//! forces, velocity drag, and collision with a static sphere.
//!
//! Each substep runs three phases over the whole grid, in order:
//! gravity impulse, spring forces, then drag + collision + position update.
//! Every phase is a data-parallel map; the spring phase double-buffers
//! velocities so neighbor reads are race-free.
//!
//! This crate is framework-agnostic - it handles simulation only.
//! Use the `viewer` crate for rendering with wgpu.
//!
//! # Example
//!
//! ```
//! use cloth::{ClothSimulation, StencilMode};
//!
//! let mut sim = ClothSimulation::new(32, StencilMode::Structural);
//! sim.reset(&mut rand::thread_rng());
//!
//! let dt = cloth::constants::DEFAULT_DT;
//! for _ in 0..10 {
//!     sim.substep(dt);
//! }
//! assert!(sim.max_speed().is_finite());
//! ```

pub mod advection;
pub mod collider;
pub mod constants;
pub mod export;
pub mod forces;
pub mod grid;
pub mod mesh;
pub mod params;
pub mod topology;

pub use collider::SphereCollider;
pub use export::RenderBuffers;
pub use glam::Vec3;
pub use grid::ClothGrid;
pub use params::ClothParams;
pub use topology::{SpringTopology, StencilMode};

use rand::Rng;

/// The cloth simulation: grid state plus the immutable pieces around it.
pub struct ClothSimulation {
    /// Point positions and velocities.
    pub grid: ClothGrid,
    /// Spring stencil, fixed at construction.
    pub topology: SpringTopology,
    /// The ball the sheet drapes over.
    pub collider: SphereCollider,
    /// Tunable scalar knobs, owned by the driver.
    pub params: ClothParams,
    /// Gravity vector (default: -Y).
    pub gravity: Vec3,
    /// Substeps taken since construction.
    pub substep_count: u64,
}

impl ClothSimulation {
    /// Create a simulation with an n x n sheet and the given stencil mode.
    ///
    /// The sheet starts unseeded (all points at the origin); call
    /// [`reset`](Self::reset) before stepping.
    pub fn new(n: usize, mode: StencilMode) -> Self {
        let grid = ClothGrid::new(n);
        let topology = SpringTopology::build(mode, grid.quad_size());
        Self {
            grid,
            topology,
            collider: SphereCollider::new(constants::BALL_CENTER, constants::BALL_RADIUS),
            params: ClothParams::default(),
            gravity: constants::GRAVITY,
            substep_count: 0,
        }
    }

    /// The reference scene: a 256 x 256 sheet with structural springs.
    pub fn reference() -> Self {
        Self::new(constants::DEFAULT_RESOLUTION, StencilMode::Structural)
    }

    /// Reseed the sheet and zero all velocities.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.grid.seed(rng);
    }

    /// Advance the whole grid by one fixed substep.
    ///
    /// The three phases run strictly in order; each completes over every
    /// point before the next begins.
    pub fn substep(&mut self, dt: f32) {
        forces::apply_gravity(&mut self.grid, self.gravity, dt);
        forces::apply_spring_forces(&mut self.grid, &self.topology, &self.params, dt);
        advection::advect_points(&mut self.grid, &self.collider, &self.params, dt);
        self.substep_count += 1;
    }

    /// Largest point speed, for divergence diagnostics.
    pub fn max_speed(&self) -> f32 {
        self.grid
            .velocities
            .iter()
            .map(|v| v.length())
            .fold(0.0f32, f32::max)
    }

    /// Mean sheet height, for drape diagnostics.
    pub fn mean_height(&self) -> f32 {
        let sum: f32 = self.grid.positions.iter().map(|p| p.y).sum();
        sum / self.grid.point_count() as f32
    }

    /// Deepest residual sphere penetration across all points.
    ///
    /// Zero (up to float rounding) after any substep: penetrating points
    /// are projected onto the surface before the position update, which
    /// can carry them at most `|v| * dt` back inside.
    pub fn max_penetration(&self) -> f32 {
        self.grid
            .positions
            .iter()
            .map(|p| (self.collider.radius - (*p - self.collider.center).length()).max(0.0))
            .fold(0.0f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_simulation_creation() {
        let sim = ClothSimulation::new(16, StencilMode::Structural);
        assert_eq!(sim.grid.n(), 16);
        assert_eq!(sim.topology.len(), 8);
        assert_eq!(sim.substep_count, 0);
        assert_eq!(sim.collider.radius, constants::BALL_RADIUS);
    }

    #[test]
    fn test_reference_scene_dimensions() {
        let sim = ClothSimulation::reference();
        assert_eq!(sim.grid.n(), constants::DEFAULT_RESOLUTION);
        assert!((constants::DEFAULT_DT - 4.0e-2 / 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_substep_advances_counter_and_state() {
        let mut sim = ClothSimulation::new(8, StencilMode::Structural);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        sim.reset(&mut rng);

        let y0 = sim.mean_height();
        let dt = constants::DEFAULT_DT;
        for _ in 0..200 {
            sim.substep(dt);
        }
        assert_eq!(sim.substep_count, 200);
        assert!(sim.mean_height() < y0, "sheet should fall under gravity");
        assert!(sim.max_speed().is_finite());
    }

    #[test]
    fn test_reset_restores_rest_height() {
        let mut sim = ClothSimulation::new(8, StencilMode::Bending);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        sim.reset(&mut rng);

        let dt = constants::DEFAULT_DT;
        for _ in 0..50 {
            sim.substep(dt);
        }
        sim.reset(&mut rng);
        assert!((sim.mean_height() - constants::REST_HEIGHT).abs() < 1e-6);
        assert_eq!(sim.max_speed(), 0.0);
    }
}
