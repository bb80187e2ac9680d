//! Drag, sphere collision, and position integration.
//!
//! The final phase of a substep. Per-point work only: each point reads and
//! writes its own position and velocity, so the phase is a parallel map
//! with no shared writes.

use crate::collider::SphereCollider;
use crate::grid::ClothGrid;
use crate::params::ClothParams;
use rayon::prelude::*;

/// Phase C: velocity drag decay, collision resolution, position update.
///
/// Drag is a continuous decay, `v *= exp(-rate * dt)`, so the decay rate is
/// independent of the substep size. Collision handling projects penetrating
/// points onto the sphere surface in the same substep.
pub fn advect_points(
    grid: &mut ClothGrid,
    collider: &SphereCollider,
    params: &ClothParams,
    dt: f32,
) {
    let decay = (-params.drag_damping * dt).exp();
    let restitution = params.restitution;
    let friction = params.friction;

    let positions = &mut grid.positions;
    let velocities = &mut grid.velocities;

    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .for_each(|(p, v)| {
            *v *= decay;
            collider.resolve(p, v, restitution, friction);
            *p += dt * *v;
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn far_ball() -> SphereCollider {
        // Out of reach of every test point.
        SphereCollider::new(Vec3::new(100.0, 0.0, 0.0), 0.3)
    }

    #[test]
    fn test_drag_decays_speed_geometrically() {
        let mut grid = ClothGrid::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        grid.seed(&mut rng);
        for v in &mut grid.velocities {
            *v = Vec3::new(1.0, 2.0, -1.0);
        }
        let params = ClothParams {
            drag_damping: 2.0,
            ..ClothParams::default()
        };

        let dt = 0.01;
        let speed0 = grid.velocities[0].length();
        advect_points(&mut grid, &far_ball(), &params, dt);
        let speed1 = grid.velocities[0].length();
        advect_points(&mut grid, &far_ball(), &params, dt);
        let speed2 = grid.velocities[0].length();

        assert!(speed1 < speed0 && speed2 < speed1);
        // Constant ratio per substep.
        assert!(((speed1 / speed0) - (speed2 / speed1)).abs() < 1e-5);
        assert!(((speed1 / speed0) - (-params.drag_damping * dt).exp()).abs() < 1e-5);
    }

    #[test]
    fn test_zero_drag_leaves_velocity_unchanged() {
        let mut grid = ClothGrid::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        grid.seed(&mut rng);
        for v in &mut grid.velocities {
            *v = Vec3::new(0.5, -0.25, 0.125);
        }
        let params = ClothParams {
            drag_damping: 0.0,
            ..ClothParams::default()
        };

        advect_points(&mut grid, &far_ball(), &params, 0.01);
        for v in &grid.velocities {
            assert_eq!(*v, Vec3::new(0.5, -0.25, 0.125));
        }
    }

    #[test]
    fn test_positions_advance_by_velocity() {
        let mut grid = ClothGrid::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        grid.seed(&mut rng);
        let before = grid.positions.clone();
        for v in &mut grid.velocities {
            *v = Vec3::new(0.0, -1.0, 0.0);
        }
        let params = ClothParams {
            drag_damping: 0.0,
            ..ClothParams::default()
        };

        advect_points(&mut grid, &far_ball(), &params, 0.25);
        for (p, p0) in grid.positions.iter().zip(&before) {
            assert!((p.y - (p0.y - 0.25)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_penetrating_points_end_on_sphere_surface() {
        let mut grid = ClothGrid::new(2);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        grid.seed(&mut rng);
        let ball = SphereCollider::new(Vec3::ZERO, 0.3);
        // Place every point inside the ball, at rest.
        grid.positions[0] = Vec3::new(0.0, 0.1, 0.0);
        grid.positions[1] = Vec3::new(0.05, -0.2, 0.0);
        grid.positions[2] = Vec3::new(-0.1, 0.0, 0.1);
        grid.positions[3] = Vec3::new(0.0, 0.0, 0.29);
        for v in &mut grid.velocities {
            *v = Vec3::ZERO;
        }
        let params = ClothParams {
            drag_damping: 0.0,
            ..ClothParams::default()
        };

        advect_points(&mut grid, &ball, &params, 1.0e-3);
        for p in &grid.positions {
            assert!(
                (p.length() - ball.radius).abs() < 1e-5,
                "point {:?} not on surface",
                p
            );
        }
    }
}
