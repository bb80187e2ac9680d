//! Gravity and spring force phases of a substep.
//!
//! Each phase is a parallel map over the whole grid. Phases must run to
//! completion in order: the spring phase reads the velocities the gravity
//! phase wrote, across neighboring points.

use crate::grid::ClothGrid;
use crate::params::ClothParams;
use crate::topology::SpringTopology;
use glam::Vec3;
use rayon::prelude::*;

/// Phase A: gravity impulse on every point.
pub fn apply_gravity(grid: &mut ClothGrid, gravity: Vec3, dt: f32) {
    let dv = gravity * dt;
    grid.velocities.par_iter_mut().for_each(|v| *v += dv);
}

/// Phase B: elastic and dashpot spring forces.
///
/// New velocities go into the scratch buffer while the live arrays stay
/// read-only, so every neighbor read sees phase-start state regardless of
/// scheduling. The scratch is swapped in at the end of the phase.
///
/// Edge points simply have fewer in-bounds neighbors; coincident points
/// contribute no force (no defined spring direction). Unit point mass.
pub fn apply_spring_forces(
    grid: &mut ClothGrid,
    topology: &SpringTopology,
    params: &ClothParams,
    dt: f32,
) {
    let n = grid.n() as i32;
    let stiffness = params.spring_stiffness;
    let dashpot = params.dashpot_damping * grid.quad_size();

    let positions = &grid.positions;
    let velocities = &grid.velocities;
    let scratch = &mut grid.velocity_scratch;

    scratch
        .par_iter_mut()
        .enumerate()
        .for_each(|(idx, v_next)| {
            let i = idx as i32 / n;
            let j = idx as i32 % n;

            let mut force = Vec3::ZERO;
            for (offset, rest) in topology.iter() {
                let ni = i + offset.x;
                let nj = j + offset.y;
                if ni < 0 || ni >= n || nj < 0 || nj >= n {
                    continue;
                }
                let nidx = (ni * n + nj) as usize;

                let x_ij = positions[idx] - positions[nidx];
                let v_ij = velocities[idx] - velocities[nidx];

                let Some(dir) = x_ij.try_normalize() else {
                    continue;
                };
                let current = x_ij.length();

                force += -stiffness * (current / rest - 1.0) * dir;
                force += -v_ij.dot(dir) * dashpot * dir;
            }

            *v_next = velocities[idx] + force * dt;
        });

    std::mem::swap(&mut grid.velocities, &mut grid.velocity_scratch);
}
