//! Ball mesh for the sphere collider.

use crate::vertex::ColoredVertex;
use glam::Vec3;

/// Lat-long sphere mesh.
///
/// Callers draw the ball slightly smaller than the collider radius so
/// cloth projected onto the collider surface does not z-fight with it.
pub fn sphere_mesh(
    center: Vec3,
    radius: f32,
    stacks: u32,
    slices: u32,
    color: [f32; 4],
) -> (Vec<ColoredVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    for stack in 0..=stacks {
        let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
        for slice in 0..=slices {
            let theta = std::f32::consts::TAU * slice as f32 / slices as f32;
            let dir = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(ColoredVertex {
                position: (center + radius * dir).to_array(),
                color,
            });
        }
    }

    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * (slices + 1) + slice;
            let b = a + slices + 1;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}
