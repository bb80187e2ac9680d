//! Triangle and color buffers derived from the grid dimensions.
//!
//! Pure functions of the resolution; computed once at startup. Physics
//! never reads these.

use crate::constants::{CHECKER_BLOCK, CHECKER_DARK, CHECKER_LIGHT};

/// Index buffer covering every grid quad with two triangles.
///
/// Both triangles of a quad wind the same way so a renderer with culling
/// disabled shades the sheet from either side.
pub fn triangle_indices(n: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let near = (i * n + j) as u32;
            let below = ((i + 1) * n + j) as u32;
            let right = (i * n + j + 1) as u32;
            let opposite = ((i + 1) * n + j + 1) as u32;

            indices.extend_from_slice(&[near, below, right]);
            indices.extend_from_slice(&[opposite, right, below]);
        }
    }
    indices
}

/// Static per-vertex colors: a checkerboard by 4x4 block parity of (i, j).
pub fn vertex_colors(n: usize) -> Vec<[f32; 4]> {
    let mut colors = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let even = (i / CHECKER_BLOCK + j / CHECKER_BLOCK) % 2 == 0;
            colors.push(if even { CHECKER_LIGHT } else { CHECKER_DARK });
        }
    }
    colors
}
