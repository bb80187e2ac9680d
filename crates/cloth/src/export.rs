//! Render-facing buffers.
//!
//! Pre-allocated once (the simulation never allocates per frame) and
//! refreshed from the grid after the substep loop for a frame completes,
//! never mid-substep. Renderers treat all three arrays as read-only.

use crate::grid::ClothGrid;
use crate::mesh;

/// Flat vertex, index, and color buffers consumed by a renderer.
pub struct RenderBuffers {
    /// One entry per grid point, row-major, refreshed per frame.
    pub vertices: Vec<[f32; 3]>,
    /// Two triangles per quad; fixed for a given resolution.
    pub indices: Vec<u32>,
    /// Checkerboard colors; fixed for a given resolution.
    pub colors: Vec<[f32; 4]>,
}

impl RenderBuffers {
    pub fn new(n: usize) -> Self {
        Self {
            vertices: vec![[0.0; 3]; n * n],
            indices: mesh::triangle_indices(n),
            colors: mesh::vertex_colors(n),
        }
    }

    /// Flatten the position grid into the vertex buffer, row-major.
    pub fn update_vertices(&mut self, grid: &ClothGrid) {
        debug_assert_eq!(self.vertices.len(), grid.point_count());
        for (dst, src) in self.vertices.iter_mut().zip(&grid.positions) {
            *dst = src.to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_buffer_sizes() {
        let buffers = RenderBuffers::new(8);
        assert_eq!(buffers.vertices.len(), 64);
        assert_eq!(buffers.indices.len(), 7 * 7 * 6);
        assert_eq!(buffers.colors.len(), 64);
    }

    #[test]
    fn test_update_mirrors_grid_positions() {
        let mut grid = ClothGrid::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        grid.seed(&mut rng);

        let mut buffers = RenderBuffers::new(4);
        buffers.update_vertices(&grid);

        for (flat, p) in buffers.vertices.iter().zip(&grid.positions) {
            assert_eq!(*flat, p.to_array());
        }
        // Row-major: vertex i*n+j is grid point (i, j).
        let idx = grid.index(2, 1);
        assert_eq!(buffers.vertices[idx], grid.positions[idx].to_array());
    }
}
