//! Spring network stencil shared by every point in the grid.
//!
//! The stencil is a fixed list of relative grid offsets. A point at (i, j)
//! is spring-connected to every in-bounds (i, j) + offset. Rest lengths are
//! derived from the offsets once at build time and never change.

use glam::IVec2;

/// Which neighbor set the spring network connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StencilMode {
    /// Immediate structural and shear springs: the 8 surrounding cells.
    #[default]
    Structural,
    /// Adds 2-cell bending springs: every offset in [-2, 2]^2 with
    /// Manhattan norm at most 2.
    Bending,
}

/// Immutable spring stencil: relative offsets and their rest lengths.
pub struct SpringTopology {
    offsets: Vec<IVec2>,
    rest_lengths: Vec<f32>,
}

impl SpringTopology {
    /// Build the stencil for the given mode.
    ///
    /// Each rest length is the offset's Euclidean norm scaled by
    /// `quad_size`. The origin is never part of the stencil.
    pub fn build(mode: StencilMode, quad_size: f32) -> Self {
        let mut offsets = Vec::new();
        match mode {
            StencilMode::Structural => {
                for di in -1i32..=1 {
                    for dj in -1i32..=1 {
                        if (di, dj) != (0, 0) {
                            offsets.push(IVec2::new(di, dj));
                        }
                    }
                }
            }
            StencilMode::Bending => {
                for di in -2i32..=2 {
                    for dj in -2i32..=2 {
                        if (di, dj) != (0, 0) && di.abs() + dj.abs() <= 2 {
                            offsets.push(IVec2::new(di, dj));
                        }
                    }
                }
            }
        }

        let rest_lengths = offsets
            .iter()
            .map(|o| quad_size * o.as_vec2().length())
            .collect();

        Self {
            offsets,
            rest_lengths,
        }
    }

    /// Number of springs attached to an interior point.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Iterate (offset, rest_length) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, f32)> + '_ {
        self.offsets
            .iter()
            .copied()
            .zip(self.rest_lengths.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_stencil_has_eight_springs() {
        let topo = SpringTopology::build(StencilMode::Structural, 0.1);
        assert_eq!(topo.len(), 8);
    }

    #[test]
    fn test_bending_stencil_has_twelve_springs() {
        // Diamond of Manhattan radius 2 minus the origin: 4 axis neighbors,
        // 4 diagonals, 4 two-cell axis neighbors.
        let topo = SpringTopology::build(StencilMode::Bending, 0.1);
        assert_eq!(topo.len(), 12);
    }

    #[test]
    fn test_stencil_never_contains_origin() {
        for mode in [StencilMode::Structural, StencilMode::Bending] {
            let topo = SpringTopology::build(mode, 0.1);
            assert!(topo.iter().all(|(o, _)| o != IVec2::ZERO));
        }
    }

    #[test]
    fn test_rest_lengths_match_offset_norms() {
        let quad = 0.25;
        let topo = SpringTopology::build(StencilMode::Structural, quad);
        for (offset, rest) in topo.iter() {
            let expected = quad * (offset.as_vec2()).length();
            assert!(
                (rest - expected).abs() < 1e-7,
                "offset {:?}: rest {} expected {}",
                offset,
                rest,
                expected
            );
        }
        // Diagonals are sqrt(2) times the axis rest length.
        let diag = topo
            .iter()
            .find(|(o, _)| *o == IVec2::new(1, 1))
            .map(|(_, r)| r)
            .unwrap();
        assert!((diag - quad * 2.0f32.sqrt()).abs() < 1e-7);
    }

    #[test]
    fn test_bending_stencil_includes_two_cell_offsets() {
        let topo = SpringTopology::build(StencilMode::Bending, 0.5);
        let far = topo
            .iter()
            .find(|(o, _)| *o == IVec2::new(2, 0))
            .map(|(_, r)| r);
        assert_eq!(far, Some(1.0));
        // Far diagonals like (2, 1) exceed Manhattan norm 2 and are excluded.
        assert!(topo.iter().all(|(o, _)| o.x.abs() + o.y.abs() <= 2));
    }
}
