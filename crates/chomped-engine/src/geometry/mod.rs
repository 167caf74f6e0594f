//! Vertex and index data for shapes.
//!
//! Positions are tightly packed `(x, y, z)` floats. Indices, when present,
//! describe triangle-list winding over those vertices.

mod error;

pub use error::GeometryError;

/// Float components per vertex.
pub const COORDS_PER_VERTEX: usize = 3;

/// Byte stride between consecutive vertices.
pub const VERTEX_STRIDE: usize = COORDS_PER_VERTEX * std::mem::size_of::<f32>();

/// Validated, immutable geometry.
///
/// Invariants:
/// - `positions.len()` is a multiple of [`COORDS_PER_VERTEX`]
/// - every index is `< vertex_count()`
/// - an index list, if present, is non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<f32>,
    indices: Option<Vec<u16>>,
}

impl Geometry {
    /// Validates and wraps vertex positions plus an optional index list.
    pub fn new(positions: Vec<f32>, indices: Option<Vec<u16>>) -> Result<Self, GeometryError> {
        if positions.len() % COORDS_PER_VERTEX != 0 {
            return Err(GeometryError::PositionsNotMultipleOfThree { len: positions.len() });
        }

        let vertex_count = positions.len() / COORDS_PER_VERTEX;

        if let Some(indices) = &indices {
            if indices.is_empty() {
                return Err(GeometryError::EmptyIndices);
            }
            if let Some((at, &index)) = indices
                .iter()
                .enumerate()
                .find(|(_, i)| usize::from(**i) >= vertex_count)
            {
                return Err(GeometryError::IndexOutOfRange { at, index, vertex_count });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Non-indexed geometry; every three vertices form one triangle.
    #[inline]
    pub fn from_positions(positions: Vec<f32>) -> Result<Self, GeometryError> {
        Self::new(positions, None)
    }

    #[inline]
    pub fn indexed(positions: Vec<f32>, indices: Vec<u16>) -> Result<Self, GeometryError> {
        Self::new(positions, Some(indices))
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_deref()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / COORDS_PER_VERTEX
    }

    /// The single draw command that covers this geometry.
    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            Some(indices) => DrawCall::Indexed { index_count: indices.len() as u32 },
            None => DrawCall::Arrays { vertex_count: self.vertex_count() as u32 },
        }
    }
}

/// One triangle-list draw command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// Ordered draw over the first `vertex_count` vertices.
    Arrays { vertex_count: u32 },
    /// Draw over the first `index_count` entries of the bound index list.
    Indexed { index_count: u32 },
}

impl DrawCall {
    /// Vertices (non-indexed) or elements (indexed) covered by the call.
    #[inline]
    pub fn count(self) -> u32 {
        match self {
            Self::Arrays { vertex_count } => vertex_count,
            Self::Indexed { index_count } => index_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Vec<f32> {
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    }

    fn unit_square() -> Vec<f32> {
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    }

    #[test]
    fn triangle_draws_three_vertices() {
        let g = Geometry::from_positions(unit_triangle()).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.draw_call(), DrawCall::Arrays { vertex_count: 3 });
    }

    #[test]
    fn square_draws_six_elements() {
        let g = Geometry::indexed(unit_square(), vec![0, 1, 2, 0, 2, 3]).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.draw_call(), DrawCall::Indexed { index_count: 6 });
        assert_eq!(g.draw_call().count(), 6);
    }

    #[test]
    fn rejects_partial_vertex() {
        let err = Geometry::from_positions(vec![0.0; 7]).unwrap_err();
        assert_eq!(err, GeometryError::PositionsNotMultipleOfThree { len: 7 });
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Geometry::indexed(unit_square(), vec![0, 1, 5]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange { at: 2, index: 5, vertex_count: 4 }
        );
    }

    #[test]
    fn index_equal_to_vertex_count_is_out_of_range() {
        assert!(Geometry::indexed(unit_square(), vec![0, 1, 4]).is_err());
        assert!(Geometry::indexed(unit_square(), vec![0, 1, 3]).is_ok());
    }

    #[test]
    fn rejects_empty_index_list() {
        let err = Geometry::indexed(unit_square(), Vec::new()).unwrap_err();
        assert_eq!(err, GeometryError::EmptyIndices);
    }

    #[test]
    fn empty_positions_draw_nothing() {
        let g = Geometry::from_positions(Vec::new()).unwrap();
        assert_eq!(g.draw_call().count(), 0);
    }

    #[test]
    fn stride_is_three_floats() {
        assert_eq!(VERTEX_STRIDE, 12);
    }
}
