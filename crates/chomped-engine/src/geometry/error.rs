use std::fmt;

/// Rejected vertex/index data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The position list does not split into whole `(x, y, z)` triples.
    PositionsNotMultipleOfThree { len: usize },
    /// An index refers past the last vertex.
    IndexOutOfRange {
        /// Position of the offending entry in the index list.
        at: usize,
        index: u16,
        vertex_count: usize,
    },
    /// An index list was supplied but holds no entries.
    EmptyIndices,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionsNotMultipleOfThree { len } => {
                write!(f, "position count {len} is not a multiple of 3")
            }
            Self::IndexOutOfRange { at, index, vertex_count } => write!(
                f,
                "index {index} at position {at} is out of range for {vertex_count} vertices"
            ),
            Self::EmptyIndices => f.write_str("index list is empty"),
        }
    }
}

impl std::error::Error for GeometryError {}
