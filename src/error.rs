use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MosaicIndexError {
    /// A nearest-neighbor query was made against a tree holding no points.
    #[error("Cannot query an empty index.")]
    EmptyIndex,

    /// A palette mapper was constructed without any palette items.
    #[error("Cannot map onto an empty palette.")]
    EmptyPalette,

    /// A coordinate did not have the number of dimensions the index expects.
    #[error("Got coordinate with {actual} dimensions when expected {expected}.")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, MosaicIndexError>;
