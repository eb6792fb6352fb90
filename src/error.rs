use std::io;

use thiserror::Error;

/// Errors raised while reading or writing seed files.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be opened, read or written.
    #[error("seed file I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A population key is not of the form `"(row, col)"`.
    #[error("invalid coordinate key {0:?}, expected \"(row, col)\"")]
    InvalidKey(String),
    /// A coordinate lies outside the declared world.
    #[error("coordinate ({row}, {col}) is outside the {width}x{height} world")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    /// The declared world has a zero dimension.
    #[error("world size must have positive width and height")]
    ZeroSize,
    /// The declared world has more cells than [`WorldSize::MAX_CELLS`].
    ///
    /// [`WorldSize::MAX_CELLS`]: crate::model::WorldSize::MAX_CELLS
    #[error("world size {width}x{height} exceeds the supported cell count")]
    TooLarge { width: usize, height: usize },
    /// A text grid contains no rows.
    #[error("file contains no valid grid data")]
    EmptyGrid,
    /// A text grid row differs in length from the first row.
    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
