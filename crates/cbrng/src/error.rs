//! Error types.
//!
//! Generation, skipping, seeding and derivation are total and never fail.
//! Errors only arise at the persistence boundary, when a snapshot handed back
//! to an engine does not fit its shape.

/// Errors from restoring or decoding persisted engine state.
#[derive(Debug, thiserror::Error)]
pub enum CbrngError {
    /// A snapshot field holds the wrong number of words for the engine.
    #[error("{field} holds {actual} words, engine expects {expected}")]
    LaneMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The buffer cursor points past the end of a block.
    #[error("buffer cursor {elem} exceeds block width {lanes}")]
    CursorOutOfRange { elem: usize, lanes: usize },

    /// The snapshot bytes could not be encoded or decoded.
    #[error("state encoding error: {source}")]
    Encoding {
        #[from]
        source: postcard::Error,
    },
}

/// Result alias for fallible core operations.
pub type Result<T> = std::result::Result<T, CbrngError>;
