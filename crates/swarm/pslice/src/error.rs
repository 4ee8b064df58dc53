/// Errors returned when building a [`PSlice`](crate::PSlice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PSliceError {
    /// A PSlice needs at least one bin.
    #[error("pslice requires at least one bin")]
    ZeroBins,
}

/// Result type for PSlice construction.
pub type PSliceResult<T> = Result<T, PSliceError>;
