use std::fmt;

/// Which stream of the batch a capacity check refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StreamKind {
    Vertices,
    Indices,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Vertices => f.write_str("vertex"),
            StreamKind::Indices => f.write_str("index"),
        }
    }
}

/// A rejected submission. Nothing was written to the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchError {
    /// The submission needs more slots than remain in `stream` this frame.
    CapacityExceeded {
        stream: StreamKind,
        requested: usize,
        available: usize,
    },
    /// The flat input arrays do not describe a drawable shape.
    InvalidGeometry { reason: String },
}

impl BatchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BatchError::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::CapacityExceeded {
                stream,
                requested,
                available,
            } => write!(
                f,
                "{stream} capacity exceeded: requested {requested}, {available} available"
            ),
            BatchError::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
        }
    }
}

impl std::error::Error for BatchError {}
