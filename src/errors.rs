use thiserror::Error;

/// Recoverable failures raised around the ring buffer.
///
/// Ordinary full/empty conditions are never errors: they are reported through
/// `bool`/`usize` return values. This type covers fallible construction and
/// staging configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FifoError {
    #[error("{requested} elements requested but capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("Invalid stage configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FifoError>;
