use std::collections::TryReserveError;

/// Error returned when trying to push to a full ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ring buffer is full")]
pub struct BufferFullError(());

impl BufferFullError {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Error returned when trying to pop from a ring buffer with no unread items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ring buffer is empty")]
pub struct BufferEmptyError(());

impl BufferEmptyError {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Error returned by the bulk transfer methods when the request does not fit.
///
/// The buffer is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("write of {requested} items exceeds the {available} free slots")]
    WriteOverflow { requested: usize, available: usize },
    #[error("read of {requested} items exceeds the {available} unread items")]
    ReadUnderflow { requested: usize, available: usize },
}

/// Error returned when storage for the ring buffer could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("ring buffer capacity must be at least 1")]
    ZeroCapacity,
    #[error("failed to allocate ring buffer storage")]
    Reserve(#[from] TryReserveError),
}
