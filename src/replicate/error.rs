use thiserror::Error;

/// Fatal replication failures.
///
/// Per-value problems (unsupported kinds, non-serializable callables,
/// reload failures, unknown resource types) are not errors; they degrade
/// that one value and are reported through
/// [`CopyReport`](crate::replicate::diagnostics::CopyReport). An error here
/// aborts the whole call.
#[derive(Debug, Error)]
pub enum ReplicateError {
    #[error("source stack holds {depth} values but {requested} were requested")]
    StackUnderflow { requested: usize, depth: usize },
    /// A reconstructed closure rejected a capture binding. Indicates a
    /// body/capture layout mismatch between the contexts.
    #[error("cannot bind captured slot {slot} of value #{index}: {reason}")]
    CaptureBind {
        index: usize,
        slot: usize,
        reason: String,
    },
}
