//! Deep-value replication between two isolated contexts.
//!
//! The single entry point is [`replicate_top`], which copies the top N
//! values of one context's stack onto another's. Copies are deep: tables,
//! closures, and text are rebuilt in the destination heap, aliasing and
//! cycles are preserved within one call through a per-call visited table,
//! and external resources are shared by refcount rather than duplicated.
//!
//! Replication is synchronous and purely recursive; recursion depth follows
//! the nesting depth of the value graph. The caller must keep both contexts
//! free of concurrent mutation for the duration of a call.

pub mod byte_buffer;
pub mod classify;
mod copier;
pub mod diagnostics;
pub mod error;
mod visited;

pub use copier::replicate_top;
pub use diagnostics::{CopyDiagnostic, CopyReport};
pub use error::ReplicateError;
