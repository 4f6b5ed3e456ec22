//! Portable byte form of compiled function bodies.
//!
//! A dumped body travels between two live heaps in one process, never to
//! disk, so the format is a plain little-endian tagged stream behind a
//! write-callback seam rather than a file.

mod function_serialization;


pub use function_serialization::{dump_function, load_function};

/// Opaque instruction bytes produced by the host compiler.
pub type Instructions = Vec<u8>;

/// Byte sink a function dump writes through.
///
/// Mirrors the host runtime's writer-callback dump primitive: the dump
/// calls the sink zero or more times and stops on the first error the sink
/// returns.
pub trait DumpSink {
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), String>;
}
