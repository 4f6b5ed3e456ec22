use crate::runtime::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoroutineStatus {
    Suspended,
    Running,
    Dead,
}

/// Suspended execution state owned by one context.
///
/// A coroutine's stack is tied to its owning context and cannot be rebuilt
/// elsewhere; the replicator treats this kind as unsupported.
#[derive(Debug)]
pub struct Coroutine {
    pub status: CoroutineStatus,
    pub stack: Vec<Value>,
}

impl Coroutine {
    pub fn new() -> Self {
        Self {
            status: CoroutineStatus::Suspended,
            stack: Vec::new(),
        }
    }
}

impl Default for Coroutine {
    fn default() -> Self {
        Self::new()
    }
}
