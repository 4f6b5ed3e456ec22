use crate::runtime::value::Value;

/// Closure whose body was JIT-compiled to native code in its owning context.
///
/// The native form is only meaningful inside the trace/code region that
/// produced it, so it has no portable byte representation. The host dump
/// primitive reports success for these without emitting anything, which is
/// what the replicator's trial dump detects.
#[derive(Debug, Clone)]
pub struct JitClosure {
    /// Entry address inside the owning context's code region.
    pub entry: usize,
    pub captures: Vec<Value>,
}

impl JitClosure {
    pub fn new(entry: usize, captures: Vec<Value>) -> Self {
        Self { entry, captures }
    }
}
