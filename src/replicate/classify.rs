use crate::{
    bytecode::DumpSink,
    runtime::{context::Context, foreign_function::ForeignFunction, value::Value},
};

/// Kind tag driving copier dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Absent,
    Boolean,
    Number,
    Text,
    Table,
    Callable,
    Handle,
    /// Host-native kind with no copy strategy.
    Unsupported,
}

/// Execution strategy of a callable.
#[derive(Debug, Clone)]
pub enum CallableKind {
    /// Native function pointer, valid in both contexts.
    Foreign(ForeignFunction),
    /// Has a serializable bytecode body.
    Interpreted,
    /// Compiled form that cannot be dumped to bytes.
    NonSerializable,
}

/// Classifies a value into exactly one kind tag.
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Absent => ValueKind::Absent,
        Value::Boolean(_) => ValueKind::Boolean,
        Value::Number(_) => ValueKind::Number,
        Value::Text(_) => ValueKind::Text,
        Value::Table(_) => ValueKind::Table,
        Value::Closure(_) | Value::Foreign(_) | Value::Jit(_) => ValueKind::Callable,
        Value::Handle(_) => ValueKind::Handle,
        Value::Coroutine(_) => ValueKind::Unsupported,
    }
}

/// Sub-classifies a callable by execution strategy, using only the host
/// capability set.
///
/// The host dump primitive declines to dump a trace-compiled closure but
/// still reports success, so failure never shows up on the ordinary error
/// channel. A zero-write trial dump exposes the difference instead: the
/// probe sink aborts the dump with a sentinel on its first invocation, so
/// observing the sentinel means the body really serializes, while a clean
/// dump that never touched the sink means there is nothing to serialize.
pub fn classify_callable(ctx: &Context, value: &Value) -> CallableKind {
    if let Some(foreign) = ctx.foreign_function(value) {
        return CallableKind::Foreign(foreign);
    }

    let mut probe = ProbeSink;
    match ctx.dump_callable(value, &mut probe) {
        Err(reason) if reason == PROBE_SENTINEL => CallableKind::Interpreted,
        _ => CallableKind::NonSerializable,
    }
}

/// Human-readable strategy label for diagnostics.
pub fn callable_kind_label(kind: &CallableKind) -> &'static str {
    match kind {
        CallableKind::Foreign(_) => "foreign function",
        CallableKind::Interpreted => "interpreted function",
        CallableKind::NonSerializable => "compiled function",
    }
}

const PROBE_SENTINEL: &str = "crossheap.dump-probe";

/// Sink that performs no writes and aborts the dump with a sentinel the
/// first time it is invoked.
struct ProbeSink;

impl DumpSink for ProbeSink {
    fn write_chunk(&mut self, _chunk: &[u8]) -> Result<(), String> {
        Err(PROBE_SENTINEL.to_string())
    }
}
