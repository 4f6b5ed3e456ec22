use std::{cell::RefCell, rc::Rc, sync::Arc};

use tracing::warn;

use crate::{
    replicate::{
        byte_buffer::ByteBuffer,
        classify::{CallableKind, ValueKind, callable_kind_label, classify, classify_callable},
        diagnostics::{CopyDiagnostic, CopyReport},
        error::ReplicateError,
        visited::VisitedTable,
    },
    runtime::{context::Context, handle::Handle, table::Table, value::Value},
};

/// Copies the top `n` values of the source context's stack onto the
/// destination context's stack, preserving stack order.
///
/// Aliases and cycles resolve within the batch: two source slots holding
/// one table produce two destination slots holding one replica. The source
/// stack is read-only throughout. Values that cannot be copied degrade to
/// absence in their slot and are reported in the returned [`CopyReport`];
/// only a capture-binding failure (or too shallow a source stack) aborts
/// the call.
pub fn replicate_top(
    src: &Context,
    dst: &mut Context,
    n: usize,
) -> Result<CopyReport, ReplicateError> {
    let depth = src.depth();
    if depth < n {
        return Err(ReplicateError::StackUnderflow {
            requested: n,
            depth,
        });
    }

    // Snapshot the batch bottom-up. Cloning shares the source Rcs, which is
    // fine: the copier reads through them and never mutates.
    let mut batch = Vec::with_capacity(n);
    for offset in (0..n).rev() {
        if let Some(value) = src.peek(offset) {
            batch.push(value.clone());
        }
    }

    let mut replicator = Replicator::new(src, dst);
    for (index, value) in batch.iter().enumerate() {
        replicator.index = index;
        let replica = replicator.copy_value(value)?;
        replicator.dst.push(replica);
    }

    Ok(CopyReport {
        pushed: n,
        diagnostics: replicator.diagnostics,
    })
}

/// One top-level replication call: the visited table lives exactly as long
/// as this struct.
struct Replicator<'a> {
    src: &'a Context,
    dst: &'a mut Context,
    visited: VisitedTable,
    diagnostics: Vec<CopyDiagnostic>,
    /// Batch position of the top-level value currently being copied.
    index: usize,
}

impl<'a> Replicator<'a> {
    fn new(src: &'a Context, dst: &'a mut Context) -> Self {
        Self {
            src,
            dst,
            visited: VisitedTable::new(),
            diagnostics: Vec::new(),
            index: 0,
        }
    }

    fn copy_value(&mut self, value: &Value) -> Result<Value, ReplicateError> {
        match value {
            Value::Absent => Ok(copy_absent()),
            Value::Boolean(v) => Ok(copy_boolean(*v)),
            Value::Number(v) => Ok(copy_number(*v)),
            Value::Text(v) => Ok(copy_text(v)),
            Value::Table(table) => Ok(Value::Table(self.copy_table(table)?)),
            Value::Closure(_) | Value::Foreign(_) | Value::Jit(_) => self.copy_callable(value),
            Value::Handle(handle) => self.copy_handle(handle),
            other => {
                debug_assert_eq!(classify(other), ValueKind::Unsupported);
                self.degrade(format!("cannot copy {} value", other.kind_label()));
                Ok(Value::Absent)
            }
        }
    }

    fn copy_table(
        &mut self,
        source: &Rc<RefCell<Table>>,
    ) -> Result<Rc<RefCell<Table>>, ReplicateError> {
        let identity = Rc::as_ptr(source) as usize;
        if let Some(Value::Table(replica)) = self.visited.lookup(identity) {
            return Ok(replica);
        }

        let replica = Rc::new(RefCell::new(Table::with_capacity(source.borrow().len())));
        // Record before descending so a self-reference resolves to the
        // still-incomplete replica instead of recursing forever.
        self.visited.record(identity, Value::Table(replica.clone()));

        {
            let guard = source.borrow();
            for (key, entry) in guard.pairs() {
                // Keys are keyable primitives; cloning reallocates text in
                // the destination heap.
                let copied = self.copy_value(entry)?;
                replica.borrow_mut().insert(key.clone(), copied);
            }
        }

        let descriptor = source.borrow().descriptor();
        if let Some(descriptor) = descriptor {
            let copied = self.copy_table(&descriptor)?;
            replica.borrow_mut().set_descriptor(copied);
        }

        Ok(replica)
    }

    fn copy_callable(&mut self, value: &Value) -> Result<Value, ReplicateError> {
        let Some(identity) = value.identity() else {
            return Ok(Value::Absent);
        };
        if let Some(replica) = self.visited.lookup(identity) {
            return Ok(replica);
        }

        match classify_callable(self.src, value) {
            CallableKind::Foreign(foreign) => {
                // Shared address space: the pointer itself is the copy.
                let replica = Value::Foreign(foreign);
                self.visited.record(identity, replica.clone());
                Ok(replica)
            }
            CallableKind::Interpreted => self.copy_interpreted(value, identity),
            kind @ CallableKind::NonSerializable => {
                self.degrade(format!(
                    "cannot copy {} (no serializable body)",
                    callable_kind_label(&kind)
                ));
                Ok(Value::Absent)
            }
        }
    }

    fn copy_interpreted(&mut self, value: &Value, identity: usize) -> Result<Value, ReplicateError> {
        let Value::Closure(source) = value else {
            return Ok(Value::Absent);
        };

        let mut buffer = ByteBuffer::new();
        if let Err(reason) = self.src.dump_callable(value, &mut buffer) {
            self.degrade(format!("cannot dump interpreted function: {}", reason));
            return Ok(Value::Absent);
        }

        let replica = match self.dst.load_closure(buffer.as_slice()) {
            Ok(replica) => replica,
            Err(reason) => {
                self.degrade(format!("cannot reload function body: {}", reason));
                return Ok(Value::Absent);
            }
        };

        let captured: Vec<Value> = {
            let guard = source.borrow();
            (0..guard.upvalue_count())
                .filter_map(|slot| guard.upvalue(slot).cloned())
                .collect()
        };

        for (slot, upvalue) in captured.iter().enumerate() {
            let bound = if upvalue.identity() == Some(identity) {
                // Self-capture: bind the in-progress replica rather than
                // recursing into the value we are still constructing.
                Value::Closure(replica.clone())
            } else {
                self.copy_value(upvalue)?
            };
            replica
                .borrow_mut()
                .bind_upvalue(slot, bound)
                .map_err(|reason| ReplicateError::CaptureBind {
                    index: self.index,
                    slot,
                    reason,
                })?;
        }

        let replica = Value::Closure(replica);
        self.visited.record(identity, replica.clone());
        Ok(replica)
    }

    fn copy_handle(&mut self, source: &Rc<Handle>) -> Result<Value, ReplicateError> {
        let identity = Rc::as_ptr(source) as usize;
        if let Some(replica) = self.visited.lookup(identity) {
            return Ok(replica);
        }

        if self.dst.resource_name(source.kind).is_none() {
            self.degrade(format!(
                "unknown external resource type {:?}",
                source.kind
            ));
            return Ok(Value::Absent);
        }

        // Sharing the resource is the refcount increment; the new handle
        // never exists without it.
        let resource = Arc::clone(&source.resource);

        let descriptor = match self.dst.cached_descriptor(source.kind) {
            Some(descriptor) => descriptor,
            None => {
                let copied = self.copy_table(&source.descriptor)?;
                self.dst.cache_descriptor(source.kind, copied.clone());
                copied
            }
        };

        let replica = Value::Handle(Rc::new(Handle::new(source.kind, resource, descriptor)));
        self.visited.record(identity, replica.clone());
        Ok(replica)
    }

    fn degrade(&mut self, detail: String) {
        warn!(index = self.index, "{}", detail);
        self.diagnostics.push(CopyDiagnostic::new(self.index, detail));
    }
}

fn copy_absent() -> Value {
    Value::Absent
}

fn copy_boolean(value: bool) -> Value {
    Value::Boolean(value)
}

fn copy_number(value: f64) -> Value {
    Value::Number(value)
}

/// Text is reallocated so the contexts never share backing storage.
fn copy_text(value: &str) -> Value {
    Value::Text(value.into())
}
