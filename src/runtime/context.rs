use std::{cell::RefCell, collections::HashMap, rc::Rc, sync::Arc};

use crate::{
    bytecode::{self, DumpSink},
    runtime::{
        closure::Closure,
        foreign_function::ForeignFunction,
        handle::{Handle, ResourceKind, SharedResource},
        table::Table,
        value::Value,
    },
};

/// Isolated execution context: a value stack plus the per-context host
/// state replication needs.
///
/// Two contexts never share heap storage. The only sanctioned crossover is
/// a [`SharedResource`] behind a handle, and foreign function pointers,
/// which are valid across contexts in one address space.
pub struct Context {
    stack: Vec<Value>,
    resource_registry: HashMap<ResourceKind, &'static str>,
    /// Per-type behavior descriptors. Persistent for the context's lifetime,
    /// unlike the per-call visited table.
    descriptor_cache: HashMap<ResourceKind, Rc<RefCell<Table>>>,
}

impl Context {
    /// Creates a context with an empty stack and no registered resource
    /// types. Hosts register the types they actually expose.
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            resource_registry: HashMap::new(),
            descriptor_cache: HashMap::new(),
        }
    }

    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the value `offset` slots below the top (0 is the top).
    pub fn peek(&self, offset: usize) -> Option<&Value> {
        let depth = self.stack.len();
        if offset >= depth {
            return None;
        }
        self.stack.get(depth - 1 - offset)
    }

    /// Resolves a callable to its native function pointer, if it has one.
    pub fn foreign_function(&self, value: &Value) -> Option<ForeignFunction> {
        match value {
            Value::Foreign(foreign) => Some(*foreign),
            _ => None,
        }
    }

    /// Dumps a callable's body through `sink`.
    ///
    /// A trace-compiled closure has no portable byte form; for those the
    /// dump reports success without ever invoking the sink. Callers that
    /// need to tell the cases apart probe for exactly that.
    pub fn dump_callable(&self, value: &Value, sink: &mut dyn DumpSink) -> Result<(), String> {
        match value {
            Value::Closure(closure) => bytecode::dump_function(&closure.borrow().function, sink),
            Value::Jit(_) => Ok(()),
            other => Err(format!("cannot dump a {} value", other.kind_label())),
        }
    }

    /// Rebuilds a closure in this context from a dumped byte form.
    ///
    /// Captured slots start absent; the caller binds them by position.
    pub fn load_closure(&self, bytes: &[u8]) -> Result<Rc<RefCell<Closure>>, String> {
        let function = bytecode::load_function(bytes)?;
        Ok(Rc::new(RefCell::new(Closure::new(function))))
    }

    /// Registers an external resource type this context knows how to host.
    pub fn register_resource(&mut self, kind: ResourceKind, name: &'static str) {
        self.resource_registry.insert(kind, name);
    }

    /// Canonical name of a registered resource type. `None` means the type
    /// is not in this context's allow-list.
    pub fn resource_name(&self, kind: ResourceKind) -> Option<&'static str> {
        self.resource_registry.get(&kind).copied()
    }

    pub fn cached_descriptor(&self, kind: ResourceKind) -> Option<Rc<RefCell<Table>>> {
        self.descriptor_cache.get(&kind).cloned()
    }

    pub fn cache_descriptor(&mut self, kind: ResourceKind, descriptor: Rc<RefCell<Table>>) {
        self.descriptor_cache.insert(kind, descriptor);
    }

    /// Wraps a shared resource in a new handle owned by this context,
    /// sharing one descriptor table per resource type.
    pub fn make_handle(&mut self, resource: Arc<SharedResource>) -> Rc<Handle> {
        let kind = resource.kind();
        let descriptor = self
            .descriptor_cache
            .entry(kind)
            .or_insert_with(|| Rc::new(RefCell::new(Table::new())))
            .clone();
        Rc::new(Handle::new(kind, resource, descriptor))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
