use std::{cell::RefCell, fmt, rc::Rc, sync::Arc};

use crate::runtime::{
    closure::Closure, coroutine::Coroutine, foreign_function::ForeignFunction, handle::Handle,
    jit_closure::JitClosure, table::Table,
};

/// Runtime value held by a context's stack, table slots, and closure captures.
///
/// Heap-backed variants use `Rc` for cheap sharing *within* one context.
/// Replication never clones those `Rc`s across contexts (except for
/// [`Handle`]s, which deliberately share their resource): the copier
/// rebuilds every table, closure, and text allocation in the destination
/// heap so the two contexts stay structurally independent.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value.
    Absent,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit floating point number.
    Number(f64),
    /// UTF-8 text value.
    Text(Rc<str>),
    /// Associative container, possibly carrying a behavior descriptor.
    Table(Rc<RefCell<Table>>),
    /// Interpreted closure with a serializable body.
    Closure(Rc<RefCell<Closure>>),
    /// Natively-compiled function referenced by pointer.
    Foreign(ForeignFunction),
    /// JIT-compiled closure whose native form cannot be dumped.
    Jit(Rc<JitClosure>),
    /// Reference-counted external resource handle.
    Handle(Rc<Handle>),
    /// Suspended coroutine state. Not replicable.
    Coroutine(Rc<RefCell<Coroutine>>),
}

impl Value {
    /// Returns the canonical kind label used in diagnostics.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Value::Absent => "Absent",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Table(_) => "Table",
            Value::Closure(_) => "Closure",
            Value::Foreign(_) => "Foreign",
            Value::Jit(_) => "Jit",
            Value::Handle(_) => "Handle",
            Value::Coroutine(_) => "Coroutine",
        }
    }

    /// Returns this value's identity: the storage address of its payload in
    /// the owning context.
    ///
    /// Identity is defined only for tables, callables, and handles; the
    /// other kinds copy by value and never alias.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Table(table) => Some(Rc::as_ptr(table) as usize),
            Value::Closure(closure) => Some(Rc::as_ptr(closure) as usize),
            Value::Foreign(foreign) => Some(foreign.func as usize),
            Value::Jit(jit) => Some(Rc::as_ptr(jit) as usize),
            Value::Handle(handle) => Some(Rc::as_ptr(handle) as usize),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "absent"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "\"{}\"", v),
            Value::Table(table) => write!(f, "<table {:p}>", Rc::as_ptr(table)),
            Value::Closure(closure) => write!(f, "<closure {:p}>", Rc::as_ptr(closure)),
            Value::Foreign(foreign) => write!(f, "<foreign {}>", foreign.name),
            Value::Jit(jit) => write!(f, "<jit closure {:p}>", Rc::as_ptr(jit)),
            Value::Handle(handle) => {
                write!(f, "<handle {:p}>", Arc::as_ptr(&handle.resource))
            }
            Value::Coroutine(co) => write!(f, "<coroutine {:p}>", Rc::as_ptr(co)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(Value::Absent.kind_label(), "Absent");
        assert_eq!(Value::Boolean(true).kind_label(), "Boolean");
        assert_eq!(Value::Number(1.0).kind_label(), "Number");
        assert_eq!(Value::Text("x".into()).kind_label(), "Text");
        assert_eq!(
            Value::Table(Rc::new(RefCell::new(Table::new()))).kind_label(),
            "Table"
        );
    }

    #[test]
    fn test_primitives_have_no_identity() {
        assert_eq!(Value::Absent.identity(), None);
        assert_eq!(Value::Boolean(false).identity(), None);
        assert_eq!(Value::Number(0.5).identity(), None);
        assert_eq!(Value::Text("x".into()).identity(), None);
    }

    #[test]
    fn test_table_identity_follows_allocation() {
        let table = Rc::new(RefCell::new(Table::new()));
        let a = Value::Table(table.clone());
        let b = Value::Table(table.clone());
        assert_eq!(a.identity(), b.identity());

        let other = Value::Table(Rc::new(RefCell::new(Table::new())));
        assert_ne!(a.identity(), other.identity());
    }
}
