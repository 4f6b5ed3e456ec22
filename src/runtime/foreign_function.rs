use std::fmt;

use crate::runtime::ForeignFn;

/// Natively-compiled callable referenced by function pointer.
///
/// Source and destination contexts share one address space for foreign
/// code, so a copy is the same pointer in a fresh value slot.
#[derive(Clone, Copy)]
pub struct ForeignFunction {
    pub name: &'static str,
    pub func: ForeignFn,
}

impl fmt::Debug for ForeignFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignFunction({})", self.name)
    }
}

impl PartialEq for ForeignFunction {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.func, other.func)
    }
}
