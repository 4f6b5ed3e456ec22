use std::rc::Rc;

use crate::bytecode::Instructions;

/// Constant-pool entry of a compiled function.
///
/// Only kinds with a portable byte form may appear in a pool, so a dumped
/// function body is self-contained and can be rebuilt in another context.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Number(f64),
    Text(String),
    Function(Rc<CompiledFunction>),
}

/// Serializable body of an interpreted closure.
///
/// Instructions are opaque to this crate; the host compiler produces them
/// and the host VM executes them. Replication only needs the body to be
/// self-contained: instructions plus constant pool plus frame layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub instructions: Instructions,
    pub constants: Vec<Constant>,
    pub num_locals: usize,
    pub num_parameters: usize,
    /// Number of captured-variable slots a closure over this body carries.
    pub num_upvalues: usize,
}

impl CompiledFunction {
    pub fn new(
        instructions: Instructions,
        constants: Vec<Constant>,
        num_locals: usize,
        num_parameters: usize,
        num_upvalues: usize,
    ) -> Self {
        Self {
            instructions,
            constants,
            num_locals,
            num_parameters,
            num_upvalues,
        }
    }
}
