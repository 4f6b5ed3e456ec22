use std::rc::Rc;

use crate::runtime::{compiled_function::CompiledFunction, value::Value};

/// Interpreted closure: a compiled body plus its captured-variable slots.
///
/// Slots are positional and fixed in number by the body's `num_upvalues`.
/// A closure may capture itself, which puts a back-edge into the value
/// graph; replication resolves that case by identity rather than recursion.
#[derive(Debug, Clone)]
pub struct Closure {
    pub function: Rc<CompiledFunction>,
    upvalues: Vec<Value>,
}

impl Closure {
    /// Creates a closure with every captured slot initially absent.
    pub fn new(function: Rc<CompiledFunction>) -> Self {
        let upvalues = vec![Value::Absent; function.num_upvalues];
        Self { function, upvalues }
    }

    /// Creates a closure over already-captured values.
    ///
    /// The capture count is the host compiler's responsibility and is not
    /// validated against the body here.
    pub fn with_captures(function: Rc<CompiledFunction>, upvalues: Vec<Value>) -> Self {
        Self { function, upvalues }
    }

    pub fn upvalue_count(&self) -> usize {
        self.upvalues.len()
    }

    /// Returns the captured value at `slot`, if the slot exists.
    pub fn upvalue(&self, slot: usize) -> Option<&Value> {
        self.upvalues.get(slot)
    }

    /// Binds `value` into captured slot `slot`.
    ///
    /// Fails when the slot is beyond the body's declared capture count,
    /// which indicates a body/capture layout mismatch.
    pub fn bind_upvalue(&mut self, slot: usize, value: Value) -> Result<(), String> {
        match self.upvalues.get_mut(slot) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => Err(format!(
                "no captured slot {} (function declares {})",
                slot,
                self.function.num_upvalues
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(num_upvalues: usize) -> Rc<CompiledFunction> {
        Rc::new(CompiledFunction::new(vec![0x01], vec![], 0, 0, num_upvalues))
    }

    #[test]
    fn test_new_closure_slots_start_absent() {
        let closure = Closure::new(body(2));
        assert_eq!(closure.upvalue_count(), 2);
        assert!(matches!(closure.upvalue(0), Some(Value::Absent)));
        assert!(matches!(closure.upvalue(1), Some(Value::Absent)));
        assert!(closure.upvalue(2).is_none());
    }

    #[test]
    fn test_bind_upvalue_in_range() {
        let mut closure = Closure::new(body(1));
        closure.bind_upvalue(0, Value::Number(7.0)).unwrap();
        assert!(matches!(closure.upvalue(0), Some(Value::Number(v)) if *v == 7.0));
    }

    #[test]
    fn test_bind_upvalue_out_of_range_fails() {
        let mut closure = Closure::new(body(1));
        let err = closure.bind_upvalue(1, Value::Absent).unwrap_err();
        assert!(err.contains("no captured slot 1"));
    }
}
