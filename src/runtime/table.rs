use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::runtime::{table_key::TableKey, value::Value};

/// Associative container mapping keyable values to values.
///
/// A table may carry an attached behavior descriptor: another table that
/// supplies shared behavior the way a class descriptor is attached to
/// instances. The descriptor is part of the table for copying purposes and
/// travels with it through replication.
#[derive(Debug, Default)]
pub struct Table {
    entries: HashMap<TableKey, Value>,
    descriptor: Option<Rc<RefCell<Table>>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            descriptor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: TableKey, value: Value) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &TableKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterates entries in unspecified order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TableKey, &Value)> {
        self.entries.iter()
    }

    pub fn descriptor(&self) -> Option<Rc<RefCell<Table>>> {
        self.descriptor.clone()
    }

    pub fn set_descriptor(&mut self, descriptor: Rc<RefCell<Table>>) {
        self.descriptor = Some(descriptor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = Table::new();
        table.insert(TableKey::Text("a".to_string()), Value::Number(1.0));
        match table.get(&TableKey::Text("a".to_string())) {
            Some(Value::Number(v)) => assert_eq!(*v, 1.0),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(table.len(), 1);
        assert!(table.get(&TableKey::Boolean(true)).is_none());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut table = Table::new();
        table.insert(TableKey::Number(1.0f64.to_bits()), Value::Text("x".into()));
        table.insert(TableKey::Number(1.0f64.to_bits()), Value::Text("y".into()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_descriptor_attach() {
        let mut table = Table::new();
        assert!(table.descriptor().is_none());

        let descriptor = Rc::new(RefCell::new(Table::new()));
        table.set_descriptor(descriptor.clone());
        assert!(Rc::ptr_eq(&table.descriptor().unwrap(), &descriptor));
    }
}
