use std::collections::HashMap;

use crate::runtime::value::Value;

/// Per-call map from a source value's identity to its destination replica.
///
/// Created fresh for every top-level replication call and discarded with
/// it, so aliases and cycles resolve within one batch but a later batch
/// always produces fresh replicas.
///
/// A recursive copier must record a container replica here *before*
/// descending into its entries; a self-reference then resolves to the
/// in-progress replica instead of recursing forever.
#[derive(Debug, Default)]
pub struct VisitedTable {
    replicas: HashMap<usize, Value>,
}

impl VisitedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, identity: usize) -> Option<Value> {
        self.replicas.get(&identity).cloned()
    }

    pub fn record(&mut self, identity: usize, replica: Value) {
        self.replicas.insert(identity, replica);
    }
}
