use std::fmt;

use crate::runtime::value::Value;

/// Key type for [`Table`](crate::runtime::table::Table) entries.
///
/// Only boolean, number, and text values may key a table. Numbers are keyed
/// by bit pattern so a table key survives a cross-context copy bit-exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Boolean(bool),
    /// `f64::to_bits` of the source number.
    Number(u64),
    Text(String),
}

impl TableKey {
    /// Converts a value into a table key if the value is a keyable kind.
    pub fn from_value(value: &Value) -> Option<TableKey> {
        match value {
            Value::Boolean(v) => Some(TableKey::Boolean(*v)),
            Value::Number(v) => Some(TableKey::Number(v.to_bits())),
            Value::Text(v) => Some(TableKey::Text(v.to_string())),
            _ => None,
        }
    }

    /// Rebuilds the key as a freshly allocated value.
    ///
    /// Text keys get a new allocation so the two contexts never share
    /// backing storage.
    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Boolean(v) => Value::Boolean(*v),
            TableKey::Number(bits) => Value::Number(f64::from_bits(*bits)),
            TableKey::Text(v) => Value::Text(v.as_str().into()),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Boolean(v) => write!(f, "{}", v),
            TableKey::Number(bits) => write!(f, "{}", f64::from_bits(*bits)),
            TableKey::Text(v) => write!(f, "\"{}\"", v),
        }
    }
}
