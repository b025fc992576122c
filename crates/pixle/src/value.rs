//! Dynamically typed option values exchanged with the toolkit.

use crate::id::ItemId;
use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered option map, as passed to and returned by the toolkit.
pub type Options = IndexMap<String, Value>;

/// A single option value.
///
/// Truthiness follows the toolkit's convention: `None`, `false`, zero,
/// empty strings, empty lists and [`ItemId::NONE`] are falsy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Id(ItemId),
    List(Vec<Value>),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Id(id) => !id.is_none(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Interpret the value as an item handle.
    ///
    /// Returns `Some(None)` for the falsy values the toolkit uses to mean
    /// "no item", and `None` when the value cannot name an item at all.
    pub fn as_item_id(&self) -> Option<Option<ItemId>> {
        match self {
            Value::None => Some(None),
            Value::Id(id) if id.is_none() => Some(None),
            Value::Id(id) => Some(Some(*id)),
            Value::Int(0) => Some(None),
            Value::Int(i) if *i > 0 => Some(Some(ItemId::from_raw(*i as u64))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Id(id) => write!(f, "{}", id),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ItemId> for Value {
    fn from(id: ItemId) -> Self {
        Value::Id(id)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<[f32; 2]> for Value {
    fn from([x, y]: [f32; 2]) -> Self {
        Value::List(vec![Value::from(x), Value::from(y)])
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}
