//! Property values and keys.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A property key.
///
/// Cheap to clone; keys are shared between every element that uses them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyKey(Arc<str>);

impl PropertyKey {
    /// Creates a new property key.
    #[must_use]
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PropertyKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for PropertyKey {
    fn from(key: String) -> Self {
        Self(Arc::from(key))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Properties of a vertex, edge, or graph head, ordered by key.
pub type PropertyMap = BTreeMap<PropertyKey, Value>;

/// A property value.
///
/// Values are totally ordered: first by type (`Null < Bool < numbers <
/// String < List`), then by content. Integers and floats compare
/// numerically; when numerically equal the integer sorts first, so `Int64(1)`
/// and `Float64(1.0)` are distinct values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    String(Arc<str>),
    /// Ordered list of values.
    List(Arc<[Value]>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float, converting integers.
    #[must_use]
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true for integers and floats.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int64(_) | Self::Float64(_))
    }

    /// Returns the name of the value's type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Int64(_) => "INT64",
            Self::Float64(_) => "FLOAT64",
            Self::String(_) => "STRING",
            Self::List(_) => "LIST",
        }
    }

    /// Adds two numeric values.
    ///
    /// Two integers always give an integer: addition wraps on overflow, so
    /// partial sums can be combined in any order and the total is exact
    /// whenever it fits in an `i64`. Any float operand gives a float.
    /// Returns `None` if either operand is not numeric.
    #[must_use]
    pub fn add_numeric(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::Int64(a), Self::Int64(b)) => Some(Self::Int64(a.wrapping_add(*b))),
            _ if self.is_numeric() && other.is_numeric() => Some(Self::Float64(
                self.as_float64()? + other.as_float64()?,
            )),
            _ => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int64(_) | Self::Float64(_) => 2,
            Self::String(_) => 3,
            Self::List(_) => 4,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float64(a), Self::Float64(b)) => a.total_cmp(b),
            (Self::Int64(a), Self::Float64(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Self::Float64(a), Self::Int64(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.iter().cmp(b.iter()),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Self::Float64(v as f64), Self::Int64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(Arc::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("Alice").as_str(), Some("Alice"));
        assert_eq!(Value::from(30i64).as_int64(), Some(30));
        assert_eq!(Value::from(2i64).as_float64(), Some(2.0));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::from(None::<i64>).is_null());
    }

    #[test]
    fn test_value_total_order_across_types() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2.5),
            Value::Null,
            Value::from(3i64),
            Value::from(false),
            Value::from(1i64),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::from(false),
                Value::from(1i64),
                Value::from(2.5),
                Value::from(3i64),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn test_int_and_float_are_distinct_values() {
        assert_ne!(Value::from(1i64), Value::from(1.0));
        assert!(Value::from(1i64) < Value::from(1.0));
    }

    #[test]
    fn test_nan_equals_itself() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan, nan.clone());
    }

    #[test]
    fn test_add_numeric() {
        assert_eq!(
            Value::from(2i64).add_numeric(&Value::from(3i64)),
            Some(Value::from(5i64))
        );
        assert_eq!(
            Value::from(2i64).add_numeric(&Value::from(0.5)),
            Some(Value::from(2.5))
        );
        assert_eq!(Value::from("x").add_numeric(&Value::from(1i64)), None);
    }

    #[test]
    fn test_add_numeric_overflow_is_order_independent() {
        let (max, one, minus_one) = (Value::from(i64::MAX), Value::from(1i64), Value::from(-1i64));
        let left_first = max
            .add_numeric(&one)
            .and_then(|v| v.add_numeric(&minus_one));
        let right_first = one
            .add_numeric(&minus_one)
            .and_then(|v| max.add_numeric(&v));
        assert_eq!(left_first, Some(Value::from(i64::MAX)));
        assert_eq!(left_first, right_first);
    }

    #[test]
    fn test_property_key_borrow() {
        let mut props = PropertyMap::new();
        props.insert(PropertyKey::new("age"), Value::from(30i64));
        assert_eq!(props.get("age"), Some(&Value::from(30i64)));
    }

    #[test]
    fn test_value_serde_untagged() {
        let v: Value = serde_json::from_str(r#"[1, "a", null, true, 2.5]"#).unwrap();
        assert_eq!(
            v,
            Value::from(vec![
                Value::from(1i64),
                Value::from("a"),
                Value::Null,
                Value::from(true),
                Value::from(2.5),
            ])
        );
    }
}
