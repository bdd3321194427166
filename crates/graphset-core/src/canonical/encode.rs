//! Injective string encodings of labels and property values.
//!
//! Strings are length-prefixed so that no two distinct inputs concatenate to
//! the same output.

use std::fmt::Write;

use graphset_common::types::{PropertyMap, Value};

pub(super) fn push_str(out: &mut String, s: &str) {
    let _ = write!(out, "{}:{s}", s.len());
}

pub(super) fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push('n'),
        Value::Bool(b) => out.push_str(if *b { "b1" } else { "b0" }),
        Value::Int64(i) => {
            let _ = write!(out, "i{i};");
        }
        Value::Float64(f) => {
            let _ = write!(out, "f{:016x}", f.to_bits());
        }
        Value::String(s) => {
            out.push('s');
            push_str(out, s);
        }
        Value::List(items) => {
            let _ = write!(out, "l{}[", items.len());
            for item in items.iter() {
                push_value(out, item);
            }
            out.push(']');
        }
    }
}

pub(super) fn push_properties(out: &mut String, properties: &PropertyMap) {
    let _ = write!(out, "{{{}", properties.len());
    for (key, value) in properties {
        out.push(',');
        push_str(out, key.as_str());
        out.push('=');
        push_value(out, value);
    }
    out.push('}');
}

/// Encodes a label and its properties.
pub(super) fn element(label: &str, properties: &PropertyMap) -> String {
    let mut out = String::new();
    push_str(&mut out, label);
    push_properties(&mut out, properties);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphset_common::types::PropertyKey;

    fn props(pairs: &[(&str, Value)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (PropertyKey::from(*k), v.clone()))
            .collect()
    }

    #[test]
    fn test_length_prefix_separates_labels() {
        let empty = PropertyMap::new();
        assert_ne!(element("ab", &empty), element("a", &props(&[("b", Value::Null)])));
        assert_eq!(element("Person", &empty), "6:Person{0}");
    }

    #[test]
    fn test_values_are_typed() {
        let as_int = element("x", &props(&[("k", Value::Int64(1))]));
        let as_float = element("x", &props(&[("k", Value::Float64(1.0))]));
        let as_string = element("x", &props(&[("k", Value::from("1"))]));
        assert_ne!(as_int, as_float);
        assert_ne!(as_int, as_string);
        assert_ne!(as_float, as_string);
    }

    #[test]
    fn test_property_order_is_by_key() {
        let a = props(&[("b", Value::Int64(2)), ("a", Value::Int64(1))]);
        let b = props(&[("a", Value::Int64(1)), ("b", Value::Int64(2))]);
        assert_eq!(element("x", &a), element("x", &b));
    }

    #[test]
    fn test_nested_lists() {
        let nested = Value::from(vec![Value::from(vec![Value::Int64(1)]), Value::Null]);
        let flat = Value::from(vec![Value::Int64(1), Value::Null]);
        let mut a = String::new();
        let mut b = String::new();
        push_value(&mut a, &nested);
        push_value(&mut b, &flat);
        assert_ne!(a, b);
    }
}
