//! Property aggregates.

use graphset_common::types::{PropertyKey, Value};

use super::AggregateFunction;
use crate::graph::model::ElementRef;

/// Which elements a property aggregate reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementScope {
    /// Vertices only.
    Vertices,
    /// Edges only.
    Edges,
    /// Vertices and edges.
    #[default]
    All,
}

impl ElementScope {
    /// Returns true if the element is in scope.
    #[must_use]
    pub fn includes(self, element: ElementRef<'_>) -> bool {
        match self {
            Self::Vertices => element.is_vertex(),
            Self::Edges => !element.is_vertex(),
            Self::All => true,
        }
    }
}

/// Reads the property value an in-scope element carries, ignoring `NULL`.
fn read<'a>(scope: ElementScope, key: &PropertyKey, element: ElementRef<'a>) -> Option<&'a Value> {
    if !scope.includes(element) {
        return None;
    }
    element.get_property(key.as_str()).filter(|v| !v.is_null())
}

macro_rules! property_aggregate {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            key: PropertyKey,
            scope: ElementScope,
        }

        impl $name {
            /// Creates the aggregate over vertices and edges.
            pub fn new(key: impl Into<PropertyKey>) -> Self {
                Self {
                    key: key.into(),
                    scope: ElementScope::All,
                }
            }

            /// Restricts the aggregate to some elements.
            #[must_use]
            pub fn with_scope(mut self, scope: ElementScope) -> Self {
                self.scope = scope;
                self
            }

            /// Returns the aggregated property key.
            #[must_use]
            pub fn key(&self) -> &PropertyKey {
                &self.key
            }
        }

        impl $name {
            fn default_result_key(&self) -> PropertyKey {
                PropertyKey::new(format!(concat!($prefix, "_{}"), self.key))
            }
        }
    };
}

property_aggregate!(
    /// Largest value of a property. `NULL` if no element carries it.
    MaxProperty,
    "max"
);

property_aggregate!(
    /// Smallest value of a property. `NULL` if no element carries it.
    MinProperty,
    "min"
);

property_aggregate!(
    /// Sum of a numeric property. `NULL` if no element carries a number.
    SumProperty,
    "sum"
);

property_aggregate!(
    /// Number of elements that carry a property.
    CountProperty,
    "count"
);

impl AggregateFunction for MaxProperty {
    fn result_key(&self) -> PropertyKey {
        self.default_result_key()
    }

    fn identity(&self) -> Value {
        Value::Null
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        read(self.scope, &self.key, element).cloned().unwrap_or_default()
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        match (left.is_null(), right.is_null()) {
            (true, _) => right,
            (_, true) => left,
            _ => left.max(right),
        }
    }
}

impl AggregateFunction for MinProperty {
    fn result_key(&self) -> PropertyKey {
        self.default_result_key()
    }

    fn identity(&self) -> Value {
        Value::Null
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        read(self.scope, &self.key, element).cloned().unwrap_or_default()
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        match (left.is_null(), right.is_null()) {
            (true, _) => right,
            (_, true) => left,
            _ => left.min(right),
        }
    }
}

impl AggregateFunction for SumProperty {
    fn result_key(&self) -> PropertyKey {
        self.default_result_key()
    }

    fn identity(&self) -> Value {
        Value::Null
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        read(self.scope, &self.key, element)
            .filter(|v| v.is_numeric())
            .cloned()
            .unwrap_or_default()
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        match (left.is_null(), right.is_null()) {
            (true, _) => right,
            (_, true) => left,
            _ => left.add_numeric(&right).unwrap_or(left),
        }
    }
}

impl AggregateFunction for CountProperty {
    fn result_key(&self) -> PropertyKey {
        self.default_result_key()
    }

    fn identity(&self) -> Value {
        Value::Int64(0)
    }

    fn contribution(&self, element: ElementRef<'_>) -> Value {
        Value::Int64(i64::from(read(self.scope, &self.key, element).is_some()))
    }

    fn combine(&self, left: Value, right: Value) -> Value {
        left.add_numeric(&right).unwrap_or(left)
    }
}
