//! Algorithm parameters.

use std::collections::BTreeMap;

use graphset_common::types::Value;
use graphset_common::utils::error::{Error, Result};

/// The type a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Float. Integers are accepted too.
    Float,
    /// String.
    String,
    /// Any value.
    Any,
}

impl ParameterType {
    /// Returns true if `value` has this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Int => matches!(value, Value::Int64(_)),
            Self::Float => value.is_numeric(),
            Self::String => matches!(value, Value::String(_)),
            Self::Any => true,
        }
    }
}

/// Declaration of one algorithm parameter.
#[derive(Debug, Clone)]
pub struct ParameterDef {
    /// Parameter name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Expected type.
    pub param_type: ParameterType,
    /// Whether the caller must supply it.
    pub required: bool,
    /// Value used when the caller leaves it out.
    pub default: Option<Value>,
}

impl ParameterDef {
    /// Declares a required parameter.
    pub fn required(name: &str, param_type: ParameterType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type,
            required: true,
            default: None,
        }
    }

    /// Declares an optional parameter with a default.
    pub fn optional(
        name: &str,
        param_type: ParameterType,
        default: impl Into<Value>,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type,
            required: false,
            default: Some(default.into()),
        }
    }
}

/// Named parameter values passed to an algorithm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Gets a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Gets a string parameter.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Gets an integer parameter.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int64)
    }

    /// Gets a float parameter, converting integers.
    #[must_use]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float64)
    }

    /// Gets a boolean parameter.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Checks the parameters against declarations and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for unknown names, missing
    /// required parameters, and values of the wrong type.
    pub fn resolve(&self, defs: &[ParameterDef]) -> Result<Self> {
        if let Some(unknown) = self
            .values
            .keys()
            .find(|name| !defs.iter().any(|d| &d.name == *name))
        {
            return Err(Error::invalid_argument(format!(
                "unknown parameter '{unknown}'"
            )));
        }

        let mut resolved = self.clone();
        for def in defs {
            match self.values.get(&def.name) {
                Some(value) if !def.param_type.accepts(value) => {
                    return Err(Error::invalid_argument(format!(
                        "parameter '{}' expects {:?}, got {}",
                        def.name,
                        def.param_type,
                        value.type_name()
                    )));
                }
                Some(_) => {}
                None if def.required => {
                    return Err(Error::invalid_argument(format!(
                        "missing required parameter '{}'",
                        def.name
                    )));
                }
                None => {
                    if let Some(default) = &def.default {
                        resolved.set(def.name.clone(), default.clone());
                    }
                }
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<ParameterDef> {
        vec![
            ParameterDef::required("label", ParameterType::String, "Label to keep"),
            ParameterDef::optional("limit", ParameterType::Int, 10i64, "Maximum"),
        ]
    }

    #[test]
    fn test_getters() {
        let params = Parameters::new()
            .with("label", "Person")
            .with("limit", 3i64)
            .with("damping", 0.85)
            .with("directed", true);

        assert_eq!(params.get_str("label"), Some("Person"));
        assert_eq!(params.get_int("limit"), Some(3));
        assert_eq!(params.get_float("limit"), Some(3.0));
        assert_eq!(params.get_float("damping"), Some(0.85));
        assert_eq!(params.get_bool("directed"), Some(true));
        assert_eq!(params.get_str("missing"), None);
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let resolved = Parameters::new()
            .with("label", "Person")
            .resolve(&defs())
            .unwrap();
        assert_eq!(resolved.get_int("limit"), Some(10));
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        let missing = Parameters::new().resolve(&defs());
        assert!(matches!(missing, Err(Error::InvalidArgument(m)) if m.contains("missing")));

        let mistyped = Parameters::new().with("label", 3i64).resolve(&defs());
        assert!(matches!(mistyped, Err(Error::InvalidArgument(m)) if m.contains("expects")));

        let unknown = Parameters::new()
            .with("label", "Person")
            .with("colour", "red")
            .resolve(&defs());
        assert!(matches!(unknown, Err(Error::InvalidArgument(m)) if m.contains("unknown")));
    }
}
