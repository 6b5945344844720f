//! Conversion of command-line strings into YAML values

use crate::error::{FieldPathError, Result};
use serde_yaml::Value;
use std::fmt;

/// Supported value types for type conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Array,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// Parse `s` into a YAML value, auto-detecting the type without a hint.
pub fn parse_value(s: &str, type_hint: Option<ValueType>) -> Result<Value> {
    let trimmed = s.trim();

    match type_hint {
        Some(ValueType::String) => Ok(Value::String(s.to_string())),
        Some(ValueType::Int) => {
            let i = trimmed
                .parse::<i64>()
                .map_err(|_| FieldPathError::type_conversion(s, ValueType::Int.to_string()))?;
            Ok(Value::Number(i.into()))
        }
        Some(ValueType::Float) => {
            let f = trimmed
                .parse::<f64>()
                .map_err(|_| FieldPathError::type_conversion(s, ValueType::Float.to_string()))?;
            Ok(Value::Number(serde_yaml::Number::from(f)))
        }
        Some(ValueType::Bool) => {
            let b = match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => true,
                "false" | "no" | "off" | "0" => false,
                _ => return Err(FieldPathError::type_conversion(s, ValueType::Bool.to_string())),
            };
            Ok(Value::Bool(b))
        }
        Some(ValueType::Array) => {
            // flow sequences pass through, anything else is comma separated
            if trimmed.starts_with('[') {
                let parsed: Value = serde_yaml::from_str(trimmed)?;
                if parsed.is_sequence() {
                    return Ok(parsed);
                }
            }
            let values = s
                .split(',')
                .map(|part| parse_value(part.trim(), None))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Sequence(values))
        }
        Some(ValueType::Object) => {
            let parsed: Value = serde_yaml::from_str(s)?;
            if !parsed.is_mapping() {
                return Err(FieldPathError::type_conversion(s, ValueType::Object.to_string()));
            }
            Ok(parsed)
        }
        None => {
            if let Ok(i) = trimmed.parse::<i64>() {
                Ok(Value::Number(i.into()))
            } else if let Ok(f) = trimmed.parse::<f64>() {
                Ok(Value::Number(serde_yaml::Number::from(f)))
            } else if let Ok(b) = trimmed.parse::<bool>() {
                Ok(Value::Bool(b))
            } else if trimmed == "null" || trimmed == "~" {
                Ok(Value::Null)
            } else {
                Ok(Value::String(s.to_string()))
            }
        }
    }
}
