use std::fmt;

use arrow::datatypes::DataType;

/// A typed scalar carried by an assembled row or declared as an extra column.
///
/// This is the closed set of value kinds that can be stored in an ObsCore
/// table. Configuration values are converted into this type once, when the
/// schema is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Double precision float
    Float(f64),
    /// UTF-8 string
    Str(String),
}

impl ColumnValue {
    /// Arrow type used for a column whose type is inferred from this value.
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnValue::Bool(_) => DataType::Boolean,
            ColumnValue::Int(_) => DataType::Int64,
            ColumnValue::Float(_) => DataType::Float64,
            ColumnValue::Str(_) => DataType::Utf8,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnValue::Bool(_) => "bool",
            ColumnValue::Int(_) => "int",
            ColumnValue::Float(_) => "float",
            ColumnValue::Str(_) => "str",
        }
    }

    /// Convert a dynamically typed configuration value.
    ///
    /// Returns `None` for values without a column type mapping: nulls,
    /// arrays, tables and integers that do not fit into `i64`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(ColumnValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(ColumnValue::Int(i))
                } else if n.is_f64() {
                    n.as_f64().map(ColumnValue::Float)
                } else {
                    None
                }
            }
            serde_json::Value::String(s) => Some(ColumnValue::Str(s.clone())),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Bool(b) => write!(f, "{}", b),
            ColumnValue::Int(i) => write!(f, "{}", i),
            ColumnValue::Float(x) => write!(f, "{}", x),
            ColumnValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Bool(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Int(value)
    }
}

impl From<i8> for ColumnValue {
    fn from(value: i8) -> Self {
        ColumnValue::Int(i64::from(value))
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Float(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Str(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Str(value.to_string())
    }
}
