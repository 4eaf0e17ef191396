//! @ai:module:intent Define the records of the generated custom functions metadata document
//! @ai:module:layer domain
//! @ai:module:public_api MetadataDocument, FunctionRecord, ParameterRecord, ResultRecord, OptionsRecord, ValueType, Dimensionality
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::fmt;

/// @ai:intent The four value types a custom function can take or return
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
    #[default]
    Any,
}

/// @ai:intent Shape of a value: a single cell or a two-dimensional range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dimensionality {
    #[default]
    Scalar,
    Matrix,
}

/// @ai:intent Root of the persisted JSON document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MetadataDocument {
    pub functions: Vec<FunctionRecord>,
}

/// @ai:intent Metadata for one exposed function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub id: String,
    pub name: String,
    pub help_url: String,
    pub description: String,
    pub parameters: Vec<ParameterRecord>,
    pub result: ResultRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Dimensionality::is_scalar")]
    pub dimensionality: Dimensionality,
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResultRecord {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Dimensionality::is_scalar")]
    pub dimensionality: Dimensionality,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OptionsRecord {
    pub volatile: bool,
    pub cancelable: bool,
    pub stream: bool,
}

impl ValueType {
    /// @ai:intent Map a lowercase type name to a value type
    /// @ai:example ("number") -> Some(Number)
    /// @ai:example ("Number") -> None
    /// @ai:effects pure
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(ValueType::Number),
            "string" => Some(ValueType::String),
            "boolean" => Some(ValueType::Boolean),
            "any" => Some(ValueType::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Any => "any",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Dimensionality {
    pub fn is_scalar(&self) -> bool {
        *self == Dimensionality::Scalar
    }
}

impl ResultRecord {
    pub fn new(value_type: ValueType, dimensionality: Dimensionality) -> Self {
        Self {
            value_type,
            dimensionality,
        }
    }
}

impl OptionsRecord {
    /// @ai:intent Keep the options only when the function is volatile or streaming
    /// @ai:post cancelable alone never keeps the record
    /// @ai:effects pure
    pub fn retain(self) -> Option<Self> {
        (self.volatile || self.stream).then_some(self)
    }
}

impl FunctionRecord {
    /// @ai:intent Create a record whose invocation name is the uppercased id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_uppercase(),
            help_url: String::new(),
            description: String::new(),
            parameters: Vec::new(),
            result: ResultRecord::default(),
            options: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_function_record_serialization_shape() {
        let mut record = FunctionRecord::new("add");
        record.description = "Adds".to_string();
        record.parameters.push(ParameterRecord {
            name: "values".to_string(),
            description: None,
            value_type: ValueType::Number,
            dimensionality: Dimensionality::Matrix,
            optional: false,
        });
        record.result = ResultRecord::new(ValueType::Number, Dimensionality::Scalar);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": "add",
                "name": "ADD",
                "helpUrl": "",
                "description": "Adds",
                "parameters": [
                    {"name": "values", "type": "number", "dimensionality": "matrix", "optional": false}
                ],
                "result": {"type": "number"}
            })
        );
    }

    #[test]
    fn test_options_retained_only_when_volatile_or_stream() {
        let cancel_only = OptionsRecord {
            cancelable: true,
            ..Default::default()
        };
        assert_eq!(cancel_only.retain(), None);

        let streaming = OptionsRecord {
            stream: true,
            cancelable: true,
            ..Default::default()
        };
        assert_eq!(streaming.retain(), Some(streaming));
    }

    #[test]
    fn test_name_is_uppercase_id() {
        for id in ["add", "mixedCase2", "x_1y"] {
            assert_eq!(FunctionRecord::new(id).name, id.to_uppercase());
        }
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(ValueType::from_name("boolean"), Some(ValueType::Boolean));
        assert_eq!(ValueType::from_name("Boolean"), None);
        assert_eq!(ValueType::from_name("badtype"), None);
        assert_eq!(ValueType::Any.to_string(), "any");
    }
}
