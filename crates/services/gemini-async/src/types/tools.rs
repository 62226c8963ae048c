//! Function declarations offered to the model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tool entry in the request; Gemini groups function declarations under one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Declared functions the model may call
    pub function_declarations: Vec<FunctionDeclaration>,
}

impl Tool {
    /// Wraps a list of declarations
    #[must_use]
    pub const fn new(function_declarations: Vec<FunctionDeclaration>) -> Self {
        Self {
            function_declarations,
        }
    }
}

/// A function the model may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Function name
    pub name: String,
    /// What the function does; the model reads this to decide when to call it
    pub description: String,
    /// Schema of the function arguments
    pub parameters: Schema,
}

/// OpenAPI-subset type names used by Gemini schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    /// UTF-8 string
    String,
    /// Floating point number
    Number,
    /// Integer
    Integer,
    /// `true` / `false`
    Boolean,
    /// Ordered list
    Array,
    /// Key/value mapping
    Object,
}

/// Gemini parameter schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Value type
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required object properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Element schema for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Allowed string values
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl Schema {
    /// A schema of the given type with no further constraints
    #[must_use]
    pub const fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            required: None,
            items: None,
            enum_values: None,
        }
    }

    /// An empty object schema
    #[must_use]
    pub const fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an object property, optionally marking it required
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self, required: bool) -> Self {
        let name = name.into();
        if required {
            self.required.get_or_insert_with(Vec::new).push(name.clone());
        }
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(name, schema);
        self
    }

    /// Sets the array element schema
    #[must_use]
    pub fn with_items(mut self, items: Self) -> Self {
        self.items = Some(Box::new(items));
        self
    }
}
