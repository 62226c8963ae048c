//! Functions offered to the model: the built-in type directives and caller extensions.
//!
//! A type directive is a pseudo-function whose only purpose is to let the model say which
//! shape its answer has. Calling `customType_number` with `{"items": 42}` means "the
//! answer is the number 42". Extensions are real functions whose result is sent back to
//! the model so it can keep going.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::GeminiError;
use crate::types::{FunctionDeclaration, Schema, SchemaType, TypedValue};

/// Name prefix reserved for the built-in type directives
pub const DIRECTIVE_PREFIX: &str = "customType_";

/// Argument field holding the directive's value
pub const ITEMS_FIELD: &str = "items";

/// Built-in type directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `customType_string`
    String,
    /// `customType_number`
    Number,
    /// `customType_boolean`
    Boolean,
    /// `customType_array`
    Array,
    /// `customType_object`
    Object,
}

impl Directive {
    /// Every directive, in the order they are declared to the model
    pub const ALL: [Self; 5] = [
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Array,
        Self::Object,
    ];

    /// Function name sent to the model
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "customType_string",
            Self::Number => "customType_number",
            Self::Boolean => "customType_boolean",
            Self::Array => "customType_array",
            Self::Object => "customType_object",
        }
    }

    /// Description sent to the model, used for both the function and its `items` field
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::String => {
                "Output type is string type. When the output type is string type, this is used. No descriptions and explanations."
            }
            Self::Number => {
                "Output type is number type. When the output type is number type, this is used. No descriptions and explanations."
            }
            Self::Boolean => {
                "Output type is boolean type. When the output type is boolean type, this is used. No descriptions and explanations."
            }
            Self::Array => {
                "Output type is array type. When the output type is array type, this is used. No descriptions and explanations."
            }
            Self::Object => {
                "Output type is JSON object type. When the output type is object type, this is used. No descriptions and explanations."
            }
        }
    }

    /// Declared type of the `items` field
    #[must_use]
    pub const fn items_type(self) -> SchemaType {
        match self {
            Self::String => SchemaType::String,
            Self::Number => SchemaType::Number,
            Self::Boolean => SchemaType::Boolean,
            Self::Array => SchemaType::Array,
            Self::Object => SchemaType::Object,
        }
    }

    /// Parameter schema: an object with one required `items` field
    #[must_use]
    pub fn parameters(self) -> Schema {
        Schema::object().with_property(
            ITEMS_FIELD,
            Schema::of(self.items_type()).with_description(self.description()),
            true,
        )
    }

    /// Function declaration sent to the model
    #[must_use]
    pub fn declaration(self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }

    /// Looks up a directive by function name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Whether a function name falls in the reserved directive namespace
    #[must_use]
    pub fn is_reserved(name: &str) -> bool {
        name.starts_with(DIRECTIVE_PREFIX)
    }

    /// Extracts the answer from the arguments the model supplied
    ///
    /// Returns `items` as-is; the model's value is trusted even if it disagrees with the
    /// declared type. When `items` is missing or `null` the whole argument object is
    /// returned, and no arguments at all yields [`TypedValue::NoValues`].
    #[must_use]
    pub fn extract(self, args: Option<Map<String, Value>>) -> TypedValue {
        let Some(mut args) = args else {
            return TypedValue::NoValues;
        };
        if args.get(ITEMS_FIELD).is_some_and(|items| !items.is_null()) {
            if let Some(items) = args.remove(ITEMS_FIELD) {
                return TypedValue::from_json(items);
            }
        }
        TypedValue::Object(args)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handler invoked when the model calls an extension function
pub type FunctionHandler = Arc<dyn Fn(Option<&Map<String, Value>>) -> Value + Send + Sync>;

/// A caller-defined function the model may call alongside the type directives
///
/// Its result goes back to the model as a function-response turn, and the exchange
/// continues until a type directive fires or the model answers in text.
#[derive(Clone)]
pub struct ExtensionFunction {
    declaration: FunctionDeclaration,
    handler: FunctionHandler,
}

impl ExtensionFunction {
    /// Creates an extension function
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Config`] if the name is empty or uses the reserved
    /// `customType_` prefix.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Schema,
        handler: F,
    ) -> Result<Self, GeminiError>
    where
        F: Fn(Option<&Map<String, Value>>) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GeminiError::Config("Extension function name is empty".into()));
        }
        if Directive::is_reserved(&name) {
            return Err(GeminiError::Config(format!(
                "Extension function name `{name}` uses the reserved `{DIRECTIVE_PREFIX}` prefix"
            )));
        }
        Ok(Self {
            declaration: FunctionDeclaration {
                name,
                description: description.into(),
                parameters,
            },
            handler: Arc::new(handler),
        })
    }

    /// Function name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// Function declaration sent to the model
    #[must_use]
    pub const fn declaration(&self) -> &FunctionDeclaration {
        &self.declaration
    }

    /// Runs the handler
    #[must_use]
    pub fn call(&self, args: Option<&Map<String, Value>>) -> Value {
        (self.handler)(args)
    }
}

impl fmt::Debug for ExtensionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionFunction")
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

/// What a function name called by the model resolves to
#[derive(Debug)]
pub(crate) enum Dispatch<'a> {
    Directive(Directive),
    Extension(&'a ExtensionFunction),
}

pub(crate) fn resolve<'a>(
    name: &str,
    extensions: &'a [ExtensionFunction],
) -> Result<Dispatch<'a>, GeminiError> {
    if let Some(directive) = Directive::from_name(name) {
        return Ok(Dispatch::Directive(directive));
    }
    extensions
        .iter()
        .find(|ext| ext.name() == name)
        .map(Dispatch::Extension)
        .ok_or_else(|| GeminiError::UnknownFunction(name.to_string()))
}

/// Declarations for every built-in directive followed by the given extensions
#[must_use]
pub fn function_declarations(extensions: &[ExtensionFunction]) -> Vec<FunctionDeclaration> {
    Directive::ALL
        .into_iter()
        .map(Directive::declaration)
        .chain(extensions.iter().map(|ext| ext.declaration().clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(v: Value) -> Option<Map<String, Value>> {
        match v {
            Value::Object(m) => Some(m),
            _ => None,
        }
    }

    #[test]
    fn declarations_follow_fixed_order_and_schema() {
        let decls = function_declarations(&[]);
        let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "customType_string",
                "customType_number",
                "customType_boolean",
                "customType_array",
                "customType_object",
            ]
        );

        let v = serde_json::to_value(&decls[1]).unwrap();
        assert_eq!(v["parameters"]["type"], "OBJECT");
        assert_eq!(v["parameters"]["properties"]["items"]["type"], "NUMBER");
        assert_eq!(v["parameters"]["required"], json!(["items"]));
        assert_eq!(v["description"], v["parameters"]["properties"]["items"]["description"]);
    }

    #[test]
    fn extract_returns_items() {
        assert_eq!(
            Directive::Boolean.extract(args(json!({ "items": false }))),
            TypedValue::Boolean(false)
        );
        assert_eq!(
            Directive::String.extract(args(json!({ "items": "" }))),
            TypedValue::String(String::new())
        );
        assert_eq!(
            Directive::Number.extract(args(json!({ "items": 0 }))),
            TypedValue::from_json(json!(0))
        );
    }

    #[test]
    fn extract_without_items_returns_whole_args() {
        let v = Directive::Object.extract(args(json!({ "Tokyo": 1, "Osaka": 2 })));
        assert_eq!(v, TypedValue::from_json(json!({ "Tokyo": 1, "Osaka": 2 })));

        let v = Directive::Object.extract(args(json!({ "items": null, "x": 1 })));
        assert_eq!(v, TypedValue::from_json(json!({ "items": null, "x": 1 })));

        assert!(Directive::Array.extract(None).is_no_values());
    }

    #[test]
    fn extension_names_cannot_use_reserved_prefix() {
        let err = ExtensionFunction::new("customType_date", "d", Schema::object(), |_| Value::Null)
            .unwrap_err();
        assert!(matches!(err, GeminiError::Config(_)));
        assert!(ExtensionFunction::new(" ", "d", Schema::object(), |_| Value::Null).is_err());
    }

    #[test]
    fn resolve_prefers_directives_then_extensions() {
        let ext = ExtensionFunction::new("lookup", "d", Schema::object(), |_| json!(1)).unwrap();
        let exts = [ext];

        assert!(matches!(
            resolve("customType_array", &exts),
            Ok(Dispatch::Directive(Directive::Array))
        ));
        assert!(matches!(resolve("lookup", &exts), Ok(Dispatch::Extension(_))));
        assert!(matches!(
            resolve("customType_date", &exts),
            Err(GeminiError::UnknownFunction(name)) if name == "customType_date"
        ));
    }
}
