//! Request and response types for the Gemini `generateContent` API

/// Conversation content types (turns and parts)
pub mod content;
/// `generateContent` request/response envelopes
pub mod generate;
/// Function declaration and schema types
pub mod tools;
/// Typed results produced by a typed query
pub mod value;

pub use content::{Content, FunctionCall, FunctionResponse, FunctionResponseBody, Part, Role};
pub use generate::{Candidate, FinishReason, GenerateContentRequest, GenerateContentResponse};
pub use tools::{FunctionDeclaration, Schema, SchemaType, Tool};
pub use value::{NO_VALUES, TypedValue};
