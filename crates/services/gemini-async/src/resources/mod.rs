//! API resource implementations for the Gemini client

/// Raw `generateContent` resource
pub mod generate;
/// Typed query resource
pub mod typed;

pub use generate::GenerateContent;
pub use typed::TypedQuery;
