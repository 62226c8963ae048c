#![deny(clippy::all)]
#![deny(missing_docs)]

//! # `gemini-async`
//!
//! Async Gemini API client that returns typed values.
//!
//! The query is sent with five type directives declared as functions
//! (`customType_string`, `customType_number`, `customType_boolean`, `customType_array`,
//! `customType_object`). The model picks one to say which shape its answer has, and the
//! client returns that value as a [`TypedValue`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use gemini_async::{Client, TypedValue};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("my-api-key");
//!
//! match client.typed().run("Is 7 a prime number?").await? {
//!     TypedValue::Boolean(b) => println!("answer: {b}"),
//!     other => println!("untyped answer: {other}"),
//! }
//! # Ok(())
//! # }
//! ```

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Type directives and extension functions
pub mod directive;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Retry logic utilities
pub mod retry;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;

pub use crate::client::Client;
pub use crate::config::GeminiConfig;
pub use crate::directive::{Directive, ExtensionFunction};
pub use crate::error::{ApiErrorObject, GeminiError};
pub use crate::types::TypedValue;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, Directive, ExtensionFunction, GeminiConfig};
}
