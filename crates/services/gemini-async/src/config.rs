use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default Gemini API base URL
pub const GEMINI_DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com";
/// Default API version segment
pub const GEMINI_DEFAULT_VERSION: &str = "v1beta";
/// Default model path
pub const GEMINI_DEFAULT_MODEL: &str = "models/gemini-1.5-pro-latest";
/// Query parameter carrying the API key
pub const QUERY_API_KEY: &str = "key";

/// Configuration for the Gemini client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    api_base: String,
    api_version: String,
    model: String,
    api_key: Option<SecretString>,
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: env_non_empty("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_DEFAULT_BASE.into()),
            api_version: GEMINI_DEFAULT_VERSION.into(),
            model: env_non_empty("GEMINI_MODEL").unwrap_or_else(|| GEMINI_DEFAULT_MODEL.into()),
            api_key: env_non_empty("GEMINI_API_KEY").map(SecretString::from),
        }
    }
}

impl GeminiConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `GEMINI_API_KEY` for the API key
    /// - `GEMINI_BASE_URL` for a custom API base URL
    /// - `GEMINI_MODEL` for a custom model path (e.g. `models/gemini-pro`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for the fixed default endpoint without reading the
    /// environment; no API key is set
    #[must_use]
    pub fn from_defaults() -> Self {
        Self {
            api_base: GEMINI_DEFAULT_BASE.into(),
            api_version: GEMINI_DEFAULT_VERSION.into(),
            model: GEMINI_DEFAULT_MODEL.into(),
            api_key: None,
        }
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API version segment
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the model path
    ///
    /// A bare model name such as `gemini-pro` is prefixed with `models/`.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = if model.starts_with("models/") {
            model
        } else {
            format!("models/{model}")
        };
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured API version
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the configured model path
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Configuration trait for the Gemini client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::GeminiError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Path of the `generateContent` method for the configured model
    fn generate_content_path(&self) -> String;

    /// Returns query parameters to include in requests
    fn query(&self) -> Vec<(&str, &str)>;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::GeminiError>;
}

impl Config for GeminiConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::GeminiError> {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn generate_content_path(&self) -> String {
        format!(
            "/{}/{}:generateContent",
            self.api_version.trim_matches('/'),
            self.model.trim_matches('/')
        )
    }

    fn query(&self) -> Vec<(&str, &str)> {
        match &self.api_key {
            Some(secret) => vec![(QUERY_API_KEY, secret.expose_secret().trim())],
            None => vec![],
        }
    }

    fn validate_auth(&self) -> Result<(), crate::error::GeminiError> {
        match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::GeminiError::Config(
                "Missing Gemini credentials: set GEMINI_API_KEY environment variable".into(),
            )),
        }
    }
}
