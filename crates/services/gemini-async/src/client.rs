use backon::ExponentialBuilder;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::{Config, GeminiConfig},
    directive::ExtensionFunction,
    error::GeminiError,
    retry,
};

/// Gemini API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: ExponentialBuilder,
    retry_budget: u32,
    extensions: Vec<ExtensionFunction>,
}

impl Client<GeminiConfig> {
    /// Creates a client for the fixed default endpoint authenticated with `api_key`
    ///
    /// The environment is not consulted; use [`Client::default`] for env-driven setup.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(GeminiConfig::from_defaults().with_api_key(api_key))
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("reqwest client"),
            config,
            backoff: retry::default_backoff_builder(),
            retry_budget: retry::DEFAULT_RETRY_BUDGET,
            extensions: Vec::new(),
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the backoff used between retried attempts
    #[must_use]
    pub const fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets how many HTTP attempts one typed query may make
    #[must_use]
    pub const fn with_retry_budget(mut self, budget: u32) -> Self {
        self.retry_budget = budget;
        self
    }

    /// Registers a function the model may call besides the type directives
    #[must_use]
    pub fn with_extension(mut self, extension: ExtensionFunction) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) const fn backoff(&self) -> ExponentialBuilder {
        self.backoff
    }

    pub(crate) const fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    pub(crate) fn extensions(&self) -> &[ExtensionFunction] {
        &self.extensions
    }

    /// Sends one POST; never retries
    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, GeminiError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let request = self
            .http
            .post(self.config.url(path))
            .headers(self.config.headers()?)
            .query(&self.config.query())
            .json(body)
            .build()?;

        let bytes = self.execute_raw(request).await?;
        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }

    async fn execute_raw(&self, request: reqwest::Request) -> Result<bytes::Bytes, GeminiError> {
        let response = self
            .http
            .execute(request)
            .await
            .map_err(GeminiError::Reqwest)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(GeminiError::Reqwest)?;

        if status == StatusCode::OK {
            return Ok(bytes);
        }

        Err(crate::error::deserialize_api_error(status, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GEMINI_DEFAULT_BASE, GEMINI_DEFAULT_MODEL};
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn new_targets_fixed_endpoint_regardless_of_env() {
        let _base = EnvGuard::set("GEMINI_BASE_URL", "https://elsewhere.example.com");
        let _model = EnvGuard::set("GEMINI_MODEL", "models/gemini-pro");

        let client = Client::new("k");
        assert_eq!(client.config().api_base(), GEMINI_DEFAULT_BASE);
        assert_eq!(client.config().model(), GEMINI_DEFAULT_MODEL);
        assert!(client.config().validate_auth().is_ok());
    }

    #[test]
    #[serial(env)]
    fn default_reads_env() {
        let _key = EnvGuard::set("GEMINI_API_KEY", "env-key");
        let _base = EnvGuard::set("GEMINI_BASE_URL", "https://elsewhere.example.com");

        let client: Client<GeminiConfig> = Client::default();
        assert_eq!(client.config().api_base(), "https://elsewhere.example.com");
    }
}
