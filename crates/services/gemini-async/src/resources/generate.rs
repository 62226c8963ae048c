use crate::{
    client::Client,
    config::Config,
    error::GeminiError,
    types::generate::{GenerateContentRequest, GenerateContentResponse},
};

/// API resource for the `generateContent` method of the configured model
pub struct GenerateContent<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> GenerateContent<'c, C> {
    /// Creates a new `GenerateContent` resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Sends one `generateContent` request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with any status other
    /// than 200.
    pub async fn create(
        &self,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let path = self.client.config().generate_content_path();
        self.client.post(&path, req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the `GenerateContent` API resource
    #[must_use]
    pub const fn generate_content(&self) -> GenerateContent<'_, C> {
        GenerateContent::new(self)
    }
}
