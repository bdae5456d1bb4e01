use crate::clients::ApiClient;
use crate::error::HarnessError;

#[derive(Clone, Debug)]
pub struct HealthClient {
    api: ApiClient,
}

impl HealthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /health`, served from the service root rather than the API prefix.
    #[tracing::instrument(name = "Checking API health", skip_all)]
    pub async fn check(&self) -> Result<reqwest::Response, HarnessError> {
        Ok(self.api.get_service("/health").send().await?)
    }
}
