use crate::clients::ApiClient;
use crate::error::HarnessError;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(name = "Registering a user", skip_all)]
    pub async fn create_user<Body>(&self, payload: &Body) -> Result<reqwest::Response, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        Ok(self.api.post("/auth/register").json(payload).send().await?)
    }

    #[tracing::instrument(name = "Logging in", skip_all)]
    pub async fn login<Body>(&self, credentials: &Body) -> Result<reqwest::Response, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        Ok(self.api.post("/auth/login").json(credentials).send().await?)
    }
}
