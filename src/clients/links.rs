use crate::clients::responses::{Envelope, LinkData};
use crate::clients::{ApiClient, parse_json, with_bearer};
use crate::error::HarnessError;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct LinksClient {
    api: ApiClient,
}

impl LinksClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(name = "Creating a link", skip_all)]
    pub async fn create_link<Body>(
        &self,
        payload: &Body,
        token: &str,
    ) -> Result<reqwest::Response, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        let request = self.api.post("/links").json(payload);
        Ok(with_bearer(request, token).send().await?)
    }

    #[tracing::instrument(name = "Listing links", skip_all)]
    pub async fn get_links(&self, token: &str) -> Result<reqwest::Response, HarnessError> {
        Ok(with_bearer(self.api.get("/links"), token).send().await?)
    }

    #[tracing::instrument(name = "Deleting a link", skip(self, token))]
    pub async fn delete_link(
        &self,
        link_id: &str,
        token: &str,
    ) -> Result<reqwest::Response, HarnessError> {
        let request = self.api.delete(&format!("/links/{}", link_id));
        Ok(with_bearer(request, token).send().await?)
    }

    /// Create a link and return the id the server assigned to it.
    ///
    /// The status is not checked: a rejected creation has no `data.id` and
    /// therefore fails with [`HarnessError::UnexpectedShape`].
    #[tracing::instrument(name = "Creating a link and reading its id", skip_all)]
    pub async fn create_and_return_link_id<Body>(
        &self,
        payload: &Body,
        token: &str,
    ) -> Result<String, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        let response = self.create_link(payload, token).await?;
        let body: Envelope<LinkData> = parse_json(response).await?;
        Ok(body.data.id)
    }
}
