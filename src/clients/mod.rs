//! Thin wrappers around the shortener's HTTP routes.
//!
//! Every call hands back the raw `reqwest::Response`; deciding whether the
//! status or body is right is the test's job. Only transport failures are
//! reported as errors.

mod auth;
mod health;
mod links;
pub mod responses;

pub use auth::AuthClient;
pub use health::HealthClient;
pub use links::LinksClient;
pub use responses::parse_json;

use crate::configuration::ApiSettings;
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: reqwest::Client,
    api_url: String,
    service_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http_client: builder.build()?,
            api_url: settings.api_url(),
            service_url: settings.service_url(),
        })
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(self.clone())
    }

    pub fn links(&self) -> LinksClient {
        LinksClient::new(self.clone())
    }

    pub fn health(&self) -> HealthClient {
        HealthClient::new(self.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client.get(format!("{}{}", self.api_url, path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client.post(format!("{}{}", self.api_url, path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http_client.delete(format!("{}{}", self.api_url, path))
    }

    fn get_service(&self, path: &str) -> RequestBuilder {
        self.http_client.get(format!("{}{}", self.service_url, path))
    }
}

/// Attach `token` the way a browser client would. An empty token still
/// sends the `Bearer ` prefix so the API's missing-token branch is hit.
fn with_bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header(AUTHORIZATION, format!("Bearer {}", token))
}
