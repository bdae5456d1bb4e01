use crate::clients::responses::{Envelope, LoginData};
use crate::clients::{AuthClient, parse_json};
use crate::domain::{BearerToken, Credentials, SyntheticUser};
use crate::error::HarnessError;
use crate::fixtures::{Fixture, FixtureScope};
use serde::Serialize;

/// Registration and login, plus the login-then-read-token shortcut.
#[derive(Debug)]
pub struct AuthFixture {
    client: AuthClient,
}

#[async_trait::async_trait]
impl Fixture for AuthFixture {
    const NAME: &'static str = "auth";

    async fn setup(scope: &mut FixtureScope) -> Result<Self, HarnessError> {
        Ok(Self {
            client: scope.api().auth(),
        })
    }
}

impl AuthFixture {
    pub async fn create_user<Body>(&self, payload: &Body) -> Result<reqwest::Response, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        self.client.create_user(payload).await
    }

    pub async fn login<Body>(&self, credentials: &Body) -> Result<reqwest::Response, HarnessError>
    where
        Body: Serialize + ?Sized,
    {
        self.client.login(credentials).await
    }

    /// Register `user`, failing unless the API answers with a success status.
    #[tracing::instrument(name = "Registering a synthetic user", skip_all, fields(email = %user.email))]
    pub async fn register(&self, user: &SyntheticUser) -> Result<(), HarnessError> {
        let response = self.client.create_user(user).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(HarnessError::UnexpectedStatus { status, body });
        }
        Ok(())
    }

    /// Log `user` in and return the token from `data.token`.
    #[tracing::instrument(name = "Fetching a token", skip_all, fields(email = %user.email))]
    pub async fn get_token(&self, user: &SyntheticUser) -> Result<BearerToken, HarnessError> {
        let response = self.client.login(&Credentials::from(user)).await?;
        let body: Envelope<LoginData> = parse_json(response).await?;
        Ok(body.data.token)
    }
}
