use crate::domain::{BearerToken, SyntheticUser};
use crate::error::HarnessError;
use crate::fixtures::{AuthFixture, Fixture, FixtureScope};

/// A freshly registered user and a token for it.
///
/// Nothing is deleted after the test: the user stays until the next
/// pre-suite cleanup, which also covers tests that crashed half-way.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: SyntheticUser,
    pub token: BearerToken,
}

impl AuthenticatedUser {
    pub fn token(&self) -> &str {
        self.token.expose()
    }
}

#[async_trait::async_trait]
impl Fixture for AuthenticatedUser {
    const NAME: &'static str = "authenticated_user";

    async fn setup(scope: &mut FixtureScope) -> Result<Self, HarnessError> {
        let auth = scope.resolve::<AuthFixture>().await?;
        let user = scope.user_factory().build_user();

        auth.register(&user).await?;
        let token = auth.get_token(&user).await?;
        tracing::info!(email = %user.email, "Authenticated a synthetic user");

        Ok(Self { user, token })
    }
}
