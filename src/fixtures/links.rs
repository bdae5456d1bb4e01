use crate::clients::LinksClient;
use crate::error::HarnessError;
use crate::fixtures::{Fixture, FixtureScope};

/// The links service client, as a fixture.
#[derive(Debug)]
pub struct LinksFixture {
    client: LinksClient,
}

#[async_trait::async_trait]
impl Fixture for LinksFixture {
    const NAME: &'static str = "links";

    async fn setup(scope: &mut FixtureScope) -> Result<Self, HarnessError> {
        Ok(Self {
            client: scope.api().links(),
        })
    }
}

impl std::ops::Deref for LinksFixture {
    type Target = LinksClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
