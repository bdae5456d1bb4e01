use crate::clients::ApiClient;
use crate::configuration::Settings;
use crate::contract::Contract;
use crate::factories::UserFactory;
use crate::fixtures::FixtureScope;
use crate::lifecycle::DataLifecycleManager;
use anyhow::Context;

/// Everything a test needs to talk to the API, built once per test.
#[derive(Debug, Clone)]
pub struct Harness {
    settings: Settings,
    api: ApiClient,
    user_factory: UserFactory,
    contract: Contract,
}

impl Harness {
    pub fn build(settings: Settings) -> Result<Self, anyhow::Error> {
        let domain = settings
            .synthetic_data
            .reserved_domain()
            .map_err(anyhow::Error::msg)
            .context("Invalid synthetic data settings.")?;
        let api = ApiClient::new(&settings.api).context("Failed to build the HTTP client.")?;
        let contract = Contract::new(settings.contract.mode);

        Ok(Self {
            settings,
            api,
            user_factory: UserFactory::new(domain),
            contract,
        })
    }

    /// A fresh scope for one test.
    pub fn scope(&self) -> FixtureScope {
        FixtureScope::new(self.api.clone(), self.user_factory.clone(), self.contract)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn user_factory(&self) -> &UserFactory {
        &self.user_factory
    }

    pub fn contract(&self) -> Contract {
        self.contract
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lifecycle_manager(&self) -> DataLifecycleManager {
        DataLifecycleManager::new(
            self.settings.database.clone(),
            self.user_factory.domain().clone(),
        )
    }
}
