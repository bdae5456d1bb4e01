//! Per-test fixtures with explicit setup and teardown.
//!
//! A [`FixtureScope`] lives for exactly one test. Fixtures are resolved
//! lazily through it; whatever a fixture's `setup` resolves in turn is built
//! first, and every fixture is built at most once per scope no matter how
//! many other fixtures depend on it. [`FixtureScope::run`] executes the test
//! body and then tears fixtures down in reverse order of construction,
//! whatever the body's outcome.

mod auth;
mod authenticated_user;
mod links;

pub use auth::AuthFixture;
pub use authenticated_user::AuthenticatedUser;
pub use links::LinksFixture;

use crate::clients::ApiClient;
use crate::contract::Contract;
use crate::error::HarnessError;
use crate::factories::UserFactory;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait Fixture: Sized + Send + Sync + 'static {
    /// Shown in errors and logs.
    const NAME: &'static str;

    /// Build the fixture, resolving its dependencies through `scope`.
    async fn setup(scope: &mut FixtureScope) -> Result<Self, HarnessError>;

    /// Runs after the test body, even if it failed.
    async fn teardown(&self) -> Result<(), HarnessError> {
        Ok(())
    }
}

type Teardown = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), HarnessError>> + Send>;

pub struct FixtureScope {
    api: ApiClient,
    user_factory: UserFactory,
    contract: Contract,
    resolved: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    resolving: Vec<(TypeId, &'static str)>,
    teardowns: Vec<(&'static str, Teardown)>,
}

impl FixtureScope {
    pub fn new(api: ApiClient, user_factory: UserFactory, contract: Contract) -> Self {
        Self {
            api,
            user_factory,
            contract,
            resolved: HashMap::new(),
            resolving: Vec::new(),
            teardowns: Vec::new(),
        }
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

    /// Number of fixtures built or provided so far.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Get `F`, building it (and its dependencies) on first use.
    pub async fn resolve<F: Fixture>(&mut self) -> Result<Arc<F>, HarnessError> {
        let key = TypeId::of::<F>();
        if let Some(value) = self.resolved.get(&key) {
            return downcast::<F>(Arc::clone(value));
        }
        if self.resolving.iter().any(|(pending, _)| *pending == key) {
            let mut chain: Vec<&'static str> = self.resolving.iter().map(|(_, n)| *n).collect();
            chain.push(F::NAME);
            return Err(HarnessError::FixtureCycle { chain });
        }

        self.resolving.push((key, F::NAME));
        let outcome = F::setup(self).await;
        self.resolving.pop();

        let value = Arc::new(outcome.map_err(|e| {
            tracing::error!(fixture = F::NAME, error.cause_chain = ?e, "Fixture setup failed");
            HarnessError::Fixture {
                name: F::NAME,
                source: Box::new(e),
            }
        })?);
        tracing::debug!(fixture = F::NAME, "Fixture ready");

        self.resolved
            .insert(key, Arc::clone(&value) as Arc<dyn Any + Send + Sync>);
        let for_teardown = Arc::clone(&value);
        self.teardowns.push((
            F::NAME,
            Box::new(move || Box::pin(async move { for_teardown.teardown().await })),
        ));
        Ok(value)
    }

    /// Seed a ready-made value. Later `resolve::<F>()` calls return it
    /// instead of running `F::setup`, and it is never torn down.
    ///
    /// Fails if `F` was already built or provided in this scope.
    pub fn provide<F: Fixture>(&mut self, value: F) -> Result<Arc<F>, HarnessError> {
        let key = TypeId::of::<F>();
        if self.resolved.contains_key(&key) {
            return Err(HarnessError::FixtureAlreadyResolved { name: F::NAME });
        }
        let value = Arc::new(value);
        self.resolved
            .insert(key, Arc::clone(&value) as Arc<dyn Any + Send + Sync>);
        Ok(value)
    }

    /// Run `body`, then tear down everything it resolved.
    ///
    /// A failing body wins over a failing teardown; teardown failures are
    /// logged either way. A panicking body is resumed once teardown is done.
    pub async fn run<T, B>(mut self, body: B) -> Result<T, HarnessError>
    where
        B: for<'s> FnOnce(&'s mut FixtureScope) -> BoxFuture<'s, Result<T, HarnessError>>,
    {
        let outcome = AssertUnwindSafe(body(&mut self)).catch_unwind().await;
        let teardown_outcome = self.teardown().await;

        match outcome {
            Err(panic) => std::panic::resume_unwind(panic),
            Ok(Err(e)) => Err(e),
            Ok(Ok(value)) => teardown_outcome.map(|()| value),
        }
    }

    /// Tear down every fixture built so far, most recent first.
    #[tracing::instrument(name = "Tearing down fixtures", skip(self), fields(count = self.teardowns.len()))]
    pub async fn teardown(&mut self) -> Result<(), HarnessError> {
        let mut first_failure = None;
        while let Some((name, teardown)) = self.teardowns.pop() {
            if let Err(e) = teardown().await {
                tracing::error!(fixture = name, error.cause_chain = ?e, "Fixture teardown failed");
                first_failure.get_or_insert(HarnessError::Teardown {
                    name,
                    source: Box::new(e),
                });
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for FixtureScope {
    fn drop(&mut self) {
        if !self.teardowns.is_empty() {
            let pending: Vec<&str> = self.teardowns.iter().map(|(name, _)| *name).collect();
            tracing::warn!(
                ?pending,
                "Fixture scope dropped without running teardown; use `FixtureScope::run`"
            );
        }
    }
}

fn downcast<F: Fixture>(value: Arc<dyn Any + Send + Sync>) -> Result<Arc<F>, HarnessError> {
    value.downcast::<F>().map_err(|_| {
        HarnessError::Unexpected(anyhow::anyhow!(
            "Fixture `{}` is stored under the wrong type.",
            F::NAME
        ))
    })
}
