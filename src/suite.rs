//! One-shot pre-suite setup.
//!
//! A test binary keeps a single [`SuiteSetup`] and every test awaits
//! [`SuiteSetup::run_once`] before building fixtures. The first caller runs
//! the cleanup; everybody else waits for it and sees the same outcome, so
//! no test can create data while synthetic rows are being deleted.

use crate::lifecycle::{CleanupError, CleanupReport, DataLifecycleManager};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct SuiteSetup {
    manager: DataLifecycleManager,
    outcome: OnceCell<Result<CleanupReport, Arc<CleanupError>>>,
}

impl SuiteSetup {
    pub fn new(manager: DataLifecycleManager) -> Self {
        Self {
            manager,
            outcome: OnceCell::new(),
        }
    }

    /// Run the cleanup if nobody has yet. A failure is remembered too:
    /// every later caller gets the same error instead of a retry.
    pub async fn run_once(&self) -> Result<&CleanupReport, Arc<CleanupError>> {
        self.outcome
            .get_or_init(|| async {
                tracing::info!("Running pre-test cleanup...");
                let outcome = self.manager.cleanup_test_data().await.map_err(Arc::new);
                if outcome.is_ok() {
                    tracing::info!("Environment ready for execution");
                }
                outcome
            })
            .await
            .as_ref()
            .map_err(Arc::clone)
    }

    pub fn has_run(&self) -> bool {
        self.outcome.initialized()
    }
}
