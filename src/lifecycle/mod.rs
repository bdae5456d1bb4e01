//! Pre-suite removal of synthetic data, straight from the API's database.

mod state;

pub use state::{InvalidTransition, LifecycleEvent, LifecycleState, LifecycleTracker};

use crate::configuration::DatabaseSettings;
use crate::domain::ReservedDomain;
use crate::error::error_chain_fmt;
use chrono::{DateTime, Utc};
use sqlx::{Connection, PgConnection};

#[derive(thiserror::Error)]
pub enum CleanupError {
    #[error("Failed to connect to the database holding the test data.")]
    Connect(#[source] sqlx::Error),
    #[error("Failed to begin the cleanup transaction.")]
    Begin(#[source] sqlx::Error),
    #[error("Failed to delete synthetic rows from `{table}`.")]
    Delete {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to commit the cleanup transaction.")]
    Commit(#[source] sqlx::Error),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

impl std::fmt::Debug for CleanupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone)]
pub struct CleanupReport {
    pub links_deleted: u64,
    pub users_deleted: u64,
    pub completed_at: DateTime<Utc>,
    pub states: Vec<LifecycleState>,
}

struct DeletedRows {
    links: u64,
    users: u64,
}

/// Deletes every user under the reserved domain, and their links, in one
/// transaction on one connection.
#[derive(Debug, Clone)]
pub struct DataLifecycleManager {
    database: DatabaseSettings,
    domain: ReservedDomain,
}

impl DataLifecycleManager {
    pub fn new(database: DatabaseSettings, domain: ReservedDomain) -> Self {
        Self { database, domain }
    }

    pub fn domain(&self) -> &ReservedDomain {
        &self.domain
    }

    /// Links go first: they reference their owner through `links.user_id`.
    ///
    /// On failure the transaction is rolled back and the error returned, so
    /// nothing runs against half-cleaned data. The connection is closed on
    /// every path.
    #[tracing::instrument(
        name = "Cleaning up synthetic test data",
        skip(self),
        fields(
            pattern = %self.domain.email_pattern(),
            database = %self.database.database_name,
        )
    )]
    pub async fn cleanup_test_data(&self) -> Result<CleanupReport, CleanupError> {
        let mut tracker = LifecycleTracker::default();

        let mut connection = match PgConnection::connect_with(&self.database.connect_options()).await
        {
            Ok(connection) => connection,
            Err(e) => {
                tracker.advance_on_unwind(LifecycleEvent::Close);
                let e = CleanupError::Connect(e);
                tracing::error!(error.cause_chain = ?e, "Failed to clean test data for {}", self.domain);
                return Err(e);
            }
        };
        tracker.advance_on_unwind(LifecycleEvent::Connect);

        let outcome = self.run_transaction(&mut connection, &mut tracker).await;

        if let Err(e) = connection.close().await {
            tracing::warn!(error.cause_chain = ?e, "Failed to close the cleanup connection");
        }
        tracker.advance_on_unwind(LifecycleEvent::Close);

        match outcome {
            Ok(deleted) => {
                tracing::info!(
                    links_deleted = deleted.links,
                    users_deleted = deleted.users,
                    "Synthetic test data removed"
                );
                Ok(CleanupReport {
                    links_deleted: deleted.links,
                    users_deleted: deleted.users,
                    completed_at: Utc::now(),
                    states: tracker.into_history(),
                })
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to clean test data for {}", self.domain);
                Err(e)
            }
        }
    }

    async fn run_transaction(
        &self,
        connection: &mut PgConnection,
        tracker: &mut LifecycleTracker,
    ) -> Result<DeletedRows, CleanupError> {
        let mut transaction = connection.begin().await.map_err(CleanupError::Begin)?;
        tracker.advance(LifecycleEvent::Begin)?;

        match self.delete_synthetic_rows(&mut transaction).await {
            Ok(deleted) => match transaction.commit().await {
                Ok(()) => {
                    tracker.advance(LifecycleEvent::Commit)?;
                    Ok(deleted)
                }
                Err(e) => {
                    // The server discards a transaction whose commit failed.
                    tracker.advance_on_unwind(LifecycleEvent::Rollback);
                    Err(CleanupError::Commit(e))
                }
            },
            Err(e) => {
                if let Err(rollback_error) = transaction.rollback().await {
                    tracing::warn!(
                        error.cause_chain = ?rollback_error,
                        "Failed to roll back the cleanup transaction"
                    );
                }
                tracker.advance_on_unwind(LifecycleEvent::Rollback);
                Err(e)
            }
        }
    }

    async fn delete_synthetic_rows(
        &self,
        transaction: &mut PgConnection,
    ) -> Result<DeletedRows, CleanupError> {
        let pattern = self.domain.email_pattern();

        let links = sqlx::query(
            r#"
            DELETE FROM links
            WHERE user_id IN (
                SELECT id FROM users WHERE email LIKE $1
            )
            "#,
        )
        .bind(&pattern)
        .execute(&mut *transaction)
        .await
        .map_err(|source| CleanupError::Delete {
            table: "links",
            source,
        })?
        .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(&pattern)
            .execute(&mut *transaction)
            .await
            .map_err(|source| CleanupError::Delete {
                table: "users",
                source,
            })?
            .rows_affected();

        Ok(DeletedRows { links, users })
    }
}
