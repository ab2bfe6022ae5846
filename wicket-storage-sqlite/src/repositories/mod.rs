mod account;
mod challenge;

pub use account::SqliteAccountRepository;
pub use challenge::SqliteChallengeRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use wicket_core::{
    Error,
    error::StorageError,
    repositories::{AccountRepositoryProvider, ChallengeRepositoryProvider, RepositoryProvider},
};

/// SQLite-backed [`RepositoryProvider`].
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    account: SqliteAccountRepository,
    challenge: SqliteChallengeRepository,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            account: SqliteAccountRepository::new(pool.clone()),
            challenge: SqliteChallengeRepository::new(pool.clone()),
            pool,
        }
    }
}

impl AccountRepositoryProvider for SqliteRepositoryProvider {
    type AccountRepo = SqliteAccountRepository;

    fn account(&self) -> &Self::AccountRepo {
        &self.account
    }
}

impl ChallengeRepositoryProvider for SqliteRepositoryProvider {
    type ChallengeRepo = SqliteChallengeRepository;

    fn challenge(&self) -> &Self::ChallengeRepo {
        &self.challenge
    }
}

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to run migrations");
                Error::Storage(StorageError::Migration(e.to_string()))
            })
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Connection(e.to_string())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_and_health_check() {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create pool");
        let provider = SqliteRepositoryProvider::new(pool);

        provider.migrate().await.expect("Failed to migrate");
        provider.health_check().await.expect("Health check failed");

        // Migrations are idempotent
        provider.migrate().await.expect("Re-migration failed");
    }
}
