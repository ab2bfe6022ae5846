use crate::SqliteAccount;
use async_trait::async_trait;
use sqlx::SqlitePool;
use wicket_core::{
    Account, AccountId, Error, NewAccount,
    error::{AuthError, StorageError},
    repositories::AccountRepository,
};

pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();

        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            INSERT INTO accounts (id, email, name, verified_at, created_at, updated_at)
            VALUES (?1, ?2, ?3, NULL, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Auth(AuthError::AccountAlreadyExists)
            }
            _ => Error::Storage(StorageError::Database(e.to_string())),
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(row.map(|a| a.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        let row = sqlx::query_as::<_, SqliteAccount>("SELECT * FROM accounts WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(row.map(|a| a.into()))
    }

    async fn find_or_create_by_email(&self, email: &str) -> Result<Account, Error> {
        if let Some(account) = self.find_by_email(email).await? {
            Ok(account)
        } else {
            self.create(NewAccount::new(email.to_string())).await
        }
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        let now = chrono::Utc::now().timestamp();
        let verified_timestamp = account.verified_at.map(|dt| dt.timestamp());

        let row = sqlx::query_as::<_, SqliteAccount>(
            r#"
            UPDATE accounts
            SET email = ?2, name = ?3, verified_at = ?4, updated_at = ?5
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(account.id.as_str())
        .bind(&account.email)
        .bind(&account.name)
        .bind(verified_timestamp)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(row.into())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), Error> {
        sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(())
    }

    async fn mark_verified(&self, id: &AccountId) -> Result<(), Error> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query("UPDATE accounts SET verified_at = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(now)
            .bind(now)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(())
    }
}
