use crate::SqliteChallenge;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use wicket_core::{
    AccountId, Error, OtpChallenge, error::StorageError, repositories::ChallengeRepository,
};

pub struct SqliteChallengeRepository {
    pool: SqlitePool,
}

impl SqliteChallengeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChallengeRepository for SqliteChallengeRepository {
    async fn get(&self, account_id: &AccountId) -> Result<Option<OtpChallenge>, Error> {
        let row = sqlx::query_as::<_, SqliteChallenge>(
            "SELECT * FROM otp_challenges WHERE account_id = ?1",
        )
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(row.map(|c| c.into()))
    }

    async fn upsert(&self, challenge: &OtpChallenge) -> Result<(), Error> {
        let row = SqliteChallenge::from(challenge);

        // Single-statement upsert: either the whole record lands or none of it
        sqlx::query(
            r#"
            INSERT INTO otp_challenges
                (account_id, code, issued_at, expires_at, verified, attempts, locked_until)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (account_id) DO UPDATE SET
                code = excluded.code,
                issued_at = excluded.issued_at,
                expires_at = excluded.expires_at,
                verified = excluded.verified,
                attempts = excluded.attempts,
                locked_until = excluded.locked_until
            "#,
        )
        .bind(&row.account_id)
        .bind(&row.code)
        .bind(row.issued_at)
        .bind(row.expires_at)
        .bind(row.verified)
        .bind(row.attempts)
        .bind(row.locked_until)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to upsert challenge");
            Error::Storage(StorageError::Database(e.to_string()))
        })?;

        Ok(())
    }

    async fn clear_expired(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let now_timestamp = now.timestamp();

        // Records with an active lockout must survive so the lockout holds
        let result = sqlx::query(
            r#"
            DELETE FROM otp_challenges
            WHERE (locked_until IS NULL OR locked_until < ?1)
              AND (code IS NULL OR (expires_at IS NOT NULL AND expires_at < ?1))
            "#,
        )
        .bind(now_timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SqliteAccountRepository, SqliteRepositoryProvider};
    use chrono::Duration;
    use wicket_core::{
        NewAccount,
        repositories::{AccountRepository, RepositoryProvider},
    };

    async fn setup() -> (SqliteChallengeRepository, AccountId) {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create pool");
        SqliteRepositoryProvider::new(pool.clone())
            .migrate()
            .await
            .expect("Failed to migrate");

        let account = SqliteAccountRepository::new(pool.clone())
            .create(NewAccount::new("user@example.com".to_string()))
            .await
            .expect("Failed to create account");

        (SqliteChallengeRepository::new(pool), account.id)
    }

    fn challenge(account_id: &AccountId, code: &str, expires_in: Duration) -> OtpChallenge {
        let now = Utc::now();
        OtpChallenge {
            account_id: account_id.clone(),
            code: Some(code.to_string()),
            issued_at: Some(now),
            expires_at: Some(now + expires_in),
            verified: false,
            attempts: 0,
            locked_until: None,
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let (repo, account_id) = setup().await;
        assert!(repo.get(&account_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_roundtrip() {
        let (repo, account_id) = setup().await;

        let stored = challenge(&account_id, "483920", Duration::minutes(10));
        repo.upsert(&stored).await.unwrap();

        let loaded = repo.get(&account_id).await.unwrap().unwrap();
        assert_eq!(loaded.code.as_deref(), Some("483920"));
        assert_eq!(loaded.attempts, 0);
        assert!(!loaded.verified);

        // Second upsert replaces the record in place
        let mut updated = loaded;
        updated.attempts = 2;
        updated.verified = true;
        repo.upsert(&updated).await.unwrap();

        let reloaded = repo.get(&account_id).await.unwrap().unwrap();
        assert_eq!(reloaded.attempts, 2);
        assert!(reloaded.verified);
    }

    #[tokio::test]
    async fn test_clear_expired() {
        let (repo, account_id) = setup().await;

        repo.upsert(&challenge(&account_id, "111111", Duration::seconds(-5)))
            .await
            .unwrap();
        assert_eq!(repo.clear_expired(Utc::now()).await.unwrap(), 1);
        assert!(repo.get(&account_id).await.unwrap().is_none());

        // A live code is untouched
        repo.upsert(&challenge(&account_id, "222222", Duration::minutes(10)))
            .await
            .unwrap();
        assert_eq!(repo.clear_expired(Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_expired_keeps_locked_records() {
        let (repo, account_id) = setup().await;

        let mut locked = challenge(&account_id, "333333", Duration::seconds(-5));
        locked.attempts = 3;
        locked.locked_until = Some(Utc::now() + Duration::minutes(30));
        repo.upsert(&locked).await.unwrap();

        assert_eq!(repo.clear_expired(Utc::now()).await.unwrap(), 0);
        assert!(repo.get(&account_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_consumed_record_without_lockout_is_cleared() {
        let (repo, account_id) = setup().await;

        let mut consumed = challenge(&account_id, "444444", Duration::minutes(10));
        consumed.code = None;
        consumed.expires_at = None;
        repo.upsert(&consumed).await.unwrap();

        assert_eq!(repo.clear_expired(Utc::now()).await.unwrap(), 1);
    }
}
