//! SQLite storage backend for the wicket OTP challenge toolkit.
//!
//! Timestamps are stored as unix seconds (`INTEGER`); challenge records are
//! written with a single `INSERT ... ON CONFLICT` upsert so a failed write
//! never leaves partial state behind.

pub mod repositories;

pub use repositories::{
    SqliteAccountRepository, SqliteChallengeRepository, SqliteRepositoryProvider,
};

use chrono::DateTime;
use wicket_core::{Account, AccountId, OtpChallenge};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SqliteAccount {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub verified_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<SqliteAccount> for Account {
    fn from(row: SqliteAccount) -> Self {
        Account {
            id: AccountId::new(&row.id),
            email: row.email,
            name: row.name,
            verified_at: row
                .verified_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            created_at: DateTime::from_timestamp(row.created_at, 0).expect("Invalid timestamp"),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).expect("Invalid timestamp"),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SqliteChallenge {
    pub account_id: String,
    pub code: Option<String>,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub verified: bool,
    pub attempts: i64,
    pub locked_until: Option<i64>,
}

impl From<SqliteChallenge> for OtpChallenge {
    fn from(row: SqliteChallenge) -> Self {
        OtpChallenge {
            account_id: AccountId::new(&row.account_id),
            code: row.code,
            issued_at: row.issued_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
            expires_at: row
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            verified: row.verified,
            attempts: row.attempts as u32,
            locked_until: row
                .locked_until
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        }
    }
}

impl From<&OtpChallenge> for SqliteChallenge {
    fn from(challenge: &OtpChallenge) -> Self {
        SqliteChallenge {
            account_id: challenge.account_id.as_str().to_string(),
            code: challenge.code.clone(),
            issued_at: challenge.issued_at.map(|dt| dt.timestamp()),
            expires_at: challenge.expires_at.map(|dt| dt.timestamp()),
            verified: challenge.verified,
            attempts: challenge.attempts as i64,
            locked_until: challenge.locked_until.map(|dt| dt.timestamp()),
        }
    }
}
