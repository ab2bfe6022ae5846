//! Account records
//!
//! Accounts are the anchor for OTP challenges: every challenge is bound to
//! exactly one account, and lockout state outlives individual challenges by
//! living alongside the account's challenge record.

use crate::{
    Error,
    error::ValidationError,
    id::{generate_prefixed_id, validate_prefixed_id},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unique, stable identifier for an account.
///
/// Treat the value as opaque; the `acct_` prefix is an implementation detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: &str) -> Self {
        AccountId(id.to_string())
    }

    pub fn new_random() -> Self {
        AccountId(generate_prefixed_id("acct"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this ID has the correct format for an account ID
    pub fn is_valid(&self) -> bool {
        validate_prefixed_id(&self.0, "acct")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account record as held by the account store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The unique identifier for the account.
    pub id: AccountId,

    /// The email the account's codes are delivered to. Unique.
    pub email: String,

    /// Optional display name, used in notification salutations.
    pub name: Option<String>,

    /// Set once the account has completed an OTP verification flow.
    pub verified_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

#[derive(Default)]
pub struct AccountBuilder {
    id: Option<AccountId>,
    email: Option<String>,
    name: Option<String>,
    verified_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl AccountBuilder {
    pub fn id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn verified_at(mut self, verified_at: Option<DateTime<Utc>>) -> Self {
        self.verified_at = verified_at;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> Result<Account, Error> {
        let now = Utc::now();
        Ok(Account {
            id: self.id.unwrap_or_default(),
            email: self.email.ok_or(ValidationError::MissingField(
                "Email is required".to_string(),
            ))?,
            name: self.name,
            verified_at: self.verified_at,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

/// Payload for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub id: AccountId,
    pub email: String,
    pub name: Option<String>,
}

impl NewAccount {
    pub fn new(email: String) -> Self {
        Self {
            id: AccountId::new_random(),
            email,
            name: None,
        }
    }

    pub fn with_name(email: String, name: String) -> Self {
        Self {
            id: AccountId::new_random(),
            email,
            name: Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id() {
        let id = AccountId::new("test");
        assert_eq!(id.as_str(), "test");

        let from_str = AccountId::from(id.as_str());
        assert_eq!(from_str, id);

        let random = AccountId::new_random();
        assert_ne!(random, id);
    }

    #[test]
    fn test_account_id_prefixed() {
        let id = AccountId::new_random();
        assert!(id.as_str().starts_with("acct_"));
        assert!(id.is_valid());

        let invalid = AccountId::new("invalid");
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_account_builder_requires_email() {
        let result = Account::builder().build();
        assert!(result.is_err());

        let account = Account::builder()
            .email("user@example.com".to_string())
            .build()
            .unwrap();
        assert_eq!(account.email, "user@example.com");
        assert!(!account.is_verified());
    }
}
