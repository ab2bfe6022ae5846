use crate::{Account, AccountId, Error, NewAccount};
use async_trait::async_trait;

/// Repository for account data access
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Create a new account
    async fn create(&self, account: NewAccount) -> Result<Account, Error>;

    /// Find an account by ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error>;

    /// Create an account if it doesn't exist, otherwise return the existing one
    async fn find_or_create_by_email(&self, email: &str) -> Result<Account, Error>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, Error>;

    /// Delete an account by ID
    async fn delete(&self, id: &AccountId) -> Result<(), Error>;

    /// Stamp `verified_at` on an account
    async fn mark_verified(&self, id: &AccountId) -> Result<(), Error>;
}
