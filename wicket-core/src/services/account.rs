use crate::{
    Account, AccountId, Error, NewAccount, repositories::AccountRepository,
    validation::validate_email,
};
use std::sync::Arc;

/// Service for account management operations
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new AccountService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new account
    pub async fn create_account(&self, email: &str, name: Option<String>) -> Result<Account, Error> {
        validate_email(email)?;

        let mut new_account = NewAccount::new(email.to_string());
        new_account.name = name;

        self.repository.create(new_account).await
    }

    /// Get an account by ID
    pub async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.repository.find_by_id(id).await
    }

    /// Get an account by email
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.repository.find_by_email(email).await
    }

    /// Get or create an account by email
    pub async fn get_or_create_account(&self, email: &str) -> Result<Account, Error> {
        validate_email(email)?;

        self.repository.find_or_create_by_email(email).await
    }

    /// Update an account
    pub async fn update_account(&self, account: &Account) -> Result<Account, Error> {
        self.repository.update(account).await
    }

    /// Delete an account
    pub async fn delete_account(&self, id: &AccountId) -> Result<(), Error> {
        self.repository.delete(id).await
    }
}
