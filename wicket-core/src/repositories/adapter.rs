use crate::{
    Account, AccountId, Error, NewAccount, OtpChallenge,
    repositories::{AccountRepository, ChallengeRepository, RepositoryProvider},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Adapter that wraps a [`RepositoryProvider`] and implements
/// [`AccountRepository`], so services can own an `Arc` of a concrete
/// repository regardless of how the provider stores its repositories.
pub struct AccountRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AccountRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AccountRepository for AccountRepositoryAdapter<R> {
    async fn create(&self, account: NewAccount) -> Result<Account, Error> {
        self.provider.account().create(account).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.provider.account().find_by_email(email).await
    }

    async fn find_or_create_by_email(&self, email: &str) -> Result<Account, Error> {
        self.provider.account().find_or_create_by_email(email).await
    }

    async fn update(&self, account: &Account) -> Result<Account, Error> {
        self.provider.account().update(account).await
    }

    async fn delete(&self, id: &AccountId) -> Result<(), Error> {
        self.provider.account().delete(id).await
    }

    async fn mark_verified(&self, id: &AccountId) -> Result<(), Error> {
        self.provider.account().mark_verified(id).await
    }
}

/// Adapter that wraps a [`RepositoryProvider`] and implements
/// [`ChallengeRepository`].
pub struct ChallengeRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> ChallengeRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> ChallengeRepository for ChallengeRepositoryAdapter<R> {
    async fn get(&self, account_id: &AccountId) -> Result<Option<OtpChallenge>, Error> {
        self.provider.challenge().get(account_id).await
    }

    async fn upsert(&self, challenge: &OtpChallenge) -> Result<(), Error> {
        self.provider.challenge().upsert(challenge).await
    }

    async fn clear_expired(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        self.provider.challenge().clear_expired(now).await
    }
}
