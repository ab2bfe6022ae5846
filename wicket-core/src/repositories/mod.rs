//! Repository traits for the data access layer
//!
//! Services talk to storage exclusively through these traits. A storage
//! backend implements the individual `*Repository` traits, the matching
//! `*RepositoryProvider` traits, and finally [`RepositoryProvider`] with its
//! lifecycle methods.

pub mod account;
pub mod adapter;
pub mod challenge;

pub use account::AccountRepository;
pub use adapter::{AccountRepositoryAdapter, ChallengeRepositoryAdapter};
pub use challenge::ChallengeRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for account repository access.
pub trait AccountRepositoryProvider: Send + Sync + 'static {
    /// The account repository implementation type
    type AccountRepo: AccountRepository;

    /// Get the account repository
    fn account(&self) -> &Self::AccountRepo;
}

/// Provider trait for challenge repository access.
pub trait ChallengeRepositoryProvider: Send + Sync + 'static {
    /// The challenge repository implementation type
    type ChallengeRepo: ChallengeRepository;

    /// Get the challenge repository
    fn challenge(&self) -> &Self::ChallengeRepo;
}

/// Provider trait that storage implementations must implement to expose all
/// repositories plus lifecycle methods.
///
/// # Implementing a Custom Storage Backend
///
/// 1. Implement [`AccountRepository`] and [`ChallengeRepository`] for your
///    backend's repository types
/// 2. Implement the two provider traits
/// 3. Implement this trait with `migrate()` and `health_check()`
#[async_trait]
pub trait RepositoryProvider: AccountRepositoryProvider + ChallengeRepositoryProvider {
    /// Run migrations for all repositories
    async fn migrate(&self) -> Result<(), Error>;

    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
