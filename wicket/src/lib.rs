//! # Wicket
//!
//! Wicket is an embeddable one-time-passcode service for Rust applications.
//! It owns the full lifecycle of an OTP challenge bound to an account
//! (generation, out-of-band delivery, verification with attempt counting,
//! expiry, and lockout) while leaving storage and delivery pluggable behind
//! small async traits.
//!
//! The rules of the state machine:
//! - codes are 6 digits and expire 10 minutes after issuance (configurable)
//! - 3 consecutive mismatches lock the account out for 30 minutes
//! - lockout belongs to the account: it survives consumption and re-issuance
//!   while active
//!
//! ## Storage Support
//!
//! Wicket currently ships a SQLite backend; any store can participate by
//! implementing the repository traits in `wicket_core::repositories`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wicket::{SqliteRepositoryProvider, Wicket};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
//!     let repositories = Arc::new(SqliteRepositoryProvider::new(pool));
//!
//!     let wicket = Wicket::new(repositories);
//!     wicket.migrate().await.unwrap();
//!
//!     let account = wicket
//!         .create_account("user@example.com", None)
//!         .await
//!         .unwrap();
//!     let issued = wicket.issue_code(&account.id).await.unwrap();
//!     let outcome = wicket.verify_code(&account.id, &issued.code).await.unwrap();
//!     assert!(outcome.is_verified());
//! }
//! ```

use std::sync::Arc;

use wicket_core::{
    repositories::{AccountRepositoryAdapter, ChallengeRepositoryAdapter, RepositoryProvider},
    services::{AccountService, ChallengeService, VerificationService},
};

/// Re-export core types
///
/// These types are commonly used when working with the Wicket API.
pub use wicket_core::{
    Account, AccountId, ChallengePolicy, Error, IssuedChallenge, NewAccount, OtpChallenge,
    Verification,
};

/// Re-export the notifier trait so delivery channels can be implemented
/// against the facade alone.
pub use wicket_core::services::Notifier;

#[cfg(feature = "mailer")]
pub use wicket_core::services::MailerNotifier;

/// Re-export storage backends
///
/// Storage implementations are available when the corresponding feature is
/// enabled.
#[cfg(feature = "sqlite")]
pub use wicket_storage_sqlite::SqliteRepositoryProvider;

type AccountRepo<R> = AccountRepositoryAdapter<R>;
type ChallengeRepo<R> = ChallengeRepositoryAdapter<R>;

/// The main entry point, wiring the account, challenge, and verification
/// services over a repository provider.
pub struct Wicket<R: RepositoryProvider> {
    repositories: Arc<R>,
    accounts: AccountService<AccountRepo<R>>,
    challenges: Arc<ChallengeService<AccountRepo<R>, ChallengeRepo<R>>>,
    verification: VerificationService<AccountRepo<R>, ChallengeRepo<R>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<R: RepositoryProvider> Wicket<R> {
    /// Create a Wicket instance with the default [`ChallengePolicy`].
    pub fn new(repositories: Arc<R>) -> Self {
        Self::with_policy(repositories, ChallengePolicy::default())
    }

    /// Create a Wicket instance with a custom [`ChallengePolicy`].
    pub fn with_policy(repositories: Arc<R>, policy: ChallengePolicy) -> Self {
        let account_repository = Arc::new(AccountRepositoryAdapter::new(repositories.clone()));
        let challenge_repository = Arc::new(ChallengeRepositoryAdapter::new(repositories.clone()));

        let accounts = AccountService::new(account_repository.clone());
        let challenges = Arc::new(
            ChallengeService::new(account_repository.clone(), challenge_repository)
                .with_policy(policy),
        );
        let verification = VerificationService::new(account_repository, challenges.clone());

        Self {
            repositories,
            accounts,
            challenges,
            verification,
            notifier: None,
        }
    }

    /// Attach a [`Notifier`] for out-of-band code delivery.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run storage migrations.
    pub async fn migrate(&self) -> Result<(), Error> {
        self.repositories.migrate().await
    }

    /// Check that the storage backend is reachable.
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }

    /// Create an account with a validated email and optional display name.
    pub async fn create_account(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<Account, Error> {
        self.accounts.create_account(email, name).await
    }

    /// Fetch an account by ID.
    pub async fn account(&self, id: &AccountId) -> Result<Option<Account>, Error> {
        self.accounts.get_account(id).await
    }

    /// Fetch an account by email.
    pub async fn account_by_email(&self, email: &str) -> Result<Option<Account>, Error> {
        self.accounts.get_account_by_email(email).await
    }

    /// Issue a fresh challenge and return the plaintext code.
    ///
    /// This is the low-level entry point for callers that deliver codes
    /// themselves; [`Wicket::request_code`] is the delivery-integrated flow.
    pub async fn issue_code(&self, account_id: &AccountId) -> Result<IssuedChallenge, Error> {
        self.challenges.issue(account_id).await
    }

    /// Issue a challenge for the account registered under `email` and
    /// dispatch the code through the configured notifier.
    ///
    /// Returns `None` when no account carries that email, without error, so
    /// callers can respond identically in both cases and avoid confirming
    /// which addresses are registered. The code never appears in the return
    /// value; delivery state is already persisted when dispatch starts.
    pub async fn request_code(&self, email: &str) -> Result<Option<Account>, Error> {
        let Some(account) = self.accounts.get_account_by_email(email).await? else {
            tracing::debug!("Code requested for unregistered email");
            return Ok(None);
        };

        let issued = self.challenges.issue(&account.id).await?;
        self.dispatch_code(&account, &issued.code);

        Ok(Some(account))
    }

    /// Verify a submitted code. Lockout, expiry, and mismatch come back as
    /// [`Verification`] outcomes rather than errors.
    pub async fn verify_code(
        &self,
        account_id: &AccountId,
        code: &str,
    ) -> Result<Verification, Error> {
        self.challenges.verify(account_id, code).await
    }

    /// Verify a submitted code and, on success, consume the challenge and
    /// mark the account verified. A best-effort notice is dispatched through
    /// the notifier.
    pub async fn confirm_account(
        &self,
        account_id: &AccountId,
        code: &str,
    ) -> Result<Verification, Error> {
        let outcome = self.verification.confirm(account_id, code).await?;

        if outcome.is_verified() {
            if let Some(account) = self.accounts.get_account(account_id).await? {
                self.dispatch_verified_notice(&account);
            }
        }

        Ok(outcome)
    }

    /// Retire the outstanding code once the flow it guarded has completed.
    pub async fn consume_code(&self, account_id: &AccountId) -> Result<(), Error> {
        self.challenges.consume(account_id).await
    }

    /// Drop expired challenge records. Returns the number removed.
    pub async fn cleanup_expired(&self) -> Result<u64, Error> {
        self.challenges.cleanup_expired().await
    }

    fn dispatch_code(&self, account: &Account, code: &str) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        let email = account.email.clone();
        let name = account.name.clone();
        let code = code.to_string();
        let ttl_minutes = self.challenges.policy().code_ttl.num_minutes();

        tokio::spawn(async move {
            if let Err(e) = notifier
                .send_code(&email, &code, ttl_minutes, name.as_deref())
                .await
            {
                tracing::warn!(error = %e, "Failed to deliver OTP code");
            }
        });
    }

    fn dispatch_verified_notice(&self, account: &Account) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        let email = account.email.clone();
        let name = account.name.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.send_verified_notice(&email, name.as_deref()).await {
                tracing::warn!(error = %e, "Failed to deliver verification notice");
            }
        });
    }
}
