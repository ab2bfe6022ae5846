//! The OTP challenge state machine.
//!
//! Issue, verify, and consume one-time passcodes bound to account records,
//! with attempt counting, a fixed expiry window, and account-level lockout
//! after repeated failures.
//!
//! # Ordering
//!
//! All operations against the same account are serialized through a
//! per-account async mutex around the read-modify-write sequence, so two
//! concurrent `verify` calls cannot both observe "not yet locked" and push
//! the attempt counter past the lockout boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use wicket_core::services::ChallengeService;
//!
//! let service = ChallengeService::new(accounts, challenges);
//!
//! let issued = service.issue(&account_id).await?;
//! // deliver issued.code out-of-band, then later:
//! let outcome = service.verify(&account_id, &submitted).await?;
//! if outcome.is_verified() {
//!     service.consume(&account_id).await?;
//! }
//! ```

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::{
    AccountId, ChallengePolicy, Error, IssuedChallenge, OtpChallenge, Verification,
    challenge::generate_code,
    error::{AuthError, ChallengeError},
    repositories::{AccountRepository, ChallengeRepository},
};

/// Service owning the OTP challenge lifecycle.
///
/// # Thread Safety
///
/// The service is thread-safe and is meant to be shared behind an `Arc`;
/// the per-account lock table only serializes operations that go through the
/// same instance.
pub struct ChallengeService<A: AccountRepository, C: ChallengeRepository> {
    account_repository: Arc<A>,
    challenge_repository: Arc<C>,
    policy: ChallengePolicy,
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl<A: AccountRepository, C: ChallengeRepository> ChallengeService<A, C> {
    /// Create a new ChallengeService with the default policy (10 minute
    /// codes, 3 attempts, 30 minute lockout).
    pub fn new(account_repository: Arc<A>, challenge_repository: Arc<C>) -> Self {
        Self {
            account_repository,
            challenge_repository,
            policy: ChallengePolicy::default(),
            locks: DashMap::new(),
        }
    }

    /// Replace the policy. Intended for construction-time configuration.
    pub fn with_policy(mut self, policy: ChallengePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ChallengePolicy {
        &self.policy
    }

    /// Issue a fresh challenge for an account.
    ///
    /// Any previous code is discarded, the attempt counter resets, and
    /// `verified` clears. A lockout that is still active is preserved; an
    /// elapsed one is dropped. The plaintext code is returned here and
    /// nowhere else.
    pub async fn issue(&self, account_id: &AccountId) -> Result<IssuedChallenge, Error> {
        self.ensure_account(account_id).await?;

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let now = Utc::now();
        let previous = self.challenge_repository.get(account_id).await?;
        let locked_until = previous
            .and_then(|c| c.locked_until)
            .filter(|until| *until > now);

        let code = generate_code();
        let expires_at = now + self.policy.code_ttl;
        let challenge = OtpChallenge {
            account_id: account_id.clone(),
            code: Some(code.clone()),
            issued_at: Some(now),
            expires_at: Some(expires_at),
            verified: false,
            attempts: 0,
            locked_until,
        };

        self.challenge_repository.upsert(&challenge).await?;

        tracing::info!(account_id = %account_id, "Issued OTP challenge");

        Ok(IssuedChallenge {
            account_id: account_id.clone(),
            code,
            expires_at,
        })
    }

    /// Verify a submitted code against the outstanding challenge.
    ///
    /// Evaluation order: lockout, then expiry, then exact string match.
    /// Lockout and expiry leave the attempt counter untouched; a mismatch
    /// increments it and triggers a lockout once the policy limit is reached.
    pub async fn verify(
        &self,
        account_id: &AccountId,
        submitted_code: &str,
    ) -> Result<Verification, Error> {
        self.ensure_account(account_id).await?;

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let now = Utc::now();
        let mut challenge = self
            .challenge_repository
            .get(account_id)
            .await?
            .filter(OtpChallenge::outstanding)
            .ok_or(ChallengeError::NotIssued)?;

        if let Some(until) = challenge.locked_until {
            if now < until {
                tracing::warn!(account_id = %account_id, "Verification rejected: locked out");
                return Ok(Verification::LockedOut { until });
            }
        }

        if challenge.is_expired(now) {
            return Ok(Verification::Expired);
        }

        if challenge.code.as_deref() == Some(submitted_code) {
            challenge.verified = true;
            challenge.attempts = 0;
            self.challenge_repository.upsert(&challenge).await?;

            tracing::info!(account_id = %account_id, "OTP verified");
            return Ok(Verification::Verified);
        }

        challenge.attempts += 1;
        if challenge.attempts >= self.policy.max_attempts {
            challenge.locked_until = Some(now + self.policy.lockout);
        }
        self.challenge_repository.upsert(&challenge).await?;

        let attempts_remaining = self.policy.max_attempts.saturating_sub(challenge.attempts);
        tracing::warn!(
            account_id = %account_id,
            attempts = challenge.attempts,
            "OTP mismatch"
        );

        Ok(Verification::Mismatch { attempts_remaining })
    }

    /// Retire the outstanding code once the flow it guarded has completed.
    ///
    /// Clears the code and its expiry; the attempt counter and any lockout
    /// stay with the account until the next issue.
    pub async fn consume(&self, account_id: &AccountId) -> Result<(), Error> {
        self.ensure_account(account_id).await?;

        let lock = self.lock_for(account_id);
        let _guard = lock.lock().await;

        let mut challenge = self
            .challenge_repository
            .get(account_id)
            .await?
            .filter(OtpChallenge::outstanding)
            .ok_or(ChallengeError::NotIssued)?;

        challenge.code = None;
        challenge.expires_at = None;
        self.challenge_repository.upsert(&challenge).await?;

        tracing::info!(account_id = %account_id, "OTP challenge consumed");
        Ok(())
    }

    /// Drop challenge records with expired or consumed codes and no active
    /// lockout. Returns the number of records removed.
    pub async fn cleanup_expired(&self) -> Result<u64, Error> {
        let removed = self.challenge_repository.clear_expired(Utc::now()).await?;
        if removed > 0 {
            tracing::info!(count = removed, "Cleaned up expired OTP challenges");
        }
        Ok(removed)
    }

    async fn ensure_account(&self, account_id: &AccountId) -> Result<(), Error> {
        self.account_repository
            .find_by_id(account_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    fn lock_for(&self, account_id: &AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(account_id.clone()).or_default().clone()
    }
}
