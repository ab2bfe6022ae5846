//! Account verification flow
//!
//! Ties the challenge state machine to the account record: once a submitted
//! code verifies, the challenge is consumed and the account is stamped as
//! verified.

use crate::{
    AccountId, Error, Verification,
    repositories::{AccountRepository, ChallengeRepository},
    services::ChallengeService,
};
use std::sync::Arc;

/// Service for completing OTP verification flows against an account.
pub struct VerificationService<A: AccountRepository, C: ChallengeRepository> {
    account_repository: Arc<A>,
    challenges: Arc<ChallengeService<A, C>>,
}

impl<A: AccountRepository, C: ChallengeRepository> VerificationService<A, C> {
    /// Create a new VerificationService.
    ///
    /// Takes the shared [`ChallengeService`] rather than raw repositories so
    /// that both services serialize through the same per-account locks.
    pub fn new(account_repository: Arc<A>, challenges: Arc<ChallengeService<A, C>>) -> Self {
        Self {
            account_repository,
            challenges,
        }
    }

    /// Check a submitted code without completing the flow.
    pub async fn check(&self, account_id: &AccountId, code: &str) -> Result<Verification, Error> {
        self.challenges.verify(account_id, code).await
    }

    /// Verify a submitted code and, on success, consume the challenge and
    /// mark the account verified.
    ///
    /// Soft failures (lockout, expiry, mismatch) are returned as-is and leave
    /// the account untouched.
    pub async fn confirm(&self, account_id: &AccountId, code: &str) -> Result<Verification, Error> {
        let outcome = self.challenges.verify(account_id, code).await?;
        if !outcome.is_verified() {
            return Ok(outcome);
        }

        self.challenges.consume(account_id).await?;
        self.account_repository.mark_verified(account_id).await?;

        tracing::info!(account_id = %account_id, "Account verified");
        Ok(outcome)
    }
}
