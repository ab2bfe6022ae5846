use crate::{AccountId, Error, OtpChallenge};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository for OTP challenge data access.
///
/// At most one challenge record exists per account. `upsert` must write the
/// whole record atomically: a failed write leaves the previous state intact,
/// never a partially-applied one.
#[async_trait]
pub trait ChallengeRepository: Send + Sync + 'static {
    /// Fetch the challenge record for an account, if any
    async fn get(&self, account_id: &AccountId) -> Result<Option<OtpChallenge>, Error>;

    /// Insert or replace the challenge record for `challenge.account_id`
    async fn upsert(&self, challenge: &OtpChallenge) -> Result<(), Error>;

    /// Delete challenge records whose code has expired (or is consumed) and
    /// which carry no lockout still active at `now`. Returns the number of
    /// records removed.
    async fn clear_expired(&self, now: DateTime<Utc>) -> Result<u64, Error>;
}
