//! OTP challenge state
//!
//! One challenge record exists per account. Issuing replaces the code and
//! resets the attempt counter; lockout state is tied to the account's record
//! and survives both consumption and re-issuance while it is active.

use crate::AccountId;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};

/// Tunable knobs for the challenge state machine.
#[derive(Debug, Clone)]
pub struct ChallengePolicy {
    /// How long an issued code stays valid.
    pub code_ttl: Duration,
    /// Consecutive failures before the account is locked out.
    pub max_attempts: u32,
    /// How long a lockout lasts once triggered.
    pub lockout: Duration,
}

impl Default for ChallengePolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(10),
            max_attempts: 3,
            lockout: Duration::minutes(30),
        }
    }
}

/// The live OTP state bound to one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub account_id: AccountId,

    /// The outstanding 6-digit code, present only between issue and consume.
    /// Codes are drawn from `100000..=999999`, so leading zeros never occur.
    pub code: Option<String>,

    pub issued_at: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,

    /// True once a correct code has been accepted for the current challenge.
    pub verified: bool,

    /// Failed verifications since issuance.
    pub attempts: u32,

    /// While `now < locked_until`, verification is rejected outright.
    pub locked_until: Option<DateTime<Utc>>,
}

impl OtpChallenge {
    /// A record with no outstanding code and no history.
    pub fn empty(account_id: AccountId) -> Self {
        Self {
            account_id,
            code: None,
            issued_at: None,
            expires_at: None,
            verified: false,
            attempts: 0,
            locked_until: None,
        }
    }

    pub fn outstanding(&self) -> bool {
        self.code.is_some()
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// Returned by a successful issue; the only place the plaintext code is ever
/// surfaced.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub account_id: AccountId,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a verification attempt.
///
/// Lockout, expiry, and mismatch are expected, frequent outcomes and are
/// reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verification {
    Verified,
    LockedOut { until: DateTime<Utc> },
    Expired,
    Mismatch { attempts_remaining: u32 },
}

impl Verification {
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified)
    }

    /// The caller-facing message for this outcome.
    pub fn message(&self) -> String {
        match self {
            Verification::Verified => "OTP verified successfully.".to_string(),
            Verification::LockedOut { .. } => {
                "Maximum OTP attempts reached. Please request a new OTP.".to_string()
            }
            Verification::Expired => "OTP has expired. Please request a new OTP.".to_string(),
            Verification::Mismatch { attempts_remaining } => {
                format!("Invalid OTP. {attempts_remaining} attempts remaining.")
            }
        }
    }
}

/// Draw a fresh 6-digit code from the OS RNG.
pub(crate) fn generate_code() -> String {
    let mut rng = OsRng.unwrap_err();
    rng.random_range(100_000..=999_999u32).to_string()
}
