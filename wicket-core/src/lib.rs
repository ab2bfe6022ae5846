//! Core functionality for the wicket OTP challenge toolkit
//!
//! This crate owns the lifecycle of one-time-passcode challenges bound to
//! account records: generation, verification, attempt counting, expiry, and
//! lockout. Storage and delivery are abstract: backends implement the
//! repository traits in [`repositories`], and delivery channels implement the
//! [`services::Notifier`] trait.
//!
//! See [`Account`] for the account record, [`OtpChallenge`] for the challenge
//! state, and [`services::ChallengeService`] for the state machine itself.

pub mod account;
pub mod challenge;
pub mod error;
pub mod id;
pub mod repositories;
pub mod services;
pub mod validation;

pub use account::{Account, AccountId, NewAccount};
pub use challenge::{ChallengePolicy, IssuedChallenge, OtpChallenge, Verification};
pub use error::Error;
