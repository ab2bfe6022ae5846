use crate::{Email, MailerError};
use async_trait::async_trait;

/// A transport capable of delivering an [`Email`].
///
/// Implementations are expected to be cheap to clone or share behind a
/// `Box`/`Arc`; the OTP flows treat delivery as best-effort.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), MailerError>;
}
