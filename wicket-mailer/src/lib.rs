//! Email delivery for the wicket OTP challenge toolkit.
//!
//! This crate renders and sends the handful of emails the OTP flows need: the
//! passcode email carrying a freshly issued code, and the notice sent once an
//! account completes verification. Delivery goes through a [`Mailer`]
//! transport (SMTP, sendmail, or a file drop for development), selected via
//! [`MailerConfig`].

pub mod config;
pub mod email;
pub mod email_types;
pub mod error;
pub mod mailer;
pub mod templates;
pub mod transports;

pub use config::{MailerConfig, TransportConfig};
pub use email::{Email, EmailBuilder};
pub use email_types::{AccountVerifiedEmail, PasscodeEmail};
pub use error::MailerError;
pub use mailer::Mailer;
pub use templates::{AskamaTemplateEngine, TemplateContext, TemplateEngine};
pub use transports::{FileTransport, SendmailTransport, SmtpTransport};

pub mod prelude {
    pub use crate::{
        AccountVerifiedEmail, AskamaTemplateEngine, Email, EmailBuilder, FileTransport, Mailer,
        MailerConfig, MailerError, PasscodeEmail, SendmailTransport, SmtpTransport,
        TemplateContext, TemplateEngine, TransportConfig,
    };
}
