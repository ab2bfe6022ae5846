//! Out-of-band code delivery
//!
//! The challenge flows treat delivery as best-effort: state is persisted
//! before a notifier is invoked, and delivery failures are logged rather
//! than surfaced to the requester.

use crate::Error;
use async_trait::async_trait;

/// A channel capable of handing a freshly issued code to the account holder.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a one-time passcode.
    async fn send_code(
        &self,
        to: &str,
        code: &str,
        ttl_minutes: i64,
        name: Option<&str>,
    ) -> Result<(), Error>;

    /// Deliver the notice that an account completed verification.
    async fn send_verified_notice(&self, to: &str, name: Option<&str>) -> Result<(), Error>;
}

#[cfg(feature = "mailer")]
pub use self::mailer_impl::MailerNotifier;

#[cfg(feature = "mailer")]
mod mailer_impl {
    use super::Notifier;
    use crate::{Error, error::NotifyError};
    use async_trait::async_trait;
    use wicket_mailer::prelude::*;

    /// [`Notifier`] backed by the wicket-mailer transports and templates.
    pub struct MailerNotifier {
        transport: Box<dyn Mailer>,
        engine: AskamaTemplateEngine,
        config: MailerConfig,
    }

    impl MailerNotifier {
        pub fn new(config: MailerConfig) -> Result<Self, Error> {
            let transport = config
                .build_transport()
                .map_err(|e| NotifyError::Delivery(e.to_string()))?;

            Ok(Self {
                transport,
                engine: AskamaTemplateEngine::new(),
                config,
            })
        }

        pub fn from_env() -> Result<Self, Error> {
            let config =
                MailerConfig::from_env().map_err(|e| NotifyError::Delivery(e.to_string()))?;
            Self::new(config)
        }

        fn context(&self, name: Option<&str>, email: &str) -> TemplateContext {
            TemplateContext {
                app_name: self.config.app_name.clone(),
                user_name: name.map(|s| s.to_string()),
                user_email: Some(email.to_string()),
            }
        }
    }

    #[async_trait]
    impl Notifier for MailerNotifier {
        async fn send_code(
            &self,
            to: &str,
            code: &str,
            ttl_minutes: i64,
            name: Option<&str>,
        ) -> Result<(), Error> {
            let context = self.context(name, to);

            let email = PasscodeEmail::build(
                &self.engine,
                &self.config.get_from_address(),
                to,
                code,
                ttl_minutes,
                context,
            )
            .await
            .map_err(|e| NotifyError::Template(e.to_string()))?;

            self.transport
                .send_email(email)
                .await
                .map_err(|e| NotifyError::Delivery(e.to_string()))?;

            Ok(())
        }

        async fn send_verified_notice(&self, to: &str, name: Option<&str>) -> Result<(), Error> {
            let context = self.context(name, to);

            let email = AccountVerifiedEmail::build(
                &self.engine,
                &self.config.get_from_address(),
                to,
                context,
            )
            .await
            .map_err(|e| NotifyError::Template(e.to_string()))?;

            self.transport
                .send_email(email)
                .await
                .map_err(|e| NotifyError::Delivery(e.to_string()))?;

            Ok(())
        }
    }

}
