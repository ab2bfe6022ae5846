use crate::{
    Email, MailerError,
    templates::{TemplateContext, TemplateData, TemplateEngine},
};

/// The email carrying a freshly issued one-time passcode.
pub struct PasscodeEmail;

impl PasscodeEmail {
    pub async fn build<T: TemplateEngine>(
        engine: &T,
        from: &str,
        to: &str,
        code: &str,
        ttl_minutes: i64,
        context: TemplateContext,
    ) -> Result<Email, MailerError> {
        let template_data = TemplateData::new()
            .insert("context", &context)?
            .insert("code", code)?
            .insert("ttl_minutes", ttl_minutes)?;

        let html_body = engine.render_html("passcode", template_data.clone()).await?;
        let text_body = engine.render_text("passcode", template_data).await?;

        Email::builder()
            .from(from)
            .to(to)
            .subject(format!("Your {} verification code", context.app_name))
            .html_body(html_body)
            .text_body(text_body)
            .build()
    }
}

/// Confirmation notice sent once an account completes verification.
pub struct AccountVerifiedEmail;

impl AccountVerifiedEmail {
    pub async fn build<T: TemplateEngine>(
        engine: &T,
        from: &str,
        to: &str,
        context: TemplateContext,
    ) -> Result<Email, MailerError> {
        let template_data = TemplateData::new().insert("context", &context)?;

        let html_body = engine
            .render_html("account_verified", template_data.clone())
            .await?;
        let text_body = engine
            .render_text("account_verified", template_data)
            .await?;

        Email::builder()
            .from(from)
            .to(to)
            .subject(format!("Your {} account is verified", context.app_name))
            .html_body(html_body)
            .text_body(text_body)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::AskamaTemplateEngine;

    #[tokio::test]
    async fn test_passcode_email() {
        let engine = AskamaTemplateEngine::new();
        let context = TemplateContext {
            app_name: "Test App".to_string(),
            user_name: Some("John Doe".to_string()),
            user_email: Some("john@example.com".to_string()),
        };

        let email = PasscodeEmail::build(
            &engine,
            "noreply@testapp.com",
            "john@example.com",
            "483920",
            10,
            context,
        )
        .await
        .unwrap();

        assert_eq!(email.to, "john@example.com");
        assert_eq!(email.from, "noreply@testapp.com");
        assert!(email.subject.contains("Test App"));
        assert!(email.html_body.as_deref().unwrap().contains("483920"));
        assert!(email.text_body.is_some());
    }

    #[tokio::test]
    async fn test_account_verified_email() {
        let engine = AskamaTemplateEngine::new();
        let context = TemplateContext {
            app_name: "Test App".to_string(),
            user_name: None,
            user_email: Some("jane@example.com".to_string()),
        };

        let email =
            AccountVerifiedEmail::build(&engine, "noreply@testapp.com", "jane@example.com", context)
                .await
                .unwrap();

        assert!(email.subject.contains("verified"));
        assert!(email.html_body.is_some());
    }
}
