use crate::{MailerError, templates::TemplateData};
use askama::Template;
use async_trait::async_trait;

#[async_trait]
pub trait TemplateEngine: Send + Sync {
    async fn render(&self, template_name: &str, data: TemplateData) -> Result<String, MailerError>;
    async fn render_html(
        &self,
        template_name: &str,
        data: TemplateData,
    ) -> Result<String, MailerError>;
    async fn render_text(
        &self,
        template_name: &str,
        data: TemplateData,
    ) -> Result<String, MailerError>;
}

/// Engine backed by askama templates compiled into the crate.
#[derive(Debug, Clone, Default)]
pub struct AskamaTemplateEngine;

impl AskamaTemplateEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateEngine for AskamaTemplateEngine {
    async fn render(&self, template_name: &str, data: TemplateData) -> Result<String, MailerError> {
        self.render_html(template_name, data).await
    }

    async fn render_html(
        &self,
        template_name: &str,
        data: TemplateData,
    ) -> Result<String, MailerError> {
        match template_name {
            "passcode" => {
                let template = crate::templates::PasscodeTemplate::from_data(data)?;
                Ok(template.render()?)
            }
            "account_verified" => {
                let template = crate::templates::AccountVerifiedTemplate::from_data(data)?;
                Ok(template.render()?)
            }
            _ => Err(MailerError::Builder(format!(
                "Unknown template: {template_name}"
            ))),
        }
    }

    async fn render_text(
        &self,
        template_name: &str,
        data: TemplateData,
    ) -> Result<String, MailerError> {
        // Text bodies are derived from the HTML rendering rather than kept as
        // separate templates.
        let html = self.render_html(template_name, data).await?;

        let text = html
            .replace("<br>", "\n")
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</div>", "\n")
            .replace("</h1>", "\n\n")
            .replace("</h2>", "\n\n");

        let text = regex::Regex::new(r"<[^>]*>")
            .map_err(|e| MailerError::Builder(format!("Regex error: {e}")))?
            .replace_all(&text, "");

        let text = regex::Regex::new(r"\n\s*\n")
            .map_err(|e| MailerError::Builder(format!("Regex error: {e}")))?
            .replace_all(&text, "\n\n");

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_passcode() {
        let engine = AskamaTemplateEngine::new();
        let context = crate::templates::TemplateContext {
            app_name: "Test App".to_string(),
            user_name: Some("John Doe".to_string()),
            user_email: Some("john@example.com".to_string()),
        };
        let data = TemplateData::new()
            .insert("context", &context)
            .unwrap()
            .insert("code", "483920")
            .unwrap()
            .insert("ttl_minutes", 10)
            .unwrap();

        let html = engine.render("passcode", data.clone()).await.unwrap();
        assert!(html.contains("483920"));
        assert!(html.contains("Test App"));
        assert!(html.contains("10 minutes"));

        let text = engine.render_text("passcode", data).await.unwrap();
        assert!(text.contains("483920"));
        assert!(!text.contains("<div"));
    }

    #[tokio::test]
    async fn test_render_unknown_template() {
        let engine = AskamaTemplateEngine::new();
        let result = engine.render("no_such_template", TemplateData::new()).await;
        assert!(result.is_err());
    }
}
