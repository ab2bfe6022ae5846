use crate::{MailerError, templates::TemplateData};
use askama::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    pub app_name: String,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self {
            app_name: "Your App".to_string(),
            user_email: None,
            user_name: None,
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Verification Code - {{ app_name }}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 20px; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; }
        .code { font-size: 32px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 16px; background: #f8f9fa; border-radius: 4px; font-family: monospace; margin: 20px 0; }
        .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ app_name }}</h1>
        </div>

        <h2>Your Verification Code</h2>

        <p>{% if let Some(name) = user_name %}Hello {{ name }},{% else %}Hello,{% endif %}</p>

        <p>Use the code below to continue. It expires in {{ ttl_minutes }} minutes.</p>

        <div class="code">{{ code }}</div>

        <p>If you didn't request a code, you can safely ignore this email.</p>

        <div class="footer">
            <p>This email was sent by {{ app_name }}. Never share this code with anyone.</p>
        </div>
    </div>
</body>
</html>
"#,
    ext = "html"
)]
pub struct PasscodeTemplate {
    pub app_name: String,
    pub user_name: Option<String>,
    pub code: String,
    pub ttl_minutes: i64,
}

impl PasscodeTemplate {
    pub fn from_data(data: TemplateData) -> Result<Self, MailerError> {
        let context: TemplateContext = data
            .get("context")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        let code = data
            .get("code")
            .and_then(|v| v.as_str())
            .ok_or_else(|| MailerError::Builder("code is required".to_string()))?
            .to_string();

        let ttl_minutes = data
            .get("ttl_minutes")
            .and_then(|v| v.as_i64())
            .unwrap_or(10);

        Ok(Self {
            app_name: context.app_name,
            user_name: context.user_name,
            code,
            ttl_minutes,
        })
    }
}

#[derive(Template)]
#[template(
    source = r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Account Verified - {{ app_name }}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 20px; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; }
        .footer { margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ app_name }}</h1>
        </div>

        <h2>Your Account Is Verified</h2>

        <p>{% if let Some(name) = user_name %}Hello {{ name }},{% else %}Hello,{% endif %}</p>

        <p>Your account has been verified successfully. No further action is needed.</p>

        <p>If this wasn't you, please contact support immediately.</p>

        <div class="footer">
            <p>This email was sent by {{ app_name }}.</p>
        </div>
    </div>
</body>
</html>
"#,
    ext = "html"
)]
pub struct AccountVerifiedTemplate {
    pub app_name: String,
    pub user_name: Option<String>,
}

impl AccountVerifiedTemplate {
    pub fn from_data(data: TemplateData) -> Result<Self, MailerError> {
        let context: TemplateContext = data
            .get("context")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();

        Ok(Self {
            app_name: context.app_name,
            user_name: context.user_name,
        })
    }
}
