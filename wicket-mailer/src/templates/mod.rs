mod engine;
mod otp_templates;

pub use engine::{AskamaTemplateEngine, TemplateEngine};
pub use otp_templates::{AccountVerifiedTemplate, PasscodeTemplate, TemplateContext};

use crate::MailerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Loosely-typed bag of values handed to a [`TemplateEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateData {
    pub data: HashMap<String, serde_json::Value>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn insert<T: Serialize>(mut self, key: &str, value: T) -> Result<Self, MailerError> {
        self.data
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new()
    }
}
