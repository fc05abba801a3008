use serde::Serialize;

use crate::error::{FolioError, FolioResult};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// The three identifiers the delivery API needs, supplied only through
/// the environment. Read at submit time so a fixed environment does not
/// require a restart; a missing variable fails the send, which the form
/// surfaces as the generic failure banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl MailConfig {
    pub fn from_env() -> FolioResult<Self> {
        Ok(Self {
            service_id: require_env("EMAILJS_SERVICE_ID")?,
            template_id: require_env("EMAILJS_TEMPLATE_ID")?,
            public_key: require_env("EMAILJS_PUBLIC_KEY")?,
        })
    }
}

fn require_env(name: &str) -> FolioResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(FolioError::config(format!("{name} is not set"))),
    }
}

/// A validated contact-form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub user_name: String,
    pub user_email: String,
    pub user_message: String,
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a Message,
}

/// Delivery seam. The real implementation talks to EmailJS; tests
/// substitute a recording double.
pub trait Mailer: Send + Sync {
    fn deliver(&self, config: &MailConfig, message: &Message) -> FolioResult<()>;
}

/// EmailJS REST delivery. One POST, no retry; any non-success status is
/// an error the form renders as the generic failure banner.
pub struct EmailJs {
    client: reqwest::blocking::Client,
}

impl EmailJs {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for EmailJs {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailer for EmailJs {
    fn deliver(&self, config: &MailConfig, message: &Message) -> FolioResult<()> {
        let request = EmailJsRequest {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: message,
        };
        let response = self.client.post(EMAILJS_ENDPOINT).json(&request).send()?;
        if !response.status().is_success() {
            return Err(FolioError::mail(format!(
                "delivery rejected with HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}
