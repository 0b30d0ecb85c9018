//! Email delivery: SendGrid, or the log when no API key is configured.

use async_trait::async_trait;

use blog_core::ports::{Email, MailError, Mailer};

/// SendGrid v3 settings.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl SendGridConfig {
    /// `None` when `MAIL_KEY` is not set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: std::env::var("MAIL_KEY").ok()?,
            endpoint: std::env::var("MAIL_ENDPOINT")
                .unwrap_or_else(|_| "https://api.sendgrid.com/v3/mail/send".to_string()),
        })
    }
}

/// Sends mail through the SendGrid v3 HTTP API.
pub struct SendGridMailer {
    config: SendGridConfig,
    client: reqwest::Client,
}

impl SendGridMailer {
    pub fn new(config: SendGridConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn payload(email: &Email) -> serde_json::Value {
        serde_json::json!({
            "personalizations": [{ "to": [{ "email": email.to }] }],
            "from": { "email": email.from },
            "subject": email.subject,
            "content": [{ "type": "text/html", "value": email.html }],
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&Self::payload(&email))
            .send()
            .await
            .map_err(|e| MailError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(subject = %email.subject, "Email accepted by SendGrid");
        Ok(())
    }
}

/// Mailer that only logs - for development without a mail provider.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            html = %email.html,
            "Mail provider not configured, email logged instead of sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let email = Email {
            from: "blog@example.com".to_string(),
            to: "reader@example.com".to_string(),
            subject: "Hello".to_string(),
            html: "<p>hi</p>".to_string(),
        };

        let payload = SendGridMailer::payload(&email);

        assert_eq!(
            payload["personalizations"][0]["to"][0]["email"],
            "reader@example.com"
        );
        assert_eq!(payload["from"]["email"], "blog@example.com");
        assert_eq!(payload["content"][0]["type"], "text/html");
        assert_eq!(payload["content"][0]["value"], "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let email = Email {
            from: "a@example.com".to_string(),
            to: "b@example.com".to_string(),
            subject: "s".to_string(),
            html: String::new(),
        };

        assert!(LogMailer.send(email).await.is_ok());
    }
}
