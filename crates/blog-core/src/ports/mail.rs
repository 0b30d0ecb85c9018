//! Transactional email port.

use async_trait::async_trait;

/// An outgoing HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mailer trait - abstraction over email delivery (SendGrid, console).
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail request failed: {0}")]
    Request(String),

    #[error("Mail provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
