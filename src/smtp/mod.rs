//! Outgoing mail transport.
//!
//! The service only sees [`MailTransport`]. Which implementation sits behind it
//! is decided once at startup: [`SmtpMailer`] when an SMTP host is configured,
//! [`OfflineMailer`] otherwise.

use crate::error::TransportError;
use async_trait::async_trait;
use tracing::info;

mod mailer;

pub use mailer::{SmtpMailer, SmtpSettings, TlsMode};

/// Addressing and content handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub subject: String,
    pub body: String,
    pub html: bool,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Attempt delivery. No retries.
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError>;

    fn is_configured(&self) -> bool;
}

/// Stand-in used when no SMTP host is configured. Logs and drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineMailer;

#[async_trait]
impl MailTransport for OfflineMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        info!(to = %envelope.to, subject = %envelope.subject, "offline mode: not delivering");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        false
    }
}
