//! SMTP delivery through lettre.

use super::{Envelope, MailTransport};
use crate::error::TransportError;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{debug, info};

/// How the connection to the relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Plain connection upgraded with STARTTLS (port 587).
    StartTls,
    /// Implicit TLS from the first byte (port 465).
    Wrapper,
    /// No TLS. Only for local capture servers.
    None,
}

impl TlsMode {
    pub fn default_port(self) -> u16 {
        match self {
            TlsMode::StartTls => 587,
            TlsMode::Wrapper => 465,
            TlsMode::None => 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: TlsMode,
    pub timeout: Duration,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let builder = match settings.tls {
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            TlsMode::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            TlsMode::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
            }
        };
        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            // app passwords are often pasted with spaces
            let pass: String = pass.chars().filter(|c| !c.is_whitespace()).collect();
            builder = builder.credentials(Credentials::new(user.clone(), pass));
        }
        info!(
            host = %settings.host,
            port = settings.port,
            tls = ?settings.tls,
            "smtp transport configured"
        );
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, envelope: &Envelope) -> Result<(), TransportError> {
        let message = build_message(envelope)?;
        let response = self.transport.send(message).await?;
        debug!(to = %envelope.to, code = %response.code(), "smtp accepted message");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Compose the MIME message for an envelope. The body is `text/html` when
/// `envelope.html` is set and `text/plain` otherwise.
pub fn build_message(envelope: &Envelope) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&envelope.from)?)
        .subject(envelope.subject.clone());
    for mailbox in parse_list(&envelope.to)? {
        builder = builder.to(mailbox);
    }
    if let Some(cc) = envelope.cc.as_deref() {
        for mailbox in parse_list(cc)? {
            builder = builder.cc(mailbox);
        }
    }
    if let Some(bcc) = envelope.bcc.as_deref() {
        for mailbox in parse_list(bcc)? {
            builder = builder.bcc(mailbox);
        }
    }

    let part = if envelope.html {
        SinglePart::html(envelope.body.clone())
    } else {
        SinglePart::plain(envelope.body.clone())
    };
    Ok(builder.singlepart(part)?)
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, TransportError> {
    let raw = raw.trim();
    raw.parse().map_err(|source| TransportError::Address {
        address: raw.to_string(),
        source,
    })
}

/// Comma-separated address list; blank entries are skipped.
fn parse_list(raw: &str) -> Result<Vec<Mailbox>, TransportError> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_mailbox)
        .collect()
}
