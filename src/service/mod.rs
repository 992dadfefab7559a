//! Email lifecycle: composing, sending, drafting, querying and deleting records.

use crate::{
    db::EmailStore,
    error::ServiceError,
    models::{
        email::{
            db_email::DbEmail, email_status::EmailStatus, email_type::EmailType,
            new_email::NewEmail,
        },
        request::email_request::EmailRequest,
    },
    smtp::{Envelope, MailTransport},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Status written for a send whose delivery attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the attempt as SENT anyway. Callers cannot tell it apart from a
    /// delivered message; only the logs show the failure.
    #[default]
    RecordSent,
    RecordFailed,
}

impl FailurePolicy {
    fn status(self) -> EmailStatus {
        match self {
            FailurePolicy::RecordSent => EmailStatus::Sent,
            FailurePolicy::RecordFailed => EmailStatus::Failed,
        }
    }
}

#[derive(Clone)]
pub struct EmailService {
    store: EmailStore,
    transport: Arc<dyn MailTransport>,
    from: String,
    on_failure: FailurePolicy,
}

impl EmailService {
    pub fn new(
        store: EmailStore,
        transport: Arc<dyn MailTransport>,
        from: impl Into<String>,
        on_failure: FailurePolicy,
    ) -> Self {
        Self {
            store,
            transport,
            from: from.into(),
            on_failure,
        }
    }

    /// Compose a SENT record, try to deliver it and persist the outcome.
    ///
    /// Delivery failures are logged and never returned. The stored record is
    /// then a fresh one without cc/bcc whose status comes from the
    /// [`FailurePolicy`].
    pub async fn send_email(&self, req: &EmailRequest) -> Result<DbEmail, ServiceError> {
        let sent_at = Utc::now();
        let email = NewEmail::outgoing(&self.from, &req.to, &req.subject, req.body(), sent_at)
            .with_copies(req.cc.clone(), req.bcc.clone());

        if !self.transport.is_configured() {
            info!(to = %req.to, "transport not configured, recording send without delivery");
            return Ok(self.store.save(email.with_status(EmailStatus::Sent)).await?);
        }

        match self.transport.send(&self.envelope(req)).await {
            Ok(()) => {
                info!(to = %req.to, "email delivered");
                Ok(self.store.save(email.with_status(EmailStatus::Sent)).await?)
            }
            Err(e) => {
                error!(to = %req.to, "email delivery failed: {e}");
                let fallback =
                    NewEmail::outgoing(&self.from, &req.to, &req.subject, req.body(), sent_at)
                        .with_status(self.on_failure.status());
                Ok(self.store.save(fallback).await?)
            }
        }
    }

    /// Store a new DRAFT record. Every call creates a separate row.
    pub async fn save_as_draft(&self, req: &EmailRequest) -> Result<DbEmail, ServiceError> {
        let draft = NewEmail {
            from_email: self.from.clone(),
            to_email: req.to.clone(),
            cc_email: req.cc.clone(),
            bcc_email: req.bcc.clone(),
            subject: req.subject.clone(),
            body: req.body().to_string(),
            sent_date: None,
            received_date: None,
            status: EmailStatus::Draft,
            kind: EmailType::Draft,
        };
        Ok(self.store.save(draft).await?)
    }

    pub async fn get_all_emails(&self) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_sent_emails(&self) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self.store.find_by_type(EmailType::Sent).await?)
    }

    pub async fn get_received_emails(&self) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self.store.find_by_type(EmailType::Received).await?)
    }

    pub async fn get_draft_emails(&self) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self
            .store
            .find_by_status_and_type(EmailStatus::Draft, EmailType::Draft)
            .await?)
    }

    pub async fn get_emails_by_address(&self, address: &str) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self.store.find_by_address(address).await?)
    }

    pub async fn get_emails_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DbEmail>, ServiceError> {
        Ok(self.store.find_between_dates(start, end).await?)
    }

    pub async fn get_email_by_id(&self, id: i64) -> Result<Option<DbEmail>, ServiceError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Delete by id. Unknown ids are not an error.
    pub async fn delete_email(&self, id: i64) -> Result<(), ServiceError> {
        if !self.store.delete_by_id(id).await? {
            debug!(id, "delete of unknown email id");
        }
        Ok(())
    }

    fn envelope(&self, req: &EmailRequest) -> Envelope {
        Envelope {
            from: self.from.clone(),
            to: req.to.clone(),
            cc: req.cc().map(str::to_string),
            bcc: req.bcc().map(str::to_string),
            subject: req.subject.clone(),
            body: req.body().to_string(),
            html: req.is_html,
        }
    }
}
