//! A record that has not been assigned an id yet.

use super::{email_status::EmailStatus, email_type::EmailType};
use chrono::{DateTime, Utc};

/// Pending insert. The store turns it into a [`DbEmail`](super::db_email::DbEmail)
/// once SQLite hands back the row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmail {
  pub from_email: String,
  pub to_email: String,
  pub cc_email: Option<String>,
  pub bcc_email: Option<String>,
  pub subject: String,
  pub body: String,
  pub sent_date: Option<DateTime<Utc>>,
  pub received_date: Option<DateTime<Utc>>,
  pub status: EmailStatus,
  pub kind: EmailType,
}

impl NewEmail {
  /// Outgoing record stamped with `sent_date`, starting as a draft.
  pub fn outgoing(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    sent_date: DateTime<Utc>,
  ) -> Self {
    NewEmail {
      from_email: from.to_string(),
      to_email: to.to_string(),
      cc_email: None,
      bcc_email: None,
      subject: subject.to_string(),
      body: body.to_string(),
      sent_date: Some(sent_date),
      received_date: None,
      status: EmailStatus::Draft,
      kind: EmailType::Sent,
    }
  }

  pub fn with_copies(mut self, cc: Option<String>, bcc: Option<String>) -> Self {
    self.cc_email = cc;
    self.bcc_email = bcc;
    self
  }

  pub fn with_status(mut self, status: EmailStatus) -> Self {
    self.status = status;
    self
  }
}
