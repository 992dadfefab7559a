//! API representation of an email.

use super::{db_email::DbEmail, email_status::EmailStatus, email_type::EmailType};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEmail {
  pub id: i64,
  pub from_email: String,
  pub to_email: String,
  pub cc_email: Option<String>,
  pub bcc_email: Option<String>,
  pub subject: String,
  pub body: String,
  pub sent_date: Option<DateTime<Utc>>,
  pub received_date: Option<DateTime<Utc>>,
  pub status: EmailStatus,
  #[serde(rename = "type")]
  pub kind: EmailType,
}

impl From<DbEmail> for ApiEmail {
  fn from(d: DbEmail) -> Self {
    ApiEmail {
      id: d.id,
      from_email: d.from_email,
      to_email: d.to_email,
      cc_email: d.cc_email,
      bcc_email: d.bcc_email,
      subject: d.subject,
      body: d.body,
      sent_date: d.sent_date,
      received_date: d.received_date,
      status: d.status,
      kind: d.kind,
    }
  }
}
