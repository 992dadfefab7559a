//! Database row for an email.

use super::{email_status::EmailStatus, email_type::EmailType};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbEmail {
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
    #[sqlx(rename = "email_type")]
    pub kind: EmailType,
}
