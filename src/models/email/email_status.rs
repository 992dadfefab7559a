//! Delivery/reading status of a record.

use serde::{Deserialize, Serialize};

/// Status stored with every record.
///
/// This is a plain tag. Nothing validates transitions between values, and it is
/// not cross-checked against [`EmailType`](super::email_type::EmailType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum EmailStatus {
  Draft,
  Sent,
  Delivered,
  Failed,
  Read,
  Unread,
}
