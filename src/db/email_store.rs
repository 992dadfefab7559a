//! SQLite-backed store for email records.

use crate::models::email::{
    db_email::DbEmail, email_status::EmailStatus, email_type::EmailType, new_email::NewEmail,
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, from_email, to_email, cc_email, bcc_email, subject, body, \
                       sent_date, received_date, status, email_type";

/// Keyed collection of [`DbEmail`] rows. Cheap to clone; it only wraps the pool.
#[derive(Clone)]
pub struct EmailStore {
    db: SqlitePool,
}

impl EmailStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a record and return it with its generated id.
    pub async fn save(&self, email: NewEmail) -> Result<DbEmail, sqlx::Error> {
        let res = sqlx::query(
            "INSERT INTO emails (from_email, to_email, cc_email, bcc_email, subject, body, \
             sent_date, received_date, status, email_type) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&email.from_email)
        .bind(&email.to_email)
        .bind(&email.cc_email)
        .bind(&email.bcc_email)
        .bind(&email.subject)
        .bind(&email.body)
        .bind(email.sent_date)
        .bind(email.received_date)
        .bind(email.status)
        .bind(email.kind)
        .execute(&self.db)
        .await?;

        Ok(DbEmail {
            id: res.last_insert_rowid(),
            from_email: email.from_email,
            to_email: email.to_email,
            cc_email: email.cc_email,
            bcc_email: email.bcc_email,
            subject: email.subject,
            body: email.body,
            sent_date: email.sent_date,
            received_date: email.received_date,
            status: email.status,
            kind: email.kind,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!("SELECT {COLUMNS} FROM emails WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    /// Returns whether a row was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM emails WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn find_all(&self) -> Result<Vec<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!("SELECT {COLUMNS} FROM emails ORDER BY id"))
            .fetch_all(&self.db)
            .await
    }

    /// Records of one type, newest `sent_date` first. Rows without a sent date sort last.
    pub async fn find_by_type(&self, kind: EmailType) -> Result<Vec<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!(
            "SELECT {COLUMNS} FROM emails WHERE email_type = ? \
             ORDER BY sent_date DESC, received_date DESC, id DESC"
        ))
        .bind(kind)
        .fetch_all(&self.db)
        .await
    }

    /// Records sent to or from `address`, newest activity first.
    pub async fn find_by_address(&self, address: &str) -> Result<Vec<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!(
            "SELECT {COLUMNS} FROM emails WHERE to_email = ? OR from_email = ? \
             ORDER BY coalesce(sent_date, received_date) DESC, id DESC"
        ))
        .bind(address)
        .bind(address)
        .fetch_all(&self.db)
        .await
    }

    pub async fn find_by_status_and_type(
        &self,
        status: EmailStatus,
        kind: EmailType,
    ) -> Result<Vec<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!(
            "SELECT {COLUMNS} FROM emails WHERE status = ? AND email_type = ? ORDER BY id"
        ))
        .bind(status)
        .bind(kind)
        .fetch_all(&self.db)
        .await
    }

    /// Records whose `sent_date` falls within `[start, end]`, newest first.
    pub async fn find_between_dates(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DbEmail>, sqlx::Error> {
        sqlx::query_as::<_, DbEmail>(&format!(
            "SELECT {COLUMNS} FROM emails WHERE sent_date BETWEEN ? AND ? \
             ORDER BY sent_date DESC, id DESC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM emails")
            .fetch_one(&self.db)
            .await
    }
}
