//! Sample records for local development.

use super::EmailStore;
use crate::models::email::{email_status::EmailStatus, email_type::EmailType, new_email::NewEmail};
use chrono::{Duration, Utc};
use tracing::info;

const OWNER: &str = "admin@prune.test";

/// Insert six sample records when the table is empty. Returns how many were inserted.
pub async fn seed_demo_data(store: &EmailStore) -> Result<usize, sqlx::Error> {
    if store.count().await? > 0 {
        info!("demo seed skipped: emails table is not empty");
        return Ok(0);
    }

    let now = Utc::now();
    let received =
        |from: &str, subject: &str, body: &str, ago: Duration, status: EmailStatus| NewEmail {
            from_email: from.to_string(),
            to_email: OWNER.to_string(),
            cc_email: None,
            bcc_email: None,
            subject: subject.to_string(),
            body: body.to_string(),
            sent_date: None,
            received_date: Some(now - ago),
            status,
            kind: EmailType::Received,
        };
    let draft = |to: &str, cc: Option<&str>, subject: &str, body: &str| {
        let mut e = NewEmail::outgoing(OWNER, to, subject, body, now)
            .with_copies(cc.map(str::to_string), None);
        e.sent_date = None;
        e.kind = EmailType::Draft;
        e
    };

    let rows = vec![
        NewEmail::outgoing(
            OWNER,
            "john.doe@example.com",
            "Welcome to Prune",
            "Hello John,\n\nWe are glad to have you on board.\n\nThe Prune team",
            now - Duration::days(2),
        )
        .with_status(EmailStatus::Sent),
        NewEmail::outgoing(
            OWNER,
            "sarah.martin@example.org",
            "Monthly report",
            "Hi Sarah,\n\nPlease find this month's activity report below.\n\nAdmin",
            now - Duration::days(1),
        )
        .with_copies(Some("manager@example.org".into()), None)
        .with_status(EmailStatus::Sent),
        received(
            "client@business.example",
            "Support request",
            "Hello,\n\nI have a question about the application.\n\nThanks",
            Duration::hours(3),
            EmailStatus::Unread,
        ),
        received(
            "newsletter@techworld.example",
            "Tech World newsletter",
            "This week:\n\n- Machine learning\n- Cloud computing\n- Web development",
            Duration::hours(12),
            EmailStatus::Read,
        ),
        draft(
            "partner@startup.example",
            None,
            "Partnership proposal",
            "Dear partner,\n\nWe would like to explore working together.\n\n[DRAFT]",
        ),
        draft(
            "marketing@agency.example",
            Some("ceo@agency.example"),
            "Q1 campaign",
            "Hello,\n\nLet's talk about an advertising campaign.\n\n[TO COMPLETE]",
        ),
    ];

    let inserted = rows.len();
    for row in rows {
        store.save(row).await?;
    }
    let total = store.count().await?;
    info!(inserted, total, "seeded demo emails");
    Ok(inserted)
}
