//! Database helpers: migrations, path handling and demo data.

use sqlx::SqlitePool;
use std::path::Path;

mod email_store;
mod seed;

pub use email_store::EmailStore;
pub use seed::seed_demo_data;

/// Run SQLite migrations to create tables if absent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS emails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            from_email TEXT NOT NULL,
            to_email TEXT NOT NULL,
            cc_email TEXT NULL,
            bcc_email TEXT NULL,
            subject TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            sent_date TEXT NULL,
            received_date TEXT NULL,
            status TEXT NOT NULL,
            email_type TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    for ddl in [
        "CREATE INDEX IF NOT EXISTS idx_emails_type ON emails (email_type)",
        "CREATE INDEX IF NOT EXISTS idx_emails_status_type ON emails (status, email_type)",
        "CREATE INDEX IF NOT EXISTS idx_emails_sent_date ON emails (sent_date)",
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
    if !db_url.starts_with("sqlite:") {
        return db_url.to_string();
    }
    let path_part = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if path_part.is_empty() || path_part.starts_with(":memory:") {
        return db_url.to_string();
    }
    let path_only = match path_part.split_once('?') {
        Some((p, _)) => p,
        None => path_part,
    };
    if !path_only.is_empty() {
        let p = Path::new(path_only);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        let _ = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(p);
    }
    db_url.to_string()
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite://:memory:")
        .await
        .expect("connect memory sqlite");
    run_migrations(&pool).await.expect("migrate");
    pool
}
