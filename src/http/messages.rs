//! Read and delete APIs over stored emails.

use crate::{
  app::AppState,
  error::ServiceError,
  models::email::{api_email::ApiEmail, db_email::DbEmail},
};
use axum::{
  Json,
  extract::{Path as AxumPath, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

fn list_response(what: &str, rows: Result<Vec<DbEmail>, ServiceError>) -> Response {
  match rows {
    Ok(rows) => {
      let out: Vec<ApiEmail> = rows.into_iter().map(ApiEmail::from).collect();
      Json(out).into_response()
    }
    Err(e) => {
      error!("{what} error: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}

pub async fn list_emails(State(state): State<AppState>) -> Response {
  list_response("list_emails", state.emails.get_all_emails().await)
}

pub async fn list_sent(State(state): State<AppState>) -> Response {
  list_response("list_sent", state.emails.get_sent_emails().await)
}

pub async fn list_received(State(state): State<AppState>) -> Response {
  list_response("list_received", state.emails.get_received_emails().await)
}

pub async fn list_drafts(State(state): State<AppState>) -> Response {
  list_response("list_drafts", state.emails.get_draft_emails().await)
}

pub async fn list_by_address(
  State(state): State<AppState>,
  AxumPath(email): AxumPath<String>,
) -> Response {
  list_response(
    "list_by_address",
    state.emails.get_emails_by_address(&email).await,
  )
}

/// Emails whose sent date lies in `[start, end]` (RFC 3339 query parameters).
pub async fn list_between(
  State(state): State<AppState>,
  Query(range): Query<RangeParams>,
) -> Response {
  list_response(
    "list_between",
    state.emails.get_emails_between(range.start, range.end).await,
  )
}

pub async fn get_email(State(state): State<AppState>, AxumPath(id): AxumPath<i64>) -> Response {
  match state.emails.get_email_by_id(id).await {
    Ok(Some(email)) => Json(ApiEmail::from(email)).into_response(),
    Ok(None) => StatusCode::NOT_FOUND.into_response(),
    Err(e) => {
      error!("get_email error: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}

pub async fn delete_email(
  State(state): State<AppState>,
  AxumPath(id): AxumPath<i64>,
) -> StatusCode {
  match state.emails.delete_email(id).await {
    Ok(()) => StatusCode::NO_CONTENT,
    Err(e) => {
      error!("delete_email error: {e}");
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}
