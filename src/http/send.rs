//! Handlers for sending and drafting messages via REST.

use crate::{
  app::AppState,
  models::{email::api_email::ApiEmail, request::email_request::EmailRequest},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

pub async fn send_email(
  State(state): State<AppState>,
  Json(req): Json<EmailRequest>,
) -> impl IntoResponse {
  match state.emails.send_email(&req).await {
    Ok(email) => Json(ApiEmail::from(email)).into_response(),
    Err(e) => {
      error!("send_email error: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}

pub async fn save_draft(
  State(state): State<AppState>,
  Json(req): Json<EmailRequest>,
) -> impl IntoResponse {
  match state.emails.save_as_draft(&req).await {
    Ok(email) => Json(ApiEmail::from(email)).into_response(),
    Err(e) => {
      error!("save_draft error: {e}");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}
