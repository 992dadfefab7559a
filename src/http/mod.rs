//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  Router,
  http::{HeaderValue, Method, header::InvalidHeaderValue},
  routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod messages;
pub mod send;

/// Assemble the HTTP router with all routes under `/api/emails`.
///
/// Cross-origin requests are accepted from `cors_origin` only; other origins get no
/// `access-control-allow-origin` header back.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, InvalidHeaderValue> {
  let origin = if cors_origin == "*" {
    AllowOrigin::any()
  } else {
    AllowOrigin::list([cors_origin.parse::<HeaderValue>()?])
  };
  let cors = CorsLayer::new()
    .allow_origin(origin)
    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
    .allow_headers(Any);

  let emails = Router::new()
    .route("/", get(messages::list_emails))
    .route("/send", post(send::send_email))
    .route("/draft", post(send::save_draft))
    .route("/sent", get(messages::list_sent))
    .route("/received", get(messages::list_received))
    .route("/drafts", get(messages::list_drafts))
    .route("/between", get(messages::list_between))
    .route("/address/:email", get(messages::list_by_address))
    .route(
      "/:id",
      get(messages::get_email).delete(messages::delete_email),
    );

  Ok(
    Router::new()
      .nest("/api/emails", emails)
      .layer(cors)
      .with_state(state),
  )
}
