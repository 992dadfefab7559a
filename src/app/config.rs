//! Process configuration, resolved once from the environment.

use crate::{
  error::ConfigError,
  service::FailurePolicy,
  smtp::{SmtpSettings, TlsMode},
};
use std::{net::SocketAddr, time::Duration};

pub const DEFAULT_FROM: &str = "default@example.com";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub addr: SocketAddr,
  pub from_address: String,
  pub cors_origin: String,
  pub on_send_failure: FailurePolicy,
  pub seed_demo: bool,
  /// `None` runs the service in offline mode.
  pub smtp: Option<SmtpSettings>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup. Blank values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let database_url = get("PRUNE_DATABASE").unwrap_or_else(|| "sqlite://prune.db".to_string());
    let addr_raw = get("PRUNE_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let addr = addr_raw
      .parse()
      .map_err(|e: std::net::AddrParseError| invalid("PRUNE_ADDR", &addr_raw, e))?;

    let smtp = match get("PRUNE_SMTP_HOST") {
      Some(host) => Some(smtp_settings(host, &get)?),
      None => None,
    };

    let from_address = get("PRUNE_MAIL_FROM")
      .or_else(|| get("PRUNE_SMTP_USER"))
      .unwrap_or_else(|| DEFAULT_FROM.to_string());

    let on_send_failure = match get("PRUNE_SEND_FAILURE_STATUS").as_deref() {
      None => FailurePolicy::default(),
      Some(v) if v.eq_ignore_ascii_case("sent") => FailurePolicy::RecordSent,
      Some(v) if v.eq_ignore_ascii_case("failed") => FailurePolicy::RecordFailed,
      Some(v) => return Err(invalid("PRUNE_SEND_FAILURE_STATUS", v, "expected sent or failed")),
    };

    let seed_demo = match get("PRUNE_SEED_DEMO") {
      None => false,
      Some(v) => {
        parse_bool(&v).ok_or_else(|| invalid("PRUNE_SEED_DEMO", &v, "expected a boolean"))?
      }
    };

    Ok(AppConfig {
      database_url,
      addr,
      from_address,
      cors_origin: get("PRUNE_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
      on_send_failure,
      seed_demo,
      smtp,
    })
  }
}

fn smtp_settings(
  host: String,
  get: &impl Fn(&str) -> Option<String>,
) -> Result<SmtpSettings, ConfigError> {
  let tls = match get("PRUNE_SMTP_TLS").as_deref().map(str::to_ascii_lowercase).as_deref() {
    None | Some("starttls") => TlsMode::StartTls,
    Some("wrapper") | Some("tls") => TlsMode::Wrapper,
    Some("none") => TlsMode::None,
    Some(other) => {
      return Err(invalid("PRUNE_SMTP_TLS", other, "expected starttls, wrapper or none"));
    }
  };
  let port = match get("PRUNE_SMTP_PORT") {
    Some(v) => v.parse().map_err(|e: std::num::ParseIntError| invalid("PRUNE_SMTP_PORT", &v, e))?,
    None => tls.default_port(),
  };
  let timeout = match get("PRUNE_SMTP_TIMEOUT_SECS") {
    Some(v) => Duration::from_secs(
      v.parse()
        .map_err(|e: std::num::ParseIntError| invalid("PRUNE_SMTP_TIMEOUT_SECS", &v, e))?,
    ),
    None => Duration::from_secs(20),
  };
  Ok(SmtpSettings {
    host,
    port,
    username: get("PRUNE_SMTP_USER"),
    password: get("PRUNE_SMTP_PASS"),
    tls,
    timeout,
  })
}

fn parse_bool(v: &str) -> Option<bool> {
  match v.to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
  ConfigError::Invalid {
    var,
    value: value.to_string(),
    reason: reason.to_string(),
  }
}
