//! Body accepted by the send and draft endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
  pub to: String,
  #[serde(default)]
  pub cc: Option<String>,
  #[serde(default)]
  pub bcc: Option<String>,
  pub subject: String,
  /// Missing and `null` both mean an empty body.
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default, alias = "html")]
  pub is_html: bool,
}

impl EmailRequest {
  /// Cc with blank values treated as absent.
  pub fn cc(&self) -> Option<&str> {
    non_blank(self.cc.as_deref())
  }

  pub fn bcc(&self) -> Option<&str> {
    non_blank(self.bcc.as_deref())
  }

  pub fn body(&self) -> &str {
    self.body.as_deref().unwrap_or_default()
  }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
  v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_minimal_body_and_html_alias() {
    let req: EmailRequest =
      serde_json::from_str(r#"{"to":"a@b.com","subject":"Hi","html":true}"#).unwrap();
    assert_eq!(req.body(), "");
    assert!(req.is_html);
    assert!(req.cc().is_none());

    let raw = r#"{"to":"a@b.com","subject":"Hi","body":"x","isHtml":false,"cc":"  "}"#;
    let req: EmailRequest = serde_json::from_str(raw).unwrap();
    assert_eq!(req.body(), "x");
    assert!(!req.is_html);
    assert!(req.cc().is_none());
  }

  #[test]
  fn null_body_reads_as_empty() {
    let req: EmailRequest =
      serde_json::from_str(r#"{"to":"a@b.com","subject":"Hi","body":null}"#).unwrap();
    assert!(req.body.is_none());
    assert_eq!(req.body(), "");
  }

  #[test]
  fn rejects_missing_recipient() {
    assert!(serde_json::from_str::<EmailRequest>(r#"{"subject":"Hi"}"#).is_err());
  }
}
