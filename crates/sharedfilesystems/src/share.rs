use serde::{Deserialize, Serialize};
use std::fmt;

/// Share protocols this provisioner can request. Only NFS shares are
/// provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareProtocol {
  #[serde(rename = "NFS")]
  Nfs,
}

impl ShareProtocol {
  #[inline]
  pub fn as_str(self) -> &'static str {
    match self {
      ShareProtocol::Nfs => "NFS",
    }
  }
}

impl Default for ShareProtocol {
  #[inline]
  fn default() -> Self {
    ShareProtocol::Nfs
  }
}

impl fmt::Display for ShareProtocol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Options for the shared filesystems `POST /shares` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateRequest {
  pub(crate) share_proto: ShareProtocol,
  pub(crate) size: u64,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub(crate) availability_zone: String,
}

impl CreateRequest {
  /// A request with only the protocol filled in.
  #[inline]
  pub fn nfs() -> Self {
    CreateRequest {
      share_proto: ShareProtocol::Nfs,
      ..Default::default()
    }
  }

  #[inline]
  pub fn share_proto(&self) -> ShareProtocol {
    self.share_proto
  }

  /// Share size in GBs. Zero only on a partially built request.
  #[inline]
  pub fn size(&self) -> u64 {
    self.size
  }

  /// The availability zone of the share, empty when the service should
  /// pick one.
  #[inline]
  pub fn availability_zone(&self) -> &str {
    &self.availability_zone
  }

  /// Renders the JSON request body, `{"share": {...}}`.
  pub fn to_body(&self) -> serde_json::Value {
    serde_json::json!({ "share": self })
  }
}

/// A share as reported back by the shared filesystems service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Share {
  id: String,
  #[serde(default)]
  name: Option<String>,
  size: u64,
  #[serde(default)]
  availability_zone: Option<String>,
  #[serde(default)]
  status: String,
}

#[derive(Deserialize)]
struct ShareBody {
  share: Share,
}

impl Share {
  pub fn new(id: impl Into<String>, size: u64) -> Self {
    Share {
      id: id.into(),
      name: None,
      size,
      availability_zone: None,
      status: String::from("creating"),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn with_availability_zone(mut self, zone: impl Into<String>) -> Self {
    self.availability_zone = Some(zone.into());
    self
  }

  /// Parses the `{"share": {...}}` body returned by the service.
  pub fn from_body(body: &str) -> Result<Share, serde_json::Error> {
    serde_json::from_str::<ShareBody>(body).map(|b| b.share)
  }

  #[inline]
  pub fn id(&self) -> &str {
    &self.id
  }

  #[inline]
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  #[inline]
  pub fn size(&self) -> u64 {
    self.size
  }

  #[inline]
  pub fn availability_zone(&self) -> Option<&str> {
    self.availability_zone.as_deref()
  }

  #[inline]
  pub fn status(&self) -> &str {
    &self.status
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn body_omits_empty_zone() {
    let request = CreateRequest {
      share_proto: ShareProtocol::Nfs,
      size: 2,
      availability_zone: String::new(),
    };

    assert_eq!(
      request.to_body(),
      json!({ "share": { "share_proto": "NFS", "size": 2 } })
    );
  }

  #[test]
  fn body_with_zone() {
    let request = CreateRequest {
      share_proto: ShareProtocol::Nfs,
      size: 10,
      availability_zone: String::from("nova"),
    };

    assert_eq!(
      request.to_body(),
      json!({ "share": { "share_proto": "NFS", "size": 10, "availability_zone": "nova" } })
    );
  }

  #[test]
  fn parse_service_response() {
    let body = r#"{
      "share": {
        "id": "011d21e2-fbc3-4e4a-9993-9ea223f73264",
        "name": "pv-1",
        "size": 2,
        "availability_zone": "nova",
        "share_proto": "NFS",
        "status": "creating",
        "metadata": {}
      }
    }"#;

    let share = Share::from_body(body).expect("valid body");
    assert_eq!(share.id(), "011d21e2-fbc3-4e4a-9993-9ea223f73264");
    assert_eq!(share.name(), Some("pv-1"));
    assert_eq!(share.size(), 2);
    assert_eq!(share.availability_zone(), Some("nova"));
    assert_eq!(share.status(), "creating");
  }

  #[test]
  fn parse_service_response_with_nulls() {
    let body = r#"{ "share": { "id": "x", "name": null, "size": 1, "availability_zone": null } }"#;

    let share = Share::from_body(body).expect("valid body");
    assert_eq!(share.name(), None);
    assert_eq!(share.availability_zone(), None);
    assert_eq!(share.status(), "");
  }
}
