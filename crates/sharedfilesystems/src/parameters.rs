use crate::{request::CreateRequestError, share::CreateRequest, zones};
use std::collections::HashMap;
use tracing::debug;

/// Storage class parameter holding the availability zone(s) a share may be
/// created in. Parameter names are matched case-insensitively.
pub const ZONES_PARAMETER: &str = "zones";

/// How the `zones` parameter is turned into an availability zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonePolicy {
  /// The parameter value is passed to the service as is.
  Verbatim,

  /// The parameter value is a comma separated list of zones, and one of
  /// them is picked from the claim name.
  ChooseFromList,
}

impl Default for ZonePolicy {
  #[inline]
  fn default() -> Self {
    ZonePolicy::Verbatim
  }
}

/// Applies the storage class parameters to `request`.
pub fn apply_parameters(
  request: &mut CreateRequest,
  parameters: &HashMap<String, String>,
  claim_name: &str,
  policy: ZonePolicy,
) -> Result<(), CreateRequestError> {
  for (key, value) in parameters {
    match &*key.to_lowercase() {
      ZONES_PARAMETER => {
        request.availability_zone = resolve_zone(value, claim_name, policy)?;
        debug!(zone = %request.availability_zone, ?policy, "Resolved availability zone");
      }
      _ => return Err(CreateRequestError::UnrecognizedParameter(key.clone())),
    }
  }

  Ok(())
}

fn resolve_zone(
  value: &str,
  claim_name: &str,
  policy: ZonePolicy,
) -> Result<String, CreateRequestError> {
  match policy {
    ZonePolicy::Verbatim => Ok(value.to_owned()),
    ZonePolicy::ChooseFromList => {
      let set = zones::zones_to_set(value)?;
      zones::choose_zone_for_volume(&set, claim_name)
        .map(str::to_owned)
        .ok_or_else(|| CreateRequestError::EmptyZone(value.to_owned()))
    }
  }
}
