use crate::request::CreateRequestError;
use std::collections::BTreeSet;
use tracing::{debug, warn};

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// Parses a comma separated list of zones. Entries are trimmed, and an
/// entry that is empty after trimming makes the whole list invalid.
pub fn zones_to_set(zones: &str) -> Result<BTreeSet<String>, CreateRequestError> {
  zones
    .split(',')
    .map(|zone| match zone.trim() {
      "" => Err(CreateRequestError::EmptyZone(zones.to_owned())),
      zone => Ok(zone.to_owned()),
    })
    .collect()
}

/// Picks a zone for a volume based on the claim name, so that volumes are
/// spread over the zones while the choice for a given name stays stable.
///
/// Names that look like StatefulSet claims (`ClaimName-SetName-Id`) hash only
/// `SetName` and offset the pick by `Id`: claims of one set member land in the
/// same zone, and consecutive members round-robin across zones.
pub fn choose_zone_for_volume<'a>(zones: &'a BTreeSet<String>, claim_name: &str) -> Option<&'a str> {
  if zones.is_empty() {
    return None;
  }

  let (hash, index) = claim_hash_and_index(claim_name);
  let pick = hash.wrapping_add(index) % zones.len() as u32;
  zones.iter().nth(pick as usize).map(String::as_str)
}

fn claim_hash_and_index(claim_name: &str) -> (u32, u32) {
  if claim_name.is_empty() {
    warn!("No claim name defined during volume create; zone choice is not spread");
  }

  let mut hashed = claim_name;
  let mut index = 0;
  if let Some(last_dash) = claim_name.rfind('-') {
    let id = &claim_name[last_dash + 1..];
    if let Some(id) = parse_id(id) {
      index = id;
      hashed = &claim_name[..last_dash];
      if let Some(dash) = hashed.rfind('-') {
        hashed = &hashed[dash + 1..];
      }
      debug!(claim_name, index, "Detected StatefulSet-style volume name");
    }
  }

  (fnv1_32(hashed.as_bytes()), index)
}

fn parse_id(id: &str) -> Option<u32> {
  if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }

  id.parse().ok()
}

fn fnv1_32(data: &[u8]) -> u32 {
  data.iter().fold(FNV32_OFFSET_BASIS, |hash, b| {
    hash.wrapping_mul(FNV32_PRIME) ^ u32::from(*b)
  })
}
