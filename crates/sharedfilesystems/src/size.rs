use crate::{
  claim::{ResourceList, ResourceName},
  quantity::{Scale, ScaleError},
  request::CreateRequestError,
};
use std::convert::TryFrom;
use tracing::debug;

/// Reads the `storage` request of a claim as a whole number of GBs.
pub fn storage_size_gb(requests: Option<&ResourceList>) -> Result<u64, CreateRequestError> {
  let quantity = requests
    .and_then(|r| r.get(&ResourceName::STORAGE))
    .ok_or(CreateRequestError::SizeNotConfigured)?;

  if quantity.is_zero() {
    return Err(CreateRequestError::SizeZero);
  }

  if quantity.is_negative() {
    return Err(CreateRequestError::SizeNegative);
  }

  let size = quantity
    .to_scaled(Scale::Giga)
    .map_err(|e| match e {
      ScaleError::Inexact => CreateRequestError::SizeNotWholeGiB,
      ScaleError::Overflow => CreateRequestError::SizeNotInteger,
    })
    .and_then(|v| u64::try_from(v).map_err(|_| CreateRequestError::SizeNotInteger))?;

  debug!(%quantity, size, "Resolved requested storage size");
  Ok(size)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::quantity::Quantity;
  use test_case::test_case;

  fn storage(s: &str) -> ResourceList {
    let mut requests = ResourceList::new();
    requests.insert(ResourceName::STORAGE, s.parse::<Quantity>().unwrap());
    requests
  }

  #[test_case("2G" => Ok(2) ; "two gigabytes")]
  #[test_case("1" => Err(CreateRequestError::SizeNotWholeGiB) ; "one byte")]
  #[test_case("1T" => Ok(1000) ; "one terabyte")]
  #[test_case("2000G" => Ok(2000) ; "large whole size")]
  #[test_case("1953125Ki" => Ok(2) ; "binary units dividing evenly")]
  #[test_case("0G" => Err(CreateRequestError::SizeZero) ; "zero")]
  #[test_case("-0" => Err(CreateRequestError::SizeZero) ; "negative zero")]
  #[test_case("-1G" => Err(CreateRequestError::SizeNegative) ; "negative")]
  #[test_case("2Gi" => Err(CreateRequestError::SizeNotWholeGiB) ; "binary giga")]
  #[test_case("1.5G" => Err(CreateRequestError::SizeNotWholeGiB) ; "fractional")]
  #[test_case("1e30" => Err(CreateRequestError::SizeNotInteger) ; "larger than u64")]
  #[test_case("1e50" => Err(CreateRequestError::SizeNotInteger) ; "overflows scaling")]
  fn size_from_quantity(s: &str) -> Result<u64, CreateRequestError> {
    storage_size_gb(Some(&storage(s)))
  }

  #[test]
  fn size_not_configured() {
    let mut cpu_only = ResourceList::new();
    cpu_only.insert(ResourceName::CPU, "1".parse().unwrap());

    assert_eq!(
      storage_size_gb(None),
      Err(CreateRequestError::SizeNotConfigured)
    );
    assert_eq!(
      storage_size_gb(Some(&ResourceList::new())),
      Err(CreateRequestError::SizeNotConfigured)
    );
    assert_eq!(
      storage_size_gb(Some(&cpu_only)),
      Err(CreateRequestError::SizeNotConfigured)
    );
  }
}
