use crate::{
  claim::VolumeOptions,
  parameters::ZonePolicy,
  request::{CreateRequestError, RequestBuilder},
  share::{CreateRequest, Share},
  utils::{Record, RecordOutcome},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// The shared filesystems service shares are created on.
#[async_trait]
pub trait ShareService: Send + Sync + 'static {
  /// Creates a share called `name`. Implementations send the request as
  /// is; it has already been validated.
  async fn create_share(&self, name: &str, request: CreateRequest)
    -> Result<Share, ShareServiceError>;
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShareServiceError {
  /// Indicates that the project has no quota left for the requested share.
  #[error("Share quota exceeded: {0}")]
  QuotaExceeded(String),

  /// Indicates that the requested availability zone does not exist.
  #[error("Availability zone not found: {0}")]
  ZoneNotFound(String),

  #[error(transparent)]
  #[doc(hidden)]
  Other(#[from] tonic::Status),
}

impl From<ShareServiceError> for tonic::Status {
  fn from(value: ShareServiceError) -> Self {
    use tonic::{Code, Status};

    match value {
      ShareServiceError::QuotaExceeded(v) => Status::new(Code::ResourceExhausted, v),
      ShareServiceError::ZoneNotFound(v) => Status::new(Code::InvalidArgument, v),
      ShareServiceError::Other(v) => v,
    }
  }
}

#[derive(Debug, Error)]
pub enum ProvisionError {
  #[error("Invalid provisioning request: {0}")]
  InvalidRequest(#[from] CreateRequestError),

  #[error("Share creation failed: {0}")]
  Service(#[from] ShareServiceError),
}

impl From<ProvisionError> for tonic::Status {
  fn from(value: ProvisionError) -> Self {
    match value {
      ProvisionError::InvalidRequest(v) => v.into(),
      ProvisionError::Service(v) => v.into(),
    }
  }
}

/// Provisions NFS shares for volume claims.
pub struct Provisioner<S: ShareService> {
  service: Arc<S>,
  identity: String,
  builder: RequestBuilder,
}

impl<S: ShareService> Provisioner<S> {
  /// `identity` names this provisioner instance, so the volumes it created
  /// can be told apart from those of other instances.
  pub fn new(service: Arc<S>, identity: impl Into<String>) -> Self {
    Provisioner {
      service,
      identity: identity.into(),
      builder: RequestBuilder::new(),
    }
  }

  pub fn with_zone_policy(mut self, policy: ZonePolicy) -> Self {
    self.builder = self.builder.zone_policy(policy);
    self
  }

  #[inline]
  pub fn identity(&self) -> &str {
    &self.identity
  }

  #[inline]
  pub fn service(&self) -> &Arc<S> {
    &self.service
  }

  /// Validates `options` and creates the share. The service is not called
  /// when validation fails, and a failed call is not retried.
  #[instrument(
    name = "provisioner.provision",
    skip(self, options),
    fields(identity = %self.identity, pv = options.pv_name(), request, response, error)
  )]
  pub async fn provision(&self, options: &VolumeOptions) -> Result<Share, ProvisionError> {
    let share = match self.builder.build(options) {
      Ok(request) => self
        .service
        .create_share(options.pv_name(), request.record_request())
        .await
        .map_err(ProvisionError::from),
      Err(e) => Err(e.into()),
    };
    let share = share.record_outcome()?;

    info!(share_id = share.id(), size = share.size(), "Provisioned share");
    Ok(share)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    claim::{ResourceName, VolumeClaim},
    fake::{FakeAction, FakeShareService},
  };
  use futures::executor::block_on;

  fn options(storage: &str, parameters: &[(&str, &str)]) -> VolumeOptions {
    let claim =
      VolumeClaim::new("pvc", "foo").with_request(ResourceName::STORAGE, storage.parse().unwrap());

    parameters
      .iter()
      .fold(VolumeOptions::new("pv-1", claim), |o, (k, v)| {
        o.with_parameter(*k, *v)
      })
  }

  #[test]
  fn provision_creates_share() {
    let service = Arc::new(FakeShareService::new());
    let provisioner = Provisioner::new(service.clone(), "provisioner-1");

    let share = block_on(provisioner.provision(&options("2G", &[("zones", "nova")])))
      .expect("provisioned");

    assert_eq!(share.name(), Some("pv-1"));
    assert_eq!(share.size(), 2);
    assert_eq!(share.availability_zone(), Some("nova"));

    let log = service.get_log();
    assert_eq!(log.len(), 1);
    match &log[0] {
      FakeAction::CreateShare { name, request } => {
        assert_eq!(name, "pv-1");
        assert_eq!(request.size(), 2);
        assert_eq!(request.availability_zone(), "nova");
      }
    }
  }

  #[test]
  fn invalid_request_skips_service() {
    let service = Arc::new(FakeShareService::new());
    let provisioner = Provisioner::new(service.clone(), "provisioner-1");

    let err = block_on(provisioner.provision(&options("2Gi", &[]))).expect_err("invalid size");

    assert!(matches!(
      err,
      ProvisionError::InvalidRequest(CreateRequestError::SizeNotWholeGiB)
    ));
    assert!(service.get_log().is_empty());
  }

  #[test]
  fn service_failure_is_returned_once() {
    let service = Arc::new(FakeShareService::new());
    service.fail_with(|| ShareServiceError::QuotaExceeded("gigabytes".into()));
    let provisioner = Provisioner::new(service.clone(), "provisioner-1");

    let err = block_on(provisioner.provision(&options("2G", &[]))).expect_err("quota exceeded");

    assert!(matches!(
      err,
      ProvisionError::Service(ShareServiceError::QuotaExceeded(_))
    ));
    assert_eq!(service.get_log().len(), 1);
    assert_eq!(tonic::Status::from(err).code(), tonic::Code::ResourceExhausted);
  }

  #[test]
  fn zone_policy_is_applied() {
    let service = Arc::new(FakeShareService::new());
    let provisioner =
      Provisioner::new(service, "provisioner-1").with_zone_policy(ZonePolicy::ChooseFromList);

    let share = block_on(provisioner.provision(&options("2G", &[("zones", "nova1, nova2, nova3")])))
      .expect("provisioned");

    assert_eq!(share.availability_zone(), Some("nova2"));
  }
}
