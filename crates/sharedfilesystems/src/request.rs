use crate::{
  claim::VolumeOptions,
  parameters::{self, ZonePolicy},
  share::CreateRequest,
  size,
  utils::Record,
};
use thiserror::Error;
use tracing::{debug, instrument};

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRequestError {
  /// The claim has no `storage` request.
  #[error("storage size request must be configured")]
  SizeNotConfigured,

  #[error("requested storage size must not have zero value")]
  SizeZero,

  #[error("requested storage size must be greater than zero")]
  SizeNegative,

  /// The requested size does not convert to whole GBs without rounding.
  #[error("requested storage size must be a whole integer number in GBs")]
  SizeNotWholeGiB,

  /// The requested size is whole, but too large to be sent to the service.
  #[error("requested storage size is not an integer number")]
  SizeNotInteger,

  #[error("invalid parameter {0:?}")]
  UnrecognizedParameter(String),

  #[error("comma separated list of zones ({0:?}) must not contain an empty zone")]
  EmptyZone(String),
}

impl From<CreateRequestError> for tonic::Status {
  fn from(value: CreateRequestError) -> Self {
    use tonic::{Code, Status};

    match value {
      CreateRequestError::SizeNotInteger => Status::new(Code::OutOfRange, value.to_string()),
      v => Status::new(Code::InvalidArgument, v.to_string()),
    }
  }
}

/// Turns [`VolumeOptions`] into a share [`CreateRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder {
  zone_policy: ZonePolicy,
}

impl RequestBuilder {
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Selects how the `zones` parameter is interpreted. Defaults to
  /// [`ZonePolicy::Verbatim`].
  #[inline]
  pub fn zone_policy(mut self, policy: ZonePolicy) -> Self {
    self.zone_policy = policy;
    self
  }

  pub fn build(&self, options: &VolumeOptions) -> Result<CreateRequest, CreateRequestError> {
    match self.build_partial(options) {
      (request, None) => Ok(request),
      (_, Some(e)) => Err(e),
    }
  }

  /// Like [`build`](Self::build), but also hands back whatever was filled in
  /// before the first failure. The protocol is always set.
  #[instrument(
    name = "sharedfilesystems.prepare_create_request",
    level = "debug",
    skip(self, options),
    fields(claim = options.claim().name(), request, response, error)
  )]
  pub fn build_partial(
    &self,
    options: &VolumeOptions,
  ) -> (CreateRequest, Option<CreateRequestError>) {
    let options = options.record_request();
    let mut request = CreateRequest::nfs();

    match size::storage_size_gb(options.claim().requests()) {
      Ok(size) => request.size = size,
      Err(e) => {
        debug!(error = %e, "Rejected storage size");
        return (request, Some(e.record_field("error")));
      }
    }

    if let Err(e) = parameters::apply_parameters(
      &mut request,
      options.parameters(),
      options.claim().name(),
      self.zone_policy,
    ) {
      debug!(error = %e, "Rejected storage class parameters");
      return (request, Some(e.record_field("error")));
    }

    (request.record_response(), None)
  }
}

/// Builds a create request using the default [`ZonePolicy`].
#[inline]
pub fn prepare_create_request(
  options: &VolumeOptions,
) -> Result<CreateRequest, CreateRequestError> {
  RequestBuilder::new().build(options)
}
