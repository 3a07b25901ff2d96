use crate::quantity::Quantity;
use std::{borrow::Cow, collections::HashMap, fmt};

/// Name of a resource requested by a claim, e.g. `storage` or `cpu`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ResourceName(Cow<'static, str>);

impl ResourceName {
  /// Volume size, in bytes.
  pub const STORAGE: ResourceName = ResourceName(Cow::Borrowed("storage"));
  pub const CPU: ResourceName = ResourceName(Cow::Borrowed("cpu"));
  pub const MEMORY: ResourceName = ResourceName(Cow::Borrowed("memory"));

  #[inline]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&'static str> for ResourceName {
  #[inline]
  fn from(v: &'static str) -> Self {
    ResourceName(Cow::Borrowed(v))
  }
}

impl From<String> for ResourceName {
  #[inline]
  fn from(v: String) -> Self {
    ResourceName(Cow::Owned(v))
  }
}

impl fmt::Display for ResourceName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for ResourceName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&*self.0, f)
  }
}

pub type ResourceList = HashMap<ResourceName, Quantity>;

/// A user's request for a piece of persistent storage.
#[derive(Debug, Clone, Default)]
pub struct VolumeClaim {
  name: String,
  namespace: String,
  requests: Option<ResourceList>,
}

impl VolumeClaim {
  pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
    VolumeClaim {
      name: name.into(),
      namespace: namespace.into(),
      requests: None,
    }
  }

  /// Adds a single resource request, creating the request list if needed.
  pub fn with_request(mut self, resource: impl Into<ResourceName>, quantity: Quantity) -> Self {
    self
      .requests
      .get_or_insert_with(HashMap::new)
      .insert(resource.into(), quantity);
    self
  }

  /// Replaces the request list. An empty list is kept as configured but
  /// empty, which is distinct from no list at all.
  pub fn with_requests(mut self, requests: ResourceList) -> Self {
    self.requests = Some(requests);
    self
  }

  /// Name of the claim. Used to spread volumes across zones.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[inline]
  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  /// The minimum amount of each resource the claim requires, if any
  /// requirements were set at all.
  #[inline]
  pub fn requests(&self) -> Option<&ResourceList> {
    self.requests.as_ref()
  }
}

/// Everything the provisioner is handed for a single volume: the claim,
/// the name the persistent volume will get and the storage class parameters.
#[derive(Debug, Clone)]
pub struct VolumeOptions {
  pv_name: String,
  claim: VolumeClaim,
  parameters: HashMap<String, String>,
}

impl VolumeOptions {
  pub fn new(pv_name: impl Into<String>, claim: VolumeClaim) -> Self {
    VolumeOptions {
      pv_name: pv_name.into(),
      claim,
      parameters: HashMap::new(),
    }
  }

  pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.parameters.insert(key.into(), value.into());
    self
  }

  pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
    self.parameters = parameters;
    self
  }

  /// Name of the persistent volume to create. The share is named after it.
  #[inline]
  pub fn pv_name(&self) -> &str {
    &self.pv_name
  }

  #[inline]
  pub fn claim(&self) -> &VolumeClaim {
    &self.claim
  }

  /// Storage class parameters. Keys are matched case-insensitively.
  #[inline]
  pub fn parameters(&self) -> &HashMap<String, String> {
    &self.parameters
  }
}
