//! Turns volume claims into share create requests for the OpenStack shared
//! filesystems service.
//!
//! ```
//! use openstack_sharedfilesystems::{prepare_create_request, ResourceName, VolumeClaim, VolumeOptions};
//!
//! let claim = VolumeClaim::new("pvc", "default")
//!   .with_request(ResourceName::STORAGE, "2G".parse().unwrap());
//! let options = VolumeOptions::new("pv", claim).with_parameter("zones", "nova");
//!
//! let request = prepare_create_request(&options).unwrap();
//! assert_eq!(request.size(), 2);
//! assert_eq!(request.availability_zone(), "nova");
//! ```

pub mod claim;
pub mod fake;
pub mod parameters;
pub mod provisioner;
pub mod quantity;
pub mod request;
pub mod share;
pub mod zones;

mod size;
mod utils;

pub use claim::{ResourceList, ResourceName, VolumeClaim, VolumeOptions};
pub use parameters::{ZonePolicy, ZONES_PARAMETER};
pub use provisioner::{ProvisionError, Provisioner, ShareService, ShareServiceError};
pub use quantity::{ParseQuantityError, Quantity, Scale, ScaleError};
pub use request::{prepare_create_request, CreateRequestError, RequestBuilder};
pub use share::{CreateRequest, Share, ShareProtocol};
pub use size::storage_size_gb;
