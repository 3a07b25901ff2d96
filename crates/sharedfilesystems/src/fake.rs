//! An in-memory [`ShareService`] that records every call.

use crate::{
  provisioner::{ShareService, ShareServiceError},
  share::{CreateRequest, Share},
};
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum FakeAction {
  CreateShare {
    name: String,
    request: CreateRequest,
  },
}

type ErrorFactory = Box<dyn Fn() -> ShareServiceError + Send>;

struct FakeShareServiceInner {
  log: Vec<FakeAction>,
  next_id: u64,
  create_error: Option<ErrorFactory>,
}

pub struct FakeShareService(Mutex<FakeShareServiceInner>);

impl FakeShareService {
  pub fn new() -> Self {
    let inner = FakeShareServiceInner {
      log: Vec::new(),
      next_id: 0,
      create_error: None,
    };

    Self(Mutex::new(inner))
  }

  /// Makes every following `create_share` call fail with the produced error.
  pub fn fail_with(&self, f: impl Fn() -> ShareServiceError + Send + 'static) {
    self.0.lock().unwrap().create_error = Some(Box::new(f));
  }

  pub fn reset_log(&self) {
    self.0.lock().unwrap().log.clear();
  }

  pub fn get_log(&self) -> Vec<FakeAction> {
    self.0.lock().unwrap().log.clone()
  }
}

impl Default for FakeShareService {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ShareService for FakeShareService {
  async fn create_share(
    &self,
    name: &str,
    request: CreateRequest,
  ) -> Result<Share, ShareServiceError> {
    let mut inner = self.0.lock().unwrap();
    inner.log.push(FakeAction::CreateShare {
      name: name.to_owned(),
      request: request.clone(),
    });

    if let Some(f) = &inner.create_error {
      return Err(f());
    }

    inner.next_id += 1;
    let mut share = Share::new(format!("share-{}", inner.next_id), request.size()).with_name(name);
    if !request.availability_zone().is_empty() {
      share = share.with_availability_zone(request.availability_zone());
    }

    info!(id = share.id(), name, "Fake share created");
    Ok(share)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::executor::block_on;

  #[test]
  fn ids_are_sequential() {
    let service = FakeShareService::new();
    let request = CreateRequest::nfs();

    let first = block_on(service.create_share("a", request.clone())).unwrap();
    let second = block_on(service.create_share("b", request)).unwrap();

    assert_eq!(first.id(), "share-1");
    assert_eq!(second.id(), "share-2");
    assert_eq!(second.availability_zone(), None);

    assert_eq!(service.get_log().len(), 2);
    service.reset_log();
    assert!(service.get_log().is_empty());
  }
}
