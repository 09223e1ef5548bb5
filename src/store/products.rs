//! In-memory product collection kept in step with the remote API.

use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::catalog::{Product, ProductDraft, ProductId};

use super::outcome::Outcome;
use super::remote::{RemoteClient, UNAVAILABLE_MESSAGE};

pub const INCOMPLETE_DRAFT_MESSAGE: &str = "Please fill in all fields.";
pub const CREATED_MESSAGE: &str = "Product created successfully";

/// Client-side product store.
///
/// Every operation does one round trip through `R` and then reconciles the
/// local collection under a single write lock. The lock is never held across
/// an `.await`, so readers see either the state before an operation or the
/// state after it.
///
/// Nothing is applied optimistically. Operations racing on the same id are
/// not ordered: the last response to be reconciled wins.
pub struct ProductStore<R> {
  remote: R,
  products: RwLock<Vec<Product>>,
}

impl<R: RemoteClient> ProductStore<R> {
  pub fn new(remote: R) -> Self {
    Self {
      remote,
      products: RwLock::new(Vec::new()),
    }
  }

  pub fn remote(&self) -> &R {
    &self.remote
  }

  /// Snapshot of the collection in server order.
  pub fn products(&self) -> Vec<Product> {
    self.products.read().clone()
  }

  pub fn get(&self, id: &ProductId) -> Option<Product> {
    self.products.read().iter().find(|p| &p.id == id).cloned()
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }

  /// Replace the collection with the server's.
  ///
  /// A failed read empties the collection rather than leaving stale rows
  /// that look current.
  pub async fn refresh(&self) {
    match self.remote.list().await {
      Ok(fetched) => {
        let fetched = dedup_by_id(fetched);
        debug!(count = fetched.len(), "products refreshed");
        *self.products.write() = fetched;
      }
      Err(e) => {
        warn!(error = %e, "product refresh failed, clearing collection");
        self.products.write().clear();
      }
    }
  }

  /// Create a product and append the server's copy.
  pub async fn create(&self, draft: ProductDraft) -> Outcome<Product> {
    if !draft.is_complete() {
      return Outcome::failure(INCOMPLETE_DRAFT_MESSAGE);
    }

    match self.remote.create(&draft).await {
      Ok(reply) => {
        let product = reply.data;
        {
          let mut products = self.products.write();
          // A refresh that finished first may already carry this product.
          match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
          }
        }
        info!(id = %product.id, name = %product.name, "product created");
        Outcome::success(product, Some(CREATED_MESSAGE.to_string()))
      }
      Err(e) => {
        warn!(error = %e, "product create failed");
        Outcome::failure(e.user_message())
      }
    }
  }

  /// Delete a product, dropping it locally once the server confirms.
  ///
  /// Deleting an id that is not cached is not an error.
  pub async fn delete(&self, id: &ProductId) -> Outcome<()> {
    match self.remote.delete(id).await {
      Ok(reply) => {
        let removed = {
          let mut products = self.products.write();
          let before = products.len();
          products.retain(|p| &p.id != id);
          before != products.len()
        };
        info!(id = %id, removed, "product deleted");
        Outcome::success((), reply.message)
      }
      Err(e) => {
        warn!(id = %id, error = %e, "product delete failed");
        Outcome::failure(e.user_message())
      }
    }
  }

  /// Replace a product's fields, keeping its position.
  ///
  /// The server's payload replaces the cached entry, not the draft. If the
  /// entry is gone by the time the response lands, it stays gone.
  pub async fn update(&self, id: &ProductId, draft: ProductDraft) -> Outcome<Product> {
    match self.remote.update(id, &draft).await {
      Ok(reply) if &reply.data.id != id => {
        warn!(requested = %id, returned = %reply.data.id, "update answered for another id");
        Outcome::failure(UNAVAILABLE_MESSAGE)
      }
      Ok(reply) => {
        let product = reply.data;
        let replaced = {
          let mut products = self.products.write();
          match products.iter_mut().find(|p| &p.id == id) {
            Some(existing) => {
              *existing = product.clone();
              true
            }
            None => false,
          }
        };
        info!(id = %id, replaced, "product updated");
        Outcome::success(product, reply.message)
      }
      Err(e) => {
        warn!(id = %id, error = %e, "product update failed");
        Outcome::failure(e.user_message())
      }
    }
  }
}

fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
  let mut seen = HashSet::with_capacity(products.len());
  products
    .into_iter()
    .filter(|p| {
      let fresh = seen.insert(p.id.clone());
      if !fresh {
        warn!(id = %p.id, "server listed product twice, keeping first");
      }
      fresh
    })
    .collect()
}
