//! In-memory stand-in for the HTTP API.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::catalog::{OrderRequest, Product, ProductDraft, ProductId};

use super::remote::{RemoteClient, RemoteError, Reply};

pub fn product(id: &str, name: &str, price: f64) -> Product {
  Product {
    id: ProductId::new(id),
    name: name.to_string(),
    price,
    image: format!("https://img.example/{id}.png"),
    created_at: None,
    updated_at: None,
  }
}

#[derive(Default)]
struct ServerState {
  products: Vec<Product>,
  orders: Vec<OrderRequest>,
  next_id: u64,
  failure: Option<RemoteError>,
  update_answer_id: Option<ProductId>,
  hold_creates: Option<Arc<Notify>>,
  hold_updates: Option<Arc<Notify>>,
}

/// Behaves like the backend: assigns ids, trims names, answers 404 for
/// unknown ids. Can be told to fail every call or to hold responses.
#[derive(Default)]
pub struct FakeRemote {
  state: Mutex<ServerState>,
  calls: AtomicUsize,
}

impl FakeRemote {
  pub fn with_products(products: Vec<Product>) -> Self {
    let remote = Self::default();
    remote.state.lock().products = products;
    remote
  }

  /// Number of round trips attempted so far.
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn server_products(&self) -> Vec<Product> {
    self.state.lock().products.clone()
  }

  pub fn orders(&self) -> Vec<OrderRequest> {
    self.state.lock().orders.clone()
  }

  pub fn fail_with_message(&self, message: &str) {
    self.state.lock().failure = Some(RemoteError::Rejected {
      status: Some(500),
      message: Some(message.to_string()),
    });
  }

  pub fn fail_silently(&self) {
    self.state.lock().failure = Some(RemoteError::Rejected {
      status: Some(500),
      message: None,
    });
  }

  pub fn fail_with_transport(&self) {
    self.state.lock().failure = Some(RemoteError::Transport("connection refused".into()));
  }

  /// Answer updates with a payload carrying `id` instead of the requested one.
  pub fn answer_updates_as(&self, id: ProductId) {
    self.state.lock().update_answer_id = Some(id);
  }

  /// Apply creates on the server, then wait for `gate` before answering.
  pub fn hold_creates(&self, gate: Arc<Notify>) {
    self.state.lock().hold_creates = Some(gate);
  }

  /// Apply updates on the server, then wait for `gate` before answering.
  pub fn hold_updates(&self, gate: Arc<Notify>) {
    self.state.lock().hold_updates = Some(gate);
  }

  fn begin(&self) -> Result<(), RemoteError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match &self.state.lock().failure {
      Some(err) => Err(err.clone()),
      None => Ok(()),
    }
  }
}

fn not_found() -> RemoteError {
  RemoteError::Rejected {
    status: Some(404),
    message: Some("Product not found".to_string()),
  }
}

#[async_trait]
impl RemoteClient for FakeRemote {
  async fn list(&self) -> Result<Vec<Product>, RemoteError> {
    self.begin()?;
    Ok(self.state.lock().products.clone())
  }

  async fn create(&self, draft: &ProductDraft) -> Result<Reply<Product>, RemoteError> {
    self.begin()?;
    let (created, gate) = {
      let mut state = self.state.lock();
      state.next_id += 1;
      let created = Product {
        id: ProductId::new(format!("p{}", state.next_id)),
        name: draft.name.trim().to_string(),
        price: draft.price.unwrap_or_default(),
        image: draft.image.clone(),
        created_at: None,
        updated_at: None,
      };
      state.products.push(created.clone());
      (created, state.hold_creates.clone())
    };

    if let Some(gate) = gate {
      gate.notified().await;
    }
    Ok(Reply::new(created))
  }

  async fn update(
    &self,
    id: &ProductId,
    draft: &ProductDraft,
  ) -> Result<Reply<Product>, RemoteError> {
    self.begin()?;
    let (mut updated, answer_id, gate) = {
      let mut state = self.state.lock();
      let existing = state
        .products
        .iter_mut()
        .find(|p| &p.id == id)
        .ok_or_else(not_found)?;
      existing.name = draft.name.trim().to_string();
      existing.image = draft.image.clone();
      if let Some(price) = draft.price {
        existing.price = price;
      }
      let updated = existing.clone();
      (
        updated,
        state.update_answer_id.clone(),
        state.hold_updates.clone(),
      )
    };

    if let Some(gate) = gate {
      gate.notified().await;
    }
    if let Some(answer_id) = answer_id {
      updated.id = answer_id;
    }
    Ok(Reply::new(updated))
  }

  async fn delete(&self, id: &ProductId) -> Result<Reply<()>, RemoteError> {
    self.begin()?;
    let mut state = self.state.lock();
    let before = state.products.len();
    state.products.retain(|p| &p.id != id);
    if state.products.len() == before {
      return Err(not_found());
    }
    Ok(Reply::new(()).with_message("Product deleted"))
  }

  async fn place_order(&self, order: &OrderRequest) -> Result<Reply<()>, RemoteError> {
    self.begin()?;
    self.state.lock().orders.push(order.clone());
    Ok(Reply::new(()).with_message("Order placed successfully"))
  }
}
