use crate::catalog::{OrderRequest, Product, ProductDraft, ProductId};
use crate::event::{CatalogEvent, Event, EventHandler, Ticket};
use crate::store::{Outcome, ProductStore, RemoteClient};
use crate::ui;
use crate::ui::components::{ConfirmEvent, FormEvent, KeyResult, Toast};
use crate::ui::views::{DeleteDialog, OrderForm, ProductForm, ProductFormMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use std::future::Future;
use std::io::stdout;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Overlay owning the keyboard while open
#[derive(Debug)]
pub enum Modal {
  Product(ProductForm),
  Delete(DeleteDialog),
  Order(OrderForm),
}

/// Main application state
pub struct App<R: RemoteClient + 'static> {
  /// Shared with every spawned operation
  store: Arc<ProductStore<R>>,

  /// Header text, config title or the API host
  title: String,

  /// Snapshot of the store taken after each completed operation
  products: Vec<Product>,

  list_state: ListState,

  modal: Option<Modal>,

  toast: Option<Toast>,

  /// Refreshes dispatched but not yet reported back
  refreshing: usize,

  /// Operations dispatched but not yet reported back
  in_flight: usize,

  next_ticket: u64,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  should_quit: bool,
}

impl<R: RemoteClient + 'static> App<R> {
  pub fn new(
    store: Arc<ProductStore<R>>,
    title: impl Into<String>,
    event_tx: mpsc::UnboundedSender<Event>,
  ) -> Self {
    Self {
      store,
      title: title.into(),
      products: Vec::new(),
      list_state: ListState::default(),
      modal: None,
      toast: None,
      refreshing: 0,
      in_flight: 0,
      next_ticket: 0,
      event_tx,
      should_quit: false,
    }
  }

  pub async fn run(&mut self, mut events: EventHandler) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let result = self.event_loop(&mut events).await;

    // Cleanup terminal, also when the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(&mut self, events: &mut EventHandler) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Initial data load
    self.refresh();

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }

    Ok(())
  }

  pub fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.expire_toast(Instant::now()),
      Event::Catalog(event) => self.handle_catalog_event(event),
    }
  }

  fn expire_toast(&mut self, now: Instant) {
    if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
      self.toast = None;
    }
  }

  /// Run `work` off the UI loop and feed its result back as an event.
  fn dispatch<F>(&mut self, work: F)
  where
    F: Future<Output = CatalogEvent> + Send + 'static,
  {
    self.in_flight += 1;
    let tx = self.event_tx.clone();
    tokio::spawn(async move {
      let _ = tx.send(Event::Catalog(work.await));
    });
  }

  fn refresh(&mut self) {
    self.refreshing += 1;
    let store = Arc::clone(&self.store);
    self.dispatch(async move {
      store.refresh().await;
      CatalogEvent::Refreshed
    });
  }

  fn create(&mut self, ticket: Ticket, draft: ProductDraft) {
    let store = Arc::clone(&self.store);
    self.dispatch(async move {
      let outcome = store.create(draft).await;
      CatalogEvent::Created { ticket, outcome }
    });
  }

  fn update(&mut self, ticket: Ticket, id: ProductId, draft: ProductDraft) {
    let store = Arc::clone(&self.store);
    self.dispatch(async move {
      let outcome = store.update(&id, draft).await;
      CatalogEvent::Updated { ticket, outcome }
    });
  }

  fn delete(&mut self, ticket: Ticket, id: ProductId) {
    let store = Arc::clone(&self.store);
    self.dispatch(async move {
      let outcome = store.delete(&id).await;
      CatalogEvent::Deleted { ticket, outcome }
    });
  }

  fn place_order(&mut self, ticket: Ticket, order: OrderRequest) {
    let store = Arc::clone(&self.store);
    self.dispatch(async move {
      let outcome: Outcome<()> = store.remote().place_order(&order).await.into();
      if outcome.is_ok() {
        info!(product = %order.product_id, "order placed");
      }
      CatalogEvent::OrderPlaced { ticket, outcome }
    });
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    if self.modal.is_some() {
      self.handle_modal_key(key);
    } else {
      self.handle_list_key(key);
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') => self.should_quit = true,

      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),

      KeyCode::Char('r') => self.refresh(),
      KeyCode::Char('n') => self.modal = Some(Modal::Product(ProductForm::create())),
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(product) = self.selected_product() {
          self.modal = Some(Modal::Product(ProductForm::edit(product)));
        }
      }
      KeyCode::Char('d') => {
        if let Some(product) = self.selected_product() {
          self.modal = Some(Modal::Delete(DeleteDialog::new(product)));
        }
      }
      KeyCode::Char('o') => {
        if let Some(product) = self.selected_product() {
          self.modal = Some(Modal::Order(OrderForm::new(product)));
        }
      }
      _ => {}
    }
  }

  fn handle_modal_key(&mut self, key: KeyEvent) {
    // Only consumed when this key submits
    let ticket = Ticket(self.next_ticket + 1);

    match self.modal.as_mut() {
      Some(Modal::Product(form)) => match form.form.handle_key(key) {
        KeyResult::Event(FormEvent::Cancelled) => self.modal = None,
        KeyResult::Event(FormEvent::Submitted) => {
          let draft = form.draft();
          let mode = form.mode.clone();
          form.begin(ticket);
          self.next_ticket = ticket.0;
          match mode {
            ProductFormMode::Create => self.create(ticket, draft),
            ProductFormMode::Edit(id) => self.update(ticket, id, draft),
          }
        }
        KeyResult::Handled | KeyResult::NotHandled => {}
      },
      Some(Modal::Delete(dialog)) => match dialog.confirm.handle_key(key) {
        KeyResult::Event(ConfirmEvent::Cancelled) => self.modal = None,
        KeyResult::Event(ConfirmEvent::Confirmed) => {
          let id = dialog.id.clone();
          dialog.begin(ticket);
          self.next_ticket = ticket.0;
          self.delete(ticket, id);
        }
        KeyResult::Handled | KeyResult::NotHandled => {}
      },
      Some(Modal::Order(order)) => match order.form.handle_key(key) {
        KeyResult::Event(FormEvent::Cancelled) => self.modal = None,
        KeyResult::Event(FormEvent::Submitted) => {
          let request = order.request();
          order.begin(ticket);
          self.next_ticket = ticket.0;
          self.place_order(ticket, request);
        }
        KeyResult::Handled | KeyResult::NotHandled => {}
      },
      None => {}
    }
  }

  fn handle_catalog_event(&mut self, event: CatalogEvent) {
    self.in_flight = self.in_flight.saturating_sub(1);

    match event {
      CatalogEvent::Refreshed => {
        self.refreshing = self.refreshing.saturating_sub(1);
      }
      CatalogEvent::Created { ticket, outcome } => {
        let ok = outcome.is_ok();
        self.notify_outcome(&outcome);
        // A failed create keeps the form so the user can fix it
        self.settle_modal(ticket, ok);
      }
      CatalogEvent::Updated { ticket, outcome } => {
        self.toast = Some(if outcome.is_ok() {
          Toast::success("Success", "Product updated successfully")
        } else {
          Toast::error("Error", "Failed to update product")
        });
        self.settle_modal(ticket, true);
      }
      CatalogEvent::Deleted { ticket, outcome } => {
        self.notify_outcome(&outcome);
        self.settle_modal(ticket, true);
      }
      CatalogEvent::OrderPlaced { ticket, outcome } => {
        let message = outcome.message().unwrap_or_default().to_string();
        let ok = outcome.is_ok();
        self.toast = Some(if ok {
          Toast::success("Order Placed!", message)
        } else {
          Toast::error("Failed to place order", message)
        });
        self.settle_modal(ticket, ok);
      }
    }

    self.sync_products();
  }

  fn notify_outcome<T>(&mut self, outcome: &Outcome<T>) {
    let message = outcome.message().unwrap_or_default();
    self.toast = Some(if outcome.is_ok() {
      Toast::success("Success", message)
    } else {
      Toast::error("Error", message)
    });
  }

  /// Close or unfreeze the open modal, but only if it issued `ticket`.
  fn settle_modal(&mut self, ticket: Ticket, close: bool) {
    let pending = match &self.modal {
      Some(Modal::Product(form)) => form.pending,
      Some(Modal::Delete(dialog)) => dialog.pending,
      Some(Modal::Order(order)) => order.pending,
      None => None,
    };
    if pending != Some(ticket) {
      debug!(ticket = ticket.0, "result for a dismissed surface");
      return;
    }

    if close {
      self.modal = None;
      return;
    }
    match self.modal.as_mut() {
      Some(Modal::Product(form)) => form.settle(),
      Some(Modal::Delete(dialog)) => dialog.settle(),
      Some(Modal::Order(order)) => order.settle(),
      None => {}
    }
  }

  /// Take a fresh snapshot, keeping the cursor on the same product when it survives.
  fn sync_products(&mut self) {
    let selected_id = self.selected_product().map(|p| p.id.clone());
    self.products = self.store.products();

    let index = selected_id
      .and_then(|id| self.products.iter().position(|p| p.id == id))
      .or(self.list_state.selected());
    self.list_state.select(index);
    ui::ensure_valid_selection(&mut self.list_state, self.products.len());
  }

  fn move_selection(&mut self, delta: i32) {
    let len = self.products.len();
    if len > 0 {
      let current = self.list_state.selected().unwrap_or(0);
      let next = (current as i32 + delta).rem_euclid(len as i32) as usize;
      self.list_state.select(Some(next));
    }
  }

  fn selected_product(&self) -> Option<&Product> {
    self
      .list_state
      .selected()
      .and_then(|i| self.products.get(i))
  }

  // Accessors for UI rendering
  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  /// Products with the list cursor, borrowed together for rendering
  pub fn list_view(&mut self) -> (&[Product], &mut ListState) {
    (&self.products, &mut self.list_state)
  }

  pub fn modal(&self) -> Option<&Modal> {
    self.modal.as_ref()
  }

  pub fn toast(&self) -> Option<&Toast> {
    self.toast.as_ref()
  }

  pub fn is_loading(&self) -> bool {
    self.refreshing > 0
  }

  pub fn in_flight(&self) -> usize {
    self.in_flight
  }
}
