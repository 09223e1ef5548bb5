use crate::catalog::{Product, ProductId};
use crate::event::Ticket;
use crate::ui::components::Confirm;

#[derive(Debug, Clone)]
pub struct DeleteDialog {
  pub id: ProductId,
  pub confirm: Confirm,
  pub pending: Option<Ticket>,
}

impl DeleteDialog {
  pub fn new(product: &Product) -> Self {
    Self {
      id: product.id.clone(),
      confirm: Confirm::new(
        "Delete Product",
        format!(
          "Are you sure you want to delete \"{}\"? This action cannot be undone.",
          product.name
        ),
      ),
      pending: None,
    }
  }

  pub fn begin(&mut self, ticket: Ticket) {
    self.pending = Some(ticket);
    self.confirm.set_busy(true);
  }

  pub fn settle(&mut self) {
    self.pending = None;
    self.confirm.set_busy(false);
  }
}
