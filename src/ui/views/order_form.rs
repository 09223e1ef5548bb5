use crate::catalog::{OrderRequest, PaymentMethod, Product, ProductId};
use crate::event::Ticket;
use crate::ui::components::Form;

const NAME: usize = 0;
const ADDRESS: usize = 1;
const PINCODE: usize = 2;
const LANDMARK: usize = 3;
const PAYMENT: usize = 4;

const PAYMENT_LABELS: &[&str] = &["Credit Card", "Debit Card", "UPI", "Cash on Delivery"];

/// Order form for one product
#[derive(Debug, Clone)]
pub struct OrderForm {
  pub product_id: ProductId,
  pub form: Form,
  pub pending: Option<Ticket>,
}

impl OrderForm {
  pub fn new(product: &Product) -> Self {
    Self {
      product_id: product.id.clone(),
      form: Form::new(format!("Order {}", product.name))
        .text("Name", "")
        .text("Address", "")
        .text("PIN code", "")
        .text("Landmark", "")
        .choice("Payment method", PAYMENT_LABELS),
      pending: None,
    }
  }

  pub fn request(&self) -> OrderRequest {
    let optional = |index: usize| {
      let value = self.form.value(index).trim();
      (!value.is_empty()).then(|| value.to_string())
    };

    OrderRequest {
      product_id: self.product_id.clone(),
      name: self.form.value(NAME).to_string(),
      address: self.form.value(ADDRESS).to_string(),
      pincode: optional(PINCODE),
      landmark: optional(LANDMARK),
      payment_method: self
        .form
        .selected(PAYMENT)
        .and_then(|i| PaymentMethod::ALL.get(i).copied()),
    }
  }

  pub fn begin(&mut self, ticket: Ticket) {
    self.pending = Some(ticket);
    self.form.set_busy(true);
  }

  pub fn settle(&mut self) {
    self.pending = None;
    self.form.set_busy(false);
  }
}
