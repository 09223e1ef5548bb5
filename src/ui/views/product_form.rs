use crate::catalog::{Product, ProductDraft, ProductId};
use crate::event::Ticket;
use crate::ui::components::Form;
use crate::ui::renderfns::price_input;

const NAME: usize = 0;
const PRICE: usize = 1;
const IMAGE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFormMode {
  Create,
  Edit(ProductId),
}

/// Create/edit form for a single product
#[derive(Debug, Clone)]
pub struct ProductForm {
  pub mode: ProductFormMode,
  pub form: Form,
  /// Ticket of the submitted request, while one is outstanding
  pub pending: Option<Ticket>,
}

impl ProductForm {
  pub fn create() -> Self {
    Self {
      mode: ProductFormMode::Create,
      form: Form::new("Create New Product")
        .text("Product Name", "")
        .number("Price", "")
        .text("Image URL", ""),
      pending: None,
    }
  }

  pub fn edit(product: &Product) -> Self {
    Self {
      mode: ProductFormMode::Edit(product.id.clone()),
      form: Form::new("Update Product")
        .text("Product Name", product.name.clone())
        .number("Price", price_input(product.price))
        .text("Image URL", product.image.clone()),
      pending: None,
    }
  }

  /// Field values as a draft. An empty or unreadable price is absent.
  pub fn draft(&self) -> ProductDraft {
    ProductDraft::new(
      self.form.value(NAME),
      self.form.value(IMAGE),
      self.form.value(PRICE).trim().parse::<f64>().ok(),
    )
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
