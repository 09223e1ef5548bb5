//! One-shot subcommands sharing the store with the terminal UI.

use clap::Subcommand;
use color_eyre::{eyre::eyre, Result};
use futures::future::join_all;
use std::io::Write;
use tracing::debug;

use crate::catalog::{OrderRequest, PaymentMethod, ProductDraft, ProductId};
use crate::store::{Outcome, ProductStore, RemoteClient};
use crate::ui::renderfns::{format_date, format_price};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
  /// Print every product
  List,
  /// Create a product
  Add {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    image: String,
  },
  /// Change a product, keeping fields that are not given
  Edit {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    image: Option<String>,
  },
  /// Delete one or more products
  Remove {
    #[arg(required = true)]
    ids: Vec<String>,
  },
  /// Place an order for a product
  Order {
    product_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    pincode: Option<String>,
    #[arg(long)]
    landmark: Option<String>,
    /// credit, debit, upi or cod
    #[arg(long, value_parser = parse_payment)]
    payment: Option<PaymentMethod>,
  },
}

fn parse_payment(input: &str) -> std::result::Result<PaymentMethod, String> {
  PaymentMethod::parse(input).ok_or_else(|| {
    format!("unknown payment method '{input}' (expected credit, debit, upi or cod)")
  })
}

pub async fn run<R: RemoteClient>(
  command: Command,
  store: &ProductStore<R>,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    Command::List => {
      store.refresh().await;
      if store.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
      }
      debug!(count = store.len(), "listing products");
      for product in store.products() {
        writeln!(
          out,
          "{:<26} {:>10}  {:<10} {}",
          product.id,
          format_price(product.price),
          format_date(product.updated_at),
          product.name
        )?;
      }
      Ok(())
    }
    Command::Add { name, price, image } => {
      let outcome = store.create(ProductDraft::new(name, image, Some(price))).await;
      if let Some(product) = outcome.payload() {
        writeln!(out, "{} {}", product.id, product.name)?;
      }
      report(out, outcome)
    }
    Command::Edit {
      id,
      name,
      price,
      image,
    } => {
      let id = ProductId::new(id);
      store.refresh().await;
      let current = store
        .get(&id)
        .ok_or_else(|| eyre!("No product with id {}", id))?;

      let mut draft = ProductDraft::from(&current);
      if let Some(name) = name {
        draft.name = name;
      }
      if let Some(image) = image {
        draft.image = image;
      }
      if price.is_some() {
        draft.price = price;
      }

      let outcome = store.update(&id, draft).await;
      if outcome.is_ok() {
        writeln!(out, "Product updated successfully")?;
        Ok(())
      } else {
        report(out, outcome)
      }
    }
    Command::Remove { ids } => {
      let ids: Vec<ProductId> = ids.into_iter().map(ProductId::new).collect();
      let outcomes = join_all(ids.iter().map(|id| store.delete(id))).await;

      let mut failed = 0;
      for (id, outcome) in ids.iter().zip(outcomes) {
        let message = outcome.message().unwrap_or_default();
        if outcome.is_ok() {
          writeln!(out, "{id}: {message}")?;
        } else {
          failed += 1;
          writeln!(out, "{id}: failed: {message}")?;
        }
      }
      match failed {
        0 => Ok(()),
        n => Err(eyre!("{} of {} deletes failed", n, ids.len())),
      }
    }
    Command::Order {
      product_id,
      name,
      address,
      pincode,
      landmark,
      payment,
    } => {
      let order = OrderRequest {
        product_id: ProductId::new(product_id),
        name,
        address,
        pincode,
        landmark,
        payment_method: payment,
      };
      let outcome: Outcome<()> = store.remote().place_order(&order).await.into();
      report(out, outcome)
    }
  }
}

/// Print the outcome's message, turning a failure into an error.
fn report<T>(out: &mut impl Write, outcome: Outcome<T>) -> Result<()> {
  match outcome {
    Outcome::Success { message, .. } => {
      if let Some(message) = message {
        writeln!(out, "{message}")?;
      }
      Ok(())
    }
    Outcome::Failure { message } => Err(eyre!(message)),
  }
}
