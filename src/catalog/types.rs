use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&self.0)
  }
}

/// Canonical product record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(rename = "_id")]
  pub id: ProductId,
  pub name: String,
  pub price: f64,
  pub image: String,
  #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

/// Candidate field set for create and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductDraft {
  pub name: String,
  pub image: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price: Option<f64>,
}

impl ProductDraft {
  pub fn new(name: impl Into<String>, image: impl Into<String>, price: Option<f64>) -> Self {
    Self {
      name: name.into(),
      image: image.into(),
      price,
    }
  }

  /// True when every field carries a value.
  pub fn is_complete(&self) -> bool {
    !self.name.is_empty() && !self.image.is_empty() && self.price.is_some_and(|p| !p.is_nan())
  }
}

impl From<&Product> for ProductDraft {
  fn from(product: &Product) -> Self {
    Self {
      name: product.name.clone(),
      image: product.image.clone(),
      price: Some(product.price),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
  #[serde(rename = "Credit Card")]
  CreditCard,
  #[serde(rename = "Debit Card")]
  DebitCard,
  #[serde(rename = "UPI")]
  Upi,
  #[serde(rename = "Cash on Delivery")]
  CashOnDelivery,
}

impl PaymentMethod {
  pub const ALL: [PaymentMethod; 4] = [
    PaymentMethod::CreditCard,
    PaymentMethod::DebitCard,
    PaymentMethod::Upi,
    PaymentMethod::CashOnDelivery,
  ];

  pub fn label(self) -> &'static str {
    match self {
      PaymentMethod::CreditCard => "Credit Card",
      PaymentMethod::DebitCard => "Debit Card",
      PaymentMethod::Upi => "UPI",
      PaymentMethod::CashOnDelivery => "Cash on Delivery",
    }
  }

  /// Case-insensitive lookup by label or short alias (`credit`, `debit`, `upi`, `cod`).
  pub fn parse(input: &str) -> Option<Self> {
    let input = input.trim().to_lowercase();
    Self::ALL.into_iter().find(|m| {
      m.label().to_lowercase() == input
        || matches!(
          (m, input.as_str()),
          (PaymentMethod::CreditCard, "credit")
            | (PaymentMethod::DebitCard, "debit")
            | (PaymentMethod::CashOnDelivery, "cod")
        )
    })
  }
}

/// Order placed against a product. Fire-and-forget: nothing is read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
  pub product_id: ProductId,
  pub name: String,
  pub address: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pincode: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub landmark: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub payment_method: Option<PaymentMethod>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_product_reads_mongo_shape() {
    let json = r#"{
      "_id": "665f1c2a9b1e8a0012345678",
      "name": "Kettle",
      "price": 1299,
      "image": "https://img.example/kettle.png",
      "createdAt": "2024-06-04T13:45:00.000Z",
      "updatedAt": "2024-06-05T08:00:00.000Z",
      "__v": 0
    }"#;

    let product: Product = serde_json::from_str(json).unwrap();
    assert_eq!(product.id.as_str(), "665f1c2a9b1e8a0012345678");
    assert_eq!(product.price, 1299.0);
    assert!(product.updated_at.is_some());
  }

  #[test]
  fn test_draft_omits_missing_price() {
    let draft = ProductDraft::new("Kettle", "k.png", None);
    let body = serde_json::to_value(&draft).unwrap();
    assert_eq!(body, serde_json::json!({"name": "Kettle", "image": "k.png"}));
  }

  #[test]
  fn test_draft_completeness() {
    assert!(ProductDraft::new("a", "b", Some(0.0)).is_complete());
    assert!(!ProductDraft::new("", "b", Some(5.0)).is_complete());
    assert!(!ProductDraft::new("a", "", Some(5.0)).is_complete());
    assert!(!ProductDraft::new("a", "b", None).is_complete());
    assert!(!ProductDraft::new("a", "b", Some(f64::NAN)).is_complete());
  }

  #[test]
  fn test_order_request_wire_names() {
    let order = OrderRequest {
      product_id: ProductId::new("p1"),
      name: "Asha".into(),
      address: "12 Hill Road".into(),
      pincode: Some("560001".into()),
      landmark: None,
      payment_method: Some(PaymentMethod::CashOnDelivery),
    };

    let body = serde_json::to_value(&order).unwrap();
    assert_eq!(body["productId"], "p1");
    assert_eq!(body["paymentMethod"], "Cash on Delivery");
    assert!(body.get("landmark").is_none());
  }

  #[test]
  fn test_payment_method_parse() {
    assert_eq!(PaymentMethod::parse("UPI"), Some(PaymentMethod::Upi));
    assert_eq!(PaymentMethod::parse("debit card"), Some(PaymentMethod::DebitCard));
    assert_eq!(PaymentMethod::parse("cod"), Some(PaymentMethod::CashOnDelivery));
    assert_eq!(PaymentMethod::parse("cheque"), None);
  }
}
