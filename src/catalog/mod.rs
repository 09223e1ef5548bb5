pub mod api_types;
pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{OrderRequest, PaymentMethod, Product, ProductDraft, ProductId};
