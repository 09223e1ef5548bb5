use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::catalog::api_types::{read_ack, read_data};
use crate::catalog::types::{OrderRequest, Product, ProductDraft, ProductId};
use crate::config::Config;
use crate::store::{RemoteClient, RemoteError, Reply};

/// HTTP client for the catalog API
#[derive(Clone)]
pub struct ApiClient {
  client: reqwest::Client,
  base_url: Url,
}

impl ApiClient {
  pub fn new(config: &Config) -> Result<Self> {
    let base_url = config.api.base_url()?;

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.api.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, base_url })
  }

  /// Host and port of the API, for display.
  pub fn host(&self) -> String {
    match (self.base_url.host_str(), self.base_url.port()) {
      (Some(host), Some(port)) => format!("{}:{}", host, port),
      (Some(host), None) => host.to_string(),
      _ => self.base_url.to_string(),
    }
  }

  fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
    self
      .base_url
      .join(path)
      .map_err(|e| RemoteError::Transport(format!("bad endpoint {}: {}", path, e)))
  }

  fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, RemoteError> {
    let url = self.endpoint(path)?;
    debug!(method = %method, url = %url, "api request");
    Ok(self.client.request(method, url))
  }

  /// Send a request and hand back the status and raw body.
  async fn send(
    &self,
    request: RequestBuilder,
  ) -> Result<(StatusCode, Vec<u8>), RemoteError> {
    let response = request
      .send()
      .await
      .map_err(|e| RemoteError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
      .bytes()
      .await
      .map_err(|e| RemoteError::Transport(e.to_string()))?;
    debug!(status = status.as_u16(), bytes = body.len(), "api response");
    Ok((status, body.to_vec()))
  }
}

fn product_path(id: &ProductId) -> String {
  format!("api/products/{}", id.as_str())
}

#[async_trait]
impl RemoteClient for ApiClient {
  async fn list(&self) -> Result<Vec<Product>, RemoteError> {
    let (status, body) = self.send(self.request(Method::GET, "api/products")?).await?;
    Ok(read_data::<Vec<Product>>(status, &body)?.data)
  }

  async fn create(&self, draft: &ProductDraft) -> Result<Reply<Product>, RemoteError> {
    let request = self.request(Method::POST, "api/products")?.json(draft);
    let (status, body) = self.send(request).await?;
    read_data(status, &body)
  }

  async fn update(
    &self,
    id: &ProductId,
    draft: &ProductDraft,
  ) -> Result<Reply<Product>, RemoteError> {
    let request = self.request(Method::PUT, &product_path(id))?.json(draft);
    let (status, body) = self.send(request).await?;
    read_data(status, &body)
  }

  async fn delete(&self, id: &ProductId) -> Result<Reply<()>, RemoteError> {
    let request = self.request(Method::DELETE, &product_path(id))?;
    let (status, body) = self.send(request).await?;
    read_ack(status, &body)
  }

  async fn place_order(&self, order: &OrderRequest) -> Result<Reply<()>, RemoteError> {
    let request = self.request(Method::POST, "api/orders")?.json(order);
    let (status, body) = self.send(request).await?;
    read_ack(status, &body)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ApiConfig;

  fn client(url: &str) -> ApiClient {
    let config = Config {
      api: ApiConfig {
        url: url.to_string(),
        timeout_secs: Some(5),
      },
      ..Config::default()
    };
    ApiClient::new(&config).unwrap()
  }

  #[test]
  fn test_endpoints_join_onto_base() {
    let api = client("http://localhost:5000");
    assert_eq!(
      api.endpoint("api/products").unwrap().as_str(),
      "http://localhost:5000/api/products"
    );
    assert_eq!(
      api
        .endpoint(&product_path(&ProductId::new("abc123")))
        .unwrap()
        .as_str(),
      "http://localhost:5000/api/products/abc123"
    );
  }

  #[test]
  fn test_endpoints_keep_base_path() {
    let api = client("https://shop.example.com/store");
    assert_eq!(
      api.endpoint("api/orders").unwrap().as_str(),
      "https://shop.example.com/store/api/orders"
    );
  }

  #[test]
  fn test_host() {
    assert_eq!(client("http://localhost:5000").host(), "localhost:5000");
    assert_eq!(client("https://shop.example.com/store").host(), "shop.example.com");
  }

  #[tokio::test]
  async fn test_unreachable_host_is_transport_error() {
    // Bind an ephemeral port and release it so nothing listens there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
      .unwrap()
      .local_addr()
      .unwrap()
      .port();
    let api = client(&format!("http://127.0.0.1:{port}"));
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
  }
}
