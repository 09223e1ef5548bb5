//! Client-side product store.
//!
//! - `ProductStore` owns the cached collection and reconciles it after each
//!   remote round trip
//! - `RemoteClient` is the seam to the HTTP API
//! - `Outcome` is what every mutating operation hands back to the UI

mod outcome;
mod products;
mod remote;

#[cfg(test)]
pub mod testing;

pub use outcome::Outcome;
pub use products::ProductStore;
pub use remote::{RemoteClient, RemoteError, Reply};
