//! Backend client module for HTTP communication

mod client;
mod traits;
mod types;

pub use client::ApiClient;
pub use traits::ApiClientTrait;
pub use types::{ProviderList, ProviderTestOutcome};

#[cfg(test)]
pub use traits::MockApiClientTrait;
