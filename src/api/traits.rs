//! Trait abstraction for the backend client to enable mocking in tests

use super::types::{ProviderList, ProviderTestOutcome};
use crate::error::ApiError;
use crate::state::{Example, FormInput, GenerationResult};
use async_trait::async_trait;

/// Operations offered by the test case generator backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Available AI providers and the backend's current one
    async fn list_providers(&self) -> Result<ProviderList, ApiError>;

    /// Run the backend's provider health check
    async fn test_provider(&self) -> Result<ProviderTestOutcome, ApiError>;

    /// Generate test cases for a story
    async fn generate(&self, input: &FormInput) -> Result<GenerationResult, ApiError>;

    /// Render a result as a spreadsheet; returns the file bytes
    async fn export(&self, result: &GenerationResult) -> Result<Vec<u8>, ApiError>;

    /// Example stories to prefill the form with
    async fn list_examples(&self) -> Result<Vec<Example>, ApiError>;
}
