//! Wire types for the generator's JSON API

use crate::error::ApiError;
use crate::state::{Example, FormInput, GenerationResult, TestCaseRow};
use serde::{Deserialize, Serialize};

/// Content type the export endpoint uses for spreadsheets
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Available providers and the backend's default
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProviderList {
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub current: Option<String>,
}

/// Outcome of a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderTestOutcome {
    Healthy { provider: String },
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
pub struct ProviderTestResponse {
    #[serde(default)]
    pub success: bool,
    pub provider: Option<String>,
    pub error: Option<String>,
}

impl From<ProviderTestResponse> for ProviderTestOutcome {
    fn from(resp: ProviderTestResponse) -> Self {
        if resp.success {
            ProviderTestOutcome::Healthy {
                provider: resp.provider.unwrap_or_else(|| "provider".to_string()),
            }
        } else {
            ProviderTestOutcome::Failed {
                error: resp.error.unwrap_or_else(|| "Unknown error".to_string()),
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub user_story: &'a str,
    pub acceptance_criteria: &'a str,
    pub story_id: &'a str,
    pub story_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_provider: Option<&'a str>,
}

impl<'a> From<&'a FormInput> for GenerateRequest<'a> {
    fn from(input: &'a FormInput) -> Self {
        Self {
            user_story: &input.user_story,
            acceptance_criteria: &input.acceptance_criteria,
            story_id: &input.story_id,
            story_title: &input.story_title,
            ai_provider: input.ai_provider.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub story_id: String,
    #[serde(default)]
    pub story_title: String,
    #[serde(default)]
    pub test_cases: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub parsed_cases: Vec<TestCaseRow>,
    pub note: Option<String>,
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Turn the payload into a result, or a domain error for `success: false`
    pub fn into_result(self) -> Result<GenerationResult, ApiError> {
        if !self.success {
            return Err(ApiError::Domain(
                self.error
                    .unwrap_or_else(|| "Failed to generate test cases".to_string()),
            ));
        }

        Ok(GenerationResult {
            story_id: self.story_id,
            story_title: self.story_title,
            test_cases: self.test_cases,
            timestamp: self.timestamp,
            parsed_cases: self.parsed_cases,
            note: self.note,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ExportRequest<'a> {
    pub test_cases: &'a str,
    pub story_id: &'a str,
    pub story_title: &'a str,
}

impl<'a> From<&'a GenerationResult> for ExportRequest<'a> {
    fn from(result: &'a GenerationResult) -> Self {
        Self {
            test_cases: &result.test_cases,
            story_id: &result.story_id,
            story_title: &result.story_title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExamplesResponse {
    #[serde(default)]
    pub examples: Vec<Example>,
}
