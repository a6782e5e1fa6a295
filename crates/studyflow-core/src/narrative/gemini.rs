//! Gemini-backed narrator.
//!
//! Talks to the `generateContent` REST endpoint through a reqwest client
//! driven by a narrator-owned tokio runtime, so callers stay synchronous.
//! Every call is single-attempt with a hard timeout; any failure surfaces as
//! a [`NarrativeError`] for the caller's fallback branch.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::error::NarrativeError;
use crate::memory::StatusReport;
use crate::narrative::{prompts, Narrator};
use crate::scheduler::StudyBlock;
use crate::state::HistoryEntry;
use crate::storage::config::NarrativeConfig;

/// Narrator backed by the Gemini generation API.
pub struct GeminiNarrator {
    client: Client,
    runtime: tokio::runtime::Runtime,
    endpoint: String,
    model: String,
    api_key_env: String,
}

impl GeminiNarrator {
    /// Build a narrator from the narrative configuration.
    ///
    /// The API key is read from the configured environment variable at call
    /// time, not here, so a missing key fails the narration call (and takes
    /// the fallback branch) rather than startup.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(NarrativeError::from)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| NarrativeError::Request(e.to_string()))?;

        Ok(Self {
            client,
            runtime,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let api_key = std::env::var(&self.api_key_env)
            .map_err(|_| NarrativeError::MissingApiKey(self.api_key_env.clone()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .runtime
            .block_on(async { self.client.post(&url).json(&body).send().await })?;

        if !response.status().is_success() {
            return Err(NarrativeError::Status {
                status: response.status().as_u16(),
            });
        }

        let payload: serde_json::Value = self.runtime.block_on(async { response.json().await })?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

impl Narrator for GeminiNarrator {
    fn plan_summary(
        &self,
        profile_summary: &str,
        blocks: &[StudyBlock],
    ) -> Result<String, NarrativeError> {
        self.generate(&prompts::plan_summary_prompt(profile_summary, blocks))
    }

    fn reflection_feedback(
        &self,
        entry: &HistoryEntry,
        status: &StatusReport,
    ) -> Result<String, NarrativeError> {
        self.generate(&prompts::reflection_feedback_prompt(entry, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_config(endpoint: &str, key_env: &str) -> NarrativeConfig {
        NarrativeConfig {
            model: "gemini-2.5-flash".to_string(),
            endpoint: endpoint.to_string(),
            api_key_env: key_env.to_string(),
            timeout_secs: 5,
        }
    }

    fn make_entry() -> HistoryEntry {
        HistoryEntry {
            date: NaiveDate::from_ymd_opt(2025, 11, 28).unwrap(),
            completed_task_ids: vec![],
            partial_task_ids: vec![],
            difficulty_rating: 3,
            notes: String::new(),
        }
    }

    #[test]
    fn missing_api_key_is_an_error_not_a_hang() {
        let narrator =
            GeminiNarrator::from_config(&test_config("http://127.0.0.1:1", "STUDYFLOW_NO_SUCH_KEY"))
                .unwrap();
        let err = narrator.plan_summary("summary", &[]).unwrap_err();
        assert_eq!(err.category(), "MissingApiKey");
    }

    #[test]
    fn successful_generation_returns_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Great plan, keep going!"}]}}]}"#,
            )
            .create();

        std::env::set_var("STUDYFLOW_TEST_KEY_OK", "test-key");
        let narrator =
            GeminiNarrator::from_config(&test_config(&server.url(), "STUDYFLOW_TEST_KEY_OK"))
                .unwrap();

        let text = narrator.plan_summary("summary", &[]).unwrap();
        assert_eq!(text, "Great plan, keep going!");
        mock.assert();
    }

    #[test]
    fn http_error_maps_to_status_category() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create();

        std::env::set_var("STUDYFLOW_TEST_KEY_ERR", "test-key");
        let narrator =
            GeminiNarrator::from_config(&test_config(&server.url(), "STUDYFLOW_TEST_KEY_ERR"))
                .unwrap();

        let err = narrator
            .reflection_feedback(&make_entry(), &StatusReport::default())
            .unwrap_err();
        assert_eq!(err.category(), "Status");
    }

    #[test]
    fn empty_candidates_map_to_empty_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create();

        std::env::set_var("STUDYFLOW_TEST_KEY_EMPTY", "test-key");
        let narrator =
            GeminiNarrator::from_config(&test_config(&server.url(), "STUDYFLOW_TEST_KEY_EMPTY"))
                .unwrap();

        let err = narrator.plan_summary("summary", &[]).unwrap_err();
        assert_eq!(err.category(), "EmptyResponse");
    }
}
