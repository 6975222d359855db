//! HTTP-backed narrative enhancer for the Gemini `generateContent` API.
use std::time::Duration;

use courtside_game::{NarrativeBrief, NarrativeEnhancer, NarrativeError, build_prompt};
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Narrative service settings, read once at startup and injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            base_url: lookup("GEMINI_API_URL").unwrap_or(defaults.base_url),
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            timeout_secs: lookup("COURTSIDE_NARRATIVE_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.timeout_secs),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

pub struct GeminiNarrator {
    config: GeminiConfig,
    http: Client,
}

impl GeminiNarrator {
    /// Build a client whose every request is bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Request`] if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, NarrativeError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NarrativeError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl NarrativeEnhancer for GeminiNarrator {
    fn narrate(&self, brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        if !self.config.is_configured() {
            return Err(NarrativeError::NotConfigured);
        }
        let prompt = build_prompt(brief);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };
        debug!("requesting commentary from {}", self.config.endpoint());

        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| NarrativeError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NarrativeError::Request(format!("{status}: {body}")));
        }
        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| NarrativeError::Request(format!("invalid response: {e}")))?;
        let text = parsed.into_text();
        if text.trim().is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_game::{MatchSettings, PlayerProfile, RngBundle};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = GeminiConfig::from_lookup(lookup(&[]));
        assert!(!config.is_configured());
        assert_eq!(config, GeminiConfig::default());
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn environment_overrides_are_read() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-test"),
            ("GEMINI_API_URL", "http://localhost:9999/"),
            ("COURTSIDE_NARRATIVE_TIMEOUT_SECS", "3"),
        ]));
        assert!(config.is_configured());
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(
            config.endpoint(),
            "http://localhost:9999/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        let config =
            GeminiConfig::from_lookup(lookup(&[("COURTSIDE_NARRATIVE_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn response_parts_are_joined() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Tip-off, "},{"text":"here we go!"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.into_text(), "Tip-off, here we go!");
    }

    #[test]
    fn unconfigured_narrator_refuses_without_network() {
        let narrator = GeminiNarrator::new(GeminiConfig::default()).unwrap();
        let result = courtside_game::simulate(
            &PlayerProfile::named("A"),
            &PlayerProfile::named("B"),
            &MatchSettings::default(),
            &mut RngBundle::from_user_seed(1),
            None,
        )
        .unwrap();
        let brief = NarrativeBrief::from_result(&result);
        assert!(matches!(
            narrator.narrate(&brief),
            Err(NarrativeError::NotConfigured)
        ));
    }
}
