use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::runner::{AgentRunner, FragmentStream, RunnerError, Turn};
use crate::sse::parse_fragment_stream;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat-completions client speaking HTTP directly, no SDK. Auth rides on
/// default headers; every run is a single streaming POST.
pub struct OpenAiRunner {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiRunner {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, RunnerError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|_| RunnerError::Provider("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
            model: model.into(),
        })
    }

    /// Point the client at a compatible non-default endpoint (proxy, test
    /// server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, instructions: &str, turns: &[Turn]) -> Value {
        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": instructions,
        })];
        messages.extend(turns.iter().map(|turn| {
            serde_json::json!({
                "role": turn.role.as_str(),
                "content": turn.text,
            })
        }));

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": true,
        })
    }
}

#[async_trait]
impl AgentRunner for OpenAiRunner {
    async fn run(
        &self,
        instructions: &str,
        turns: &[Turn],
    ) -> Result<FragmentStream, RunnerError> {
        let payload = self.build_request(instructions, turns);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, "model provider request failed");
            return Err(classify_provider_error(status, &error_text));
        }

        Ok(parse_fragment_stream(response.bytes_stream()))
    }
}

/// Map a provider failure onto the runner taxonomy. Quota and billing
/// problems outrank plain rate limiting; everything else keeps the raw
/// provider text.
fn classify_provider_error(status: StatusCode, body: &str) -> RunnerError {
    let lowered = body.to_lowercase();
    if lowered.contains("quota") || lowered.contains("billing") {
        RunnerError::Quota
    } else if status == StatusCode::TOO_MANY_REQUESTS || lowered.contains("rate limit") {
        RunnerError::RateLimited
    } else {
        RunnerError::Provider(format!("({status}): {body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Role;

    #[test]
    fn test_classify_quota_error() {
        let err = classify_provider_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "You exceeded your current quota"}}"#,
        );
        assert!(matches!(err, RunnerError::Quota));
    }

    #[test]
    fn test_classify_rate_limit_error() {
        let err = classify_provider_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "Too many requests"}}"#,
        );
        assert!(matches!(err, RunnerError::RateLimited));
    }

    #[test]
    fn test_classify_generic_error() {
        let err = classify_provider_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded",
        );
        match err {
            RunnerError::Provider(message) => assert!(message.contains("upstream exploded")),
            _ => panic!("Expected Provider variant"),
        }
    }

    #[test]
    fn test_build_request_shape() {
        let runner = OpenAiRunner::new("sk-test", "gpt-4o-mini").unwrap();
        let turns = vec![Turn::user("Hello"), Turn::assistant("Hi there")];
        let payload = runner.build_request("Be concise.", &turns);

        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["stream"], true);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Be concise.");
        assert_eq!(messages[1]["role"], Role::User.as_str());
        assert_eq!(messages[2]["role"], Role::Assistant.as_str());
    }
}
