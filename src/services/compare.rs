//! Document comparison through the completion API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::llm::{prompts, ChatMessage, CompletionApi, CompletionRequest, LlmConfig, LlmError};

/// Errors produced while handling a comparison request.
#[derive(Debug, Error)]
pub enum CompareError {
    /// No credential for the completion service.
    #[error("OpenAI API key is not configured")]
    Configuration,

    /// Request body could not be read as `{doc1, doc2}`.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// One of the documents is missing or empty.
    #[error("Both documents are required")]
    Validation,

    /// The completion call itself failed.
    #[error(transparent)]
    External(#[from] LlmError),

    /// The completion carried no text.
    #[error("No response content from completion API")]
    EmptyResponse,

    /// The completion text is not JSON even after cleaning.
    #[error("Failed to parse completion response as JSON")]
    MalformedResponse(#[source] serde_json::Error),
}

/// Body of `POST /api/compare`.
#[derive(Debug, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub doc1: Option<String>,
    #[serde(default)]
    pub doc2: Option<String>,
}

impl CompareRequest {
    /// Both documents, if present and non-empty.
    pub fn documents(&self) -> Result<(&str, &str), CompareError> {
        match (self.doc1.as_deref(), self.doc2.as_deref()) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
            _ => Err(CompareError::Validation),
        }
    }
}

/// Runs comparisons against a completion API.
#[derive(Clone)]
pub struct ComparisonService {
    api: Arc<dyn CompletionApi>,
    temperature: f32,
    language: String,
}

impl ComparisonService {
    pub fn new(api: Arc<dyn CompletionApi>, config: &LlmConfig) -> Self {
        Self {
            api,
            temperature: config.temperature,
            language: config.language.clone(),
        }
    }

    /// Fail early when the completion service has no credential.
    pub fn ensure_configured(&self) -> Result<(), CompareError> {
        if self.api.is_configured() {
            Ok(())
        } else {
            Err(CompareError::Configuration)
        }
    }

    /// Handle a raw endpoint body: configuration, parsing, validation, comparison.
    pub async fn handle(&self, body: &[u8]) -> Result<Value, CompareError> {
        self.ensure_configured()?;

        let request: CompareRequest = serde_json::from_slice(body)
            .map_err(|e| CompareError::InvalidRequest(e.to_string()))?;
        let (original, modified) = request.documents()?;

        self.compare(original, modified).await
    }

    /// Compare two documents and return the model's JSON verbatim.
    pub async fn compare(&self, original: &str, modified: &str) -> Result<Value, CompareError> {
        self.ensure_configured()?;

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(prompts::system_prompt(&self.language)),
                ChatMessage::user(prompts::user_prompt(original, modified)),
            ],
            temperature: self.temperature,
            json_mode: true,
        };

        info!(
            "Comparing documents ({} and {} bytes)",
            original.len(),
            modified.len()
        );
        let content = self
            .api
            .complete(request)
            .await?
            .filter(|c| !c.is_empty())
            .ok_or(CompareError::EmptyResponse)?;

        let cleaned = clean_completion(&content);
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(value) => {
                debug!("Parsed completion ({} bytes)", cleaned.len());
                Ok(value)
            }
            Err(e) => {
                error!("JSON parse error: {}, content: {}", e, content);
                Err(CompareError::MalformedResponse(e))
            }
        }
    }
}

/// Remove C0 and C1 control characters and surrounding whitespace.
pub fn clean_completion(content: &str) -> String {
    content
        .chars()
        .filter(|c| !matches!(*c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeApi {
        configured: bool,
        reply: Result<Option<String>, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeApi {
        fn replying(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                configured: true,
                reply: Ok(reply.map(str::to_string)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionApi for FakeApi {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, LlmError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(LlmError::Api)
        }
    }

    fn service(api: Arc<FakeApi>) -> ComparisonService {
        ComparisonService::new(api, &LlmConfig::default())
    }

    #[test]
    fn test_clean_completion_strips_controls() {
        assert_eq!(
            clean_completion("\u{0002} {\"a\":\n\t1}\u{0085} \n"),
            "{\"a\":1}"
        );
        assert_eq!(clean_completion("{\"s\": \"é ñ\"}"), "{\"s\": \"é ñ\"}");
    }

    #[tokio::test]
    async fn test_compare_builds_two_message_prompt() {
        let api = FakeApi::replying(Some("{\"differences\": []}"));
        let value = service(api.clone()).compare("uno", "dos").await.unwrap();
        assert_eq!(value, json!({"differences": []}));

        let seen = api.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert!(request.json_mode);
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
        assert!(request.messages[0].content.contains("\"differences\""));
        assert!(request.messages[1].content.contains("\"\"\"\nuno\n\"\"\""));
        assert!(request.messages[1].content.contains("\"\"\"\ndos\n\"\"\""));
    }

    #[tokio::test]
    async fn test_compare_parses_after_cleaning() {
        let api = FakeApi::replying(Some("\u{0001}{\"differences\": [], \"summary\": \"ok\"}\u{0000}"));
        let value = service(api).compare("a", "b").await.unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[tokio::test]
    async fn test_compare_malformed() {
        let api = FakeApi::replying(Some("not json at all"));
        let err = service(api).compare("a", "b").await.unwrap_err();
        assert!(matches!(err, CompareError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_compare_empty_content() {
        let err = service(FakeApi::replying(None)).compare("a", "b").await.unwrap_err();
        assert!(matches!(err, CompareError::EmptyResponse));

        let err = service(FakeApi::replying(Some(""))).compare("a", "b").await.unwrap_err();
        assert!(matches!(err, CompareError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_handle_checks_configuration_first() {
        let api = Arc::new(FakeApi {
            configured: false,
            reply: Ok(None),
            seen: Mutex::new(Vec::new()),
        });
        let err = service(api.clone()).handle(b"{}").await.unwrap_err();
        assert!(matches!(err, CompareError::Configuration));
        assert!(api.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_requires_both_documents() {
        let api = FakeApi::replying(Some("{}"));
        let svc = service(api.clone());

        for body in [
            json!({"doc1": "a"}),
            json!({"doc2": "b"}),
            json!({"doc1": "", "doc2": "b"}),
            json!({"doc1": null, "doc2": "b"}),
        ] {
            let err = svc.handle(body.to_string().as_bytes()).await.unwrap_err();
            assert!(matches!(err, CompareError::Validation), "{}", body);
        }
        assert!(api.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_rejects_non_json_body() {
        let err = service(FakeApi::replying(None)).handle(b"doc1=a").await.unwrap_err();
        assert!(matches!(err, CompareError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_external_failure_is_reported() {
        let api = Arc::new(FakeApi {
            configured: true,
            reply: Err("quota exceeded".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let err = service(api).compare("a", "b").await.unwrap_err();
        assert!(matches!(err, CompareError::External(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
