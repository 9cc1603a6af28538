//! Text-generation collaborator used by the risk, obligation and summary fallbacks.
//!
//! - [`LlmClient`] — one stateless completion call per prompt.
//! - [`openai`] — OpenAI-compatible chat-completions client.
//! - [`Llm`] — timeout-bounded handle handed to analyzers; every failure
//!   becomes `None` so analyzers can take their heuristic path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod error;
pub mod openai;

pub use error::LlmError;

/// Token budget for requests that don't set their own.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// A single prompt sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub temperature: f32,
    /// `None` takes the [`Llm`] handle's configured budget.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            temperature: 0.3,
            max_tokens: None,
        }
    }

    pub fn with_system(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one request and return the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Shared handle around an [`LlmClient`] with a hard per-call timeout.
///
/// One attempt per call, no retries.
#[derive(Clone)]
pub struct Llm {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
    temperature: f32,
    max_tokens: u32,
}

impl Llm {
    pub fn new(client: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            temperature: 0.3,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Handle with the timeout, temperature and token budget from `[llm]`.
    pub fn from_config(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self::new(client, Duration::from_secs(config.timeout_secs))
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Run `request` and return the trimmed response, or `None` on any failure,
    /// timeout, or blank answer.
    pub async fn ask(&self, mut request: CompletionRequest) -> Option<String> {
        request.temperature = self.temperature;
        request.max_tokens.get_or_insert(self.max_tokens);

        let outcome = match tokio::time::timeout(self.timeout, self.client.complete(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("llm returned an empty response");
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(e) => {
                warn!(error = %e, "llm call failed, using heuristic fallback");
                None
            }
        }
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    enum Reply {
        Text(String),
        Fail,
        Hang,
    }

    /// Scripted client for unit tests. Records every prompt it receives.
    pub struct MockLlm {
        reply: Reply,
        calls: AtomicUsize,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlm {
        fn with_reply(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn replying(text: &str) -> Arc<Self> {
            Self::with_reply(Reply::Text(text.to_string()))
        }

        pub fn failing() -> Arc<Self> {
            Self::with_reply(Reply::Fail)
        }

        /// Never answers; only a timeout gets the caller out.
        pub fn hanging() -> Arc<Self> {
            Self::with_reply(Reply::Hang)
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.requests().into_iter().map(|r| r.prompt).collect()
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmClient for MockLlm {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Fail => Err(LlmError::InvalidResponse("scripted failure".to_string())),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(LlmError::InvalidResponse("unreachable".to_string()))
                }
            }
        }
    }

    /// Wrap a mock in an [`Llm`] handle with a short timeout.
    pub fn handle(client: Arc<MockLlm>) -> Llm {
        Llm::new(client, Duration::from_millis(50))
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{handle, MockLlm};
    use super::*;

    #[tokio::test]
    async fn test_ask_trims_response() {
        let client = MockLlm::replying("  High Risk \n");
        let llm = handle(client.clone());
        assert_eq!(
            llm.ask(CompletionRequest::new("rate it")).await,
            Some("High Risk".to_string())
        );
        assert_eq!(client.call_count(), 1);
        assert_eq!(client.prompts(), vec!["rate it".to_string()]);
    }

    #[tokio::test]
    async fn test_ask_blank_response_is_none() {
        let llm = handle(MockLlm::replying("   "));
        assert_eq!(llm.ask(CompletionRequest::new("x")).await, None);
    }

    #[tokio::test]
    async fn test_ask_failure_is_none() {
        let client = MockLlm::failing();
        let llm = handle(client.clone());
        assert_eq!(llm.ask(CompletionRequest::new("x")).await, None);
        // one attempt, no retries
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ask_timeout_is_none() {
        let llm = handle(MockLlm::hanging());
        assert_eq!(llm.ask(CompletionRequest::new("x")).await, None);
    }

    #[tokio::test]
    async fn test_configured_max_tokens_fill_unset_requests() {
        let client = MockLlm::replying("ok");
        let config = LlmConfig {
            max_tokens: 50,
            temperature: 0.1,
            ..LlmConfig::default()
        };
        let llm = Llm::from_config(client.clone(), &config);

        llm.ask(CompletionRequest::new("default budget")).await;
        llm.ask(CompletionRequest::new("own budget").with_max_tokens(100)).await;

        let requests = client.requests();
        assert_eq!(requests[0].max_tokens, Some(50));
        assert_eq!(requests[0].temperature, 0.1);
        assert_eq!(requests[1].max_tokens, Some(100));
    }

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new("p")
            .with_system("You are a legal expert.")
            .with_max_tokens(100);
        assert_eq!(req.system_prompt.as_deref(), Some("You are a legal expert."));
        assert_eq!(req.max_tokens, Some(100));
        assert_eq!(CompletionRequest::new("p").max_tokens, None);
        assert_eq!(req.prompt, "p");
    }
}
