//! Fake providers shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use triad_core::search::{SearchHit, SearchRequest, SearchResponse};
use triad_core::{LLMError, SearchError, SearchProvider, Sleeper, LLM};

pub const IPHONE_QUERY: &str = "Compare iPhone 16 Pro vs Samsung S25 Ultra specs";

pub const ANALYSIS_JSON: &str = r#"{
    "topic_type": "Technical Comparison",
    "core_answer": "The S25 Ultra has the bigger screen; the 16 Pro the faster chip.",
    "detailed_analysis": "Camera, battery and display differ as follows...",
    "expert_context": "Both flagships target the same premium segment."
}"#;

pub const REPORT_MARKDOWN: &str =
    "# iPhone 16 Pro vs Samsung S25 Ultra\n\n| Spec | iPhone | Samsung |\n|---|---|---|\n| Screen | 6.3\" | 6.9\" |\n";

/// Search provider returning a canned response or a canned failure.
#[derive(Clone, Default)]
pub struct FakeSearch {
    response: SearchResponse,
    failure: Option<String>,
    pub requests: Arc<Mutex<Vec<SearchRequest>>>,
}

impl FakeSearch {
    pub fn with_hits(count: usize) -> Self {
        let results = (0..count)
            .map(|n| SearchHit {
                title: Some(format!("Review {}", n)),
                url: Some(format!("https://reviews.example.com/{}", n)),
                content: Some(format!("Spec sheet excerpt {}", n)),
            })
            .collect();
        Self {
            response: SearchResponse {
                answer: Some("The S25 Ultra has a larger display.".to_string()),
                results,
            },
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.failure {
            Some(message) => Err(SearchError::Network(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

/// A recorded LLM call.
#[derive(Debug, Clone)]
pub struct LlmCall {
    pub system: Option<String>,
    pub prompt: String,
}

/// LLM that replays scripted results in order and records every call.
#[derive(Clone, Default)]
pub struct ScriptedLLM {
    script: Arc<Mutex<VecDeque<Result<String, LLMError>>>>,
    pub calls: Arc<Mutex<Vec<LlmCall>>>,
}

impl ScriptedLLM {
    pub fn new(script: Vec<Result<String, LLMError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            calls: Arc::default(),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next(&self, system: Option<&str>, prompt: &str) -> Result<String, LLMError> {
        self.calls.lock().unwrap().push(LlmCall {
            system: system.map(str::to_string),
            prompt: prompt.to_string(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::RequestFailed("script exhausted".to_string())))
    }
}

#[async_trait]
impl LLM for ScriptedLLM {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.next(None, prompt)
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String, LLMError> {
        self.next(Some(system), prompt)
    }
}

/// Sleeper that records requested delays without waiting.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    pub sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
