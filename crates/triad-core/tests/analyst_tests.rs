mod common;

use std::time::Duration;

use common::{RecordingSleeper, ScriptedLLM, ANALYSIS_JSON};
use triad_core::{AnalysisOutcome, Analyst, GeminiClient, LLMError, RetryPolicy};

fn analyst(llm: ScriptedLLM, sleeper: RecordingSleeper) -> Analyst {
    Analyst::new(llm).with_sleeper(sleeper)
}

#[tokio::test]
async fn test_analysis_strips_fences() {
    let llm = ScriptedLLM::replying(&format!("```json\n{}\n```", ANALYSIS_JSON));
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm.clone(), sleeper.clone())
        .analyze(r#"{"query_used":"q"}"#)
        .await;

    let parsed = outcome.parsed().expect("four-field analysis");
    assert_eq!(parsed.topic_type, "Technical Comparison");
    assert_eq!(llm.call_count(), 1);
    assert!(sleeper.recorded().is_empty());
}

#[tokio::test]
async fn test_prompt_embeds_search_data() {
    let llm = ScriptedLLM::replying(ANALYSIS_JSON);
    let calls = llm.calls.clone();

    analyst(llm, RecordingSleeper::default())
        .analyze(r#"{"query_used": "quantum error correction"}"#)
        .await;

    let calls = calls.lock().unwrap();
    assert!(calls[0].prompt.contains("quantum error correction"));
    assert!(calls[0].system.is_none());
}

#[tokio::test]
async fn test_rate_limit_twice_then_success() {
    let llm = ScriptedLLM::new(vec![
        Err(LLMError::RateLimited),
        Err(LLMError::ApiError {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        }),
        Ok(ANALYSIS_JSON.to_string()),
    ]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm.clone(), sleeper.clone()).analyze("{}").await;

    assert_eq!(outcome, AnalysisOutcome::Completed(ANALYSIS_JSON.trim().to_string()));
    assert_eq!(llm.call_count(), 3);
    assert_eq!(
        sleeper.recorded(),
        vec![Duration::from_secs(10), Duration::from_secs(20)]
    );
}

#[tokio::test]
async fn test_rate_limit_detected_from_message() {
    let llm = ScriptedLLM::new(vec![
        Err(LLMError::RequestFailed("429 Too Many Requests".to_string())),
        Ok(ANALYSIS_JSON.to_string()),
    ]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm, sleeper.clone()).analyze("{}").await;

    assert!(!outcome.is_failed());
    assert_eq!(sleeper.recorded(), vec![Duration::from_secs(10)]);
}

#[tokio::test]
async fn test_rate_limit_exhaustion() {
    let llm = ScriptedLLM::new(vec![
        Err(LLMError::RateLimited),
        Err(LLMError::RateLimited),
        Err(LLMError::RateLimited),
        Ok(ANALYSIS_JSON.to_string()),
    ]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm.clone(), sleeper.clone()).analyze("{}").await;

    assert_eq!(outcome, AnalysisOutcome::Exhausted { attempts: 3 });
    // Never more than three attempts, even with a success queued
    assert_eq!(llm.call_count(), 3);

    let delays = sleeper.recorded();
    assert_eq!(delays.len(), 3);
    for pair in delays.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_secs(10));
    }

    let value: serde_json::Value = serde_json::from_str(&outcome.into_payload()).unwrap();
    assert_eq!(value["error"], "Failed after max retries.");
}

#[tokio::test]
async fn test_other_errors_fail_without_retry() {
    let llm = ScriptedLLM::new(vec![
        Err(LLMError::ApiError {
            status: 400,
            message: "API key not valid".to_string(),
        }),
        Ok(ANALYSIS_JSON.to_string()),
    ]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm.clone(), sleeper.clone()).analyze("{}").await;

    assert!(matches!(outcome, AnalysisOutcome::Failed { .. }));
    assert_eq!(llm.call_count(), 1);
    assert!(sleeper.recorded().is_empty());

    let value: serde_json::Value = serde_json::from_str(&outcome.into_payload()).unwrap();
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("Analysis failed: API returned error: 400"));
}

#[tokio::test]
async fn test_custom_retry_policy() {
    let llm = ScriptedLLM::new(vec![Err(LLMError::RateLimited), Err(LLMError::RateLimited)]);
    let sleeper = RecordingSleeper::default();

    let outcome = Analyst::new(llm.clone())
        .with_retry(RetryPolicy::new(2, Duration::from_millis(5)))
        .with_sleeper(sleeper.clone())
        .analyze("{}")
        .await;

    assert_eq!(outcome, AnalysisOutcome::Exhausted { attempts: 2 });
    assert_eq!(
        sleeper.recorded(),
        vec![Duration::from_millis(5), Duration::from_millis(10)]
    );
}

#[tokio::test]
async fn test_failure_payload_never_contains_api_key() {
    let client = GeminiClient::new("AIzaSECRETKEY123").with_base_url("http://127.0.0.1:1/v1beta");
    let sleeper = RecordingSleeper::default();

    let outcome = Analyst::new(client)
        .with_sleeper(sleeper.clone())
        .analyze(r#"{"query_used":"q"}"#)
        .await;

    assert!(outcome.is_failed());
    assert!(sleeper.recorded().is_empty());
    let payload = outcome.into_payload();
    assert!(payload.contains("Analysis failed: Network error"));
    assert!(!payload.contains("AIzaSECRETKEY123"));
}

#[tokio::test]
async fn test_incidental_429_in_parse_error_is_not_retried() {
    let llm = ScriptedLLM::new(vec![Err(LLMError::ParseError(
        "expected value at line 1 column 429".to_string(),
    ))]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm.clone(), sleeper.clone()).analyze("{}").await;

    assert!(matches!(outcome, AnalysisOutcome::Failed { .. }));
    assert_eq!(llm.call_count(), 1);
    assert!(sleeper.recorded().is_empty());
}

#[tokio::test]
async fn test_huge_backoff_step_does_not_panic() {
    let llm = ScriptedLLM::new(vec![Err(LLMError::RateLimited), Ok(ANALYSIS_JSON.to_string())]);
    let sleeper = RecordingSleeper::default();

    let outcome = analyst(llm, sleeper.clone())
        .with_retry(RetryPolicy::new(3, Duration::from_secs(u64::MAX / 2 + 1)))
        .analyze("{}")
        .await;

    assert!(outcome.parsed().is_some());
    assert_eq!(sleeper.recorded(), vec![Duration::MAX]);
}
