//! The one-retry-per-agent-turn failure policy (spec §4.8's failure
//! policy / §7's `ProviderError` propagation policy): a transient
//! capability error is retried once; if it still fails — or the
//! error was never retryable to begin with — the turn's contribution
//! is recorded with an error marker instead of aborting the phase.

use debate_protocol::{AgentTurnOutput, ContributionMetadata, DurationMs, ProviderError};

/// Run `call` once; if it fails with a retryable [`ProviderError`],
/// run it once more. Never propagates — a persistent failure is
/// folded into an error-marked [`AgentTurnOutput`] so the calling
/// phase can keep going for the other agents.
pub async fn call_with_retry<F, Fut>(model: &str, mut call: F) -> AgentTurnOutput
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<AgentTurnOutput, ProviderError>>,
{
    match call().await {
        Ok(output) => output,
        Err(err) if err.is_retryable() => match call().await {
            Ok(mut output) => {
                output.metadata.retried = true;
                output
            }
            Err(err) => error_output(model, &err, true),
        },
        Err(err) => error_output(model, &err, false),
    }
}

/// The same one-retry policy as [`call_with_retry`], generalized to
/// any capability call whose success type isn't an
/// [`AgentTurnOutput`] — judge synthesis and clarifying-question
/// collection in particular. Unlike `call_with_retry`, a persistent
/// failure is propagated rather than folded into a sentinel value,
/// since neither call site has an "error-marked contribution" to fall
/// back to.
pub async fn retry_once<F, Fut, T>(mut call: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ProviderError>>,
{
    match call().await {
        Ok(value) => Ok(value),
        Err(err) if err.is_retryable() => call().await,
        Err(err) => Err(err),
    }
}

fn error_output(model: &str, err: &ProviderError, retried: bool) -> AgentTurnOutput {
    AgentTurnOutput {
        content: String::new(),
        metadata: ContributionMetadata {
            latency_ms: DurationMs::ZERO,
            tokens_used: None,
            model: model.to_string(),
            tool_calls: vec![],
            error: Some(err.to_string()),
            retried,
        },
    }
}
