//! Drives the capability to compress an agent's view of the debate
//! into a single per-round summary.

use std::time::Instant;

use debate_protocol::{
    Capability, CapabilityRequest, DurationMs, ProviderError, Role, SummarizationConfig, Summary,
    SummaryMetadata,
};

/// Summarize `content` from `role`'s perspective using `capability`,
/// truncating the result to `config.max_length` characters (no
/// ellipsis) and recording before/after character counts.
#[allow(clippy::too_many_arguments)]
pub async fn summarize(
    capability: &impl Capability,
    role: Role,
    config: &SummarizationConfig,
    system_prompt: &str,
    summary_prompt: &str,
    content: &str,
    model: &str,
    temperature: f64,
    provider: &str,
) -> Result<Summary, ProviderError> {
    let before_chars = content.chars().count();
    let request = CapabilityRequest {
        model: model.to_string(),
        temperature,
        system_prompt: system_prompt.to_string(),
        user_prompt: format!("{summary_prompt}\n\n{content}"),
        messages: vec![],
        tools: None,
    };

    let started = Instant::now();
    let response = capability.complete(request).await?;
    let latency_ms = DurationMs::from_millis(started.elapsed().as_millis() as u64);

    let truncated: String = response.text.chars().take(config.max_length).collect();
    let after_chars = truncated.chars().count();

    Ok(Summary {
        agent_role: role,
        summary: truncated,
        metadata: SummaryMetadata {
            before_chars,
            after_chars,
            method: config.method.clone(),
            latency_ms,
            tokens_used: response.usage.map(|u| u.output_tokens),
            model: model.to_string(),
            temperature,
            provider: provider.to_string(),
            timestamp: chrono::Utc::now(),
        },
    })
}
