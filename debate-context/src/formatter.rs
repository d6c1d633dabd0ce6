//! Produces the "Previous Debate" text prepended to an agent's user
//! prompt: the agent's own most recent summary if one exists, else the
//! full round history when the caller opts in, else nothing.

use debate_protocol::{AgentId, ContributionKind, Round};

/// Render every round's contributions as plain text, oldest first.
pub fn format_history(rounds: &[Round]) -> String {
    let mut out = String::new();
    for round in rounds {
        out.push_str(&format!("### Round {}\n", round.round_number));
        for contribution in &round.contributions {
            let kind = match contribution.kind {
                ContributionKind::Proposal => "proposal",
                ContributionKind::Critique => "critique",
                ContributionKind::Refinement => "refinement",
            };
            match &contribution.target_agent_id {
                Some(target) => out.push_str(&format!(
                    "- [{kind}] {} (of {}): {}\n",
                    contribution.agent_id, target, contribution.content
                )),
                None => out.push_str(&format!(
                    "- [{kind}] {}: {}\n",
                    contribution.agent_id, contribution.content
                )),
            }
        }
        out.push('\n');
    }
    out
}

/// The text to prepend for `agent_id`'s next turn: that agent's most
/// recent summary (scanning rounds newest-first), or — only when
/// `include_full_history` is set and no summary exists — the full
/// formatted history. Returns `None` when neither applies, meaning no
/// "Previous Debate" section should be emitted at all.
pub fn previous_context(
    rounds: &[Round],
    agent_id: &AgentId,
    include_full_history: bool,
) -> Option<String> {
    for round in rounds.iter().rev() {
        if let Some(summary) = round.summaries.get(agent_id.as_str()) {
            return Some(summary.summary.clone());
        }
    }
    if include_full_history && !rounds.is_empty() {
        Some(format_history(rounds))
    } else {
        None
    }
}

/// Prepend a "Previous Debate" section to `base_prompt`, or return
/// `base_prompt` unchanged when there is nothing to prepend.
pub fn prepend_context(base_prompt: &str, previous: Option<&str>) -> String {
    match previous {
        Some(text) if !text.trim().is_empty() => {
            format!("## Previous Debate\n\n{text}\n\n## Task\n\n{base_prompt}")
        }
        _ => base_prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_protocol::{Contribution, ContributionMetadata, DurationMs, Role, Summary, SummaryMetadata};
    use std::collections::BTreeMap;

    fn contribution(agent: &str, kind: ContributionKind, content: &str) -> Contribution {
        Contribution {
            agent_id: AgentId::new(agent),
            role: Role::Architect,
            kind,
            target_agent_id: None,
            content: content.to_string(),
            metadata: ContributionMetadata {
                latency_ms: DurationMs::ZERO,
                tokens_used: None,
                model: "test".into(),
                tool_calls: vec![],
                error: None,
                retried: false,
            },
        }
    }

    #[test]
    fn format_history_includes_round_and_agent() {
        let round = Round {
            round_number: 1,
            contributions: vec![contribution("a1", ContributionKind::Proposal, "do X")],
            summaries: BTreeMap::new(),
            timestamp: chrono::Utc::now(),
        };
        let text = format_history(&[round]);
        assert!(text.contains("Round 1"));
        assert!(text.contains("a1"));
        assert!(text.contains("do X"));
    }

    #[test]
    fn previous_context_prefers_summary_over_history() {
        let mut summaries = BTreeMap::new();
        summaries.insert(
            "a1".to_string(),
            Summary {
                agent_role: Role::Architect,
                summary: "condensed".into(),
                metadata: SummaryMetadata {
                    before_chars: 100,
                    after_chars: 9,
                    method: "llm".into(),
                    latency_ms: DurationMs::ZERO,
                    tokens_used: None,
                    model: "test".into(),
                    temperature: 0.0,
                    provider: "mock".into(),
                    timestamp: chrono::Utc::now(),
                },
            },
        );
        let round = Round {
            round_number: 1,
            contributions: vec![contribution("a1", ContributionKind::Proposal, "do X")],
            summaries,
            timestamp: chrono::Utc::now(),
        };
        let text = previous_context(&[round], &AgentId::new("a1"), true).unwrap();
        assert_eq!(text, "condensed");
    }

    #[test]
    fn previous_context_falls_back_to_full_history_when_allowed() {
        let round = Round {
            round_number: 1,
            contributions: vec![contribution("a1", ContributionKind::Proposal, "do X")],
            summaries: BTreeMap::new(),
            timestamp: chrono::Utc::now(),
        };
        let text = previous_context(&[round], &AgentId::new("a1"), true).unwrap();
        assert!(text.contains("do X"));
    }

    #[test]
    fn previous_context_none_without_full_history_opt_in() {
        let round = Round {
            round_number: 1,
            contributions: vec![contribution("a1", ContributionKind::Proposal, "do X")],
            summaries: BTreeMap::new(),
            timestamp: chrono::Utc::now(),
        };
        assert!(previous_context(&[round], &AgentId::new("a1"), false).is_none());
    }

    #[test]
    fn prepend_context_passthrough_when_none() {
        assert_eq!(prepend_context("base", None), "base");
    }

    #[test]
    fn prepend_context_wraps_when_present() {
        let wrapped = prepend_context("base", Some("prior"));
        assert!(wrapped.contains("Previous Debate"));
        assert!(wrapped.contains("prior"));
        assert!(wrapped.ends_with("base"));
    }
}
