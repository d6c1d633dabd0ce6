//! Synthesis of a debate's full round history into one [`FinalSolution`],
//! and the shared JSON-extraction helper clarification parsing also
//! uses.

use debate_protocol::{AgentId, FinalSolution};
use serde::Deserialize;

/// Pull a JSON object or array out of an LLM response that may wrap it
/// in prose or a markdown code fence.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return trimmed;
    }

    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[derive(Debug, Deserialize)]
struct RawSynthesis {
    description: String,
    #[serde(default)]
    tradeoffs: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    confidence: Option<u8>,
    #[serde(default)]
    unfulfilled_major_requirements: Option<Vec<String>>,
}

/// Parse a judge's raw completion text into a [`FinalSolution`].
///
/// Tries to extract and deserialize a JSON object first, since the
/// judge's synthesis prompt asks for one. Falls back to treating the
/// entire response as the description with a neutral confidence when
/// the text isn't valid JSON — a judge that answers in prose still
/// produces a usable, if less structured, result.
pub fn parse_synthesis(raw: &str, synthesized_by: AgentId) -> FinalSolution {
    match serde_json::from_str::<RawSynthesis>(extract_json(raw)) {
        Ok(parsed) => FinalSolution {
            description: parsed.description,
            tradeoffs: parsed.tradeoffs,
            recommendations: parsed.recommendations,
            confidence: parsed.confidence.unwrap_or(50).min(100),
            synthesized_by,
            unfulfilled_major_requirements: parsed.unfulfilled_major_requirements,
        },
        Err(_) => FinalSolution {
            description: raw.trim().to_string(),
            tradeoffs: Vec::new(),
            recommendations: Vec::new(),
            confidence: 50,
            synthesized_by,
            unfulfilled_major_requirements: None,
        },
    }
}

/// Parse a clarifying-questions response into a flat list of question
/// texts. Accepts either a bare JSON array of strings or a newline-
/// separated list, since the clarification prompts don't mandate a
/// wire format as strictly as synthesis does.
pub fn parse_questions(raw: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(extract_json(raw)) {
        return list.into_iter().map(|q| q.trim().to_string()).filter(|q| !q.is_empty()).collect();
    }
    raw.lines()
        .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
