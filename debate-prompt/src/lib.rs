#![deny(missing_docs)]
//! Prompt resolution and the built-in per-role prompt packs agents
//! fall back to when no file-backed prompt is configured.
//!
//! [`resolve`] never fails for its caller: a missing, unreadable, or
//! whitespace-only file falls back to the built-in default and logs a
//! warning rather than propagating an error.

mod builtin;

use std::path::Path;

use debate_protocol::{PromptSource, PromptSourceKind};

pub use builtin::{
    clarification_prompt, default_judge_synthesis_prompt, summary_prompt, system_prompt,
};

/// A resolved prompt's text and where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedPrompt {
    /// The prompt text to use.
    pub text: String,
    /// Provenance, for recording in `DebateState::prompt_sources`.
    pub source: PromptSource,
}

/// Resolve one labeled prompt.
///
/// If `prompt_path` is `None`, returns `default_text` with
/// [`PromptSourceKind::BuiltIn`]. Otherwise resolves `prompt_path`
/// relative to `config_dir`, reads it fully, and falls back to
/// `default_text` (logging a warning) if the file is missing,
/// unreadable, or whitespace-only.
pub async fn resolve(
    label: &str,
    config_dir: &Path,
    prompt_path: Option<&str>,
    default_text: &str,
) -> ResolvedPrompt {
    let Some(rel_path) = prompt_path else {
        return ResolvedPrompt {
            text: default_text.to_string(),
            source: PromptSource { source: PromptSourceKind::BuiltIn, abs_path: None },
        };
    };

    let abs_path = config_dir.join(rel_path);
    match tokio::fs::read_to_string(&abs_path).await {
        Ok(contents) if !contents.trim().is_empty() => ResolvedPrompt {
            text: contents,
            source: PromptSource {
                source: PromptSourceKind::File,
                abs_path: Some(abs_path.to_string_lossy().into_owned()),
            },
        },
        Ok(_) => {
            tracing::warn!(label, path = %abs_path.display(), "prompt file is whitespace-only, falling back to built-in");
            ResolvedPrompt {
                text: default_text.to_string(),
                source: PromptSource { source: PromptSourceKind::BuiltIn, abs_path: None },
            }
        }
        Err(e) => {
            tracing::warn!(label, path = %abs_path.display(), error = %e, "could not read prompt file, falling back to built-in");
            ResolvedPrompt {
                text: default_text.to_string(),
                source: PromptSource { source: PromptSourceKind::BuiltIn, abs_path: None },
            }
        }
    }
}
