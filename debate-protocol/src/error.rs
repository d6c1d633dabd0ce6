//! Error taxonomy for the debate engine.
//!
//! Six kinds, matching how each is recovered: validation and fatal
//! errors abort the operation; provider and timeout errors are
//! partially recovered per-agent and surfaced in metadata; tool and
//! tracing errors never escape their local context.

use thiserror::Error;

/// Malformed config, missing required argument, invalid debate JSON,
/// a non-existent required file. Aborts the operation; at a CLI
/// boundary this is exit code 2.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A config document failed structural validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A debate id did not resolve to a stored debate.
    #[error("debate not found: {0}")]
    DebateNotFound(String),

    /// A referenced file does not exist or could not be read.
    #[error("missing file: {0}")]
    MissingFile(String),

    /// `resume` was called with an answer set that does not match
    /// the question ids emitted at suspend time.
    #[error("clarification answer set mismatch: expected {expected:?}, got {got:?}")]
    ClarificationMismatch {
        /// Ids emitted in the suspend payload.
        expected: Vec<String>,
        /// Ids the caller supplied.
        got: Vec<String>,
    },

    /// `resume` was called on a debate that is not suspended.
    #[error("debate {0} is not suspended")]
    NotSuspended(String),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

/// Transient LLM/capability failure. Retried once per agent turn; if
/// still failing, recorded as a contribution error marker.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request was rejected outright (bad model, malformed
    /// payload). Not retried.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A transient failure (rate limit, timeout, connection reset).
    /// Safe to retry.
    #[error("provider error: {0}")]
    Transient(String),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the orchestrator's one-retry policy applies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Transient(_))
    }
}

/// Returned inside a tool's JSON envelope, never raised — the agent
/// observes it as conversation content, not as a Rust error.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool registered under that name.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The tool's `execute` failed.
    #[error("tool execution failed: {0}")]
    ExecutionFailed(String),

    /// The supplied arguments did not match the tool's schema.
    #[error("invalid tool input: {0}")]
    InvalidInput(String),

    /// A file-backed tool was asked to read outside its configured
    /// context directory.
    #[error("path escapes context directory: {0}")]
    PathEscape(String),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

/// Tracing/hook failures. Never propagated — always logged at warn
/// and swallowed by the caller.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TracingError {
    /// A hook's `on_event` returned an error.
    #[error("hook failed: {0}")]
    HookFailed(String),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

/// `timeoutPerRound` elapsed while phase tasks were still running.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TimeoutError {
    /// A round's deadline elapsed with at least one task still running.
    #[error("round {round} timed out after {elapsed_ms}ms")]
    RoundTimedOut {
        /// The round number that timed out.
        round: u32,
        /// Elapsed milliseconds at cancellation.
        elapsed_ms: u64,
    },
}

/// Invariant violations: mismatched suspension id, impossible state
/// transitions. Aborts the debate with `status=failed`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FatalInternal {
    /// An invariant the orchestrator relies on did not hold.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

/// Top-level error wrapping every taxonomy member, for callers (the
/// orchestrator's public entry points) that need one return type.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DebateError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`ProviderError`].
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// See [`ToolError`].
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// See [`TimeoutError`].
    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// See [`FatalInternal`].
    #[error(transparent)]
    Fatal(#[from] FatalInternal),

    /// Catch-all.
    #[error("{0}")]
    Other(String),
}

impl DebateError {
    /// The exit code this error would translate to at a CLI boundary
    /// (the CLI itself is out of scope; this just documents the
    /// mapping so a caller can implement one).
    pub fn exit_code(&self) -> i32 {
        match self {
            DebateError::Validation(_) => 2,
            _ => 1,
        }
    }
}
