//! Environment-derived tracing credentials.
//!
//! Reading `std::env` is the one piece of "environment loading" this
//! crate takes on directly, since it gates a single boolean the
//! orchestrator's caller needs before wiring up a [`debate_hooks::TracingHook`]:
//! whether a Langfuse export is attempted at all. Provider credentials
//! are a capability-implementation concern and never touch this module.

use debate_protocol::TraceBackend;

/// Credentials needed to export spans to Langfuse.
#[derive(Debug, Clone)]
pub struct LangfuseCredentials {
    /// `LANGFUSE_SECRET_KEY`.
    pub secret_key: String,
    /// `LANGFUSE_PUBLIC_KEY`.
    pub public_key: String,
    /// `LANGFUSE_BASE_URL`, if set.
    pub base_url: Option<String>,
}

/// Resolve export credentials for the configured trace backend.
///
/// Returns `None` when `backend` is [`TraceBackend::None`], or when
/// `backend` is [`TraceBackend::Langfuse`] but either required
/// variable is unset or empty — in which case a warning is logged and
/// tracing export is silently disabled rather than failing the
/// caller.
pub fn resolve_trace_env(backend: TraceBackend) -> Option<LangfuseCredentials> {
    match backend {
        TraceBackend::None => None,
        TraceBackend::Langfuse => {
            let secret_key = non_empty_env("LANGFUSE_SECRET_KEY");
            let public_key = non_empty_env("LANGFUSE_PUBLIC_KEY");
            match (secret_key, public_key) {
                (Some(secret_key), Some(public_key)) => Some(LangfuseCredentials {
                    secret_key,
                    public_key,
                    base_url: non_empty_env("LANGFUSE_BASE_URL"),
                }),
                _ => {
                    tracing::warn!(
                        "debate.trace=langfuse but LANGFUSE_SECRET_KEY/LANGFUSE_PUBLIC_KEY are unset; \
                         tracing export disabled"
                    );
                    None
                }
            }
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_none_never_reads_the_environment() {
        assert!(resolve_trace_env(TraceBackend::None).is_none());
    }

    #[test]
    fn langfuse_without_either_variable_set_disables_export() {
        unsafe { std::env::remove_var("LANGFUSE_SECRET_KEY"); }
        unsafe { std::env::remove_var("LANGFUSE_PUBLIC_KEY"); }
        assert!(resolve_trace_env(TraceBackend::Langfuse).is_none());
    }

    #[test]
    fn langfuse_with_both_variables_set_resolves_credentials() {
        unsafe { std::env::set_var("LANGFUSE_SECRET_KEY", "sk-test"); }
        unsafe { std::env::set_var("LANGFUSE_PUBLIC_KEY", "pk-test"); }
        unsafe { std::env::remove_var("LANGFUSE_BASE_URL"); }
        let creds = resolve_trace_env(TraceBackend::Langfuse).expect("credentials should resolve");
        assert_eq!(creds.secret_key, "sk-test");
        assert_eq!(creds.public_key, "pk-test");
        assert!(creds.base_url.is_none());
        unsafe { std::env::remove_var("LANGFUSE_SECRET_KEY"); }
        unsafe { std::env::remove_var("LANGFUSE_PUBLIC_KEY"); }
    }

    #[test]
    fn a_blank_secret_key_counts_as_unset() {
        unsafe { std::env::set_var("LANGFUSE_SECRET_KEY", "   "); }
        unsafe { std::env::set_var("LANGFUSE_PUBLIC_KEY", "pk-test"); }
        assert!(resolve_trace_env(TraceBackend::Langfuse).is_none());
        unsafe { std::env::remove_var("LANGFUSE_SECRET_KEY"); }
        unsafe { std::env::remove_var("LANGFUSE_PUBLIC_KEY"); }
    }
}
