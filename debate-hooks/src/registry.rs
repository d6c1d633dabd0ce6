//! Dispatches one event to every registered hook.

use std::sync::Arc;

use debate_protocol::{DebateHook, DebateHookEvent};

/// An ordered collection of [`DebateHook`]s, all dispatched on every
/// event regardless of what an earlier hook returned.
///
/// Unlike a gating hook pipeline, there is no short-circuiting here:
/// hooks are observational, so one hook's failure must never prevent
/// another hook — or the orchestrator — from proceeding.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn DebateHook>>,
}

impl HookRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Add a hook, dispatched in registration order.
    pub fn add(&mut self, hook: Arc<dyn DebateHook>) {
        self.hooks.push(hook);
    }

    /// Whether any hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Dispatch one event to every registered hook in order. A failing
    /// hook is logged at `warn` and does not stop dispatch to the
    /// remaining hooks.
    pub async fn dispatch(&self, event: &DebateHookEvent<'_>) {
        for hook in &self.hooks {
            if let Err(err) = hook.on_event(event).await {
                tracing::warn!(error = %err, "hook failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_protocol::TracingError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHook(Arc<AtomicUsize>);

    #[async_trait::async_trait]
    impl DebateHook for CountingHook {
        async fn on_event(&self, _event: &DebateHookEvent<'_>) -> Result<(), TracingError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHook;

    #[async_trait::async_trait]
    impl DebateHook for FailingHook {
        async fn on_event(&self, _event: &DebateHookEvent<'_>) -> Result<(), TracingError> {
            Err(TracingError::HookFailed("boom".into()))
        }
    }

    #[tokio::test]
    async fn dispatch_reaches_every_hook_in_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        registry.add(Arc::new(CountingHook(counter.clone())));
        registry.add(Arc::new(CountingHook(counter.clone())));

        registry.dispatch(&DebateHookEvent::SynthesisStart).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn a_failing_hook_does_not_stop_later_hooks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        registry.add(Arc::new(FailingHook));
        registry.add(Arc::new(CountingHook(counter.clone())));

        registry.dispatch(&DebateHookEvent::SynthesisStart).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_registry_reports_empty() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());
    }
}
