//! A scripted [`Capability`] for deterministic tests.

use std::sync::Mutex;

use crate::capability::{CapabilityRequest, CapabilityResponse, ToolCallRequest, Usage};
use crate::error::ProviderError;
use crate::Capability;

/// One canned response, or a failure, for [`MockCapability`] to hand
/// back on its next `complete` call.
pub enum ScriptedResponse {
    /// Return this text, with no pending tool calls.
    Text(String),
    /// Return these pending tool calls and no final text.
    ToolCalls(Vec<ToolCallRequest>),
    /// Fail with this error.
    Fail(ProviderError),
}

/// A [`Capability`] backed by a fixed queue of responses, consumed in
/// order. Panics if called more times than scripted — tests should
/// script exactly the number of capability calls they expect,
/// matching Testable Property 8 (tool loop bounded by
/// `toolCallLimit + 1` calls).
pub struct MockCapability {
    queue: Mutex<Vec<ScriptedResponse>>,
    calls: Mutex<Vec<CapabilityRequest>>,
}

impl MockCapability {
    /// Build a mock that returns `responses` in order, one per call.
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self { queue: Mutex::new(responses), calls: Mutex::new(Vec::new()) }
    }

    /// Build a mock that always returns the same text.
    pub fn fixed_text(text: impl Into<String>) -> Self {
        Self::new(vec![ScriptedResponse::Text(text.into())])
    }

    /// Every request this mock has received so far, in order.
    pub fn calls(&self) -> Vec<CapabilityRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Capability for MockCapability {
    async fn complete(
        &self,
        request: CapabilityRequest,
    ) -> Result<CapabilityResponse, ProviderError> {
        self.calls.lock().unwrap().push(request);
        let next = {
            let mut q = self.queue.lock().unwrap();
            if q.is_empty() {
                None
            } else {
                Some(q.remove(0))
            }
        };
        match next {
            Some(ScriptedResponse::Text(text)) => {
                Ok(CapabilityResponse { text, tool_calls: vec![], usage: Some(Usage::default()) })
            }
            Some(ScriptedResponse::ToolCalls(tool_calls)) => Ok(CapabilityResponse {
                text: String::new(),
                tool_calls,
                usage: Some(Usage::default()),
            }),
            Some(ScriptedResponse::Fail(err)) => Err(err),
            None => Err(ProviderError::Other(
                "MockCapability queue exhausted".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_responses_in_order() {
        let mock = MockCapability::new(vec![
            ScriptedResponse::Text("first".into()),
            ScriptedResponse::Text("second".into()),
        ]);
        let req = CapabilityRequest {
            model: "test-model".into(),
            temperature: 0.0,
            system_prompt: String::new(),
            user_prompt: String::new(),
            messages: vec![],
            tools: None,
        };
        let r1 = mock.complete(req.clone()).await.unwrap();
        assert_eq!(r1.text, "first");
        let r2 = mock.complete(req).await.unwrap();
        assert_eq!(r2.text, "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn exhausted_queue_errors() {
        let mock = MockCapability::new(vec![]);
        let req = CapabilityRequest {
            model: "test-model".into(),
            temperature: 0.0,
            system_prompt: String::new(),
            user_prompt: String::new(),
            messages: vec![],
            tools: None,
        };
        assert!(mock.complete(req).await.is_err());
    }
}
