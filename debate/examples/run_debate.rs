//! Runs a two-agent, one-round debate end to end against a scripted
//! capability, printing the synthesized solution.
//!
//! ```sh
//! cargo run -p debate --example run_debate
//! ```

use std::sync::Arc;

use debate::prelude::*;
use debate_protocol::{CapabilityRequest, CapabilityResponse, Round};
use debate_tool::ToolRegistry;

/// A capability that always answers with a fixed line, tagged with
/// the role it was asked to speak as. Stands in for a real LLM
/// backend, which is out of scope for this crate.
struct ScriptedCapability {
    role_label: &'static str,
}

impl debate_protocol::Capability for ScriptedCapability {
    async fn complete(
        &self,
        request: CapabilityRequest,
    ) -> Result<CapabilityResponse, debate_protocol::ProviderError> {
        Ok(CapabilityResponse {
            text: format!("[{}] responding to: {}", self.role_label, request.user_prompt),
            tool_calls: Vec::new(),
            usage: None,
        })
    }
}

struct ScriptedJudge;

#[async_trait::async_trait]
impl Agent for ScriptedJudge {
    fn id(&self) -> &AgentId {
        static ID: std::sync::OnceLock<AgentId> = std::sync::OnceLock::new();
        ID.get_or_init(|| AgentId::new("judge"))
    }
    fn name(&self) -> &str {
        "Judge"
    }
    fn role(&self) -> Role {
        Role::Generalist
    }
    async fn propose(&self, _ctx: &DebateContext) -> Result<debate_protocol::AgentTurnOutput, ProviderError> {
        unreachable!("the judge does not propose in this example")
    }
    async fn critique(
        &self,
        _ctx: &DebateContext,
        _target: &Contribution,
    ) -> Result<debate_protocol::AgentTurnOutput, ProviderError> {
        unreachable!("the judge does not critique in this example")
    }
    async fn refine(
        &self,
        _ctx: &DebateContext,
        _original: &Contribution,
        _critiques: &[Contribution],
    ) -> Result<debate_protocol::AgentTurnOutput, ProviderError> {
        unreachable!("the judge does not refine in this example")
    }
    async fn prepare_context(&self, _ctx: &DebateContext, _history: &str) -> Result<PreparedContext, ProviderError> {
        Ok(PreparedContext { context: Some(String::new()), summary: None })
    }
    async fn ask_clarifying_questions(&self, _problem: &str) -> Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }
    fn should_summarize(&self, _history: &str) -> bool {
        false
    }
}

#[async_trait::async_trait]
impl JudgeAgent for ScriptedJudge {
    async fn synthesize(
        &self,
        rounds: &[Round],
        _problem: &str,
        _context: Option<&str>,
    ) -> Result<FinalSolution, ProviderError> {
        Ok(FinalSolution {
            description: format!("Synthesized from {} round(s).", rounds.len()),
            tradeoffs: vec!["simplicity vs. exhaustiveness".to_string()],
            recommendations: vec!["adopt the refined proposal".to_string()],
            confidence: 75,
            synthesized_by: self.id().clone(),
            unfulfilled_major_requirements: None,
        })
    }
}

fn agent_config(id: &str, name: &str, role: Role) -> AgentConfig {
    AgentConfig {
        id: AgentId::new(id),
        name: name.to_string(),
        role,
        model: "scripted".to_string(),
        provider: "scripted".to_string(),
        temperature: 0.7,
        enabled: true,
        system_prompt_path: None,
        summary_prompt_path: None,
        clarification_prompt_path: None,
        summarization: None,
        tools: None,
    }
}

#[tokio::main]
async fn main() -> Result<(), DebateError> {
    // Shared by both agents and the orchestrator, so the `generation`
    // and tool spans a turn emits nest under the same agent span the
    // orchestrator opened for it.
    let mut hook_registry = HookRegistry::new();
    hook_registry.add(Arc::new(TracingHook::new()));
    let hooks = Arc::new(hook_registry);

    let architect = Arc::new(
        DebateAgent::new(
            AgentId::new("architect"),
            "Architect",
            Role::Architect,
            ScriptedCapability { role_label: "architect" },
            ToolRegistry::new(),
            "scripted",
            "scripted",
            0.7,
            debate_prompt::system_prompt(Role::Architect),
            debate_prompt::summary_prompt(Role::Architect),
            debate_prompt::clarification_prompt(Role::Architect),
            SummarizationConfig::default(),
        )
        .with_hooks(hooks.clone()),
    ) as Arc<dyn Agent>;
    let security = Arc::new(
        DebateAgent::new(
            AgentId::new("security"),
            "Security",
            Role::Security,
            ScriptedCapability { role_label: "security" },
            ToolRegistry::new(),
            "scripted",
            "scripted",
            0.7,
            debate_prompt::system_prompt(Role::Security),
            debate_prompt::summary_prompt(Role::Security),
            debate_prompt::clarification_prompt(Role::Security),
            SummarizationConfig::default(),
        )
        .with_hooks(hooks.clone()),
    ) as Arc<dyn Agent>;

    let orchestrator = DebateOrchestrator::new(
        Arc::new(MemoryDebateStore::default()),
        hooks,
        vec![
            (architect, agent_config("architect", "Architect", Role::Architect)),
            (security, agent_config("security", "Security", Role::Security)),
        ],
        Arc::new(ScriptedJudge),
        agent_config("judge", "Judge", Role::Generalist),
        DebateConfig { rounds: 1, ..Default::default() },
    )?;

    let result = orchestrator
        .run_debate("How should we roll out the new payments API?", None)
        .await?;

    match result {
        ExecutionResult::Completed { result } => {
            let solution = result.final_solution.expect("a completed debate has a final solution");
            println!("{}", solution.description);
            for rec in &solution.recommendations {
                println!("- {rec}");
            }
        }
        other => println!("debate did not complete: {other:?}"),
    }

    Ok(())
}
