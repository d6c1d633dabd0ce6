//! Black-box coverage of [`DebateOrchestrator`] through its public
//! API only — construction, a full debate run, and suspend/resume —
//! using the shared [`FixedAgent`] test double plus a small local
//! judge wrapper (`FixedAgent` only implements `Agent`, not
//! `JudgeAgent`).

use std::sync::Arc;

use async_trait::async_trait;
use debate_hooks::HookRegistry;
use debate_orchestrator::DebateOrchestrator;
use debate_protocol::{
    test_utils::FixedAgent, Agent, AgentConfig, AgentId, AgentTurnOutput, Contribution,
    DebateConfig, DebateContext, DebateError, DebateStore, ExecutionResult, FinalSolution,
    JudgeAgent, PreparedContext, ProviderError, Role, Round,
};
use debate_state::MemoryDebateStore;

struct FixedJudge(FixedAgent);

#[async_trait]
impl Agent for FixedJudge {
    fn id(&self) -> &AgentId {
        self.0.id()
    }
    fn name(&self) -> &str {
        self.0.name()
    }
    fn role(&self) -> Role {
        self.0.role()
    }
    async fn propose(&self, ctx: &DebateContext) -> Result<AgentTurnOutput, ProviderError> {
        self.0.propose(ctx).await
    }
    async fn critique(&self, ctx: &DebateContext, target: &Contribution) -> Result<AgentTurnOutput, ProviderError> {
        self.0.critique(ctx, target).await
    }
    async fn refine(
        &self,
        ctx: &DebateContext,
        original: &Contribution,
        critiques: &[Contribution],
    ) -> Result<AgentTurnOutput, ProviderError> {
        self.0.refine(ctx, original, critiques).await
    }
    async fn prepare_context(&self, ctx: &DebateContext, history: &str) -> Result<PreparedContext, ProviderError> {
        self.0.prepare_context(ctx, history).await
    }
    async fn ask_clarifying_questions(&self, problem: &str) -> Result<Vec<String>, ProviderError> {
        self.0.ask_clarifying_questions(problem).await
    }
    fn should_summarize(&self, history: &str) -> bool {
        self.0.should_summarize(history)
    }
}

#[async_trait]
impl JudgeAgent for FixedJudge {
    async fn synthesize(
        &self,
        _rounds: &[Round],
        _problem: &str,
        _context: Option<&str>,
    ) -> Result<FinalSolution, ProviderError> {
        Ok(FinalSolution {
            description: "final answer".into(),
            tradeoffs: vec!["speed vs. simplicity".into()],
            recommendations: vec!["adopt the simpler design".into()],
            confidence: 90,
            synthesized_by: self.0.id().clone(),
            unfulfilled_major_requirements: None,
        })
    }
}

fn config(id: &str, role: Role) -> AgentConfig {
    AgentConfig {
        id: AgentId::new(id),
        name: id.to_string(),
        role,
        model: "m".into(),
        provider: "mock".into(),
        temperature: 0.0,
        enabled: true,
        system_prompt_path: None,
        summary_prompt_path: None,
        clarification_prompt_path: None,
        summarization: None,
        tools: None,
    }
}

#[tokio::test]
async fn a_two_round_debate_runs_to_completion() {
    let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![
        (
            Arc::new(FixedAgent::new("a1", "Architect", Role::Architect, "do X")) as Arc<dyn Agent>,
            config("a1", Role::Architect),
        ),
        (
            Arc::new(FixedAgent::new("a2", "Security", Role::Security, "do Y")) as Arc<dyn Agent>,
            config("a2", Role::Security),
        ),
    ];
    let judge = Arc::new(FixedJudge(FixedAgent::new("judge", "Judge", Role::Generalist, "n/a")));
    let store: Arc<dyn DebateStore> = Arc::new(MemoryDebateStore::default());
    let orch = DebateOrchestrator::new(
        store,
        Arc::new(HookRegistry::new()),
        agents,
        judge,
        config("judge", Role::Generalist),
        DebateConfig { rounds: 2, ..Default::default() },
    )
    .unwrap();

    let result = orch.run_debate("how do we ship this safely?", Some("tight deadline")).await.unwrap();
    let ExecutionResult::Completed { result: state } = result else {
        panic!("expected the debate to complete, got {result:?}");
    };
    assert_eq!(state.rounds.len(), 2);
    let solution = state.final_solution.expect("synthesis should have populated a final solution");
    assert_eq!(solution.confidence, 90);
}

#[tokio::test]
async fn construction_fails_without_any_enabled_agent() {
    let mut disabled_config = config("a1", Role::Architect);
    disabled_config.enabled = false;
    let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![(
        Arc::new(FixedAgent::new("a1", "Architect", Role::Architect, "text")) as Arc<dyn Agent>,
        disabled_config,
    )];
    let judge = Arc::new(FixedJudge(FixedAgent::new("judge", "Judge", Role::Generalist, "n/a")));
    let store: Arc<dyn DebateStore> = Arc::new(MemoryDebateStore::default());

    let result = DebateOrchestrator::new(
        store,
        Arc::new(HookRegistry::new()),
        agents,
        judge,
        config("judge", Role::Generalist),
        DebateConfig::default(),
    );
    assert!(matches!(result, Err(DebateError::Validation(_))));
}
