//! The fan-out/fan-in round scheduler: optional pre-round
//! summarization, propose → critique → refine per round, judge
//! synthesis at the end, and the state-machine's pre-round-1
//! clarification suspension.

use std::collections::BTreeMap;
use std::sync::Arc;

use debate_protocol::{
    Agent, AgentActivity, AgentConfig, AgentId, Contribution, ContributionKind, DebateConfig,
    DebateContext, DebateError, DebateHookEvent, DebateId, DebateStatus, DebateStore,
    ExecutionResult, FatalInternal, JudgeAgent, OrchestratorType, Phase, Round, StoreError,
    SuspendPayload, SuspendReason, ValidationError,
};
use debate_hooks::HookRegistry;

use crate::clarify::collect_clarifications;
use crate::retry::{call_with_retry, retry_once};

fn store_err(err: StoreError) -> DebateError {
    match err {
        StoreError::Validation(v) => DebateError::Validation(v),
        StoreError::Fatal(f) => DebateError::Fatal(f),
        _ => DebateError::Fatal(FatalInternal::Other(err.to_string())),
    }
}

/// Round-based fan-out/fan-in scheduler over a fixed agent roster and
/// judge, against one state store and one hook registry.
///
/// Disabled agents are dropped from the roster at construction time;
/// every agent the orchestrator holds afterward participates in every
/// phase of every round.
pub struct DebateOrchestrator {
    store: Arc<dyn DebateStore>,
    hooks: Arc<HookRegistry>,
    agents: Vec<Arc<dyn Agent>>,
    agent_configs: Vec<AgentConfig>,
    judge: Arc<dyn JudgeAgent>,
    judge_config: AgentConfig,
    config: DebateConfig,
}

impl DebateOrchestrator {
    /// Build an orchestrator from a roster of (agent, config) pairs, a
    /// judge, and debate-wide settings. Fails if no agent in the
    /// roster is enabled.
    pub fn new(
        store: Arc<dyn DebateStore>,
        hooks: Arc<HookRegistry>,
        roster: Vec<(Arc<dyn Agent>, AgentConfig)>,
        judge: Arc<dyn JudgeAgent>,
        judge_config: AgentConfig,
        config: DebateConfig,
    ) -> Result<Self, DebateError> {
        let enabled: Vec<(Arc<dyn Agent>, AgentConfig)> =
            roster.into_iter().filter(|(_, c)| c.enabled).collect();
        if enabled.is_empty() {
            return Err(DebateError::Validation(ValidationError::InvalidConfig(
                "at least one enabled agent is required".into(),
            )));
        }
        let (agents, agent_configs) = enabled.into_iter().unzip();
        Ok(Self { store, hooks, agents, agent_configs, judge, judge_config, config })
    }

    /// Start a new debate over `problem`. Returns
    /// [`ExecutionResult::Suspended`] before round 1 when the
    /// state-machine orchestrator and interactive clarifications are
    /// both configured and at least one agent asked a question;
    /// otherwise runs straight through to completion or failure.
    pub async fn run_debate(
        &self,
        problem: &str,
        context: Option<&str>,
    ) -> Result<ExecutionResult, DebateError> {
        let state = self
            .store
            .create(problem, &self.agent_configs, &self.judge_config, context)
            .await
            .map_err(store_err)?;
        let id = state.id.clone();

        if self.config.orchestrator_type == OrchestratorType::StateMachine
            && self.config.interactive_clarifications
        {
            let groups = collect_clarifications(
                &self.agents,
                &self.agent_configs,
                &self.judge,
                &self.judge_config,
                problem,
                self.config.clarifications_max_per_agent,
            )
            .await;
            if !groups.is_empty() {
                self.store.set_clarifications(&id, groups.clone()).await.map_err(store_err)?;
                self.store.set_status(&id, DebateStatus::Suspended).await.map_err(store_err)?;
                let questions = groups.into_iter().flat_map(|g| g.items).collect();
                return Ok(ExecutionResult::Suspended {
                    suspend_reason: SuspendReason::WaitingForInput,
                    suspend_payload: SuspendPayload { questions },
                    debate_id: id,
                });
            }
        }

        self.store.set_status(&id, DebateStatus::Running).await.map_err(store_err)?;
        self.run_rounds(&id, problem, context).await
    }

    /// Resume a suspended debate with clarification answers keyed by
    /// question id. Fails with [`ValidationError::NotSuspended`] if
    /// the debate isn't suspended, or
    /// [`ValidationError::ClarificationMismatch`] if `answers` doesn't
    /// cover exactly the question ids emitted at suspend time.
    pub async fn resume(
        &self,
        id: &DebateId,
        answers: BTreeMap<String, String>,
    ) -> Result<ExecutionResult, DebateError> {
        let state = self
            .store
            .get(id)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DebateError::Validation(ValidationError::DebateNotFound(id.as_str().to_string())))?;
        if state.status != DebateStatus::Suspended {
            return Err(DebateError::Validation(ValidationError::NotSuspended(id.as_str().to_string())));
        }

        let mut clarifications = state.clarifications.clone().unwrap_or_default();
        let mut expected: Vec<String> = clarifications
            .iter()
            .flat_map(|group| group.items.iter().map(|item| item.id.as_str().to_string()))
            .collect();
        let mut got: Vec<String> = answers.keys().cloned().collect();
        expected.sort();
        got.sort();
        if expected != got {
            return Err(DebateError::Validation(ValidationError::ClarificationMismatch {
                expected,
                got,
            }));
        }

        for group in &mut clarifications {
            for item in &mut group.items {
                if let Some(answer) = answers.get(item.id.as_str()) {
                    item.answer = Some(answer.clone());
                }
            }
        }
        self.store.set_clarifications(id, clarifications).await.map_err(store_err)?;
        self.store.set_status(id, DebateStatus::Running).await.map_err(store_err)?;
        self.run_rounds(id, &state.problem, state.context.as_deref()).await
    }

    async fn run_rounds(
        &self,
        id: &DebateId,
        problem: &str,
        context: Option<&str>,
    ) -> Result<ExecutionResult, DebateError> {
        let mut completed: Vec<Round> = Vec::new();

        for round_number in 1..=self.config.rounds {
            self.hooks
                .dispatch(&DebateHookEvent::RoundStart { round: round_number, total: self.config.rounds })
                .await;

            if round_number > 1 {
                self.run_summarize_phase(id, &mut completed).await;
            }

            let deadline = self.config.timeout_per_round.to_std();
            let round = match tokio::time::timeout(
                deadline,
                self.run_round_body(id, problem, round_number, &completed),
            )
            .await
            {
                Ok(Ok(round)) => round,
                Ok(Err(err)) => return Ok(self.fail(id, &err.to_string()).await),
                Err(_elapsed) => match self.recover_timed_out_round(id, round_number).await {
                    Ok(round) => round,
                    Err(err) => return Ok(self.fail(id, &err.to_string()).await),
                },
            };

            if !round
                .contributions
                .iter()
                .any(|c| c.kind == ContributionKind::Proposal && c.metadata.error.is_none())
            {
                return Ok(self
                    .fail(id, &format!("round {round_number} produced no successful proposals"))
                    .await);
            }

            if let Err(err) = self.store.seal_round(id, round_number).await {
                return Ok(self.fail(id, &store_err(err).to_string()).await);
            }
            completed.push(round);
        }

        self.hooks.dispatch(&DebateHookEvent::SynthesisStart).await;
        let synthesis = retry_once(|| self.judge.synthesize(&completed, problem, context)).await;
        let solution = match synthesis {
            Ok(solution) => solution,
            Err(err) => return Ok(self.fail(id, &err.to_string()).await),
        };
        if let Err(err) = self.store.set_final_solution(id, solution).await {
            return Ok(self.fail(id, &store_err(err).to_string()).await);
        }
        self.hooks.dispatch(&DebateHookEvent::SynthesisComplete).await;

        match self.store.get(id).await.map_err(store_err)? {
            Some(final_state) => Ok(ExecutionResult::Completed { result: Box::new(final_state) }),
            None => Err(DebateError::Fatal(FatalInternal::InvariantViolated(format!(
                "debate {id} vanished after synthesis"
            )))),
        }
    }

    /// Mark the debate failed and fold the error into an
    /// [`ExecutionResult::Failed`] instead of propagating, per the
    /// failure policy: once a debate id exists, a mid-run error ends
    /// the run rather than unwinding the caller's stack.
    async fn fail(&self, id: &DebateId, error: &str) -> ExecutionResult {
        let _ = self.store.set_status(id, DebateStatus::Failed).await;
        ExecutionResult::Failed { error: error.to_string() }
    }

    /// After a round's deadline elapses, whatever contributions had
    /// already been persisted (phases append as they complete, not at
    /// phase end) are still in the store; read them back rather than
    /// treating the round as empty.
    async fn recover_timed_out_round(&self, id: &DebateId, round_number: u32) -> Result<Round, DebateError> {
        tracing::warn!(round = round_number, "round timed out; proceeding with whatever was persisted");
        let state = self.store.get(id).await.map_err(store_err)?;
        Ok(state
            .and_then(|s| s.rounds.into_iter().find(|r| r.round_number == round_number))
            .unwrap_or_else(|| Round::new(round_number, chrono_now())))
    }

    async fn run_round_body(
        &self,
        id: &DebateId,
        problem: &str,
        round_number: u32,
        completed: &[Round],
    ) -> Result<Round, DebateError> {
        let mut round = Round::new(round_number, chrono_now());

        let proposals = self.run_propose_phase(id, problem, round_number, completed).await?;
        round.contributions.extend(proposals);
        self.hooks
            .dispatch(&DebateHookEvent::PhaseComplete { round: round_number, phase: Phase::Propose })
            .await;

        let critiques = self.run_critique_phase(id, problem, round_number, completed, &round).await?;
        round.contributions.extend(critiques);
        self.hooks
            .dispatch(&DebateHookEvent::PhaseComplete { round: round_number, phase: Phase::Critique })
            .await;

        let refinements = self.run_refine_phase(id, problem, round_number, completed, &round).await?;
        round.contributions.extend(refinements);
        self.hooks
            .dispatch(&DebateHookEvent::PhaseComplete { round: round_number, phase: Phase::Refine })
            .await;

        Ok(round)
    }

    fn agent_context(&self, problem: &str, completed: &[Round], agent_id: &AgentId, round_number: u32) -> DebateContext {
        let previous_context =
            debate_context::previous_context(completed, agent_id, self.config.include_full_history);
        DebateContext { problem: problem.to_string(), previous_context, round_number }
    }

    async fn run_propose_phase(
        &self,
        id: &DebateId,
        problem: &str,
        round_number: u32,
        completed: &[Round],
    ) -> Result<Vec<Contribution>, DebateError> {
        self.hooks
            .dispatch(&DebateHookEvent::PhaseStart {
                round: round_number,
                phase: Phase::Propose,
                expected_count: self.agents.len(),
            })
            .await;

        let mut handles = Vec::with_capacity(self.agents.len());
        for (agent, config) in self.agents.iter().zip(self.agent_configs.iter()) {
            let agent = Arc::clone(agent);
            let hooks = Arc::clone(&self.hooks);
            let ctx = self.agent_context(problem, completed, &config.id, round_number);
            let agent_id = config.id.clone();
            let agent_name = config.name.clone();
            let role = config.role;
            let model = config.model.clone();
            handles.push(tokio::spawn(async move {
                hooks
                    .dispatch(&DebateHookEvent::AgentStart {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Propose,
                    })
                    .await;
                let output = call_with_retry(&model, || agent.propose(&ctx)).await;
                hooks
                    .dispatch(&DebateHookEvent::AgentComplete {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Propose,
                    })
                    .await;
                (agent_id, role, output)
            }));
        }

        let mut contributions = Vec::with_capacity(handles.len());
        for handle in handles {
            let (agent_id, role, output) = join_or_fatal(handle).await?;
            let contribution = Contribution {
                agent_id,
                role,
                kind: ContributionKind::Proposal,
                target_agent_id: None,
                content: output.content,
                metadata: output.metadata,
            };
            self.store
                .append_contribution(id, round_number, contribution.clone())
                .await
                .map_err(store_err)?;
            contributions.push(contribution);
        }
        Ok(contributions)
    }

    async fn run_critique_phase(
        &self,
        id: &DebateId,
        problem: &str,
        round_number: u32,
        completed: &[Round],
        round: &Round,
    ) -> Result<Vec<Contribution>, DebateError> {
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for (ci, critiquer) in self.agent_configs.iter().enumerate() {
            for (ti, target) in self.agent_configs.iter().enumerate() {
                if critiquer.id == target.id {
                    continue;
                }
                if round.current_proposal(&target.id).is_some() {
                    pairs.push((ci, ti));
                }
            }
        }
        pairs.sort_by(|&(ca, ta), &(cb, tb)| {
            let a = (self.agent_configs[ca].id.as_str(), self.agent_configs[ta].id.as_str());
            let b = (self.agent_configs[cb].id.as_str(), self.agent_configs[tb].id.as_str());
            a.cmp(&b)
        });

        self.hooks
            .dispatch(&DebateHookEvent::PhaseStart {
                round: round_number,
                phase: Phase::Critique,
                expected_count: pairs.len(),
            })
            .await;

        let mut handles = Vec::with_capacity(pairs.len());
        for (ci, ti) in pairs {
            let critiquer_config = &self.agent_configs[ci];
            let target_config = &self.agent_configs[ti];
            let target_contribution = round
                .current_proposal(&target_config.id)
                .expect("filtered to pairs with a current proposal")
                .clone();

            let agent = Arc::clone(&self.agents[ci]);
            let hooks = Arc::clone(&self.hooks);
            let ctx = self.agent_context(problem, completed, &critiquer_config.id, round_number);
            let agent_id = critiquer_config.id.clone();
            let agent_name = critiquer_config.name.clone();
            let role = critiquer_config.role;
            let model = critiquer_config.model.clone();
            let target_id = target_config.id.clone();
            handles.push(tokio::spawn(async move {
                hooks
                    .dispatch(&DebateHookEvent::AgentStart {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Critique,
                    })
                    .await;
                let output =
                    call_with_retry(&model, || agent.critique(&ctx, &target_contribution)).await;
                hooks
                    .dispatch(&DebateHookEvent::AgentComplete {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Critique,
                    })
                    .await;
                (agent_id, role, target_id, output)
            }));
        }

        let mut contributions = Vec::with_capacity(handles.len());
        for handle in handles {
            let (agent_id, role, target_id, output) = join_or_fatal(handle).await?;
            let contribution = Contribution {
                agent_id,
                role,
                kind: ContributionKind::Critique,
                target_agent_id: Some(target_id),
                content: output.content,
                metadata: output.metadata,
            };
            self.store
                .append_contribution(id, round_number, contribution.clone())
                .await
                .map_err(store_err)?;
            contributions.push(contribution);
        }
        Ok(contributions)
    }

    async fn run_refine_phase(
        &self,
        id: &DebateId,
        problem: &str,
        round_number: u32,
        completed: &[Round],
        round: &Round,
    ) -> Result<Vec<Contribution>, DebateError> {
        let refining: Vec<usize> = (0..self.agent_configs.len())
            .filter(|&i| round.current_proposal(&self.agent_configs[i].id).is_some())
            .collect();

        self.hooks
            .dispatch(&DebateHookEvent::PhaseStart {
                round: round_number,
                phase: Phase::Refine,
                expected_count: refining.len(),
            })
            .await;

        let mut handles = Vec::with_capacity(refining.len());
        for i in refining {
            let config = &self.agent_configs[i];
            let original = round
                .current_proposal(&config.id)
                .expect("filtered to agents with a current proposal")
                .clone();
            let critiques: Vec<Contribution> = round
                .contributions
                .iter()
                .filter(|c| c.kind == ContributionKind::Critique && c.target_agent_id.as_ref() == Some(&config.id))
                .cloned()
                .collect();

            let agent = Arc::clone(&self.agents[i]);
            let hooks = Arc::clone(&self.hooks);
            let ctx = self.agent_context(problem, completed, &config.id, round_number);
            let agent_id = config.id.clone();
            let agent_name = config.name.clone();
            let role = config.role;
            let model = config.model.clone();
            handles.push(tokio::spawn(async move {
                hooks
                    .dispatch(&DebateHookEvent::AgentStart {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Refine,
                    })
                    .await;
                let output = call_with_retry(&model, || agent.refine(&ctx, &original, &critiques)).await;
                hooks
                    .dispatch(&DebateHookEvent::AgentComplete {
                        agent_id: &agent_id,
                        agent_name: &agent_name,
                        activity: AgentActivity::Refine,
                    })
                    .await;
                (agent_id, role, output)
            }));
        }

        let mut contributions = Vec::with_capacity(handles.len());
        for handle in handles {
            let (agent_id, role, output) = join_or_fatal(handle).await?;
            let contribution = Contribution {
                agent_id,
                role,
                kind: ContributionKind::Refinement,
                target_agent_id: None,
                content: output.content,
                metadata: output.metadata,
            };
            self.store
                .append_contribution(id, round_number, contribution.clone())
                .await
                .map_err(store_err)?;
            contributions.push(contribution);
        }
        Ok(contributions)
    }

    /// Prepare each agent's context ahead of the round about to start,
    /// attaching any freshly produced summary to the round that just
    /// sealed (not the round about to begin).
    async fn run_summarize_phase(&self, id: &DebateId, completed: &mut [Round]) {
        let Some(last_round_number) = completed.last().map(|r| r.round_number) else {
            return;
        };
        let history = debate_context::format_history(completed);

        let mut handles = Vec::with_capacity(self.agents.len());
        for (agent, config) in self.agents.iter().zip(self.agent_configs.iter()) {
            let agent = Arc::clone(agent);
            let hooks = Arc::clone(&self.hooks);
            let agent_id = config.id.clone();
            let history = history.clone();
            handles.push(tokio::spawn(async move {
                hooks.dispatch(&DebateHookEvent::SummarizationStart { agent_id: &agent_id }).await;
                let ctx = DebateContext {
                    problem: String::new(),
                    previous_context: None,
                    round_number: last_round_number,
                };
                let produced = agent
                    .prepare_context(&ctx, &history)
                    .await
                    .ok()
                    .and_then(|prepared| prepared.summary);
                if let Some(summary) = &produced {
                    hooks
                        .dispatch(&DebateHookEvent::SummarizationComplete {
                            agent_id: &agent_id,
                            before_chars: summary.metadata.before_chars,
                            after_chars: summary.metadata.after_chars,
                        })
                        .await;
                }
                (agent_id, produced)
            }));
        }

        for handle in handles {
            let Ok((agent_id, Some(summary))) = handle.await else { continue };
            if let Some(last) = completed.last_mut() {
                last.summaries.insert(agent_id.as_str().to_string(), summary.clone());
            }
            if let Err(err) = self.store.set_summary(id, last_round_number, &agent_id, summary).await {
                tracing::warn!(agent = %agent_id, error = %err, "failed to persist summary");
            }
        }

        self.hooks.dispatch(&DebateHookEvent::SummarizationEnd { round: last_round_number }).await;
    }
}

async fn join_or_fatal<T>(handle: tokio::task::JoinHandle<T>) -> Result<T, DebateError> {
    handle
        .await
        .map_err(|err| DebateError::Fatal(FatalInternal::InvariantViolated(format!("task panicked: {err}"))))
}

fn chrono_now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_protocol::{
        AgentTurnOutput, ContributionMetadata, DurationMs, FinalSolution, ProviderError, Role,
        Summary, SummaryMetadata,
    };
    use debate_state::MemoryDebateStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A scriptable [`Agent`]/[`JudgeAgent`] test double: fixed text
    /// for critique/refine, a configurable propose outcome (fail
    /// non-retryably exactly `fail_propose_times` times before
    /// succeeding), and a canned synthesis result when used as judge.
    struct ScriptedAgent {
        id: AgentId,
        name: String,
        role: Role,
        fail_propose_times: usize,
        propose_attempts: AtomicUsize,
        questions: Vec<String>,
    }

    impl ScriptedAgent {
        fn new(id: &str, role: Role) -> Self {
            Self {
                id: AgentId::new(id),
                name: id.to_string(),
                role,
                fail_propose_times: 0,
                propose_attempts: AtomicUsize::new(0),
                questions: vec![],
            }
        }

        fn failing(id: &str, role: Role, times: usize) -> Self {
            Self { fail_propose_times: times, ..Self::new(id, role) }
        }

        fn asking(id: &str, role: Role, questions: Vec<&str>) -> Self {
            Self { questions: questions.into_iter().map(String::from).collect(), ..Self::new(id, role) }
        }

        fn ok_output(&self, text: &str) -> AgentTurnOutput {
            AgentTurnOutput {
                content: text.to_string(),
                metadata: ContributionMetadata {
                    latency_ms: DurationMs::ZERO,
                    tokens_used: None,
                    model: "scripted".to_string(),
                    tool_calls: vec![],
                    error: None,
                    retried: false,
                },
            }
        }
    }

    #[async_trait::async_trait]
    impl Agent for ScriptedAgent {
        fn id(&self) -> &AgentId {
            &self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn role(&self) -> Role {
            self.role
        }
        async fn propose(&self, _ctx: &DebateContext) -> Result<AgentTurnOutput, ProviderError> {
            let attempt = self.propose_attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.fail_propose_times {
                return Err(ProviderError::InvalidRequest("scripted failure".into()));
            }
            Ok(self.ok_output(&format!("{}'s proposal", self.name)))
        }
        async fn critique(
            &self,
            _ctx: &DebateContext,
            target: &Contribution,
        ) -> Result<AgentTurnOutput, ProviderError> {
            Ok(self.ok_output(&format!("{} critiques {}", self.name, target.agent_id)))
        }
        async fn refine(
            &self,
            _ctx: &DebateContext,
            _original: &Contribution,
            _critiques: &[Contribution],
        ) -> Result<AgentTurnOutput, ProviderError> {
            Ok(self.ok_output(&format!("{}'s refinement", self.name)))
        }
        async fn prepare_context(
            &self,
            _ctx: &DebateContext,
            _formatted_history: &str,
        ) -> Result<debate_protocol::PreparedContext, ProviderError> {
            Ok(debate_protocol::PreparedContext { context: None, summary: None })
        }
        async fn ask_clarifying_questions(&self, _problem: &str) -> Result<Vec<String>, ProviderError> {
            Ok(self.questions.clone())
        }
        fn should_summarize(&self, _formatted_history: &str) -> bool {
            false
        }
    }

    #[async_trait::async_trait]
    impl JudgeAgent for ScriptedAgent {
        async fn synthesize(
            &self,
            _rounds: &[Round],
            _problem: &str,
            _context: Option<&str>,
        ) -> Result<FinalSolution, ProviderError> {
            Ok(FinalSolution {
                description: "synthesized solution".into(),
                tradeoffs: vec![],
                recommendations: vec!["ship it".into()],
                confidence: 80,
                synthesized_by: self.id.clone(),
                unfulfilled_major_requirements: None,
            })
        }
    }

    /// Always summarizes, returning a short canned summary so the
    /// round-start-placement contract can be exercised without a real
    /// capability.
    struct SummarizingAgent(ScriptedAgent);

    #[async_trait::async_trait]
    impl Agent for SummarizingAgent {
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
        async fn critique(
            &self,
            ctx: &DebateContext,
            target: &Contribution,
        ) -> Result<AgentTurnOutput, ProviderError> {
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
        async fn prepare_context(
            &self,
            _ctx: &DebateContext,
            formatted_history: &str,
        ) -> Result<debate_protocol::PreparedContext, ProviderError> {
            let summary = Summary {
                agent_role: self.0.role,
                summary: "condensed".into(),
                metadata: SummaryMetadata {
                    before_chars: formatted_history.chars().count(),
                    after_chars: 9,
                    method: "llm".into(),
                    latency_ms: DurationMs::ZERO,
                    tokens_used: None,
                    model: "scripted".into(),
                    temperature: 0.0,
                    provider: "scripted".into(),
                    timestamp: chrono_now(),
                },
            };
            Ok(debate_protocol::PreparedContext { context: Some(summary.summary.clone()), summary: Some(summary) })
        }
        async fn ask_clarifying_questions(&self, problem: &str) -> Result<Vec<String>, ProviderError> {
            self.0.ask_clarifying_questions(problem).await
        }
        fn should_summarize(&self, _formatted_history: &str) -> bool {
            true
        }
    }

    #[async_trait::async_trait]
    impl JudgeAgent for SummarizingAgent {
        async fn synthesize(
            &self,
            rounds: &[Round],
            problem: &str,
            context: Option<&str>,
        ) -> Result<FinalSolution, ProviderError> {
            self.0.synthesize(rounds, problem, context).await
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

    fn make_orchestrator(
        roster: Vec<(Arc<dyn Agent>, AgentConfig)>,
        judge: Arc<dyn JudgeAgent>,
        debate_config: DebateConfig,
    ) -> DebateOrchestrator {
        let store: Arc<dyn DebateStore> = Arc::new(MemoryDebateStore::default());
        let hooks = Arc::new(HookRegistry::new());
        DebateOrchestrator::new(store, hooks, roster, judge, config("judge", Role::Generalist), debate_config)
            .expect("valid roster")
    }

    fn two_agent_roster() -> Vec<(Arc<dyn Agent>, AgentConfig)> {
        vec![
            (Arc::new(ScriptedAgent::new("a1", Role::Architect)) as Arc<dyn Agent>, config("a1", Role::Architect)),
            (Arc::new(ScriptedAgent::new("a2", Role::Security)) as Arc<dyn Agent>, config("a2", Role::Security)),
        ]
    }

    #[tokio::test]
    async fn construction_rejects_an_empty_enabled_roster() {
        let mut disabled = config("a1", Role::Architect);
        disabled.enabled = false;
        let roster = vec![(Arc::new(ScriptedAgent::new("a1", Role::Architect)) as Arc<dyn Agent>, disabled)];
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let store: Arc<dyn DebateStore> = Arc::new(MemoryDebateStore::default());
        let result = DebateOrchestrator::new(
            store,
            Arc::new(HookRegistry::new()),
            roster,
            judge,
            config("judge", Role::Generalist),
            DebateConfig::default(),
        );
        assert!(matches!(result, Err(DebateError::Validation(_))));
    }

    #[tokio::test]
    async fn single_round_classic_debate_completes_with_deterministic_ordering() {
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let orch = make_orchestrator(two_agent_roster(), judge, DebateConfig { rounds: 1, ..Default::default() });

        let result = orch.run_debate("how should we design this", None).await.unwrap();
        let ExecutionResult::Completed { result: state } = result else {
            panic!("expected completion, got {result:?}");
        };

        assert_eq!(state.status, DebateStatus::Completed);
        assert!(state.final_solution.is_some());
        assert_eq!(state.rounds.len(), 1);

        let kinds: Vec<_> = state.rounds[0]
            .contributions
            .iter()
            .map(|c| (c.agent_id.as_str().to_string(), c.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("a1".to_string(), ContributionKind::Proposal),
                ("a2".to_string(), ContributionKind::Proposal),
                ("a1".to_string(), ContributionKind::Critique),
                ("a2".to_string(), ContributionKind::Critique),
                ("a1".to_string(), ContributionKind::Refinement),
                ("a2".to_string(), ContributionKind::Refinement),
            ]
        );
    }

    #[tokio::test]
    async fn a_persistently_failing_agent_gets_an_error_marked_contribution_and_the_round_survives() {
        let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![
            (
                Arc::new(ScriptedAgent::failing("a1", Role::Architect, usize::MAX)) as Arc<dyn Agent>,
                config("a1", Role::Architect),
            ),
            (Arc::new(ScriptedAgent::new("a2", Role::Security)) as Arc<dyn Agent>, config("a2", Role::Security)),
        ];
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let orch = make_orchestrator(agents, judge, DebateConfig { rounds: 1, ..Default::default() });

        let result = orch.run_debate("problem", None).await.unwrap();
        let ExecutionResult::Completed { result: state } = result else {
            panic!("expected completion, got {result:?}");
        };

        let a1_proposal = state.rounds[0]
            .contributions
            .iter()
            .find(|c| c.agent_id.as_str() == "a1" && c.kind == ContributionKind::Proposal)
            .unwrap();
        assert!(a1_proposal.metadata.error.is_some());
        assert!(!a1_proposal.metadata.retried, "InvalidRequest is not retryable");
    }

    #[tokio::test]
    async fn a_round_with_zero_successful_proposals_fails_the_debate() {
        let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![(
            Arc::new(ScriptedAgent::failing("a1", Role::Architect, usize::MAX)) as Arc<dyn Agent>,
            config("a1", Role::Architect),
        )];
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let orch = make_orchestrator(agents, judge, DebateConfig { rounds: 1, ..Default::default() });

        let result = orch.run_debate("problem", None).await.unwrap();
        assert!(matches!(result, ExecutionResult::Failed { .. }));
    }

    #[tokio::test]
    async fn multi_round_summaries_attach_to_the_just_sealed_round() {
        let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![(
            Arc::new(SummarizingAgent(ScriptedAgent::new("a1", Role::Architect))) as Arc<dyn Agent>,
            config("a1", Role::Architect),
        )];
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let orch = make_orchestrator(agents, judge, DebateConfig { rounds: 2, ..Default::default() });

        let result = orch.run_debate("problem", None).await.unwrap();
        let ExecutionResult::Completed { result: state } = result else {
            panic!("expected completion, got {result:?}");
        };

        assert_eq!(state.rounds.len(), 2);
        assert!(state.rounds[0].summaries.contains_key("a1"));
        assert!(state.rounds[1].summaries.is_empty());
    }

    #[tokio::test]
    async fn state_machine_suspends_then_resumes_with_matching_answers() {
        let agents: Vec<(Arc<dyn Agent>, AgentConfig)> = vec![(
            Arc::new(ScriptedAgent::asking("a1", Role::Architect, vec!["what's the budget?"])) as Arc<dyn Agent>,
            config("a1", Role::Architect),
        )];
        let judge = Arc::new(ScriptedAgent::new("judge", Role::Generalist));
        let debate_config = DebateConfig {
            rounds: 1,
            orchestrator_type: OrchestratorType::StateMachine,
            interactive_clarifications: true,
            ..Default::default()
        };
        let orch = make_orchestrator(agents, judge, debate_config);

        let suspended = orch.run_debate("problem", None).await.unwrap();
        let ExecutionResult::Suspended { debate_id, suspend_payload, .. } = suspended else {
            panic!("expected suspension, got {suspended:?}");
        };
        assert_eq!(suspend_payload.questions.len(), 1);

        let mismatch_err = orch
            .resume(&debate_id, BTreeMap::new())
            .await
            .expect_err("empty answers should not match the expected question set");
        assert!(matches!(mismatch_err, DebateError::Validation(ValidationError::ClarificationMismatch { .. })));

        let mut answers = BTreeMap::new();
        answers.insert(suspend_payload.questions[0].id.as_str().to_string(), "$10k".to_string());
        let completed = orch.resume(&debate_id, answers).await.unwrap();
        assert!(matches!(completed, ExecutionResult::Completed { .. }));

        let resume_again_err = orch
            .resume(&debate_id, BTreeMap::new())
            .await
            .expect_err("resuming a completed debate should fail");
        assert!(matches!(resume_again_err, DebateError::Validation(ValidationError::NotSuspended(_))));
    }
}
