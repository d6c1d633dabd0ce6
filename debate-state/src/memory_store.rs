//! In-memory [`DebateStore`], primarily for tests and single-process
//! runs that don't need durability across restarts.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use debate_protocol::{
    AgentClarifications, AgentConfig, AgentId, Contribution, DebateId, DebateState, DebateStatus,
    DebateStore, FatalInternal, FinalSolution, PromptSource, Round, StoreError, Summary,
    ValidationError,
};
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use crate::id::generate_debate_id;

/// In-memory state store, one [`DebateState`] per id behind a shared
/// map. Writes to the same debate id are serialized through a per-id
/// lock, matching [`crate::FsDebateStore`]'s concurrency contract so
/// either backend can stand in for the other in tests.
#[derive(Default)]
pub struct MemoryDebateStore {
    documents: RwLock<HashMap<String, DebateState>>,
    locks: std::sync::Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl MemoryDebateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, id: &DebateId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(id.as_str().to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    async fn mutate<F>(&self, id: &DebateId, f: F) -> Result<DebateState, StoreError>
    where
        F: FnOnce(&mut DebateState) -> Result<(), StoreError>,
    {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let mut documents = self.documents.write().await;
        let state = documents
            .get_mut(id.as_str())
            .ok_or_else(|| ValidationError::DebateNotFound(id.as_str().to_string()))?;

        f(state)?;
        state.updated_at = Utc::now();
        Ok(state.clone())
    }
}

#[async_trait]
impl DebateStore for MemoryDebateStore {
    async fn create(
        &self,
        problem: &str,
        agents: &[AgentConfig],
        _judge: &AgentConfig,
        context: Option<&str>,
    ) -> Result<DebateState, StoreError> {
        if agents.is_empty() {
            return Err(ValidationError::InvalidConfig("a debate needs at least one agent".into()).into());
        }

        let now = Utc::now();
        let mut documents = self.documents.write().await;
        let mut id = generate_debate_id();
        for _ in 0..5 {
            if !documents.contains_key(id.as_str()) {
                break;
            }
            id = generate_debate_id();
        }

        let state = DebateState {
            id: id.clone(),
            problem: problem.to_string(),
            context: context.map(str::to_string),
            status: DebateStatus::Pending,
            current_round: 0,
            rounds: Vec::new(),
            clarifications: None,
            final_solution: None,
            prompt_sources: None,
            created_at: now,
            updated_at: now,
            extra: serde_json::Map::new(),
        };
        documents.insert(id.as_str().to_string(), state.clone());
        Ok(state)
    }

    async fn append_contribution(
        &self,
        id: &DebateId,
        round_number: u32,
        contribution: Contribution,
    ) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            let round_count = state.rounds.len() as u32;
            match state.rounds.iter_mut().find(|r| r.round_number == round_number) {
                Some(round) => round.contributions.push(contribution),
                None if round_count == round_number - 1 => {
                    let mut round = Round::new(round_number, Utc::now());
                    round.contributions.push(contribution);
                    state.rounds.push(round);
                }
                None => {
                    return Err(FatalInternal::InvariantViolated(format!(
                        "round {round_number} is not the next expected round"
                    ))
                    .into());
                }
            }
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn set_summary(
        &self,
        id: &DebateId,
        round_number: u32,
        agent_id: &AgentId,
        summary: Summary,
    ) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            let round = state
                .rounds
                .iter_mut()
                .find(|r| r.round_number == round_number)
                .ok_or_else(|| FatalInternal::InvariantViolated(format!("round {round_number} does not exist")))?;
            round.summaries.insert(agent_id.as_str().to_string(), summary);
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn seal_round(&self, id: &DebateId, round_number: u32) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            if !state.rounds.iter().any(|r| r.round_number == round_number) {
                return Err(FatalInternal::InvariantViolated(format!("round {round_number} does not exist")).into());
            }
            state.current_round = round_number;
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn set_clarifications(
        &self,
        id: &DebateId,
        clarifications: Vec<AgentClarifications>,
    ) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            state.clarifications = Some(clarifications);
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn set_final_solution(&self, id: &DebateId, solution: FinalSolution) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            state.final_solution = Some(solution);
            state.status = DebateStatus::Completed;
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn set_status(&self, id: &DebateId, status: DebateStatus) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            state.status = status;
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn set_prompt_sources(
        &self,
        id: &DebateId,
        sources: BTreeMap<String, PromptSource>,
    ) -> Result<(), StoreError> {
        self.mutate(id, |state| {
            state.prompt_sources = Some(sources);
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn get(&self, id: &DebateId) -> Result<Option<DebateState>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_protocol::{ContributionKind, ContributionMetadata, DurationMs, Role};

    fn agent_config(id: &str) -> AgentConfig {
        AgentConfig {
            id: AgentId::new(id),
            name: id.to_string(),
            role: Role::Architect,
            model: "test-model".into(),
            provider: "mock".into(),
            temperature: 0.2,
            enabled: true,
            system_prompt_path: None,
            summary_prompt_path: None,
            clarification_prompt_path: None,
            summarization: None,
            tools: None,
        }
    }

    fn contribution(agent_id: &str) -> Contribution {
        Contribution {
            agent_id: AgentId::new(agent_id),
            role: Role::Architect,
            kind: ContributionKind::Proposal,
            target_agent_id: None,
            content: "do X".into(),
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

    #[tokio::test]
    async fn create_then_get_roundtrips() {
        let store = MemoryDebateStore::new();
        let a1 = agent_config("a1");
        let judge = agent_config("judge");
        let state = store.create("design a cache", &[a1], &judge, None).await.unwrap();

        let fetched = store.get(&state.id).await.unwrap().unwrap();
        assert_eq!(fetched.problem, "design a cache");
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryDebateStore::new();
        let missing = DebateId::new("deb-missing");
        assert!(store.get(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn append_contribution_creates_and_appends() {
        let store = MemoryDebateStore::new();
        let a1 = agent_config("a1");
        let judge = agent_config("judge");
        let state = store.create("problem", &[a1], &judge, None).await.unwrap();

        store.append_contribution(&state.id, 1, contribution("a1")).await.unwrap();
        store.append_contribution(&state.id, 1, contribution("a2")).await.unwrap();

        let fetched = store.get(&state.id).await.unwrap().unwrap();
        assert_eq!(fetched.rounds[0].contributions.len(), 2);
    }

    #[tokio::test]
    async fn mutating_unknown_debate_id_errors() {
        let store = MemoryDebateStore::new();
        let missing = DebateId::new("deb-missing");
        let err = store.append_contribution(&missing, 1, contribution("a1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::DebateNotFound(_))));
    }

    #[tokio::test]
    async fn distinct_debate_ids_do_not_interfere() {
        let store = MemoryDebateStore::new();
        let a1 = agent_config("a1");
        let judge = agent_config("judge");
        let first = store.create("problem one", &[a1.clone()], &judge, None).await.unwrap();
        let second = store.create("problem two", &[a1], &judge, None).await.unwrap();

        store.append_contribution(&first.id, 1, contribution("a1")).await.unwrap();

        let first_fetched = store.get(&first.id).await.unwrap().unwrap();
        let second_fetched = store.get(&second.id).await.unwrap().unwrap();
        assert_eq!(first_fetched.rounds.len(), 1);
        assert!(second_fetched.rounds.is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_to_same_debate_do_not_lose_writes() {
        let store = Arc::new(MemoryDebateStore::new());
        let a1 = agent_config("a1");
        let judge = agent_config("judge");
        let state = store.create("problem", &[a1], &judge, None).await.unwrap();

        let mut handles = vec![];
        for i in 0..16 {
            let store = Arc::clone(&store);
            let id = state.id.clone();
            handles.push(tokio::spawn(async move {
                store.append_contribution(&id, 1, contribution(&format!("agent-{i}"))).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let fetched = store.get(&state.id).await.unwrap().unwrap();
        assert_eq!(fetched.rounds[0].contributions.len(), 16);
    }

    #[tokio::test]
    async fn usable_as_arc_dyn_debate_store() {
        let store: Arc<dyn DebateStore> = Arc::new(MemoryDebateStore::new());
        let a1 = agent_config("a1");
        let judge = agent_config("judge");
        let state = store.create("problem", &[a1], &judge, None).await.unwrap();
        assert!(store.get(&state.id).await.unwrap().is_some());
    }
}
