//! Filesystem-backed [`DebateStore`]: one JSON document per debate at
//! `<root>/<id>.json`, written atomically (temp file, fsync, rename).

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::Utc;
use debate_protocol::{
    AgentClarifications, AgentConfig, Contribution, DebateId, DebateState, DebateStatus,
    DebateStore, FatalInternal, FinalSolution, PromptSource, Round, StoreError, Summary,
    ValidationError,
};
use tokio::sync::Mutex as AsyncMutex;

use crate::id::generate_debate_id;

/// Filesystem-backed state store rooted at a directory of `<id>.json`
/// documents (e.g. `./debates`).
///
/// Writes to the same debate id are serialized through a per-id
/// in-process lock; writes to distinct ids proceed concurrently. The
/// store does not coordinate across processes — concurrent writers
/// from different processes to the same id are not supported, matching
/// the single-writer assumption of the protocol.
pub struct FsDebateStore {
    root: PathBuf,
    locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl FsDebateStore {
    /// Create a store rooted at `root`. The directory is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), locks: StdMutex::new(HashMap::new()) }
    }

    fn doc_path(&self, id: &DebateId) -> PathBuf {
        self.root.join(format!("{}.json", id.as_str()))
    }

    fn lock_for(&self, id: &DebateId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(id.as_str().to_string()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
    }

    async fn read_doc(&self, path: &Path) -> Result<Option<DebateState>, StoreError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let state = serde_json::from_str(&contents).map_err(|e| {
                    FatalInternal::InvariantViolated(format!("corrupt debate document: {e}"))
                })?;
                Ok(Some(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FatalInternal::Other(e.to_string()).into()),
        }
    }

    async fn write_doc(&self, state: &DebateState) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| FatalInternal::Other(e.to_string()))?;

        let final_path = self.doc_path(&state.id);
        let tmp_path = self.root.join(format!("{}.json.tmp", state.id.as_str()));
        let contents = serde_json::to_string_pretty(state)
            .map_err(|e| FatalInternal::Other(format!("failed to serialize debate document: {e}")))?;

        let file = tokio::fs::File::create(&tmp_path)
            .await
            .map_err(|e| FatalInternal::Other(e.to_string()))?;
        {
            use tokio::io::AsyncWriteExt;
            let mut file = file;
            file.write_all(contents.as_bytes()).await.map_err(|e| FatalInternal::Other(e.to_string()))?;
            file.sync_all().await.map_err(|e| FatalInternal::Other(e.to_string()))?;
        }
        tokio::fs::rename(&tmp_path, &final_path).await.map_err(|e| FatalInternal::Other(e.to_string()))?;
        Ok(())
    }

    async fn mutate<F>(&self, id: &DebateId, f: F) -> Result<DebateState, StoreError>
    where
        F: FnOnce(&mut DebateState) -> Result<(), StoreError>,
    {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let path = self.doc_path(id);
        let mut state = self
            .read_doc(&path)
            .await?
            .ok_or_else(|| ValidationError::DebateNotFound(id.as_str().to_string()))?;

        f(&mut state)?;
        state.updated_at = Utc::now();
        self.write_doc(&state).await?;
        Ok(state)
    }
}

#[async_trait]
impl DebateStore for FsDebateStore {
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
        let mut id = generate_debate_id();
        // Vanishingly unlikely, but the id's random suffix could already
        // be in use; regenerate rather than clobber an existing debate.
        for _ in 0..5 {
            if !self.doc_path(&id).exists() {
                break;
            }
            id = generate_debate_id();
        }

        let state = DebateState {
            id,
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
        self.write_doc(&state).await?;
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
        agent_id: &debate_protocol::AgentId,
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
        self.read_doc(&self.doc_path(id)).await
    }
}
