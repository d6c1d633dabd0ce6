//! Typed configuration document: what a caller who has already parsed
//! `./debate-config.json` hands to the orchestrator. Parsing the file
//! itself — walking the filesystem, choosing a path — is an operator
//! concern and stays out of this crate.

use debate_protocol::{AgentConfig, DebateConfig, Role, ValidationError};
use serde::{Deserialize, Serialize};

/// The top-level shape of a configuration document: an agent roster,
/// a judge, and debate-wide settings, each independently defaultable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebateConfigDocument {
    /// The debating roster. Missing or empty resolves to
    /// [`default_agents`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<AgentConfig>>,
    /// The synthesizing judge. Missing resolves to [`default_judge`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge: Option<AgentConfig>,
    /// Debate-wide settings. Missing resolves to `DebateConfig::default()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debate: Option<DebateConfig>,
}

/// The built-in roster used when a document omits `agents` or supplies
/// an empty list: one generalist and one security-focused agent,
/// enough to produce a genuine critique pass without any configuration.
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig {
            id: "agent-generalist".into(),
            name: "Generalist".to_string(),
            role: Role::Generalist,
            model: "default".to_string(),
            provider: "default".to_string(),
            temperature: 0.7,
            enabled: true,
            system_prompt_path: None,
            summary_prompt_path: None,
            clarification_prompt_path: None,
            summarization: None,
            tools: None,
        },
        AgentConfig {
            id: "agent-security".into(),
            name: "Security".to_string(),
            role: Role::Security,
            model: "default".to_string(),
            provider: "default".to_string(),
            temperature: 0.7,
            enabled: true,
            system_prompt_path: None,
            summary_prompt_path: None,
            clarification_prompt_path: None,
            summarization: None,
            tools: None,
        },
    ]
}

/// The built-in judge used when a document omits `judge`: role
/// `generalist`, per §6.2.
pub fn default_judge() -> AgentConfig {
    AgentConfig {
        id: "judge".into(),
        name: "Judge".to_string(),
        role: Role::Generalist,
        model: "default".to_string(),
        provider: "default".to_string(),
        temperature: 0.3,
        enabled: true,
        system_prompt_path: None,
        summary_prompt_path: None,
        clarification_prompt_path: None,
        summarization: None,
        tools: None,
    }
}

impl DebateConfigDocument {
    /// Apply the "missing → built-in defaults" rules and reject a
    /// structurally invalid document.
    ///
    /// Rejects `rounds == 0` and any agent (including the judge) with
    /// a blank `id`. Does not check for duplicate ids across the
    /// roster; [`debate_orchestrator::DebateOrchestrator::new`] is the
    /// authority on roster-shape validation at construction time.
    pub fn resolve(self) -> Result<(Vec<AgentConfig>, AgentConfig, DebateConfig), ValidationError> {
        let agents = match self.agents {
            Some(agents) if !agents.is_empty() => agents,
            _ => default_agents(),
        };
        let judge = self.judge.unwrap_or_else(default_judge);
        let debate = self.debate.unwrap_or_default();

        if debate.rounds == 0 {
            return Err(ValidationError::InvalidConfig("debate.rounds must be >= 1".to_string()));
        }
        for agent in agents.iter().chain(std::iter::once(&judge)) {
            if agent.id.as_str().trim().is_empty() {
                return Err(ValidationError::InvalidConfig(format!(
                    "agent \"{}\" has a blank id",
                    agent.name
                )));
            }
        }

        Ok((agents, judge, debate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_document_resolves_to_every_built_in_default() {
        let (agents, judge, debate) = DebateConfigDocument::default().resolve().unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(judge.role, Role::Generalist);
        assert_eq!(debate.rounds, 1);
    }

    #[test]
    fn an_explicit_empty_agent_list_falls_back_to_defaults() {
        let doc = DebateConfigDocument { agents: Some(vec![]), judge: None, debate: None };
        let (agents, _, _) = doc.resolve().unwrap();
        assert_eq!(agents.len(), 2);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let doc = DebateConfigDocument {
            agents: None,
            judge: None,
            debate: Some(DebateConfig { rounds: 0, ..Default::default() }),
        };
        assert!(matches!(doc.resolve(), Err(ValidationError::InvalidConfig(_))));
    }

    #[test]
    fn a_blank_agent_id_is_rejected() {
        let mut agent = default_agents().remove(0);
        agent.id = "".into();
        let doc = DebateConfigDocument { agents: Some(vec![agent]), judge: None, debate: None };
        assert!(matches!(doc.resolve(), Err(ValidationError::InvalidConfig(_))));
    }

    #[test]
    fn deserializes_a_partial_document_from_json() {
        let json = r#"{"debate": {"rounds": 3}}"#;
        let doc: DebateConfigDocument = serde_json::from_str(json).unwrap();
        let (agents, _, debate) = doc.resolve().unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(debate.rounds, 3);
    }
}
