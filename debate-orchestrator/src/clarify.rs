//! Clarifying-question collection for the state-machine orchestrator's
//! pre-round-1 suspension.

use std::sync::Arc;

use debate_protocol::{Agent, AgentClarifications, AgentConfig, ClarificationId, ClarificationItem, JudgeAgent};

/// Ask every agent — and the judge — for clarifying questions, cap
/// each at `max_per_agent`, and assign stable ids in asking order.
/// Agents whose capability call fails are treated as asking nothing;
/// clarification collection is a best-effort nicety, not a phase
/// whose failure should abort the debate before it has even started.
pub async fn collect_clarifications(
    agents: &[Arc<dyn Agent>],
    agent_configs: &[AgentConfig],
    judge: &Arc<dyn JudgeAgent>,
    judge_config: &AgentConfig,
    problem: &str,
    max_per_agent: usize,
) -> Vec<AgentClarifications> {
    let mut result = Vec::with_capacity(agents.len() + 1);
    let mut next_id = 0usize;

    for (agent, config) in agents.iter().zip(agent_configs) {
        let questions = agent.ask_clarifying_questions(problem).await.unwrap_or_default();
        let items = build_items(questions, max_per_agent, &mut next_id);
        if !items.is_empty() {
            result.push(AgentClarifications {
                agent_id: config.id.clone(),
                agent_name: config.name.clone(),
                role: config.role,
                items,
            });
        }
    }

    let judge_questions = judge.ask_clarifying_questions(problem).await.unwrap_or_default();
    let judge_items = build_items(judge_questions, max_per_agent, &mut next_id);
    if !judge_items.is_empty() {
        result.push(AgentClarifications {
            agent_id: judge_config.id.clone(),
            agent_name: judge_config.name.clone(),
            role: judge_config.role,
            items: judge_items,
        });
    }

    result
}

fn build_items(questions: Vec<String>, max_per_agent: usize, next_id: &mut usize) -> Vec<ClarificationItem> {
    questions
        .into_iter()
        .take(max_per_agent)
        .map(|question| {
            let id = ClarificationId::new(format!("clarif-{next_id}"));
            *next_id += 1;
            ClarificationItem { id, question, answer: None }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_protocol::{test_utils::FixedAgent, Role};

    fn config(id: &str) -> AgentConfig {
        AgentConfig {
            id: debate_protocol::AgentId::new(id),
            name: id.to_string(),
            role: Role::Architect,
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

    struct AskingAgent(FixedAgent, Vec<String>);

    #[async_trait::async_trait]
    impl Agent for AskingAgent {
        fn id(&self) -> &debate_protocol::AgentId {
            self.0.id()
        }
        fn name(&self) -> &str {
            self.0.name()
        }
        fn role(&self) -> Role {
            self.0.role()
        }
        async fn propose(
            &self,
            ctx: &debate_protocol::DebateContext,
        ) -> Result<debate_protocol::AgentTurnOutput, debate_protocol::ProviderError> {
            self.0.propose(ctx).await
        }
        async fn critique(
            &self,
            ctx: &debate_protocol::DebateContext,
            target: &debate_protocol::Contribution,
        ) -> Result<debate_protocol::AgentTurnOutput, debate_protocol::ProviderError> {
            self.0.critique(ctx, target).await
        }
        async fn refine(
            &self,
            ctx: &debate_protocol::DebateContext,
            original: &debate_protocol::Contribution,
            critiques: &[debate_protocol::Contribution],
        ) -> Result<debate_protocol::AgentTurnOutput, debate_protocol::ProviderError> {
            self.0.refine(ctx, original, critiques).await
        }
        async fn prepare_context(
            &self,
            ctx: &debate_protocol::DebateContext,
            formatted_history: &str,
        ) -> Result<debate_protocol::PreparedContext, debate_protocol::ProviderError> {
            self.0.prepare_context(ctx, formatted_history).await
        }
        async fn ask_clarifying_questions(
            &self,
            _problem: &str,
        ) -> Result<Vec<String>, debate_protocol::ProviderError> {
            Ok(self.1.clone())
        }
        fn should_summarize(&self, formatted_history: &str) -> bool {
            self.0.should_summarize(formatted_history)
        }
    }

    #[async_trait::async_trait]
    impl JudgeAgent for AskingAgent {
        async fn synthesize(
            &self,
            _rounds: &[debate_protocol::Round],
            _problem: &str,
            _context: Option<&str>,
        ) -> Result<debate_protocol::FinalSolution, debate_protocol::ProviderError> {
            unreachable!("not exercised in this test module")
        }
    }

    #[tokio::test]
    async fn collects_and_caps_questions_per_agent() {
        let a1: Arc<dyn Agent> = Arc::new(AskingAgent(
            FixedAgent::new("a1", "A1", Role::Architect, "ignored"),
            vec!["q1".into(), "q2".into(), "q3".into()],
        ));
        let judge: Arc<dyn JudgeAgent> = Arc::new(AskingAgent(
            FixedAgent::new("judge", "Judge", Role::Generalist, "ignored"),
            vec!["jq1".into()],
        ));
        let configs = vec![config("a1")];
        let judge_config = config("judge");

        let clarifications =
            collect_clarifications(&[a1], &configs, &judge, &judge_config, "problem", 2).await;

        assert_eq!(clarifications.len(), 2);
        assert_eq!(clarifications[0].items.len(), 2);
        assert_eq!(clarifications[1].items.len(), 1);
        assert_eq!(clarifications[0].items[0].id.as_str(), "clarif-0");
        assert_eq!(clarifications[1].items[0].id.as_str(), "clarif-2");
    }

    #[tokio::test]
    async fn agents_with_no_questions_are_omitted() {
        let a1: Arc<dyn Agent> =
            Arc::new(AskingAgent(FixedAgent::new("a1", "A1", Role::Architect, "ignored"), vec![]));
        let judge: Arc<dyn JudgeAgent> =
            Arc::new(AskingAgent(FixedAgent::new("judge", "Judge", Role::Generalist, "ignored"), vec![]));
        let configs = vec![config("a1")];
        let judge_config = config("judge");

        let clarifications =
            collect_clarifications(&[a1], &configs, &judge, &judge_config, "problem", 3).await;

        assert!(clarifications.is_empty());
    }
}
