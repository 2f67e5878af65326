//! Capability predicates consulted during prompt assembly.

use crate::agent::AgentConfiguration;

/// Decides whether an agent gets the word-parsing instruction block.
pub trait LanguageCapability: Send + Sync {
    fn is_language_capable(&self, agent: &AgentConfiguration) -> bool;
}

/// Capable iff the agent type is `language_assistant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentTypeCapability;

impl LanguageCapability for AgentTypeCapability {
    fn is_language_capable(&self, agent: &AgentConfiguration) -> bool {
        agent.agent_type.is_language_assistant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentType;

    #[test]
    fn only_language_assistants_are_capable() {
        let cap = AgentTypeCapability;
        let general = AgentConfiguration::default();
        let tutor = AgentConfiguration {
            agent_type: AgentType::language_assistant(),
            ..Default::default()
        };
        assert!(!cap.is_language_capable(&general));
        assert!(cap.is_language_capable(&tutor));
    }
}
