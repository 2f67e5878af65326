//! `parley resolve` — Show what an agent type resolves to in the admin store.

use super::open_store;
use parley_config::AppConfig;
use parley_core::AgentType;
use parley_prompt::SystemPromptResolver;

pub async fn run(
    config: &AppConfig,
    agent_type: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config);
    println!("Store: {}", store.name());

    let agent_type = agent_type.map(AgentType::from);
    let resolver = SystemPromptResolver::new(store);
    let resolved = resolver.resolve(agent_type.as_ref()).await;

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
