use rmcp::model::{Prompt, PromptArgument, PromptMessage, PromptMessageRole};

pub const BY_STATE: &str = "brewery/by-state";

/// Every prompt the server publishes.
pub fn list() -> Vec<Prompt> {
    vec![Prompt::new(
        BY_STATE,
        Some("Search for breweries in a specified State"),
        Some(vec![PromptArgument {
            name: "state".to_string(),
            title: None,
            description: Some("State name or abbreviation".to_string()),
            required: Some(true),
        }]),
    )]
}

/// The by-state instruction, pointing the model at the search tool.
pub fn by_state_text(state: &str) -> String {
    format!(
        "Search for breweries in {state}. You can use the `brewery/search` tool with `by_state` set to '{state}'."
    )
}

pub fn by_state_messages(state: &str) -> Vec<PromptMessage> {
    vec![PromptMessage::new_text(
        PromptMessageRole::User,
        by_state_text(state),
    )]
}
