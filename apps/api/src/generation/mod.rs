// Prompt assembly and the generate endpoint.
// All completion calls go through llm_client.

pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
