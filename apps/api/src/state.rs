use std::sync::Arc;

use crate::briefs::store::BriefStore;
use crate::context::loader::ContextLoader;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: BriefStore,
    pub context: ContextLoader,
    /// Completion backend. `LlmClient` in production, stubbed in router tests.
    pub llm: Arc<dyn CompletionClient>,
}
