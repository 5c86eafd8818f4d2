//! Prompt Assembler: combines a brief with a task's instruction and system role.

use tracing::debug;

use crate::briefs::store::BriefStore;
use crate::context::loader::ContextLoader;
use crate::errors::AppError;
use crate::generation::prompts::{BRIEF_HEADER, INSTRUCTION_SEPARATOR};
use crate::models::brief::ProductBrief;
use crate::models::prompt::PromptMessage;

/// Builds the `[system, user]` message pair for `task` over the brief `brief_id`.
///
/// The brief is resolved first, so an unknown brief fails before any
/// instruction document is read. Every call re-reads all three sources.
pub async fn build_prompt(
    store: &BriefStore,
    loader: &ContextLoader,
    brief_id: &str,
    task: &str,
) -> Result<Vec<PromptMessage>, AppError> {
    debug!("Building prompt for brief_id={brief_id}, task={task}");

    let brief = store.get(brief_id).await?;
    let instruction = loader.load_instruction(task).await?;
    let role = loader.load_system_role(&instruction.system).await?;

    Ok(vec![
        PromptMessage::system(role.content),
        PromptMessage::user(compose_user_content(&instruction.content, &brief)?),
    ])
}

/// `<instruction>\n\nProduct Brief:\n<brief as indented JSON>`
pub fn compose_user_content(instruction: &str, brief: &ProductBrief) -> Result<String, AppError> {
    let brief_json = serde_json::to_string_pretty(brief)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
    Ok(format!(
        "{instruction}{INSTRUCTION_SEPARATOR}{BRIEF_HEADER}\n{brief_json}"
    ))
}
