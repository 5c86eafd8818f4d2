use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use crate::context::models::{DocumentKind, InstructionTemplate, SystemRole};
use crate::errors::AppError;
use crate::paths::document_path;

/// Loads curated documents from `<root>/instructions/` and `<root>/system_roles/`.
///
/// Unlike brief listing, nothing is swallowed here: a missing or broken document
/// is a deployment problem and fails the request.
#[derive(Debug, Clone)]
pub struct ContextLoader {
    root: PathBuf,
}

impl ContextLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn load<T: DeserializeOwned>(
        &self,
        name: &str,
        kind: DocumentKind,
    ) -> Result<T, AppError> {
        let not_found = || AppError::NotFound(format!("{} '{name}' not found", kind.label()));

        let dir = self.root.join(kind.dir_name());
        let path = document_path(&dir, name).ok_or_else(not_found)?;
        debug!("Loading {} from {}", kind.label(), path.display());

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "could not read {}: {e}",
                    path.display()
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            AppError::Malformed(format!("{} '{name}' is malformed: {e}", kind.label()))
        })
    }

    pub async fn load_instruction(&self, task: &str) -> Result<InstructionTemplate, AppError> {
        self.load(task, DocumentKind::Instruction).await
    }

    pub async fn load_system_role(&self, name: &str) -> Result<SystemRole, AppError> {
        self.load(name, DocumentKind::SystemRole).await
    }
}
