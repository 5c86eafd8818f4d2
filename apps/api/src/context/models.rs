use serde::{Deserialize, Serialize};

/// Guidance for one task. `system` names the system role to pair it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionTemplate {
    pub system: String,
    pub content: String,
}

/// Persona text sent as the first message of every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRole {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Instruction,
    SystemRole,
}

impl DocumentKind {
    /// Subdirectory of the contexts root holding this kind of document.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DocumentKind::Instruction => "instructions",
            DocumentKind::SystemRole => "system_roles",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Instruction => "Instruction",
            DocumentKind::SystemRole => "System role",
        }
    }
}
