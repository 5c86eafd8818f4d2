use serde::{Deserialize, Serialize};

/// Fields a caller supplies when creating or replacing a brief.
/// Any `id` in the request body is ignored; the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBriefInput {
    pub title: String,
    pub problem: String,
    pub goals: Vec<String>,
    pub target_users: Vec<String>,
    pub key_features: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// A persisted product brief. `id` is assigned at creation and never changes.
/// Field order is the on-disk layout: `id` is written last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBrief {
    pub title: String,
    pub problem: String,
    pub goals: Vec<String>,
    pub target_users: Vec<String>,
    pub key_features: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub id: String,
}

impl ProductBrief {
    /// Builds a full record from caller input, keeping `id`.
    pub fn from_input(id: impl Into<String>, input: ProductBriefInput) -> Self {
        let ProductBriefInput {
            title,
            problem,
            goals,
            target_users,
            key_features,
            constraints,
        } = input;
        Self {
            title,
            problem,
            goals,
            target_users,
            key_features,
            constraints,
            id: id.into(),
        }
    }
}
