// Context Loader: read-only access to operator-curated instruction and system-role documents.

pub mod loader;
pub mod models;
