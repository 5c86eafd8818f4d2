//! File-backed brief storage: one pretty-printed JSON file per brief, named by its id.
//!
//! There is no cache and no locking. Every call goes to disk, and concurrent
//! writes to the same id are last-writer-wins.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::brief::{ProductBrief, ProductBriefInput};
use crate::paths::{document_path, is_safe_name, DOCUMENT_EXTENSION};

#[derive(Debug, Clone)]
pub struct BriefStore {
    dir: PathBuf,
}

impl BriefStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Storage(format!(
                "could not create brief directory {}: {e}",
                self.dir.display()
            ))
        })
    }

    /// Persists a new brief under a freshly generated id.
    pub async fn create(&self, input: ProductBriefInput) -> Result<ProductBrief, AppError> {
        let brief = ProductBrief::from_input(Uuid::new_v4().to_string(), input);
        self.write(&brief).await?;
        info!("Created brief {}", brief.id);
        Ok(brief)
    }

    /// Returns every brief that can be read, parsed, and is stored under its own id.
    /// Other files are logged and left out rather than failing the listing.
    pub async fn list(&self) -> Result<Vec<ProductBrief>, AppError> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            AppError::Storage(format!(
                "could not list brief directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut briefs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Storage(format!("could not list brief directory: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .filter(|stem| is_safe_name(stem))
            else {
                warn!("Skipping brief file {}: not a valid brief id", path.display());
                continue;
            };
            match read_brief(&path).await {
                Ok(brief) if brief.id == stem => briefs.push(brief),
                Ok(brief) => warn!(
                    "Skipping brief file {}: stored id {} does not match file name",
                    path.display(),
                    brief.id
                ),
                Err(e) => warn!("Skipping brief file {}: {e}", path.display()),
            }
        }

        debug!("Listed {} briefs from {}", briefs.len(), self.dir.display());
        Ok(briefs)
    }

    /// Fetches one brief. A missing file, a corrupt file, and a file whose stored id
    /// differs from its name all yield `NotFound`.
    pub async fn get(&self, id: &str) -> Result<ProductBrief, AppError> {
        let path = self.path_for(id)?;
        debug!("Reading brief from {}", path.display());

        match read_brief(&path).await {
            Ok(brief) if brief.id == id => Ok(brief),
            Ok(brief) => {
                warn!("Brief file for {id} holds mismatched id {}", brief.id);
                Err(brief_not_found(id))
            }
            Err(AppError::NotFound(_)) => Err(brief_not_found(id)),
            Err(e) => {
                warn!("Brief {id} exists but could not be read: {e}");
                Err(brief_not_found(id))
            }
        }
    }

    /// Replaces every field of an existing brief except its id.
    pub async fn update(
        &self,
        id: &str,
        input: ProductBriefInput,
    ) -> Result<ProductBrief, AppError> {
        self.get(id).await?;
        let brief = ProductBrief::from_input(id, input);
        self.write(&brief).await?;
        info!("Updated brief {id}");
        Ok(brief)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let path = self.path_for(id)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(brief_not_found(id)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(brief_not_found(id))
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "could not inspect brief {id}: {e}"
                )))
            }
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Storage(format!("could not delete brief {id}: {e}")))?;
        info!("Deleted brief {id}");
        Ok(())
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, AppError> {
        document_path(&self.dir, id).ok_or_else(|| brief_not_found(id))
    }

    async fn write(&self, brief: &ProductBrief) -> Result<(), AppError> {
        let path = self.path_for(&brief.id)?;
        let json = serde_json::to_string_pretty(brief)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        fs::write(&path, json)
            .await
            .map_err(|e| AppError::Storage(format!("could not save brief {}: {e}", brief.id)))
    }
}

fn brief_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Brief {id} not found"))
}

async fn read_brief(path: &Path) -> Result<ProductBrief, AppError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(path.display().to_string()))
        }
        Err(e) => {
            return Err(AppError::Storage(format!(
                "could not read {}: {e}",
                path.display()
            )))
        }
    };
    serde_json::from_str(&content)
        .map_err(|e| AppError::Malformed(format!("{}: {e}", path.display())))
}
