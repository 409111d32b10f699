use crate::error::Result;
use crate::types::NormalizedRecord;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Storage trait for persisting the merged record list
#[async_trait]
pub trait Storage: Send + Sync {
    /// Replace whatever was stored before with `records`
    async fn save(&self, records: &[NormalizedRecord]) -> Result<()>;

    /// Human readable location of the stored data
    fn location(&self) -> String;
}

/// Writes records as a pretty-printed JSON array with sorted keys.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Render records the way they are written to disk. Keys come out sorted
/// because `serde_json::Map` is ordered.
pub fn render_json(records: &[NormalizedRecord]) -> Result<String> {
    let value = serde_json::to_value(records)?;
    let mut output = serde_json::to_string_pretty(&value)?;
    output.push('\n');
    Ok(output)
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn save(&self, records: &[NormalizedRecord]) -> Result<()> {
        let output = render_json(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target, then swap it in, so a failed write
        // never leaves a truncated results file behind
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        fs::write(&tmp_path, output.as_bytes())?;
        debug!("Wrote {} bytes to {}", output.len(), tmp_path.display());
        fs::rename(&tmp_path, &self.path)?;

        info!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory storage implementation for development/testing
#[derive(Default)]
pub struct InMemoryStorage {
    saves: Arc<Mutex<Vec<Vec<NormalizedRecord>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records from the most recent save, if any
    pub fn last_saved(&self) -> Option<Vec<NormalizedRecord>> {
        self.saves.lock().ok()?.last().cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save(&self, records: &[NormalizedRecord]) -> Result<()> {
        let mut saves = self.saves.lock().unwrap_or_else(|e| e.into_inner());
        saves.push(records.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
