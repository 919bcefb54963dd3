//! Workspace-local persistence for loop state
//!
//! One JSON record per workspace, under a hidden directory at the
//! workspace root. Absence of the file is a valid, meaningful state (no
//! loop). A corrupt or unreadable record is treated the same way rather
//! than wedging the workspace; the loop simply has to be re-initialized.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::domain::LoopState;
use crate::error::Result;

/// Hidden directory holding controller state, relative to the workspace
pub const STATE_DIR_NAME: &str = ".ralph";

/// File name of the single loop record
pub const STATE_FILE_NAME: &str = "ralph-loop.state.json";

/// Durable store for the one loop record of a workspace
///
/// Pure persistence, no policy. The controller may be re-invoked per
/// event, so every read goes to disk.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store rooted at the given workspace directory
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self::with_dir_name(workspace, STATE_DIR_NAME)
    }

    /// Create a store using a custom hidden-directory name
    pub fn with_dir_name(workspace: impl AsRef<Path>, dir_name: &str) -> Self {
        Self {
            path: workspace.as_ref().join(dir_name).join(STATE_FILE_NAME),
        }
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, if any
    ///
    /// A missing, unreadable, or unparsable record is "no loop".
    pub fn load(&self) -> Option<LoopState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(target: "ralph-loop", "Failed to read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    target: "ralph-loop",
                    "Corrupt state at {} ({}); treating as no loop",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persist the state, creating missing directories
    pub fn save(&self, state: &LoopState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        Ok(())
    }

    /// Remove the record; returns whether it existed
    pub fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
