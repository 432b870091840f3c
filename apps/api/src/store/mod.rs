//! Document store — the single source of truth for the current resume.
//!
//! Persistence is one key-value entry: the fixed key `resumeData`, the value
//! a JSON serialization of [`ResumeDocument`]. There is no schema version and
//! no migration path; a stored value either parses or is discarded wholesale
//! in favor of the built-in default.
//!
//! Every replacement persists synchronously. Writes are small and local, so
//! they are not coalesced or debounced.

pub mod handlers;

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::{default_document, ResumeDocument};

/// Fixed storage key. Matches the key the browser client used, so a dumped
/// localStorage payload can be dropped into the data directory directly.
pub const STORAGE_KEY: &str = "resumeData";

/// How the session's starting document was obtained. Distinguishes a fresh
/// session from one recovered after discarding a corrupt stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Persisted value was present and parsed.
    Loaded,
    /// No persisted value; started from the default document.
    Fresh,
    /// Persisted value failed to parse and was discarded.
    CorruptDiscarded,
}

pub struct DocumentStore {
    path: PathBuf,
    /// Current document. Snapshots are handed out as `Arc` clones, so a
    /// holder of an earlier snapshot never observes later mutations.
    current: Mutex<Arc<ResumeDocument>>,
    load_outcome: LoadOutcome,
}

impl DocumentStore {
    /// Opens the store rooted at `data_dir`, loading the persisted document
    /// if one parses and falling back to the default otherwise. Corruption is
    /// recovered locally; it never fails the session.
    pub fn open(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data dir {}", data_dir.display()))?;
        let path = data_dir.join(format!("{STORAGE_KEY}.json"));

        let (document, load_outcome) = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<ResumeDocument>(&raw) {
                Ok(doc) => (doc, LoadOutcome::Loaded),
                Err(e) => {
                    warn!(
                        "Persisted document at {} is corrupt ({e}); falling back to default",
                        path.display()
                    );
                    (default_document(), LoadOutcome::CorruptDiscarded)
                }
            },
            Err(_) => (default_document(), LoadOutcome::Fresh),
        };

        info!("Document store ready ({load_outcome:?})");

        Ok(Self {
            path,
            current: Mutex::new(Arc::new(document)),
            load_outcome,
        })
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Snapshot of the current document.
    pub fn current(&self) -> Arc<ResumeDocument> {
        self.current.lock().expect("document store lock poisoned").clone()
    }

    /// Replaces the document wholesale and persists it.
    pub fn replace(&self, document: ResumeDocument) -> Result<Arc<ResumeDocument>, AppError> {
        self.mutate(|doc| *doc = document)
    }

    /// Clones the current document, applies `f`, swaps the result in and
    /// persists it. Callers never observe a half-updated document: the swap
    /// is a single pointer replacement of a fully built value.
    ///
    /// The in-memory swap happens before the disk write, so a persistence
    /// failure loses durability but not the edit; the next mutation writes
    /// the full document again.
    pub fn mutate<F>(&self, f: F) -> Result<Arc<ResumeDocument>, AppError>
    where
        F: FnOnce(&mut ResumeDocument),
    {
        let mut guard = self.current.lock().expect("document store lock poisoned");
        let mut next = (**guard).clone();
        f(&mut next);
        let next = Arc::new(next);
        *guard = next.clone();

        let serialized = serde_json::to_string_pretty(next.as_ref())
            .context("serializing resume document")?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("persisting resume document to {}", self.path.display()))?;

        Ok(next)
    }
}
