use domain::models::{ConversationMessage, Role};
use shared::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The store never retains more than this many messages; overflow is
/// trimmed from the front, oldest first.
pub const MAX_MESSAGES: usize = 20;

/// Append-only bounded conversation log, flushed to a pretty-printed JSON
/// document after every mutation. Single-process, last-writer-wins.
pub struct HistoryStore {
    path: PathBuf,
    messages: Vec<ConversationMessage>,
}

impl HistoryStore {
    /// Loads the full document at `path`, creating parent directories as
    /// needed. A missing or corrupt file degrades to an empty log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|err| {
                Error::Storage(format!("failed to create {}: {err}", dir.display()))
            })?;
        }

        let messages = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(messages) => messages,
                Err(err) => {
                    warn!(%err, path = %path.display(), "history file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(%err, path = %path.display(), "could not read history, starting empty");
                Vec::new()
            }
        };

        Ok(Self { path, messages })
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Result<()> {
        self.messages.push(ConversationMessage::now(role, content));
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
        self.save()
    }

    /// The last `count` messages in original insertion order.
    pub fn recent(&self, count: usize) -> &[ConversationMessage] {
        &self.messages[self.messages.len().saturating_sub(count)..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.messages.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.messages)
            .map_err(|err| Error::Storage(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| {
            Error::Storage(format!("failed to write {}: {err}", self.path.display()))
        })
    }
}
