//! Cover artwork loading and caching.
//!
//! Loading is fire-and-forget: [`spawn_fetch`] runs on the tokio runtime and
//! reports back through the action channel. Until an entry is ready, and
//! forever if it fails, components draw the placeholder instead.

use std::collections::HashMap;

use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::action::Action;

/// Artwork fetch errors.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to read artwork file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where an image is drawn; each slot keeps its own resize protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtSlot {
    Tile,
    Bar,
}

/// Load status of a cover URI.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkStatus {
    Unknown,
    Loading,
    Failed,
    Ready,
}

enum Entry {
    Loading,
    Failed,
    Ready {
        tile: Box<StatefulProtocol>,
        bar: Box<StatefulProtocol>,
    },
}

/// Decoded artwork keyed by URI.
pub struct ArtworkCache {
    /// Terminal graphics picker; `None` disables artwork entirely
    picker: Option<Picker>,
    entries: HashMap<String, Entry>,
}

impl ArtworkCache {
    pub fn new(picker: Option<Picker>) -> Self {
        Self {
            picker,
            entries: HashMap::new(),
        }
    }

    /// A cache that never loads anything; every cover renders as a placeholder.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.picker.is_some()
    }

    /// Mark a URI as loading. Returns `true` if the caller should fetch it.
    pub fn begin(&mut self, uri: &str) -> bool {
        if !self.is_enabled() || self.entries.contains_key(uri) {
            return false;
        }
        self.entries.insert(uri.to_string(), Entry::Loading);
        true
    }

    /// Decode fetched bytes into render protocols.
    pub fn finish(&mut self, uri: &str, bytes: &[u8]) {
        let Some(picker) = &self.picker else {
            return;
        };
        let entry = match image::load_from_memory(bytes) {
            Ok(image) => Entry::Ready {
                tile: Box::new(picker.new_resize_protocol(image.clone())),
                bar: Box::new(picker.new_resize_protocol(image)),
            },
            Err(e) => {
                tracing::warn!("Failed to decode artwork {}: {}", uri, e);
                Entry::Failed
            }
        };
        self.entries.insert(uri.to_string(), entry);
    }

    pub fn fail(&mut self, uri: &str) {
        self.entries.insert(uri.to_string(), Entry::Failed);
    }

    #[cfg(test)]
    pub fn status(&self, uri: &str) -> ArtworkStatus {
        match self.entries.get(uri) {
            None => ArtworkStatus::Unknown,
            Some(Entry::Loading) => ArtworkStatus::Loading,
            Some(Entry::Failed) => ArtworkStatus::Failed,
            Some(Entry::Ready { .. }) => ArtworkStatus::Ready,
        }
    }

    /// Put a URI in the loading state without a picker.
    #[cfg(test)]
    pub fn mark_loading(&mut self, uri: &str) {
        self.entries.insert(uri.to_string(), Entry::Loading);
    }

    /// Render protocol for a ready image, if any.
    pub fn protocol_mut(&mut self, uri: &str, slot: ArtSlot) -> Option<&mut StatefulProtocol> {
        match self.entries.get_mut(uri) {
            Some(Entry::Ready { tile, bar }) => Some(match slot {
                ArtSlot::Tile => tile.as_mut(),
                ArtSlot::Bar => bar.as_mut(),
            }),
            _ => None,
        }
    }
}

/// Fetch artwork bytes from an http(s) URL or a local path.
pub async fn fetch(uri: &str) -> Result<Vec<u8>, ArtworkError> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        let response = reqwest::get(uri).await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    } else {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        Ok(tokio::fs::read(path).await?)
    }
}

/// Fetch in the background and report the outcome as an action.
pub fn spawn_fetch(uri: String, action_tx: mpsc::UnboundedSender<Action>) {
    tokio::spawn(async move {
        let action = match fetch(&uri).await {
            Ok(bytes) => Action::ArtworkLoaded(uri, bytes),
            Err(e) => {
                tracing::warn!("Failed to load artwork {}: {}", uri, e);
                Action::ArtworkFailed(uri)
            }
        };
        // Receiver is gone only during shutdown.
        let _ = action_tx.send(action);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache_never_fetches() {
        let mut cache = ArtworkCache::disabled();
        assert!(!cache.begin("https://example.com/a.jpg"));
        assert_eq!(cache.status("https://example.com/a.jpg"), ArtworkStatus::Unknown);
        assert!(cache.protocol_mut("https://example.com/a.jpg", ArtSlot::Tile).is_none());
    }

    #[test]
    fn test_failed_entry_has_no_protocol() {
        let mut cache = ArtworkCache::disabled();
        cache.fail("cover.png");
        assert_eq!(cache.status("cover.png"), ArtworkStatus::Failed);
        assert!(cache.protocol_mut("cover.png", ArtSlot::Bar).is_none());
    }

    #[test]
    fn test_loading_entry_has_no_protocol() {
        let mut cache = ArtworkCache::disabled();
        cache.mark_loading("cover.png");
        assert_eq!(cache.status("cover.png"), ArtworkStatus::Loading);
        assert!(cache.protocol_mut("cover.png", ArtSlot::Tile).is_none());
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let uri = format!("file://{}", path.display());
        assert_eq!(fetch(&uri).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_missing_file_errors() {
        let result = fetch("/definitely/not/here.png").await;
        assert!(matches!(result, Err(ArtworkError::Io(_))));
    }

    #[tokio::test]
    async fn test_spawn_fetch_reports_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_fetch(String::from("/definitely/not/here.png"), tx);
        let action = rx.recv().await.unwrap();
        assert_eq!(
            action,
            Action::ArtworkFailed(String::from("/definitely/not/here.png"))
        );
    }
}
