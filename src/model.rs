//! Library data model handed to the view layer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::icon::Icon;

/// Data model errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate track id in library: {0}")]
    DuplicateTrack(TrackId),
}

/// Unique identifier of a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playable media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    /// Cover artwork URI (http(s) URL or local path)
    #[serde(default)]
    pub cover: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u32>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: None,
            album: None,
            cover: None,
            duration: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Subtitle line: "artist • album", skipping whichever part is missing.
    pub fn subtitle(&self) -> String {
        [self.artist.as_deref(), self.album.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" • ")
    }

    /// Cover URI, treating blank strings as absent.
    pub fn cover_uri(&self) -> Option<&str> {
        self.cover.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Ordered set of tracks; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryCollection {
    tracks: Vec<Track>,
}

impl LibraryCollection {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate ids.
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(&track.id) {
                return Err(ModelError::DuplicateTrack(track.id.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Identity of a global or per-item action, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One invocable operation on a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub id: ActionId,
    pub icon: Icon,
    pub label: String,
}

impl ActionDescriptor {
    pub fn new(id: impl Into<String>, icon: Icon, label: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(id),
            icon,
            label: label.into(),
        }
    }

    /// The built-in per-item action set.
    pub fn defaults() -> Vec<ActionDescriptor> {
        vec![
            Self::new("tag", Icon::Tag, "Tags"),
            Self::new("play-next", Icon::PlayNext, "Play Next"),
            Self::new("add-to-queue", Icon::AddToQueue, "Add to Queue"),
            Self::new("share", Icon::Share, "Share"),
            Self::new("download", Icon::Download, "Download"),
            Self::new("delete", Icon::Delete, "Delete"),
        ]
    }
}

/// Snapshot of what is currently playing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    /// Loaded track; `None` means nothing is playing
    pub track: Option<Track>,

    pub is_playing: bool,

    /// Elapsed position in seconds
    pub elapsed: u32,
}

impl PlaybackState {
    /// Nothing loaded, nothing playing.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Option<u32> {
        self.track.as_ref().and_then(|t| t.duration)
    }

    /// Filled proportion of the progress indicator, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        match self.duration() {
            Some(duration) if duration > 0 => {
                (f64::from(self.elapsed) / f64::from(duration)).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Elapsed position, never past the track's duration.
    pub fn clamped_elapsed(&self) -> u32 {
        match self.duration() {
            Some(duration) => self.elapsed.min(duration),
            None => self.elapsed,
        }
    }

    /// Format elapsed as M:SS.
    pub fn elapsed_string(&self) -> String {
        format_time(self.clamped_elapsed())
    }

    /// Format duration as M:SS, or "--:--" when unknown.
    pub fn duration_string(&self) -> String {
        self.duration()
            .map(format_time)
            .unwrap_or_else(|| String::from("--:--"))
    }
}

fn format_time(secs: u32) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{mins}:{secs:02}")
}
