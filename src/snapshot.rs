//! Library snapshots handed to the view layer.

use std::path::Path;

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::model::{LibraryCollection, PlaybackState, Track, TrackId};

const SAMPLE_COVER: &str = "https://f4.bcbits.com/img/a1501995349_16.jpg";

/// On-disk snapshot format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub tracks: Vec<Track>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<NowPlaying>,
}

/// Restored playback position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NowPlaying {
    pub track: TrackId,

    #[serde(default)]
    pub playing: bool,

    /// Elapsed seconds
    #[serde(default)]
    pub elapsed: u32,
}

/// Immutable library data plus the initial playback state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub collection: LibraryCollection,
    pub playback: PlaybackState,
}

impl Snapshot {
    /// Parse a JSON snapshot.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(contents)?;
        Self::from_file(file)
    }

    /// Load a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot = Self::parse(&contents)?;
        tracing::info!(
            "Loaded {} tracks from {}",
            snapshot.collection.len(),
            path.display()
        );
        Ok(snapshot)
    }

    fn from_file(file: SnapshotFile) -> Result<Self> {
        let collection = LibraryCollection::from_tracks(file.tracks)?;

        let playback = match file.now_playing {
            Some(now) => match collection.find(&now.track) {
                Some(track) => PlaybackState {
                    track: Some(track.clone()),
                    is_playing: now.playing,
                    elapsed: now.elapsed,
                },
                None => {
                    tracing::warn!("Now playing track {} is not in the library", now.track);
                    PlaybackState::idle()
                }
            },
            None => PlaybackState::idle(),
        };

        Ok(Self {
            collection,
            playback,
        })
    }

    /// Built-in sample library.
    pub fn sample() -> Self {
        let ging = Track::new("the-way-of-ging", "The Way of Ging")
            .with_cover(SAMPLE_COVER)
            .with_duration(212);
        let prince = Track::new("electric-prince", "Electric Prince")
            .with_artist("Frank Dukes")
            .with_album("Instrumental")
            .with_cover(SAMPLE_COVER)
            .with_duration(180);

        let playback = PlaybackState {
            track: Some(prince.clone()),
            is_playing: true,
            elapsed: 36,
        };

        Self {
            collection: LibraryCollection::from_tracks(vec![ging, prince]).unwrap_or_default(),
            playback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_now_playing() {
        let snapshot = Snapshot::parse(
            r#"{
                "tracks": [
                    { "id": "a", "title": "The Way of Ging", "cover": "a.jpg" },
                    { "id": "b", "title": "Electric Prince", "artist": "Frank Dukes", "duration": 180 }
                ],
                "now_playing": { "track": "b", "playing": true, "elapsed": 36 }
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.collection.len(), 2);
        let track = snapshot.playback.track.as_ref().unwrap();
        assert_eq!(track.title, "Electric Prince");
        assert!(snapshot.playback.is_playing);
        assert_eq!(snapshot.playback.elapsed, 36);
    }

    #[test]
    fn test_unknown_now_playing_is_idle() {
        let snapshot = Snapshot::parse(
            r#"{ "tracks": [{ "id": "a", "title": "A" }], "now_playing": { "track": "zzz" } }"#,
        )
        .unwrap();
        assert!(snapshot.playback.track.is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Snapshot::parse(
            r#"{ "tracks": [{ "id": "a", "title": "A" }, { "id": "a", "title": "B" }] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_object_is_empty_library() {
        let snapshot = Snapshot::parse("{}").unwrap();
        assert!(snapshot.collection.is_empty());
        assert!(snapshot.playback.track.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{ "tracks": [{ "id": "a", "title": "A" }] }"#).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap().collection.len(), 1);
    }

    #[test]
    fn test_sample_library() {
        let sample = Snapshot::sample();
        assert_eq!(sample.collection.get(0).unwrap().title, "The Way of Ging");
        let playing = sample.playback.track.unwrap();
        assert_eq!(playing.artist.as_deref(), Some("Frank Dukes"));
    }
}
