//! Playback coordinator: the single owner of [`PlaybackState`].
//!
//! Views receive `&PlaybackState` through [`PlaybackStore::snapshot`] and
//! never hold it. Every change goes through a command method here, which
//! keeps the elapsed position within the loaded track's duration.

use crate::model::{PlaybackState, Track};

#[derive(Debug, Default)]
pub struct PlaybackStore {
    state: PlaybackState,
}

impl PlaybackStore {
    /// Start with nothing playing.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a restored state, clamping its position.
    pub fn from_state(state: PlaybackState) -> Self {
        let mut store = Self { state };
        store.state.elapsed = store.state.clamped_elapsed();
        store
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &PlaybackState {
        &self.state
    }

    /// Load a track from the start and begin playing.
    pub fn load(&mut self, track: Track) {
        tracing::info!("Now playing: {} ({})", track.title, track.id);
        self.state = PlaybackState {
            track: Some(track),
            is_playing: true,
            elapsed: 0,
        };
    }

    /// Flip between playing and paused. No-op when nothing is loaded.
    pub fn toggle(&mut self) -> bool {
        if self.state.track.is_none() {
            return false;
        }
        self.state.is_playing = !self.state.is_playing;
        tracing::debug!("Playback toggled, playing={}", self.state.is_playing);
        true
    }

    /// Move to an absolute position, clamped to the track duration.
    pub fn seek(&mut self, secs: u32) {
        if self.state.track.is_none() {
            return;
        }
        self.state.elapsed = secs;
        self.state.elapsed = self.state.clamped_elapsed();
    }

    /// Unload the current track.
    pub fn clear(&mut self) {
        self.state = PlaybackState::idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prince() -> Track {
        Track::new("ep", "Electric Prince").with_duration(180)
    }

    #[test]
    fn test_starts_idle() {
        let store = PlaybackStore::new();
        assert!(store.snapshot().track.is_none());
        assert!(!store.snapshot().is_playing);
    }

    #[test]
    fn test_toggle_requires_track() {
        let mut store = PlaybackStore::new();
        assert!(!store.toggle());
        assert!(!store.snapshot().is_playing);

        store.load(prince());
        assert!(store.snapshot().is_playing);
        assert!(store.toggle());
        assert!(!store.snapshot().is_playing);
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut store = PlaybackStore::new();
        store.load(prince());
        store.seek(36);
        assert_eq!(store.snapshot().elapsed, 36);
        store.seek(999);
        assert_eq!(store.snapshot().elapsed, 180);
    }

    #[test]
    fn test_restored_state_is_clamped() {
        let store = PlaybackStore::from_state(PlaybackState {
            track: Some(prince()),
            is_playing: false,
            elapsed: 4000,
        });
        assert_eq!(store.snapshot().elapsed, 180);
    }

    #[test]
    fn test_clear_unloads() {
        let mut store = PlaybackStore::new();
        store.load(prince());
        store.clear();
        assert_eq!(store.snapshot(), &PlaybackState::idle());
    }
}
