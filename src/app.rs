//! Main application state and logic.
//!
//! `App` owns everything the presentational components must not: the
//! selected tile, the open action sheet, overlays, and the playback store.
//! Components receive plain values from it on every frame.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui_image::picker::Picker;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::artwork::{self, ArtworkCache};
use crate::config::{Config, HeaderAction};
use crate::icon::IconSet;
use crate::model::{ActionDescriptor, ActionId, LibraryCollection, TrackId};
use crate::snapshot::Snapshot;
use crate::store::PlaybackStore;
use crate::ui::targets::Targets;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Seek step in seconds.
const SEEK_STEP: u32 = 10;

/// The open item action sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetState {
    /// Track the actions apply to
    pub track: TrackId,
    /// Highlighted row
    pub highlighted: usize,
}

/// Main application state.
pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,

    /// Page title
    pub title: String,

    /// Number of grid columns requested by the configuration
    pub columns: usize,

    /// Columns the grid laid out on the last frame; navigation follows these
    pub grid_columns: usize,

    /// Icon glyph family
    pub icons: IconSet,

    /// Global header actions
    pub header_actions: Vec<HeaderAction>,

    /// Per-item actions
    pub item_actions: Vec<ActionDescriptor>,

    /// Library shown in the grid
    pub collection: LibraryCollection,

    /// Single owner of playback state
    pub store: PlaybackStore,

    /// Decoded cover art
    pub artwork: ArtworkCache,

    /// Selected tile index
    pub selected: Option<usize>,

    /// Open item action sheet
    pub sheet: Option<SheetState>,

    /// Help overlay visible
    pub show_help: bool,

    /// Error message to display
    pub error_message: Option<String>,

    /// Transient status message and when it was set
    pub status: Option<(String, Instant)>,

    /// Click targets from the last render
    pub targets: Targets,

    /// Action sender for async operations
    pub action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    /// Create a new application instance.
    pub fn new(
        config: &Config,
        snapshot: Snapshot,
        picker: Option<Picker>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let selected = if snapshot.collection.is_empty() {
            None
        } else {
            Some(0)
        };
        Self {
            should_quit: false,
            title: config.ui.title.clone(),
            columns: config.ui.columns.max(1),
            grid_columns: config.ui.columns.max(1),
            icons: config.ui.icons,
            header_actions: config.header_actions(),
            item_actions: config.item_actions(),
            collection: snapshot.collection,
            store: PlaybackStore::from_state(snapshot.playback),
            artwork: ArtworkCache::new(picker),
            selected,
            sheet: None,
            show_help: false,
            error_message: None,
            status: None,
            targets: Targets::new(),
            action_tx,
        }
    }

    /// Start background loading of every distinct cover.
    pub fn init(&mut self) {
        let mut uris: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        let playing = self.store.snapshot().track.iter();
        for track in self.collection.iter().chain(playing) {
            if let Some(uri) = track.cover_uri() {
                if seen.insert(uri.to_string()) {
                    uris.push(uri.to_string());
                }
            }
        }

        for uri in uris {
            if self.artwork.begin(&uri) {
                tracing::debug!("Loading artwork {}", uri);
                artwork::spawn_fetch(uri, self.action_tx.clone());
            }
        }
    }

    /// Status message, if it has not expired.
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(text, _)| text.as_str())
    }

    fn set_status(&mut self, text: String) {
        self.status = Some((text, Instant::now()));
    }

    /// Handle an action and update state.
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }

            Action::Tick => {
                if self.status.is_some() && self.status_text().is_none() {
                    self.status = None;
                }
            }

            Action::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
            }

            // Grid navigation
            Action::NavigateUp => self.move_selection(-(self.grid_columns as isize)),
            Action::NavigateDown => self.move_selection(self.grid_columns as isize),
            Action::NavigateLeft => self.move_selection(-1),
            Action::NavigateRight => self.move_selection(1),

            Action::JumpToTop => {
                if !self.collection.is_empty() {
                    self.selected = Some(0);
                }
            }

            Action::JumpToBottom => {
                if !self.collection.is_empty() {
                    self.selected = Some(self.collection.len() - 1);
                }
            }

            Action::Select => {
                if let Some(track) = self.selected_track_id() {
                    self.handle_action(Action::TileSelected(track))?;
                }
            }

            // Mouse
            Action::MouseClick(x, y) => {
                let hit = self.targets.hit(x, y).cloned();
                if self.sheet.is_some() && !matches!(hit, Some(Action::ItemAction(..))) {
                    // Clicking anywhere off the sheet rows dismisses it
                    if hit != Some(Action::None) {
                        self.sheet = None;
                    }
                    return Ok(());
                }
                if self.show_help || self.error_message.is_some() {
                    return Ok(());
                }
                if let Some(action) = hit {
                    self.handle_action(action)?;
                }
            }

            Action::MouseScroll(delta) => {
                if self.sheet.is_some() {
                    if delta < 0 {
                        self.handle_action(Action::SheetUp)?;
                    } else {
                        self.handle_action(Action::SheetDown)?;
                    }
                } else if delta < 0 {
                    self.move_selection(-(self.grid_columns as isize));
                } else {
                    self.move_selection(self.grid_columns as isize);
                }
            }

            // Item action sheet
            Action::OpenActions => {
                if let Some(track) = self.selected_track_id() {
                    self.sheet = Some(SheetState {
                        track,
                        highlighted: 0,
                    });
                }
            }

            Action::CloseActions => {
                self.sheet = None;
            }

            Action::SheetUp => {
                if let Some(sheet) = &mut self.sheet {
                    sheet.highlighted = sheet.highlighted.saturating_sub(1);
                }
            }

            Action::SheetDown => {
                let last = self.item_actions.len().saturating_sub(1);
                if let Some(sheet) = &mut self.sheet {
                    sheet.highlighted = (sheet.highlighted + 1).min(last);
                }
            }

            Action::SheetInvoke => {
                if let Some(sheet) = &self.sheet {
                    if let Some(descriptor) = self.item_actions.get(sheet.highlighted) {
                        let action = Action::ItemAction(descriptor.id.clone(), sheet.track.clone());
                        self.handle_action(action)?;
                    }
                }
            }

            // Artwork
            Action::ArtworkLoaded(uri, bytes) => {
                self.artwork.finish(&uri, &bytes);
            }

            Action::ArtworkFailed(uri) => {
                self.artwork.fail(&uri);
            }

            // Overlays
            Action::ShowHelp => {
                self.show_help = true;
            }

            Action::HideHelp => {
                self.show_help = false;
            }

            // Errors
            Action::Error(msg) => {
                self.error_message = Some(msg);
            }

            Action::ClearError => {
                self.error_message = None;
            }

            // Outbound callbacks
            Action::TileSelected(id) => {
                self.selected = self.collection.position(&id);
                match self.collection.find(&id) {
                    Some(track) => self.store.load(track.clone()),
                    None => tracing::warn!("Selected track {} is not in the library", id),
                }
            }

            Action::GlobalAction(id) => {
                tracing::info!("Global action invoked: {}", id);
                self.set_status(format!("{} requested", capitalize(id.as_str())));
            }

            Action::TogglePlayback => {
                self.store.toggle();
            }

            Action::ItemAction(action, track) => {
                self.sheet = None;
                self.report_item_action(&action, &track);
            }

            Action::SeekForward => {
                let elapsed = self.store.snapshot().elapsed;
                self.store.seek(elapsed.saturating_add(SEEK_STEP));
            }

            Action::SeekBackward => {
                let elapsed = self.store.snapshot().elapsed;
                self.store.seek(elapsed.saturating_sub(SEEK_STEP));
            }

            Action::Stop => {
                self.store.clear();
            }

            Action::None => {}
        }

        Ok(())
    }

    /// Action for a header shortcut key, if the header shows `id`.
    pub fn header_shortcut(&self, id: &str) -> Action {
        match self.header_actions.iter().find(|a| a.id.as_str() == id) {
            Some(action) => Action::GlobalAction(action.id.clone()),
            None => Action::None,
        }
    }

    fn selected_track_id(&self) -> Option<TrackId> {
        self.selected
            .and_then(|i| self.collection.get(i))
            .map(|t| t.id.clone())
    }

    /// Move the grid selection by `delta` tiles, staying inside the library.
    fn move_selection(&mut self, delta: isize) {
        let len = self.collection.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let Some(current) = self.selected else {
            self.selected = Some(0);
            return;
        };
        let target = current as isize + delta;
        if (0..len as isize).contains(&target) {
            self.selected = Some(target as usize);
        }
    }

    fn report_item_action(&mut self, action: &ActionId, track: &TrackId) {
        let label = self
            .item_actions
            .iter()
            .find(|a| &a.id == action)
            .map(|a| a.label.clone())
            .unwrap_or_else(|| action.to_string());
        let title = self
            .collection
            .find(track)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| track.to_string());

        tracing::info!("Item action invoked: {} on {}", action, track);
        self.set_status(format!("{label}: {title}"));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::{PlaybackState, Track};

    fn app_with(tracks: usize, playback: PlaybackState) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let collection = LibraryCollection::from_tracks(
            (0..tracks)
                .map(|i| Track::new(format!("t{i}"), format!("Track {i}")).with_duration(100))
                .collect(),
        )
        .unwrap();
        let mut config = Config::default();
        config.ui.icons = IconSet::Unicode;
        App::new(
            &config,
            Snapshot {
                collection,
                playback,
            },
            None,
            tx,
        )
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|frame| crate::ui::render(frame, app)).unwrap();
    }

    #[test]
    fn test_grid_navigation_stays_in_bounds() {
        let mut app = app_with(5, PlaybackState::idle());
        assert_eq!(app.selected, Some(0));

        app.handle_action(Action::NavigateUp).unwrap();
        assert_eq!(app.selected, Some(0));
        app.handle_action(Action::NavigateDown).unwrap();
        assert_eq!(app.selected, Some(2));
        app.handle_action(Action::NavigateRight).unwrap();
        assert_eq!(app.selected, Some(3));
        app.handle_action(Action::NavigateDown).unwrap();
        assert_eq!(app.selected, Some(3));
        app.handle_action(Action::JumpToBottom).unwrap();
        assert_eq!(app.selected, Some(4));
        app.handle_action(Action::NavigateRight).unwrap();
        assert_eq!(app.selected, Some(4));
    }

    #[test]
    fn test_empty_library_has_no_selection() {
        let mut app = app_with(0, PlaybackState::idle());
        app.handle_action(Action::NavigateDown).unwrap();
        app.handle_action(Action::Select).unwrap();
        app.handle_action(Action::OpenActions).unwrap();
        assert_eq!(app.selected, None);
        assert!(app.sheet.is_none());
        assert!(app.store.snapshot().track.is_none());
    }

    #[test]
    fn test_select_loads_track_into_store() {
        let mut app = app_with(3, PlaybackState::idle());
        app.handle_action(Action::NavigateRight).unwrap();
        app.handle_action(Action::Select).unwrap();

        let state = app.store.snapshot();
        assert_eq!(state.track.as_ref().map(|t| t.title.as_str()), Some("Track 1"));
        assert!(state.is_playing);

        app.handle_action(Action::TogglePlayback).unwrap();
        assert!(!app.store.snapshot().is_playing);
    }

    #[test]
    fn test_seek_and_stop() {
        let track = Track::new("np", "Now").with_duration(25);
        let mut app = app_with(
            1,
            PlaybackState {
                track: Some(track),
                is_playing: true,
                elapsed: 5,
            },
        );
        app.handle_action(Action::SeekBackward).unwrap();
        assert_eq!(app.store.snapshot().elapsed, 0);
        app.handle_action(Action::SeekForward).unwrap();
        app.handle_action(Action::SeekForward).unwrap();
        app.handle_action(Action::SeekForward).unwrap();
        assert_eq!(app.store.snapshot().elapsed, 25);

        app.handle_action(Action::Stop).unwrap();
        assert!(app.store.snapshot().track.is_none());
        app.handle_action(Action::SeekForward).unwrap();
        assert_eq!(app.store.snapshot().elapsed, 0);
    }

    #[test]
    fn test_narrow_terminal_caps_columns() {
        let mut app = app_with(6, PlaybackState::idle());
        app.columns = 20;
        app.grid_columns = 20;
        draw(&mut app);
        // 58 usable cells hold 14 minimum-width tiles
        assert_eq!(app.grid_columns, 14);
        let tiles = app
            .targets
            .iter()
            .filter(|(_, a)| matches!(a, Action::TileSelected(_)))
            .count();
        assert_eq!(tiles, 6);

        // All six tiles share the first row, so moving down goes nowhere
        app.handle_action(Action::NavigateDown).unwrap();
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_sheet_invoke_reports_and_closes() {
        let mut app = app_with(2, PlaybackState::idle());
        app.handle_action(Action::OpenActions).unwrap();
        app.handle_action(Action::SheetDown).unwrap();
        app.handle_action(Action::SheetDown).unwrap();
        assert_eq!(app.sheet.as_ref().map(|s| s.highlighted), Some(2));

        app.handle_action(Action::SheetInvoke).unwrap();
        assert!(app.sheet.is_none());
        assert_eq!(app.status_text(), Some("Add to Queue: Track 0"));
    }

    #[test]
    fn test_sheet_highlight_clamped() {
        let mut app = app_with(1, PlaybackState::idle());
        app.handle_action(Action::OpenActions).unwrap();
        app.handle_action(Action::SheetUp).unwrap();
        assert_eq!(app.sheet.as_ref().map(|s| s.highlighted), Some(0));
        for _ in 0..20 {
            app.handle_action(Action::SheetDown).unwrap();
        }
        assert_eq!(
            app.sheet.as_ref().map(|s| s.highlighted),
            Some(app.item_actions.len() - 1)
        );
    }

    #[test]
    fn test_click_tile_then_toggle() {
        let mut app = app_with(4, PlaybackState::idle());
        draw(&mut app);

        let (area, _) = app
            .targets
            .iter()
            .find(|(_, a)| *a == Action::TileSelected(TrackId::new("t1")))
            .cloned()
            .unwrap();
        app.handle_action(Action::MouseClick(area.x + 1, area.y + 1))
            .unwrap();
        assert_eq!(app.selected, Some(1));
        assert!(app.store.snapshot().is_playing);

        // The bar appears on the next frame and its control toggles playback
        draw(&mut app);
        let (control, _) = app
            .targets
            .iter()
            .find(|(_, a)| *a == Action::TogglePlayback)
            .cloned()
            .unwrap();
        app.handle_action(Action::MouseClick(control.x, control.y))
            .unwrap();
        assert!(!app.store.snapshot().is_playing);
    }

    #[test]
    fn test_click_header_action_sets_status() {
        let mut app = app_with(1, PlaybackState::idle());
        draw(&mut app);
        let (area, _) = app
            .targets
            .iter()
            .find(|(_, a)| *a == Action::GlobalAction(ActionId::new("search")))
            .cloned()
            .unwrap();
        app.handle_action(Action::MouseClick(area.x + 1, area.y + 1))
            .unwrap();
        assert_eq!(app.status_text(), Some("Search requested"));
    }

    #[test]
    fn test_click_outside_sheet_closes_it() {
        let mut app = app_with(2, PlaybackState::idle());
        app.handle_action(Action::OpenActions).unwrap();
        draw(&mut app);

        // Header row sits above the sheet
        app.handle_action(Action::MouseClick(1, 0)).unwrap();
        assert!(app.sheet.is_none());
        assert!(app.store.snapshot().track.is_none());
    }

    #[test]
    fn test_click_sheet_row_invokes_action() {
        let mut app = app_with(2, PlaybackState::idle());
        app.handle_action(Action::OpenActions).unwrap();
        draw(&mut app);

        let (row, _) = app
            .targets
            .iter()
            .find(|(_, a)| matches!(a, Action::ItemAction(id, _) if id.as_str() == "delete"))
            .cloned()
            .unwrap();
        app.handle_action(Action::MouseClick(row.x + 2, row.y))
            .unwrap();
        assert!(app.sheet.is_none());
        assert_eq!(app.status_text(), Some("Delete: Track 0"));
    }

    #[test]
    fn test_artwork_results_without_picker_are_harmless() {
        let mut app = app_with(1, PlaybackState::idle());
        app.handle_action(Action::ArtworkLoaded("x".into(), vec![0, 1]))
            .unwrap();
        app.handle_action(Action::ArtworkFailed("y".into())).unwrap();
        draw(&mut app);
    }

    #[test]
    fn test_header_shortcut_follows_configured_actions() {
        let mut app = app_with(1, PlaybackState::idle());
        assert_eq!(
            app.header_shortcut("search"),
            Action::GlobalAction(ActionId::new("search"))
        );

        app.header_actions = vec![HeaderAction {
            id: ActionId::new("shuffle"),
            icon: crate::icon::Icon::Generic,
        }];
        assert_eq!(app.header_shortcut("add"), Action::None);
        assert_eq!(app.header_shortcut("search"), Action::None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("search"), "Search");
        assert_eq!(capitalize(""), "");
    }
}
