//! Application actions/events that drive state changes.

use crate::model::{ActionId, TrackId};

/// Actions that can be dispatched to update application state.
///
/// The last group doubles as the outbound contract of the view layer: a
/// click on a component's activation target emits one of those variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Application lifecycle
    Quit,
    Tick,
    Resize(u16, u16),

    // Grid navigation
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    JumpToTop,
    JumpToBottom,
    /// Activate the selected tile
    Select,

    // Mouse
    MouseClick(u16, u16),
    MouseScroll(i16), // positive = down, negative = up

    // Item action sheet
    OpenActions,
    CloseActions,
    SheetUp,
    SheetDown,
    /// Invoke the highlighted row of the open sheet
    SheetInvoke,

    // Artwork
    ArtworkLoaded(String, Vec<u8>),
    ArtworkFailed(String),

    // Overlays
    ShowHelp,
    HideHelp,

    // Errors
    Error(String),
    ClearError,

    // Outbound callbacks
    TileSelected(TrackId),
    GlobalAction(ActionId),
    TogglePlayback,
    ItemAction(ActionId, TrackId),

    // Playback position
    SeekForward,
    SeekBackward,
    Stop,

    // No-op
    None,
}
