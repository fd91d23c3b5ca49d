//! Icon identifiers and their glyphs.
//!
//! Components only ever name an [`Icon`]; the concrete glyph is picked by the
//! configured [`IconSet`] when the icon is drawn.

use serde::{Deserialize, Serialize};

/// Named glyphs used by the library screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Add,
    Search,
    Play,
    Pause,
    Tag,
    PlayNext,
    AddToQueue,
    Share,
    Download,
    Delete,
    /// Artwork placeholder
    Music,
    /// Fallback for names that do not map to any known icon
    Generic,
}

impl Icon {
    /// Resolve a configuration name. Accepts our own names and Feather icon
    /// names.
    pub fn from_name(name: &str) -> Option<Icon> {
        let icon = match name.trim().to_ascii_lowercase().as_str() {
            "add" | "plus" | "plus-circle" => Icon::Add,
            "search" => Icon::Search,
            "play" => Icon::Play,
            "pause" => Icon::Pause,
            "tag" | "tags" => Icon::Tag,
            "play-next" | "corner-up-right" => Icon::PlayNext,
            "add-to-queue" | "queue" | "plus-square" => Icon::AddToQueue,
            "share" | "link" => Icon::Share,
            "download" => Icon::Download,
            "delete" | "trash" => Icon::Delete,
            "music" => Icon::Music,
            _ => return None,
        };
        Some(icon)
    }

    /// Resolve a configuration name, falling back to [`Icon::Generic`].
    pub fn from_name_or_generic(name: &str) -> Icon {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown icon name {:?}, using generic glyph", name);
            Icon::Generic
        })
    }
}

/// Glyph family used to draw icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSet {
    /// Nerd Font glyphs (requires a patched font)
    #[default]
    Nerd,
    /// Plain Unicode symbols
    Unicode,
}

impl IconSet {
    pub fn glyph(self, icon: Icon) -> &'static str {
        match self {
            Self::Nerd => match icon {
                Icon::Add => "\u{f055}",
                Icon::Search => "\u{f002}",
                Icon::Play => "\u{f04b}",
                Icon::Pause => "\u{f04c}",
                Icon::Tag => "\u{f02b}",
                Icon::PlayNext => "\u{f051}",
                Icon::AddToQueue => "\u{f0fe}",
                Icon::Share => "\u{f0c1}",
                Icon::Download => "\u{f019}",
                Icon::Delete => "\u{f1f8}",
                Icon::Music => "\u{f001}",
                Icon::Generic => "\u{f111}",
            },
            Self::Unicode => match icon {
                Icon::Add => "+",
                Icon::Search => "⌕",
                Icon::Play => "▶",
                Icon::Pause => "‖",
                Icon::Tag => "#",
                Icon::PlayNext => "↱",
                Icon::AddToQueue => "⊞",
                Icon::Share => "↗",
                Icon::Download => "↓",
                Icon::Delete => "✕",
                Icon::Music => "♪",
                Icon::Generic => "•",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feather_names_resolve() {
        assert_eq!(Icon::from_name("plus-circle"), Some(Icon::Add));
        assert_eq!(Icon::from_name("corner-up-right"), Some(Icon::PlayNext));
        assert_eq!(Icon::from_name("Trash"), Some(Icon::Delete));
        assert_eq!(Icon::from_name("link"), Some(Icon::Share));
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(Icon::from_name("sparkles"), None);
        assert_eq!(Icon::from_name_or_generic("sparkles"), Icon::Generic);
    }

    #[test]
    fn test_play_and_pause_glyphs_differ() {
        for set in [IconSet::Nerd, IconSet::Unicode] {
            assert_ne!(set.glyph(Icon::Play), set.glyph(Icon::Pause));
        }
    }
}
