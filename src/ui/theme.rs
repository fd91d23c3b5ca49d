//! Fixed palette of the library screen.

use ratatui::style::Color;

pub const SCREEN_BG: Color = Color::Rgb(0x22, 0x24, 0x32);
pub const HEADER_BG: Color = Color::Rgb(0x83, 0x2b, 0x83);
pub const SURFACE_BG: Color = Color::Rgb(0x15, 0x15, 0x17);
pub const PLACEHOLDER_BG: Color = Color::Rgb(0x33, 0x35, 0x45);
pub const TEXT: Color = Color::White;
pub const TEXT_MUTED: Color = Color::Rgb(0x94, 0x95, 0xa5);
pub const ACCENT: Color = Color::Rgb(0xe0, 0x8a, 0xe0);
