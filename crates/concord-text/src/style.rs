//! Colors and text styles.

use std::fmt;

use serde::{Serialize, Serializer};

/// The sixteen colors the game names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// All named colors, in legacy code order (`0` through `f`).
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    /// The name used in chat-component JSON.
    pub const fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }

    /// The legacy formatting code character, `0`-`9` then `a`-`f`.
    pub const fn legacy_code(self) -> char {
        const CODES: &[u8; 16] = b"0123456789abcdef";
        CODES[self as usize] as char
    }

    /// Looks a color up by its legacy code. Case-insensitive.
    pub fn from_legacy_code(code: char) -> Option<Self> {
        let index = code.to_digit(16)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Looks a color up by name.
    ///
    /// Matching ignores case and underscores, and accepts the `grey`
    /// spellings, so `DarkRed`, `dark_red` and `darkred` are all the same
    /// color.
    pub fn from_name(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let folded = folded.replace("grey", "gray");
        Self::ALL
            .into_iter()
            .find(|color| color.name().replace('_', "") == folded)
    }

    /// The color's RGB value, as the game renders it.
    pub const fn rgb(self) -> u32 {
        match self {
            NamedColor::Black => 0x000000,
            NamedColor::DarkBlue => 0x0000AA,
            NamedColor::DarkGreen => 0x00AA00,
            NamedColor::DarkAqua => 0x00AAAA,
            NamedColor::DarkRed => 0xAA0000,
            NamedColor::DarkPurple => 0xAA00AA,
            NamedColor::Gold => 0xFFAA00,
            NamedColor::Gray => 0xAAAAAA,
            NamedColor::DarkGray => 0x555555,
            NamedColor::Blue => 0x5555FF,
            NamedColor::Green => 0x55FF55,
            NamedColor::Aqua => 0x55FFFF,
            NamedColor::Red => 0xFF5555,
            NamedColor::LightPurple => 0xFF55FF,
            NamedColor::Yellow => 0xFFFF55,
            NamedColor::White => 0xFFFFFF,
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A text color: one of the named colors or an arbitrary RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Rgb(u32),
}

impl Color {
    /// Parses `#RRGGBB`. Exactly six hex digits after the `#`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color::Rgb)
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        Color::Named(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(named) => named.fmt(f),
            Color::Rgb(rgb) => write!(f, "#{rgb:06X}"),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What happens when the text is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ClickEvent {
    OpenUrl(String),
}

/// What is shown while the cursor hovers over the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", content = "contents", rename_all = "snake_case")]
pub enum HoverEvent {
    ShowText(String),
}

/// Visual style of a run of text.
///
/// The default style is plain: no color, no formatting, no events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
    pub click: Option<ClickEvent>,
    pub hover: Option<HoverEvent>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn obfuscated(mut self) -> Self {
        self.obfuscated = true;
        self
    }

    pub fn on_click(mut self, event: ClickEvent) -> Self {
        self.click = Some(event);
        self
    }

    pub fn on_hover(mut self, event: HoverEvent) -> Self {
        self.hover = Some(event);
        self
    }

    /// Returns `true` if this style changes nothing.
    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    /// Clears the format flags, keeping color and events.
    pub(crate) fn clear_formatting(&mut self) {
        self.bold = false;
        self.italic = false;
        self.underlined = false;
        self.strikethrough = false;
        self.obfuscated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_spellings() {
        assert_eq!(NamedColor::from_name("red"), Some(NamedColor::Red));
        assert_eq!(NamedColor::from_name("RED"), Some(NamedColor::Red));
        assert_eq!(NamedColor::from_name("dark_red"), Some(NamedColor::DarkRed));
        assert_eq!(NamedColor::from_name("darkred"), Some(NamedColor::DarkRed));
        assert_eq!(NamedColor::from_name("DarkRed"), Some(NamedColor::DarkRed));
        assert_eq!(NamedColor::from_name("grey"), Some(NamedColor::Gray));
        assert_eq!(NamedColor::from_name("dark_grey"), Some(NamedColor::DarkGray));
        assert_eq!(NamedColor::from_name("lightpurple"), Some(NamedColor::LightPurple));
    }

    #[test]
    fn test_from_name_unknown_is_none() {
        assert_eq!(NamedColor::from_name("5"), None);
        assert_eq!(NamedColor::from_name(""), None);
        assert_eq!(NamedColor::from_name("crimson"), None);
        assert_eq!(NamedColor::from_name("red!"), None);
    }

    #[test]
    fn test_legacy_codes_round_trip() {
        for color in NamedColor::ALL {
            assert_eq!(NamedColor::from_legacy_code(color.legacy_code()), Some(color));
        }
        assert_eq!(NamedColor::from_legacy_code('C'), Some(NamedColor::Red));
        assert_eq!(NamedColor::from_legacy_code('g'), None);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse_hex("#FF8800"), Some(Color::Rgb(0xFF8800)));
        assert_eq!(Color::parse_hex("#ff8800"), Some(Color::Rgb(0xFF8800)));
        assert_eq!(Color::parse_hex("FF8800"), None);
        assert_eq!(Color::parse_hex("#FF880"), None);
        assert_eq!(Color::parse_hex("#FF88000"), None);
        assert_eq!(Color::parse_hex("#GG8800"), None);
        assert_eq!(Color::parse_hex("#+F8800"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::Named(NamedColor::DarkAqua).to_string(), "dark_aqua");
        assert_eq!(Color::Rgb(0x0a0b0c).to_string(), "#0A0B0C");
    }

    #[test]
    fn test_clear_formatting_keeps_color() {
        let mut style = Style::new().with_color(NamedColor::Red).bold().italic();
        style.clear_formatting();
        assert_eq!(style, Style::new().with_color(NamedColor::Red));
    }
}
