//! In-text formatting directives.
//!
//! Directives only exist while a single piece of text is being formatted.

use crate::style::{Color, NamedColor, Style};

/// Prefix of a custom directive, `$red` or `$#FF8800`.
pub const CUSTOM_PREFIX: char = '$';

/// Prefix of a legacy formatting code, `&c` or `&l`.
pub const LEGACY_PREFIX: char = '&';

/// One recognised directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattingDirective {
    /// `$<name>`: switch to a named color.
    ColorByName(NamedColor),
    /// `$#RRGGBB`: switch to an RGB color.
    ColorByHex(u32),
    /// `&<code>`: a legacy formatting code.
    LegacyCode(LegacyCode),
    /// A URL replaced by a placeholder that reveals it on hover.
    VeiledLink(String),
}

impl FormattingDirective {
    /// Parses the token after [`CUSTOM_PREFIX`].
    pub fn parse_custom(token: &str) -> Option<Self> {
        if token.starts_with('#') {
            return match Color::parse_hex(token)? {
                Color::Rgb(rgb) => Some(FormattingDirective::ColorByHex(rgb)),
                Color::Named(named) => Some(FormattingDirective::ColorByName(named)),
            };
        }
        NamedColor::from_name(token).map(FormattingDirective::ColorByName)
    }

    /// Applies a color or legacy directive to the running style.
    ///
    /// Veiled links never change the running style.
    pub fn apply(&self, style: &mut Style) {
        match self {
            FormattingDirective::ColorByName(named) => style.color = Some(Color::Named(*named)),
            FormattingDirective::ColorByHex(rgb) => style.color = Some(Color::Rgb(*rgb)),
            FormattingDirective::LegacyCode(code) => code.apply(style),
            FormattingDirective::VeiledLink(_) => {}
        }
    }
}

/// A legacy formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCode {
    Color(NamedColor),
    Obfuscated,
    Bold,
    Strikethrough,
    Italic,
    Reset,
}

impl LegacyCode {
    /// Looks a code up by its character. Case-insensitive.
    pub fn from_char(code: char) -> Option<Self> {
        if let Some(color) = NamedColor::from_legacy_code(code) {
            return Some(LegacyCode::Color(color));
        }
        match code.to_ascii_lowercase() {
            'k' => Some(LegacyCode::Obfuscated),
            'l' => Some(LegacyCode::Bold),
            'm' => Some(LegacyCode::Strikethrough),
            'o' => Some(LegacyCode::Italic),
            'r' => Some(LegacyCode::Reset),
            _ => None,
        }
    }

    /// Applies the code the way the game does: a color also clears the
    /// format flags, and reset returns to the plain style.
    pub fn apply(self, style: &mut Style) {
        match self {
            LegacyCode::Color(color) => {
                style.clear_formatting();
                style.color = Some(Color::Named(color));
            }
            LegacyCode::Obfuscated => style.obfuscated = true,
            LegacyCode::Bold => style.bold = true,
            LegacyCode::Strikethrough => style.strikethrough = true,
            LegacyCode::Italic => style.italic = true,
            LegacyCode::Reset => *style = Style::default(),
        }
    }
}
