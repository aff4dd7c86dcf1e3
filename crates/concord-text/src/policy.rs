//! Which directives are honoured, in which order.

use serde::{Deserialize, Serialize};

/// A formatting feature that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormattingRule {
    /// Replace URLs with a placeholder that reveals them on hover.
    VeiledLinks,
    /// `$name` and `$#RRGGBB` color directives.
    CustomFormatting,
    /// `&`-prefixed legacy codes.
    LegacyFormatting,
}

impl FormattingRule {
    /// Highest precedence first.
    pub const PRECEDENCE: [FormattingRule; 3] = [
        FormattingRule::VeiledLinks,
        FormattingRule::CustomFormatting,
        FormattingRule::LegacyFormatting,
    ];
}

/// The formatting switches as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingSettings {
    pub use_custom_formatting: bool,
    pub use_legacy_formatting: bool,
    pub veiled_links: bool,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            use_custom_formatting: false,
            use_legacy_formatting: false,
            veiled_links: true,
        }
    }
}

/// Which directive syntax the scanner looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveMode {
    Custom,
    Legacy,
}

/// The enabled rules, ordered by [`FormattingRule::PRECEDENCE`].
///
/// Custom and legacy directives are mutually exclusive: when both are
/// enabled only the higher-precedence one is used. Veiled links combine
/// with either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattingPolicy {
    rules: Vec<FormattingRule>,
}

impl FormattingPolicy {
    pub fn new(settings: &FormattingSettings) -> Self {
        let rules = FormattingRule::PRECEDENCE
            .into_iter()
            .filter(|rule| match rule {
                FormattingRule::VeiledLinks => settings.veiled_links,
                FormattingRule::CustomFormatting => settings.use_custom_formatting,
                FormattingRule::LegacyFormatting => settings.use_legacy_formatting,
            })
            .collect();
        Self { rules }
    }

    /// A policy with every rule disabled. Text passes through unchanged.
    pub fn plain() -> Self {
        Self::default()
    }

    /// The enabled rules, highest precedence first.
    pub fn rules(&self) -> &[FormattingRule] {
        &self.rules
    }

    pub fn veils_links(&self) -> bool {
        self.rules.contains(&FormattingRule::VeiledLinks)
    }

    /// The directive syntax in effect, if any.
    pub fn directive_mode(&self) -> Option<DirectiveMode> {
        self.rules.iter().find_map(|rule| match rule {
            FormattingRule::CustomFormatting => Some(DirectiveMode::Custom),
            FormattingRule::LegacyFormatting => Some(DirectiveMode::Legacy),
            FormattingRule::VeiledLinks => None,
        })
    }
}

impl From<&FormattingSettings> for FormattingPolicy {
    fn from(settings: &FormattingSettings) -> Self {
        Self::new(settings)
    }
}
