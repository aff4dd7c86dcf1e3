//! Styled chat text for Concord.
//!
//! The crate has two halves:
//!
//! - **Model** ([`Component`], [`Style`], [`Color`]): the structured text
//!   tree every outgoing message is built from. It serializes to the game's
//!   chat-component JSON.
//! - **Formatting pipeline** ([`format`]): turns untrusted, user-authored
//!   text (a relayed Discord message, say) into styled [`Segment`]s by
//!   interpreting in-text directives. Which directives are honoured is
//!   decided by an ordered [`FormattingPolicy`].
//!
//! The pipeline is total. Malformed or unknown directives come out as the
//! literal text they were written as, and nothing here returns an error.

mod component;
mod directive;
mod format;
mod policy;
mod style;

pub use component::{Component, Content};
pub use directive::{CUSTOM_PREFIX, FormattingDirective, LEGACY_PREFIX, LegacyCode};
pub use format::{Segment, StyledText, VEILED_LINK_LABEL, format};
pub use policy::{DirectiveMode, FormattingPolicy, FormattingRule, FormattingSettings};
pub use style::{ClickEvent, Color, HoverEvent, NamedColor, Style};
