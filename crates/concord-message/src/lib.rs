//! User-facing messages for Concord.
//!
//! Every message is a [`Translation`]: a key, its English text, and the
//! version of the `translations` feature it last changed in. A message can
//! reach a player in one of two shapes:
//!
//! - **Lazy**: an unresolved translation key (with the English text as a
//!   fallback) that the client looks up itself.
//! - **Eager**: text resolved on the server, with arguments substituted and
//!   user-authored text run through the formatting pipeline.
//!
//! The [`Translator`] picks the shape per recipient, using the capability
//! sets in a [`FeatureRegistry`](concord_features::FeatureRegistry).
//!
//! # How it fits in the stack
//!
//! ```text
//! Server Layer (above)  ← sends and notifies
//!     ↕
//! Message Layer (this crate)  ← translations, eager/lazy resolution
//!     ↕
//! Features + Text Layers (below)  ← compatibility, formatting pipeline
//! ```

mod argument;
mod eager;
pub mod messages;
mod notify;
mod resolver;
mod template;
mod translation;

pub use argument::Argument;
pub use eager::eager_translate;
pub use notify::{Notification, NotifySettings};
pub use resolver::{
    CommandSource, Eagerness, Entity, ICONS_FONT, MessageSettings, RenderContext, ResolvedMessage,
    Translator,
};
pub use translation::Translation;
