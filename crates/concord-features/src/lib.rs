//! Per-connection capability tracking for Concord.
//!
//! This crate answers one question for the messaging layer: *can this
//! recipient render this message on its own?*
//!
//! 1. **Registry**: remembers what each connection announced
//!    ([`FeatureRegistry`]).
//! 2. **Compatibility**: compares what a message needs against what was
//!    announced ([`FeatureVersion`], [`is_compatible`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! Message Layer (above)  ← asks whether a recipient is compatible
//!     ↕
//! Features Layer (this crate)  ← per-connection capability sets
//!     ↕
//! Protocol Layer (below)  ← provides CapabilitySet, Version
//! ```

mod feature;
mod registry;

pub use feature::{is_compatible, FeatureVersion};
pub use registry::FeatureRegistry;
