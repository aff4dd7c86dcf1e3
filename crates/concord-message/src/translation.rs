use std::fmt;

use concord_features::FeatureVersion;
use concord_text::{Component, FormattingPolicy};

use crate::argument::Argument;
use crate::template;

/// A user-facing message: a translation key and its English text.
///
/// The English text may contain positional placeholders (`%s`, `%1$s`).
/// `last_modified` is the version of the feature this message last changed
/// in a compatibility-breaking way, such as dropping an argument. Only its
/// major and minor parts matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Translation {
    key: &'static str,
    english: &'static str,
    last_modified: FeatureVersion,
}

impl Translation {
    pub const fn new(key: &'static str, english: &'static str, last_modified: FeatureVersion) -> Self {
        Self {
            key,
            english,
            last_modified,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// The English text, placeholders included.
    pub const fn english_text(&self) -> &'static str {
        self.english
    }

    pub const fn last_modified(&self) -> FeatureVersion {
        self.last_modified
    }

    /// An unresolved component for the client to translate. The English
    /// text rides along as the fallback.
    ///
    /// User-authored arguments are passed through as plain text.
    pub fn component(&self, args: Vec<Argument>) -> Component {
        Component::translatable(
            self.key,
            Some(self.english.to_owned()),
            args.into_iter().map(Argument::into_lazy).collect(),
        )
    }

    /// A component resolved on the server.
    ///
    /// Arguments are substituted into the English text. User-authored
    /// arguments go through the formatting pipeline under `policy`, and
    /// nested components are resolved too, so the result holds no
    /// translation keys.
    pub fn eager_component(&self, args: Vec<Argument>, policy: &FormattingPolicy) -> Component {
        let args: Vec<Component> = args
            .into_iter()
            .map(|arg| arg.into_eager(policy))
            .collect();
        template::render(self.english, &args)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}
