use concord_text::{Component, FormattingPolicy, format};

use crate::eager::eager_translate;

/// A positional argument of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Text produced by the server (a player name, a count). Never
    /// formatted.
    Literal(String),
    /// Text written by a user, such as a relayed chat message. Formatted
    /// when the message is resolved eagerly.
    UserText(String),
    /// A nested component, which may itself be an unresolved translation.
    Component(Component),
}

impl Argument {
    pub fn literal(text: impl Into<String>) -> Self {
        Argument::Literal(text.into())
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Argument::UserText(text.into())
    }

    /// The argument as it goes into an unresolved translation.
    pub(crate) fn into_lazy(self) -> Component {
        match self {
            Argument::Literal(text) | Argument::UserText(text) => Component::text(text),
            Argument::Component(component) => component,
        }
    }

    /// The argument fully resolved on the server.
    pub(crate) fn into_eager(self, policy: &FormattingPolicy) -> Component {
        match self {
            Argument::Literal(text) => Component::text(text),
            Argument::UserText(text) => format(&text, policy).into_component(),
            Argument::Component(component) => eager_translate(component),
        }
    }
}

impl From<Component> for Argument {
    fn from(component: Component) -> Self {
        Argument::Component(component)
    }
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Argument::literal(text)
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Argument::Literal(text)
    }
}
