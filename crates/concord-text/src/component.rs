//! The chat-component tree.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::style::Style;

/// What a single component node displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Literal text, shown as-is.
    Text(String),
    /// A translation key for the client to resolve, with the text to show
    /// when it cannot and the arguments to substitute.
    Translatable {
        key: String,
        fallback: Option<String>,
        args: Vec<Component>,
    },
}

/// A node of styled chat text.
///
/// Children ("siblings" in the game's terms) are rendered after the node's
/// own content and inherit its style unless they override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub content: Content,
    pub style: Style,
    pub siblings: Vec<Component>,
}

impl Component {
    /// A plain literal.
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_content(Content::Text(text.into()))
    }

    /// An empty literal, useful as a container for siblings.
    pub fn empty() -> Self {
        Self::text(String::new())
    }

    /// An unresolved translation.
    pub fn translatable(
        key: impl Into<String>,
        fallback: Option<String>,
        args: Vec<Component>,
    ) -> Self {
        Self::from_content(Content::Translatable {
            key: key.into(),
            fallback,
            args,
        })
    }

    fn from_content(content: Content) -> Self {
        Self {
            content,
            style: Style::default(),
            siblings: Vec::new(),
        }
    }

    pub fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn append(mut self, sibling: Component) -> Self {
        self.siblings.push(sibling);
        self
    }

    /// Returns `true` if no node in the tree, arguments included, is still
    /// a translation key.
    pub fn is_resolved(&self) -> bool {
        let own = match &self.content {
            Content::Text(_) => true,
            Content::Translatable { .. } => false,
        };
        own && self.siblings.iter().all(Component::is_resolved)
    }

    /// Flattens the tree to unstyled text.
    ///
    /// Meant for resolved trees. An unresolved node contributes its
    /// fallback text (or its key when there is none) without argument
    /// substitution.
    pub fn to_plain_string(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    fn write_plain(&self, out: &mut String) {
        match &self.content {
            Content::Text(text) => out.push_str(text),
            Content::Translatable { key, fallback, .. } => {
                out.push_str(fallback.as_deref().unwrap_or(key));
            }
        }
        for sibling in &self.siblings {
            sibling.write_plain(out);
        }
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Component::text(text)
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Component::text(text)
    }
}

/// Serializes to the game's chat-component JSON. Unset style fields are
/// omitted so children keep inheriting them.
impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        match &self.content {
            Content::Text(text) => map.serialize_entry("text", text)?,
            Content::Translatable {
                key,
                fallback,
                args,
            } => {
                map.serialize_entry("translate", key)?;
                if let Some(fallback) = fallback {
                    map.serialize_entry("fallback", fallback)?;
                }
                if !args.is_empty() {
                    map.serialize_entry("with", args)?;
                }
            }
        }

        let style = &self.style;
        if let Some(color) = &style.color {
            map.serialize_entry("color", color)?;
        }
        for (name, set) in [
            ("bold", style.bold),
            ("italic", style.italic),
            ("underlined", style.underlined),
            ("strikethrough", style.strikethrough),
            ("obfuscated", style.obfuscated),
        ] {
            if set {
                map.serialize_entry(name, &true)?;
            }
        }
        if let Some(click) = &style.click {
            map.serialize_entry("clickEvent", click)?;
        }
        if let Some(hover) = &style.hover {
            map.serialize_entry("hoverEvent", hover)?;
        }

        if !self.siblings.is_empty() {
            map.serialize_entry("extra", &self.siblings)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::style::{ClickEvent, HoverEvent, NamedColor};

    #[test]
    fn test_serialize_plain_text() {
        let value = serde_json::to_value(Component::text("hello")).unwrap();
        assert_eq!(value, json!({ "text": "hello" }));
    }

    #[test]
    fn test_serialize_translatable_with_args() {
        let component = Component::translatable(
            "concord.test",
            Some("%s joined".into()),
            vec![Component::text("Alex")],
        );
        let value = serde_json::to_value(component).unwrap();
        assert_eq!(
            value,
            json!({
                "translate": "concord.test",
                "fallback": "%s joined",
                "with": [{ "text": "Alex" }],
            })
        );
    }

    #[test]
    fn test_serialize_style_and_events() {
        let component = Component::text("[link]").styled(
            Style::new()
                .with_color(NamedColor::Blue)
                .underlined()
                .on_click(ClickEvent::OpenUrl("https://x.io".into()))
                .on_hover(HoverEvent::ShowText("https://x.io".into())),
        );
        let value = serde_json::to_value(component).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "[link]",
                "color": "blue",
                "underlined": true,
                "clickEvent": { "action": "open_url", "value": "https://x.io" },
                "hoverEvent": { "action": "show_text", "contents": "https://x.io" },
            })
        );
    }

    #[test]
    fn test_serialize_siblings_as_extra() {
        let component = Component::empty().append("a".into()).append("b".into());
        let value = serde_json::to_value(component).unwrap();
        assert_eq!(
            value,
            json!({ "text": "", "extra": [{ "text": "a" }, { "text": "b" }] })
        );
    }

    #[test]
    fn test_is_resolved_detects_nested_translatable() {
        assert!(Component::text("a").append("b".into()).is_resolved());

        let nested = Component::empty().append(Component::translatable("k", None, vec![]));
        assert!(!nested.is_resolved());
    }

    #[test]
    fn test_to_plain_string_concatenates_tree() {
        let component = Component::text("Alex")
            .append(Component::text(" joined "))
            .append(Component::empty().append("the game".into()));
        assert_eq!(component.to_plain_string(), "Alex joined the game");
    }

    #[test]
    fn test_to_plain_string_unresolved_uses_fallback_then_key() {
        let with_fallback = Component::translatable("k", Some("fallback".into()), vec![]);
        assert_eq!(with_fallback.to_plain_string(), "fallback");

        let bare = Component::translatable("k", None, vec![]);
        assert_eq!(bare.to_plain_string(), "k");
    }
}
