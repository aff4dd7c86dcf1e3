//! The formatting pipeline for untrusted text.

use std::sync::LazyLock;

use regex::Regex;

use crate::component::Component;
use crate::directive::{CUSTOM_PREFIX, FormattingDirective, LEGACY_PREFIX, LegacyCode};
use crate::policy::{DirectiveMode, FormattingPolicy};
use crate::style::{ClickEvent, HoverEvent, Style};

/// Visible text of a veiled link.
pub const VEILED_LINK_LABEL: &str = "[link]";

/// `http://` or `https://` up to the next whitespace, minus trailing
/// punctuation and markdown emphasis. The scheme may be glued to whatever
/// precedes it.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://\S*[^\s.,;:!?'")\]}>_*~]"#).expect("URL pattern is valid")
});

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// An unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// The output of [`format`]: ordered segments, never empty text and never
/// two neighbours with the same style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    segments: Vec<Segment>,
}

impl StyledText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The text with all styling dropped.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Builds a component for delivery.
    ///
    /// A single segment becomes a single node; several become children of
    /// an empty unstyled parent.
    pub fn into_component(self) -> Component {
        let mut segments = self.segments;
        if segments.len() == 1 {
            let Segment { text, style } = segments.remove(0);
            return Component::text(text).styled(style);
        }
        segments
            .into_iter()
            .fold(Component::empty(), |parent, Segment { text, style }| {
                parent.append(Component::text(text).styled(style))
            })
    }

    /// Appends text, merging it into the last segment when the styles
    /// match. Empty text is dropped.
    fn push(&mut self, text: &str, style: &Style) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == *style => last.text.push_str(text),
            _ => self.segments.push(Segment::new(text, style.clone())),
        }
    }
}

impl IntoIterator for StyledText {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Formats untrusted text under `policy`.
///
/// Veiled links are found first, over the whole input. The text between
/// them is then scanned for the enabled directive syntax, with the running
/// style carried across each link. Unrecognised directives stay as
/// literal text.
pub fn format(text: &str, policy: &FormattingPolicy) -> StyledText {
    let mode = policy.directive_mode();
    let mut style = Style::default();
    let mut out = StyledText::default();

    let mut cursor = 0;
    if policy.veils_links() {
        for url in URL_PATTERN.find_iter(text) {
            scan(&text[cursor..url.start()], mode, &mut style, &mut out);
            let link = FormattingDirective::VeiledLink(url.as_str().to_owned());
            link.apply(&mut style);
            out.push(VEILED_LINK_LABEL, &veil_style(url.as_str()));
            cursor = url.end();
        }
    }
    scan(&text[cursor..], mode, &mut style, &mut out);

    tracing::trace!(segments = out.len(), ?mode, "formatted text");
    out
}

/// The placeholder style. It does not inherit the running style.
fn veil_style(url: &str) -> Style {
    Style::new()
        .underlined()
        .on_click(ClickEvent::OpenUrl(url.to_owned()))
        .on_hover(HoverEvent::ShowText(url.to_owned()))
}

fn scan(text: &str, mode: Option<DirectiveMode>, style: &mut Style, out: &mut StyledText) {
    match mode {
        Some(DirectiveMode::Custom) => scan_custom(text, style, out),
        Some(DirectiveMode::Legacy) => scan_legacy(text, style, out),
        None => out.push(text, style),
    }
}

/// `$name` / `$#RRGGBB`, plus one trailing whitespace character.
fn scan_custom(text: &str, style: &mut Style, out: &mut StyledText) {
    let mut pending = String::new();
    let mut rest = text;

    while let Some(at) = rest.find(CUSTOM_PREFIX) {
        pending.push_str(&rest[..at]);
        let after = &rest[at + CUSTOM_PREFIX.len_utf8()..];
        let token_len = custom_token_len(after);
        let token = &after[..token_len];

        match FormattingDirective::parse_custom(token) {
            Some(directive) => {
                out.push(&pending, style);
                pending.clear();
                directive.apply(style);

                let mut tail = &after[token_len..];
                if let Some(ws) = tail.chars().next().filter(|c| c.is_whitespace()) {
                    tail = &tail[ws.len_utf8()..];
                }
                rest = tail;
            }
            None => {
                pending.push(CUSTOM_PREFIX);
                pending.push_str(token);
                rest = &after[token_len..];
            }
        }
    }

    pending.push_str(rest);
    out.push(&pending, style);
}

/// Byte length of the candidate token: an optional `#` followed by word
/// characters.
fn custom_token_len(after: &str) -> usize {
    let start = if after.starts_with('#') { 1 } else { 0 };
    let body = &after[start..];
    start
        + body
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(body.len())
}

/// `&` followed by one code character.
fn scan_legacy(text: &str, style: &mut Style, out: &mut StyledText) {
    let mut pending = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != LEGACY_PREFIX {
            pending.push(c);
            continue;
        }
        match chars.next() {
            Some(code_char) => match LegacyCode::from_char(code_char) {
                Some(code) => {
                    out.push(&pending, style);
                    pending.clear();
                    FormattingDirective::LegacyCode(code).apply(style);
                }
                None => {
                    pending.push(c);
                    pending.push(code_char);
                }
            },
            None => pending.push(c),
        }
    }

    out.push(&pending, style);
}
