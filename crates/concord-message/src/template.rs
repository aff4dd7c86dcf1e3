//! Positional placeholders in English message text.
//!
//! `%s` takes the next argument, `%N$s` takes argument `N` (1-based) and
//! `%%` is a literal percent sign. Anything else after a `%`, and any
//! placeholder whose argument is missing, stays in the output as written.

use concord_text::Component;

#[derive(Debug, PartialEq, Eq)]
enum Piece<'a> {
    Text(String),
    Arg { index: usize, raw: &'a str },
}

enum Placeholder {
    Percent,
    Next,
    Index(usize),
}

/// Recognises a placeholder at the start of `tail`, which begins with `%`.
/// Returns it with its byte length.
fn placeholder(tail: &str) -> Option<(Placeholder, usize)> {
    let body = &tail[1..];
    if body.starts_with('%') {
        return Some((Placeholder::Percent, 2));
    }
    if body.starts_with('s') {
        return Some((Placeholder::Next, 2));
    }
    let digits = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    if digits == 0 || !body[digits..].starts_with("$s") {
        return None;
    }
    let position: usize = body[..digits].parse().ok()?;
    let index = position.checked_sub(1)?;
    Some((Placeholder::Index(index), 1 + digits + 2))
}

fn parse(template: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut next_implicit = 0;
    let mut rest = template;

    while let Some(at) = rest.find('%') {
        text.push_str(&rest[..at]);
        let tail = &rest[at..];
        let Some((kind, len)) = placeholder(tail) else {
            text.push('%');
            rest = &tail[1..];
            continue;
        };
        let index = match kind {
            Placeholder::Percent => {
                text.push('%');
                rest = &tail[len..];
                continue;
            }
            Placeholder::Next => {
                next_implicit += 1;
                next_implicit - 1
            }
            Placeholder::Index(index) => index,
        };
        if !text.is_empty() {
            pieces.push(Piece::Text(std::mem::take(&mut text)));
        }
        pieces.push(Piece::Arg {
            index,
            raw: &tail[..len],
        });
        rest = &tail[len..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    pieces
}

/// Substitutes `args` into `template`, returning the resulting pieces in
/// order. The template text itself is emitted literally.
pub(crate) fn substitute(template: &str, args: &[Component]) -> Vec<Component> {
    let mut out: Vec<Component> = Vec::new();
    for piece in parse(template) {
        let component = match piece {
            Piece::Text(text) => Component::text(text),
            Piece::Arg { index, raw } => match args.get(index) {
                Some(arg) => arg.clone(),
                None => Component::text(raw),
            },
        };
        out.push(component);
    }
    out
}

/// Like [`substitute`], collapsed into one component.
pub(crate) fn render(template: &str, args: &[Component]) -> Component {
    let mut pieces = substitute(template, args);
    if pieces.len() == 1 {
        return pieces.remove(0);
    }
    let mut parent = Component::empty();
    parent.siblings = pieces;
    parent
}
