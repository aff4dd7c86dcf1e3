use concord_text::{Component, Content};

use crate::messages;
use crate::template;

/// Resolves every translation key in `component` on the server.
///
/// Keys from Concord's own message table use their English text. Any other
/// key uses the fallback it carries, or the key itself when there is none.
/// Styles and children are kept; arguments are resolved before they are
/// substituted.
pub fn eager_translate(component: Component) -> Component {
    let Component {
        content,
        style,
        siblings,
    } = component;
    let siblings = siblings.into_iter().map(eager_translate);

    match content {
        Content::Text(text) => {
            let mut node = Component::text(text).styled(style);
            node.siblings.extend(siblings);
            node
        }
        Content::Translatable {
            key,
            fallback,
            args,
        } => {
            let text = match messages::find(&key) {
                Some(translation) => translation.english_text(),
                None => fallback.as_deref().unwrap_or(&key),
            };
            let args: Vec<Component> = args.into_iter().map(eager_translate).collect();

            let mut node = Component::empty().styled(style);
            node.siblings = template::substitute(text, &args);
            node.siblings.extend(siblings);
            node
        }
    }
}
