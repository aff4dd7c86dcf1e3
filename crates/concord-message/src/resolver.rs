//! Choosing between eager and lazy resolution per recipient.

use std::fmt;
use std::sync::Arc;

use concord_features::{FeatureRegistry, FeatureVersion};
use concord_text::{Component, FormattingPolicy, FormattingSettings};
use concord_transport::ConnectionId;
use serde::{Deserialize, Serialize};

use crate::argument::Argument;
use crate::translation::Translation;

/// Something in the game world that can receive a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A player, reachable through their connection.
    Player(ConnectionId),
    /// Any other entity. It has no connection of its own.
    Other,
}

impl Entity {
    pub fn connection(&self) -> Option<ConnectionId> {
        match self {
            Entity::Player(conn_id) => Some(*conn_id),
            Entity::Other => None,
        }
    }
}

/// Whoever ran a command. The console has no entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CommandSource {
    pub entity: Option<Entity>,
}

impl CommandSource {
    pub fn console() -> Self {
        Self { entity: None }
    }

    pub fn entity(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
        }
    }
}

/// Who a message is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderContext {
    NoRecipient,
    Entity(Entity),
    CommandSource(CommandSource),
}

impl RenderContext {
    /// Shorthand for a player recipient.
    pub fn player(conn_id: ConnectionId) -> Self {
        RenderContext::Entity(Entity::Player(conn_id))
    }

    /// The connection behind this context, if it has one.
    pub fn connection(&self) -> Option<ConnectionId> {
        match self {
            RenderContext::NoRecipient => None,
            RenderContext::Entity(entity) => entity.connection(),
            RenderContext::CommandSource(source) => source.entity.and_then(|e| e.connection()),
        }
    }
}

/// How a message was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eagerness {
    /// Resolved on the server.
    Eager,
    /// Left for the client to translate.
    Lazy,
}

impl fmt::Display for Eagerness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eagerness::Eager => f.write_str("eager"),
            Eagerness::Lazy => f.write_str("lazy"),
        }
    }
}

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
    pub eagerness: Eagerness,
    pub component: Component,
}

impl ResolvedMessage {
    pub fn is_eager(&self) -> bool {
        self.eagerness == Eagerness::Eager
    }
}

/// Resource location of the icon font clients with Concord installed ship.
pub const ICONS_FONT: &str = "concord:icons";

/// Message settings as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    /// Resolve every message on the server, whoever receives it.
    pub force_eager: bool,
    /// Use [`ICONS_FONT`] for recipients that announced the `icons`
    /// feature.
    pub use_custom_font: bool,
    #[serde(flatten)]
    pub formatting: FormattingSettings,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            force_eager: false,
            use_custom_font: true,
            formatting: FormattingSettings::default(),
        }
    }
}

/// Resolves translations for recipients.
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Translator {
    registry: Arc<FeatureRegistry>,
    force_eager: bool,
    use_custom_font: bool,
    policy: FormattingPolicy,
}

impl Translator {
    pub fn new(registry: Arc<FeatureRegistry>, settings: &MessageSettings) -> Self {
        Self {
            registry,
            force_eager: settings.force_eager,
            use_custom_font: settings.use_custom_font,
            policy: FormattingPolicy::new(&settings.formatting),
        }
    }

    /// The formatting policy applied to user-authored text on the eager
    /// path.
    pub fn policy(&self) -> &FormattingPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &Arc<FeatureRegistry> {
        &self.registry
    }

    /// Eager when forced by configuration. Otherwise eager only when the
    /// context leads to a connection whose announced capabilities are
    /// compatible with the translation; every other context is lazy.
    pub fn decide_eagerness(&self, translation: &Translation, context: &RenderContext) -> Eagerness {
        if self.force_eager {
            return Eagerness::Eager;
        }
        let Some(conn_id) = context.connection() else {
            return Eagerness::Lazy;
        };
        let features = self.registry.get(conn_id);
        if translation.last_modified().is_satisfied_by(&features) {
            Eagerness::Eager
        } else {
            Eagerness::Lazy
        }
    }

    /// The icon font to use for `context`, if its connection can render it.
    ///
    /// Unlike translations the font is never forced: a client without it
    /// would show missing glyphs.
    pub fn icons_font(&self, context: &RenderContext) -> Option<&'static str> {
        if !self.use_custom_font {
            return None;
        }
        let conn_id = context.connection()?;
        FeatureVersion::ICONS
            .is_satisfied_by(&self.registry.get(conn_id))
            .then_some(ICONS_FONT)
    }

    /// Resolves `translation` for `context`.
    pub fn resolve(
        &self,
        translation: &Translation,
        args: Vec<Argument>,
        context: &RenderContext,
    ) -> ResolvedMessage {
        let eagerness = self.decide_eagerness(translation, context);
        tracing::debug!(key = translation.key(), %eagerness, ?context, "resolving message");
        self.render(translation, args, eagerness)
    }

    /// Builds the component for an already-chosen eagerness.
    pub fn render(
        &self,
        translation: &Translation,
        args: Vec<Argument>,
        eagerness: Eagerness,
    ) -> ResolvedMessage {
        let component = match eagerness {
            Eagerness::Eager => translation.eager_component(args, &self.policy),
            Eagerness::Lazy => translation.component(args),
        };
        ResolvedMessage {
            eagerness,
            component,
        }
    }
}

#[cfg(test)]
mod tests {
    use concord_protocol::{CapabilitySet, Version};

    use super::*;
    use crate::messages::PLAYER_JOIN;

    fn translator(force_eager: bool) -> Translator {
        let settings = MessageSettings {
            force_eager,
            ..MessageSettings::default()
        };
        Translator::new(Arc::new(FeatureRegistry::new()), &settings)
    }

    fn announce(translator: &Translator, conn_id: ConnectionId, version: Version) {
        let set: CapabilitySet = [(FeatureVersion::TRANSLATIONS.name(), version)]
            .into_iter()
            .collect();
        translator.registry().attach(conn_id, set);
    }

    #[test]
    fn test_context_connection() {
        let conn = ConnectionId::new(3);
        assert_eq!(RenderContext::player(conn).connection(), Some(conn));
        assert_eq!(RenderContext::NoRecipient.connection(), None);
        assert_eq!(RenderContext::Entity(Entity::Other).connection(), None);
        assert_eq!(
            RenderContext::CommandSource(CommandSource::console()).connection(),
            None
        );
        assert_eq!(
            RenderContext::CommandSource(CommandSource::entity(Entity::Player(conn))).connection(),
            Some(conn)
        );
    }

    #[test]
    fn test_decide_eagerness_forced_is_always_eager() {
        let translator = translator(true);
        for context in [
            RenderContext::NoRecipient,
            RenderContext::Entity(Entity::Other),
            RenderContext::player(ConnectionId::new(1)),
            RenderContext::CommandSource(CommandSource::console()),
        ] {
            assert_eq!(
                translator.decide_eagerness(&PLAYER_JOIN, &context),
                Eagerness::Eager,
                "{context:?}"
            );
        }
    }

    #[test]
    fn test_decide_eagerness_no_connection_is_lazy() {
        let translator = translator(false);
        for context in [
            RenderContext::NoRecipient,
            RenderContext::Entity(Entity::Other),
            RenderContext::CommandSource(CommandSource::console()),
            RenderContext::CommandSource(CommandSource::entity(Entity::Other)),
        ] {
            assert_eq!(
                translator.decide_eagerness(&PLAYER_JOIN, &context),
                Eagerness::Lazy,
                "{context:?}"
            );
        }
    }

    #[test]
    fn test_decide_eagerness_unannounced_player_is_lazy() {
        let translator = translator(false);
        let context = RenderContext::player(ConnectionId::new(9));
        assert_eq!(translator.decide_eagerness(&PLAYER_JOIN, &context), Eagerness::Lazy);
    }

    #[test]
    fn test_decide_eagerness_follows_compatibility() {
        let translator = translator(false);
        let matching = ConnectionId::new(1);
        let newer = ConnectionId::new(2);
        announce(&translator, matching, Version::new(1, 0, 4));
        announce(&translator, newer, Version::new(1, 1, 0));

        assert_eq!(
            translator.decide_eagerness(&PLAYER_JOIN, &RenderContext::player(matching)),
            Eagerness::Eager
        );
        assert_eq!(
            translator.decide_eagerness(&PLAYER_JOIN, &RenderContext::player(newer)),
            Eagerness::Lazy
        );
    }

    #[test]
    fn test_render_shapes() {
        let translator = translator(false);

        let eager = translator.render(&PLAYER_JOIN, vec!["Alex".into()], Eagerness::Eager);
        assert!(eager.is_eager());
        assert!(eager.component.is_resolved());

        let lazy = translator.render(&PLAYER_JOIN, vec!["Alex".into()], Eagerness::Lazy);
        assert!(!lazy.is_eager());
        assert!(!lazy.component.is_resolved());
    }

    #[test]
    fn test_message_settings_flatten_formatting() {
        let settings: MessageSettings = serde_json::from_str(
            r#"{ "force_eager": true, "use_custom_formatting": true }"#,
        )
        .unwrap();
        assert!(settings.force_eager);
        assert!(settings.use_custom_font);
        assert!(settings.formatting.use_custom_formatting);
        assert!(settings.formatting.veiled_links);
    }

    #[test]
    fn test_icons_font_needs_icons_feature() {
        let translator = translator(true);
        let icons = ConnectionId::new(1);
        let translations_only = ConnectionId::new(2);
        translator.registry().attach(
            icons,
            [(FeatureVersion::ICONS.name(), Version::new(1, 0, 0))].into_iter().collect(),
        );
        announce(&translator, translations_only, Version::new(1, 0, 0));

        assert_eq!(
            translator.icons_font(&RenderContext::player(icons)),
            Some(ICONS_FONT)
        );
        assert_eq!(translator.icons_font(&RenderContext::player(translations_only)), None);
        assert_eq!(translator.icons_font(&RenderContext::NoRecipient), None);
    }

    #[test]
    fn test_icons_font_off_in_settings() {
        let settings = MessageSettings {
            use_custom_font: false,
            ..MessageSettings::default()
        };
        let translator = Translator::new(Arc::new(FeatureRegistry::new()), &settings);
        let conn = ConnectionId::new(1);
        translator.registry().attach(
            conn,
            [(FeatureVersion::ICONS.name(), Version::new(1, 0, 0))].into_iter().collect(),
        );

        assert_eq!(translator.icons_font(&RenderContext::player(conn)), None);
    }
}
