//! Resolving messages against a live registry.

use std::sync::Arc;

use concord_features::{FeatureRegistry, FeatureVersion};
use concord_message::{
    Argument, CommandSource, Eagerness, MessageSettings, Notification, NotifySettings,
    RenderContext, Translator, messages,
};
use concord_protocol::{CapabilitySet, Version};
use concord_text::{Component, Content, FormattingSettings, NamedColor, Style};
use concord_transport::ConnectionId;

fn settings(force_eager: bool) -> MessageSettings {
    MessageSettings {
        force_eager,
        use_custom_font: true,
        formatting: FormattingSettings {
            use_custom_formatting: true,
            use_legacy_formatting: false,
            veiled_links: true,
        },
    }
}

fn with_translations(version: Version) -> CapabilitySet {
    [(FeatureVersion::TRANSLATIONS.name(), version)]
        .into_iter()
        .collect()
}

fn contains_translatable(component: &Component) -> bool {
    let own = match &component.content {
        Content::Text(_) => false,
        Content::Translatable { .. } => true,
    };
    own || component.siblings.iter().any(contains_translatable)
}

#[test]
fn test_compatible_player_gets_eager_discord_relay_with_formatting() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(1);
    registry.attach(conn, with_translations(Version::new(1, 0, 2)));
    let translator = Translator::new(registry, &settings(false));

    let resolved = translator.resolve(
        &messages::DISCORD_MESSAGE,
        vec![
            Argument::literal("sam"),
            Argument::user_text("$red hello https://example.com"),
        ],
        &RenderContext::player(conn),
    );

    assert_eq!(resolved.eagerness, Eagerness::Eager);
    assert!(!contains_translatable(&resolved.component));
    assert_eq!(
        resolved.component.to_plain_string(),
        "[Discord] <sam> hello [link]"
    );

    let json = serde_json::to_value(&resolved.component).unwrap();
    let text = json.to_string();
    assert!(text.contains(r#""color":"red""#), "{text}");
    assert!(text.contains("open_url"), "{text}");
}

#[test]
fn test_incompatible_player_gets_lazy_reference() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(1);
    registry.attach(conn, with_translations(Version::new(2, 0, 0)));
    let translator = Translator::new(registry, &settings(false));

    let resolved = translator.resolve(
        &messages::DISCORD_MESSAGE,
        vec![Argument::literal("sam"), Argument::user_text("$red hello")],
        &RenderContext::player(conn),
    );

    assert_eq!(resolved.eagerness, Eagerness::Lazy);
    let Content::Translatable {
        key,
        fallback,
        args,
    } = &resolved.component.content
    else {
        panic!("expected a lazy reference");
    };
    assert_eq!(key, messages::DISCORD_MESSAGE.key());
    assert_eq!(fallback.as_deref(), Some(messages::DISCORD_MESSAGE.english_text()));
    assert_eq!(args[1], Component::text("$red hello"));
}

#[test]
fn test_no_recipient_is_lazy_unless_forced() {
    let registry = Arc::new(FeatureRegistry::new());

    let lazy = Translator::new(Arc::clone(&registry), &settings(false));
    let resolved = lazy.resolve(&messages::SERVER_START, vec![], &RenderContext::NoRecipient);
    assert_eq!(resolved.eagerness, Eagerness::Lazy);

    let forced = Translator::new(registry, &settings(true));
    let resolved = forced.resolve(&messages::SERVER_START, vec![], &RenderContext::NoRecipient);
    assert_eq!(resolved.eagerness, Eagerness::Eager);
    assert_eq!(resolved.component, Component::text("The server has started."));
}

#[test]
fn test_player_command_source_uses_its_connection() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(4);
    registry.attach(conn, with_translations(Version::new(1, 0, 0)));
    let translator = Translator::new(registry, &settings(false));

    let context =
        RenderContext::CommandSource(CommandSource::entity(concord_message::Entity::Player(conn)));
    let console = RenderContext::CommandSource(CommandSource::console());

    assert_eq!(
        translator.decide_eagerness(&messages::SAY_COMMAND, &context),
        Eagerness::Eager
    );
    assert_eq!(
        translator.decide_eagerness(&messages::SAY_COMMAND, &console),
        Eagerness::Lazy
    );
}

#[test]
fn test_detached_connection_falls_back_to_lazy() {
    let registry = Arc::new(FeatureRegistry::new());
    let conn = ConnectionId::new(5);
    registry.attach(conn, with_translations(Version::new(1, 0, 0)));
    let translator = Translator::new(Arc::clone(&registry), &settings(false));
    let context = RenderContext::player(conn);

    assert_eq!(
        translator.decide_eagerness(&messages::PLAYER_JOIN, &context),
        Eagerness::Eager
    );
    registry.detach(conn);
    assert_eq!(
        translator.decide_eagerness(&messages::PLAYER_JOIN, &context),
        Eagerness::Lazy
    );
}

#[test]
fn test_eager_advancement_with_nested_lazy_argument() {
    let registry = Arc::new(FeatureRegistry::new());
    let translator = Translator::new(registry, &settings(true));

    let title = messages::PLAYER_JOIN.component(vec!["Inner".into()]);
    let resolved = translator.resolve(
        &messages::ADVANCEMENT_GOAL,
        vec!["Alex".into(), title.into(), Argument::literal("Reach it")],
        &RenderContext::NoRecipient,
    );

    assert!(!contains_translatable(&resolved.component));
    assert_eq!(
        resolved.component.to_plain_string(),
        "Alex has reached the goal **Inner joined the game**\n_Reach it_"
    );
}

#[test]
fn test_enabled_notification_renders_for_chat_channel() {
    let translator = Translator::new(Arc::new(FeatureRegistry::new()), &settings(false));
    let notify = NotifySettings::default();

    let translation = Notification::PlayerJoin
        .message(&notify)
        .expect("player join is on by default");
    let text = translation
        .eager_component(vec!["Alex".into()], translator.policy())
        .to_plain_string();
    assert_eq!(text, "Alex joined the game");

    assert!(Notification::BotStart.message(&notify).is_none());
}

#[test]
fn test_user_text_styles_survive_eager_path() {
    let translator = Translator::new(Arc::new(FeatureRegistry::new()), &settings(true));
    let resolved = translator.resolve(
        &messages::SAY_COMMAND,
        vec!["Server".into(), Argument::user_text("$gold shiny")],
        &RenderContext::NoRecipient,
    );
    let gold = Component::text("shiny").styled(Style::new().with_color(NamedColor::Gold));
    assert!(resolved.component.siblings.contains(&gold));
}
