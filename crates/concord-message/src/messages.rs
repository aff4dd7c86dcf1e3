//! Concord's user-facing messages.
//!
//! Every entry is gated on the `translations` feature. When a message's
//! arguments change incompatibly, bump its `last_modified` with
//! [`FeatureVersion::at`] and the feature's version together.
//!
//! Lazy messages only render properly on clients whose resources hold the
//! same keys, so the `en_us` language file is generated from this table
//! with [`english_language_json`].

use std::collections::BTreeMap;

use concord_features::FeatureVersion;

use crate::translation::Translation;

const fn message(key: &'static str, english: &'static str) -> Translation {
    Translation::new(key, english, FeatureVersion::TRANSLATIONS)
}

pub const SERVER_START: Translation =
    message("concord.message.server.start", "The server has started.");
pub const SERVER_STOP: Translation =
    message("concord.message.server.stop", "The server is stopping.");

pub const BOT_START: Translation = message(
    "concord.message.bot.start",
    "The Discord integration is now active!",
);
pub const BOT_STOP: Translation = message(
    "concord.message.bot.stop",
    "The Discord integration is being disabled!",
);

/// Arguments: player name.
pub const PLAYER_JOIN: Translation =
    message("concord.message.player.join", "%s joined the game");
/// Arguments: player name.
pub const PLAYER_LEAVE: Translation =
    message("concord.message.player.leave", "%s left the game");

/// Arguments: the game's death message, as a nested component so it can
/// stay translatable on the lazy path.
pub const PLAYER_DEATH: Translation = message("concord.message.player.death", "%s");

/// Arguments: player name, advancement title, advancement description.
pub const ADVANCEMENT_TASK: Translation = message(
    "concord.message.advancement.task",
    "%s has made the advancement **%s**\n_%s_",
);
/// Arguments: player name, advancement title, advancement description.
pub const ADVANCEMENT_CHALLENGE: Translation = message(
    "concord.message.advancement.challenge",
    "%s has completed the challenge **%s**\n_%s_",
);
/// Arguments: player name, advancement title, advancement description.
pub const ADVANCEMENT_GOAL: Translation = message(
    "concord.message.advancement.goal",
    "%s has reached the goal **%s**\n_%s_",
);

/// Arguments: sender name, message.
pub const SAY_COMMAND: Translation = message("concord.message.command.say", "[%s] %s");
/// Arguments: sender name, action.
pub const EMOTE_COMMAND: Translation = message("concord.message.command.emote", "* %s %s");

/// A Discord message relayed into game chat. Arguments: author name,
/// message content.
pub const DISCORD_MESSAGE: Translation =
    message("concord.message.discord", "[Discord] <%s> %s");

static ALL: [Translation; 13] = [
    SERVER_START,
    SERVER_STOP,
    BOT_START,
    BOT_STOP,
    PLAYER_JOIN,
    PLAYER_LEAVE,
    PLAYER_DEATH,
    ADVANCEMENT_TASK,
    ADVANCEMENT_CHALLENGE,
    ADVANCEMENT_GOAL,
    SAY_COMMAND,
    EMOTE_COMMAND,
    DISCORD_MESSAGE,
];

/// Every message, in declaration order.
pub fn all() -> &'static [Translation] {
    &ALL
}

/// Looks a message up by key.
pub fn find(key: &str) -> Option<&'static Translation> {
    ALL.iter().find(|translation| translation.key() == key)
}

/// Every key mapped to its English text, in key order.
pub fn english_language() -> BTreeMap<&'static str, &'static str> {
    ALL.iter()
        .map(|translation| (translation.key(), translation.english_text()))
        .collect()
}

/// [`english_language`] as the JSON of an `en_us.json` language file.
///
/// # Errors
///
/// Returns the serializer's error, which a string map never produces in
/// practice.
pub fn english_language_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&english_language())
}
