//! Game events that are announced to the chat channel.

use serde::{Deserialize, Serialize};

use crate::messages;
use crate::translation::Translation;

/// The kinds of game notification Concord can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    ServerStart,
    ServerStop,
    BotStart,
    BotStop,
    PlayerJoin,
    PlayerLeave,
    PlayerDeath,
    AdvancementTask,
    AdvancementChallenge,
    AdvancementGoal,
    CommandSay,
    CommandEmote,
}

/// Which notifications are switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifySettings {
    pub server_start: bool,
    pub server_stop: bool,
    pub bot_start: bool,
    pub bot_stop: bool,
    pub player_join: bool,
    pub player_leave: bool,
    pub player_death: bool,
    pub advancement_task: bool,
    pub advancement_challenge: bool,
    pub advancement_goal: bool,
    pub command_say: bool,
    pub command_emote: bool,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            server_start: true,
            server_stop: true,
            bot_start: false,
            bot_stop: false,
            player_join: true,
            player_leave: true,
            player_death: true,
            advancement_task: true,
            advancement_challenge: true,
            advancement_goal: true,
            command_say: true,
            command_emote: true,
        }
    }
}

struct Entry {
    kind: Notification,
    enabled: fn(&NotifySettings) -> bool,
    translation: Translation,
}

const fn entry(
    kind: Notification,
    enabled: fn(&NotifySettings) -> bool,
    translation: Translation,
) -> Entry {
    Entry {
        kind,
        enabled,
        translation,
    }
}

static TABLE: [Entry; 12] = [
    entry(Notification::ServerStart, |s| s.server_start, messages::SERVER_START),
    entry(Notification::ServerStop, |s| s.server_stop, messages::SERVER_STOP),
    entry(Notification::BotStart, |s| s.bot_start, messages::BOT_START),
    entry(Notification::BotStop, |s| s.bot_stop, messages::BOT_STOP),
    entry(Notification::PlayerJoin, |s| s.player_join, messages::PLAYER_JOIN),
    entry(Notification::PlayerLeave, |s| s.player_leave, messages::PLAYER_LEAVE),
    entry(Notification::PlayerDeath, |s| s.player_death, messages::PLAYER_DEATH),
    entry(Notification::AdvancementTask, |s| s.advancement_task, messages::ADVANCEMENT_TASK),
    entry(
        Notification::AdvancementChallenge,
        |s| s.advancement_challenge,
        messages::ADVANCEMENT_CHALLENGE,
    ),
    entry(Notification::AdvancementGoal, |s| s.advancement_goal, messages::ADVANCEMENT_GOAL),
    entry(Notification::CommandSay, |s| s.command_say, messages::SAY_COMMAND),
    entry(Notification::CommandEmote, |s| s.command_emote, messages::EMOTE_COMMAND),
];

impl Notification {
    pub const ALL: [Notification; 12] = [
        Notification::ServerStart,
        Notification::ServerStop,
        Notification::BotStart,
        Notification::BotStop,
        Notification::PlayerJoin,
        Notification::PlayerLeave,
        Notification::PlayerDeath,
        Notification::AdvancementTask,
        Notification::AdvancementChallenge,
        Notification::AdvancementGoal,
        Notification::CommandSay,
        Notification::CommandEmote,
    ];

    fn entry(self) -> &'static Entry {
        let entry = &TABLE[self as usize];
        debug_assert_eq!(entry.kind, self, "notification table out of order");
        entry
    }

    /// The message sent for this notification.
    pub fn translation(self) -> &'static Translation {
        &self.entry().translation
    }

    /// Whether `settings` switch this notification on.
    pub fn is_enabled(self, settings: &NotifySettings) -> bool {
        (self.entry().enabled)(settings)
    }

    /// The message to send, or `None` if the notification is switched off.
    pub fn message(self, settings: &NotifySettings) -> Option<&'static Translation> {
        self.is_enabled(settings).then(|| self.translation())
    }
}

#[cfg(test)]
mod tests {
    use concord_text::{Component, FormattingPolicy};

    use super::*;
    use crate::argument::Argument;

    #[test]
    fn test_table_rows_match_variants() {
        for (index, kind) in Notification::ALL.into_iter().enumerate() {
            assert_eq!(TABLE[index].kind, kind);
        }
    }

    #[test]
    fn test_server_start_and_stop_are_not_swapped() {
        assert_eq!(Notification::ServerStart.translation(), &messages::SERVER_START);
        assert_eq!(Notification::ServerStop.translation(), &messages::SERVER_STOP);
    }

    #[test]
    fn test_default_settings() {
        let settings = NotifySettings::default();
        assert!(!Notification::BotStart.is_enabled(&settings));
        assert!(!Notification::BotStop.is_enabled(&settings));
        assert!(Notification::PlayerJoin.is_enabled(&settings));
        assert!(Notification::PlayerDeath.is_enabled(&settings));
        assert!(Notification::CommandEmote.is_enabled(&settings));
    }

    #[test]
    fn test_each_flag_controls_only_its_kind() {
        for kind in Notification::ALL {
            let mut settings = NotifySettings {
                server_start: false,
                server_stop: false,
                bot_start: false,
                bot_stop: false,
                player_join: false,
                player_leave: false,
                player_death: false,
                advancement_task: false,
                advancement_challenge: false,
                advancement_goal: false,
                command_say: false,
                command_emote: false,
            };
            assert!(kind.message(&settings).is_none(), "{kind:?}");

            let flag = match kind {
                Notification::ServerStart => &mut settings.server_start,
                Notification::ServerStop => &mut settings.server_stop,
                Notification::BotStart => &mut settings.bot_start,
                Notification::BotStop => &mut settings.bot_stop,
                Notification::PlayerJoin => &mut settings.player_join,
                Notification::PlayerLeave => &mut settings.player_leave,
                Notification::PlayerDeath => &mut settings.player_death,
                Notification::AdvancementTask => &mut settings.advancement_task,
                Notification::AdvancementChallenge => &mut settings.advancement_challenge,
                Notification::AdvancementGoal => &mut settings.advancement_goal,
                Notification::CommandSay => &mut settings.command_say,
                Notification::CommandEmote => &mut settings.command_emote,
            };
            *flag = true;

            for other in Notification::ALL {
                assert_eq!(other.is_enabled(&settings), other == kind, "{kind:?} / {other:?}");
            }
        }
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: NotifySettings =
            serde_json::from_str(r#"{ "bot_start": true, "player_join": false }"#).unwrap();
        assert!(settings.bot_start);
        assert!(!settings.player_join);
        assert!(settings.server_start);
    }

    #[test]
    fn test_settings_reject_unknown_fields() {
        let err = serde_json::from_str::<NotifySettings>(r#"{ "player_sneeze": true }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_player_death_wraps_game_death_message() {
        let death = Component::translatable(
            "death.attack.fall",
            Some("%s hit the ground too hard".into()),
            vec![Component::text("Alex")],
        );
        let translation = Notification::PlayerDeath
            .message(&NotifySettings::default())
            .expect("enabled by default");

        let lazy = translation.component(vec![Argument::Component(death.clone())]);
        assert!(!lazy.is_resolved());

        let eager =
            translation.eager_component(vec![death.into()], &FormattingPolicy::plain());
        assert!(eager.is_resolved());
        assert_eq!(eager.to_plain_string(), "Alex hit the ground too hard");
    }
}
