//! # Admin Commands
//!
//! `/oredrops <reload | debug [on|off] | info | help>`
//!
//! Parsing, permission checks and execution produce a structured
//! [`CommandOutcome`]; turning it into chat text is up to the host.

use std::fmt;

use oredrops_loot::{ItemCatalog, MaterialCatalog, ReloadSummary};

use crate::plugin::{OreDrops, PluginInfo};

/// Permission for `reload`.
pub const PERMISSION_RELOAD: &str = "oredrops.reload";
/// Permission for `debug`.
pub const PERMISSION_DEBUG: &str = "oredrops.debug";
/// Permission for `info`.
pub const PERMISSION_INFO: &str = "oredrops.info";

/// Usage lines shown by `help`.
pub const HELP: [(&str, &str); 3] = [
    ("/oredrops reload", "reload the configuration"),
    ("/oredrops debug <on|off>", "toggle debug mode"),
    ("/oredrops info", "show plugin information"),
];

/// Whoever issued the command.
pub trait CommandSender {
    /// Whether the sender holds `permission`.
    fn has_permission(&self, permission: &str) -> bool;
}

/// A parsed subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Re-read the configuration.
    Reload,
    /// Show (`None`) or set the debug flag.
    Debug(Option<bool>),
    /// Show plugin information.
    Info,
    /// Show usage. Also what no arguments mean.
    Help,
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parses command arguments (without the command name). Case-insensitive.
    #[must_use]
    pub fn parse(args: &[&str]) -> Self {
        let Some(sub) = args.first() else {
            return Self::Help;
        };
        match sub.to_ascii_lowercase().as_str() {
            "reload" => Self::Reload,
            "debug" => Self::Debug(args.get(1).map(|value| parse_switch(value))),
            "info" => Self::Info,
            "help" => Self::Help,
            _ => Self::Unknown((*sub).to_owned()),
        }
    }

    /// Permission the sender needs, if any.
    #[must_use]
    pub const fn permission(&self) -> Option<&'static str> {
        match self {
            Self::Reload => Some(PERMISSION_RELOAD),
            Self::Debug(_) => Some(PERMISSION_DEBUG),
            Self::Info => Some(PERMISSION_INFO),
            Self::Help | Self::Unknown(_) => None,
        }
    }
}

/// Only `on` and `true` switch on; everything else switches off.
fn parse_switch(value: &str) -> bool {
    value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("true")
}

/// What a command did.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// Usage lines.
    Help(&'static [(&'static str, &'static str)]),
    /// Reload succeeded.
    Reloaded(ReloadSummary),
    /// Reload failed; the previous tables are still active.
    ReloadFailed(String),
    /// Current debug flag.
    DebugStatus(bool),
    /// Debug flag after setting it.
    DebugChanged(bool),
    /// Plugin information.
    Info(PluginInfo),
    /// The sender lacks `permission`.
    PermissionDenied {
        /// The missing permission.
        permission: &'static str,
    },
    /// Not a known subcommand.
    UnknownCommand(String),
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help(lines) => {
                writeln!(f, "=== OreDrops commands ===")?;
                for (usage, what) in *lines {
                    writeln!(f, "{usage} - {what}")?;
                }
                Ok(())
            }
            Self::Reloaded(summary) => write!(f, "reloaded: {summary}"),
            Self::ReloadFailed(reason) => write!(f, "reload failed: {reason}"),
            Self::DebugStatus(on) => write!(f, "debug mode: {on} (use /oredrops debug <on|off>)"),
            Self::DebugChanged(on) => write!(f, "debug mode {}", if *on { "enabled" } else { "disabled" }),
            Self::Info(info) => write!(
                f,
                "OreDrops {} | method: {} | debug: {} | tables v{} ({} block types) | custom enchants: {}",
                info.version,
                info.method,
                info.debug,
                info.registry_version,
                info.materials,
                if info.custom_enchants { "active" } else { "inactive" }
            ),
            Self::PermissionDenied { permission } => write!(f, "missing permission {permission}"),
            Self::UnknownCommand(name) => write!(f, "unknown command '{name}', see /oredrops help"),
        }
    }
}

impl<C: ItemCatalog, A, M: MaterialCatalog> OreDrops<C, A, M> {
    /// Parses and runs a command for `sender`.
    pub fn dispatch(&self, sender: &dyn CommandSender, args: &[&str]) -> CommandOutcome {
        self.execute(sender, &Command::parse(args))
    }

    /// Runs `command` for `sender`.
    pub fn execute(&self, sender: &dyn CommandSender, command: &Command) -> CommandOutcome {
        if let Some(permission) = command.permission() {
            if !sender.has_permission(permission) {
                return CommandOutcome::PermissionDenied { permission };
            }
        }
        match command {
            Command::Reload => match self.reload() {
                Ok(summary) => CommandOutcome::Reloaded(summary),
                Err(error) => CommandOutcome::ReloadFailed(error.to_string()),
            },
            Command::Debug(None) => CommandOutcome::DebugStatus(self.debug_enabled()),
            Command::Debug(Some(enabled)) => {
                self.set_debug(*enabled);
                CommandOutcome::DebugChanged(*enabled)
            }
            Command::Info => CommandOutcome::Info(self.info()),
            Command::Help => CommandOutcome::Help(&HELP),
            Command::Unknown(name) => CommandOutcome::UnknownCommand(name.clone()),
        }
    }
}

/// Tab completions for `args`, filtered by what `sender` may run.
#[must_use]
pub fn complete(args: &[&str], sender: &dyn CommandSender) -> Vec<&'static str> {
    match args {
        [_] => [
            ("reload", Some(PERMISSION_RELOAD)),
            ("debug", Some(PERMISSION_DEBUG)),
            ("info", Some(PERMISSION_INFO)),
            ("help", None),
        ]
        .into_iter()
        .filter(|(_, permission)| permission.map_or(true, |p| sender.has_permission(p)))
        .map(|(name, _)| name)
        .collect(),
        [sub, _] if sub.eq_ignore_ascii_case("debug") => vec!["on", "off"],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchant::testing::MapApi;
    use oredrops_core::DropMethod;
    use oredrops_loot::{KnownItems, StaticSource};

    struct Sender(&'static [&'static str]);

    impl CommandSender for Sender {
        fn has_permission(&self, permission: &str) -> bool {
            self.0.iter().any(|held| *held == permission)
        }
    }

    const ADMIN: Sender = Sender(&[PERMISSION_RELOAD, PERMISSION_DEBUG, PERMISSION_INFO]);
    const NOBODY: Sender = Sender(&[]);

    fn plugin() -> OreDrops<KnownItems, MapApi> {
        OreDrops::enable(
            KnownItems::new(["ruby"]),
            None,
            StaticSource::new(
                "[drop-mechanics]\nmethod = \"diminishing\"\n\
                 [block-drops.stone.ruby]\noraxen-item = \"ruby\"\nchance = 5\n",
            ),
        )
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse(&[]), Command::Help);
        assert_eq!(Command::parse(&["RELOAD"]), Command::Reload);
        assert_eq!(Command::parse(&["debug"]), Command::Debug(None));
        assert_eq!(Command::parse(&["debug", "On"]), Command::Debug(Some(true)));
        assert_eq!(Command::parse(&["debug", "true"]), Command::Debug(Some(true)));
        assert_eq!(Command::parse(&["debug", "off"]), Command::Debug(Some(false)));
        assert_eq!(Command::parse(&["debug", "maybe"]), Command::Debug(Some(false)));
        assert_eq!(Command::parse(&["Info", "extra"]), Command::Info);
        assert_eq!(Command::parse(&["dance"]), Command::Unknown("dance".to_owned()));
    }

    #[test]
    fn test_permissions() {
        let plugin = plugin();
        for args in [&["reload"][..], &["debug", "on"][..], &["info"][..]] {
            assert!(matches!(
                plugin.dispatch(&NOBODY, args),
                CommandOutcome::PermissionDenied { .. }
            ));
        }
        assert_eq!(plugin.dispatch(&NOBODY, &["help"]), CommandOutcome::Help(&HELP));
        assert!(!plugin.debug_enabled());
    }

    #[test]
    fn test_debug_toggle() {
        let plugin = plugin();
        assert_eq!(plugin.dispatch(&ADMIN, &["debug"]), CommandOutcome::DebugStatus(false));
        assert_eq!(plugin.dispatch(&ADMIN, &["debug", "on"]), CommandOutcome::DebugChanged(true));
        assert!(plugin.debug_enabled());
        assert_eq!(plugin.dispatch(&ADMIN, &["debug"]), CommandOutcome::DebugStatus(true));
    }

    #[test]
    fn test_reload_and_info() {
        let plugin = plugin();
        match plugin.dispatch(&ADMIN, &["reload"]) {
            CommandOutcome::Reloaded(summary) => {
                assert_eq!(summary.version, 2);
                assert_eq!(summary.settings.method, DropMethod::Diminishing);
                assert_eq!(summary.entries, 1);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        match plugin.dispatch(&ADMIN, &["info"]) {
            CommandOutcome::Info(info) => {
                assert_eq!(info.registry_version, 2);
                assert!(!info.custom_enchants);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command() {
        let outcome = plugin().dispatch(&ADMIN, &["explode"]);
        assert_eq!(outcome.to_string(), "unknown command 'explode', see /oredrops help");
    }

    #[test]
    fn test_completion() {
        assert_eq!(complete(&[""], &ADMIN), vec!["reload", "debug", "info", "help"]);
        assert_eq!(complete(&["re"], &NOBODY), vec!["help"]);
        assert_eq!(complete(&["DEBUG", ""], &NOBODY), vec!["on", "off"]);
        assert!(complete(&["info", ""], &ADMIN).is_empty());
    }
}
