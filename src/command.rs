//! The command-specification collaborator: validates the command part of
//! `system(...)` expressions.
//!
//! The assignment parser hands over a `varcmd: <command>` descriptor and
//! only asks for accept/reject; all deeper command-syntax rules live
//! here. Executing the command is someone else's job entirely.

use crate::config::Config;

/// Parser for `varcmd: <command>` descriptors.
pub trait CommandSpecParser: Send + Sync {
    /// Whether `descriptor` (a `title: command` line) names a runnable
    /// command.
    fn accepts(&self, descriptor: &str) -> bool;
}

/// Config-driven [`CommandSpecParser`]: descriptor well-formedness plus
/// allow/deny lists keyed by the command's program word.
pub struct CommandRegistry {
    allow: Vec<String>,
    deny: Vec<String>,
}

impl CommandRegistry {
    /// Build the registry from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            allow: config.commands.allow.clone(),
            deny: config.commands.deny.clone(),
        }
    }

    /// First word of the command line (POSIX word splitting via shlex),
    /// reduced to its basename: `/usr/local/bin/rename` → `rename`.
    fn program_word(command: &str) -> Option<String> {
        let words = shlex::split(command)?;
        let word = words.first()?;
        match word.rsplit_once('/') {
            Some((_, name)) if !name.is_empty() => Some(name.to_string()),
            _ => Some(word.clone()),
        }
    }
}

impl CommandSpecParser for CommandRegistry {
    fn accepts(&self, descriptor: &str) -> bool {
        let Some((title, command)) = descriptor.split_once(':') else {
            return false;
        };
        if title.trim().is_empty() {
            return false;
        }
        let command = command.trim();
        if command.is_empty() {
            return false;
        }
        let Some(program) = Self::program_word(command) else {
            return false;
        };
        if self.deny.iter().any(|d| *d == program) {
            return false;
        }
        self.allow.is_empty() || self.allow.iter().any(|a| *a == program)
    }
}
