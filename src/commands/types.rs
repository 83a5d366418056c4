//! Command identity types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a command may live in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    /// Entry point registered with a dispatcher
    Root,
    /// Attachable under another command
    SubCommand,
}

impl CommandType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::SubCommand => "SUB_COMMAND",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity metadata of a command: its name, aliases and type.
///
/// Signatures are plain values. Builders return new signatures, so a
/// signature held by an attached node never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSignature {
    pub name: String,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    #[serde(rename = "type")]
    pub kind: CommandType,
}

impl CommandSignature {
    pub fn new(name: impl Into<String>, kind: CommandType) -> Self {
        Self {
            name: name.into(),
            aliases: BTreeSet::new(),
            kind,
        }
    }

    /// Signature for a top-level command.
    pub fn root(name: impl Into<String>) -> Self {
        Self::new(name, CommandType::Root)
    }

    /// Signature for a subcommand.
    pub fn sub(name: impl Into<String>) -> Self {
        Self::new(name, CommandType::SubCommand)
    }

    /// Replace the alias set.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Add aliases on top of the existing ones (e.g. from user config).
    pub fn with_extra_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// True if `token` is this command's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.contains(token)
    }

    /// Name followed by aliases, the tokens that invoke this command.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
