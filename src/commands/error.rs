//! Errors raised while building and walking a command tree.

use super::types::CommandType;

/// Why a subcommand could not be attached.
///
/// These are build-time mistakes. A failed attach leaves the parent exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Cannot register command: it has no signature")]
    MissingSignature,

    #[error("Cannot register {name}: Aliases must not be empty")]
    EmptyAlias { name: String },

    #[error("Cannot register {name}: Name already registered as subcommand")]
    DuplicateName { name: String },

    #[error(
        "Cannot register {name}: Alias '{alias}' is already being used as name for another subcommand"
    )]
    AliasNameConflict { name: String, alias: String },

    #[error(
        "Cannot register {name}: Alias '{alias}' is already being used as alias for another subcommand"
    )]
    AliasAliasConflict { name: String, alias: String },

    #[error("Cannot register {name}: Name is already being used as alias for another subcommand")]
    NameAliasConflict { name: String },

    #[error("Cannot register {name}: Command type must be {expected}, found {found}")]
    InvalidType {
        name: String,
        expected: CommandType,
        found: CommandType,
    },
}

/// Failures of the dispatcher, both while registering roots and at dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Cannot register root command: it has no signature")]
    MissingSignature,

    #[error("Cannot register {name}: Aliases must not be empty")]
    EmptyAlias { name: String },

    #[error("Cannot register {name}: Command type must be ROOT")]
    NotRoot { name: String },

    #[error("Cannot register {name}: Label '{label}' is already used by {existing}")]
    LabelConflict {
        name: String,
        label: String,
        existing: String,
    },

    #[error("Empty command")]
    EmptyInput,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
