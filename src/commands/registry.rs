//! Registration checks for attaching a subcommand to a parent.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. the candidate has a signature with a non-empty name and no empty alias
//! 2. no sibling has the same name
//! 3. no candidate alias is a sibling's name
//! 4. no candidate alias is a sibling's alias
//! 5. the candidate name is not a sibling's alias
//! 6. the candidate is a `SUB_COMMAND`
//!
//! Only direct siblings are compared. Ancestors and descendants may reuse
//! any label.

use std::collections::HashSet;
use std::sync::Arc;

use super::error::RegistrationError;
use super::node::CommandNode;
use super::types::{CommandSignature, CommandType};

/// Decide whether `candidate` may join `siblings`.
pub(crate) fn validate_attach<C>(
    siblings: &[Arc<CommandNode<C>>],
    candidate: &CommandNode<C>,
) -> Result<(), RegistrationError> {
    let sig = candidate
        .signature()
        .filter(|sig| !sig.name.is_empty())
        .ok_or(RegistrationError::MissingSignature)?;
    if sig.aliases.contains("") {
        return Err(RegistrationError::EmptyAlias {
            name: sig.name.clone(),
        });
    }

    let existing: Vec<&CommandSignature> = siblings
        .iter()
        .filter_map(|sibling| sibling.signature())
        .collect();

    if existing.iter().any(|other| other.name == sig.name) {
        return Err(RegistrationError::DuplicateName {
            name: sig.name.clone(),
        });
    }

    let existing_names: HashSet<&str> = existing.iter().map(|other| other.name.as_str()).collect();
    if let Some(alias) = sig
        .aliases
        .iter()
        .find(|alias| existing_names.contains(alias.as_str()))
    {
        return Err(RegistrationError::AliasNameConflict {
            name: sig.name.clone(),
            alias: alias.clone(),
        });
    }

    let existing_aliases: HashSet<&str> = existing
        .iter()
        .flat_map(|other| other.aliases.iter().map(String::as_str))
        .collect();
    if let Some(alias) = sig
        .aliases
        .iter()
        .find(|alias| existing_aliases.contains(alias.as_str()))
    {
        return Err(RegistrationError::AliasAliasConflict {
            name: sig.name.clone(),
            alias: alias.clone(),
        });
    }

    if existing_aliases.contains(sig.name.as_str()) {
        return Err(RegistrationError::NameAliasConflict {
            name: sig.name.clone(),
        });
    }

    if sig.kind != CommandType::SubCommand {
        return Err(RegistrationError::InvalidType {
            name: sig.name.clone(),
            expected: CommandType::SubCommand,
            found: sig.kind,
        });
    }

    Ok(())
}
