//! Command description validation.
//!
//! Validates the structural rules a command must satisfy before the parser
//! accepts it: a usable name, well-formed option and argument names, and no
//! duplicates within the command. [`validate_command`] checks a single
//! command (its subcommands are left alone, they are reached only through
//! the parent); [`validate_tree`] walks the whole command tree for tooling.
//!
//! # Examples
//!
//! ```
//! use command_args_core::*;
//!
//! let command = Command::new("generate").with_option(CommandOption::flag("force"));
//! assert!(validate_command(&command).is_ok());
//!
//! // Invalid: option names must not contain hyphens
//! let bad = Command::new("generate").with_option(CommandOption::flag("dry-run"));
//! assert!(validate_command(&bad).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CommandModelError, ModelViolation};
use crate::{Argument, Command, CommandOption};

/// Validates a single command and its own options and arguments.
///
/// Subcommands are not inspected.
///
/// # Errors
///
/// Returns [`CommandModelError::InvalidCommand`] describing the first rule
/// the command breaks.
pub fn validate_command(command: &Command) -> Result<(), CommandModelError> {
    match check_command(command) {
        Some(violation) => Err(CommandModelError::InvalidCommand {
            command: command.name.clone(),
            violation,
        }),
        None => Ok(()),
    }
}

/// Validates a command and every nested subcommand.
///
/// In addition to the per-command rules, sibling subcommands must have
/// distinct names. At most one error is reported per command; nested
/// commands are identified by their space-separated path.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let command = Command::new("git")
///     .with_sub_command(Command::new("commit"))
///     .with_sub_command(Command::new("commit"));
/// let errors = validate_tree(&command);
/// assert_eq!(errors.len(), 1);
/// ```
pub fn validate_tree(command: &Command) -> Vec<CommandModelError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    validate_subtree(command, &mut path, &mut errors);
    errors
}

fn validate_subtree<'a>(
    command: &'a Command,
    path: &mut Vec<&'a str>,
    errors: &mut Vec<CommandModelError>,
) {
    path.push(command.name.as_str());

    let violation = check_command(command).or_else(|| {
        let mut seen = HashSet::new();
        command
            .sub_commands
            .iter()
            .find(|sub| !seen.insert(sub.name.as_str()))
            .map(|sub| ModelViolation::DuplicateSubCommand(sub.name.clone()))
    });
    if let Some(violation) = violation {
        errors.push(CommandModelError::InvalidCommand {
            command: path.join(" "),
            violation,
        });
    }

    for sub in &command.sub_commands {
        validate_subtree(sub, path, errors);
    }
    path.pop();
}

fn check_command(command: &Command) -> Option<ModelViolation> {
    if command.name.is_empty() {
        return Some(ModelViolation::EmptyName);
    }
    if command.name.chars().any(char::is_whitespace) {
        return Some(ModelViolation::NameContainsWhitespace);
    }

    check_options(&command.options).or_else(|| check_arguments(&command.arguments))
}

fn check_options(options: &[CommandOption]) -> Option<ModelViolation> {
    let mut seen = HashSet::new();
    for option in options {
        if !is_valid_member_name(&option.name) {
            return Some(ModelViolation::InvalidOptionName(option.name.clone()));
        }
        if !seen.insert(option.name.as_str()) {
            return Some(ModelViolation::DuplicateOption(option.name.clone()));
        }
    }
    None
}

fn check_arguments(arguments: &[Argument]) -> Option<ModelViolation> {
    let mut seen = HashSet::new();
    for argument in arguments {
        if !is_valid_member_name(&argument.name) {
            return Some(ModelViolation::InvalidArgumentName(argument.name.clone()));
        }
        if !seen.insert(argument.name.as_str()) {
            return Some(ModelViolation::DuplicateArgument(argument.name.clone()));
        }
    }
    None
}

/// Option and argument names: non-empty, no whitespace, no hyphen.
fn is_valid_member_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == '-')
}
