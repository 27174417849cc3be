//! Command registry and argument matching.
//!
//! [`CommandParser`] owns the registered top-level commands. Parsing walks
//! the token list left to right against one command at a time:
//!
//! 1. the first token selects the command by exact name;
//! 2. leading long-form options (`--name`, `--name=value`) are matched
//!    against the command's options;
//! 3. the next tokens are bound to the command's required arguments in
//!    declaration order;
//! 4. if tokens remain, the next one must name a subcommand, and matching
//!    recurses into it with the rest of the tokens.
//!
//! Registered commands are templates and are never modified. Each parse works
//! on a fresh copy of the selected command, which the parser keeps as its last
//! parse. The first mismatch aborts the parse; bindings made before the
//! failure stay on that copy, so it must not be trusted after an error.

use tracing::debug;

use crate::error::{CommandError, ParserError, Result};
use crate::token::{is_long_form_option, option_argument, option_name};
use crate::validate::validate_command;
use crate::Command;

/// Registry of top-level commands and entry point for parsing.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut parser = CommandParser::new();
/// parser
///     .add_command(
///         Command::new("make")
///             .with_option(CommandOption::with_argument("directory", "dir"))
///             .with_argument(Argument::new("target")),
///     )
///     .unwrap();
///
/// let command = parser.parse(&["make", "--directory=/src", "all"]).unwrap();
/// assert_eq!(command.option("directory").unwrap().value(), Some("/src"));
/// assert_eq!(command.arguments[0].value.as_deref(), Some("all"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    commands: Vec<Command>,
    last_parsed: Option<Command>,
}

impl CommandParser {
    /// Creates a parser with no registered commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `command` and adds it to the registry.
    ///
    /// Only the command's own name, options and arguments are validated;
    /// subcommands are accepted as declared.
    ///
    /// # Errors
    ///
    /// Returns [`CommandModelError::InvalidCommand`](crate::CommandModelError::InvalidCommand)
    /// if the description is malformed, or [`ParserError::DuplicateCommand`]
    /// if a command with the same name is already registered.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        validate_command(&command)?;
        if self.command(&command.name).is_some() {
            return Err(ParserError::DuplicateCommand(command.name).into());
        }

        debug!(command = %command.name, "registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Names of the registered commands, in registration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Finds a registered command by exact name.
    ///
    /// The returned command is the registered template and carries no
    /// bindings from any parse.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// The command matched by the most recent parse that selected one.
    ///
    /// After a failed match this holds the partial bindings made before the
    /// error. It is replaced by every parse that gets past command selection.
    pub fn last_parsed(&self) -> Option<&Command> {
        self.last_parsed.as_ref()
    }

    /// Parses `tokens` (program name already stripped) against the registry.
    ///
    /// The selected command is copied from the registry before matching, so
    /// the result depends only on `tokens` and the registered description:
    /// nothing bound by an earlier parse carries over. On success the copy is
    /// returned with its options, arguments and used subcommand populated.
    ///
    /// # Errors
    ///
    /// - [`ParserError::NoCommands`] if nothing is registered.
    /// - [`ParserError::CommandNotSupplied`] if `tokens` is empty.
    /// - [`ParserError::NoSuchCommand`] if the first token names no command.
    /// - Any [`CommandError`] raised while matching the rest of the tokens.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<&Command> {
        if self.commands.is_empty() {
            return Err(ParserError::NoCommands.into());
        }
        let Some((name, rest)) = tokens.split_first() else {
            return Err(ParserError::CommandNotSupplied.into());
        };

        let name = name.as_ref();
        let mut command = self
            .command(name)
            .cloned()
            .ok_or_else(|| ParserError::NoSuchCommand(name.to_string()))?;

        debug!(command = %command.name, tokens = rest.len(), "parsing command");
        let matched = match_command(&mut command, rest);
        let command = self.last_parsed.insert(command);
        matched?;
        Ok(&*command)
    }
}

/// Matches `tokens` (everything after the command name) against `command`.
fn match_command<S: AsRef<str>>(
    command: &mut Command,
    tokens: &[S],
) -> std::result::Result<(), CommandError> {
    let rest = consume_options(command, tokens)?;

    if !rest.is_empty() && !command.has_required_arguments() && !command.has_sub_commands() {
        return Err(CommandError::InvalidArguments {
            command: command.name.clone(),
        });
    }

    let bound = command.bind_arguments(rest)?;
    let Some((sub_name, sub_tokens)) = rest.get(bound..).and_then(<[S]>::split_first) else {
        return Ok(());
    };

    let sub_name = sub_name.as_ref();
    let Some(index) = command.sub_command_index(sub_name) else {
        return Err(CommandError::NoSuchSubCommand {
            command: command.name.clone(),
            sub_command: sub_name.to_string(),
        });
    };

    debug!(command = %command.name, sub_command = sub_name, "matched subcommand");
    match_command(&mut command.sub_commands[index], sub_tokens)?;
    command.mark_used_sub_command(index);
    Ok(())
}

/// Consumes the leading long-form options and returns the remaining tokens.
fn consume_options<'t, S: AsRef<str>>(
    command: &mut Command,
    tokens: &'t [S],
) -> std::result::Result<&'t [S], CommandError> {
    let mut rest = tokens;
    while let Some((token, tail)) = rest.split_first() {
        let token = token.as_ref();
        if !is_long_form_option(token) {
            break;
        }
        if !command.has_options() {
            return Err(CommandError::NoOptions {
                command: command.name.clone(),
            });
        }
        command.set_option(option_name(token), option_argument(token))?;
        rest = tail;
    }
    Ok(rest)
}
