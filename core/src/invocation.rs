//! Owned snapshots of a parse result.
//!
//! After a successful parse the bound state lives inside the registered
//! [`Command`] tree. [`Invocation`] copies out just what was supplied (set
//! options, bound arguments and the chain of used subcommands) so it can be
//! reported or serialized independently of the parser.

use serde::{Deserialize, Serialize};

use crate::Command;

/// An option that was supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A required argument and the value bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentValue {
    pub name: String,
    pub value: Option<String>,
}

/// Snapshot of a parsed command and its used subcommands.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut parser = CommandParser::new();
/// parser
///     .add_command(
///         Command::new("git").with_sub_command(
///             Command::new("commit").with_option(CommandOption::with_argument("message", "msg")),
///         ),
///     )
///     .unwrap();
///
/// let invocation = Invocation::from(parser.parse(&["git", "commit", "--message=wip"]).unwrap());
/// assert_eq!(invocation.command, "git");
/// assert_eq!(invocation.path(), vec!["git", "commit"]);
///
/// let commit = invocation.sub_command.as_deref().unwrap();
/// assert_eq!(commit.options[0].value.as_deref(), Some("wip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_command: Option<Box<Invocation>>,
}

impl Invocation {
    /// Names of the command and each used subcommand, outermost first.
    pub fn path(&self) -> Vec<&str> {
        let mut path = vec![self.command.as_str()];
        let mut current = self.sub_command.as_deref();
        while let Some(sub) = current {
            path.push(sub.command.as_str());
            current = sub.sub_command.as_deref();
        }
        path
    }

    /// The innermost used subcommand, or the command itself.
    pub fn leaf(&self) -> &Invocation {
        let mut current = self;
        while let Some(sub) = current.sub_command.as_deref() {
            current = sub;
        }
        current
    }
}

impl From<&Command> for Invocation {
    fn from(command: &Command) -> Self {
        Self {
            command: command.name.clone(),
            options: command
                .options
                .iter()
                .filter(|o| o.set)
                .map(|o| OptionValue {
                    name: o.name.clone(),
                    value: o.value().map(String::from),
                })
                .collect(),
            arguments: command
                .arguments
                .iter()
                .map(|a| ArgumentValue {
                    name: a.name.clone(),
                    value: a.value.clone(),
                })
                .collect(),
            sub_command: command
                .used_sub_command()
                .map(|sub| Box::new(Invocation::from(sub))),
        }
    }
}
