//! Command model definitions.
//!
//! This module defines the data model consumers use to describe their
//! command-line surface: a [`Command`] owns an ordered list of
//! [`CommandOption`]s, required positional [`Argument`]s and nested
//! subcommands. The parser matches tokens against a copy of a registered
//! command, so after a successful parse that copy carries the bound option
//! flags, option values, argument values and the selected subcommand.
//!
//! All types serialize with [`serde`] so command sets can be declared in a
//! manifest file (see [`CommandManifest`](crate::CommandManifest)).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CommandError;
use crate::token::LONG_FORM_PREFIX;

/// Distinguishes plain switches from options that carry an inline value.
///
/// # Examples
///
/// ```
/// use command_args_core::{CommandOption, OptionKind};
///
/// let flag = CommandOption::flag("force");
/// assert_eq!(flag.kind, OptionKind::Flag);
///
/// let output = CommandOption::with_argument("output", "path");
/// assert!(output.takes_argument());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionKind {
    /// Plain switch, used as `--name`.
    #[default]
    Flag,
    /// Option used as `--name=<value>`. The inline value is mandatory.
    WithArgument {
        /// Placeholder shown in usage text (e.g. `path` in `--output=<path>`).
        argument_name: String,
        /// Bound value, `None` until the option is matched.
        value: Option<String>,
    },
}

/// A named optional switch belonging to a command.
///
/// Options are matched in long form only (`--name`). Names must not contain
/// whitespace or hyphens; the `--` prefix is added for you.
///
/// # Examples
///
/// ```
/// use command_args_core::CommandOption;
///
/// let verbose = CommandOption::flag("verbose");
/// assert_eq!(verbose.long_form_name(), "--verbose");
/// assert!(!verbose.set);
/// assert!(verbose.matches_long_form("--verbose"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "OptionRecord", into = "OptionRecord")]
pub struct CommandOption {
    /// Option name without the leading `--`.
    pub name: String,
    /// Whether the option was supplied on the command line.
    pub set: bool,
    /// Plain switch or option with an inline argument.
    pub kind: OptionKind,
}

impl CommandOption {
    /// Creates a plain switch.
    pub fn flag(name: &str) -> Self {
        Self {
            name: name.to_string(),
            set: false,
            kind: OptionKind::Flag,
        }
    }

    /// Creates an option that requires an inline `=value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::CommandOption;
    ///
    /// let option = CommandOption::with_argument("directory", "dir");
    /// assert_eq!(option.argument_name(), Some("dir"));
    /// assert_eq!(option.value(), None);
    /// ```
    pub fn with_argument(name: &str, argument_name: &str) -> Self {
        Self {
            name: name.to_string(),
            set: false,
            kind: OptionKind::WithArgument {
                argument_name: argument_name.to_string(),
                value: None,
            },
        }
    }

    /// Returns the `--name` form used on the command line.
    pub fn long_form_name(&self) -> String {
        format!("{LONG_FORM_PREFIX}{}", self.name)
    }

    /// Checks whether `long_form` (e.g. `"--verbose"`) names this option.
    pub fn matches_long_form(&self, long_form: &str) -> bool {
        long_form.strip_prefix(LONG_FORM_PREFIX) == Some(self.name.as_str())
    }

    /// Returns `true` for options declared with [`OptionKind::WithArgument`].
    pub fn takes_argument(&self) -> bool {
        matches!(self.kind, OptionKind::WithArgument { .. })
    }

    /// Returns the usage placeholder for options that take an argument.
    pub fn argument_name(&self) -> Option<&str> {
        match &self.kind {
            OptionKind::WithArgument { argument_name, .. } => Some(argument_name),
            OptionKind::Flag => None,
        }
    }

    /// Returns the bound inline value, if any.
    ///
    /// An explicit empty value (`--name=`) is `Some("")`, distinct from an
    /// option that was never supplied.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            OptionKind::WithArgument { value, .. } => value.as_deref(),
            OptionKind::Flag => None,
        }
    }
}

/// Flat serialized form of [`CommandOption`].
///
/// An option with an `argument_name` is an option with an argument; anything
/// else is a plain switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OptionRecord {
    name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    set: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    argument_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl From<OptionRecord> for CommandOption {
    fn from(record: OptionRecord) -> Self {
        let kind = match record.argument_name {
            Some(argument_name) => OptionKind::WithArgument {
                argument_name,
                value: record.value,
            },
            None => OptionKind::Flag,
        };
        Self {
            name: record.name,
            set: record.set,
            kind,
        }
    }
}

impl From<CommandOption> for OptionRecord {
    fn from(option: CommandOption) -> Self {
        let (argument_name, value) = match option.kind {
            OptionKind::WithArgument {
                argument_name,
                value,
            } => (Some(argument_name), value),
            OptionKind::Flag => (None, None),
        };
        Self {
            name: option.name,
            set: option.set,
            argument_name,
            value,
        }
    }
}

/// A required positional argument.
///
/// Arguments come after any options and are bound in declaration order.
///
/// # Examples
///
/// ```
/// use command_args_core::Argument;
///
/// let arg = Argument::new("target");
/// assert_eq!(arg.name, "target");
/// assert!(arg.value.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Argument {
    /// Name shown in usage text.
    pub name: String,
    /// Bound value, `None` until the argument is matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Argument {
    /// Creates an unbound argument.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }
}

/// A named, user-invocable command.
///
/// Commands are plain data: build them with the chaining helpers, register
/// them with a [`CommandParser`](crate::CommandParser), and read the bound
/// state back after parsing. Subcommands are themselves commands and are
/// matched with the same rules after the parent's required arguments.
///
/// # Examples
///
/// ```
/// use command_args_core::{Argument, Command, CommandOption};
///
/// let command = Command::new("make")
///     .with_help_text("Build a target")
///     .with_option(CommandOption::flag("quiet"))
///     .with_option(CommandOption::with_argument("directory", "dir"))
///     .with_argument(Argument::new("target"))
///     .with_sub_command(Command::new("clean"));
///
/// assert_eq!(command.option_long_forms(), vec!["--quiet", "--directory"]);
/// assert_eq!(command.argument_names(), vec!["target"]);
/// assert_eq!(command.sub_command_names(), vec!["clean"]);
/// assert!(command.used_sub_command().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Command {
    /// Name used to invoke the command. Must not contain whitespace.
    pub name: String,
    /// Usage information for end users.
    #[serde(default)]
    pub help_text: String,
    /// Optional switches, used before any required arguments.
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Required positional arguments, in binding order.
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Subcommands, selectable after the required arguments.
    #[serde(default)]
    pub sub_commands: Vec<Command>,
    /// Index into `sub_commands` of the subcommand selected by the last parse.
    #[serde(skip)]
    used_sub_command: Option<usize>,
}

impl Command {
    /// Creates a command with no help text, options, arguments or subcommands.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the help text.
    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = help_text.to_string();
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Adds a required argument after the existing ones.
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds a subcommand.
    pub fn with_sub_command(mut self, sub_command: Command) -> Self {
        self.sub_commands.push(sub_command);
        self
    }

    /// Whether the command declares any options.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Option names in declaration order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Option names with the `--` prefix, in declaration order.
    pub fn option_long_forms(&self) -> Vec<String> {
        self.options.iter().map(CommandOption::long_form_name).collect()
    }

    /// Finds an option by its `name` (without the `--` prefix).
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Marks the option named by `long_form` as set.
    ///
    /// `value` is the inline argument, if one was supplied. Options with an
    /// argument require it; plain switches ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoSuchOption`] if no option matches
    /// `long_form`, or [`CommandError::OptionRequiresArgument`] if the option
    /// takes an argument and `value` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::{Command, CommandOption};
    ///
    /// let mut command = Command::new("make")
    ///     .with_option(CommandOption::with_argument("directory", "dir"));
    ///
    /// command.set_option("--directory", Some("/tmp")).unwrap();
    /// let option = command.option("directory").unwrap();
    /// assert!(option.set);
    /// assert_eq!(option.value(), Some("/tmp"));
    ///
    /// assert!(command.set_option("--directory", None).is_err());
    /// assert!(command.set_option("--missing", None).is_err());
    /// ```
    pub fn set_option(&mut self, long_form: &str, value: Option<&str>) -> Result<(), CommandError> {
        let Some(option) = self
            .options
            .iter_mut()
            .find(|o| o.matches_long_form(long_form))
        else {
            return Err(CommandError::NoSuchOption {
                command: self.name.clone(),
                option: long_form.to_string(),
            });
        };

        match &mut option.kind {
            OptionKind::WithArgument { value: slot, .. } => {
                let Some(value) = value else {
                    return Err(CommandError::OptionRequiresArgument {
                        command: self.name.clone(),
                        option: option.name.clone(),
                    });
                };
                *slot = Some(value.to_string());
            }
            OptionKind::Flag => {
                if let Some(value) = value {
                    debug!(
                        command = %self.name,
                        option = %option.name,
                        value,
                        "ignoring inline value for plain option"
                    );
                }
            }
        }
        option.set = true;
        debug!(command = %self.name, option = %option.name, "option set");
        Ok(())
    }

    /// Whether the command declares any positional arguments.
    pub fn has_required_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Argument names in declaration order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }

    /// Returns `true` when every declared argument holds a value.
    pub fn all_arguments_set(&self) -> bool {
        self.arguments.iter().all(|a| a.value.is_some())
    }

    /// Binds `values` to the declared arguments in declaration order.
    ///
    /// Returns the number of values consumed. When the command declares
    /// subcommands, surplus values are left for the caller to match against
    /// them.
    ///
    /// # Errors
    ///
    /// - [`CommandError::RequiresArguments`] if fewer values than declared
    ///   arguments are supplied.
    /// - [`CommandError::NoArgumentsOrSubCommands`] if the command declares
    ///   neither arguments nor subcommands but values were supplied.
    /// - [`CommandError::InvalidArguments`] if values remain after binding and
    ///   the command has no subcommands.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::{Argument, Command};
    ///
    /// let mut command = Command::new("copy")
    ///     .with_argument(Argument::new("source"))
    ///     .with_argument(Argument::new("dest"));
    ///
    /// assert_eq!(command.bind_arguments(&["a.txt", "b.txt"]).unwrap(), 2);
    /// assert_eq!(command.arguments[1].value.as_deref(), Some("b.txt"));
    /// assert!(command.bind_arguments(&["a.txt"]).is_err());
    /// ```
    pub fn bind_arguments<S: AsRef<str>>(&mut self, values: &[S]) -> Result<usize, CommandError> {
        if values.len() < self.arguments.len() {
            return Err(CommandError::RequiresArguments {
                command: self.name.clone(),
            });
        }
        if !values.is_empty() && !self.has_required_arguments() && !self.has_sub_commands() {
            return Err(CommandError::NoArgumentsOrSubCommands {
                command: self.name.clone(),
            });
        }
        if values.len() > self.arguments.len() && !self.has_sub_commands() {
            return Err(CommandError::InvalidArguments {
                command: self.name.clone(),
            });
        }

        for (argument, value) in self.arguments.iter_mut().zip(values) {
            let value = value.as_ref();
            debug!(command = %self.name, argument = %argument.name, value, "argument bound");
            argument.value = Some(value.to_string());
        }
        Ok(self.arguments.len())
    }

    /// Whether the command declares any subcommands.
    pub fn has_sub_commands(&self) -> bool {
        !self.sub_commands.is_empty()
    }

    /// Subcommand names in declaration order.
    pub fn sub_command_names(&self) -> Vec<&str> {
        self.sub_commands.iter().map(|s| s.name.as_str()).collect()
    }

    /// Whether a subcommand named exactly `name` is declared.
    pub fn has_sub_command(&self, name: &str) -> bool {
        self.sub_commands.iter().any(|s| s.name == name)
    }

    /// Finds a subcommand by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoSuchSubCommand`] if no subcommand has that
    /// name.
    pub fn sub_command(&self, name: &str) -> Result<&Command, CommandError> {
        self.sub_commands
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CommandError::NoSuchSubCommand {
                command: self.name.clone(),
                sub_command: name.to_string(),
            })
    }

    pub(crate) fn sub_command_index(&self, name: &str) -> Option<usize> {
        self.sub_commands.iter().position(|s| s.name == name)
    }

    /// Records the subcommand at `index` as the one used by the last parse.
    pub(crate) fn mark_used_sub_command(&mut self, index: usize) {
        debug_assert!(index < self.sub_commands.len());
        self.used_sub_command = Some(index);
    }

    /// Returns the subcommand selected by the last successful parse.
    pub fn used_sub_command(&self) -> Option<&Command> {
        self.used_sub_command
            .and_then(|index| self.sub_commands.get(index))
    }
}
