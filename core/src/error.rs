//! Error types for command registration and parsing.
//!
//! Errors are split by phase: [`CommandModelError`] is raised when a command
//! description is registered, [`ParserError`] covers registry-level parse
//! failures and [`CommandError`] covers mismatches against a specific
//! command. Every variant carries name snapshots rather than references to
//! the model, so an error stays meaningful after the model is mutated.

use thiserror::Error;

/// A structural problem in a command description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelViolation {
    /// Command name is empty.
    #[error("command name cannot be empty")]
    EmptyName,
    /// Command name contains a whitespace character.
    #[error("command name cannot contain whitespace")]
    NameContainsWhitespace,
    /// Option name is empty or contains whitespace or a hyphen.
    #[error("invalid option name: {0:?}")]
    InvalidOptionName(String),
    /// Argument name is empty or contains whitespace or a hyphen.
    #[error("invalid argument name: {0:?}")]
    InvalidArgumentName(String),
    /// Two options of the same command share a name.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// Two arguments of the same command share a name.
    #[error("duplicate argument: {0}")]
    DuplicateArgument(String),
    /// Two sibling subcommands share a name.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubCommand(String),
}

/// Registration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandModelError {
    /// The command description breaks a structural rule.
    #[error("invalid command {command:?}: {violation}")]
    InvalidCommand {
        /// Name (or space-separated path, for nested commands) of the offender.
        command: String,
        /// The rule that was broken.
        violation: ModelViolation,
    },
}

/// Errors raised by the parser itself rather than by a specific command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// `parse` was called before any command was registered.
    #[error("no commands have been registered")]
    NoCommands,
    /// The token list was empty.
    #[error("no command supplied")]
    CommandNotSupplied,
    /// The first token does not name a registered command.
    #[error("no such command: {0}")]
    NoSuchCommand(String),
    /// A top-level command with this name is already registered.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
}

/// Mismatches between the supplied tokens and a command's declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A token after the command's arguments does not name a subcommand.
    #[error("command `{command}` has no subcommand `{sub_command}`")]
    NoSuchSubCommand { command: String, sub_command: String },
    /// An option was supplied to a command that declares none.
    #[error("command `{command}` takes no options")]
    NoOptions { command: String },
    /// The supplied option is not declared by the command.
    #[error("command `{command}` has no option `{option}`")]
    NoSuchOption { command: String, option: String },
    /// An option that takes an argument was supplied without `=value`.
    #[error("option `--{option}` of command `{command}` requires an argument (--{option}=<value>)")]
    OptionRequiresArgument { command: String, option: String },
    /// Fewer values were supplied than the command's required arguments.
    #[error("command `{command}` requires more arguments")]
    RequiresArguments { command: String },
    /// Values were bound to a command that declares no arguments or subcommands.
    #[error("command `{command}` takes no arguments or subcommands")]
    NoArgumentsOrSubCommands { command: String },
    /// Values were supplied that the command cannot consume.
    #[error("invalid arguments for command `{command}`")]
    InvalidArguments { command: String },
}

impl CommandError {
    /// Name of the command (or subcommand) whose declaration was not matched.
    pub fn command(&self) -> &str {
        match self {
            Self::NoSuchSubCommand { command, .. }
            | Self::NoOptions { command }
            | Self::NoSuchOption { command, .. }
            | Self::OptionRequiresArgument { command, .. }
            | Self::RequiresArguments { command }
            | Self::NoArgumentsOrSubCommands { command }
            | Self::InvalidArguments { command } => command,
        }
    }
}

/// Any failure from registering commands or parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Model(#[from] CommandModelError),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or saving a command manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    /// A command in the manifest was rejected by the parser.
    #[error("registration failed: {0}")]
    Registration(#[from] Error),
}
