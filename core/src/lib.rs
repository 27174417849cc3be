//! Declarative command-line parsing.
//!
//! Describe commands as data, register them with a [`CommandParser`], then
//! parse an argument vector against them:
//!
//! - [`Command`] — a named command with options, required positional
//!   arguments and nested subcommands.
//! - [`CommandOption`] — a long-form switch (`--name`), optionally taking an
//!   inline value (`--name=value`).
//! - [`Argument`] — a required positional value, bound in declaration order.
//!
//! Registration ([`CommandParser::add_command`]) validates each description
//! (see [`validate_command`]). Parsing ([`CommandParser::parse`]) binds
//! options, arguments and the used subcommand on a fresh copy of the
//! registered command and returns it, or the first error encountered.
//!
//! Command sets can also be declared in a JSON or YAML [`CommandManifest`],
//! reported as an owned [`Invocation`], and rendered as help text with
//! [`render_help`].
//!
//! # Example
//!
//! ```
//! use command_args_core::*;
//!
//! let mut parser = CommandParser::new();
//! parser
//!     .add_command(
//!         Command::new("command")
//!             .with_option(CommandOption::flag("verbose"))
//!             .with_sub_command(
//!                 Command::new("subcommand").with_argument(Argument::new("input")),
//!             ),
//!     )
//!     .unwrap();
//!
//! let command = parser
//!     .parse(&["command", "--verbose", "subcommand", "file.txt"])
//!     .unwrap();
//! assert!(command.option("verbose").unwrap().set);
//!
//! let sub = command.used_sub_command().unwrap();
//! assert_eq!(sub.name, "subcommand");
//! assert_eq!(sub.arguments[0].value.as_deref(), Some("file.txt"));
//! ```

mod error;
mod invocation;
mod manifest;
mod parser;
pub mod token;
mod types;
mod usage;
mod validate;

pub use error::{
    CommandError, CommandModelError, Error, ManifestError, ModelViolation, ParserError, Result,
};
pub use invocation::{ArgumentValue, Invocation, OptionValue};
pub use manifest::{CommandManifest, MANIFEST_VERSION};
pub use parser::CommandParser;
pub use types::*;
pub use usage::{render_command_list, render_help, render_usage};
pub use validate::{validate_command, validate_tree};
