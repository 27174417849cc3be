//! Plain-text help and usage rendering.
//!
//! Read-only over the command model: nothing here affects parsing.
//!
//! # Examples
//!
//! ```
//! use command_args_core::*;
//!
//! let command = Command::new("make")
//!     .with_option(CommandOption::flag("quiet"))
//!     .with_option(CommandOption::with_argument("directory", "dir"))
//!     .with_argument(Argument::new("target"));
//!
//! assert_eq!(
//!     render_usage(&command),
//!     "USAGE:\n    make [--quiet] [--directory=<dir>] <target>\n"
//! );
//! ```

use crate::Command;

const INDENT: &str = "    ";

/// Renders a `COMMANDS:` section listing each command and its help text.
///
/// Returns an empty string when `commands` is empty.
pub fn render_command_list(commands: &[Command]) -> String {
    if commands.is_empty() {
        return String::new();
    }
    let mut out = String::from("COMMANDS:\n");
    push_name_table(&mut out, commands);
    out
}

/// Renders the `COMMAND:` and `USAGE:` sections for one command, followed
/// by its subcommands when it has any.
pub fn render_help(command: &Command) -> String {
    let mut out = String::from("COMMAND:\n");
    push_name_table(&mut out, std::slice::from_ref(command));
    out.push('\n');
    out.push_str(&render_usage(command));
    if command.has_sub_commands() {
        out.push_str("\nSUBCOMMANDS:\n");
        push_name_table(&mut out, &command.sub_commands);
    }
    out
}

/// Renders the `USAGE:` line: options in brackets, arguments in angle
/// brackets, and a `<subcommand>` placeholder when subcommands exist.
pub fn render_usage(command: &Command) -> String {
    let mut line = command.name.clone();
    for option in &command.options {
        let rendered = match option.argument_name() {
            Some(argument) => format!(" [{}=<{argument}>]", option.long_form_name()),
            None => format!(" [{}]", option.long_form_name()),
        };
        line.push_str(&rendered);
    }
    for argument in &command.arguments {
        line.push_str(&format!(" <{}>", argument.name));
    }
    if command.has_sub_commands() {
        line.push_str(" [<subcommand>]");
    }
    format!("USAGE:\n{INDENT}{line}\n")
}

fn push_name_table(out: &mut String, commands: &[Command]) {
    let width = commands
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    for command in commands {
        let row = format!(
            "{INDENT}{:<width$}{INDENT}{}",
            command.name, command.help_text
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, CommandOption};

    #[test]
    fn test_command_list_aligns_help_text() {
        let commands = vec![
            Command::new("generate").with_help_text("Generate the site"),
            Command::new("clean"),
            Command::new("serve").with_help_text("Serve locally"),
        ];
        assert_eq!(
            render_command_list(&commands),
            "COMMANDS:\n    generate    Generate the site\n    clean\n    serve       Serve locally\n"
        );
        assert_eq!(render_command_list(&[]), "");
    }

    #[test]
    fn test_help_with_sub_commands() {
        let command = Command::new("git")
            .with_help_text("Version control")
            .with_option(CommandOption::flag("verbose"))
            .with_sub_command(Command::new("commit").with_help_text("Record changes"))
            .with_sub_command(Command::new("push").with_argument(Argument::new("remote")));

        assert_eq!(
            render_help(&command),
            "COMMAND:\n    git    Version control\n\n\
             USAGE:\n    git [--verbose] [<subcommand>]\n\n\
             SUBCOMMANDS:\n    commit    Record changes\n    push\n"
        );
    }
}
