use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use command_args_core::{
    Command as DeclaredCommand, CommandManifest, Error as ParseError, Invocation,
    render_command_list, render_help, render_usage, validate_tree,
};
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmdargs")]
#[command(about = "Validate command manifests and parse argument vectors against them")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more command manifests, including nested subcommands.
    Validate(ValidateArgs),
    /// Parse tokens against a manifest and print the resolved invocation.
    Parse(ParseArgs),
    /// Print the command list, or help for one command.
    Usage(UsageArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Manifest files (.json, .yaml or .yml).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Manifest declaring the available commands.
    #[arg(long)]
    manifest: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to parse, after `--` (e.g. `-- generate --force site`).
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Manifest declaring the available commands.
    #[arg(long)]
    manifest: PathBuf,
    /// Command to describe; lists all commands when omitted.
    command: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_manifest(path: &Path) -> Result<CommandManifest, String> {
    CommandManifest::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut problems = 0usize;

    for path in &args.inputs {
        let manifest = load_manifest(path)?;
        let mut seen = HashSet::new();
        let mut errors: Vec<String> = Vec::new();

        for command in &manifest.commands {
            if !seen.insert(command.name.as_str()) {
                errors.push(format!("duplicate command: {}", command.name));
            }
            errors.extend(validate_tree(command).iter().map(ToString::to_string));
        }

        if errors.is_empty() {
            println!(
                "{}: {} command(s) valid.",
                path.display(),
                manifest.commands.len()
            );
        } else {
            for err in &errors {
                eprintln!("{}: {err}", path.display());
            }
            problems += errors.len();
        }
    }

    if problems > 0 {
        return Err(format!("{problems} problem(s) found"));
    }
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;
    let mut parser = manifest.into_parser().map_err(|err| err.to_string())?;

    let invocation = match parser.parse(&args.tokens).map(Invocation::from) {
        Ok(invocation) => invocation,
        Err(ParseError::Command(err)) => {
            // Usage of the (sub)command whose tokens didn't match.
            let failing = args
                .tokens
                .first()
                .and_then(|name| parser.command(name))
                .and_then(|command| find_command(command, err.command()));
            if let Some(command) = failing {
                eprint!("{}", render_usage(command));
            }
            return Err(err.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };

    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&invocation)
            .map_err(|err| format!("Failed to serialize invocation: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&invocation)
            .map_err(|err| format!("Failed to serialize invocation: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

/// Finds the command named `name` in `command`'s tree, depth first.
fn find_command<'a>(command: &'a DeclaredCommand, name: &str) -> Option<&'a DeclaredCommand> {
    if command.name == name {
        return Some(command);
    }
    command
        .sub_commands
        .iter()
        .find_map(|sub| find_command(sub, name))
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;

    let text = match args.command.as_deref() {
        Some(name) => {
            let command = manifest
                .command(name)
                .ok_or_else(|| format!("no such command: {name}"))?;
            render_help(command)
        }
        None => render_command_list(&manifest.commands),
    };
    print!("{text}");
    Ok(())
}
