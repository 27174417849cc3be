//! Command manifests.
//!
//! A manifest declares a set of commands in a JSON or YAML file so a parser
//! can be built without writing the descriptions in code.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! name: site-tool
//! commands:
//!   - name: generate
//!     help_text: Generate the site
//!     options:
//!       - name: force
//!       - name: output
//!         argument_name: path
//!     arguments:
//!       - name: source
//!   - name: serve
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ManifestError;
use crate::{Command, CommandParser};

/// Version written by [`CommandManifest::new`].
pub const MANIFEST_VERSION: &str = "1.0";

/// Serializable bundle of command descriptions.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let yaml = r#"
/// version: "1.0"
/// commands:
///   - name: generate
///     options:
///       - name: output
///         argument_name: path
/// "#;
/// let manifest = CommandManifest::from_yaml_str(yaml).unwrap();
/// let mut parser = manifest.into_parser().unwrap();
///
/// let command = parser.parse(&["generate", "--output=dist"]).unwrap();
/// assert_eq!(command.option("output").unwrap().value(), Some("dist"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandManifest {
    /// Manifest format version.
    pub version: String,
    /// Optional manifest name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional manifest description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-level commands, in registration order.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl CommandManifest {
    /// Creates an empty manifest at [`MANIFEST_VERSION`].
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: None,
            description: None,
            commands: Vec::new(),
        }
    }

    /// Adds a top-level command.
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Finds a top-level command by name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a manifest, choosing JSON or YAML by file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnsupportedFormat`] for extensions other than
    /// `json`, `yaml` and `yml`, [`IoError`](ManifestError::IoError) if the
    /// file cannot be read, or a JSON/YAML error if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let manifest: Self = match format {
            ManifestFormat::Json => serde_json::from_reader(reader)?,
            ManifestFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        debug!(
            path = %path.display(),
            commands = manifest.commands.len(),
            "loaded command manifest"
        );
        Ok(manifest)
    }

    /// Saves the manifest, choosing JSON or YAML by file extension.
    ///
    /// # Errors
    ///
    /// Same conditions as [`load`](Self::load), for writing.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            ManifestFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            ManifestFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Registers every command with a new parser, in manifest order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Registration`] wrapping the first command the
    /// parser rejects.
    pub fn into_parser(self) -> Result<CommandParser, ManifestError> {
        let mut parser = CommandParser::new();
        for command in self.commands {
            parser.add_command(command)?;
        }
        Ok(parser)
    }
}

impl Default for CommandManifest {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ManifestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argument, CommandOption, Error, ParserError};

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
name: site-tool
commands:
  - name: generate
    help_text: Generate the site
    options:
      - name: force
      - name: output
        argument_name: path
    arguments:
      - name: source
    sub_commands:
      - name: drafts
  - name: serve
"#
    }

    fn sample_manifest() -> CommandManifest {
        CommandManifest::new()
            .with_command(
                Command::new("generate")
                    .with_help_text("Generate the site")
                    .with_option(CommandOption::flag("force"))
                    .with_option(CommandOption::with_argument("output", "path"))
                    .with_argument(Argument::new("source")),
            )
            .with_command(Command::new("serve"))
    }

    #[test]
    fn test_deserialize_yaml() {
        let manifest = CommandManifest::from_yaml_str(sample_yaml()).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("site-tool"));
        assert_eq!(manifest.commands.len(), 2);

        let generate = manifest.command("generate").unwrap();
        assert_eq!(generate.help_text, "Generate the site");
        assert!(!generate.options[0].takes_argument());
        assert_eq!(generate.options[1].argument_name(), Some("path"));
        assert_eq!(generate.argument_names(), vec!["source"]);
        assert_eq!(generate.sub_command_names(), vec!["drafts"]);

        let serve = manifest.command("serve").unwrap();
        assert!(serve.options.is_empty());
        assert!(serve.help_text.is_empty());
    }

    #[test]
    fn test_into_parser_rejects_duplicates() {
        let manifest = CommandManifest::new()
            .with_command(Command::new("serve"))
            .with_command(Command::new("serve"));

        let err = manifest.into_parser().unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Registration(Error::Parser(ParserError::DuplicateCommand(ref name)))
                if name == "serve"
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = CommandManifest::load("commands.toml").unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let original = sample_manifest();

        for file in ["commands.json", "commands.yaml"] {
            let path = dir.path().join(file);
            original.save(&path).unwrap();
            let loaded = CommandManifest::load(&path).unwrap();
            assert_eq!(loaded, original, "{file}");
        }
    }
}
