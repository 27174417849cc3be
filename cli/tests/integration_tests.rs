use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "cmdargs_cli_test_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const SITE_MANIFEST: &str = r#"
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
  - name: remote
    help_text: Manage remotes
    sub_commands:
      - name: add
        arguments:
          - name: url
"#;

fn write_manifest(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).expect("failed to write manifest");
    path
}

fn cmdargs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdargs"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cmdargs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_invocation_as_json() {
    let dir = TempDir::new("parse_json");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&[
        "parse",
        "--manifest",
        manifest.to_str().unwrap(),
        "--",
        "generate",
        "--force",
        "--output=",
        "content",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["command"], "generate");
    assert_eq!(json["options"][0]["name"], "force");
    assert_eq!(json["options"][1]["name"], "output");
    assert_eq!(json["options"][1]["value"], "");
    assert_eq!(json["arguments"][0]["value"], "content");
}

#[test]
fn parse_resolves_sub_command_as_yaml() {
    let dir = TempDir::new("parse_yaml");
    let manifest = write_manifest(&dir, "site.yml", SITE_MANIFEST);

    let output = cmdargs(&[
        "parse",
        "--manifest",
        manifest.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "remote",
        "add",
        "https://example.com/repo.git",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let yaml: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(yaml["command"].as_str(), Some("remote"));
    assert_eq!(yaml["sub_command"]["command"].as_str(), Some("add"));
    assert_eq!(
        yaml["sub_command"]["arguments"][0]["value"].as_str(),
        Some("https://example.com/repo.git")
    );
}

#[test]
fn parse_reports_mismatch_with_usage() {
    let dir = TempDir::new("parse_error");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&[
        "parse",
        "--manifest",
        manifest.to_str().unwrap(),
        "--",
        "generate",
        "--output",
        "content",
    ]);
    assert!(!output.status.success());

    let err = stderr(&output);
    assert!(err.contains("USAGE:"), "stderr: {err}");
    assert!(err.contains("generate [--force] [--output=<path>] <source>"), "stderr: {err}");
    assert!(err.contains("error: option `--output` of command `generate` requires an argument"));
}

#[test]
fn parse_reports_sub_command_mismatch_with_its_usage() {
    let dir = TempDir::new("parse_sub_error");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&[
        "parse",
        "--manifest",
        manifest.to_str().unwrap(),
        "--",
        "remote",
        "add",
        "https://example.com/repo.git",
        "extra",
    ]);
    assert!(!output.status.success());

    let err = stderr(&output);
    assert!(err.contains("USAGE:\n    add <url>\n"), "stderr: {err}");
    assert!(!err.contains("remote [<subcommand>]"), "stderr: {err}");
    assert!(err.contains("error: invalid arguments for command `add`"), "stderr: {err}");
}

#[test]
fn parse_unknown_command_fails() {
    let dir = TempDir::new("parse_unknown");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&["parse", "--manifest", manifest.to_str().unwrap(), "--", "deploy"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: no such command: deploy"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_valid_manifest() {
    let dir = TempDir::new("validate_ok");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&["validate", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("2 command(s) valid."));
}

#[test]
fn validate_reports_nested_problems() {
    let dir = TempDir::new("validate_bad");
    let manifest = write_manifest(
        &dir,
        "bad.json",
        r#"{
  "version": "1.0",
  "commands": [
    { "name": "git", "sub_commands": [
        { "name": "remote", "options": [{ "name": "dry-run" }] }
    ] },
    { "name": "git" }
  ]
}"#,
    );

    let output = cmdargs(&["validate", manifest.to_str().unwrap()]);
    assert!(!output.status.success());

    let err = stderr(&output);
    assert!(err.contains("invalid command \"git remote\""), "stderr: {err}");
    assert!(err.contains("duplicate command: git"), "stderr: {err}");
    assert!(err.contains("error: 2 problem(s) found"), "stderr: {err}");
}

#[test]
fn validate_rejects_unknown_extension() {
    let dir = TempDir::new("validate_ext");
    let manifest = write_manifest(&dir, "site.toml", "version = \"1.0\"");

    let output = cmdargs(&["validate", manifest.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unsupported manifest format"));
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

#[test]
fn usage_lists_commands() {
    let dir = TempDir::new("usage_list");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&["usage", "--manifest", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "COMMANDS:\n    generate    Generate the site\n    remote      Manage remotes\n"
    );
}

#[test]
fn usage_describes_one_command() {
    let dir = TempDir::new("usage_one");
    let manifest = write_manifest(&dir, "site.yaml", SITE_MANIFEST);

    let output = cmdargs(&["usage", "--manifest", manifest.to_str().unwrap(), "remote"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("remote [<subcommand>]"), "stdout: {text}");
    assert!(text.contains("SUBCOMMANDS:\n    add\n"), "stdout: {text}");
}
