//! Tests for project configuration discovery and precedence
use std::fs;

use clap::Parser;
use xslt_language_server::config::{find_project_config, Args, Config, PROJECT_CONFIG_FILE};
use xslt_language_server::core::diagnostics::SeverityFilter;
use xslt_language_server::FormatStyle;

const PROJECT_CONFIG: &str = r#"
[diagnostics]
report_errors = true

[format]
style = "break"

[transform]
command = "saxon"
args = ["-xsl:{stylesheet}", "-s:{source}"]
"#;

fn args(argv: &[&str]) -> Args {
    Args::parse_from(std::iter::once("xslt-ls").chain(argv.iter().copied()))
}

#[test]
fn test_project_config_is_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), PROJECT_CONFIG).expect("write config");

    let config = Config::from_args_in(args(&[]), dir.path()).expect("create config");

    assert!(config.has_project_config());
    assert_eq!(config.severity_filter, SeverityFilter::All);
    assert_eq!(config.format_style, FormatStyle::Break);
    assert_eq!(config.transform.program, "saxon");
    assert_eq!(config.transform.args, vec!["-xsl:{stylesheet}", "-s:{source}"]);
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), PROJECT_CONFIG).expect("write config");
    let nested = dir.path().join("xsl").join("common");
    fs::create_dir_all(&nested).expect("create nested dirs");

    assert_eq!(
        find_project_config(&nested),
        Some(dir.path().join(PROJECT_CONFIG_FILE))
    );

    // Workspace samples live next to the project file, not in the subdirectory
    let config = Config::from_args_in(args(&[]), &nested).expect("create config");
    assert_eq!(
        config.workspace_sample_dirs[0],
        dir.path().join(".xslt-ls").join("samples")
    );
}

#[test]
fn test_command_line_overrides_project_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), PROJECT_CONFIG).expect("write config");

    let config = Config::from_args_in(
        args(&[
            "--format-style",
            "indent",
            "--transform-command",
            "xsltproc --nonet {stylesheet} {source}",
        ]),
        dir.path(),
    )
    .expect("create config");

    assert_eq!(config.format_style, FormatStyle::Indent);
    assert_eq!(config.transform.program, "xsltproc");
    assert_eq!(
        config.transform.args,
        vec!["--nonet", "{stylesheet}", "{source}"]
    );
    // Not overridable downwards from the command line
    assert_eq!(config.severity_filter, SeverityFilter::All);
}

#[test]
fn test_partial_project_config_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[format]\nstyle = \"break\"\n")
        .expect("write config");

    let config = Config::from_args_in(args(&[]), dir.path()).expect("create config");

    assert_eq!(config.format_style, FormatStyle::Break);
    assert_eq!(config.severity_filter, SeverityFilter::WarningsOnly);
    assert_eq!(config.transform.program, "xsltproc");
}

#[test]
fn test_invalid_project_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[format]\nstyle = \"sideways\"\n")
        .expect("write config");

    let err = Config::from_args_in(args(&[]), dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains(PROJECT_CONFIG_FILE));
}

#[test]
fn test_empty_transform_command_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(Config::from_args_in(args(&["--transform-command", " "]), dir.path()).is_err());
}
