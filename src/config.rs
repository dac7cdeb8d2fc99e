//! Configuration management for the XSLT language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration file (`.xslt-ls.toml`)
//! - Sample directory configuration
//!
//! Precedence: command line > project file > defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::core::diagnostics::SeverityFilter;
use crate::format::FormatStyle;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".xslt-ls.toml";

/// Command-line arguments for the XSLT language server
#[derive(Debug, Parser)]
#[command(name = "xslt-ls")]
#[command(about = "Language server and tools for XSLT stylesheets")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log level for the language server
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Additional sample directory, highest priority
    #[arg(long, global = true, help = "Directory containing sample TOML files")]
    pub sample_dir: Option<PathBuf>,

    /// Report errors as well as warnings
    #[arg(long, global = true)]
    pub report_errors: bool,

    /// Processor command line, e.g. "saxon -xsl:{stylesheet} -s:{source}"
    #[arg(long, global = true)]
    pub transform_command: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub format_style: Option<FormatStyle>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the language server on stdio (default)
    Serve,
    /// Validate stylesheets and print diagnostics
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Format a file
    Fmt {
        file: PathBuf,
        /// Rewrite the file instead of printing to stdout
        #[arg(long)]
        write: bool,
    },
    /// Apply a stylesheet to a source document
    Transform {
        #[arg(long)]
        stylesheet: PathBuf,
        #[arg(long)]
        source: PathBuf,
    },
    /// List samples, or print one
    Samples { name: Option<String> },
}

/// `.xslt-ls.toml` contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub diagnostics: DiagnosticsSection,
    pub format: FormatSection,
    pub transform: TransformSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSection {
    pub report_errors: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormatSection {
    pub style: Option<FormatStyle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransformSection {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project config: {}", path.display()))
    }
}

/// Search `start` and its ancestors for the project configuration file
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// External processor invocation
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSettings {
    pub program: String,
    /// `{stylesheet}` and `{source}` are replaced with file paths
    pub args: Vec<String>,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            program: "xsltproc".to_string(),
            args: vec!["{stylesheet}".to_string(), "{source}".to_string()],
        }
    }
}

impl TransformSettings {
    /// Split a whitespace-separated command line; `None` when empty
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub log_level: String,
    pub severity_filter: SeverityFilter,
    pub format_style: FormatStyle,
    pub transform: TransformSettings,
    /// User-global samples, `<config_dir>/xslt-ls/samples`
    pub user_sample_dir: Option<PathBuf>,
    /// Workspace samples in ascending priority
    pub workspace_sample_dirs: Vec<PathBuf>,
    pub project_config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, resolving the project
    /// file from the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Create configuration as if started in `dir`
    pub fn from_args_in(args: Args, dir: &Path) -> Result<Self> {
        let project_config_path = find_project_config(dir);
        let project = match &project_config_path {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::default(),
        };

        let report_errors = args.report_errors || project.diagnostics.report_errors.unwrap_or(false);
        let severity_filter = if report_errors {
            SeverityFilter::All
        } else {
            SeverityFilter::WarningsOnly
        };

        let format_style = args
            .format_style
            .or(project.format.style)
            .unwrap_or_default();

        let transform = match args.transform_command.as_deref() {
            Some(line) => TransformSettings::from_command_line(line)
                .context("--transform-command must name a program")?,
            None => project_transform(&project.transform),
        };

        let user_sample_dir = dirs::config_dir().map(|d| d.join("xslt-ls").join("samples"));

        let workspace_root = project_config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(dir);
        let mut workspace_sample_dirs = vec![workspace_root.join(".xslt-ls").join("samples")];
        if let Some(custom_dir) = args.sample_dir {
            workspace_sample_dirs.push(custom_dir);
        }

        Ok(Config {
            command: args.command.unwrap_or(Command::Serve),
            log_level: args.log_level,
            severity_filter,
            format_style,
            transform,
            user_sample_dir,
            workspace_sample_dirs,
            project_config_path,
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }
}

fn project_transform(section: &TransformSection) -> TransformSettings {
    let defaults = TransformSettings::default();
    match &section.command {
        Some(program) => TransformSettings {
            program: program.clone(),
            args: section.args.clone().unwrap_or(defaults.args),
        },
        None => TransformSettings {
            args: section.args.clone().unwrap_or(defaults.args),
            ..defaults
        },
    }
}
