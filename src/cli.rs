//! Command-line entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use crate::config::{Command, Config};
use crate::format::format;
use crate::lsp::server::serve;
use crate::samples::SampleManager;
use crate::transform::{CommandEngine, Workbench};
use crate::validation::engine::DiagnosticsAggregator;

/// Parse arguments, set up logging and dispatch the subcommand
pub async fn run() -> Result<ExitCode> {
    let config = Config::from_args_and_env()?;
    init_logging(&config.log_level);

    if let Some(path) = &config.project_config_path {
        log::info!("Using project config {}", path.display());
    }

    match config.command.clone() {
        Command::Serve => serve(config).await.map(|_| ExitCode::SUCCESS),
        Command::Check { files } => check(&config, &files),
        Command::Fmt { file, write } => fmt(&config, &file, write),
        Command::Transform { stylesheet, source } => transform(&config, &stylesheet, &source),
        Command::Samples { name } => samples(&config, name.as_deref()).await,
    }
}

/// Log to stderr; stdout carries the protocol or the command output
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn check(config: &Config, files: &[PathBuf]) -> Result<ExitCode> {
    let aggregator = DiagnosticsAggregator::new(config.severity_filter);
    let mut reported = 0usize;

    for path in files {
        let content = read(path)?;
        for d in aggregator.collect(&content) {
            println!(
                "{}:{}:{}: {}: {}",
                path.display(),
                d.start_line,
                d.start_column,
                d.severity,
                d.message
            );
            reported += 1;
        }
    }

    log::debug!("Checked {} files, {} diagnostics", files.len(), reported);
    Ok(if reported == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn fmt(config: &Config, file: &Path, write: bool) -> Result<ExitCode> {
    let formatted = format(&read(file)?, config.format_style);
    if write {
        std::fs::write(file, formatted + "\n")
            .with_context(|| format!("Failed to write {}", file.display()))?;
    } else {
        println!("{}", formatted);
    }
    Ok(ExitCode::SUCCESS)
}

fn transform(config: &Config, stylesheet: &Path, source: &Path) -> Result<ExitCode> {
    let engine = CommandEngine::from_settings(&config.transform);
    let mut workbench = Workbench::new(
        Box::new(engine),
        DiagnosticsAggregator::new(config.severity_filter),
    )
    .with_format_style(config.format_style);

    workbench.set_source(read(source)?);
    for d in workbench.set_stylesheet(read(stylesheet)?) {
        log::warn!(
            "{}:{}:{}: {}",
            stylesheet.display(),
            d.start_line,
            d.start_column,
            d.message
        );
    }

    match workbench.run() {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn samples(config: &Config, name: Option<&str>) -> Result<ExitCode> {
    let manager = SampleManager::new(config);
    manager.load().await;
    let registry = manager.snapshot().await;

    let Some(name) = name else {
        for name in registry.names() {
            let description = registry
                .get(&name)
                .and_then(|s| s.description.as_deref())
                .unwrap_or_default();
            println!("{:<10} {}", name, description);
        }
        return Ok(ExitCode::SUCCESS);
    };

    let Some(sample) = registry.get(name) else {
        bail!(
            "Unknown sample '{}'. Available: {}",
            name,
            registry.names().join(", ")
        );
    };
    println!("<!-- {}: source -->\n{}\n", sample.name, sample.xml);
    println!("<!-- {}: stylesheet -->\n{}", sample.name, sample.xslt);
    Ok(ExitCode::SUCCESS)
}
