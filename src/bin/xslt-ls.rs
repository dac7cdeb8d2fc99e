use std::process::ExitCode;

use anyhow::Result;
use xslt_language_server::cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    cli::run().await
}
