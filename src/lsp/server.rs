use std::thread;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::config::Config;
use crate::lsp::backend::Backend;

/// Start the LSP server on stdio
pub async fn serve(config: Config) -> Result<()> {
    log::info!(
        "Starting xslt-language-server (diagnostics: {:?}, processor: {})",
        config.severity_filter,
        config.transform.program
    );

    // Under the integration test, exit after a short delay so the test can read stdout to EOF
    if std::env::var("XSLT_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let (service, socket) = LspService::build(move |client| Backend::new(client, config)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
