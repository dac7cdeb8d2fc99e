use serde_json::{json, Value};
use tower_lsp::jsonrpc::{Error as RpcError, Result as LspResult};
use tower_lsp::lsp_types::*;

use crate::core::diagnostics::{Diagnostic as XsltDiagnostic, Severity};
use crate::core::position::LineIndex;
use crate::format::format;
use crate::lsp::backend::Backend;
use crate::transform::{CommandEngine, MessageKind, Workbench};

/// Diagnostic source shown by clients
pub const DIAGNOSTIC_SOURCE: &str = "xslt-ls";

pub const TRANSFORM_COMMAND: &str = "xslt.transform";
pub const LIST_SAMPLES_COMMAND: &str = "xslt.listSamples";
pub const GET_SAMPLE_COMMAND: &str = "xslt.getSample";

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
    async fn clear_diagnostics(&self, uri: Url);
    fn create_lsp_diagnostic(&self, diagnostic: XsltDiagnostic) -> Diagnostic;
}

/// Trait for handling document formatting
#[tower_lsp::async_trait]
pub trait HandleFormatting {
    async fn handle_formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>>;
}

/// Trait for handling `workspace/executeCommand`
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(&self, params: ExecuteCommandParams)
        -> LspResult<Option<Value>>;
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate the stored text and replace the client's diagnostic set
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let Some(doc) = docs.get(&uri) else {
            return;
        };
        let version = doc.version;
        let surfaced = self.aggregator.collect(&doc.content);
        drop(docs);

        let diagnostics = surfaced
            .into_iter()
            .map(|d| self.create_lsp_diagnostic(d))
            .collect();

        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }

    async fn clear_diagnostics(&self, uri: Url) {
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    fn create_lsp_diagnostic(&self, diagnostic: XsltDiagnostic) -> Diagnostic {
        let severity = match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
        };

        Diagnostic::new(
            Range::new(
                lsp_position(diagnostic.start_line, diagnostic.start_column),
                lsp_position(diagnostic.end_line, diagnostic.end_column),
            ),
            Some(severity),
            None,
            Some(DIAGNOSTIC_SOURCE.to_string()),
            diagnostic.message,
            None,
            None,
        )
    }
}

/// 1-based line/column to a 0-based LSP position
fn lsp_position(line: usize, column: usize) -> Position {
    Position::new(
        line.saturating_sub(1) as u32,
        column.saturating_sub(1) as u32,
    )
}

/// Range covering the whole of `text`
pub fn full_range(text: &str) -> Range {
    let index = LineIndex::new(text);
    let last = index.line_count();
    Range::new(
        Position::new(0, 0),
        lsp_position(last, index.line_len(last) + 1),
    )
}

#[tower_lsp::async_trait]
impl HandleFormatting for Backend {
    async fn handle_formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> LspResult<Option<Vec<TextEdit>>> {
        let docs = self.documents.lock().await;
        let Some(content) = docs.content(&params.text_document.uri) else {
            return Ok(None);
        };
        drop(docs);

        let formatted = format(&content, self.config.format_style);
        if formatted == content {
            return Ok(Some(Vec::new()));
        }

        Ok(Some(vec![TextEdit::new(full_range(&content), formatted)]))
    }
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>> {
        match params.command.as_str() {
            TRANSFORM_COMMAND => self.execute_transform(&params.arguments).await,
            LIST_SAMPLES_COMMAND => {
                let names = self.samples.lock().await.list_names().await;
                Ok(Some(json!(names)))
            }
            GET_SAMPLE_COMMAND => {
                let name = string_argument(&params.arguments, 0, "sample name")?;
                let samples = self.samples.lock().await;
                match samples.get_sample(&name).await {
                    Some(loaded) => Ok(Some(json!(loaded.sample))),
                    None => Err(RpcError::invalid_params(format!(
                        "Unknown sample: {}",
                        name
                    ))),
                }
            }
            other => Err(RpcError::invalid_params(format!(
                "Unknown command: {}",
                other
            ))),
        }
    }
}

impl Backend {
    /// Run the configured processor on `[stylesheetUri, sourceUri]`
    async fn execute_transform(&self, arguments: &[Value]) -> LspResult<Option<Value>> {
        let stylesheet_uri = uri_argument(arguments, 0, "stylesheet URI")?;
        let source_uri = uri_argument(arguments, 1, "source URI")?;

        let stylesheet = self.document_text(&stylesheet_uri).await?;
        let source = self.document_text(&source_uri).await?;

        let engine = CommandEngine::from_settings(&self.config.transform);
        let aggregator = self.aggregator;
        let format_style = self.config.format_style;

        let (result, entries) = tokio::task::spawn_blocking(move || {
            let mut workbench = Workbench::new(Box::new(engine), aggregator)
                .with_format_style(format_style);
            workbench.set_source(source);
            workbench.set_stylesheet(stylesheet);
            let result = workbench.run().map(str::to_string);
            (result, workbench.messages().entries().to_vec())
        })
        .await
        .map_err(|e| {
            log::error!("Transformation task failed: {}", e);
            RpcError::internal_error()
        })?;

        for entry in entries {
            let kind = match entry.kind {
                MessageKind::Error => MessageType::ERROR,
                MessageKind::Info | MessageKind::Success => MessageType::INFO,
            };
            self.client.log_message(kind, entry.message).await;
        }

        let reply = match result {
            Ok(output) => json!({ "success": true, "output": output }),
            Err(message) => json!({ "success": false, "error": message }),
        };
        Ok(Some(reply))
    }

    /// Open document text, falling back to the file on disk
    async fn document_text(&self, uri: &Url) -> LspResult<String> {
        if let Some(content) = self.documents.lock().await.content(uri) {
            return Ok(content);
        }

        let path = uri
            .to_file_path()
            .map_err(|_| RpcError::invalid_params(format!("Not a file URI: {}", uri)))?;
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            RpcError::invalid_params(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

fn string_argument(arguments: &[Value], index: usize, what: &str) -> LspResult<String> {
    arguments
        .get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RpcError::invalid_params(format!("Missing {} argument", what)))
}

fn uri_argument(arguments: &[Value], index: usize, what: &str) -> LspResult<Url> {
    let raw = string_argument(arguments, index, what)?;
    Url::parse(&raw).map_err(|e| RpcError::invalid_params(format!("Invalid {}: {}", what, e)))
}
