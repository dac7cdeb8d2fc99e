use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::Config;
use crate::core::document::DocumentManager;
use crate::lsp::handlers::{
    HandleDiagnostics, HandleExecuteCommand, HandleFormatting, GET_SAMPLE_COMMAND,
    LIST_SAMPLES_COMMAND, TRANSFORM_COMMAND,
};
use crate::samples::SampleManager;
use crate::validation::engine::DiagnosticsAggregator;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub documents: Arc<Mutex<DocumentManager>>,
    pub samples: Arc<Mutex<SampleManager>>,
    pub config: Config,
    pub aggregator: DiagnosticsAggregator,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        let samples = SampleManager::new(&config);
        let aggregator = DiagnosticsAggregator::new(config.severity_filter);

        Self {
            client,
            documents: Arc::new(Mutex::new(DocumentManager::new())),
            samples: Arc::new(Mutex::new(samples)),
            config,
            aggregator,
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_formatting_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![
                        TRANSFORM_COMMAND.to_string(),
                        LIST_SAMPLES_COMMAND.to_string(),
                        GET_SAMPLE_COMMAND.to_string(),
                    ],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "xslt-language-server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "xslt-language-server initialized")
            .await;

        // Sample loading touches the filesystem; keep it off the request path
        let samples = self.samples.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let mut manager = samples.lock().await;
            if let Err(e) = manager.initialize(Some(client.clone())).await {
                client
                    .log_message(
                        MessageType::ERROR,
                        format!("Failed to initialize sample manager: {:#}", e),
                    )
                    .await;
            }
        });
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.clone();

        let mut docs = self.documents.lock().await;
        docs.open(doc.uri, doc.text, doc.version);
        drop(docs); // Release the lock before calling publish_diagnostics

        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let version = params.text_document.version;

        // Full sync: the last change carries the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            docs.update(uri.clone(), change.text, version);
            drop(docs);

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.lock().await.close(&uri);
        self.clear_diagnostics(uri).await;
    }

    async fn formatting(
        &self,
        params: DocumentFormattingParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Vec<TextEdit>>> {
        self.handle_formatting(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Value>> {
        self.handle_execute_command(params).await
    }
}
