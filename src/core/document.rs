//! Document Management
//!
//! Latest full text of every open document, keyed by URI.

use std::collections::HashMap;

use tower_lsp::lsp_types::Url;

/// State for each open document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub content: String,
    pub version: i32,
}

/// Open documents. Each change replaces the stored text wholesale.
#[derive(Debug, Default)]
pub struct DocumentManager {
    documents: HashMap<Url, DocumentState>,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, uri: Url, content: String, version: i32) {
        self.documents
            .insert(uri, DocumentState { content, version });
    }

    /// Replace the text of a document; unknown URIs are opened implicitly
    pub fn update(&mut self, uri: Url, content: String, version: i32) {
        self.open(uri, content, version);
    }

    pub fn close(&mut self, uri: &Url) -> Option<DocumentState> {
        self.documents.remove(uri)
    }

    pub fn get(&self, uri: &Url) -> Option<&DocumentState> {
        self.documents.get(uri)
    }

    pub fn content(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.content.clone())
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
