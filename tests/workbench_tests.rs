//! Workbench sessions driven through the public API
use std::sync::{Arc, Mutex};

use xslt_language_server::core::diagnostics::SeverityFilter;
use xslt_language_server::samples::SampleRegistry;
use xslt_language_server::transform::workbench::{
    INITIAL_SAMPLE, OUTPUT_PLACEHOLDER, SAMPLE_LOADED,
};
use xslt_language_server::transform::{MessageKind, TransformError};
use xslt_language_server::{DiagnosticsAggregator, TransformEngine, Workbench};

/// Records what it was asked to transform and answers with a fixed result
struct Recorder {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    reply: Result<String, String>,
}

impl TransformEngine for Recorder {
    fn transform(&self, stylesheet: &str, source: &str) -> Result<String, TransformError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((stylesheet.to_string(), source.to_string()));
        self.reply.clone().map_err(TransformError::Failed)
    }
}

fn workbench(reply: Result<&str, &str>) -> (Workbench, Arc<Mutex<Vec<(String, String)>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let engine = Recorder {
        calls: calls.clone(),
        reply: reply.map(str::to_string).map_err(str::to_string),
    };
    let wb = Workbench::new(Box::new(engine), DiagnosticsAggregator::default());
    (wb, calls)
}

#[test]
fn test_sample_session() {
    let (mut wb, calls) = workbench(Ok("<report/>"));
    assert_eq!(wb.output(), OUTPUT_PLACEHOLDER);

    let registry = SampleRegistry::with_builtins();
    let sample = registry.get("basic").expect("basic sample");
    assert!(wb.load_sample(sample).is_empty());
    assert_eq!(wb.output(), SAMPLE_LOADED);

    assert_eq!(wb.run(), Ok("<report/>"));

    let calls = calls.lock().expect("calls lock");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, sample.xslt);
    assert_eq!(calls[0].1, sample.xml);
}

#[test]
fn test_new_session_runs_initial_sample() {
    let (mut wb, calls) = workbench(Ok("<report/>"));
    assert_eq!(wb.output(), OUTPUT_PLACEHOLDER);
    assert!(wb.diagnostics().is_empty());

    wb.run().expect("run initial sample");

    let registry = SampleRegistry::with_builtins();
    let sample = registry.get(INITIAL_SAMPLE).expect("initial sample");
    let calls = calls.lock().expect("calls lock");
    assert_eq!(calls[0], (sample.xslt.clone(), sample.xml.clone()));
}

#[test]
fn test_failed_run_is_reported() {
    let (mut wb, _) = workbench(Err("Error at line 3: XPST0003"));
    wb.set_source("<a/>");

    assert!(wb.run().is_err());
    assert!(wb.output().starts_with("Transformation Error:\n"));
    assert!(wb.output().ends_with("XPST0003"));

    let entries = wb.messages().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "Transformation: Starting XSLT processing...");
    assert_eq!(entries[1].kind, MessageKind::Error);
}

#[test]
fn test_successive_runs_replace_output() {
    let (mut wb, calls) = workbench(Ok("<done/>"));
    wb.run().expect("first run");
    wb.set_source("<changed/>");
    wb.run().expect("second run");

    assert_eq!(wb.output(), "<done/>");
    assert_eq!(calls.lock().expect("calls lock").len(), 2);
    assert_eq!(
        wb.messages()
            .entries()
            .iter()
            .filter(|e| e.kind == MessageKind::Success)
            .count(),
        2
    );
}

#[test]
fn test_stylesheet_diagnostics_follow_edits() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let engine = Recorder {
        calls,
        reply: Ok(String::new()),
    };
    let mut wb = Workbench::new(
        Box::new(engine),
        DiagnosticsAggregator::new(SeverityFilter::All),
    );

    let broken = include_str!("fixtures/broken.xsl");
    assert_eq!(wb.set_stylesheet(broken).len(), 4);

    let valid = include_str!("fixtures/valid.xsl");
    assert!(wb.set_stylesheet(valid).is_empty());
    assert!(wb.diagnostics().is_empty());
}

#[test]
fn test_format_stylesheet_revalidates() {
    let (mut wb, _) = workbench(Ok(""));
    let minified: String = include_str!("fixtures/valid.xsl")
        .lines()
        .map(str::trim)
        .collect();
    wb.set_stylesheet(minified);

    assert!(wb.format_stylesheet().is_empty());
    assert!(wb.stylesheet().lines().count() > 5);
}

#[cfg(unix)]
#[test]
fn test_command_engine_session() {
    use xslt_language_server::transform::CommandEngine;

    // `cat` stands in for a processor that echoes the source document
    let engine = CommandEngine::new("cat", vec!["{source}".to_string()]);
    let mut wb = Workbench::new(Box::new(engine), DiagnosticsAggregator::default());
    wb.set_source(include_str!("fixtures/source.xml"));
    wb.set_stylesheet(include_str!("fixtures/valid.xsl"));

    let output = wb.run().expect("cat succeeds").to_string();
    assert_eq!(output, include_str!("fixtures/source.xml"));

    wb.format_output();
    assert!(wb.output().contains("\n    <user id=\"1\" role=\"admin\">Alice</user>"));
}
