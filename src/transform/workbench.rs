//! Workbench
//!
//! Explicit application context for one editing session: the source
//! document, the stylesheet, the last output, the message log and the
//! collaborators that act on them.

use crate::core::diagnostics::Diagnostic;
use crate::format::{format, FormatStyle};
use crate::samples::{Sample, SampleRegistry};
use crate::transform::{MessageLog, TransformEngine};
use crate::validation::engine::DiagnosticsAggregator;

pub const OUTPUT_PLACEHOLDER: &str = "Press Run to see results...";
pub const SAMPLE_LOADED: &str = "Example loaded! Press Run to see results...";
pub const TRANSFORM_ERROR_HEADER: &str = "Transformation Error:";

/// Sample a new session opens with
pub const INITIAL_SAMPLE: &str = "basic";

pub struct Workbench {
    source: String,
    stylesheet: String,
    output: String,
    messages: MessageLog,
    diagnostics: Vec<Diagnostic>,
    engine: Box<dyn TransformEngine>,
    aggregator: DiagnosticsAggregator,
    format_style: FormatStyle,
}

impl Workbench {
    /// Open a session on the `basic` sample and run the initial validation
    /// pass. The output keeps its placeholder until the first run.
    pub fn new(engine: Box<dyn TransformEngine>, aggregator: DiagnosticsAggregator) -> Self {
        let (source, stylesheet) = SampleRegistry::with_builtins()
            .get(INITIAL_SAMPLE)
            .map(|sample| (sample.xml.clone(), sample.xslt.clone()))
            .unwrap_or_default();
        let mut workbench = Self {
            source,
            stylesheet,
            output: OUTPUT_PLACEHOLDER.to_string(),
            messages: MessageLog::new(),
            diagnostics: Vec::new(),
            engine,
            aggregator,
            format_style: FormatStyle::default(),
        };
        workbench.revalidate();
        workbench
    }

    pub fn with_format_style(mut self, style: FormatStyle) -> Self {
        self.format_style = style;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Surfaced diagnostics for the current stylesheet
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
    }

    /// Replace the stylesheet and return the new surfaced diagnostics
    pub fn set_stylesheet(&mut self, text: impl Into<String>) -> &[Diagnostic] {
        self.stylesheet = text.into();
        self.revalidate();
        &self.diagnostics
    }

    fn revalidate(&mut self) {
        self.aggregator
            .refresh(&self.stylesheet, &mut self.diagnostics);
    }

    /// Transform the source with the stylesheet.
    ///
    /// The output always reflects the run: the result on success, an error
    /// banner with the message on failure. Returns the failure message.
    pub fn run(&mut self) -> Result<&str, String> {
        self.messages
            .info("Transformation: Starting XSLT processing...");

        match self.engine.transform(&self.stylesheet, &self.source) {
            Ok(result) => {
                self.output = result;
                self.messages
                    .success("Transformation: Completed successfully");
                Ok(&self.output)
            }
            Err(e) => {
                let message = e.user_message();
                self.output = format!("{}\n{}", TRANSFORM_ERROR_HEADER, message);
                self.messages
                    .error(format!("Transformation: {}", message));
                Err(message)
            }
        }
    }

    pub fn format_source(&mut self) {
        self.source = format(&self.source, self.format_style);
    }

    pub fn format_stylesheet(&mut self) -> &[Diagnostic] {
        let formatted = format(&self.stylesheet, self.format_style);
        self.set_stylesheet(formatted)
    }

    pub fn format_output(&mut self) {
        self.output = format(&self.output, self.format_style);
    }

    /// Replace both documents with a sample and reset the output
    pub fn load_sample(&mut self, sample: &Sample) -> &[Diagnostic] {
        self.source = sample.xml.clone();
        self.output = SAMPLE_LOADED.to_string();
        self.set_stylesheet(sample.xslt.clone())
    }
}
