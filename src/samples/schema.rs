//! TOML layout of sample files.

use serde::{Deserialize, Serialize};

/// One source document paired with a stylesheet
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sample {
    pub name: String,
    pub description: Option<String>,
    pub xml: String,
    pub xslt: String,
}

/// A sample file: any number of `[[samples]]` tables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SampleFile {
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl SampleFile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
