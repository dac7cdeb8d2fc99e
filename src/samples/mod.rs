//! Sample Library
//!
//! Paired XML/XSLT documents for trying out stylesheets. A built-in set ships
//! with the binary; user and workspace TOML files add to it or override it.

pub mod manager;
pub mod registry;
pub mod schema;

pub use manager::{LoadedSample, SampleManager, SamplePriority};
pub use registry::SampleRegistry;
pub use schema::{Sample, SampleFile};
