//! LSP Protocol Implementation
//!
//! Thin protocol layer over validation, formatting and transformation.

pub mod backend;
pub mod handlers;
pub mod server;

pub use backend::Backend;
