//! Adapters implementing application ports.

mod document_loader;
mod environment;

pub use document_loader::DocumentLoader;
pub use environment::ProcessEnvironment;
