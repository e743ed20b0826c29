//! A build-time compiler for GraphQL documents embedded in Svelte
//! components.
//!
//! [`compile()`] rewrites each component's `query(graphql`...`)`-style calls
//! to reference compiled artifacts and writes one artifact module per
//! document, describing its selection and connection metadata for the
//! runtime.

pub mod artifact;
pub mod ast;
mod compiler;
mod config;
pub mod document;
pub mod file_reader;
mod framework;
pub mod schema;
pub mod script;
pub mod source;
pub mod transform;
mod writer;

pub use compiler::CompileError;
pub use compiler::CompileReport;
pub use compiler::FileError;
pub use compiler::FileReport;
pub use compiler::TransformedFile;
pub use compiler::compile;
pub use config::CONNECTION_OPERATION_SUFFIXES;
pub use config::Config;
pub use config::Framework;
pub use framework::write_adapter;
pub use writer::FileWriter;
pub use writer::FsWriter;
pub use writer::MemoryWriter;
