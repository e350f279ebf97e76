//! proto-regen - regenerates API documents and stubs from protobuf trees
//!
//! Protobuf sources are discovered per directory, each directory becomes a
//! package whose identity is derived from its path below the `proto`
//! sentinel, an `option go_package` line is injected where missing, and
//! `protoc` is run to produce OpenAPI documents and/or Go stubs.

pub mod app;
pub mod compiler;
pub mod config;
pub mod declaration;
pub mod directive;
pub mod error;
pub mod fs;
pub mod paths;
pub mod pipeline;
pub mod scanner;

// Re-exports for convenience
pub use compiler::{Invocation, OutputMode, Protoc, SchemaCompiler};
pub use config::Config;
pub use declaration::{build_declarations, Declaration};
pub use directive::{inject_all, inject_directive, InjectOutcome};
pub use error::{RegenError, RegenResult};
pub use paths::{document_output_path, locate_package, PackageLocation};
pub use pipeline::{DocumentOutcome, GenerationPipeline, GenerationReport};
pub use scanner::{SourceGroups, SourceScanner};
