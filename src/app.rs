//! One full regeneration run: copy, scan, declare, inject, generate

use crate::compiler::{Protoc, SchemaCompiler};
use crate::config::Config;
use crate::declaration::build_declarations;
use crate::directive::inject_all;
use crate::error::RegenResult;
use crate::fs::{copy_directory, create_if_not_exists};
use crate::pipeline::{GenerationPipeline, GenerationReport};
use crate::scanner::SourceScanner;

/// Run with the configured `protoc` binary
pub fn run(config: &Config) -> RegenResult<GenerationReport> {
    let compiler = Protoc::new(config.compiler.program.as_str());
    run_with(config, &compiler)
}

/// Run with any compiler implementation
pub fn run_with<C: SchemaCompiler>(config: &Config, compiler: &C) -> RegenResult<GenerationReport> {
    let paths = &config.paths;

    if paths.copy_input {
        create_if_not_exists(&paths.work, 0o755)?;
        let copied = copy_directory(&paths.input, &paths.work)?;
        tracing::info!(
            from = %paths.input.display(),
            to = %paths.work.display(),
            files = copied,
            "copied input tree"
        );
    }

    let groups = SourceScanner::from_layout(&config.layout).scan(&paths.work)?;
    let declarations = build_declarations(groups, &config.layout.sentinel)?;
    tracing::info!(declarations = declarations.len(), "discovered packages");

    let pipeline = GenerationPipeline::new(compiler, config);
    pipeline.check_document_outputs(&declarations)?;

    let injected = inject_all(&declarations)?;
    tracing::info!(files = injected, "injected go_package options");

    tracing::info!(compiler = compiler.name(), "starting generation");
    let mut report = pipeline.run(&declarations)?;
    report.directives_injected = injected;

    Ok(report)
}
