//! Lineage CLI library
//!
//! This module contains the core CLI logic for the Lineage layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::info;

use lineage::{LayoutEngine, LineageError};

/// Run the Lineage CLI application
///
/// This function lays out the input document and writes the positioned
/// family blocks to the output file as JSON.
///
/// # Errors
///
/// Returns `LineageError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), LineageError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let engine = LayoutEngine::new(app_config);
    let document = engine.parse(&source)?;
    let font_ratio = args
        .font_ratio
        .unwrap_or_else(|| engine.config().layout().font_ratio());
    let families = engine.align(&document, font_ratio)?;

    let json = serde_json::to_string_pretty(&families).map_err(io::Error::from)?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output, families = families.len(); "Layout exported successfully");

    Ok(())
}
