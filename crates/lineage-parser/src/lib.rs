//! # Lineage Parser
//!
//! Reader for the Lineage genealogy markup. This crate turns document text
//! into the [`DocumentGraph`] snapshot consumed by the layout engine.
//!
//! ## Usage
//!
//! ```
//! # use lineage_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "Smith\n\nJohn + Mary = Bob, Kate\n";
//!
//!     let graph = parse(source)?;
//!     assert_eq!(graph.families().len(), 1);
//!     Ok(())
//! }
//! ```

mod ast;
pub mod error;
mod index;
mod parser;
mod span;

pub use span::Span;

use lineage_core::document::DocumentGraph;
use log::info;

use error::ParseError;

/// Parse source text into a document snapshot.
///
/// 1. **Read** - Parse lines into families and relations
/// 2. **Resolve** - Map every person reference to its member identity
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic per malformed line.
pub fn parse(source: &str) -> Result<DocumentGraph, ParseError> {
    let document = parser::parse_document(source)?;
    info!(families = document.families.len(); "Document read");

    Ok(index::build_graph(&document))
}
