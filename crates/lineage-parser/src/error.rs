//! Error and diagnostic types for the Lineage reader.
//!
//! The reader reports every malformed line it finds rather than stopping at
//! the first one. Each problem is a [`Diagnostic`] with labeled source spans
//! and optional help text; all diagnostics of one run are wrapped in a
//! [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use lineage_parser::{Span, error::Diagnostic};
//! let diag = Diagnostic::error("relation outside of a family")
//!     .with_label(Span::new(0..12), "this relation")
//!     .with_help("start the document with a family name line");
//! assert_eq!(diag.labels().len(), 1);
//! ```

mod diagnostic;
mod parse_error;

pub use diagnostic::{Diagnostic, Label};
pub use parse_error::ParseError;
