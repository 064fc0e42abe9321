//! The diagnostic type reported by the reader.

use std::fmt;

use crate::span::Span;

/// A message attached to a span of the source.
///
/// Primary labels mark the offending text; secondary labels add context
/// such as "family starts here".
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

/// A syntax error with source locations.
///
/// ```text
/// error: expected a family name or a relation
///   |
/// 4 | John Mary Bob
///   |           ^^^ unexpected text
///   |
///   = help: relations are written `Father + Mother = Child, Child`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        if let Some(span) = self.primary_span() {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_span_skips_secondary() {
        let diag = Diagnostic::error("broken")
            .with_secondary_label(Span::new(0..5), "family starts here")
            .with_label(Span::new(10..14), "here");

        assert_eq!(diag.primary_span(), Some(Span::new(10..14)));
        assert_eq!(diag.to_string(), "error: broken at 10..14");
    }

    #[test]
    fn test_help() {
        let diag = Diagnostic::error("broken").with_help("fix it");
        assert_eq!(diag.help(), Some("fix it"));
        assert_eq!(diag.to_string(), "error: broken");
    }
}
