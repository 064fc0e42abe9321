//! Rendering of [`LineageError`] through miette.
//!
//! A parse error is split into one [`Reportable`] per reader diagnostic so
//! each gets its own source snippet; every other error is reported as is.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, SourceCode,
    SourceSpan,
};

use lineage::LineageError;
use lineage_parser::{Span, error::Diagnostic};

/// One renderable problem.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A reader diagnostic together with the document it points into.
    Syntax { diag: &'a Diagnostic, src: &'a str },
    /// Any error without a source location.
    Error(&'a LineageError),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Syntax { diag, .. } => f.write_str(diag.message()),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Syntax { .. } => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self {
            Reportable::Syntax { .. } | Reportable::Error(LineageError::Parse { .. }) => "lineage::syntax",
            Reportable::Error(LineageError::Io(_)) => "lineage::io",
            Reportable::Error(LineageError::Config(_)) => "lineage::config",
            Reportable::Error(LineageError::Layout(_)) => "lineage::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Syntax { diag, .. } => diag.help().map(|h| Box::new(h) as Box<dyn fmt::Display>),
            Reportable::Error(LineageError::Config(_)) => Some(Box::new(
                "check the file passed with --config or found in lineage/config.toml",
            )),
            Reportable::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Syntax { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Syntax { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_owned());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split `err` into the problems to render, in order.
pub fn to_reportables(err: &LineageError) -> Vec<Reportable<'_>> {
    match err {
        LineageError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Syntax { diag, src })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}

/// Render every reportable of `err` as one graphical report each.
pub fn render(err: &LineageError) -> String {
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    for reportable in to_reportables(err) {
        if handler.render_report(&mut out, &reportable).is_err() {
            out.push_str(&reportable.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use lineage_parser::error::ParseError;

    use super::*;

    fn code(reportable: &Reportable<'_>) -> Option<String> {
        reportable.code().map(|c| c.to_string())
    }

    #[test]
    fn test_each_diagnostic_reported() {
        let diags = vec![
            Diagnostic::error("invalid relation")
                .with_label(Span::new(0..5), "here")
                .with_help("try this"),
            Diagnostic::error("invalid child list").with_label(Span::new(6..9), "there"),
        ];
        let err = LineageError::new_parse_error(ParseError::from(diags), "John +\n1.");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "invalid relation");
        assert_eq!(reportables[1].to_string(), "invalid child list");
        assert_eq!(code(&reportables[0]).as_deref(), Some("lineage::syntax"));
        assert_eq!(
            reportables[0].help().map(|h| h.to_string()).as_deref(),
            Some("try this")
        );
        assert!(reportables[1].help().is_none());
        assert!(reportables[0].source_code().is_some());
    }

    #[test]
    fn test_plain_error_reported_once() {
        let err = LineageError::Layout("font ratio must be a positive number, got 0".to_string());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Layout error: font ratio must be a positive number, got 0"
        );
        assert_eq!(code(&reportables[0]).as_deref(), Some("lineage::layout"));
        assert!(reportables[0].labels().is_none());
        assert!(reportables[0].source_code().is_none());
    }

    #[test]
    fn test_config_error_has_help() {
        let err = LineageError::Config("Missing configuration file: x.toml".to_string());
        let reportables = to_reportables(&err);

        assert_eq!(code(&reportables[0]).as_deref(), Some("lineage::config"));
        assert!(reportables[0].help().is_some());
    }

    #[test]
    fn test_render_one_report_per_diagnostic() {
        let diags = vec![
            Diagnostic::error("invalid relation").with_label(Span::new(0..4), "here"),
            Diagnostic::error("invalid child list").with_label(Span::new(7..9), "there"),
        ];
        let err = LineageError::new_parse_error(ParseError::from(diags), "John +\n1.");

        let out = render(&err);
        assert!(out.contains("invalid relation"));
        assert!(out.contains("invalid child list"));
        assert_eq!(out.matches("lineage::syntax").count(), 2);
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("error with labels")
            .with_label(Span::new(0..5), "primary")
            .with_secondary_label(Span::new(10..15), "secondary");
        let reportable = Reportable::Syntax {
            diag: &diag,
            src: "some source code",
        };

        let labels: Vec<_> = reportable.labels().expect("labels").collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary"));
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].offset(), 10);
    }
}
