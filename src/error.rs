//! Error types for parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Fatal grammar-level failures. Anything that makes the parenthesis
/// structure unusable aborts the run before extraction starts.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unbalanced parentheses at {span:?}: {message}")]
    Unbalanced { span: Span, message: String },

    #[error("no expression found in input")]
    EmptyInput,
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Unbalanced { span, message } => {
                let mut buf = Vec::new();
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message("unbalanced parentheses")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
                    .map(|()| String::from_utf8_lossy(&buf).into_owned())
                    .unwrap_or_else(|_| self.to_string())
            }
            ParseError::EmptyInput => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_the_file() {
        let err = ParseError::Unbalanced {
            span: 4..5,
            message: "unmatched ')'".to_string(),
        };
        let rendered = err.format("(a) )", "broken.kicad_sch");
        assert!(rendered.contains("broken.kicad_sch"));
        assert!(rendered.contains("unmatched ')'"));
    }

    #[test]
    fn test_empty_input_formats_without_report() {
        let rendered = ParseError::EmptyInput.format("", "empty.kicad_sch");
        assert_eq!(rendered, "no expression found in input");
    }
}
