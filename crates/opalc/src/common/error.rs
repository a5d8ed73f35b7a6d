//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use super::Span;

/// A syntax error raised while parsing a token stream.
///
/// The parser performs no recovery: the first error aborts the whole
/// parse and no partial tree is returned to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("malformed type: {message} at {span}")]
    TypeSyntax { message: String, span: Span },

    #[error("variadic parameter must be the last parameter at {span}")]
    MisplacedVariadic { span: Span },

    #[error("`..` is only allowed as the final element of a pattern at {span}")]
    TrailingRestMisplaced { span: Span },

    #[error("`try` requires at least one `catch` clause or a `finally` block at {span}")]
    DanglingTry { span: Span },

    #[error("unterminated string or character literal at {span}")]
    UnterminatedLiteral { span: Span },
}

impl SyntaxError {
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl ToString,
        span: Span,
    ) -> Self {
        Self::UnexpectedToken {
            expected: expected.into(),
            found: found.to_string(),
            span,
        }
    }

    pub fn type_syntax(message: impl Into<String>, span: Span) -> Self {
        Self::TypeSyntax {
            message: message.into(),
            span,
        }
    }

    /// The source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::TypeSyntax { span, .. }
            | Self::MisplacedVariadic { span }
            | Self::TrailingRestMisplaced { span }
            | Self::DanglingTry { span }
            | Self::UnterminatedLiteral { span } => *span,
        }
    }
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &SyntaxError) {
        let diagnostic = self.diagnostic_for(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    fn diagnostic_for(&self, file_id: usize, error: &SyntaxError) -> Diagnostic<usize> {
        let headline = match error {
            SyntaxError::UnexpectedToken { .. } => "Syntax error",
            SyntaxError::TypeSyntax { .. } => "Type syntax error",
            SyntaxError::MisplacedVariadic { .. } => "Misplaced variadic parameter",
            SyntaxError::TrailingRestMisplaced { .. } => "Misplaced rest pattern",
            SyntaxError::DanglingTry { .. } => "Dangling try",
            SyntaxError::UnterminatedLiteral { .. } => "Unterminated literal",
        };

        let label = match error {
            SyntaxError::UnexpectedToken {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
            SyntaxError::TypeSyntax { message, .. } => message.clone(),
            SyntaxError::MisplacedVariadic { .. } => {
                "only the last parameter may be variadic".to_string()
            }
            SyntaxError::TrailingRestMisplaced { .. } => {
                "`..` must be the final element".to_string()
            }
            SyntaxError::DanglingTry { .. } => {
                "add a `catch` clause or a `finally` block".to_string()
            }
            SyntaxError::UnterminatedLiteral { .. } => "literal never closed".to_string(),
        };

        Diagnostic::error()
            .with_message(headline)
            .with_labels(vec![
                Label::primary(file_id, error.span()).with_message(label),
            ])
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_expectation() {
        let err = SyntaxError::unexpected("`;`", "`}`", Span::new(4, 5));
        assert_eq!(err.to_string(), "expected `;`, found `}` at 4..5");
        assert_eq!(err.span(), Span::new(4, 5));
    }

    #[test]
    fn test_taxonomy_spans() {
        let span = Span::new(10, 12);
        for err in [
            SyntaxError::type_syntax("mismatched `<`", span),
            SyntaxError::MisplacedVariadic { span },
            SyntaxError::TrailingRestMisplaced { span },
            SyntaxError::DanglingTry { span },
            SyntaxError::UnterminatedLiteral { span },
        ] {
            assert_eq!(err.span(), span);
        }
    }
}
