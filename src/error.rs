use crate::utils::position_indicator;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum GcppError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Encoding(#[from] EncodingError),
}

/// A failure of a grammar rule while parsing a signature string.
///
/// Carries the offending byte offset into the (trimmed) input so hosts can
/// render a position-indicated diagnostic.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("invalid definition: {message} [error at {offset}]")]
#[diagnostic(
    code(gcpp::grammar),
    help("The signature could not be parsed as a C++ declaration of this category.")
)]
pub struct GrammarError {
    pub message: String,
    pub offset: usize,
    #[source_code]
    pub input: String,
    #[label("error occurred here")]
    pub span: SourceSpan,
}

impl GrammarError {
    pub fn new(message: impl Into<String>, input: &str, offset: usize) -> Self {
        GrammarError {
            message: message.into(),
            offset,
            input: input.to_string(),
            span: (offset, 0).into(),
        }
    }

    /// Merges the diagnostics of a failed two-attempt parse into one error,
    /// keeping the second attempt's position.
    pub fn combined(context: &str, first: &GrammarError, second: &GrammarError) -> Self {
        GrammarError {
            message: format!(
                "{context}\nFirst attempt: {}\nSecond attempt: {}",
                first.message, second.message
            ),
            offset: second.offset,
            input: second.input.clone(),
            span: second.span,
        }
    }

    /// Plain-text rendering with a caret indicator, for hosts that do not
    /// use a miette report handler.
    pub fn indicated(&self) -> String {
        format!(
            "invalid definition: {} [error at {}]\n{}",
            self.message,
            self.offset,
            position_indicator(&self.input, self.offset)
        )
    }
}

/// An identifier-encoding request outside the supported finite tables.
///
/// This is always an internal grammar/encoding table mismatch, never a user
/// input error: the parser must only construct nodes the tables can encode.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("fundamental type \"{0}\" cannot be mapped to an identifier")]
    #[diagnostic(code(gcpp::encoding::fundamental_type))]
    UnknownFundamentalType(String),

    #[error("built-in operator \"{0}\" cannot be mapped to an identifier")]
    #[diagnostic(code(gcpp::encoding::operator))]
    UnknownOperator(String),

    #[error("declaration does not introduce a name")]
    #[diagnostic(code(gcpp::encoding::unnamed))]
    UnnamedDeclaration,
}
