//! Syntax diagnostics.
//!
//! Every diagnostic the parser emits is paired with exactly one `Error` node
//! in the tree, in document order. The pairing is positional: the n-th
//! diagnostic belongs to the n-th `Error` node encountered in a preorder
//! walk. Keeping messages out of the tree keeps the green nodes lossless;
//! keeping the pairing ordered keeps lookups trivial.

mod printer;


use rowan::TextRange;
use serde::Serialize;
use thiserror::Error;

pub use printer::DiagnosticsPrinter;

/// Classification of a syntax diagnostic.
///
/// The kind selects the error code and the fallback message; most call sites
/// override the message with context-specific wording, which golden tests
/// compare literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A token or construct required by the grammar is absent. Always paired
    /// with a zero-width `Error` node at the position the construct belongs.
    Missing,
    /// Input the grammar cannot place; the offending tokens are wrapped in
    /// the paired `Error` node and skipped.
    UnexpectedToken,
    /// An opening delimiter whose closer never arrived.
    UnclosedDelimiter,
    /// A character no XQuery token can start with.
    InvalidCharacter,
    /// Structurally impossible nesting, like a closing tag that does not
    /// match the open element.
    InvalidNesting,
    /// A construct from a newer dialect than the one selected.
    UnsupportedSyntax,
    /// A `version` declaration naming a version no dialect matches.
    UnsupportedVersion,
}

impl ErrorKind {
    /// Stable error code, aligned with the XQuery specification's codes.
    /// All syntax errors share XPST0003; only the version check differs.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedVersion => "XQST0031",
            _ => "XPST0003",
        }
    }

    pub fn fallback_message(self) -> &'static str {
        match self {
            ErrorKind::Missing => "expected expression",
            ErrorKind::UnexpectedToken => "unexpected token",
            ErrorKind::UnclosedDelimiter => "unclosed delimiter",
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::InvalidNesting => "mismatched closing tag",
            ErrorKind::UnsupportedSyntax => "syntax not available in this version",
            ErrorKind::UnsupportedVersion => "unsupported XQuery version",
        }
    }
}

/// A single syntax diagnostic: what went wrong, where, in which words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{} at {}..{}: {message}", .kind.code(), u32::from(.range.start()), u32::from(.range.end()))]
pub struct SyntaxError {
    pub kind: ErrorKind,
    #[serde(serialize_with = "serialize_range")]
    pub range: TextRange,
    pub message: String,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

fn serialize_range<S: serde::Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut st = s.serialize_struct("TextRange", 2)?;
    st.serialize_field("start", &u32::from(range.start()))?;
    st.serialize_field("end", &u32::from(range.end()))?;
    st.end()
}

/// Ordered collection of syntax diagnostics.
///
/// Order is document order and must match the preorder position of `Error`
/// nodes in the tree; the parser is the only writer and maintains this.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    errors: Vec<SyntaxError>,
}

/// In-flight diagnostic; dropped silently unless `.emit()` is called.
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    error: SyntaxError,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic with the kind's fallback message. Call
    /// `.message()` on the builder to override.
    pub fn report(&mut self, kind: ErrorKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            error: SyntaxError::new(kind, range, kind.fallback_message()),
            diagnostics: self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<SyntaxError> {
        self.errors
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl DiagnosticBuilder<'_> {
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.error.message = msg.into();
        self
    }

    pub fn emit(self) {
        self.diagnostics.errors.push(self.error);
    }
}
