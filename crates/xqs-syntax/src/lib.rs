//! XQuery syntax parser producing a lossless concrete syntax tree.
//!
//! Parses XQuery 1.0, 3.0, 3.1 and 4.0 (Editor's Draft) source into a rowan
//! green tree that preserves every byte of the input, including whitespace,
//! comments and invalid characters. Parsing never fails: syntax errors become
//! `Error` nodes in the tree, each paired with a [`SyntaxError`] diagnostic
//! carrying a stable code, a byte range and a message.
//!
//! # Example
//!
//! ```
//! use xqs_syntax::{Dialect, parse_text};
//!
//! let parse = parse_text("for $x in (1, 2) return $x * 2", Dialect::Xquery31);
//! assert!(parse.ok());
//! println!("{}", parse.dump());
//! ```

pub mod cst;
pub mod diagnostics;
pub mod dialect;
pub mod dump;
pub mod lexer;
mod parser;

pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, ErrorKind, SyntaxError};
pub use dialect::Dialect;
pub use lexer::{Token, lex, token_text};

use rowan::GreenNode;

/// Result of one parse: the green tree plus its diagnostics.
///
/// The tree always exists and always covers the entire input; [`Parse::ok`]
/// tells whether it is error-free.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    errors: Diagnostics,
    dialect: Dialect,
}

impl Parse {
    /// Red tree root. Construction is cheap; the green tree is shared.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn errors(&self) -> &Diagnostics {
        &self.errors
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Canonical tree dump; see [`dump`](crate::dump) for the format.
    pub fn dump(&self) -> String {
        dump::dump(&self.syntax(), &self.errors)
    }
}

/// Parses a pre-lexed token stream. `source` must be the text the tokens
/// were lexed from; token spans index into it.
pub fn parse(source: &str, tokens: Vec<Token>, dialect: Dialect) -> Parse {
    let (green, errors) = parser::parse(source, tokens, dialect);
    Parse {
        green,
        errors,
        dialect,
    }
}

/// Lexes and parses in one step.
pub fn parse_text(source: &str, dialect: Dialect) -> Parse {
    parse(source, lexer::lex(source), dialect)
}
