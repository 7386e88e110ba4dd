//! Recursive-descent parser over the flat token stream.
//!
//! The parser never fails: every input produces a complete tree covering
//! every byte of the source, with unparseable stretches wrapped in `Error`
//! nodes and described by diagnostics. Structure:
//!
//! - [`core`]: the `Parser` state machine - token cursor, trivia buffering,
//!   tree builder plumbing, error/recovery primitives, the recursion guard
//!   and the direct-constructor re-lex hook.
//! - [`grammar`]: the productions, as `impl Parser` blocks split by area
//!   (module structure, expressions, constructors, types, names).
//! - [`invariants`]: debug-only progress assertions.
//!
//! Every diagnostic is paired positionally with an `Error` node; see the
//! `diagnostics` module for the contract.

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

use rowan::GreenNode;

use crate::diagnostics::Diagnostics;
use crate::dialect::Dialect;
use crate::lexer::Token;

pub(crate) use self::core::Parser;

/// Parses a token stream into a green tree plus its diagnostics.
pub(crate) fn parse(
    source: &str,
    tokens: Vec<Token>,
    dialect: Dialect,
) -> (GreenNode, Diagnostics) {
    let mut parser = Parser::new(source, tokens, dialect);
    parser.parse_module();
    parser.finish()
}
