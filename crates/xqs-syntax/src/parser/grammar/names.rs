//! Qualified names: EQNames, wildcards, keyword-as-name handling.
//!
//! Every XQuery keyword is also a legal name, so name productions accept any
//! `NCName` token including ones the surrounding grammar just treated as
//! keywords. `prefix:local` must be written without whitespace around the
//! colon; a spaced form still parses as one `QName` but each gap is reported
//! separately.

use rowan::TextSize;

use crate::cst::SyntaxKind;
use crate::diagnostics::ErrorKind;

use super::super::core::Parser;

impl Parser<'_> {
    pub(in super::super) fn at_eqname(&mut self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::NCName | SyntaxKind::BracedUriLiteral
        )
    }

    /// `QName` node: `local`, `prefix:local`, or `Q{uri}local`.
    ///
    /// Emits a missing-name error (and no node) when the current token
    /// cannot start a name.
    pub(in super::super) fn parse_eqname(&mut self, what: &str) {
        match self.current() {
            SyntaxKind::BracedUriLiteral => {
                self.start_node(SyntaxKind::QName);
                let uri_end = self.current_span().end();
                self.bump();
                if self.at(SyntaxKind::NCName) {
                    self.flag_name_gap(uri_end, "whitespace is not allowed after `Q{...}`");
                    self.bump();
                } else {
                    self.error_missing(format!("expected local name in {what}"));
                }
                self.finish_node();
            }
            SyntaxKind::NCName => {
                self.start_node(SyntaxKind::QName);
                let prefix_end = self.current_span().end();
                self.bump();
                if self.at(SyntaxKind::Colon) {
                    self.flag_name_gap(prefix_end, "whitespace is not allowed before `:` in a qualified name");
                    let colon_end = self.current_span().end();
                    self.bump();
                    if self.at(SyntaxKind::NCName) {
                        self.flag_name_gap(colon_end, "whitespace is not allowed after `:` in a qualified name");
                        self.bump();
                    } else {
                        self.error_missing(format!("expected local name in {what}"));
                    }
                }
                self.finish_node();
            }
            _ => {
                self.error_missing(format!("expected {what}"));
            }
        }
    }

    /// Plain `NCName` (no colon allowed), used for namespace prefixes.
    pub(in super::super) fn parse_ncname(&mut self, what: &str) {
        if self.at(SyntaxKind::NCName) {
            self.bump();
        } else {
            self.error_missing(format!("expected {what}"));
        }
    }

    /// Reports a gap between two pieces that must be adjacent. One error per
    /// gap, so `a : b` yields two diagnostics.
    fn flag_name_gap(&mut self, prev_end: TextSize, message: &str) {
        let gap_start = self.current_span().start();
        if gap_start == prev_end {
            return;
        }
        self.error_here(
            ErrorKind::UnexpectedToken,
            rowan::TextRange::new(prev_end, gap_start),
            message,
        );
    }

    /// True when the tokens starting here form a wildcard name test:
    /// `*`, `*:local`, `prefix:*`, or `Q{uri}*`.
    pub(in super::super) fn at_wildcard(&mut self) -> bool {
        match self.current() {
            SyntaxKind::Star => true,
            SyntaxKind::NCName => {
                self.nth(1) == SyntaxKind::Colon && self.nth(2) == SyntaxKind::Star
            }
            SyntaxKind::BracedUriLiteral => self.nth(1) == SyntaxKind::Star,
            _ => false,
        }
    }

    /// `Wildcard` node for any of the four wildcard forms. The caller has
    /// checked `at_wildcard`.
    pub(in super::super) fn parse_wildcard(&mut self) {
        self.start_node(SyntaxKind::Wildcard);
        match self.current() {
            SyntaxKind::Star => {
                let star_end = self.current_span().end();
                self.bump();
                // `*:local` - a spaced colon still reads as the suffix form,
                // with each gap reported like in a qualified name.
                if self.at(SyntaxKind::Colon) && self.nth(1) == SyntaxKind::NCName {
                    self.flag_name_gap(star_end, "whitespace is not allowed before `:` in a wildcard");
                    let colon_end = self.current_span().end();
                    self.bump();
                    self.flag_name_gap(colon_end, "whitespace is not allowed after `:` in a wildcard");
                    self.bump();
                }
            }
            SyntaxKind::NCName => {
                // prefix:*
                let prefix_end = self.current_span().end();
                self.bump();
                self.flag_name_gap(prefix_end, "whitespace is not allowed before `:` in a wildcard");
                let colon_end = self.current_span().end();
                self.bump();
                self.flag_name_gap(colon_end, "whitespace is not allowed after `:` in a wildcard");
                self.bump();
            }
            SyntaxKind::BracedUriLiteral => {
                let uri_end = self.current_span().end();
                self.bump();
                self.flag_name_gap(uri_end, "whitespace is not allowed after `Q{...}`");
                self.bump();
            }
            _ => unreachable!("parse_wildcard called off a wildcard start"),
        }
        self.finish_node();
    }
}
