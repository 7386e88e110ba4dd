//! Node constructors: direct XML syntax, string constructors and the
//! computed forms.
//!
//! Direct constructors are the one place the lexer cannot run ahead of the
//! grammar: `<` is a comparison operator until the grammar proves otherwise.
//! `parse_direct_constructor` re-tokenizes the constructor with the tag-aware
//! lexer modes before descending; nested elements are refined by the same
//! pass, so the inner productions consume refined tokens directly.

use rowan::TextRange;

use crate::cst::SyntaxKind;
use crate::diagnostics::ErrorKind;
use crate::dialect::Dialect;

use super::super::core::Parser;

impl Parser<'_> {
    /// Entry point for `<` in expression position.
    pub(in super::super) fn parse_direct_constructor(&mut self) {
        self.assert_current(SyntaxKind::Lt);
        self.relex_direct();
        self.parse_dir_elem();
    }

    /// `<name attrs> content </name>` or `<name attrs/>`. The current token
    /// is an already-refined `Lt`.
    fn parse_dir_elem(&mut self) {
        if !self.enter_recursion() {
            self.bail_out_deep();
            return;
        }

        self.start_node(SyntaxKind::DirElemConstructor);
        self.bump(); // <

        let open_name = self.peek_qname_text();
        if self.at_eqname() {
            self.parse_eqname("element name");
        } else {
            self.error_missing("expected element name after `<`");
        }

        if self.at_eqname() {
            self.parse_dir_attribute_list();
        }

        if self.eat(SyntaxKind::EmptyTagClose) {
            self.finish_node();
            self.exit_recursion();
            return;
        }
        self.expect(SyntaxKind::Gt, "`>` to close the start tag");

        loop {
            match self.current() {
                SyntaxKind::DirText
                | SyntaxKind::CharRef
                | SyntaxKind::EscLBrace
                | SyntaxKind::EscRBrace
                | SyntaxKind::Cdata
                | SyntaxKind::XmlComment
                | SyntaxKind::DirPi => self.bump(),
                SyntaxKind::UnclosedCdata => {
                    let span = self.current_span();
                    self.bump();
                    self.error_here(
                        ErrorKind::UnclosedDelimiter,
                        span,
                        "expected `]]>` to close the CDATA section",
                    );
                }
                SyntaxKind::UnclosedXmlComment => {
                    let span = self.current_span();
                    self.bump();
                    self.error_here(
                        ErrorKind::UnclosedDelimiter,
                        span,
                        "expected `-->` to close the XML comment",
                    );
                }
                SyntaxKind::UnclosedDirPi => {
                    let span = self.current_span();
                    self.bump();
                    self.error_here(
                        ErrorKind::UnclosedDelimiter,
                        span,
                        "expected `?>` to close the processing instruction",
                    );
                }
                SyntaxKind::LBrace => self.parse_enclosed_expr(),
                SyntaxKind::Lt => self.parse_dir_elem(),
                SyntaxKind::ClosingTagStart => break,
                SyntaxKind::Eof => {
                    self.error_missing(format!(
                        "missing closing tag for `<{open_name}>`"
                    ));
                    self.finish_node();
                    self.exit_recursion();
                    return;
                }
                _ => self.error_and_bump("unexpected token in element content"),
            }
        }

        // </name>
        self.bump(); // </
        let close_start = self.current_span().start();
        let close_name = self.peek_qname_text();
        if self.at_eqname() {
            self.parse_eqname("element name");
            if close_name != open_name {
                let close_end = self.current_span().start();
                self.error_here(
                    ErrorKind::InvalidNesting,
                    TextRange::new(close_start, close_end.max(close_start)),
                    format!(
                        "mismatched closing tag: expected `</{open_name}>`, found `</{close_name}>`"
                    ),
                );
            }
        } else {
            self.error_missing("expected element name after `</`");
        }
        self.expect(SyntaxKind::Gt, "`>` to close the end tag");

        self.finish_node();
        self.exit_recursion();
    }

    /// Reads the QName text at the current position without consuming it.
    /// Used to compare start and end tag names.
    fn peek_qname_text(&mut self) -> String {
        match self.current() {
            SyntaxKind::NCName => {
                if self.nth(1) == SyntaxKind::Colon && self.nth(2) == SyntaxKind::NCName {
                    format!("{}:{}", self.current_text(), self.nth_text(2))
                } else {
                    self.current_text().to_owned()
                }
            }
            SyntaxKind::BracedUriLiteral => {
                format!("{}{}", self.current_text(), self.nth_text(1))
            }
            _ => String::new(),
        }
    }

    fn parse_dir_attribute_list(&mut self) {
        self.start_node(SyntaxKind::DirAttributeList);
        while self.at_eqname() {
            self.parse_dir_attribute();
        }
        self.finish_node();
    }

    fn parse_dir_attribute(&mut self) {
        self.start_node(SyntaxKind::DirAttribute);
        self.parse_eqname("attribute name");
        self.expect(SyntaxKind::Eq, "`=` after the attribute name");
        if matches!(self.current(), SyntaxKind::Quot | SyntaxKind::Apos) {
            self.parse_dir_attribute_value();
        } else {
            self.error_missing("expected attribute value");
        }
        self.finish_node();
    }

    /// Quoted attribute value: literal runs, character references, doubled
    /// quote escapes and enclosed expressions, up to the matching quote.
    fn parse_dir_attribute_value(&mut self) {
        self.start_node(SyntaxKind::DirAttributeValue);
        let quote = self.current();
        self.bump();

        loop {
            match self.current() {
                SyntaxKind::AttrText
                | SyntaxKind::EscQuot
                | SyntaxKind::EscApos
                | SyntaxKind::CharRef
                | SyntaxKind::EscLBrace
                | SyntaxKind::EscRBrace => self.bump(),
                SyntaxKind::LBrace => self.parse_enclosed_expr(),
                kind if kind == quote => {
                    self.bump();
                    break;
                }
                SyntaxKind::Eof => {
                    self.error_here(
                        ErrorKind::UnclosedDelimiter,
                        TextRange::empty(self.eof_offset()),
                        "unterminated attribute value",
                    );
                    break;
                }
                _ => self.error_and_bump("unexpected token in attribute value"),
            }
        }
        self.finish_node();
    }

    /// `<!-- ... -->` in expression position.
    pub(in super::super) fn parse_dir_comment_constructor(&mut self) {
        self.start_node(SyntaxKind::DirCommentConstructor);
        let span = self.current_span();
        let unclosed = self.at(SyntaxKind::UnclosedXmlComment);
        self.bump();
        if unclosed {
            self.error_here(
                ErrorKind::UnclosedDelimiter,
                span,
                "expected `-->` to close the XML comment",
            );
        }
        self.finish_node();
    }

    /// `<?target ...?>` in expression position.
    pub(in super::super) fn parse_dir_pi_constructor(&mut self) {
        self.start_node(SyntaxKind::DirPiConstructor);
        let span = self.current_span();
        let unclosed = self.at(SyntaxKind::UnclosedDirPi);
        self.bump();
        if unclosed {
            self.error_here(
                ErrorKind::UnclosedDelimiter,
                span,
                "expected `?>` to close the processing instruction",
            );
        }
        self.finish_node();
    }

    /// 3.1 `` ``[ text `{ expr }` text ]`` ``.
    pub(in super::super) fn parse_string_constructor(&mut self) {
        self.assert_current(SyntaxKind::StrConstrStart);
        self.start_node(SyntaxKind::StringConstructor);
        if !self.dialect.has_string_constructor() {
            self.error_dialect("string constructor", Dialect::Xquery31);
        }
        self.bump(); // ``[

        loop {
            match self.current() {
                SyntaxKind::StrConstrText => self.bump(),
                SyntaxKind::StrInterpStart => self.parse_string_interpolation(),
                SyntaxKind::StrConstrEnd => {
                    self.bump();
                    break;
                }
                SyntaxKind::Eof => {
                    self.error_here(
                        ErrorKind::UnclosedDelimiter,
                        TextRange::empty(self.eof_offset()),
                        "expected `]``` to close the string constructor",
                    );
                    break;
                }
                _ => self.error_and_bump("unexpected token in string constructor"),
            }
        }
        self.finish_node();
    }

    /// `` `{ expr? }` `` inside a string constructor.
    fn parse_string_interpolation(&mut self) {
        self.start_node(SyntaxKind::StringConstructorInterpolation);
        self.bump(); // `{
        if self.can_start_expr() {
            self.parse_expr();
        }
        if !self.eat(SyntaxKind::StrInterpEnd) {
            self.error_missing("expected `}`` to close the interpolation");
        }
        self.finish_node();
    }

    // --- Computed constructors ---

    /// True when the keyword at the current position begins a computed
    /// constructor: the keyword must be followed by `{` or, for the named
    /// forms, by a name and then `{`.
    pub(in super::super) fn at_comp_constructor(&mut self) -> bool {
        if self.current() != SyntaxKind::NCName {
            return false;
        }
        match self.current_text() {
            "document" | "text" | "comment" => self.nth(1) == SyntaxKind::LBrace,
            "element" | "attribute" => {
                self.nth(1) == SyntaxKind::LBrace || self.eqname_then_lbrace()
            }
            "processing-instruction" => {
                self.nth(1) == SyntaxKind::LBrace
                    || (self.nth(1) == SyntaxKind::NCName && self.nth(2) == SyntaxKind::LBrace)
            }
            "namespace" if self.dialect.has_comp_namespace_constructor() => {
                self.nth(1) == SyntaxKind::LBrace
                    || (self.nth(1) == SyntaxKind::NCName && self.nth(2) == SyntaxKind::LBrace)
            }
            _ => false,
        }
    }

    /// Whether the tokens after the keyword form an EQName followed by `{`.
    fn eqname_then_lbrace(&mut self) -> bool {
        let len = match self.nth(1) {
            SyntaxKind::BracedUriLiteral if self.nth(2) == SyntaxKind::NCName => 2,
            SyntaxKind::NCName
                if self.nth(2) == SyntaxKind::Colon && self.nth(3) == SyntaxKind::NCName =>
            {
                3
            }
            SyntaxKind::NCName => 1,
            _ => return false,
        };
        self.nth(1 + len) == SyntaxKind::LBrace
    }

    /// Dispatch for `document {...}`, `element n {...}`, and the rest. The
    /// caller has checked `at_comp_constructor`.
    pub(in super::super) fn parse_comp_constructor(&mut self) {
        match self.current_text() {
            "document" => {
                self.start_node(SyntaxKind::CompDocConstructor);
                self.bump_remap(SyntaxKind::Keyword);
                self.parse_enclosed_expr();
                self.finish_node();
            }
            "text" => {
                self.start_node(SyntaxKind::CompTextConstructor);
                self.bump_remap(SyntaxKind::Keyword);
                self.parse_enclosed_expr();
                self.finish_node();
            }
            "comment" => {
                self.start_node(SyntaxKind::CompCommentConstructor);
                self.bump_remap(SyntaxKind::Keyword);
                self.parse_enclosed_expr();
                self.finish_node();
            }
            "element" => self.parse_comp_named(SyntaxKind::CompElemConstructor),
            "attribute" => self.parse_comp_named(SyntaxKind::CompAttrConstructor),
            "processing-instruction" => {
                self.start_node(SyntaxKind::CompPiConstructor);
                self.bump_remap(SyntaxKind::Keyword);
                if self.at(SyntaxKind::NCName) {
                    self.bump();
                } else {
                    self.parse_enclosed_expr();
                }
                self.parse_enclosed_expr();
                self.finish_node();
            }
            "namespace" => {
                self.start_node(SyntaxKind::CompNamespaceConstructor);
                self.bump_remap(SyntaxKind::Keyword);
                if self.at(SyntaxKind::NCName) {
                    self.bump();
                } else {
                    self.parse_enclosed_expr();
                }
                self.parse_enclosed_expr();
                self.finish_node();
            }
            other => unreachable!("parse_comp_constructor called on `{other}`"),
        }
    }

    /// `element|attribute (EQName | { NameExpr }) { ContentExpr }`.
    fn parse_comp_named(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump_remap(SyntaxKind::Keyword);
        if self.at(SyntaxKind::LBrace) {
            self.parse_enclosed_expr();
        } else {
            self.parse_eqname("constructor name");
        }
        self.parse_enclosed_expr();
        self.finish_node();
    }
}
