//! Module structure: version declaration, library/main module, prolog.
//!
//! Every declaration follows one shape: consume the leading keywords with
//! recovery at each mandatory one, parse the payload, then require a
//! terminating `;`. A missing semicolon reports and continues without
//! consuming, so one mangled declaration never swallows the next.

use crate::cst::SyntaxKind;
use crate::cst::token_sets::EXPR_FIRST;
use crate::diagnostics::ErrorKind;
use crate::dialect::Dialect;

use super::super::core::Parser;

impl Parser<'_> {
    /// Root production. Always produces a `Module` node covering the whole
    /// input, even for empty or unrecognizable sources.
    pub(crate) fn parse_module(&mut self) {
        self.start_node(SyntaxKind::Module);

        if self.at_kw("xquery")
            && (self.nth_is_kw(1, "version") || self.nth_is_kw(1, "encoding"))
        {
            self.parse_version_decl();
        }

        let mut parsed_body = false;
        let mut reported_missing = false;
        while !self.eof() {
            if !parsed_body && self.at_kw("module") && self.nth_is_kw(1, "namespace") {
                self.parse_library_module();
                parsed_body = true;
                continue;
            }
            if !parsed_body && (self.at_prolog_decl() || self.at_set(EXPR_FIRST)) {
                self.parse_main_module();
                parsed_body = true;
                continue;
            }

            if !parsed_body && !reported_missing {
                self.error_missing("missing module declaration");
                reported_missing = true;
            }
            if self.at(SyntaxKind::UnclosedComment) {
                self.error_and_bump_kind(
                    ErrorKind::UnclosedDelimiter,
                    "expected `:)` to close the comment",
                );
            } else {
                self.error_and_bump("unexpected token");
            }
            // Runs of invalid characters stay bare leaves after the first
            // report; re-wrapping each one would only repeat the message.
            while self.at(SyntaxKind::BadChar) {
                self.bump();
            }
        }

        self.drain_trivia();
        self.finish_node();
    }

    /// `xquery version "1.0" encoding "UTF-8";` - the encoding-only form is
    /// 3.0 syntax.
    fn parse_version_decl(&mut self) {
        self.start_node(SyntaxKind::VersionDecl);
        self.bump_remap(SyntaxKind::Keyword); // xquery

        if self.at_kw("version") {
            self.bump_remap(SyntaxKind::Keyword);
            if self.at(SyntaxKind::StringLiteral) {
                let span = self.current_span();
                let text = self.current_text();
                // The literal's quotes are part of the token text.
                let version = text[1..text.len() - 1].to_string();
                self.bump();
                if Dialect::from_version_str(&version).is_none() {
                    self.error_here(
                        ErrorKind::UnsupportedVersion,
                        span,
                        format!("unsupported XQuery version `{version}`"),
                    );
                }
            } else {
                self.error_missing("expected version string");
            }
        }

        if self.at_kw("encoding") {
            self.bump_remap(SyntaxKind::Keyword);
            if !self.eat(SyntaxKind::StringLiteral) {
                self.error_missing("expected encoding string");
            }
        }

        self.expect_semicolon("version declaration");
        self.finish_node();
    }

    /// `module namespace prefix = "uri";` followed by a prolog.
    fn parse_library_module(&mut self) {
        self.start_node(SyntaxKind::LibraryModule);

        self.start_node(SyntaxKind::ModuleDecl);
        self.bump_remap(SyntaxKind::Keyword); // module
        self.bump_remap(SyntaxKind::Keyword); // namespace
        self.parse_ncname("namespace prefix");
        self.expect(SyntaxKind::Eq, "`=` in module declaration");
        self.parse_uri_literal("module namespace URI");
        self.expect_semicolon("module declaration");
        self.finish_node();

        self.parse_prolog();
        self.finish_node();
    }

    fn parse_main_module(&mut self) {
        self.start_node(SyntaxKind::MainModule);
        self.parse_prolog();

        if self.at_set(EXPR_FIRST) {
            self.start_node(SyntaxKind::QueryBody);
            self.parse_expr();
            self.finish_node();
        } else {
            self.error_missing("expected query body");
        }
        self.finish_node();
    }

    /// Zero or more declarations. The `Prolog` node only appears when at
    /// least one declaration is present.
    fn parse_prolog(&mut self) {
        if !self.at_prolog_decl() {
            return;
        }
        self.start_node(SyntaxKind::Prolog);
        while self.at_prolog_decl() {
            if self.at_kw("import") {
                self.parse_import();
            } else {
                self.parse_declare();
            }
        }
        self.finish_node();
    }

    /// Whether the tokens starting here begin a prolog declaration. Second
    /// keywords unknown to the active dialect do not count, so the same
    /// tokens fall through to the query body as a plain expression.
    fn at_prolog_decl(&mut self) -> bool {
        if self.at_kw("import") {
            return self.nth_is_kw(1, "module") || self.nth_is_kw(1, "schema");
        }
        if !self.at_kw("declare") {
            return false;
        }
        if self.nth(1) == SyntaxKind::Percent {
            return self.dialect.has_annotations();
        }
        if self.nth_is_kw(1, "context") {
            return self.dialect.has_context_item_decl() && self.nth_is_kw(2, "item");
        }
        if self.nth_is_kw(1, "decimal-format") {
            return self.dialect.has_decimal_format_decl();
        }
        self.nth_is_kw(1, "namespace")
            || self.nth_is_kw(1, "default")
            || self.nth_is_kw(1, "boundary-space")
            || self.nth_is_kw(1, "option")
            || self.nth_is_kw(1, "ordering")
            || self.nth_is_kw(1, "copy-namespaces")
            || self.nth_is_kw(1, "base-uri")
            || self.nth_is_kw(1, "construction")
            || self.nth_is_kw(1, "variable")
            || self.nth_is_kw(1, "function")
    }

    /// Dispatches a `declare ...` declaration on its second keyword. The
    /// caller has verified `at_prolog_decl`.
    fn parse_declare(&mut self) {
        if self.nth(1) == SyntaxKind::Percent {
            self.parse_annotated_decl();
            return;
        }
        match self.nth_text(1) {
            "namespace" => self.parse_namespace_decl(),
            "default" => self.parse_default_decl(),
            "boundary-space" => {
                self.parse_choice_decl(SyntaxKind::BoundarySpaceDecl, &["preserve", "strip"])
            }
            "option" => self.parse_option_decl(),
            "ordering" => {
                self.parse_choice_decl(SyntaxKind::OrderingModeDecl, &["ordered", "unordered"])
            }
            "copy-namespaces" => self.parse_copy_namespaces_decl(),
            "base-uri" => self.parse_uri_decl(SyntaxKind::BaseUriDecl, "base URI"),
            "construction" => {
                self.parse_choice_decl(SyntaxKind::ConstructionDecl, &["strip", "preserve"])
            }
            "variable" => self.parse_var_decl(),
            "function" => self.parse_function_decl(),
            "context" => self.parse_context_item_decl(),
            "decimal-format" => self.parse_decimal_format_decl(),
            other => unreachable!("parse_declare dispatched on `{other}`"),
        }
    }

    /// `declare %ann ... variable|function ...` (3.0).
    fn parse_annotated_decl(&mut self) {
        // The node kind depends on what follows the annotations, so the
        // wrapping is retroactive.
        let checkpoint = self.checkpoint();
        self.bump_remap(SyntaxKind::Keyword); // declare
        while self.at(SyntaxKind::Percent) {
            self.parse_annotation();
        }
        if self.at_kw("variable") {
            self.start_node_at(checkpoint, SyntaxKind::VarDecl);
            self.parse_var_decl_tail();
        } else if self.at_kw("function") {
            self.start_node_at(checkpoint, SyntaxKind::FunctionDecl);
            self.parse_function_decl_tail();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::FunctionDecl);
            self.error_missing("expected `variable` or `function` after annotations");
            self.recover_declaration();
        }
        self.finish_node();
    }

    /// `%EQName` or `%EQName("lit", ...)` (3.0).
    pub(in super::super) fn parse_annotation(&mut self) {
        self.assert_current(SyntaxKind::Percent);
        self.start_node(SyntaxKind::Annotation);
        self.bump();
        self.parse_eqname("annotation name");
        if self.eat(SyntaxKind::LParen) {
            if !self.at(SyntaxKind::RParen) {
                self.parse_annotation_value();
                while self.eat(SyntaxKind::Comma) {
                    self.parse_annotation_value();
                }
            }
            self.expect(SyntaxKind::RParen, "`)` after annotation arguments");
        }
        self.finish_node();
    }

    fn parse_annotation_value(&mut self) {
        match self.current() {
            SyntaxKind::StringLiteral
            | SyntaxKind::IntegerLiteral
            | SyntaxKind::DecimalLiteral
            | SyntaxKind::DoubleLiteral => self.bump(),
            _ => self.error_missing("expected literal annotation argument"),
        }
    }

    /// `declare namespace prefix = "uri";`
    fn parse_namespace_decl(&mut self) {
        self.start_node(SyntaxKind::NamespaceDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // namespace
        self.parse_ncname("namespace prefix");
        self.expect(SyntaxKind::Eq, "`=` in namespace declaration");
        self.parse_uri_literal("namespace URI");
        self.expect_semicolon("namespace declaration");
        self.finish_node();
    }

    /// `declare default element|function namespace "uri";`,
    /// `declare default collation "uri";`, `declare default order empty ...;`
    /// or `declare default decimal-format ...;`.
    fn parse_default_decl(&mut self) {
        if self.nth_is_kw(2, "collation") {
            self.start_node(SyntaxKind::DefaultCollationDecl);
            self.bump_remap(SyntaxKind::Keyword); // declare
            self.bump_remap(SyntaxKind::Keyword); // default
            self.bump_remap(SyntaxKind::Keyword); // collation
            self.parse_uri_literal("collation URI");
            self.expect_semicolon("collation declaration");
            self.finish_node();
            return;
        }
        if self.nth_is_kw(2, "order") {
            self.start_node(SyntaxKind::EmptyOrderDecl);
            self.bump_remap(SyntaxKind::Keyword); // declare
            self.bump_remap(SyntaxKind::Keyword); // default
            self.bump_remap(SyntaxKind::Keyword); // order
            self.expect_kw("empty");
            if self.at_kw("greatest") || self.at_kw("least") {
                self.bump_remap(SyntaxKind::Keyword);
            } else {
                self.error_missing("expected `greatest` or `least`");
                self.recover_declaration();
            }
            self.expect_semicolon("empty order declaration");
            self.finish_node();
            return;
        }
        if self.nth_is_kw(2, "decimal-format") && self.dialect.has_decimal_format_decl() {
            self.start_node(SyntaxKind::DecimalFormatDecl);
            self.bump_remap(SyntaxKind::Keyword); // declare
            self.bump_remap(SyntaxKind::Keyword); // default
            self.bump_remap(SyntaxKind::Keyword); // decimal-format
            self.parse_decimal_format_properties();
            self.expect_semicolon("decimal format declaration");
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::DefaultNamespaceDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // default
        if self.at_kw("element") || self.at_kw("function") {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing("expected `element` or `function`");
        }
        self.expect_kw("namespace");
        self.parse_uri_literal("namespace URI");
        self.expect_semicolon("default namespace declaration");
        self.finish_node();
    }

    /// `declare option QName "value";`
    fn parse_option_decl(&mut self) {
        self.start_node(SyntaxKind::OptionDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // option
        self.parse_eqname("option name");
        if !self.eat(SyntaxKind::StringLiteral) {
            self.error_missing("expected option value string");
        }
        self.expect_semicolon("option declaration");
        self.finish_node();
    }

    /// `declare copy-namespaces preserve|no-preserve, inherit|no-inherit;`
    fn parse_copy_namespaces_decl(&mut self) {
        self.start_node(SyntaxKind::CopyNamespacesDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // copy-namespaces
        if self.at_kw("preserve") || self.at_kw("no-preserve") {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing("expected `preserve` or `no-preserve`");
        }
        self.expect(SyntaxKind::Comma, "`,` in copy-namespaces declaration");
        if self.at_kw("inherit") || self.at_kw("no-inherit") {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing("expected `inherit` or `no-inherit`");
        }
        self.expect_semicolon("copy-namespaces declaration");
        self.finish_node();
    }

    /// Shared shape for `declare <kw> <choice-keyword>;` declarations.
    fn parse_choice_decl(&mut self, kind: SyntaxKind, choices: &[&str]) {
        self.start_node(kind);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // the declaration keyword
        if choices.iter().any(|c| self.at_kw(c)) {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing(format!("expected `{}` or `{}`", choices[0], choices[1]));
            self.recover_declaration();
        }
        self.expect_semicolon("declaration");
        self.finish_node();
    }

    /// Shared shape for `declare <kw> "uri";` declarations.
    fn parse_uri_decl(&mut self, kind: SyntaxKind, what: &str) {
        self.start_node(kind);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword);
        self.parse_uri_literal(what);
        self.expect_semicolon("declaration");
        self.finish_node();
    }

    /// `declare variable $name as type? := value;` or `... external;`
    fn parse_var_decl(&mut self) {
        self.start_node(SyntaxKind::VarDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.parse_var_decl_tail();
        self.finish_node();
    }

    /// Everything after `declare [annotations]`, starting at `variable`.
    fn parse_var_decl_tail(&mut self) {
        self.bump_remap(SyntaxKind::Keyword); // variable
        self.expect(SyntaxKind::Dollar, "`$` before variable name");
        self.parse_eqname("variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }

        if self.at(SyntaxKind::ColonEq) {
            self.start_node(SyntaxKind::VarValue);
            self.bump();
            self.parse_expr_single();
            self.finish_node();
        } else if self.at_kw("external") {
            self.bump_remap(SyntaxKind::Keyword);
            // 3.0: external variables may carry a default.
            if self.at(SyntaxKind::ColonEq) {
                self.start_node(SyntaxKind::VarValue);
                self.bump();
                self.parse_expr_single();
                self.finish_node();
            }
        } else {
            self.error_missing("expected `:=` or `external` in variable declaration");
            self.recover_declaration();
        }
        self.expect_semicolon("variable declaration");
    }

    /// `declare function name(params) as type? { body };` or `... external;`
    fn parse_function_decl(&mut self) {
        self.start_node(SyntaxKind::FunctionDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.parse_function_decl_tail();
        self.finish_node();
    }

    fn parse_function_decl_tail(&mut self) {
        self.bump_remap(SyntaxKind::Keyword); // function
        self.parse_eqname("function name");
        self.expect(SyntaxKind::LParen, "`(` after function name");
        self.parse_param_list();
        self.expect(SyntaxKind::RParen, "`)` after parameters");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        if self.at(SyntaxKind::LBrace) {
            self.start_node(SyntaxKind::FunctionBody);
            self.parse_enclosed_expr();
            self.finish_node();
        } else if self.at_kw("external") {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing("expected function body or `external`");
            self.recover_declaration();
        }
        self.expect_semicolon("function declaration");
    }

    /// Comma-separated parameters; empty list allowed. Also used by inline
    /// functions.
    pub(in super::super) fn parse_param_list(&mut self) {
        if !self.at(SyntaxKind::Dollar) {
            return;
        }
        self.start_node(SyntaxKind::ParamList);
        self.parse_param();
        while self.eat(SyntaxKind::Comma) {
            self.parse_param();
        }
        self.finish_node();
    }

    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::Param);
        self.expect(SyntaxKind::Dollar, "`$` before parameter name");
        self.parse_eqname("parameter name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        self.finish_node();
    }

    /// `declare context item as type? := expr;` (3.0).
    fn parse_context_item_decl(&mut self) {
        self.start_node(SyntaxKind::ContextItemDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // context
        self.expect_kw("item");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        if self.at(SyntaxKind::ColonEq) {
            self.start_node(SyntaxKind::VarValue);
            self.bump();
            self.parse_expr_single();
            self.finish_node();
        } else if self.at_kw("external") {
            self.bump_remap(SyntaxKind::Keyword);
            if self.at(SyntaxKind::ColonEq) {
                self.start_node(SyntaxKind::VarValue);
                self.bump();
                self.parse_expr_single();
                self.finish_node();
            }
        } else {
            self.error_missing("expected `:=` or `external` in context item declaration");
            self.recover_declaration();
        }
        self.expect_semicolon("context item declaration");
        self.finish_node();
    }

    /// `declare decimal-format QName (prop = "value")*;` (3.0).
    fn parse_decimal_format_decl(&mut self) {
        self.start_node(SyntaxKind::DecimalFormatDecl);
        self.bump_remap(SyntaxKind::Keyword); // declare
        self.bump_remap(SyntaxKind::Keyword); // decimal-format
        self.parse_eqname("decimal format name");
        self.parse_decimal_format_properties();
        self.expect_semicolon("decimal format declaration");
        self.finish_node();
    }

    fn parse_decimal_format_properties(&mut self) {
        const PROPERTIES: &[&str] = &[
            "decimal-separator",
            "grouping-separator",
            "infinity",
            "minus-sign",
            "NaN",
            "percent",
            "per-mille",
            "zero-digit",
            "digit",
            "pattern-separator",
            "exponent-separator",
        ];
        while PROPERTIES.iter().any(|p| self.at_kw(p)) {
            self.bump_remap(SyntaxKind::Keyword);
            self.expect(SyntaxKind::Eq, "`=` after decimal format property");
            if !self.eat(SyntaxKind::StringLiteral) {
                self.error_missing("expected property value string");
            }
        }
    }

    /// `import module namespace p = "uri" at "loc", ...;` or
    /// `import module "uri";`
    fn parse_import(&mut self) {
        if self.nth_is_kw(1, "schema") {
            self.parse_schema_import();
            return;
        }
        self.start_node(SyntaxKind::ModuleImport);
        self.bump_remap(SyntaxKind::Keyword); // import
        self.bump_remap(SyntaxKind::Keyword); // module
        if self.at_kw("namespace") {
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_ncname("namespace prefix");
            self.expect(SyntaxKind::Eq, "`=` in module import");
        }
        self.parse_uri_literal("module URI");
        self.parse_at_hints();
        self.expect_semicolon("module import");
        self.finish_node();
    }

    /// `import schema namespace p = "uri";`, with optional
    /// `default element namespace` form and location hints.
    fn parse_schema_import(&mut self) {
        self.start_node(SyntaxKind::SchemaImport);
        self.bump_remap(SyntaxKind::Keyword); // import
        self.bump_remap(SyntaxKind::Keyword); // schema
        if self.at_kw("namespace") {
            self.start_node(SyntaxKind::SchemaPrefix);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_ncname("namespace prefix");
            self.expect(SyntaxKind::Eq, "`=` in schema import");
            self.finish_node();
        } else if self.at_kw("default") {
            self.start_node(SyntaxKind::SchemaPrefix);
            self.bump_remap(SyntaxKind::Keyword);
            self.expect_kw("element");
            self.expect_kw("namespace");
            self.finish_node();
        }
        self.parse_uri_literal("schema URI");
        self.parse_at_hints();
        self.expect_semicolon("schema import");
        self.finish_node();
    }

    /// `at "location", "location"` hints on imports.
    fn parse_at_hints(&mut self) {
        if !self.at_kw("at") {
            return;
        }
        self.bump_remap(SyntaxKind::Keyword);
        self.parse_uri_literal("location hint");
        while self.eat(SyntaxKind::Comma) {
            self.parse_uri_literal("location hint");
        }
    }

    fn parse_uri_literal(&mut self, what: &str) {
        match self.current() {
            SyntaxKind::StringLiteral => self.bump(),
            SyntaxKind::UnclosedString => {
                let span = self.current_span();
                self.bump();
                self.error_here(
                    ErrorKind::UnclosedDelimiter,
                    span,
                    "unterminated string literal",
                );
            }
            _ => self.error_missing(format!("expected {what}")),
        }
    }

    /// Requires `;`. On a miss the declaration closes where it is and the
    /// next construct parses normally.
    fn expect_semicolon(&mut self, what: &str) {
        if !self.eat(SyntaxKind::Semicolon) {
            self.error_missing(format!("expected `;` after {what}"));
        }
    }

    /// Skips payload garbage until something that plausibly starts the next
    /// declaration or the terminator. One error node, one diagnostic.
    fn recover_declaration(&mut self) {
        if self.eof() || self.at_declaration_sync() {
            return;
        }
        let start = self.current_span().start();
        let mut end = start;
        self.start_node(SyntaxKind::Error);
        while !self.eof() && !self.at_declaration_sync() {
            end = self.current_span().end();
            self.bump();
        }
        self.finish_node();
        self.errors
            .report(
                ErrorKind::UnexpectedToken,
                rowan::TextRange::new(start, end),
            )
            .message("invalid declaration")
            .emit();
    }

    fn at_declaration_sync(&mut self) -> bool {
        self.at(SyntaxKind::Semicolon) || self.at_kw("declare") || self.at_kw("import")
    }
}
