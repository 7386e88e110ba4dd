//! Expression grammar: the precedence cascade, FLWOR, branching
//! expressions, paths and primaries.
//!
//! Binary levels follow one pattern: parse the tighter level, then loop
//! while the current token is one of this level's operators, wrapping
//! retroactively via a checkpoint. On a missing right-hand operand the level
//! emits a zero-width error and keeps the partial node, so outer levels can
//! continue consuming their own operators.

use rowan::Checkpoint;

use crate::cst::SyntaxKind;
use crate::cst::token_sets::EXPR_FIRST;
use crate::diagnostics::ErrorKind;
use crate::dialect::Dialect;

use super::super::core::Parser;

const AXES: &[&str] = &[
    "child",
    "descendant",
    "attribute",
    "self",
    "descendant-or-self",
    "following-sibling",
    "following",
    "parent",
    "ancestor",
    "preceding-sibling",
    "preceding",
    "ancestor-or-self",
    "namespace",
];

impl Parser<'_> {
    /// `Expr`: one or more single expressions separated by commas. The
    /// wrapping `Expr` node only appears when a comma is present.
    pub(in super::super) fn parse_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_expr_single();
        if !self.at(SyntaxKind::Comma) {
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::Expr);
        while self.eat(SyntaxKind::Comma) {
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `,`");
            }
        }
        self.finish_node();
    }

    /// `ExprSingle`: keyword-led constructs, then the precedence cascade.
    pub(in super::super) fn parse_expr_single(&mut self) {
        if !self.enter_recursion() {
            self.bail_out_deep();
            return;
        }

        if self.at_kw("for") || self.at_kw("let") {
            if self.at_flwor_start() {
                self.parse_flwor_expr();
                self.exit_recursion();
                return;
            }
        } else if (self.at_kw("some") || self.at_kw("every")) && self.nth(1) == SyntaxKind::Dollar
        {
            self.parse_quantified_expr();
            self.exit_recursion();
            return;
        } else if self.at_kw("if") && self.nth(1) == SyntaxKind::LParen {
            self.parse_if_expr();
            self.exit_recursion();
            return;
        } else if self.at_kw("switch")
            && self.nth(1) == SyntaxKind::LParen
            && self.dialect.has_switch()
        {
            self.parse_switch_expr();
            self.exit_recursion();
            return;
        } else if self.at_kw("typeswitch") && self.nth(1) == SyntaxKind::LParen {
            self.parse_typeswitch_expr();
            self.exit_recursion();
            return;
        } else if self.at_kw("try")
            && self.nth(1) == SyntaxKind::LBrace
            && self.dialect.has_try_catch()
        {
            self.parse_try_catch_expr();
            self.exit_recursion();
            return;
        }

        self.parse_ternary_expr();
        self.exit_recursion();
    }

    fn at_flwor_start(&mut self) -> bool {
        if self.nth(1) == SyntaxKind::Dollar {
            return true;
        }
        // for tumbling|sliding window $...
        self.at_kw("for")
            && (self.nth_is_kw(1, "tumbling") || self.nth_is_kw(1, "sliding"))
            && self.nth_is_kw(2, "window")
            && self.dialect.has_window_clause()
    }

    pub(in super::super) fn can_start_expr(&mut self) -> bool {
        self.at_set(EXPR_FIRST)
    }

    // --- Precedence cascade, loosest to tightest ---

    /// 4.0 `cond ?? then !! else`.
    fn parse_ternary_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_otherwise_expr();
        if !self.at(SyntaxKind::QuestionQuestion) {
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::TernaryExpr);
        if !self.dialect.has_ternary() {
            self.error_dialect("ternary conditional", Dialect::Xquery40);
        }
        self.bump(); // ??
        self.parse_operand("expected expression after `??`", Self::parse_otherwise_expr);
        if self.eat(SyntaxKind::BangBang) {
            self.parse_operand("expected expression after `!!`", Self::parse_otherwise_expr);
        } else {
            self.error_missing("expected `!!` in ternary conditional");
        }
        self.finish_node();
    }

    /// 4.0 `a otherwise b`.
    fn parse_otherwise_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_or_expr();
        if !self.dialect.has_otherwise() {
            return;
        }
        while self.at_kw("otherwise") {
            self.start_node_at(checkpoint, SyntaxKind::OtherwiseExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_operand("expected expression after `otherwise`", Self::parse_or_expr);
            self.finish_node();
        }
    }

    fn parse_or_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_and_expr();
        while self.at_kw("or") {
            self.start_node_at(checkpoint, SyntaxKind::OrExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_operand("expected expression after `or`", Self::parse_and_expr);
            self.finish_node();
        }
    }

    fn parse_and_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_comparison_expr();
        while self.at_kw("and") {
            self.start_node_at(checkpoint, SyntaxKind::AndExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_operand(
                "expected expression after `and`",
                Self::parse_comparison_expr,
            );
            self.finish_node();
        }
    }

    /// General, value and node comparisons. Never chained: `a = b = c` wraps
    /// once and leaves the second `=` to the caller's recovery.
    fn parse_comparison_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_string_concat_expr();
        if self.at_comparison_op() {
            self.start_node_at(checkpoint, SyntaxKind::ComparisonExpr);
            self.bump_comparison_op();
            self.parse_operand(
                "expected expression after comparison operator",
                Self::parse_string_concat_expr,
            );
            self.finish_node();
        }
    }

    fn at_comparison_op(&mut self) -> bool {
        if self.at_set(crate::cst::token_sets::COMPARISON_OPS) {
            return true;
        }
        if self.at_kw("eq")
            || self.at_kw("ne")
            || self.at_kw("lt")
            || self.at_kw("le")
            || self.at_kw("gt")
            || self.at_kw("ge")
            || self.at_kw("is")
        {
            // In operator position these words always read as comparisons;
            // a missing right operand is reported by the operand parse.
            return true;
        }
        false
    }

    fn bump_comparison_op(&mut self) {
        if self.current() == SyntaxKind::NCName {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.bump();
        }
    }

    /// 3.0 `a || b`.
    fn parse_string_concat_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_range_expr();
        while self.at(SyntaxKind::PipePipe) {
            self.start_node_at(checkpoint, SyntaxKind::StringConcatExpr);
            if !self.dialect.has_string_concat() {
                self.error_dialect("string concatenation operator", Dialect::Xquery30);
            }
            self.bump();
            self.parse_operand("expected expression after `||`", Self::parse_range_expr);
            self.finish_node();
        }
    }

    /// `a to b` - not chainable.
    fn parse_range_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_additive_expr();
        if self.at_kw("to") {
            self.start_node_at(checkpoint, SyntaxKind::RangeExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_operand("expected expression after `to`", Self::parse_additive_expr);
            self.finish_node();
        }
    }

    fn parse_additive_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_multiplicative_expr();
        while matches!(self.current(), SyntaxKind::Plus | SyntaxKind::Minus) {
            self.start_node_at(checkpoint, SyntaxKind::AdditiveExpr);
            self.bump();
            self.parse_operand(
                "expected expression after additive operator",
                Self::parse_multiplicative_expr,
            );
            self.finish_node();
        }
    }

    fn parse_multiplicative_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_union_expr();
        loop {
            if self.at(SyntaxKind::Star) {
                self.start_node_at(checkpoint, SyntaxKind::MultiplicativeExpr);
                self.bump();
            } else if self.at_kw("div") || self.at_kw("idiv") || self.at_kw("mod") {
                self.start_node_at(checkpoint, SyntaxKind::MultiplicativeExpr);
                self.bump_remap(SyntaxKind::Keyword);
            } else {
                break;
            }
            self.parse_operand(
                "expected expression after multiplicative operator",
                Self::parse_union_expr,
            );
            self.finish_node();
        }
    }

    fn parse_union_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_intersect_except_expr();
        while self.at(SyntaxKind::Pipe) || self.at_kw("union") {
            self.start_node_at(checkpoint, SyntaxKind::UnionExpr);
            if self.current() == SyntaxKind::NCName {
                self.bump_remap(SyntaxKind::Keyword);
            } else {
                self.bump();
            }
            self.parse_operand(
                "expected expression after union operator",
                Self::parse_intersect_except_expr,
            );
            self.finish_node();
        }
    }

    fn parse_intersect_except_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_instanceof_expr();
        while self.at_kw("intersect") || self.at_kw("except") {
            self.start_node_at(checkpoint, SyntaxKind::IntersectExceptExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_operand(
                "expected expression after `intersect`/`except`",
                Self::parse_instanceof_expr,
            );
            self.finish_node();
        }
    }

    fn parse_instanceof_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_treat_expr();
        if self.at_kw("instance") && self.nth_is_kw(1, "of") {
            self.start_node_at(checkpoint, SyntaxKind::InstanceofExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_sequence_type();
            self.finish_node();
        }
    }

    fn parse_treat_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_castable_expr();
        if self.at_kw("treat") && self.nth_is_kw(1, "as") {
            self.start_node_at(checkpoint, SyntaxKind::TreatExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_sequence_type();
            self.finish_node();
        }
    }

    fn parse_castable_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_cast_expr();
        if self.at_kw("castable") && self.nth_is_kw(1, "as") {
            self.start_node_at(checkpoint, SyntaxKind::CastableExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_single_type();
            self.finish_node();
        }
    }

    fn parse_cast_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_arrow_expr();
        if self.at_kw("cast") && self.nth_is_kw(1, "as") {
            self.start_node_at(checkpoint, SyntaxKind::CastExpr);
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_single_type();
            self.finish_node();
        }
    }

    /// 3.1 `value => f(args)`; 4.0 adds the `->` focus form.
    fn parse_arrow_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_unary_expr();
        loop {
            let thin = match self.current() {
                SyntaxKind::Arrow => false,
                SyntaxKind::ThinArrow => true,
                _ => break,
            };
            self.start_node_at(checkpoint, SyntaxKind::ArrowExpr);
            if thin && !self.dialect.has_thin_arrow() {
                self.error_dialect("`->` arrow operator", Dialect::Xquery40);
            } else if !thin && !self.dialect.has_arrow_expr() {
                self.error_dialect("`=>` arrow operator", Dialect::Xquery31);
            }
            self.bump();
            self.parse_arrow_target();
            self.finish_node();
        }
    }

    /// Arrow target: `EQName`, `$var`, or a parenthesized expression, each
    /// followed by an argument list.
    fn parse_arrow_target(&mut self) {
        match self.current() {
            SyntaxKind::Dollar => self.parse_var_ref(),
            SyntaxKind::LParen => self.parse_parenthesized_expr(),
            SyntaxKind::NCName | SyntaxKind::BracedUriLiteral => {
                self.parse_eqname("arrow function name")
            }
            _ => {
                self.error_missing("expected function name after arrow");
                return;
            }
        }
        if self.at(SyntaxKind::LParen) {
            self.parse_argument_list();
        } else {
            self.error_missing("expected argument list after arrow target");
        }
    }

    fn parse_unary_expr(&mut self) {
        if matches!(self.current(), SyntaxKind::Plus | SyntaxKind::Minus) {
            self.start_node(SyntaxKind::UnaryExpr);
            while matches!(self.current(), SyntaxKind::Plus | SyntaxKind::Minus) {
                self.bump();
            }
            self.parse_operand(
                "expected expression after unary sign",
                Self::parse_simple_map_expr,
            );
            self.finish_node();
            return;
        }
        self.parse_simple_map_expr();
    }

    /// 3.0 `source ! mapped`.
    fn parse_simple_map_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_path_expr();
        while self.at(SyntaxKind::Bang) {
            self.start_node_at(checkpoint, SyntaxKind::SimpleMapExpr);
            if !self.dialect.has_simple_map() {
                self.error_dialect("simple map operator", Dialect::Xquery30);
            }
            self.bump();
            self.parse_operand("expected expression after `!`", Self::parse_path_expr);
            self.finish_node();
        }
    }

    /// Shared right-operand shape: parse if possible, zero-width error if
    /// absent. The partial node survives either way.
    fn parse_operand(&mut self, missing: &str, next: fn(&mut Self)) {
        if self.can_start_expr() {
            next(self);
        } else {
            self.error_missing(missing);
        }
    }

    // --- Paths ---

    fn parse_path_expr(&mut self) {
        if matches!(self.current(), SyntaxKind::Slash | SyntaxKind::SlashSlash) {
            self.start_node(SyntaxKind::PathExpr);
            self.bump();
            if self.at_step_start() {
                self.parse_step_expr();
                self.parse_relative_path_tail();
            }
            self.finish_node();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_step_expr();
        if matches!(self.current(), SyntaxKind::Slash | SyntaxKind::SlashSlash) {
            self.start_node_at(checkpoint, SyntaxKind::PathExpr);
            self.parse_relative_path_tail();
            self.finish_node();
        }
    }

    fn parse_relative_path_tail(&mut self) {
        while matches!(self.current(), SyntaxKind::Slash | SyntaxKind::SlashSlash) {
            self.bump();
            if self.at_step_start() {
                self.parse_step_expr();
            } else {
                self.error_missing("expected path step after `/`");
                break;
            }
        }
    }

    fn at_step_start(&mut self) -> bool {
        self.at_set(crate::cst::token_sets::STEP_FIRST) || self.can_start_expr()
    }

    /// One path step: an axis step or a postfix expression.
    fn parse_step_expr(&mut self) {
        match self.current() {
            SyntaxKind::At | SyntaxKind::DotDot => self.parse_axis_step(),
            // `*` in step position is always a wildcard; the multiplication
            // reading is consumed by the operator loops above this level.
            SyntaxKind::Star => self.parse_axis_step(),
            SyntaxKind::NCName => {
                if self.nth(1) == SyntaxKind::ColonColon
                    && AXES.contains(&self.current_text())
                {
                    self.parse_axis_step();
                } else if self.at_kind_test() {
                    self.parse_axis_step();
                } else if self.at_primary_keyword_construct() || self.name_is_callish() {
                    self.parse_postfix_expr();
                } else {
                    self.parse_axis_step();
                }
            }
            SyntaxKind::BracedUriLiteral => {
                if self.name_is_callish() {
                    self.parse_postfix_expr();
                } else {
                    self.parse_axis_step();
                }
            }
            _ => self.parse_postfix_expr(),
        }
    }

    /// True when the current keyword begins a primary-level construct
    /// (inline function, map/array constructor, computed constructor, ...)
    /// rather than a name test.
    fn at_primary_keyword_construct(&mut self) -> bool {
        match self.current_text() {
            "function" => {
                self.nth(1) == SyntaxKind::LParen && self.dialect.has_inline_functions()
            }
            "fn" => self.nth(1) == SyntaxKind::LParen && self.dialect.has_fn_keyword(),
            "map" | "array" => {
                self.nth(1) == SyntaxKind::LBrace && self.dialect.has_maps_arrays()
            }
            "ordered" | "unordered" => self.nth(1) == SyntaxKind::LBrace,
            "validate" => self.at_validate_expr(),
            _ => self.at_comp_constructor(),
        }
    }

    /// Whether the EQName starting here is followed by `(` (a call) or `#`
    /// (a named function reference).
    fn name_is_callish(&mut self) -> bool {
        let after = match self.current() {
            SyntaxKind::BracedUriLiteral => 2,
            SyntaxKind::NCName
                if self.nth(1) == SyntaxKind::Colon && self.nth(2) == SyntaxKind::NCName =>
            {
                3
            }
            SyntaxKind::NCName => 1,
            _ => return false,
        };
        matches!(self.nth(after), SyntaxKind::LParen | SyntaxKind::Hash)
    }

    /// `axis::test[pred]`, `@test[pred]`, `test[pred]`, or `..`.
    fn parse_axis_step(&mut self) {
        self.start_node(SyntaxKind::AxisStep);
        match self.current() {
            SyntaxKind::DotDot => {
                self.bump();
            }
            SyntaxKind::At => {
                self.bump();
                self.parse_node_test();
            }
            SyntaxKind::NCName if self.nth(1) == SyntaxKind::ColonColon => {
                self.bump_remap(SyntaxKind::Keyword);
                self.bump(); // ::
                self.parse_node_test();
            }
            _ => self.parse_node_test(),
        }
        while self.at(SyntaxKind::LBracket) {
            self.parse_predicate();
        }
        self.finish_node();
    }

    fn parse_node_test(&mut self) {
        if self.at_kind_test() {
            self.parse_kind_test();
        } else if self.at_wildcard() {
            self.parse_wildcard();
        } else if self.at_eqname() {
            self.start_node(SyntaxKind::NameTest);
            self.parse_eqname("name test");
            self.finish_node();
        } else {
            self.error_missing("expected node test");
        }
    }

    fn parse_predicate(&mut self) {
        self.assert_current(SyntaxKind::LBracket);
        self.start_node(SyntaxKind::Predicate);
        self.bump();
        if self.can_start_expr() {
            self.parse_expr();
        } else {
            self.error_missing("expected expression in predicate");
        }
        self.expect(SyntaxKind::RBracket, "`]` to close the predicate");
        self.finish_node();
    }

    // --- Postfix and primary ---

    /// Primary expression plus any run of predicates, argument lists and
    /// lookups. The `PostfixExpr` wrapper only appears when a postfix
    /// actually follows.
    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary_expr();

        let mut wrapped = false;
        loop {
            match self.current() {
                SyntaxKind::LBracket => {
                    self.wrap_postfix(checkpoint, &mut wrapped);
                    self.parse_predicate();
                }
                SyntaxKind::LParen => {
                    self.wrap_postfix(checkpoint, &mut wrapped);
                    self.parse_argument_list();
                }
                SyntaxKind::Question if self.at_lookup_key(1) => {
                    self.wrap_postfix(checkpoint, &mut wrapped);
                    self.parse_lookup();
                }
                _ => break,
            }
        }
        if wrapped {
            self.finish_node();
        }
    }

    fn wrap_postfix(&mut self, checkpoint: Checkpoint, wrapped: &mut bool) {
        if !*wrapped {
            self.start_node_at(checkpoint, SyntaxKind::PostfixExpr);
            *wrapped = true;
        }
    }

    fn at_lookup_key(&mut self, n: usize) -> bool {
        matches!(
            self.nth(n),
            SyntaxKind::NCName
                | SyntaxKind::IntegerLiteral
                | SyntaxKind::Star
                | SyntaxKind::LParen
                | SyntaxKind::StringLiteral
                | SyntaxKind::Dollar
        )
    }

    /// 3.1 postfix lookup `expr ? key`.
    fn parse_lookup(&mut self) {
        self.start_node(SyntaxKind::Lookup);
        if !self.dialect.has_lookup() {
            self.error_dialect("lookup operator", Dialect::Xquery31);
        }
        self.bump(); // ?
        self.parse_key_specifier();
        self.finish_node();
    }

    fn parse_key_specifier(&mut self) {
        self.start_node(SyntaxKind::KeySpecifier);
        match self.current() {
            SyntaxKind::NCName | SyntaxKind::IntegerLiteral | SyntaxKind::Star => self.bump(),
            SyntaxKind::LParen => self.parse_parenthesized_expr(),
            // 4.0 widens key specifiers.
            SyntaxKind::StringLiteral | SyntaxKind::Dollar => {
                if !self.dialect.has_fn_keyword() {
                    self.error_dialect("this key specifier form", Dialect::Xquery40);
                }
                if self.at(SyntaxKind::Dollar) {
                    self.parse_var_ref();
                } else {
                    self.bump();
                }
            }
            _ => self.error_missing("expected key specifier after `?`"),
        }
        self.finish_node();
    }

    fn parse_primary_expr(&mut self) {
        match self.current() {
            SyntaxKind::IntegerLiteral
            | SyntaxKind::DecimalLiteral
            | SyntaxKind::DoubleLiteral
            | SyntaxKind::StringLiteral => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::UnclosedString => {
                self.start_node(SyntaxKind::Literal);
                let span = self.current_span();
                self.bump();
                self.error_here(
                    ErrorKind::UnclosedDelimiter,
                    span,
                    "unterminated string literal",
                );
                self.finish_node();
            }
            SyntaxKind::Dollar => self.parse_var_ref(),
            SyntaxKind::LParen => self.parse_parenthesized_expr(),
            SyntaxKind::Dot => {
                self.start_node(SyntaxKind::ContextItemExpr);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::LBracket => self.parse_square_array(),
            SyntaxKind::Question => self.parse_unary_lookup(),
            SyntaxKind::Lt => self.parse_direct_constructor(),
            SyntaxKind::XmlComment | SyntaxKind::UnclosedXmlComment => {
                self.parse_dir_comment_constructor()
            }
            SyntaxKind::DirPi | SyntaxKind::UnclosedDirPi => self.parse_dir_pi_constructor(),
            SyntaxKind::StrConstrStart => self.parse_string_constructor(),
            SyntaxKind::PragmaOpen => self.parse_extension_expr(),
            SyntaxKind::Percent => self.parse_inline_function_expr(),
            SyntaxKind::ThinArrow => self.parse_inline_function_expr(),
            SyntaxKind::NCName | SyntaxKind::BracedUriLiteral => self.parse_name_led_primary(),
            _ => self.error_missing("expected expression"),
        }
    }

    /// Keyword constructs that are legal exactly here, otherwise function
    /// calls and named function references.
    fn parse_name_led_primary(&mut self) {
        if self.at(SyntaxKind::NCName) {
            match self.current_text() {
                "function" if self.nth(1) == SyntaxKind::LParen => {
                    if self.dialect.has_inline_functions() {
                        self.parse_inline_function_expr();
                        return;
                    }
                    // 1.0 fallback: a plain function named `function`.
                }
                "fn" if self.nth(1) == SyntaxKind::LParen && self.dialect.has_fn_keyword() => {
                    self.parse_inline_function_expr();
                    return;
                }
                "map" if self.nth(1) == SyntaxKind::LBrace && self.dialect.has_maps_arrays() => {
                    self.parse_map_constructor();
                    return;
                }
                "array" if self.nth(1) == SyntaxKind::LBrace && self.dialect.has_maps_arrays() => {
                    self.parse_curly_array();
                    return;
                }
                "ordered" if self.nth(1) == SyntaxKind::LBrace => {
                    self.parse_ordered_expr(SyntaxKind::OrderedExpr);
                    return;
                }
                "unordered" if self.nth(1) == SyntaxKind::LBrace => {
                    self.parse_ordered_expr(SyntaxKind::UnorderedExpr);
                    return;
                }
                "validate" if self.at_validate_expr() => {
                    self.parse_validate_expr();
                    return;
                }
                _ => {}
            }
            if self.at_comp_constructor() {
                self.parse_comp_constructor();
                return;
            }
        }

        // Named function reference: EQName#arity (3.0).
        let hash_at = match self.current() {
            SyntaxKind::BracedUriLiteral => 2,
            SyntaxKind::NCName
                if self.nth(1) == SyntaxKind::Colon && self.nth(2) == SyntaxKind::NCName =>
            {
                3
            }
            _ => 1,
        };
        if self.nth(hash_at) == SyntaxKind::Hash {
            self.start_node(SyntaxKind::NamedFunctionRef);
            if !self.dialect.has_named_function_ref() {
                self.error_dialect("named function reference", Dialect::Xquery30);
            }
            self.parse_eqname("function name");
            self.bump(); // #
            if !self.eat(SyntaxKind::IntegerLiteral) {
                self.error_missing("expected arity after `#`");
            }
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::FunctionCall);
        self.parse_eqname("function name");
        if self.at(SyntaxKind::LParen) {
            self.parse_argument_list();
        } else {
            self.error_missing("expected `(` after function name");
        }
        self.finish_node();
    }

    fn parse_var_ref(&mut self) {
        self.assert_current(SyntaxKind::Dollar);
        self.start_node(SyntaxKind::VarRef);
        self.bump();
        self.parse_eqname("variable name");
        self.finish_node();
    }

    fn parse_parenthesized_expr(&mut self) {
        self.assert_current(SyntaxKind::LParen);
        self.start_node(SyntaxKind::ParenthesizedExpr);
        self.bump();
        if self.can_start_expr() {
            self.parse_expr();
        }
        self.expect(SyntaxKind::RParen, "`)` to close the parenthesized expression");
        self.finish_node();
    }

    /// `( arg, ?, arg )` - `?` is an argument placeholder (3.0) here.
    pub(in super::super) fn parse_argument_list(&mut self) {
        self.assert_current(SyntaxKind::LParen);
        self.start_node(SyntaxKind::ArgumentList);
        self.bump();
        if !self.at(SyntaxKind::RParen) {
            self.parse_argument();
            while self.eat(SyntaxKind::Comma) {
                self.parse_argument();
            }
        }
        self.expect(SyntaxKind::RParen, "`)` to close the argument list");
        self.finish_node();
    }

    fn parse_argument(&mut self) {
        if self.at(SyntaxKind::Question) && !self.at_lookup_key(1) {
            self.start_node(SyntaxKind::ArgumentPlaceholder);
            if !self.dialect.has_named_function_ref() {
                self.error_dialect("argument placeholder", Dialect::Xquery30);
            }
            self.bump();
            self.finish_node();
            return;
        }
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected argument");
        }
    }

    /// 3.1 `?key` without a left-hand side.
    fn parse_unary_lookup(&mut self) {
        self.assert_current(SyntaxKind::Question);
        self.start_node(SyntaxKind::UnaryLookup);
        if !self.dialect.has_lookup() {
            self.error_dialect("unary lookup", Dialect::Xquery31);
        }
        self.bump();
        self.parse_key_specifier();
        self.finish_node();
    }

    /// 3.1 `[ a, b ]`.
    fn parse_square_array(&mut self) {
        self.assert_current(SyntaxKind::LBracket);
        self.start_node(SyntaxKind::SquareArrayConstructor);
        if !self.dialect.has_maps_arrays() {
            self.error_dialect("array constructor", Dialect::Xquery31);
        }
        self.bump();
        if !self.at(SyntaxKind::RBracket) && self.can_start_expr() {
            self.parse_expr_single();
            while self.eat(SyntaxKind::Comma) {
                if self.can_start_expr() {
                    self.parse_expr_single();
                } else {
                    self.error_missing("expected array member after `,`");
                }
            }
        }
        self.expect(SyntaxKind::RBracket, "`]` to close the array constructor");
        self.finish_node();
    }

    /// 3.1 `array { expr }`.
    fn parse_curly_array(&mut self) {
        self.start_node(SyntaxKind::CurlyArrayConstructor);
        self.bump_remap(SyntaxKind::Keyword);
        self.parse_enclosed_expr();
        self.finish_node();
    }

    /// 3.1 `map { key : value, ... }`.
    fn parse_map_constructor(&mut self) {
        self.start_node(SyntaxKind::MapConstructor);
        self.bump_remap(SyntaxKind::Keyword); // map
        self.bump(); // {
        if !self.at(SyntaxKind::RBrace) && self.can_start_expr() {
            self.parse_map_entry();
            while self.eat(SyntaxKind::Comma) {
                self.parse_map_entry();
            }
        }
        self.expect(SyntaxKind::RBrace, "`}` to close the map constructor");
        self.finish_node();
    }

    fn parse_map_entry(&mut self) {
        self.start_node(SyntaxKind::MapConstructorEntry);
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected map key");
        }
        self.expect(SyntaxKind::Colon, "`:` between map key and value");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected map value");
        }
        self.finish_node();
    }

    fn parse_ordered_expr(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump_remap(SyntaxKind::Keyword);
        self.parse_enclosed_expr();
        self.finish_node();
    }

    fn at_validate_expr(&mut self) -> bool {
        if self.nth(1) == SyntaxKind::LBrace {
            return true;
        }
        if (self.nth_is_kw(1, "lax") || self.nth_is_kw(1, "strict"))
            && self.nth(2) == SyntaxKind::LBrace
        {
            return true;
        }
        self.nth_is_kw(1, "type") && self.dialect.has_validate_type()
    }

    /// `validate lax|strict? { expr }` or `validate type QName { expr }`.
    fn parse_validate_expr(&mut self) {
        self.start_node(SyntaxKind::ValidateExpr);
        self.bump_remap(SyntaxKind::Keyword); // validate
        if self.at_kw("lax") || self.at_kw("strict") {
            self.bump_remap(SyntaxKind::Keyword);
        } else if self.at_kw("type") {
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_eqname("type name");
        }
        self.parse_enclosed_expr();
        self.finish_node();
    }

    /// `(# name content #)+ { expr }`.
    fn parse_extension_expr(&mut self) {
        self.start_node(SyntaxKind::ExtensionExpr);
        while self.at(SyntaxKind::PragmaOpen) {
            self.parse_pragma();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_enclosed_expr();
        } else {
            self.error_missing("expected `{` after pragma");
        }
        self.finish_node();
    }

    fn parse_pragma(&mut self) {
        self.start_node(SyntaxKind::Pragma);
        self.bump(); // (#
        self.parse_eqname("pragma name");
        // Pragma content is any token soup up to `#)`.
        let mut end = self.current_span().start();
        while !self.eof() && !self.at(SyntaxKind::PragmaClose) {
            end = self.current_span().end();
            self.bump();
        }
        if !self.eat(SyntaxKind::PragmaClose) {
            self.error_here(
                ErrorKind::UnclosedDelimiter,
                rowan::TextRange::empty(end),
                "expected `#)` to close the pragma",
            );
        }
        self.finish_node();
    }

    /// `function($p) as t { body }`, annotated variants, and the 4.0 `fn` /
    /// `->` short forms.
    fn parse_inline_function_expr(&mut self) {
        self.start_node(SyntaxKind::InlineFunctionExpr);
        while self.at(SyntaxKind::Percent) {
            if !self.dialect.has_annotations() {
                self.error_dialect("annotation", Dialect::Xquery30);
            }
            self.parse_annotation();
        }
        if self.at(SyntaxKind::ThinArrow) {
            if !self.dialect.has_thin_arrow() {
                self.error_dialect("`->` function shorthand", Dialect::Xquery40);
            }
            self.bump();
        } else if self.at_kw("function") || self.at_kw("fn") {
            self.bump_remap(SyntaxKind::Keyword);
        } else {
            self.error_missing("expected `function` after annotations");
        }
        if self.eat(SyntaxKind::LParen) {
            self.parse_param_list();
            self.expect(SyntaxKind::RParen, "`)` after parameters");
        }
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        if self.at(SyntaxKind::LBrace) {
            self.start_node(SyntaxKind::FunctionBody);
            self.parse_enclosed_expr();
            self.finish_node();
        } else {
            self.error_missing("expected function body");
        }
        self.finish_node();
    }

    /// `{ expr? }` - the shared enclosed-expression shape.
    pub(in super::super) fn parse_enclosed_expr(&mut self) {
        self.start_node(SyntaxKind::EnclosedExpr);
        if !self.eat(SyntaxKind::LBrace) {
            self.error_missing("expected `{`");
            self.finish_node();
            return;
        }
        if self.can_start_expr() {
            self.parse_expr();
        }
        self.expect(SyntaxKind::RBrace, "`}` to close the enclosed expression");
        self.finish_node();
    }

    // --- FLWOR ---

    fn parse_flwor_expr(&mut self) {
        self.start_node(SyntaxKind::FlworExpr);
        loop {
            if self.at_kw("for") {
                if self.nth_is_kw(1, "tumbling") || self.nth_is_kw(1, "sliding") {
                    self.parse_window_clause();
                } else {
                    self.parse_for_clause();
                }
            } else if self.at_kw("let") {
                self.parse_let_clause();
            } else if self.at_kw("where") {
                self.parse_where_clause();
            } else if self.at_kw("group") && self.nth_is_kw(1, "by") {
                self.parse_group_by_clause();
            } else if self.at_kw("order") && self.nth_is_kw(1, "by") {
                self.parse_order_by_clause(false);
            } else if self.at_kw("stable") && self.nth_is_kw(1, "order") {
                self.parse_order_by_clause(true);
            } else if self.at_kw("count") && self.nth(1) == SyntaxKind::Dollar {
                self.parse_count_clause();
            } else {
                break;
            }
        }

        if self.at_kw("return") {
            self.start_node(SyntaxKind::ReturnClause);
            self.bump_remap(SyntaxKind::Keyword);
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `return`");
            }
            self.finish_node();
        } else {
            self.error_missing("expected keyword `return`");
        }
        self.finish_node();
    }

    fn parse_for_clause(&mut self) {
        self.start_node(SyntaxKind::ForClause);
        self.bump_remap(SyntaxKind::Keyword); // for
        self.parse_for_binding();
        while self.eat(SyntaxKind::Comma) {
            self.parse_for_binding();
        }
        self.finish_node();
    }

    fn parse_for_binding(&mut self) {
        self.start_node(SyntaxKind::ForBinding);
        self.expect(SyntaxKind::Dollar, "`$` before binding variable");
        self.parse_eqname("variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        if self.at_kw("allowing") {
            self.start_node(SyntaxKind::AllowingEmpty);
            if !self.dialect.has_allowing_empty() {
                self.error_dialect("`allowing empty`", Dialect::Xquery30);
            }
            self.bump_remap(SyntaxKind::Keyword);
            self.expect_kw("empty");
            self.finish_node();
        }
        if self.at_kw("at") {
            self.parse_positional_var();
        }
        self.expect_kw("in");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `in`");
        }
        self.finish_node();
    }

    fn parse_positional_var(&mut self) {
        self.start_node(SyntaxKind::PositionalVar);
        self.bump_remap(SyntaxKind::Keyword); // at
        self.expect(SyntaxKind::Dollar, "`$` before positional variable");
        self.parse_eqname("positional variable name");
        self.finish_node();
    }

    fn parse_let_clause(&mut self) {
        self.start_node(SyntaxKind::LetClause);
        self.bump_remap(SyntaxKind::Keyword); // let
        self.parse_let_binding();
        while self.eat(SyntaxKind::Comma) {
            self.parse_let_binding();
        }
        self.finish_node();
    }

    fn parse_let_binding(&mut self) {
        self.start_node(SyntaxKind::LetBinding);
        self.expect(SyntaxKind::Dollar, "`$` before binding variable");
        self.parse_eqname("variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        self.expect(SyntaxKind::ColonEq, "`:=` in let binding");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `:=`");
        }
        self.finish_node();
    }

    /// 3.0 `for tumbling|sliding window $v in expr start ... end ...`.
    fn parse_window_clause(&mut self) {
        self.start_node(SyntaxKind::WindowClause);
        if !self.dialect.has_window_clause() {
            self.error_dialect("window clause", Dialect::Xquery30);
        }
        self.bump_remap(SyntaxKind::Keyword); // for
        self.bump_remap(SyntaxKind::Keyword); // tumbling | sliding
        self.expect_kw("window");
        self.expect(SyntaxKind::Dollar, "`$` before window variable");
        self.parse_eqname("window variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        self.expect_kw("in");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `in`");
        }

        if self.at_kw("start") {
            self.start_node(SyntaxKind::WindowStartCondition);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_window_vars();
            self.expect_kw("when");
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `when`");
            }
            self.finish_node();
        } else {
            self.error_missing("expected `start` condition in window clause");
        }

        if self.at_kw("only") || self.at_kw("end") {
            self.start_node(SyntaxKind::WindowEndCondition);
            if self.at_kw("only") {
                self.bump_remap(SyntaxKind::Keyword);
            }
            self.expect_kw("end");
            self.parse_window_vars();
            self.expect_kw("when");
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `when`");
            }
            self.finish_node();
        }
        self.finish_node();
    }

    /// `$current at $pos previous $prev next $next` - all optional.
    fn parse_window_vars(&mut self) {
        self.start_node(SyntaxKind::WindowVars);
        if self.at(SyntaxKind::Dollar) {
            self.bump();
            self.parse_eqname("window variable name");
        }
        if self.at_kw("at") {
            self.parse_positional_var();
        }
        if self.at_kw("previous") {
            self.bump_remap(SyntaxKind::Keyword);
            self.expect(SyntaxKind::Dollar, "`$` after `previous`");
            self.parse_eqname("variable name");
        }
        if self.at_kw("next") {
            self.bump_remap(SyntaxKind::Keyword);
            self.expect(SyntaxKind::Dollar, "`$` after `next`");
            self.parse_eqname("variable name");
        }
        self.finish_node();
    }

    fn parse_count_clause(&mut self) {
        self.start_node(SyntaxKind::CountClause);
        if !self.dialect.has_count_clause() {
            self.error_dialect("count clause", Dialect::Xquery30);
        }
        self.bump_remap(SyntaxKind::Keyword); // count
        self.expect(SyntaxKind::Dollar, "`$` after `count`");
        self.parse_eqname("count variable name");
        self.finish_node();
    }

    fn parse_where_clause(&mut self) {
        self.start_node(SyntaxKind::WhereClause);
        self.bump_remap(SyntaxKind::Keyword);
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `where`");
        }
        self.finish_node();
    }

    /// 3.0 `group by $key := expr collation "uri", ...`.
    fn parse_group_by_clause(&mut self) {
        self.start_node(SyntaxKind::GroupByClause);
        if !self.dialect.has_group_by() {
            self.error_dialect("group by clause", Dialect::Xquery30);
        }
        self.bump_remap(SyntaxKind::Keyword); // group
        self.bump_remap(SyntaxKind::Keyword); // by
        self.parse_grouping_spec();
        while self.eat(SyntaxKind::Comma) {
            self.parse_grouping_spec();
        }
        self.finish_node();
    }

    fn parse_grouping_spec(&mut self) {
        self.start_node(SyntaxKind::GroupingSpec);
        self.expect(SyntaxKind::Dollar, "`$` before grouping variable");
        self.parse_eqname("grouping variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        if self.eat(SyntaxKind::ColonEq) {
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `:=`");
            }
        }
        if self.at_kw("collation") {
            self.bump_remap(SyntaxKind::Keyword);
            if !self.eat(SyntaxKind::StringLiteral) {
                self.error_missing("expected collation URI");
            }
        }
        self.finish_node();
    }

    fn parse_order_by_clause(&mut self, stable: bool) {
        self.start_node(SyntaxKind::OrderByClause);
        if stable {
            self.bump_remap(SyntaxKind::Keyword); // stable
        }
        self.bump_remap(SyntaxKind::Keyword); // order
        self.expect_kw("by");
        self.parse_order_spec();
        while self.eat(SyntaxKind::Comma) {
            self.parse_order_spec();
        }
        self.finish_node();
    }

    fn parse_order_spec(&mut self) {
        self.start_node(SyntaxKind::OrderSpec);
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected ordering expression");
        }

        let modifier = self.checkpoint();
        let mut has_modifier = false;
        if self.at_kw("ascending") || self.at_kw("descending") {
            self.start_node_at(modifier, SyntaxKind::OrderModifier);
            has_modifier = true;
            self.bump_remap(SyntaxKind::Keyword);
        }
        if self.at_kw("empty")
            && (self.nth_is_kw(1, "greatest") || self.nth_is_kw(1, "least"))
        {
            if !has_modifier {
                self.start_node_at(modifier, SyntaxKind::OrderModifier);
                has_modifier = true;
            }
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
        }
        if self.at_kw("collation") {
            if !has_modifier {
                self.start_node_at(modifier, SyntaxKind::OrderModifier);
                has_modifier = true;
            }
            self.bump_remap(SyntaxKind::Keyword);
            if !self.eat(SyntaxKind::StringLiteral) {
                self.error_missing("expected collation URI");
            }
        }
        if has_modifier {
            self.finish_node();
        }
        self.finish_node();
    }

    // --- Branching expressions ---

    fn parse_quantified_expr(&mut self) {
        self.start_node(SyntaxKind::QuantifiedExpr);
        self.bump_remap(SyntaxKind::Keyword); // some | every
        self.parse_quantified_binding();
        while self.eat(SyntaxKind::Comma) {
            self.parse_quantified_binding();
        }
        self.expect_kw("satisfies");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `satisfies`");
        }
        self.finish_node();
    }

    fn parse_quantified_binding(&mut self) {
        self.start_node(SyntaxKind::QuantifiedBinding);
        self.expect(SyntaxKind::Dollar, "`$` before binding variable");
        self.parse_eqname("variable name");
        if self.at_kw("as") {
            self.parse_type_declaration();
        }
        self.expect_kw("in");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `in`");
        }
        self.finish_node();
    }

    /// `if (cond) then a else b` - `else` becomes optional in 4.0.
    fn parse_if_expr(&mut self) {
        self.start_node(SyntaxKind::IfExpr);
        self.bump_remap(SyntaxKind::Keyword); // if
        self.bump(); // (
        if self.can_start_expr() {
            self.parse_expr();
        } else {
            self.error_missing("expected condition");
        }
        self.expect(SyntaxKind::RParen, "`)` after the condition");
        self.expect_kw("then");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `then`");
        }
        if self.at_kw("else") {
            self.bump_remap(SyntaxKind::Keyword);
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `else`");
            }
        } else if !self.dialect.has_ternary() {
            self.error_missing("expected keyword `else`");
        }
        self.finish_node();
    }

    /// 3.0 `switch (expr) case a case b return r ... default return d`.
    fn parse_switch_expr(&mut self) {
        self.start_node(SyntaxKind::SwitchExpr);
        self.bump_remap(SyntaxKind::Keyword); // switch
        self.bump(); // (
        if self.can_start_expr() {
            self.parse_expr();
        } else {
            self.error_missing("expected switch operand");
        }
        self.expect(SyntaxKind::RParen, "`)` after the switch operand");

        let mut saw_case = false;
        while self.at_kw("case") {
            saw_case = true;
            self.start_node(SyntaxKind::SwitchCaseClause);
            while self.at_kw("case") {
                self.bump_remap(SyntaxKind::Keyword);
                if self.can_start_expr() {
                    self.parse_expr_single();
                } else {
                    self.error_missing("expected case operand");
                }
            }
            self.expect_kw("return");
            if self.can_start_expr() {
                self.parse_expr_single();
            } else {
                self.error_missing("expected expression after `return`");
            }
            self.finish_node();
        }
        if !saw_case {
            self.error_missing("expected at least one `case` clause");
        }

        self.expect_kw("default");
        self.expect_kw("return");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `return`");
        }
        self.finish_node();
    }

    /// `typeswitch (expr) case ... default $v? return expr`.
    fn parse_typeswitch_expr(&mut self) {
        self.start_node(SyntaxKind::TypeswitchExpr);
        self.bump_remap(SyntaxKind::Keyword); // typeswitch
        self.bump(); // (
        if self.can_start_expr() {
            self.parse_expr();
        } else {
            self.error_missing("expected typeswitch operand");
        }
        self.expect(SyntaxKind::RParen, "`)` after the typeswitch operand");

        let mut saw_case = false;
        while self.at_kw("case") {
            saw_case = true;
            self.parse_case_clause();
        }
        if !saw_case {
            self.error_missing("expected at least one `case` clause");
        }

        self.expect_kw("default");
        if self.at(SyntaxKind::Dollar) {
            self.bump();
            self.parse_eqname("variable name");
        }
        self.expect_kw("return");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `return`");
        }
        self.finish_node();
    }

    /// `case $v as Type | Type return expr` - type alternatives are 3.0.
    fn parse_case_clause(&mut self) {
        self.start_node(SyntaxKind::CaseClause);
        self.bump_remap(SyntaxKind::Keyword); // case
        if self.at(SyntaxKind::Dollar) {
            self.bump();
            self.parse_eqname("variable name");
            self.expect_kw("as");
        }
        self.parse_sequence_type();
        while self.at(SyntaxKind::Pipe) {
            if !self.dialect.has_string_concat() {
                self.error_dialect("case type alternatives", Dialect::Xquery30);
            }
            self.bump();
            self.parse_sequence_type();
        }
        self.expect_kw("return");
        if self.can_start_expr() {
            self.parse_expr_single();
        } else {
            self.error_missing("expected expression after `return`");
        }
        self.finish_node();
    }

    /// 3.0 `try { expr } catch err1 | err2 { expr } ...`.
    fn parse_try_catch_expr(&mut self) {
        self.start_node(SyntaxKind::TryCatchExpr);

        self.start_node(SyntaxKind::TryClause);
        self.bump_remap(SyntaxKind::Keyword); // try
        self.parse_enclosed_expr();
        self.finish_node();

        let mut saw_catch = false;
        while self.at_kw("catch") {
            saw_catch = true;
            self.start_node(SyntaxKind::CatchClause);
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_catch_error_list();
            self.parse_enclosed_expr();
            self.finish_node();
        }
        if !saw_catch {
            self.error_missing("expected `catch` clause after `try`");
        }
        self.finish_node();
    }

    /// `NameTest (| NameTest)*` - wildcards allowed.
    fn parse_catch_error_list(&mut self) {
        self.start_node(SyntaxKind::CatchErrorList);
        self.parse_catch_name_test();
        while self.eat(SyntaxKind::Pipe) {
            self.parse_catch_name_test();
        }
        self.finish_node();
    }

    fn parse_catch_name_test(&mut self) {
        if self.at_wildcard() {
            self.parse_wildcard();
        } else if self.at_eqname() {
            self.start_node(SyntaxKind::NameTest);
            self.parse_eqname("error name");
            self.finish_node();
        } else {
            self.error_missing("expected error name test");
        }
    }
}
