//! Sequence types, item types and kind tests.

use crate::cst::SyntaxKind;
use crate::dialect::Dialect;

use super::super::core::Parser;

impl Parser<'_> {
    /// `as SequenceType`, wrapped in a `TypeDeclaration` node.
    pub(in super::super) fn parse_type_declaration(&mut self) {
        self.start_node(SyntaxKind::TypeDeclaration);
        self.expect_kw("as");
        self.parse_sequence_type();
        self.finish_node();
    }

    /// `empty-sequence()` or `ItemType` with an optional occurrence
    /// indicator (`?`, `*`, `+`).
    pub(in super::super) fn parse_sequence_type(&mut self) {
        // Peek first so leading trivia attaches to the enclosing node.
        self.current();
        self.start_node(SyntaxKind::SequenceType);

        if self.at_kw("empty-sequence") && self.nth(1) == SyntaxKind::LParen {
            self.bump_remap(SyntaxKind::Keyword);
            self.bump();
            self.expect(SyntaxKind::RParen, "`)` after `empty-sequence(`");
            self.finish_node();
            return;
        }

        self.parse_item_type();

        // Occurrence indicators bind to the type, never to a following
        // expression; the grammar position makes this unambiguous.
        if matches!(
            self.current(),
            SyntaxKind::Question | SyntaxKind::Star | SyntaxKind::Plus
        ) {
            self.bump();
        }

        self.finish_node();
    }

    pub(in super::super) fn parse_item_type(&mut self) {
        if self.at(SyntaxKind::LParen) {
            self.start_node(SyntaxKind::ParenthesizedItemType);
            self.bump();
            self.parse_item_type();
            self.expect(SyntaxKind::RParen, "`)` after item type");
            self.finish_node();
            return;
        }

        if self.at(SyntaxKind::Percent) || (self.at_kw("function") && self.nth(1) == SyntaxKind::LParen) {
            self.parse_function_test();
            return;
        }

        if self.current() != SyntaxKind::NCName && self.current() != SyntaxKind::BracedUriLiteral {
            self.error_missing("expected item type");
            return;
        }

        // Keyword-led tests need a `(` to be tests; a bare `element` is an
        // ordinary type name.
        if self.nth(1) == SyntaxKind::LParen && self.current() == SyntaxKind::NCName {
            match self.current_text() {
                "item" => {
                    self.start_node(SyntaxKind::AtomicOrUnionType);
                    self.bump_remap(SyntaxKind::Keyword);
                    self.bump();
                    self.expect(SyntaxKind::RParen, "`)` after `item(`");
                    self.finish_node();
                    return;
                }
                "map" if self.dialect.has_maps_arrays() => {
                    self.parse_map_test();
                    return;
                }
                "array" if self.dialect.has_maps_arrays() => {
                    self.parse_array_test();
                    return;
                }
                "record" if self.dialect.has_record_test() => {
                    self.parse_record_test();
                    return;
                }
                "enum" if self.dialect.has_enum_type() => {
                    self.parse_enum_type();
                    return;
                }
                "union" if self.dialect.has_local_union_type() => {
                    self.parse_local_union_type();
                    return;
                }
                _ => {}
            }
            if self.at_kind_test() {
                self.parse_kind_test();
                return;
            }
        }

        self.start_node(SyntaxKind::AtomicOrUnionType);
        self.parse_eqname("type name");
        self.finish_node();
    }

    /// `EQName "?"` - the cast/castable target form.
    pub(in super::super) fn parse_single_type(&mut self) {
        // Peek first so leading trivia attaches to the enclosing node.
        self.current();
        self.start_node(SyntaxKind::SingleType);
        self.parse_eqname("type name");
        self.eat(SyntaxKind::Question);
        self.finish_node();
    }

    /// True when the current `NCName "("` pair begins a kind test.
    pub(in super::super) fn at_kind_test(&mut self) -> bool {
        if self.current() != SyntaxKind::NCName || self.nth(1) != SyntaxKind::LParen {
            return false;
        }
        matches!(
            self.current_text(),
            "node"
                | "document-node"
                | "text"
                | "comment"
                | "processing-instruction"
                | "attribute"
                | "schema-attribute"
                | "element"
                | "schema-element"
        ) || (self.current_text() == "namespace-node" && self.dialect.has_namespace_node_test())
    }

    /// Any of the node kind tests. The caller has checked `at_kind_test`.
    pub(in super::super) fn parse_kind_test(&mut self) {
        let kind = match self.current_text() {
            "node" => SyntaxKind::AnyKindTest,
            "document-node" => SyntaxKind::DocumentTest,
            "text" => SyntaxKind::TextTest,
            "comment" => SyntaxKind::CommentTest,
            "namespace-node" => SyntaxKind::NamespaceNodeTest,
            "processing-instruction" => SyntaxKind::PiTest,
            "attribute" => SyntaxKind::AttributeTest,
            "schema-attribute" => SyntaxKind::SchemaAttributeTest,
            "element" => SyntaxKind::ElementTest,
            "schema-element" => SyntaxKind::SchemaElementTest,
            other => unreachable!("parse_kind_test called on `{other}`"),
        };

        self.start_node(kind);
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (

        match kind {
            SyntaxKind::AnyKindTest
            | SyntaxKind::TextTest
            | SyntaxKind::CommentTest
            | SyntaxKind::NamespaceNodeTest => {}
            SyntaxKind::DocumentTest => {
                // document-node(element(...)) | document-node(schema-element(...))
                if self.at_kind_test() {
                    self.parse_kind_test();
                }
            }
            SyntaxKind::PiTest => {
                if self.at(SyntaxKind::NCName) {
                    self.bump();
                } else if self.at(SyntaxKind::StringLiteral) {
                    self.bump();
                }
            }
            SyntaxKind::ElementTest | SyntaxKind::AttributeTest => {
                if self.at_eqname() || self.at(SyntaxKind::Star) {
                    if self.at(SyntaxKind::Star) {
                        self.bump();
                    } else {
                        self.parse_eqname("element name");
                    }
                    if self.eat(SyntaxKind::Comma) {
                        self.parse_eqname("type name");
                        // element(n, type?) - optional nillable marker
                        if kind == SyntaxKind::ElementTest {
                            self.eat(SyntaxKind::Question);
                        }
                    }
                }
            }
            SyntaxKind::SchemaElementTest | SyntaxKind::SchemaAttributeTest => {
                self.parse_eqname("schema element name");
            }
            _ => unreachable!(),
        }

        self.expect(SyntaxKind::RParen, "`)` to close the kind test");
        self.finish_node();
    }

    /// `%ann ... function(*)` or `function(types) as type`. Annotations on a
    /// function test are 3.0 syntax like the tests themselves.
    fn parse_function_test(&mut self) {
        if !self.dialect.has_function_test() {
            self.error_dialect("function test", Dialect::Xquery30);
        }

        let checkpoint = self.checkpoint();
        while self.at(SyntaxKind::Percent) {
            self.parse_annotation();
        }

        // function(*) vs function(type, ...) as type
        let any = self.nth(2) == SyntaxKind::Star && self.nth(3) == SyntaxKind::RParen;
        self.start_node_at(
            checkpoint,
            if any {
                SyntaxKind::AnyFunctionTest
            } else {
                SyntaxKind::TypedFunctionTest
            },
        );
        self.expect_kw("function");
        self.expect(SyntaxKind::LParen, "`(` after `function`");

        if any {
            self.bump(); // *
            self.bump(); // )
        } else {
            if !self.at(SyntaxKind::RParen) {
                self.parse_sequence_type();
                while self.eat(SyntaxKind::Comma) {
                    self.parse_sequence_type();
                }
            }
            self.expect(SyntaxKind::RParen, "`)` after parameter types");
            self.expect_kw("as");
            self.parse_sequence_type();
        }
        self.finish_node();
    }

    /// `map(*)` or `map(KeyType, ValueType)`.
    fn parse_map_test(&mut self) {
        let any = self.nth(2) == SyntaxKind::Star;
        self.start_node(if any {
            SyntaxKind::AnyMapTest
        } else {
            SyntaxKind::TypedMapTest
        });
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (
        if any {
            self.bump();
        } else {
            self.parse_item_type();
            self.expect(SyntaxKind::Comma, "`,` between map key and value types");
            self.parse_sequence_type();
        }
        self.expect(SyntaxKind::RParen, "`)` to close the map test");
        self.finish_node();
    }

    /// `array(*)` or `array(MemberType)`.
    fn parse_array_test(&mut self) {
        let any = self.nth(2) == SyntaxKind::Star;
        self.start_node(if any {
            SyntaxKind::AnyArrayTest
        } else {
            SyntaxKind::TypedArrayTest
        });
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (
        if any {
            self.bump();
        } else {
            self.parse_sequence_type();
        }
        self.expect(SyntaxKind::RParen, "`)` to close the array test");
        self.finish_node();
    }

    /// 4.0 `record(name as type, ..., *)`.
    fn parse_record_test(&mut self) {
        self.start_node(SyntaxKind::RecordTest);
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (

        if !self.at(SyntaxKind::RParen) {
            loop {
                if self.eat(SyntaxKind::Star) {
                    // Extensibility marker must be last.
                    break;
                }
                self.parse_field_declaration();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        self.expect(SyntaxKind::RParen, "`)` to close the record test");
        self.finish_node();
    }

    /// One `name as type` (or `name? as type`) field of a record test.
    fn parse_field_declaration(&mut self) {
        self.start_node(SyntaxKind::FieldDeclaration);
        if self.at(SyntaxKind::NCName) {
            self.bump();
        } else if self.at(SyntaxKind::StringLiteral) {
            self.bump();
        } else {
            self.error_missing("expected field name");
        }
        self.eat(SyntaxKind::Question);
        if self.at_kw("as") {
            self.bump_remap(SyntaxKind::Keyword);
            self.parse_sequence_type();
        }
        self.finish_node();
    }

    /// 4.0 `enum("a", "b")`.
    fn parse_enum_type(&mut self) {
        self.start_node(SyntaxKind::EnumerationType);
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (
        loop {
            if !self.eat(SyntaxKind::StringLiteral) {
                self.error_missing("expected string literal in enum type");
                break;
            }
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "`)` to close the enum type");
        self.finish_node();
    }

    /// 4.0 `union(a:t1, b:t2)`.
    fn parse_local_union_type(&mut self) {
        self.start_node(SyntaxKind::LocalUnionType);
        self.bump_remap(SyntaxKind::Keyword);
        self.bump(); // (
        if !self.at(SyntaxKind::RParen) {
            self.parse_eqname("member type name");
            while self.eat(SyntaxKind::Comma) {
                self.parse_eqname("member type name");
            }
        }
        self.expect(SyntaxKind::RParen, "`)` to close the union type");
        self.finish_node();
    }
}
