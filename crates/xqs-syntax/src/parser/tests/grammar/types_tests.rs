use crate::Dialect;
use crate::cst::SyntaxKind;
use crate::parser::tests::{assert_clean, dump31, has_node};

#[test]
fn item_type_with_occurrence() {
    insta::assert_snapshot!(dump31("1 instance of item()*"), @r#"
    Module(0:21)
       MainModule(0:21)
          QueryBody(0:21)
             InstanceofExpr(0:21)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Keyword(2:10)('instance')
                Whitespace(10:11)(' ')
                Keyword(11:13)('of')
                Whitespace(13:14)(' ')
                SequenceType(14:21)
                   AtomicOrUnionType(14:20)
                      Keyword(14:18)('item')
                      LParen(18:19)('(')
                      RParen(19:20)(')')
                   Star(20:21)('*')
    "#);
}

#[test]
fn single_type_in_cast() {
    insta::assert_snapshot!(dump31("1 cast as xs:integer?"), @r#"
    Module(0:21)
       MainModule(0:21)
          QueryBody(0:21)
             CastExpr(0:21)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Keyword(2:6)('cast')
                Whitespace(6:7)(' ')
                Keyword(7:9)('as')
                Whitespace(9:10)(' ')
                SingleType(10:21)
                   QName(10:20)
                      NCName(10:12)('xs')
                      Colon(12:13)(':')
                      NCName(13:20)('integer')
                   Question(20:21)('?')
    "#);
}

#[test]
fn kind_tests() {
    let cases: &[(&str, SyntaxKind)] = &[
        (". instance of node()", SyntaxKind::AnyKindTest),
        (". instance of text()", SyntaxKind::TextTest),
        (". instance of comment()", SyntaxKind::CommentTest),
        (". instance of element(a)", SyntaxKind::ElementTest),
        (". instance of element(a, b?)", SyntaxKind::ElementTest),
        (". instance of element(*)", SyntaxKind::ElementTest),
        (". instance of attribute(a, b)", SyntaxKind::AttributeTest),
        (
            ". instance of document-node(element(root))",
            SyntaxKind::DocumentTest,
        ),
        (
            ". instance of processing-instruction(target)",
            SyntaxKind::PiTest,
        ),
        (". instance of schema-element(x)", SyntaxKind::SchemaElementTest),
        (
            ". instance of schema-attribute(x)",
            SyntaxKind::SchemaAttributeTest,
        ),
        (". instance of namespace-node()", SyntaxKind::NamespaceNodeTest),
    ];
    for (source, kind) in cases {
        let parse = assert_clean(source, Dialect::Xquery31);
        assert!(has_node(&parse, *kind), "missing {kind:?} in {source:?}");
    }
}

#[test]
fn function_tests() {
    let parse = assert_clean("$f instance of function(*)", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::AnyFunctionTest));

    let parse = assert_clean(
        "$f instance of function(xs:integer) as item()*",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::TypedFunctionTest));
}

#[test]
fn map_and_array_tests() {
    let parse = assert_clean("$m instance of map(*)", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::AnyMapTest));

    let parse = assert_clean(
        "$m instance of map(xs:string, item()*)",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::TypedMapTest));

    let parse = assert_clean("$a instance of array(*)", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::AnyArrayTest));

    let parse = assert_clean("$a instance of array(xs:integer)", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::TypedArrayTest));
}

#[test]
fn four_oh_item_types() {
    let parse = assert_clean(
        "$r instance of record(name as xs:string, age? as xs:integer, *)",
        Dialect::Xquery40,
    );
    assert!(has_node(&parse, SyntaxKind::RecordTest));
    assert!(has_node(&parse, SyntaxKind::FieldDeclaration));

    let parse = assert_clean(
        "$e instance of enum(\"red\", \"green\")",
        Dialect::Xquery40,
    );
    assert!(has_node(&parse, SyntaxKind::EnumerationType));

    let parse = assert_clean(
        "$u instance of union(xs:integer, xs:string)",
        Dialect::Xquery40,
    );
    assert!(has_node(&parse, SyntaxKind::LocalUnionType));
}

#[test]
fn single_and_sequence_forms() {
    let parse = assert_clean("1 cast as xs:double?", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::SingleType));

    let parse = assert_clean("() instance of empty-sequence()", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::SequenceType));

    let parse = assert_clean(". instance of (item())", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::ParenthesizedItemType));
}

#[test]
fn type_declarations_in_signatures() {
    let parse = assert_clean(
        "declare function f($a as xs:integer*, $b as map(*)) as element()? { <e/> }; f(1, map {})",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::TypeDeclaration));
    assert!(has_node(&parse, SyntaxKind::ElementTest));
}
