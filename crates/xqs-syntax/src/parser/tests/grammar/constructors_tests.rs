use crate::Dialect;
use crate::cst::SyntaxKind;
use crate::parser::tests::{assert_clean, dump31, has_node};

#[test]
fn direct_element_with_text() {
    insta::assert_snapshot!(dump31("<a>x</a>"), @r#"
    Module(0:8)
       MainModule(0:8)
          QueryBody(0:8)
             DirElemConstructor(0:8)
                Lt(0:1)('<')
                QName(1:2)
                   NCName(1:2)('a')
                Gt(2:3)('>')
                DirText(3:4)('x')
                ClosingTagStart(4:6)('</')
                QName(6:7)
                   NCName(6:7)('a')
                Gt(7:8)('>')
    "#);
}

#[test]
fn empty_element_with_attribute() {
    insta::assert_snapshot!(dump31("<a b=\"1\"/>"), @r#"
    Module(0:10)
       MainModule(0:10)
          QueryBody(0:10)
             DirElemConstructor(0:10)
                Lt(0:1)('<')
                QName(1:2)
                   NCName(1:2)('a')
                Whitespace(2:3)(' ')
                DirAttributeList(3:8)
                   DirAttribute(3:8)
                      QName(3:4)
                         NCName(3:4)('b')
                      Eq(4:5)('=')
                      DirAttributeValue(5:8)
                         Quot(5:6)('"')
                         AttrText(6:7)('1')
                         Quot(7:8)('"')
                EmptyTagClose(8:10)('/>')
    "#);
}

#[test]
fn nested_elements_and_interpolations() {
    let parse = assert_clean("<out a=\"{1}\">t<in/>{2}</out>", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::DirAttributeValue));
    assert!(has_node(&parse, SyntaxKind::EnclosedExpr));
    assert_eq!(
        parse
            .syntax()
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::DirElemConstructor)
            .count(),
        2
    );
}

#[test]
fn mismatched_closing_tag() {
    insta::assert_snapshot!(dump31("<a></b>"), @r#"
    Module(0:7)
       MainModule(0:7)
          QueryBody(0:7)
             DirElemConstructor(0:7)
                Lt(0:1)('<')
                QName(1:2)
                   NCName(1:2)('a')
                Gt(2:3)('>')
                ClosingTagStart(3:5)('</')
                QName(5:6)
                   NCName(5:6)('b')
                Error(6:6)('mismatched closing tag: expected `</a>`, found `</b>`')
                Gt(6:7)('>')
    "#);
}

#[test]
fn missing_closing_tag() {
    insta::assert_snapshot!(dump31("<a>text"), @r#"
    Module(0:7)
       MainModule(0:7)
          QueryBody(0:7)
             DirElemConstructor(0:7)
                Lt(0:1)('<')
                QName(1:2)
                   NCName(1:2)('a')
                Gt(2:3)('>')
                DirText(3:7)('text')
                Error(7:7)('missing closing tag for `<a>`')
    "#);
}

#[test]
fn xml_comment_constructor() {
    insta::assert_snapshot!(dump31("<!-- c -->"), @r#"
    Module(0:10)
       MainModule(0:10)
          QueryBody(0:10)
             DirCommentConstructor(0:10)
                XmlComment(0:10)('<!-- c -->')
    "#);
}

#[test]
fn pi_and_cdata() {
    let parse = assert_clean("<?target data?>", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::DirPiConstructor));

    assert_clean("<a><![CDATA[1 < 2]]></a>", Dialect::Xquery31);
}

#[test]
fn character_references_and_escapes() {
    assert_clean("<a>&lt;&#x20;{{}}</a>", Dialect::Xquery31);
    assert_clean("<a b=\"x&quot;y\"/>", Dialect::Xquery31);
}

#[test]
fn string_constructor() {
    insta::assert_snapshot!(dump31("``[a`{1}`b]``"), @r#"
    Module(0:13)
       MainModule(0:13)
          QueryBody(0:13)
             StringConstructor(0:13)
                StrConstrStart(0:3)('``[')
                StrConstrText(3:4)('a')
                StringConstructorInterpolation(4:9)
                   StrInterpStart(4:6)('`{')
                   Literal(6:7)
                      IntegerLiteral(6:7)('1')
                   StrInterpEnd(7:9)('}`')
                StrConstrText(9:10)('b')
                StrConstrEnd(10:13)(']``')
    "#);
}

#[test]
fn computed_constructors() {
    let parse = assert_clean(
        "element e { attribute a { 1 }, text { \"t\" } }",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::CompElemConstructor));
    assert!(has_node(&parse, SyntaxKind::CompAttrConstructor));
    assert!(has_node(&parse, SyntaxKind::CompTextConstructor));

    let parse = assert_clean("document { <a/> }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CompDocConstructor));

    let parse = assert_clean("comment { \"c\" }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CompCommentConstructor));

    let parse = assert_clean("processing-instruction pi { \"d\" }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CompPiConstructor));

    let parse = assert_clean("namespace p { \"http://e\" }", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::CompNamespaceConstructor));

    // Computed name: element { name-expr } { content }
    let parse = assert_clean("element { \"n\" } { 1 }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CompElemConstructor));
}
