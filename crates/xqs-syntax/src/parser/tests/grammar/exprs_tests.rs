use crate::Dialect;
use crate::cst::SyntaxKind;
use crate::parser::tests::{assert_clean, dump31, has_node};

#[test]
fn integer_literal() {
    insta::assert_snapshot!(dump31("1"), @r#"
    Module(0:1)
       MainModule(0:1)
          QueryBody(0:1)
             Literal(0:1)
                IntegerLiteral(0:1)('1')
    "#);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    insta::assert_snapshot!(dump31("1 + 2 * 3"), @r#"
    Module(0:9)
       MainModule(0:9)
          QueryBody(0:9)
             AdditiveExpr(0:9)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Plus(2:3)('+')
                Whitespace(3:4)(' ')
                MultiplicativeExpr(4:9)
                   Literal(4:5)
                      IntegerLiteral(4:5)('2')
                   Whitespace(5:6)(' ')
                   Star(6:7)('*')
                   Whitespace(7:8)(' ')
                   Literal(8:9)
                      IntegerLiteral(8:9)('3')
    "#);
}

#[test]
fn comma_sequence_wraps_in_expr() {
    insta::assert_snapshot!(dump31("1, 2"), @r#"
    Module(0:4)
       MainModule(0:4)
          QueryBody(0:4)
             Expr(0:4)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Comma(1:2)(',')
                Whitespace(2:3)(' ')
                Literal(3:4)
                   IntegerLiteral(3:4)('2')
    "#);
}

#[test]
fn comparison_does_not_chain() {
    // The second `=` is outside the expression grammar; it ends up wrapped
    // at top level together with its right operand.
    insta::assert_snapshot!(dump31("1 = 2 = 3"), @r#"
    Module(0:9)
       MainModule(0:5)
          QueryBody(0:5)
             ComparisonExpr(0:5)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Eq(2:3)('=')
                Whitespace(3:4)(' ')
                Literal(4:5)
                   IntegerLiteral(4:5)('2')
       Whitespace(5:6)(' ')
       Error(6:7)('unexpected token')
          Eq(6:7)('=')
       Whitespace(7:8)(' ')
       Error(8:9)('unexpected token')
          IntegerLiteral(8:9)('3')
    "#);
}

#[test]
fn value_comparison_keyword() {
    insta::assert_snapshot!(dump31("1 eq 2"), @r#"
    Module(0:6)
       MainModule(0:6)
          QueryBody(0:6)
             ComparisonExpr(0:6)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Keyword(2:4)('eq')
                Whitespace(4:5)(' ')
                Literal(5:6)
                   IntegerLiteral(5:6)('2')
    "#);
}

#[test]
fn unary_minus_inside_range() {
    insta::assert_snapshot!(dump31("-1 to 5"), @r#"
    Module(0:7)
       MainModule(0:7)
          QueryBody(0:7)
             RangeExpr(0:7)
                UnaryExpr(0:2)
                   Minus(0:1)('-')
                   Literal(1:2)
                      IntegerLiteral(1:2)('1')
                Whitespace(2:3)(' ')
                Keyword(3:5)('to')
                Whitespace(5:6)(' ')
                Literal(6:7)
                   IntegerLiteral(6:7)('5')
    "#);
}

#[test]
fn logical_and_set_operators() {
    let parse = assert_clean("1 = 1 or 2 > 1 and 3 != 2", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::OrExpr));
    assert!(has_node(&parse, SyntaxKind::AndExpr));
    assert!(has_node(&parse, SyntaxKind::ComparisonExpr));

    let parse = assert_clean("a union b intersect c", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::UnionExpr));
    assert!(has_node(&parse, SyntaxKind::IntersectExceptExpr));

    let parse = assert_clean("1 div 2 idiv 3 mod 4", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::MultiplicativeExpr));
}

#[test]
fn type_operators() {
    let parse = assert_clean("1 instance of xs:integer", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::InstanceofExpr));
    let parse = assert_clean("$x treat as item()+", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::TreatExpr));
    let parse = assert_clean("\"1\" castable as xs:integer?", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CastableExpr));
    let parse = assert_clean("1 cast as xs:double", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CastExpr));
}

#[test]
fn leading_slash_path() {
    insta::assert_snapshot!(dump31("/a//@b"), @r#"
    Module(0:6)
       MainModule(0:6)
          QueryBody(0:6)
             PathExpr(0:6)
                Slash(0:1)('/')
                AxisStep(1:2)
                   NameTest(1:2)
                      QName(1:2)
                         NCName(1:2)('a')
                SlashSlash(2:4)('//')
                AxisStep(4:6)
                   At(4:5)('@')
                   NameTest(5:6)
                      QName(5:6)
                         NCName(5:6)('b')
    "#);
}

#[test]
fn relative_path() {
    insta::assert_snapshot!(dump31("a/b"), @r#"
    Module(0:3)
       MainModule(0:3)
          QueryBody(0:3)
             PathExpr(0:3)
                AxisStep(0:1)
                   NameTest(0:1)
                      QName(0:1)
                         NCName(0:1)('a')
                Slash(1:2)('/')
                AxisStep(2:3)
                   NameTest(2:3)
                      QName(2:3)
                         NCName(2:3)('b')
    "#);
}

#[test]
fn explicit_axis_with_predicate() {
    insta::assert_snapshot!(dump31("child::item[1]"), @r#"
    Module(0:14)
       MainModule(0:14)
          QueryBody(0:14)
             AxisStep(0:14)
                Keyword(0:5)('child')
                ColonColon(5:7)('::')
                NameTest(7:11)
                   QName(7:11)
                      NCName(7:11)('item')
                Predicate(11:14)
                   LBracket(11:12)('[')
                   Literal(12:13)
                      IntegerLiteral(12:13)('1')
                   RBracket(13:14)(']')
    "#);
}

#[test]
fn wildcard_steps() {
    let parse = assert_clean("*/a/*:b/p:*", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::Wildcard));
    let parse = assert_clean("Q{http://example.com}name", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::QName));
    assert_clean("../following-sibling::x", Dialect::Xquery31);
}

#[test]
fn function_call_with_postfix_predicate() {
    insta::assert_snapshot!(dump31("f(1)[2]"), @r#"
    Module(0:7)
       MainModule(0:7)
          QueryBody(0:7)
             PostfixExpr(0:7)
                FunctionCall(0:4)
                   QName(0:1)
                      NCName(0:1)('f')
                   ArgumentList(1:4)
                      LParen(1:2)('(')
                      Literal(2:3)
                         IntegerLiteral(2:3)('1')
                      RParen(3:4)(')')
                Predicate(4:7)
                   LBracket(4:5)('[')
                   Literal(5:6)
                      IntegerLiteral(5:6)('2')
                   RBracket(6:7)(']')
    "#);
}

#[test]
fn map_lookup() {
    insta::assert_snapshot!(dump31("$m?key"), @r#"
    Module(0:6)
       MainModule(0:6)
          QueryBody(0:6)
             PostfixExpr(0:6)
                VarRef(0:2)
                   Dollar(0:1)('$')
                   QName(1:2)
                      NCName(1:2)('m')
                Lookup(2:6)
                   Question(2:3)('?')
                   KeySpecifier(3:6)
                      NCName(3:6)('key')
    "#);
}

#[test]
fn arrow_application() {
    insta::assert_snapshot!(dump31("\"a\" => f()"), @r#"
    Module(0:10)
       MainModule(0:10)
          QueryBody(0:10)
             ArrowExpr(0:10)
                Literal(0:3)
                   StringLiteral(0:3)('"a"')
                Whitespace(3:4)(' ')
                Arrow(4:6)('=>')
                Whitespace(6:7)(' ')
                QName(7:8)
                   NCName(7:8)('f')
                ArgumentList(8:10)
                   LParen(8:9)('(')
                   RParen(9:10)(')')
    "#);
}

#[test]
fn simple_map_operator() {
    insta::assert_snapshot!(dump31("$x ! ."), @r#"
    Module(0:6)
       MainModule(0:6)
          QueryBody(0:6)
             SimpleMapExpr(0:6)
                VarRef(0:2)
                   Dollar(0:1)('$')
                   QName(1:2)
                      NCName(1:2)('x')
                Whitespace(2:3)(' ')
                Bang(3:4)('!')
                Whitespace(4:5)(' ')
                ContextItemExpr(5:6)
                   Dot(5:6)('.')
    "#);
}

#[test]
fn map_constructor() {
    insta::assert_snapshot!(dump31("map { \"a\" : 1 }"), @r#"
    Module(0:15)
       MainModule(0:15)
          QueryBody(0:15)
             MapConstructor(0:15)
                Keyword(0:3)('map')
                Whitespace(3:4)(' ')
                LBrace(4:5)('{')
                Whitespace(5:6)(' ')
                MapConstructorEntry(6:13)
                   Literal(6:9)
                      StringLiteral(6:9)('"a"')
                   Whitespace(9:10)(' ')
                   Colon(10:11)(':')
                   Whitespace(11:12)(' ')
                   Literal(12:13)
                      IntegerLiteral(12:13)('1')
                Whitespace(13:14)(' ')
                RBrace(14:15)('}')
    "#);
}

#[test]
fn array_constructors_and_lookup_forms() {
    let parse = assert_clean("[1, 2]", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::SquareArrayConstructor));
    let parse = assert_clean("array { 1, 2 }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::CurlyArrayConstructor));
    let parse = assert_clean("?*", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::UnaryLookup));
    let parse = assert_clean("$a?(1 + 1)", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::KeySpecifier));
}

#[test]
fn inline_functions_and_references() {
    let parse = assert_clean(
        "function($x as xs:integer) as xs:integer { $x + 1 }",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::InlineFunctionExpr));
    assert!(has_node(&parse, SyntaxKind::ParamList));
    assert!(has_node(&parse, SyntaxKind::FunctionBody));

    let parse = assert_clean("fn:upper-case#1", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::NamedFunctionRef));

    let parse = assert_clean("f(?, 1)", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::ArgumentPlaceholder));
}

#[test]
fn branching_expressions() {
    let parse = assert_clean("if (1) then 2 else 3", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::IfExpr));

    let parse = assert_clean(
        "some $x in (1, 2) satisfies $x = 1",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::QuantifiedExpr));
    assert!(has_node(&parse, SyntaxKind::QuantifiedBinding));

    let parse = assert_clean(
        "switch (1) case 1 return \"a\" default return \"b\"",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::SwitchExpr));
    assert!(has_node(&parse, SyntaxKind::SwitchCaseClause));

    let parse = assert_clean(
        "typeswitch (.) case $a as xs:integer return $a default return 0",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::TypeswitchExpr));
    assert!(has_node(&parse, SyntaxKind::CaseClause));

    let parse = assert_clean("try { 1 div 0 } catch * { 0 }", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::TryCatchExpr));
    assert!(has_node(&parse, SyntaxKind::CatchClause));
    assert!(has_node(&parse, SyntaxKind::CatchErrorList));
}

#[test]
fn miscellaneous_primaries() {
    let parse = assert_clean("ordered { 1 }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::OrderedExpr));
    let parse = assert_clean("unordered { 1 }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::UnorderedExpr));
    let parse = assert_clean("validate lax { . }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::ValidateExpr));
    let parse = assert_clean("(# x:opt param #) { 1 }", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::ExtensionExpr));
    assert!(has_node(&parse, SyntaxKind::Pragma));
    let parse = assert_clean("\"a\" || \"b\"", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::StringConcatExpr));
}
