use crate::Dialect;
use crate::cst::SyntaxKind;
use crate::parser::tests::{assert_clean, dump31, has_node};

#[test]
fn for_return() {
    insta::assert_snapshot!(dump31("for $x in (1, 2) return $x"), @r#"
    Module(0:26)
       MainModule(0:26)
          QueryBody(0:26)
             FlworExpr(0:26)
                ForClause(0:16)
                   Keyword(0:3)('for')
                   ForBinding(3:16)
                      Whitespace(3:4)(' ')
                      Dollar(4:5)('$')
                      QName(5:6)
                         NCName(5:6)('x')
                      Whitespace(6:7)(' ')
                      Keyword(7:9)('in')
                      Whitespace(9:10)(' ')
                      ParenthesizedExpr(10:16)
                         LParen(10:11)('(')
                         Expr(11:15)
                            Literal(11:12)
                               IntegerLiteral(11:12)('1')
                            Comma(12:13)(',')
                            Whitespace(13:14)(' ')
                            Literal(14:15)
                               IntegerLiteral(14:15)('2')
                         RParen(15:16)(')')
                Whitespace(16:17)(' ')
                ReturnClause(17:26)
                   Keyword(17:23)('return')
                   Whitespace(23:24)(' ')
                   VarRef(24:26)
                      Dollar(24:25)('$')
                      QName(25:26)
                         NCName(25:26)('x')
    "#);
}

#[test]
fn let_return() {
    insta::assert_snapshot!(dump31("let $x := 1 return $x"), @r#"
    Module(0:21)
       MainModule(0:21)
          QueryBody(0:21)
             FlworExpr(0:21)
                LetClause(0:11)
                   Keyword(0:3)('let')
                   LetBinding(3:11)
                      Whitespace(3:4)(' ')
                      Dollar(4:5)('$')
                      QName(5:6)
                         NCName(5:6)('x')
                      Whitespace(6:7)(' ')
                      ColonEq(7:9)(':=')
                      Whitespace(9:10)(' ')
                      Literal(10:11)
                         IntegerLiteral(10:11)('1')
                Whitespace(11:12)(' ')
                ReturnClause(12:21)
                   Keyword(12:18)('return')
                   Whitespace(18:19)(' ')
                   VarRef(19:21)
                      Dollar(19:20)('$')
                      QName(20:21)
                         NCName(20:21)('x')
    "#);
}

#[test]
fn positional_variable() {
    let parse = assert_clean("for $x at $i in (1, 2) return $i", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::PositionalVar));
}

#[test]
fn allowing_empty() {
    let parse = assert_clean(
        "for $x allowing empty in () return $x",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::AllowingEmpty));
}

#[test]
fn where_and_stable_order_by() {
    let parse = assert_clean(
        "for $x in (3, 1, 2) where $x > 1 stable order by $x descending empty least return $x",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::WhereClause));
    assert!(has_node(&parse, SyntaxKind::OrderByClause));
    assert!(has_node(&parse, SyntaxKind::OrderSpec));
    assert!(has_node(&parse, SyntaxKind::OrderModifier));
}

#[test]
fn group_by_with_computed_key() {
    let parse = assert_clean(
        "for $x in (1, 2) group by $k := $x mod 2 return $k",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::GroupByClause));
    assert!(has_node(&parse, SyntaxKind::GroupingSpec));
}

#[test]
fn count_clause() {
    let parse = assert_clean("for $x in (1, 2) count $c return $c", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::CountClause));
}

#[test]
fn tumbling_window() {
    let parse = assert_clean(
        "for tumbling window $w in (1, 2, 3) start $s when true() only end $e when $e - $s eq 1 return $w",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::WindowClause));
    assert!(has_node(&parse, SyntaxKind::WindowStartCondition));
    assert!(has_node(&parse, SyntaxKind::WindowEndCondition));
    assert!(has_node(&parse, SyntaxKind::WindowVars));
}

#[test]
fn sliding_window() {
    let parse = assert_clean(
        "for sliding window $w in (1, 2, 3) start $s at $i when true() end $e when $e - $s eq 1 return $w",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::WindowClause));
    assert!(has_node(&parse, SyntaxKind::PositionalVar));
}

#[test]
fn multiple_bindings_and_interleaved_clauses() {
    let parse = assert_clean(
        "for $x in (1, 2), $y in (3, 4) let $s := $x + $y, $p := $x * $y where $s > 4 return $p",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::ForClause));
    assert!(has_node(&parse, SyntaxKind::LetClause));
    assert!(has_node(&parse, SyntaxKind::WhereClause));
}
