use crate::diagnostics::ErrorKind;
use crate::parser::tests::{ALL_DIALECTS, assert_clean, dump_with, shape};
use crate::{Dialect, parse_text};

#[test]
fn string_concat_flagged_under_10() {
    // Punctuation-spelled operators always parse; an older dialect only
    // adds the diagnostic, never changes the shape.
    insta::assert_snapshot!(dump_with("1 || 2", Dialect::Xquery10), @r#"
    Module(0:6)
       MainModule(0:6)
          QueryBody(0:6)
             StringConcatExpr(0:6)
                Literal(0:1)
                   IntegerLiteral(0:1)('1')
                Whitespace(1:2)(' ')
                Error(2:2)('string concatenation operator requires XQuery 3.0 (parsing as 1.0)')
                PipePipe(2:4)('||')
                Whitespace(4:5)(' ')
                Literal(5:6)
                   IntegerLiteral(5:6)('2')
    "#);
}

#[test]
fn punctuation_operators_keep_their_shape() {
    let cases = ["1 || 2", "$m?k", "$x ! .", "\"a\" => f()", "?*"];
    for source in cases {
        let reference = shape(source, Dialect::Xquery40);
        for dialect in ALL_DIALECTS {
            assert_eq!(
                shape(source, dialect),
                reference,
                "shape of {source:?} changed under {dialect}"
            );
        }
    }
}

#[test]
fn keyword_construct_falls_back_to_names_under_10() {
    insta::assert_snapshot!(dump_with("map { }", Dialect::Xquery10), @r#"
    Module(0:7)
       MainModule(0:3)
          QueryBody(0:3)
             AxisStep(0:3)
                NameTest(0:3)
                   QName(0:3)
                      NCName(0:3)('map')
       Whitespace(3:4)(' ')
       Error(4:5)('unexpected token')
          LBrace(4:5)('{')
       Whitespace(5:6)(' ')
       Error(6:7)('unexpected token')
          RBrace(6:7)('}')
    "#);
}

#[test]
fn map_constructor_under_31() {
    insta::assert_snapshot!(dump_with("map { }", Dialect::Xquery31), @r#"
    Module(0:7)
       MainModule(0:7)
          QueryBody(0:7)
             MapConstructor(0:7)
                Keyword(0:3)('map')
                Whitespace(3:4)(' ')
                LBrace(4:5)('{')
                Whitespace(5:6)(' ')
                RBrace(6:7)('}')
    "#);
}

#[test]
fn raising_the_dialect_never_adds_errors() {
    let cases = [
        "1 || 2",
        "$m?k",
        "map { }",
        "``[x]``",
        "1 ?? 2 !! 3",
        "switch (1) case 1 return 2 default return 3",
        "try { 1 } catch * { 0 }",
        "$x ! .",
        "if (1) then 2",
    ];
    for source in cases {
        let counts: Vec<usize> = ALL_DIALECTS
            .iter()
            .map(|dialect| parse_text(source, *dialect).errors().len())
            .collect();
        for pair in counts.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "error count increased for {source:?}: {counts:?}"
            );
        }
    }
}

#[test]
fn ternary_reported_under_31() {
    let parse = parse_text("1 ?? 2 !! 3", Dialect::Xquery31);
    assert_eq!(parse.errors().len(), 1);
    let error = &parse.errors().as_slice()[0];
    assert_eq!(error.kind, ErrorKind::UnsupportedSyntax);
    assert_eq!(error.code(), "XPST0003");
    assert_eq!(
        error.message,
        "ternary conditional requires XQuery 4.0 (parsing as 3.1)"
    );
}

#[test]
fn arrow_reported_under_30() {
    let parse = parse_text("\"a\" => f()", Dialect::Xquery30);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(
        parse.errors().as_slice()[0].message,
        "`=>` arrow operator requires XQuery 3.1 (parsing as 3.0)"
    );
}

#[test]
fn four_oh_constructs_parse_clean_under_40() {
    assert_clean("1 ?? 2 !! 3", Dialect::Xquery40);
    assert_clean("$x otherwise 0", Dialect::Xquery40);
    assert_clean("if (1) then 2", Dialect::Xquery40);
    assert_clean("fn($x) { $x }", Dialect::Xquery40);
    assert_clean("-> { . }", Dialect::Xquery40);
    assert_clean("$x -> f()", Dialect::Xquery40);
    assert_clean("$m?\"key\"", Dialect::Xquery40);
}

#[test]
fn unsupported_version_string() {
    let source = "xquery version \"2.0\"; 1";
    let parse = parse_text(source, Dialect::Xquery31);
    assert_eq!(parse.errors().len(), 1);
    let error = &parse.errors().as_slice()[0];
    assert_eq!(error.code(), "XQST0031");
    assert_eq!(error.kind, ErrorKind::UnsupportedVersion);
    insta::assert_snapshot!(parse.dump(), @r#"
    Module(0:23)
       VersionDecl(0:21)
          Keyword(0:6)('xquery')
          Whitespace(6:7)(' ')
          Keyword(7:14)('version')
          Whitespace(14:15)(' ')
          StringLiteral(15:20)('"2.0"')
          Error(20:20)('unsupported XQuery version `2.0`')
          Semicolon(20:21)(';')
       Whitespace(21:22)(' ')
       MainModule(22:23)
          QueryBody(22:23)
             Literal(22:23)
                IntegerLiteral(22:23)('1')
    "#);
}
