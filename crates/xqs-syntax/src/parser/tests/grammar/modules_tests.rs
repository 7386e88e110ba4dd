use indoc::indoc;

use crate::cst::SyntaxKind;
use crate::parser::tests::{assert_clean, dump31, has_node};
use crate::{Dialect, parse_text};

#[test]
fn empty_input_is_an_empty_module() {
    insta::assert_snapshot!(dump31(""), @"Module(0:0)");
}

#[test]
fn version_declaration_and_body() {
    insta::assert_snapshot!(dump31("xquery version \"1.0\"; 1"), @r#"
    Module(0:23)
       VersionDecl(0:21)
          Keyword(0:6)('xquery')
          Whitespace(6:7)(' ')
          Keyword(7:14)('version')
          Whitespace(14:15)(' ')
          StringLiteral(15:20)('"1.0"')
          Semicolon(20:21)(';')
       Whitespace(21:22)(' ')
       MainModule(22:23)
          QueryBody(22:23)
             Literal(22:23)
                IntegerLiteral(22:23)('1')
    "#);
}

#[test]
fn variable_declaration() {
    insta::assert_snapshot!(dump31("declare variable $x := 1; $x"), @r#"
    Module(0:28)
       MainModule(0:28)
          Prolog(0:25)
             VarDecl(0:25)
                Keyword(0:7)('declare')
                Whitespace(7:8)(' ')
                Keyword(8:16)('variable')
                Whitespace(16:17)(' ')
                Dollar(17:18)('$')
                QName(18:19)
                   NCName(18:19)('x')
                Whitespace(19:20)(' ')
                VarValue(20:24)
                   ColonEq(20:22)(':=')
                   Whitespace(22:23)(' ')
                   Literal(23:24)
                      IntegerLiteral(23:24)('1')
                Semicolon(24:25)(';')
          Whitespace(25:26)(' ')
          QueryBody(26:28)
             VarRef(26:28)
                Dollar(26:27)('$')
                QName(27:28)
                   NCName(27:28)('x')
    "#);
}

#[test]
fn keywords_are_ordinary_names() {
    // Reserved words do not exist; `for` alone is a name test.
    insta::assert_snapshot!(dump31("for"), @r#"
    Module(0:3)
       MainModule(0:3)
          QueryBody(0:3)
             AxisStep(0:3)
                NameTest(0:3)
                   QName(0:3)
                      NCName(0:3)('for')
    "#);
}

#[test]
fn library_module() {
    let parse = assert_clean(
        "module namespace m = \"http://example.com/m\"; declare function m:f($a) { $a };",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::LibraryModule));
    assert!(has_node(&parse, SyntaxKind::ModuleDecl));
    assert!(has_node(&parse, SyntaxKind::FunctionDecl));
    assert!(has_node(&parse, SyntaxKind::Param));
}

#[test]
fn setter_declarations() {
    let cases: &[(&str, SyntaxKind)] = &[
        (
            "declare namespace p = \"u\"; 1",
            SyntaxKind::NamespaceDecl,
        ),
        (
            "declare default element namespace \"u\"; 1",
            SyntaxKind::DefaultNamespaceDecl,
        ),
        (
            "declare boundary-space preserve; 1",
            SyntaxKind::BoundarySpaceDecl,
        ),
        ("declare base-uri \"u\"; 1", SyntaxKind::BaseUriDecl),
        (
            "declare construction strip; 1",
            SyntaxKind::ConstructionDecl,
        ),
        (
            "declare ordering unordered; 1",
            SyntaxKind::OrderingModeDecl,
        ),
        (
            "declare copy-namespaces preserve, no-inherit; 1",
            SyntaxKind::CopyNamespacesDecl,
        ),
        (
            "declare default collation \"u\"; 1",
            SyntaxKind::DefaultCollationDecl,
        ),
        (
            "declare default order empty greatest; 1",
            SyntaxKind::EmptyOrderDecl,
        ),
        ("declare option opt:log \"true\"; 1", SyntaxKind::OptionDecl),
    ];
    for (source, kind) in cases {
        let parse = assert_clean(source, Dialect::Xquery31);
        assert!(has_node(&parse, *kind), "missing {kind:?} in {source:?}");
        assert!(has_node(&parse, SyntaxKind::Prolog));
    }
}

#[test]
fn imports() {
    let parse = assert_clean(
        "import module namespace m = \"u\" at \"a.xq\", \"b.xq\"; 1",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::ModuleImport));

    let parse = assert_clean("import schema namespace s = \"u\"; 1", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::SchemaImport));
    assert!(has_node(&parse, SyntaxKind::SchemaPrefix));

    let parse = assert_clean(
        "import schema default element namespace \"u\"; 1",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::SchemaImport));
}

#[test]
fn three_oh_declarations() {
    let parse = assert_clean("declare context item := .; .", Dialect::Xquery30);
    assert!(has_node(&parse, SyntaxKind::ContextItemDecl));

    let parse = assert_clean(
        "declare decimal-format local:fmt decimal-separator = \",\" grouping-separator = \".\"; 1",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::DecimalFormatDecl));

    let parse = assert_clean(
        "declare %private function local:f() { 1 }; local:f()",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::Annotation));
    assert!(has_node(&parse, SyntaxKind::FunctionDecl));

    let parse = assert_clean(
        "xquery version \"3.0\" encoding \"UTF-8\"; 1",
        Dialect::Xquery30,
    );
    assert!(has_node(&parse, SyntaxKind::VersionDecl));
}

#[test]
fn external_declarations() {
    let parse = assert_clean("declare variable $v external; $v", Dialect::Xquery31);
    assert!(has_node(&parse, SyntaxKind::VarDecl));

    let parse = assert_clean(
        "declare function f($a as item()) as item() external; f(1)",
        Dialect::Xquery31,
    );
    assert!(has_node(&parse, SyntaxKind::TypeDeclaration));
}

#[test]
fn full_program_parses_clean() {
    let source = indoc! {r#"
        xquery version "3.1";
        declare namespace app = "http://example.com/app";
        declare variable $app:limit as xs:integer := 10;
        declare function app:clamp($n as xs:integer) as xs:integer {
            if ($n > $app:limit) then $app:limit else $n
        };
        for $i in 1 to 20
        let $c := app:clamp($i)
        where $c mod 2 = 0
        order by $c descending
        return <row n="{$c}"/>
    "#};
    let parse = parse_text(source, Dialect::Xquery31);
    assert!(parse.ok(), "{:?}", parse.errors().as_slice());
    assert!(has_node(&parse, SyntaxKind::Prolog));
    assert!(has_node(&parse, SyntaxKind::FlworExpr));
    assert!(has_node(&parse, SyntaxKind::DirElemConstructor));
}
