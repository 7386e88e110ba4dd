//! Parser tests over the canonical tree dump.
//!
//! Most tests compare `Parse::dump` output byte for byte; the dump format
//! encodes node kinds, byte ranges, token text and the message of every
//! paired diagnostic, so one snapshot pins the whole contract for an input.

mod grammar;

use crate::cst::SyntaxKind;
use crate::{Dialect, Parse, parse_text};

fn parse31(source: &str) -> Parse {
    parse_text(source, Dialect::Xquery31)
}

fn dump31(source: &str) -> String {
    parse31(source).dump()
}

fn dump_with(source: &str, dialect: Dialect) -> String {
    parse_text(source, dialect).dump()
}

fn assert_clean(source: &str, dialect: Dialect) -> Parse {
    let parse = parse_text(source, dialect);
    assert!(
        parse.ok(),
        "unexpected errors in {source:?}: {:?}",
        parse.errors().as_slice()
    );
    parse
}

fn has_node(parse: &Parse, kind: SyntaxKind) -> bool {
    parse.syntax().descendants().any(|node| node.kind() == kind)
}

/// Non-trivia kinds in preorder, `Error` nodes excluded. Two parses with the
/// same shape differ only in diagnostics.
fn shape(source: &str, dialect: Dialect) -> Vec<SyntaxKind> {
    parse_text(source, dialect)
        .syntax()
        .descendants_with_tokens()
        .map(|element| element.kind())
        .filter(|kind| *kind != SyntaxKind::Error && !kind.is_trivia())
        .collect()
}

const ALL_DIALECTS: [Dialect; 4] = [
    Dialect::Xquery10,
    Dialect::Xquery30,
    Dialect::Xquery31,
    Dialect::Xquery40,
];

/// The structural guarantees that hold for any input whatsoever: the tree
/// reproduces the source, tokens tile it without gaps, and every diagnostic
/// pairs with exactly one `Error` node.
fn assert_tree_invariants(source: &str, dialect: Dialect) {
    let parse = parse_text(source, dialect);
    let root = parse.syntax();
    assert_eq!(
        root.text().to_string(),
        source,
        "tree must reproduce the input"
    );

    let mut offset = 0u32;
    for token in root.descendants_with_tokens().filter_map(|e| e.into_token()) {
        assert_eq!(
            u32::from(token.text_range().start()),
            offset,
            "gap before {token:?} in {source:?}"
        );
        offset = u32::from(token.text_range().end());
    }
    assert_eq!(offset as usize, source.len(), "tokens must tile {source:?}");

    let error_nodes = root
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Error)
        .count();
    assert_eq!(
        error_nodes,
        parse.errors().len(),
        "diagnostics must pair one-to-one with Error nodes in {source:?}"
    );
}

mod invariants {
    use super::*;

    #[test]
    fn adversarial_inputs_keep_tree_invariants() {
        const INPUTS: &[&str] = &[
            "",
            "<!",
            "1 +",
            "((((",
            "}}}",
            "\"abc",
            "for $x in",
            "declare variable",
            "<a><b></a>",
            "``[x",
            "1 2 3",
            "$",
            "a:b:c",
            "1e",
            "?*",
            "let $x := <a b=\"",
            "switch (1) case",
            "element {",
            "(: oops",
            "^\u{FFFE}\u{FFFF}",
            "<a>'</a>'",
            "<a>(:</a>:)",
        ];
        for input in INPUTS {
            for dialect in ALL_DIALECTS {
                assert_tree_invariants(input, dialect);
            }
        }
    }

    #[test]
    fn trailing_whitespace_changes_only_offsets() {
        const INPUTS: &[&str] = &["1 +", "((((", "for $x in", "<a>text", "}}}"];
        let summarize = |parse: &Parse| {
            parse
                .errors()
                .iter()
                .map(|e| (e.kind, e.message.clone()))
                .collect::<Vec<_>>()
        };
        for input in INPUTS {
            let padded = format!("{input}\n");
            assert_eq!(
                shape(input, Dialect::Xquery31),
                shape(&padded, Dialect::Xquery31),
                "node kinds changed for {input:?}"
            );
            let before = parse_text(input, Dialect::Xquery31);
            let after = parse_text(&padded, Dialect::Xquery31);
            assert_eq!(summarize(&before), summarize(&after), "{input:?}");
        }
    }

    #[test]
    fn well_formed_inputs_keep_tree_invariants() {
        const INPUTS: &[&str] = &[
            "1",
            "xquery version \"3.1\"; for $x in (1, 2) return $x * 2",
            "<a b=\"{1}\">text<c/></a>",
            "declare function f($x) { $x }; f(1)",
        ];
        for input in INPUTS {
            assert_tree_invariants(input, Dialect::Xquery31);
        }
    }
}

mod json_serialization {
    use crate::{Dialect, parse_text};

    #[test]
    fn errors_serialize_with_byte_ranges() {
        let parse = parse_text("1 +", Dialect::Xquery31);
        let json = serde_json::to_string_pretty(parse.errors()).unwrap();
        insta::assert_snapshot!(json, @r#"
        [
          {
            "kind": "missing",
            "range": {
              "start": 3,
              "end": 3
            },
            "message": "expected expression after additive operator"
          }
        ]
        "#);
    }

    #[test]
    fn error_kinds_serialize_snake_case() {
        let parse = parse_text("<a></b>", Dialect::Xquery31);
        let json = serde_json::to_string_pretty(parse.errors()).unwrap();
        insta::assert_snapshot!(json, @r#"
        [
          {
            "kind": "invalid_nesting",
            "range": {
              "start": 5,
              "end": 6
            },
            "message": "mismatched closing tag: expected `</a>`, found `</b>`"
          }
        ]
        "#);
    }
}
