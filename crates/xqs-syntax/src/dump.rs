//! Canonical tree dump.
//!
//! One line per node or leaf, indented three spaces per nesting level.
//! Interior nodes render as `Kind(start:end)`; leaves append their literal
//! text as `Kind(start:end)('text')`. `Error` nodes render in leaf form with
//! the paired diagnostic's message in the text position, matched positionally:
//! the n-th `Error` node in preorder takes the n-th diagnostic. Offsets are
//! half-open byte ranges; zero-width ranges render as `(n:n)`.
//!
//! Golden tests compare this output byte for byte, so any change here is a
//! breaking change to the test corpus.

use std::fmt::Write;

use rowan::NodeOrToken;

use crate::cst::{SyntaxKind, SyntaxNode};
use crate::diagnostics::Diagnostics;

/// Renders `root` and its paired diagnostics in the canonical format.
pub fn dump(root: &SyntaxNode, errors: &Diagnostics) -> String {
    let mut out = String::new();
    let mut next_error = 0usize;
    dump_node(root, errors, &mut next_error, 0, &mut out);
    debug_assert_eq!(
        next_error,
        errors.len(),
        "diagnostic count must match Error node count"
    );
    out
}

fn dump_node(
    node: &SyntaxNode,
    errors: &Diagnostics,
    next_error: &mut usize,
    depth: usize,
    out: &mut String,
) {
    let range = node.text_range();
    let start = u32::from(range.start());
    let end = u32::from(range.end());
    indent(out, depth);

    if node.kind() == SyntaxKind::Error {
        let message = errors
            .as_slice()
            .get(*next_error)
            .map_or("", |e| e.message.as_str());
        *next_error += 1;
        let _ = writeln!(out, "Error({start}:{end})('{message}')");
    } else {
        let _ = writeln!(out, "{:?}({start}:{end})", node.kind());
    }

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => {
                dump_node(&child, errors, next_error, depth + 1, out);
            }
            NodeOrToken::Token(token) => {
                let range = token.text_range();
                indent(out, depth + 1);
                let _ = writeln!(
                    out,
                    "{:?}({}:{})('{}')",
                    token.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    token.text()
                );
            }
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("   ");
    }
}
