use xqs_syntax::{lex, token_text};

use crate::cli::InputArgs;
use crate::util::load_input;

pub fn run(input: InputArgs) {
    let (source, _) = load_input(&input);
    for token in lex(&source) {
        println!(
            "{:?}({}:{})('{}')",
            token.kind,
            u32::from(token.span.start()),
            u32::from(token.span.end()),
            token_text(&source, &token)
        );
    }
}
