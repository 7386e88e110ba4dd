use xqs_syntax::{Dialect, parse_text};

use crate::cli::InputArgs;
use crate::util::load_input;

pub fn run(input: InputArgs, dialect: Dialect) {
    let (source, _) = load_input(&input);
    let parse = parse_text(&source, dialect);
    print!("{}", parse.dump());
}
