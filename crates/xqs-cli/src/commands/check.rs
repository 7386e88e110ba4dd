use xqs_syntax::{Dialect, DiagnosticsPrinter, parse_text};

use crate::cli::{ColorChoice, InputArgs, OutputFormat};
use crate::util::load_input;

pub fn run(input: InputArgs, dialect: Dialect, format: OutputFormat, color: ColorChoice) {
    let (source, path) = load_input(&input);
    let parse = parse_text(&source, dialect);

    if parse.ok() {
        // Silent on success (like cargo check)
        return;
    }

    match format {
        OutputFormat::Text => {
            let mut printer = DiagnosticsPrinter::new(parse.errors())
                .source(&source)
                .colored(color.should_colorize());
            if let Some(path) = &path {
                printer = printer.path(path);
            }
            eprintln!("{}", printer.render());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(parse.errors())
                .expect("diagnostics always serialize");
            println!("{}", json);
        }
    }
    std::process::exit(1);
}
