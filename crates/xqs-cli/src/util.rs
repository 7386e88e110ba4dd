use std::fs;
use std::io::{self, Read};

use crate::cli::InputArgs;

/// Loads the query text, plus the path to show in diagnostics when the
/// input came from a real file. Exits with the underlying I/O error when
/// the input cannot be read.
pub fn load_input(args: &InputArgs) -> (String, Option<String>) {
    match read_input(args) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn read_input(args: &InputArgs) -> io::Result<(String, Option<String>)> {
    if let Some(text) = &args.expr {
        return Ok((text.clone(), None));
    }
    if let Some(path) = &args.file {
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, None));
        }
        let source = fs::read_to_string(path)
            .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))?;
        return Ok((source, Some(path.display().to_string())));
    }
    unreachable!("clap requires exactly one input source")
}
