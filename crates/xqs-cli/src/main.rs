mod cli;
mod commands;
mod util;

use clap::Parser;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Tree { input, dialect } => commands::tree::run(input, dialect.dialect),
        Command::Check {
            input,
            dialect,
            format,
            color,
        } => commands::check::run(input, dialect.dialect, format, color),
        Command::Tokens { input } => commands::tokens::run(input),
    }
}
