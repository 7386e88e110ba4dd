use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use xqs_syntax::Dialect;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Parser)]
#[command(name = "xqs", bin_name = "xqs")]
#[command(about = "Parse XQuery into a lossless syntax tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the concrete syntax tree
    #[command(after_help = r#"EXAMPLES:
  xqs tree -e 'for $x in (1, 2) return $x'
  xqs tree query.xq
  xqs tree query.xq --dialect 1.0
  cat query.xq | xqs tree -"#)]
    Tree {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        dialect: DialectArg,
    },

    /// Report syntax errors (silent when the input is clean)
    #[command(after_help = r#"EXAMPLES:
  xqs check query.xq
  xqs check -e '1 +' --format json
  xqs check query.xq --dialect 4.0"#)]
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        dialect: DialectArg,

        /// Diagnostics format
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: OutputFormat,

        /// Colorize output (auto-detected by default)
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,
    },

    /// Print the raw token stream
    Tokens {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
#[group(id = "input", required = true, multiple = false)]
pub struct InputArgs {
    /// Source file (use "-" for stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Query as inline text
    #[arg(short = 'e', long = "expr", value_name = "QUERY")]
    pub expr: Option<String>,
}

#[derive(Args)]
pub struct DialectArg {
    /// XQuery version to parse as: 1.0, 3.0, 3.1 or 4.0
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "VERSION",
        default_value = "3.1",
        value_parser = parse_dialect
    )]
    pub dialect: Dialect,
}

fn parse_dialect(value: &str) -> Result<Dialect, String> {
    Dialect::from_version_str(value)
        .ok_or_else(|| format!("unknown dialect '{}' (expected 1.0, 3.0, 3.1 or 4.0)", value))
}
