//! XQuery language versions and their syntactic capabilities.
//!
//! The parser recognizes every construct of every dialect and gates the
//! newer ones behind predicates on [`Dialect`]. A construct spelled with
//! punctuation (`||`, `?`, `=>`, ...) parses into its full tree shape under
//! any dialect, plus an error naming the required version, so raising the
//! dialect only removes the error. Keyword-introduced constructs (`map {`,
//! `switch`, ...) read as ordinary names under dialects that predate them;
//! their shape appears once the dialect is high enough. In both cases the
//! error count never grows when the dialect is raised.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language version the parser targets. Ordered: later dialects accept
/// everything earlier ones do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "1.0")]
    Xquery10,
    #[serde(rename = "3.0")]
    Xquery30,
    #[serde(rename = "3.1")]
    Xquery31,
    /// XQuery 4.0 Editor's Draft.
    #[serde(rename = "4.0")]
    Xquery40,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Xquery31
    }
}

impl Dialect {
    /// The version string a `xquery version "..."` declaration must carry
    /// to select this dialect.
    pub fn version_str(self) -> &'static str {
        match self {
            Dialect::Xquery10 => "1.0",
            Dialect::Xquery30 => "3.0",
            Dialect::Xquery31 => "3.1",
            Dialect::Xquery40 => "4.0",
        }
    }

    /// Maps a version-declaration string to a dialect. `None` for strings
    /// no processor behind this parser supports (reported as XQST0031).
    pub fn from_version_str(version: &str) -> Option<Self> {
        match version {
            "1.0" => Some(Dialect::Xquery10),
            "3.0" => Some(Dialect::Xquery30),
            "3.1" => Some(Dialect::Xquery31),
            "4.0" => Some(Dialect::Xquery40),
            _ => None,
        }
    }

    // Syntax introduced in 3.0.

    pub fn has_string_concat(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_simple_map(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_switch(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_try_catch(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_inline_functions(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_named_function_ref(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_annotations(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_group_by(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_window_clause(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_count_clause(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_allowing_empty(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_context_item_decl(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_decimal_format_decl(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_validate_type(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_function_test(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_namespace_node_test(self) -> bool {
        self >= Dialect::Xquery30
    }

    pub fn has_comp_namespace_constructor(self) -> bool {
        self >= Dialect::Xquery30
    }

    // Syntax introduced in 3.1.

    pub fn has_maps_arrays(self) -> bool {
        self >= Dialect::Xquery31
    }

    pub fn has_lookup(self) -> bool {
        self >= Dialect::Xquery31
    }

    pub fn has_arrow_expr(self) -> bool {
        self >= Dialect::Xquery31
    }

    pub fn has_string_constructor(self) -> bool {
        self >= Dialect::Xquery31
    }

    // Syntax introduced in 4.0.

    pub fn has_ternary(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_otherwise(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_thin_arrow(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_record_test(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_enum_type(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_local_union_type(self) -> bool {
        self >= Dialect::Xquery40
    }

    pub fn has_fn_keyword(self) -> bool {
        self >= Dialect::Xquery40
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_version_str(s)
            .ok_or_else(|| format!("unsupported XQuery version `{s}` (expected 1.0, 3.0, 3.1 or 4.0)"))
    }
}
