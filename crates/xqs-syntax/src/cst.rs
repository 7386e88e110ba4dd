//! Syntax kinds for XQuery.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node kinds
//! (from the parser). Token kinds come first so `TokenSet` membership stays
//! cheap; node kinds follow; `__LAST` is a sentinel for bounds checking.
//! `XQueryLang` implements Rowan's `Language` trait for tree construction.
//!
//! Keywords are not token kinds: XQuery keywords are contextual, so the lexer
//! emits `NCName` for every word and the grammar remaps a token to `Keyword`
//! only at the position where it consumed the word as a keyword.

use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace = 0,
    /// `(: ... :)`, nesting allowed.
    Comment,

    // --- Literals and names ---
    IntegerLiteral,
    DecimalLiteral,
    DoubleLiteral,
    StringLiteral,
    /// String literal whose closing quote was never found.
    UnclosedString,
    /// `Q{uri}` prefix of a URI-qualified name.
    BracedUriLiteral,
    NCName,
    /// An `NCName` the grammar consumed as a keyword (remapped at parse time).
    Keyword,

    // --- Punctuation ---
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Dot,
    DotDot,
    Slash,
    SlashSlash,
    Plus,
    Minus,
    Star,
    Question,
    /// `??` ternary condition marker (4.0).
    QuestionQuestion,
    At,
    Dollar,
    Percent,
    /// `:=`
    ColonEq,
    Eq,
    /// `!=`
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `<<`
    LtLt,
    /// `>>`
    GtGt,
    Pipe,
    /// `||` string concatenation (3.0).
    PipePipe,
    Bang,
    /// `!!` ternary alternative marker (4.0).
    BangBang,
    Colon,
    ColonColon,
    Hash,
    /// `=>`
    Arrow,
    /// `->` inline function shorthand (4.0).
    ThinArrow,
    /// `(#`
    PragmaOpen,
    /// `#)`
    PragmaClose,
    /// `<!` not followed by `--`; always invalid.
    LtBang,

    // --- Direct constructor tokens ---
    /// `</`
    ClosingTagStart,
    /// `/>`
    EmptyTagClose,
    Quot,
    Apos,
    /// Literal run inside an attribute value.
    AttrText,
    /// `""` inside a double-quoted attribute value.
    EscQuot,
    /// `''` inside a single-quoted attribute value.
    EscApos,
    /// `&lt;`, `&#38;`, `&#x26;` in attribute values or element content.
    CharRef,
    /// Literal run inside element content.
    DirText,
    /// `{{` escape in content or attribute values.
    EscLBrace,
    /// `}}` escape in content or attribute values.
    EscRBrace,
    /// `<!-- ... -->` as a single token.
    XmlComment,
    UnclosedXmlComment,
    /// `<![CDATA[ ... ]]>` as a single token.
    Cdata,
    UnclosedCdata,
    /// `<?target ... ?>` as a single token.
    DirPi,
    UnclosedDirPi,

    // --- String constructor tokens (3.1) ---
    /// `` ``[ ``
    StrConstrStart,
    /// Literal run inside a string constructor.
    StrConstrText,
    /// `` ]`` ``
    StrConstrEnd,
    /// `` `{ ``
    StrInterpStart,
    /// `` }` ``
    StrInterpEnd,

    // --- Lexer error tokens / sentinel ---
    /// `(:` whose closing `:)` was never found.
    UnclosedComment,
    /// One invalid character (never coalesced).
    BadChar,
    /// Virtual kind returned past the final token; never stored in the tree.
    Eof,

    // --- Node kinds: module structure ---
    Module,
    VersionDecl,
    LibraryModule,
    MainModule,
    ModuleDecl,
    Prolog,
    QueryBody,

    // --- Node kinds: prolog declarations ---
    NamespaceDecl,
    DefaultNamespaceDecl,
    BoundarySpaceDecl,
    OptionDecl,
    OrderingModeDecl,
    EmptyOrderDecl,
    CopyNamespacesDecl,
    DefaultCollationDecl,
    BaseUriDecl,
    ConstructionDecl,
    VarDecl,
    VarValue,
    FunctionDecl,
    ParamList,
    Param,
    FunctionBody,
    ContextItemDecl,
    DecimalFormatDecl,
    ModuleImport,
    SchemaImport,
    SchemaPrefix,
    Annotation,

    // --- Node kinds: expressions ---
    Expr,
    TernaryExpr,
    OtherwiseExpr,
    OrExpr,
    AndExpr,
    ComparisonExpr,
    StringConcatExpr,
    RangeExpr,
    AdditiveExpr,
    MultiplicativeExpr,
    UnionExpr,
    IntersectExceptExpr,
    InstanceofExpr,
    TreatExpr,
    CastableExpr,
    CastExpr,
    ArrowExpr,
    UnaryExpr,
    SimpleMapExpr,

    // --- Node kinds: paths and postfix ---
    PathExpr,
    AxisStep,
    NameTest,
    Wildcard,
    Predicate,
    PostfixExpr,
    ArgumentList,
    ArgumentPlaceholder,
    Lookup,
    UnaryLookup,
    KeySpecifier,

    // --- Node kinds: FLWOR ---
    FlworExpr,
    ForClause,
    ForBinding,
    AllowingEmpty,
    PositionalVar,
    LetClause,
    LetBinding,
    WindowClause,
    WindowStartCondition,
    WindowEndCondition,
    WindowVars,
    CountClause,
    WhereClause,
    GroupByClause,
    GroupingSpec,
    OrderByClause,
    OrderSpec,
    OrderModifier,
    ReturnClause,

    // --- Node kinds: branching expressions ---
    IfExpr,
    SwitchExpr,
    SwitchCaseClause,
    TypeswitchExpr,
    CaseClause,
    QuantifiedExpr,
    QuantifiedBinding,
    TryCatchExpr,
    TryClause,
    CatchClause,
    CatchErrorList,

    // --- Node kinds: primary expressions ---
    Literal,
    VarRef,
    ParenthesizedExpr,
    ContextItemExpr,
    FunctionCall,
    OrderedExpr,
    UnorderedExpr,
    NamedFunctionRef,
    InlineFunctionExpr,
    MapConstructor,
    MapConstructorEntry,
    SquareArrayConstructor,
    CurlyArrayConstructor,
    StringConstructor,
    StringConstructorInterpolation,
    EnclosedExpr,
    Pragma,
    ExtensionExpr,
    ValidateExpr,

    // --- Node kinds: node constructors ---
    DirElemConstructor,
    DirAttributeList,
    DirAttribute,
    DirAttributeValue,
    /// `<!-- ... -->` used as an expression.
    DirCommentConstructor,
    /// `<?target ...?>` used as an expression.
    DirPiConstructor,
    CompDocConstructor,
    CompElemConstructor,
    CompAttrConstructor,
    CompNamespaceConstructor,
    CompTextConstructor,
    CompCommentConstructor,
    CompPiConstructor,

    // --- Node kinds: types ---
    TypeDeclaration,
    SequenceType,
    AnyKindTest,
    DocumentTest,
    TextTest,
    CommentTest,
    NamespaceNodeTest,
    PiTest,
    AttributeTest,
    SchemaAttributeTest,
    ElementTest,
    SchemaElementTest,
    AnyFunctionTest,
    TypedFunctionTest,
    AnyMapTest,
    TypedMapTest,
    AnyArrayTest,
    TypedArrayTest,
    AtomicOrUnionType,
    ParenthesizedItemType,
    SingleType,
    RecordTest,
    FieldDeclaration,
    EnumerationType,
    LocalUnionType,

    // --- Node kinds: names ---
    QName,

    /// Recovery node wrapping unexpected input, or zero-width for missing input.
    Error,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

/// First node kind; everything below is a token kind.
pub(crate) const FIRST_NODE_KIND: SyntaxKind = Module;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Comment)
    }

    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < (FIRST_NODE_KIND as u16)
    }

    /// Token kinds the lexer produces only for invalid input.
    #[inline]
    pub fn is_lex_error(self) -> bool {
        matches!(self, UnclosedComment | BadChar | LtBang)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XQueryLang {}

impl Language for XQueryLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<XQueryLang>;
pub type SyntaxToken = rowan::SyntaxToken<XQueryLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
///
/// Only token kinds fit; node kinds are rejected at construction time.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet([u64; 2]);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet([0; 2]);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = [0u64; 2];
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits[(kind / 64) as usize] |= 1 << (kind % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0[(kind / 64) as usize] & (1 << (kind % 64)) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet([self.0[0] | other.0[0], self.0[1] | other.0[1]])
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.contains_raw(i) && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

impl TokenSet {
    #[inline]
    const fn contains_raw(&self, kind: u16) -> bool {
        self.0[(kind / 64) as usize] & (1 << (kind % 64)) != 0
    }
}

/// Pre-defined token sets for the parser.
///
/// Keyword-led starts (FLWOR, declarations, constructors) cannot appear here:
/// keywords lex as `NCName`, so keyword membership is checked by text in the
/// grammar. These sets cover the punctuation/literal portion of each position.
pub mod token_sets {
    use super::*;

    /// Token kinds that can begin an expression, keywords aside.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        IntegerLiteral,
        DecimalLiteral,
        DoubleLiteral,
        StringLiteral,
        UnclosedString,
        BracedUriLiteral,
        NCName,
        LParen,
        Dollar,
        Dot,
        DotDot,
        Slash,
        SlashSlash,
        Plus,
        Minus,
        At,
        Star,
        Question,
        LBracket,
        Percent,
        ThinArrow,
        Lt,
        XmlComment,
        UnclosedXmlComment,
        DirPi,
        UnclosedDirPi,
        StrConstrStart,
        PragmaOpen,
    ]);

    /// Token kinds that can begin a path step.
    pub const STEP_FIRST: TokenSet =
        TokenSet::new(&[NCName, BracedUriLiteral, Star, At, Dot, DotDot]);

    /// General comparison, value comparison and node comparison operators that
    /// are punctuation (the keyword-spelled ones are checked by text).
    pub const COMPARISON_OPS: TokenSet =
        TokenSet::new(&[Eq, NotEq, Lt, LtEq, Gt, GtEq, LtLt, GtGt]);

    pub const ADDITIVE_OPS: TokenSet = TokenSet::new(&[Plus, Minus]);

    /// Tokens that terminate recovery inside a parenthesized context.
    pub const PAREN_RECOVERY: TokenSet = TokenSet::new(&[RParen, Comma, Semicolon]);

    /// Tokens that terminate recovery inside a braced context.
    pub const BRACE_RECOVERY: TokenSet = TokenSet::new(&[RBrace, Comma, Semicolon]);

    /// Tokens that plausibly start the next prolog declaration or the query
    /// body; used to resynchronize after a mangled declaration.
    pub const PROLOG_RECOVERY: TokenSet = TokenSet::new(&[Semicolon]).union(EXPR_FIRST);
}
