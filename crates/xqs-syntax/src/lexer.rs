//! Modal lexer for XQuery.
//!
//! Produces span-based tokens without storing text - text is sliced from
//! source only when needed. Keywords are never reserved: every word lexes as
//! `NCName` and the grammar decides contextually.
//!
//! ## Modes
//!
//! XQuery is lexically modal: direct constructors (`<a href="{$u}">..</a>`)
//! and string constructors (`` ``[..`{..}`..]`` ``) switch the character
//! classes entirely. Each mode is its own `logos` enum; a driver walks the
//! source holding a mode stack and re-seats the active lexer on transitions.
//!
//! The main pass ([`lex`]) never enters direct-constructor modes, because `<`
//! is ambiguous without grammatical context (`a < b` vs `<a/>`). The parser
//! calls [`relex_direct`] once its position proves a constructor starts, and
//! splices the refined tokens over the provisional ones.
//!
//! ## Error handling
//!
//! Invalid characters become one `BadChar` token **per character**, never
//! coalesced. Unterminated strings, comments, XML comments, CDATA sections
//! and processing instructions keep their content under a dedicated
//! `Unclosed*` kind; the parser turns those into recovery errors.

use logos::{Lexer, Logos};
use rowan::TextRange;
use std::ops::Range;

use crate::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}

/// Shared lexer state; callbacks flag tokens whose terminator was missing.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LexFlags {
    unclosed: bool,
}

/// Tokenizes source in the default (expression) mode, handling string
/// constructors inline. Direct constructors stay provisional; see
/// [`relex_direct`].
pub fn lex(source: &str) -> Vec<Token> {
    lex_from(source, 0)
}

/// Tokenizes from byte `start` to the end of input in default mode, with
/// absolute spans. Used to rebuild the token tail when a re-lexed
/// constructor invalidates the provisional tokens behind it.
pub(crate) fn lex_from(source: &str, start: usize) -> Vec<Token> {
    let mut driver = Driver::new(source, start);
    while driver.cursor < source.len() {
        driver.step();
    }
    driver.tokens
}

/// Re-tokenizes a direct element constructor starting at byte `start` (which
/// must point at a `<`). Returns the constructor's tokens and the byte offset
/// one past its end. The caller splices these over the provisional tokens.
pub(crate) fn relex_direct(source: &str, start: usize) -> (Vec<Token>, usize) {
    debug_assert_eq!(source.as_bytes().get(start), Some(&b'<'));
    let mut driver = Driver::new(source, start + 1);
    driver
        .tokens
        .push(Token::new(SyntaxKind::Lt, text_range(start..start + 1)));
    driver.modes.push(Mode::Tag { closing: false });
    while driver.cursor < source.len() && driver.in_constructor() {
        driver.step();
    }
    let end = driver.cursor;
    (driver.tokens, end)
}

fn text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Ordinary XQuery tokens; `depth` tracks `{`/`}` nesting so enclosed
    /// expressions inside constructors find their matching brace.
    Default { depth: u32 },
    StrConstr,
    Tag { closing: bool },
    AttrValue { apos: bool },
    Content,
}

struct Driver<'s> {
    source: &'s str,
    cursor: usize,
    tokens: Vec<Token>,
    modes: Vec<Mode>,
}

impl<'s> Driver<'s> {
    fn new(source: &'s str, cursor: usize) -> Self {
        Self {
            source,
            cursor,
            tokens: Vec::new(),
            modes: vec![Mode::Default { depth: 0 }],
        }
    }

    fn in_constructor(&self) -> bool {
        self.modes.iter().any(|m| {
            matches!(m, Mode::Tag { .. } | Mode::Content | Mode::AttrValue { .. })
        })
    }

    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) {
        self.cursor = span.end;
        // String-constructor text arrives in fragments; merge adjacent runs.
        if kind == SyntaxKind::StrConstrText
            && let Some(last) = self.tokens.last_mut()
            && last.kind == SyntaxKind::StrConstrText
            && usize::from(last.span.end()) == span.start
        {
            last.span = TextRange::new(last.span.start(), (span.end as u32).into());
            return;
        }
        self.tokens.push(Token::new(kind, text_range(span)));
    }

    /// Emits `BadChar` for exactly one character at the span start.
    fn push_bad_char(&mut self, span: Range<usize>) {
        let text = &self.source[span.clone()];
        let ch_len = text.chars().next().map_or(1, char::len_utf8);
        self.push(SyntaxKind::BadChar, span.start..span.start + ch_len);
    }

    /// Lexes tokens in the top mode until a mode transition or end of input.
    fn step(&mut self) {
        match *self.modes.last().expect("mode stack never empty") {
            Mode::Default { .. } => self.step_default(),
            Mode::StrConstr => self.step_str_constr(),
            Mode::Tag { closing } => self.step_tag(closing),
            Mode::AttrValue { apos } => self.step_attr(apos),
            Mode::Content => self.step_content(),
        }
    }

    fn step_default(&mut self) {
        let base = self.cursor;
        let mut lx = DefaultTok::lexer(&self.source[base..]);
        while let Some(item) = lx.next() {
            let span = base + lx.span().start..base + lx.span().end;
            let unclosed = std::mem::take(&mut lx.extras.unclosed);
            match item {
                Err(()) => self.push_bad_char(span.clone()),
                Ok(tok) => match tok.kind(unclosed) {
                    SyntaxKind::LBrace => {
                        self.push(SyntaxKind::LBrace, span.clone());
                        self.bump_brace_depth(1);
                    }
                    SyntaxKind::RBrace => {
                        if self.brace_depth() > 0 {
                            self.push(SyntaxKind::RBrace, span.clone());
                            self.bump_brace_depth(-1);
                        } else if self.modes.len() > 1 {
                            // Closes an enclosed expression inside a
                            // constructor; `}`+backtick closes a string
                            // interpolation as one token.
                            let parent = self.modes[self.modes.len() - 2];
                            if parent == Mode::StrConstr
                                && self.source.as_bytes().get(span.end) == Some(&b'`')
                            {
                                self.push(SyntaxKind::StrInterpEnd, span.start..span.end + 1);
                            } else {
                                self.push(SyntaxKind::RBrace, span.clone());
                            }
                            self.modes.pop();
                            return;
                        } else {
                            self.push(SyntaxKind::RBrace, span.clone());
                        }
                    }
                    SyntaxKind::StrConstrStart => {
                        self.push(SyntaxKind::StrConstrStart, span.clone());
                        self.modes.push(Mode::StrConstr);
                        return;
                    }
                    kind => self.push(kind, span.clone()),
                },
            }
            if self.cursor != span.end {
                return; // re-seat after a span adjustment
            }
        }
        self.cursor = self.source.len();
    }

    fn brace_depth(&self) -> u32 {
        match self.modes.last() {
            Some(Mode::Default { depth }) => *depth,
            _ => unreachable!("step_default runs only in Default mode"),
        }
    }

    fn bump_brace_depth(&mut self, delta: i32) {
        if let Some(Mode::Default { depth }) = self.modes.last_mut() {
            *depth = depth.checked_add_signed(delta).expect("balanced braces");
        }
    }

    fn step_str_constr(&mut self) {
        let base = self.cursor;
        let mut lx = StrConstrTok::lexer(&self.source[base..]);
        while let Some(item) = lx.next() {
            let span = base + lx.span().start..base + lx.span().end;
            match item {
                Err(()) => self.push_bad_char(span),
                Ok(StrConstrTok::End) => {
                    self.push(SyntaxKind::StrConstrEnd, span);
                    self.modes.pop();
                    return;
                }
                Ok(StrConstrTok::InterpStart) => {
                    self.push(SyntaxKind::StrInterpStart, span);
                    self.modes.push(Mode::Default { depth: 0 });
                    return;
                }
                Ok(StrConstrTok::Text | StrConstrTok::Stray) => {
                    self.push(SyntaxKind::StrConstrText, span);
                }
            }
        }
        // Unterminated constructor: the parser reports the missing `]``.
        self.cursor = self.source.len();
        self.modes.pop();
    }

    fn step_tag(&mut self, closing: bool) {
        let base = self.cursor;
        let mut lx = TagTok::lexer(&self.source[base..]);
        while let Some(item) = lx.next() {
            let span = base + lx.span().start..base + lx.span().end;
            match item {
                Err(()) => self.push_bad_char(span),
                Ok(TagTok::Whitespace) => self.push(SyntaxKind::Whitespace, span),
                Ok(TagTok::Name) => self.push(SyntaxKind::NCName, span),
                Ok(TagTok::Colon) => self.push(SyntaxKind::Colon, span),
                Ok(TagTok::Eq) => self.push(SyntaxKind::Eq, span),
                Ok(TagTok::Quot) => {
                    self.push(SyntaxKind::Quot, span);
                    self.modes.push(Mode::AttrValue { apos: false });
                    return;
                }
                Ok(TagTok::Apos) => {
                    self.push(SyntaxKind::Apos, span);
                    self.modes.push(Mode::AttrValue { apos: true });
                    return;
                }
                Ok(TagTok::TagEnd) => {
                    self.push(SyntaxKind::Gt, span);
                    self.modes.pop();
                    if !closing {
                        self.modes.push(Mode::Content);
                    }
                    return;
                }
                Ok(TagTok::EmptyTagClose) => {
                    self.push(SyntaxKind::EmptyTagClose, span);
                    self.modes.pop();
                    return;
                }
                Ok(TagTok::Slash) => self.push(SyntaxKind::Slash, span),
            }
        }
        self.cursor = self.source.len();
        self.modes.pop();
    }

    fn step_attr(&mut self, apos: bool) {
        let base = self.cursor;
        let mut lx = AttrTok::lexer(&self.source[base..]);
        lx.extras.apos = apos;
        while let Some(item) = lx.next() {
            let span = base + lx.span().start..base + lx.span().end;
            match item {
                Err(()) => self.push_bad_char(span),
                Ok(AttrTok::Text) => self.push(SyntaxKind::AttrText, span),
                Ok(AttrTok::EscLBrace) => self.push(SyntaxKind::EscLBrace, span),
                Ok(AttrTok::EscRBrace) => self.push(SyntaxKind::EscRBrace, span),
                Ok(AttrTok::CharRef) => self.push(SyntaxKind::CharRef, span),
                Ok(AttrTok::RBrace) => self.push(SyntaxKind::RBrace, span),
                Ok(AttrTok::LBrace) => {
                    self.push(SyntaxKind::LBrace, span);
                    self.modes.push(Mode::Default { depth: 0 });
                    return;
                }
                Ok(AttrTok::Quot) => {
                    if apos {
                        // An ordinary character in an apos-delimited value.
                        self.push(SyntaxKind::AttrText, span);
                    } else if self.source.as_bytes().get(span.end) == Some(&b'"')
                        && span.len() == 1
                    {
                        self.push(SyntaxKind::EscQuot, span.start..span.end + 1);
                        return; // re-seat past the second quote
                    } else {
                        self.push(SyntaxKind::Quot, span);
                        self.modes.pop();
                        return;
                    }
                }
                Ok(AttrTok::Apos) => {
                    if !apos {
                        self.push(SyntaxKind::AttrText, span);
                    } else if self.source.as_bytes().get(span.end) == Some(&b'\'')
                        && span.len() == 1
                    {
                        self.push(SyntaxKind::EscApos, span.start..span.end + 1);
                        return;
                    } else {
                        self.push(SyntaxKind::Apos, span);
                        self.modes.pop();
                        return;
                    }
                }
            }
        }
        self.cursor = self.source.len();
        self.modes.pop();
    }

    fn step_content(&mut self) {
        let base = self.cursor;
        let mut lx = ContentTok::lexer(&self.source[base..]);
        while let Some(item) = lx.next() {
            let span = base + lx.span().start..base + lx.span().end;
            let unclosed = std::mem::take(&mut lx.extras.unclosed);
            match item {
                Err(()) => self.push_bad_char(span),
                Ok(ContentTok::Text) => self.push(SyntaxKind::DirText, span),
                Ok(ContentTok::EscLBrace) => self.push(SyntaxKind::EscLBrace, span),
                Ok(ContentTok::EscRBrace) => self.push(SyntaxKind::EscRBrace, span),
                Ok(ContentTok::CharRef) => self.push(SyntaxKind::CharRef, span),
                Ok(ContentTok::RBrace) => self.push(SyntaxKind::RBrace, span),
                Ok(ContentTok::LBrace) => {
                    self.push(SyntaxKind::LBrace, span);
                    self.modes.push(Mode::Default { depth: 0 });
                    return;
                }
                Ok(ContentTok::ClosingTagStart) => {
                    self.push(SyntaxKind::ClosingTagStart, span);
                    // The closing tag ends this element: replace the content
                    // frame rather than stacking on top of it.
                    self.modes.pop();
                    self.modes.push(Mode::Tag { closing: true });
                    return;
                }
                Ok(ContentTok::XmlComment) => self.push(
                    pick_unclosed(unclosed, SyntaxKind::XmlComment, SyntaxKind::UnclosedXmlComment),
                    span,
                ),
                Ok(ContentTok::Cdata) => self.push(
                    pick_unclosed(unclosed, SyntaxKind::Cdata, SyntaxKind::UnclosedCdata),
                    span,
                ),
                Ok(ContentTok::Pi) => self.push(
                    pick_unclosed(unclosed, SyntaxKind::DirPi, SyntaxKind::UnclosedDirPi),
                    span,
                ),
                Ok(ContentTok::Lt) => {
                    self.push(SyntaxKind::Lt, span);
                    self.modes.push(Mode::Tag { closing: false });
                    return;
                }
            }
        }
        self.cursor = self.source.len();
        self.modes.pop();
    }
}

fn pick_unclosed(unclosed: bool, closed: SyntaxKind, open: SyntaxKind) -> SyntaxKind {
    if unclosed { open } else { closed }
}

// --- Default (expression) mode ---

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexFlags)]
enum DefaultTok {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("(:", lex_comment)]
    Comment,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"\.[0-9]+|[0-9]+\.[0-9]*")]
    Decimal,

    #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+-]?[0-9]+")]
    Double,

    #[token("\"", lex_string_double)]
    #[token("'", lex_string_single)]
    String,

    #[regex(r"Q\{[^{}]*\}")]
    BracedUri,

    #[regex(r"[_\p{L}][_\p{L}\p{N}\.\-]*")]
    Name,

    #[token("``[")]
    StrConstrStart,

    #[token("(#")]
    PragmaOpen,
    #[token("#)")]
    PragmaClose,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[token("//")]
    SlashSlash,
    #[token("/")]
    Slash,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("??")]
    QuestionQuestion,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("$")]
    Dollar,
    #[token("%")]
    Percent,
    #[token(":=")]
    ColonEq,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("=>")]
    Arrow,
    #[token("->")]
    ThinArrow,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("!!")]
    BangBang,
    #[token("!")]
    Bang,
    #[token("<=")]
    LtEq,
    #[token("<<")]
    LtLt,
    #[token("<!--", lex_xml_comment)]
    XmlComment,
    #[token("<!")]
    LtBang,
    #[token("<?", lex_pi)]
    Pi,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">>")]
    GtGt,
    #[token(">")]
    Gt,
    #[token("||")]
    PipePipe,
    #[token("|")]
    Pipe,
    #[token("#")]
    Hash,
}

impl DefaultTok {
    fn kind(self, unclosed: bool) -> SyntaxKind {
        match self {
            Self::Whitespace => SyntaxKind::Whitespace,
            Self::Comment => pick_unclosed(unclosed, SyntaxKind::Comment, SyntaxKind::UnclosedComment),
            Self::Integer => SyntaxKind::IntegerLiteral,
            Self::Decimal => SyntaxKind::DecimalLiteral,
            Self::Double => SyntaxKind::DoubleLiteral,
            Self::String => pick_unclosed(unclosed, SyntaxKind::StringLiteral, SyntaxKind::UnclosedString),
            Self::BracedUri => SyntaxKind::BracedUriLiteral,
            Self::Name => SyntaxKind::NCName,
            Self::StrConstrStart => SyntaxKind::StrConstrStart,
            Self::PragmaOpen => SyntaxKind::PragmaOpen,
            Self::PragmaClose => SyntaxKind::PragmaClose,
            Self::LParen => SyntaxKind::LParen,
            Self::RParen => SyntaxKind::RParen,
            Self::LBracket => SyntaxKind::LBracket,
            Self::RBracket => SyntaxKind::RBracket,
            Self::LBrace => SyntaxKind::LBrace,
            Self::RBrace => SyntaxKind::RBrace,
            Self::Semicolon => SyntaxKind::Semicolon,
            Self::Comma => SyntaxKind::Comma,
            Self::DotDot => SyntaxKind::DotDot,
            Self::Dot => SyntaxKind::Dot,
            Self::SlashSlash => SyntaxKind::SlashSlash,
            Self::Slash => SyntaxKind::Slash,
            Self::Plus => SyntaxKind::Plus,
            Self::Minus => SyntaxKind::Minus,
            Self::Star => SyntaxKind::Star,
            Self::QuestionQuestion => SyntaxKind::QuestionQuestion,
            Self::Question => SyntaxKind::Question,
            Self::At => SyntaxKind::At,
            Self::Dollar => SyntaxKind::Dollar,
            Self::Percent => SyntaxKind::Percent,
            Self::ColonEq => SyntaxKind::ColonEq,
            Self::ColonColon => SyntaxKind::ColonColon,
            Self::Colon => SyntaxKind::Colon,
            Self::Arrow => SyntaxKind::Arrow,
            Self::ThinArrow => SyntaxKind::ThinArrow,
            Self::Eq => SyntaxKind::Eq,
            Self::NotEq => SyntaxKind::NotEq,
            Self::BangBang => SyntaxKind::BangBang,
            Self::Bang => SyntaxKind::Bang,
            Self::LtEq => SyntaxKind::LtEq,
            Self::LtLt => SyntaxKind::LtLt,
            Self::XmlComment => {
                pick_unclosed(unclosed, SyntaxKind::XmlComment, SyntaxKind::UnclosedXmlComment)
            }
            Self::LtBang => SyntaxKind::LtBang,
            Self::Pi => pick_unclosed(unclosed, SyntaxKind::DirPi, SyntaxKind::UnclosedDirPi),
            Self::Lt => SyntaxKind::Lt,
            Self::GtEq => SyntaxKind::GtEq,
            Self::GtGt => SyntaxKind::GtGt,
            Self::Gt => SyntaxKind::Gt,
            Self::PipePipe => SyntaxKind::PipePipe,
            Self::Pipe => SyntaxKind::Pipe,
            Self::Hash => SyntaxKind::Hash,
        }
    }
}

/// Consumes a `(: ... :)` comment with nesting; flags unterminated ones.
fn lex_comment(lx: &mut Lexer<DefaultTok>) {
    let bytes = lx.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'(' && bytes.get(i + 1) == Some(&b':') {
            depth += 1;
            i += 2;
        } else if bytes[i] == b':' && bytes.get(i + 1) == Some(&b')') {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lx.bump(i);
                return;
            }
        } else {
            i += 1;
        }
    }
    lx.bump(bytes.len());
    lx.extras.unclosed = true;
}

fn lex_string_impl(lx: &mut Lexer<DefaultTok>, quote: u8) {
    let bytes = lx.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2; // doubled quote escape
            } else {
                lx.bump(i + 1);
                return;
            }
        } else {
            i += 1;
        }
    }
    lx.bump(bytes.len());
    lx.extras.unclosed = true;
}

fn lex_string_double(lx: &mut Lexer<DefaultTok>) {
    lex_string_impl(lx, b'"');
}

fn lex_string_single(lx: &mut Lexer<DefaultTok>) {
    lex_string_impl(lx, b'\'');
}

/// Scans to a terminator; reports how far to bump and whether input ended first.
fn scan_until(remainder: &str, terminator: &str) -> (usize, bool) {
    match remainder.find(terminator) {
        Some(pos) => (pos + terminator.len(), false),
        None => (remainder.len(), true),
    }
}

fn lex_xml_comment(lx: &mut Lexer<DefaultTok>) {
    let (n, unclosed) = scan_until(lx.remainder(), "-->");
    lx.bump(n);
    lx.extras.unclosed = unclosed;
}

fn lex_pi(lx: &mut Lexer<DefaultTok>) {
    let (n, unclosed) = scan_until(lx.remainder(), "?>");
    lx.bump(n);
    lx.extras.unclosed = unclosed;
}

// --- String constructor mode (3.1) ---

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum StrConstrTok {
    #[token("]``")]
    End,

    #[token("`{")]
    InterpStart,

    #[regex(r"[^`\]]+")]
    Text,

    /// A lone backtick or `]` that is not part of a delimiter.
    #[token("`")]
    #[token("]")]
    Stray,
}

// --- Tag mode (inside `<name ... >` / `</name >`) ---

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TagTok {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[_\p{L}][_\p{L}\p{N}\.\-]*")]
    Name,

    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("\"")]
    Quot,
    #[token("'")]
    Apos,
    #[token(">")]
    TagEnd,
    #[token("/>")]
    EmptyTagClose,
    #[token("/")]
    Slash,
}

// --- Attribute value mode ---

/// Per-lexer flag selecting the delimiter; the non-delimiter quote is text.
#[derive(Debug, Default, Clone, Copy)]
struct AttrFlags {
    apos: bool,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = AttrFlags)]
enum AttrTok {
    #[regex(r#"[^"'{}&]+"#)]
    Text,

    #[token("\"")]
    Quot,
    #[token("'")]
    Apos,
    #[token("{{")]
    EscLBrace,
    #[token("}}")]
    EscRBrace,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[regex(r"&(#[0-9]+|#x[0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")]
    CharRef,
}

// --- Element content mode ---

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexFlags)]
enum ContentTok {
    #[regex(r"[^<{}&]+")]
    Text,

    #[token("{{")]
    EscLBrace,
    #[token("}}")]
    EscRBrace,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[regex(r"&(#[0-9]+|#x[0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")]
    CharRef,

    #[token("</")]
    ClosingTagStart,

    #[token("<!--", lex_content_xml_comment)]
    XmlComment,

    #[token("<![CDATA[", lex_cdata)]
    Cdata,

    #[token("<?", lex_content_pi)]
    Pi,

    #[token("<")]
    Lt,
}

fn lex_content_xml_comment(lx: &mut Lexer<ContentTok>) {
    let (n, unclosed) = scan_until(lx.remainder(), "-->");
    lx.bump(n);
    lx.extras.unclosed = unclosed;
}

fn lex_cdata(lx: &mut Lexer<ContentTok>) {
    let (n, unclosed) = scan_until(lx.remainder(), "]]>");
    lx.bump(n);
    lx.extras.unclosed = unclosed;
}

fn lex_content_pi(lx: &mut Lexer<ContentTok>) {
    let (n, unclosed) = scan_until(lx.remainder(), "?>");
    lx.bump(n);
    lx.extras.unclosed = unclosed;
}
