//! Parser state machine and low-level operations.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use crate::cst::{SyntaxKind, TokenSet};
use crate::diagnostics::{Diagnostics, ErrorKind};
use crate::dialect::Dialect;
use crate::lexer::{self, Token, token_text};

/// Recursion ceiling. Past this depth the rest of the input goes into a
/// single `Error` node; parsing still terminates with a complete tree.
const MAX_DEPTH: u32 = 256;

/// Trivia tokens are buffered and flushed when starting a new node, so
/// leading whitespace and comments attach outside the node they precede.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) trivia_buffer: Vec<Token>,
    pub(super) builder: GreenNodeBuilder<'static>,
    pub(super) errors: Diagnostics,
    pub(super) dialect: Dialect,
    pub(super) depth: u32,
    /// Offset of the last zero-width error; a second zero-width error at the
    /// same offset is dropped so stuck positions report once.
    last_error_pos: Option<TextSize>,
    pub(super) debug_fuel: std::cell::Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>, dialect: Dialect) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            trivia_buffer: Vec::with_capacity(4),
            builder: GreenNodeBuilder::new(),
            errors: Diagnostics::new(),
            dialect,
            depth: 0,
            last_error_pos: None,
            debug_fuel: std::cell::Cell::new(256),
        }
    }

    pub(super) fn finish(mut self) -> (GreenNode, Diagnostics) {
        self.drain_trivia();
        (self.builder.finish(), self.errors)
    }

    // --- Token access ---

    /// Current non-trivia token kind; `Eof` past the end.
    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia_to_buffer();
        self.ensure_progress();
        self.tokens
            .get(self.pos)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    /// Current non-trivia token text; empty at EOF.
    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia_to_buffer();
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    /// LL(k) lookahead past trivia. `nth(0)` is `current()`.
    pub(super) fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(super) fn nth_text(&mut self, n: usize) -> &'src str {
        self.nth_token(n)
            .map_or("", |t| token_text(self.source, &t))
    }

    fn nth_token(&mut self, n: usize) -> Option<Token> {
        self.skip_trivia_to_buffer();
        self.ensure_progress();
        let mut remaining = n;
        let mut pos = self.pos;
        while pos < self.tokens.len() {
            let token = self.tokens[pos];
            if !token.kind.is_trivia() {
                if remaining == 0 {
                    return Some(token);
                }
                remaining -= 1;
            }
            pos += 1;
        }
        None
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&mut self) -> bool {
        self.current() == SyntaxKind::Eof
    }

    pub(super) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_set(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Current token is the contextual keyword `kw` (an `NCName` with that
    /// exact text; keywords are never reserved).
    pub(super) fn at_kw(&mut self, kw: &str) -> bool {
        self.current() == SyntaxKind::NCName && self.current_text() == kw
    }

    pub(super) fn nth_is_kw(&mut self, n: usize, kw: &str) -> bool {
        self.nth(n) == SyntaxKind::NCName && self.nth_text(n) == kw
    }

    // --- Trivia ---

    fn skip_trivia_to_buffer(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.trivia_buffer.push(self.tokens[self.pos]);
            self.pos += 1;
        }
    }

    pub(super) fn drain_trivia(&mut self) {
        for token in self.trivia_buffer.drain(..) {
            let text = token_text(self.source, &token);
            self.builder.token(token.kind.into(), text);
        }
    }

    // --- Tree building ---

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.drain_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia_to_buffer();
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.debug_fuel.set(256);
        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(token.kind.into(), text);
        self.pos += 1;
    }

    /// Consumes the current token under a different kind. Used to turn an
    /// `NCName` into `Keyword` at the position it was taken as one.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        assert!(!self.eof(), "bump_remap called at EOF");
        self.debug_fuel.set(256);
        self.drain_trivia();

        let token = self.tokens[self.pos];
        let text = token_text(self.source, &token);
        self.builder.token(kind.into(), text);
        self.pos += 1;
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes the contextual keyword `kw`, remapped to `Keyword`.
    pub(super) fn eat_kw(&mut self, kw: &str) -> bool {
        if self.at_kw(kw) {
            self.bump_remap(SyntaxKind::Keyword);
            true
        } else {
            false
        }
    }

    /// On mismatch: zero-width `Error` node plus diagnostic, no consumption.
    /// The parent production decides how to continue.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_missing(format!("expected {what}"));
        false
    }

    pub(super) fn expect_kw(&mut self, kw: &str) -> bool {
        if self.eat_kw(kw) {
            return true;
        }
        self.error_missing(format!("expected keyword `{kw}`"));
        false
    }

    // --- Errors and recovery ---

    /// Something required is absent. Emits a zero-width `Error` node and a
    /// matching diagnostic at the current position. Deduplicated per offset:
    /// when several productions give up at the same point only the first
    /// (innermost) report survives.
    pub(super) fn error_missing(&mut self, message: impl Into<String>) {
        let offset = self.current_span().start();
        if self.last_error_pos == Some(offset) {
            return;
        }
        self.last_error_pos = Some(offset);

        self.errors
            .report(ErrorKind::Missing, TextRange::empty(offset))
            .message(message)
            .emit();
        self.start_node(SyntaxKind::Error);
        self.finish_node();
    }

    /// The current token cannot be placed: wrap it in an `Error` node and
    /// move past it. Always makes progress.
    pub(super) fn error_and_bump(&mut self, message: impl Into<String>) {
        self.error_and_bump_kind(ErrorKind::UnexpectedToken, message);
    }

    pub(super) fn error_and_bump_kind(&mut self, kind: ErrorKind, message: impl Into<String>) {
        assert!(!self.eof(), "error_and_bump called at EOF");
        let span = self.current_span();
        self.errors.report(kind, span).message(message).emit();
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    /// Skips tokens into one `Error` node until a token in `recovery` (or
    /// EOF). If the current token is already a recovery point, only the
    /// diagnostic plus a zero-width node is emitted.
    pub(super) fn error_recover_until(
        &mut self,
        message: impl Into<String>,
        recovery: TokenSet,
    ) {
        if self.at_set(recovery) || self.eof() {
            self.error_missing(message);
            return;
        }

        let start = self.current_span().start();
        self.start_node(SyntaxKind::Error);
        let mut end = start;
        while !self.at_set(recovery) && !self.eof() {
            end = self.current_span().end();
            self.bump();
        }
        self.finish_node();
        self.errors
            .report(ErrorKind::UnexpectedToken, TextRange::new(start, end))
            .message(message)
            .emit();
    }

    /// Reports a diagnostic over `range` paired with a zero-width `Error`
    /// node at the current builder position. For errors about token content
    /// (bad version string, whitespace inside a name) where no token is
    /// skipped.
    pub(super) fn error_here(
        &mut self,
        kind: ErrorKind,
        range: TextRange,
        message: impl Into<String>,
    ) {
        self.errors.report(kind, range).message(message).emit();
        self.start_node(SyntaxKind::Error);
        self.finish_node();
    }

    /// Construct gated behind a newer dialect than the active one. The tree
    /// shape is built normally; only this diagnostic marks the mismatch.
    pub(super) fn error_dialect(&mut self, construct: &str, needs: Dialect) {
        let range = self.current_span();
        self.errors
            .report(ErrorKind::UnsupportedSyntax, range)
            .message(format!(
                "{construct} requires XQuery {} (parsing as {})",
                needs.version_str(),
                self.dialect.version_str()
            ))
            .emit();
        self.start_node(SyntaxKind::Error);
        self.finish_node();
    }

    // --- Recursion guard ---

    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        self.debug_fuel.set(256);
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.debug_fuel.set(256);
    }

    /// Depth limit hit: consume the rest of the input as one error.
    pub(super) fn bail_out_deep(&mut self) {
        let start = self.current_span().start();
        if self.eof() {
            self.error_missing("expression nests too deeply");
            return;
        }
        self.start_node(SyntaxKind::Error);
        let mut end = start;
        while !self.eof() {
            end = self.current_span().end();
            self.bump();
        }
        self.finish_node();
        self.errors
            .report(ErrorKind::UnexpectedToken, TextRange::new(start, end))
            .message("expression nests too deeply")
            .emit();
    }

    // --- Direct constructor re-lexing ---

    /// The grammar decided the `Lt` at the current position opens a direct
    /// constructor. Re-tokenizes the constructor with the tag-aware modes
    /// and splices the refined tokens over the provisional ones.
    pub(super) fn relex_direct(&mut self) {
        debug_assert_eq!(self.current(), SyntaxKind::Lt);
        let start = usize::from(self.current_span().start());
        let (refined, end) = lexer::relex_direct(self.source, start);

        // Drop every provisional token the constructor swallowed. A token
        // straddling the boundary was refined too, so it goes as well.
        let mut stale_end = self.pos;
        let mut straddler = false;
        while stale_end < self.tokens.len()
            && usize::from(self.tokens[stale_end].span.start()) < end
        {
            straddler = usize::from(self.tokens[stale_end].span.end()) > end;
            stale_end += 1;
        }

        if straddler {
            // A provisional string or comment opened inside the constructor
            // and closed past its end; its tail bytes belong to no refined
            // token, and everything behind it was lexed from the wrong
            // position. Rebuild the whole tail from the constructor end.
            self.tokens.truncate(self.pos);
            self.tokens.extend(refined);
            self.tokens.extend(lexer::lex_from(self.source, end));
        } else {
            self.tokens.splice(self.pos..stale_end, refined);
        }
    }
}
