//! Character cursor shared by every reader.
//!
//! The cursor is the only mutable state during a parse. Each reader must leave
//! it positioned directly after the characters it consumed.

use crate::ast::Span;

/// A position over source text, measured in bytes but advanced in characters.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Byte offset of the next unconsumed character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves back to a position previously returned by [`Cursor::position`].
    pub fn restore(&mut self, pos: usize) {
        debug_assert!(self.source.is_char_boundary(pos));
        self.pos = pos;
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Unconsumed input.
    pub fn remaining(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character after the next one.
    pub fn peek_second(&self) -> Option<char> {
        self.remaining().chars().nth(1)
    }

    /// Consumes and returns the next character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Advances by `count` characters, stopping at the end of input.
    pub fn advance(&mut self, count: usize) {
        for _ in 0..count {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consumes characters while `pred` holds and returns them as a slice.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'src str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.source[start..self.pos]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Returns the first candidate the remaining input starts with.
    ///
    /// Candidates are tried in the order given, so a longer symbol must be
    /// listed before any shorter symbol that is its prefix. A candidate ending
    /// in a word character only matches when whitespace follows it: `and`
    /// matches in `and b` but not in `andy`, `and(b)` or a bare `and`.
    pub fn match_any<'c, S: AsRef<str>>(&self, candidates: &'c [S]) -> Option<&'c str> {
        let rest = self.remaining();
        candidates
            .iter()
            .map(AsRef::as_ref)
            .find(|candidate| matches_at_boundary(rest, candidate))
    }

    /// Span from `start` to the current position.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    /// Span of the next character, or an empty span at the end of input.
    pub fn next_char_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8);
        Span::new(self.pos, self.pos + len)
    }

    /// Describes the next character for diagnostics.
    pub fn describe_next(&self) -> String {
        match self.peek() {
            Some(ch) => format!("'{}'", ch),
            None => "end of input".to_string(),
        }
    }
}

pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn matches_at_boundary(rest: &str, candidate: &str) -> bool {
    if candidate.is_empty() || !rest.starts_with(candidate) {
        return false;
    }
    let ends_in_word = candidate.chars().last().is_some_and(is_word_char);
    if !ends_in_word {
        return true;
    }
    rest[candidate.len()..].chars().next().is_some_and(char::is_whitespace)
}
