//! Maximal-munch segmentation over a [`ScriptMapTable`].
//!
//! At every position the longest registered form wins: with `"3"` → ع and
//! `"ch"` → ش in the table, `"chneya"` starts with one `ch` token, never
//! `c` then `h`. Codepoints with no registered form are emitted as literal
//! pass-through tokens — unmapped punctuation, whitespace and
//! opposite-script characters are expected input, not errors.
//!
//! The tokenizer is a lazy, finite iterator; callers needing a second pass
//! construct it again.

use crate::mapping::{MappingEntry, ScriptMapTable};
use smallvec::SmallVec;
use std::iter::FusedIterator;

/// Which side of the table is being matched against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Match Latin forms; conversion target is Arabic.
    LatinToArabic,
    /// Match Arabic forms; conversion target is Latin.
    ArabicToLatin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'t> {
    /// The consumed slice matched a table entry.
    Mapped(&'t MappingEntry),
    /// No entry matched; exactly one codepoint was consumed verbatim.
    Literal(char),
}

/// One consumed span of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'t> {
    /// Char offset of the span start in the original input.
    pub start: usize,
    /// The consumed slice.
    pub text: &'t str,
    pub kind: TokenKind<'t>,
}

impl Token<'_> {
    #[inline]
    pub fn is_mapped(&self) -> bool {
        matches!(self.kind, TokenKind::Mapped(_))
    }

    /// Length of the consumed span in chars.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Lazy maximal-munch tokenizer. See the module docs for the matching rules.
pub struct Tokenizer<'t> {
    table: &'t ScriptMapTable,
    direction: Direction,
    rest: &'t str,
    pos: usize,
    window: usize,
}

impl<'t> Tokenizer<'t> {
    pub fn new(table: &'t ScriptMapTable, direction: Direction, text: &'t str) -> Self {
        let window = match direction {
            Direction::LatinToArabic => table.max_latin_len(),
            Direction::ArabicToLatin => table.max_arabic_len(),
        }
        .max(1);
        Self {
            table,
            direction,
            rest: text,
            pos: 0,
            window,
        }
    }

    /// Longest table hit at the head of `rest`, if any. Returns the entry
    /// and the byte length of the consumed prefix.
    fn munch(&self) -> Option<(&'t MappingEntry, usize)> {
        // Byte offsets of the first `window` char boundaries.
        let mut ends: SmallVec<[usize; 8]> = SmallVec::new();
        let mut end = 0usize;
        for c in self.rest.chars().take(self.window) {
            end += c.len_utf8();
            ends.push(end);
        }

        for &end in ends.iter().rev() {
            let candidate = &self.rest[..end];
            let hit = match self.direction {
                Direction::LatinToArabic => self.table.lookup_latin(candidate),
                // Equal-length ties between registered spellings of the
                // same grapheme resolve by weight, then lexicographic
                // Latin form, then registration order.
                Direction::ArabicToLatin => self.table.preferred_latin(candidate),
            };
            if let Some(entry) = hit {
                return Some((entry, end));
            }
        }
        None
    }
}

impl<'t> Iterator for Tokenizer<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let start = self.pos;
        if let Some((entry, len)) = self.munch() {
            let text = &self.rest[..len];
            self.pos += text.chars().count();
            self.rest = &self.rest[len..];
            return Some(Token {
                start,
                text,
                kind: TokenKind::Mapped(entry),
            });
        }

        // Pass-through: consume exactly one codepoint.
        let c = self.rest.chars().next()?;
        let len = c.len_utf8();
        let text = &self.rest[..len];
        self.pos += 1;
        self.rest = &self.rest[len..];
        Some(Token {
            start,
            text,
            kind: TokenKind::Literal(c),
        })
    }
}

impl FusedIterator for Tokenizer<'_> {}
