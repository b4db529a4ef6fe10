//! The Latin ↔ Arabic correspondence table.
//!
//! One [`MappingEntry`] per accepted Arabizi spelling: `"ch"` → ش, `"3"` → ع,
//! `"kh"` → خ. Latin forms are unique within a table; several Latin forms may
//! point at the same Arabic grapheme (`"9"`, `"q"` and `"g"` all write ق in
//! different regions). Digit-letters are ordinary entries, not a special
//! case.
//!
//! The table is built once and immutable afterwards. Construction is the
//! only fallible step in the whole conversion path.

use std::collections::HashMap;
use thiserror::Error;

/// Rejected table input. Fatal to engine startup; the data source must be
/// fixed by the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMappingError {
    #[error("duplicate latin form `{0}` (latin forms are case-insensitive and must be unique)")]
    DuplicateLatinForm(String),

    #[error("entry {0} has an empty latin form")]
    EmptyLatinForm(usize),

    #[error("entry {0} (`{1}`) has an empty arabic form")]
    EmptyArabicForm(usize, String),
}

/// A single Latin-token ↔ Arabic-grapheme correspondence.
///
/// `weight` breaks ties between spellings of the same grapheme: lower wins.
/// The built-in table gives the conventional Tunisian spelling the lowest
/// weight so Arabic→Latin output reads like actual Arabizi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub latin: String,
    pub arabic: String,
    pub weight: u32,
}

impl MappingEntry {
    pub fn new(latin: impl Into<String>, arabic: impl Into<String>, weight: u32) -> Self {
        Self {
            latin: latin.into(),
            arabic: arabic.into(),
            weight,
        }
    }
}

/// Immutable lookup table over [`MappingEntry`] records.
///
/// Latin lookups are case-insensitive (forms are folded to lowercase at
/// construction). Arabic lookups return every registered spelling, in
/// registration order.
#[derive(Debug)]
pub struct ScriptMapTable {
    entries: Vec<MappingEntry>,
    latin_index: HashMap<String, usize>,
    arabic_index: HashMap<String, Vec<usize>>,
    max_latin_len: usize,
    max_arabic_len: usize,
}

impl ScriptMapTable {
    /// Build a table, validating the entry list.
    ///
    /// Fails on an empty `latin`/`arabic` form or a duplicate (case-folded)
    /// `latin` form. `arabic` forms may repeat freely.
    pub fn new(entries: Vec<MappingEntry>) -> Result<Self, InvalidMappingError> {
        let mut folded = Vec::with_capacity(entries.len());
        let mut latin_index = HashMap::with_capacity(entries.len());
        let mut arabic_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut max_latin_len = 0usize;
        let mut max_arabic_len = 0usize;

        for (i, entry) in entries.into_iter().enumerate() {
            if entry.latin.is_empty() {
                return Err(InvalidMappingError::EmptyLatinForm(i));
            }
            if entry.arabic.is_empty() {
                return Err(InvalidMappingError::EmptyArabicForm(i, entry.latin));
            }

            let latin = entry.latin.to_lowercase();
            if latin_index.contains_key(&latin) {
                return Err(InvalidMappingError::DuplicateLatinForm(latin));
            }

            max_latin_len = max_latin_len.max(latin.chars().count());
            max_arabic_len = max_arabic_len.max(entry.arabic.chars().count());

            latin_index.insert(latin.clone(), i);
            arabic_index.entry(entry.arabic.clone()).or_default().push(i);
            folded.push(MappingEntry {
                latin,
                arabic: entry.arabic,
                weight: entry.weight,
            });
        }

        Ok(Self {
            entries: folded,
            latin_index,
            arabic_index,
            max_latin_len,
            max_arabic_len,
        })
    }

    /// Exact (case-insensitive) lookup of a Latin token.
    pub fn lookup_latin(&self, token: &str) -> Option<&MappingEntry> {
        // Zero-copy on the common all-lowercase path.
        let idx = if token.chars().any(char::is_uppercase) {
            self.latin_index.get(&token.to_lowercase())
        } else {
            self.latin_index.get(token)
        };
        idx.map(|&i| &self.entries[i])
    }

    /// Every entry registered for an Arabic grapheme, in registration order.
    pub fn lookup_arabic<'a>(
        &'a self,
        grapheme: &str,
    ) -> impl Iterator<Item = &'a MappingEntry> + 'a {
        self.arabic_index
            .get(grapheme)
            .into_iter()
            .flatten()
            .map(move |&i| &self.entries[i])
    }

    /// The spelling chosen when writing an Arabic grapheme in Latin:
    /// lowest weight, then lexicographically smallest Latin form, then
    /// registration order.
    pub fn preferred_latin(&self, grapheme: &str) -> Option<&MappingEntry> {
        self.lookup_arabic(grapheme)
            .min_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.latin.cmp(&b.latin)))
    }

    pub fn all_entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Longest registered Latin form, in chars. Upper bound of the
    /// tokenizer's munch window.
    #[inline]
    pub fn max_latin_len(&self) -> usize {
        self.max_latin_len
    }

    /// Longest registered Arabic form, in chars.
    #[inline]
    pub fn max_arabic_len(&self) -> usize {
        self.max_arabic_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
