//! Script detection and bidirectional conversion.
//!
//! Every per-text operation here is total: unmapped content degrades to
//! literal pass-through and is reported through `confidence`, never through
//! an error. The only fallible step in the whole path is table construction
//! ([`ScriptMapTable::new`]).

use crate::mapping::ScriptMapTable;
use crate::script::{self, ScriptKind};
use crate::tokenizer::{Direction, TokenKind, Tokenizer};
use std::borrow::Cow;

/// Both-script canonical forms of one input string, plus what was detected
/// about it. Produced by [`TransliterationEngine::normalize`]; immutable
/// after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForm {
    pub original: String,
    /// Latin rendition: the input itself for Latin input, otherwise the
    /// Arabic→Latin conversion.
    pub latin: String,
    /// Arabic rendition, symmetrically.
    pub arabic: String,
    pub detected_script: ScriptKind,
    /// Fraction of chars consumed by recognized (non-pass-through) tokens
    /// in the direction matching the detected script, in `[0, 1]`. Low
    /// values signal substantial unmapped content.
    ///
    /// Measured over the folded text, not the raw input: stripped tashkil
    /// and folded letter variants do not count against recognition.
    pub confidence: f32,
}

/// A minority script with this many letters or more makes the text `Mixed`
/// rather than a near-zero intrusion into the majority script.
const MIXED_THRESHOLD: usize = 2;

/// Stateless conversion front end over one immutable [`ScriptMapTable`].
#[derive(Debug)]
pub struct TransliterationEngine {
    table: ScriptMapTable,
}

impl TransliterationEngine {
    pub fn new(table: ScriptMapTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScriptMapTable {
        &self.table
    }

    /// Convert Arabizi to Arabic script. Total and deterministic; unmapped
    /// codepoints (punctuation, whitespace, already-Arabic text) pass
    /// through unchanged.
    pub fn to_arabic(&self, text: &str) -> String {
        self.convert(text, Direction::LatinToArabic).output
    }

    /// Convert Arabic script to Arabizi. Tashkil marks are stripped, and
    /// Arabic-Indic digits and hamza-carrier letters are folded, before
    /// matching; a grapheme with
    /// several registered spellings renders as the lowest-weight, then
    /// lexicographically-first one.
    pub fn to_latin(&self, text: &str) -> String {
        self.convert(text, Direction::ArabicToLatin).output
    }

    /// Classify the dominant script by counting Arabic-block versus Latin
    /// letters. Digits, punctuation and whitespace are ignored.
    pub fn detect_script(&self, text: &str) -> ScriptKind {
        let (arabic, latin) = script::count_scripts(text);
        match (arabic, latin) {
            (0, 0) => ScriptKind::Unknown,
            (_, 0) => ScriptKind::Arabic,
            (0, _) => ScriptKind::Latin,
            (a, l) if a.min(l) >= MIXED_THRESHOLD => ScriptKind::Mixed,
            (a, l) if a > l => ScriptKind::Arabic,
            (a, l) if l > a => ScriptKind::Latin,
            _ => ScriptKind::Mixed,
        }
    }

    /// Detect the script, then produce both-script canonical forms and a
    /// recognition confidence. Never fails; empty input yields empty forms
    /// with confidence 0.
    pub fn normalize(&self, text: &str) -> NormalizedForm {
        let detected = self.detect_script(text);

        let (latin, arabic, confidence) = match detected {
            ScriptKind::Latin => {
                let run = self.convert(text, Direction::LatinToArabic);
                let confidence = run.confidence();
                (text.to_owned(), run.output, confidence)
            }
            ScriptKind::Arabic => {
                let run = self.convert(text, Direction::ArabicToLatin);
                let confidence = run.confidence();
                // The canonical Arabic form is the folded text, so that
                // hamza spellings and vocalized text compare equal.
                (run.output, prepare_arabic(text).into_owned(), confidence)
            }
            ScriptKind::Mixed => {
                let to_latin = self.convert(text, Direction::ArabicToLatin);
                let to_arabic = self.convert(text, Direction::LatinToArabic);
                // Confidence follows the dominant script's direction;
                // Latin on ties.
                let (a, l) = script::count_scripts(text);
                let confidence = if a > l {
                    to_latin.confidence()
                } else {
                    to_arabic.confidence()
                };
                (to_latin.output, to_arabic.output, confidence)
            }
            ScriptKind::Unknown => (text.to_owned(), text.to_owned(), 0.0),
        };

        NormalizedForm {
            original: text.to_owned(),
            latin,
            arabic,
            detected_script: detected,
            confidence,
        }
    }

    fn convert(&self, text: &str, direction: Direction) -> ConversionRun {
        // The fold pre-pass runs in both directions: Latin-side conversion
        // still passes embedded Arabic through, and that passthrough must
        // land in the same canonical form the Arabic side produces.
        let prepared = prepare_arabic(text);

        let mut output = String::with_capacity(prepared.len());
        let mut recognized = 0usize;
        let mut total = 0usize;

        for token in Tokenizer::new(&self.table, direction, &prepared) {
            let chars = token.char_len();
            total += chars;
            match token.kind {
                TokenKind::Mapped(entry) => {
                    recognized += chars;
                    output.push_str(match direction {
                        Direction::LatinToArabic => &entry.arabic,
                        Direction::ArabicToLatin => &entry.latin,
                    });
                }
                TokenKind::Literal(c) => output.push(c),
            }
        }

        ConversionRun {
            output,
            recognized,
            total,
        }
    }
}

struct ConversionRun {
    output: String,
    recognized: usize,
    total: usize,
}

impl ConversionRun {
    fn confidence(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.recognized as f32 / self.total as f32
        }
    }
}

/// Pre-pass for Arabic-side matching: strip tashkil, fold Arabic-Indic
/// digits to ASCII and hamza-carrier letters to their base letter.
/// Zero-copy when the text needs none of it.
fn prepare_arabic(text: &str) -> Cow<'_, str> {
    let needs_work = text.chars().any(|c| {
        script::is_tashkil(c)
            || script::fold_arabic_digit(c) != c
            || script::fold_arabic_letter(c) != c
    });
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if script::is_tashkil(c) {
            continue;
        }
        out.push(script::fold_arabic_letter(script::fold_arabic_digit(c)));
    }
    Cow::Owned(out)
}
