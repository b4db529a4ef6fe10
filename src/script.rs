//! Codepoint-level script predicates and classification.
//!
//! These are the primitives the detection and conversion paths share. They
//! are deliberately table-free `const fn`s over codepoint ranges so the hot
//! loops stay branch-cheap and allocation-free.

/// Dominant script of a piece of text, as reported by
/// [`detect_script`](crate::engine::TransliterationEngine::detect_script).
///
/// Produced by detection, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    /// Latin letters dominate (Arabizi input).
    Latin,
    /// Arabic-block letters dominate.
    Arabic,
    /// Both scripts present in non-trivial amounts.
    Mixed,
    /// No letters of either script (empty, digits, punctuation only).
    Unknown,
}

/// Arabic script blocks, including presentation forms.
///
/// Ranges: Arabic, Arabic Supplement, Arabic Extended-A, Presentation
/// Forms A and B.
#[inline(always)]
pub const fn is_arabic_block(c: char) -> bool {
    let cp = c as u32;

    // Early exit: everything below U+0600 is out.
    if cp < 0x0600 {
        return false;
    }

    matches!(cp,
        0x0600..=0x06FF |
        0x0750..=0x077F |
        0x08A0..=0x08FF |
        0xFB50..=0xFDFF |
        0xFE70..=0xFEFF
    )
}

/// ASCII letters plus Latin-1 Supplement and Extended A/B.
///
/// Digits are excluded on purpose: in Arabizi a digit is a letter only once
/// the mapping table says so, and script detection must not count it toward
/// either side.
#[inline(always)]
pub const fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c as u32, 0x00C0..=0x02AF)
}

/// Arabic combining vowel marks (tashkil) and the shadda/sukun pair.
///
/// These carry no Arabizi spelling of their own; the Arabic→Latin path
/// strips them in a pre-pass instead of carrying empty Latin forms in the
/// mapping table.
#[inline(always)]
pub const fn is_tashkil(c: char) -> bool {
    matches!(c as u32, 0x064B..=0x0652 | 0x0640) // 0x0640 = tatweel
}

/// Fold an Arabic-Indic digit (U+0660–U+0669) to its ASCII counterpart.
/// Any other character is returned unchanged.
#[inline(always)]
pub const fn fold_arabic_digit(c: char) -> char {
    let cp = c as u32;
    if cp >= 0x0660 && cp <= 0x0669 {
        // Safe by construction: '0'..='9' are valid scalars.
        match char::from_u32('0' as u32 + (cp - 0x0660)) {
            Some(d) => d,
            None => c,
        }
    } else {
        c
    }
}

/// Fold letter variants to the base letter they sound like in dialect
/// writing: hamza carriers (أ/إ/آ/ٱ, ى, ة to ا; ئ to ي; ؤ to و) and the
/// emphatic consonants Arabizi does not distinguish (ص to س, ض to ذ,
/// ط to ت, ظ to ث). Everything else is returned unchanged.
///
/// Arabizi has no spelling of its own for these variants; folding them
/// first keeps the mapping table free of near-duplicate graphemes. Table
/// entries must never target a foldable letter, or conversion would stop
/// being idempotent.
#[inline(always)]
pub const fn fold_arabic_letter(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' | 'ى' | 'ة' => 'ا',
        'ئ' => 'ي',
        'ؤ' => 'و',
        'ص' => 'س',
        'ض' => 'ذ',
        'ط' => 'ت',
        'ظ' => 'ث',
        _ => c,
    }
}

/// Count Arabic-block and Latin letters in `text`, ignoring everything
/// else. Digits, punctuation (including Arabic ؟ and ؛), combining marks
/// and whitespace contribute to neither count.
#[inline]
pub fn count_scripts(text: &str) -> (usize, usize) {
    let mut arabic = 0usize;
    let mut latin = 0usize;
    for c in text.chars() {
        // Tashkil and tatweel carry `Other_Alphabetic`, so the
        // `is_alphabetic` check alone would count them as Arabic letters.
        if is_tashkil(c) || !c.is_alphabetic() {
            continue;
        }
        if is_arabic_block(c) {
            arabic += 1;
        } else if is_latin_letter(c) {
            latin += 1;
        }
    }
    (arabic, latin)
}
