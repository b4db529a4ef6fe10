//! Built-in Tunisian Arabizi data: the default correspondence table and a
//! starter cultural catalog.
//!
//! Weights pick the spelling used when writing Arabic in Latin: the
//! conventional Tunisian Arabizi form carries the lowest weight per
//! grapheme (ق renders as `9`, ش as `ch`, خ as `kh`). Every `arabic` form
//! here is a fixed point of the engine's fold pre-pass; adding an entry
//! that targets a foldable letter (أ, ة, ط, …) would break conversion
//! idempotence.

use crate::catalog::{CulturalEntity, CulturalEntityCatalog};
use crate::mapping::{MappingEntry, ScriptMapTable};

/// `(latin, arabic, weight)` — the default Latin ↔ Arabic correspondences.
pub static DEFAULT_MAPPINGS: &[(&str, &str, u32)] = &[
    // Digit-letters: Arabic phonemes with no Latin letter of their own.
    ("2", "ء", 1),
    ("3", "ع", 1),
    ("5", "خ", 2),
    ("7", "ح", 1),
    ("8", "ق", 4),
    ("9", "ق", 1),
    // Digraphs.
    ("ch", "ش", 1),
    ("sh", "ش", 2),
    ("kh", "خ", 1),
    ("gh", "غ", 1),
    ("th", "ث", 1),
    ("dh", "ذ", 1),
    // Long-vowel digraphs.
    ("ou", "و", 5),
    ("oo", "و", 6),
    ("aa", "ا", 5),
    ("ee", "ي", 5),
    ("ii", "ي", 6),
    // Common word patterns.
    ("el", "ال", 1),
    ("elli", "اللي", 1),
    // Base alphabet.
    ("a", "ا", 2),
    ("b", "ب", 2),
    ("t", "ت", 2),
    ("j", "ج", 2),
    ("d", "د", 2),
    ("r", "ر", 2),
    ("z", "ز", 2),
    ("s", "س", 2),
    ("f", "ف", 2),
    ("q", "ق", 2),
    ("k", "ك", 2),
    ("l", "ل", 2),
    ("m", "م", 2),
    ("n", "ن", 2),
    ("h", "ه", 2),
    ("w", "و", 2),
    ("i", "ي", 2),
    ("y", "ي", 3),
    ("o", "و", 3),
    ("u", "و", 4),
    ("e", "ا", 3),
    // Regional consonant substitutions.
    ("g", "ق", 3),
    ("v", "ف", 3),
    ("p", "ب", 3),
    // French-influenced spellings common in Tunisian text.
    ("é", "ي", 4),
    ("è", "ا", 4),
    ("à", "ا", 5),
    ("ê", "ا", 6),
    ("ç", "س", 4),
];

/// `(category, canonical_name, meaning, context_note, variations)` — a
/// starter catalog of dialect expressions, foods, places, customs and
/// slang.
pub static DEFAULT_ENTITIES: &[(&str, &str, &str, &str, &[&str])] = &[
    (
        "expressions",
        "ahla bik",
        "Hello / welcome",
        "Common greeting in Tunisian dialect",
        &["ahla", "ahla w sahla", "أهلا بيك"],
    ),
    (
        "expressions",
        "labess",
        "How are you? / all good",
        "Greeting and question about well-being",
        &["labess 3lik", "لاباس"],
    ),
    (
        "expressions",
        "barcha",
        "A lot / very much",
        "Emphasizes quantity or intensity",
        &["barsha", "برشا"],
    ),
    (
        "expressions",
        "3aslema",
        "Hello / hi",
        "Casual greeting",
        &["3aslama", "عسلامة"],
    ),
    (
        "expressions",
        "chbik",
        "What's wrong with you?",
        "Asks what is bothering someone",
        &["شبيك"],
    ),
    (
        "expressions",
        "yezzi",
        "Enough / stop it",
        "Tells someone to stop doing something",
        &["يزي"],
    ),
    (
        "expressions",
        "sahit",
        "Thank you / bless you",
        "Thanks someone, or answers a sneeze",
        &["صحيت"],
    ),
    (
        "food",
        "couscous",
        "Traditional Tunisian dish",
        "National dish of semolina with vegetables and meat",
        &["kosksi", "كسكسي"],
    ),
    (
        "food",
        "lablebi",
        "Tunisian chickpea soup",
        "Popular street food",
        &["لبلابي"],
    ),
    (
        "food",
        "brik",
        "Pastry with egg and tuna",
        "Popular during Ramadan",
        &["بريك"],
    ),
    (
        "food",
        "ojja",
        "Egg dish with tomatoes and peppers",
        "Common breakfast or lunch dish",
        &["عجة"],
    ),
    (
        "places",
        "sidi bou said",
        "Blue-and-white village",
        "Tourist destination near Tunis",
        &["سيدي بو سعيد"],
    ),
    (
        "places",
        "carthage",
        "Ancient city and archaeological site",
        "Historical site near Tunis",
        &["قرطاج"],
    ),
    (
        "places",
        "djerba",
        "Island in southern Tunisia",
        "Popular tourist destination",
        &["جربة"],
    ),
    (
        "customs",
        "ramadan",
        "Holy month of fasting",
        "Major religious observance",
        &["رمضان"],
    ),
    (
        "customs",
        "henna",
        "Traditional body art",
        "Used in weddings and celebrations",
        &["حناء"],
    ),
    (
        "customs",
        "khomsa",
        "Hand-shaped amulet",
        "Protection against the evil eye",
        &["خمسة"],
    ),
    (
        "slang",
        "mrigel",
        "Cool / impressive",
        "Describes something impressive or someone brave",
        &["مريقل"],
    ),
    (
        "slang",
        "fissa",
        "Quickly / in a hurry",
        "Tells someone to hurry up",
        &["فيسع"],
    ),
    (
        "slang",
        "7ala",
        "Situation / state",
        "Usually a bad or chaotic situation",
        &["حالة"],
    ),
];

/// The default Tunisian Arabizi table.
pub fn default_table() -> ScriptMapTable {
    ScriptMapTable::new(
        DEFAULT_MAPPINGS
            .iter()
            .map(|&(latin, arabic, weight)| MappingEntry::new(latin, arabic, weight))
            .collect(),
    )
    .expect("built-in mapping table is valid – this is a bug")
}

/// A catalog seeded with [`DEFAULT_ENTITIES`].
pub fn default_catalog() -> CulturalEntityCatalog {
    let catalog = CulturalEntityCatalog::new();
    for &(category, name, meaning, context, variations) in DEFAULT_ENTITIES {
        catalog
            .add_entity(
                category,
                CulturalEntity::new(name, meaning, context, variations.iter().copied()),
            )
            .expect("built-in catalog is unambiguous – this is a bug");
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;

    #[test]
    fn built_in_table_constructs() {
        let table = default_table();
        assert_eq!(table.len(), DEFAULT_MAPPINGS.len());
        assert_eq!(table.max_latin_len(), 4); // "elli"
    }

    #[test]
    fn built_in_catalog_constructs() {
        let catalog = default_catalog();
        assert_eq!(
            catalog.categories(),
            vec!["expressions", "food", "places", "customs", "slang"]
        );
        assert_eq!(catalog.len(), DEFAULT_ENTITIES.len());
    }

    #[test]
    fn arabic_forms_are_fold_fixed_points() {
        for &(_, arabic, _) in DEFAULT_MAPPINGS {
            for c in arabic.chars() {
                assert_eq!(script::fold_arabic_letter(c), c, "foldable target in `{arabic}`");
                assert!(!script::is_tashkil(c), "tashkil target in `{arabic}`");
            }
        }
    }

    #[test]
    fn preferred_spellings_follow_tunisian_convention() {
        let table = default_table();
        for (grapheme, spelling) in [
            ("ق", "9"),
            ("ش", "ch"),
            ("خ", "kh"),
            ("ع", "3"),
            ("ح", "7"),
            ("و", "w"),
            ("ا", "a"),
        ] {
            assert_eq!(table.preferred_latin(grapheme).unwrap().latin, spelling);
        }
    }
}
