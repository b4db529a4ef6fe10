//! Matching catalog entities against normalized utterances.
//!
//! The resolver normalizes the utterance once, normalizes every variation
//! of every catalog entity, and substring-searches the variation's
//! same-script form inside the utterance form(s) selected by the detected
//! script. Overlapping matches are all returned; merging or suppressing
//! them is the response layer's call.

use crate::catalog::{CulturalEntity, CulturalEntityCatalog};
use crate::engine::TransliterationEngine;
use crate::script::ScriptKind;
use memchr::memmem;
use smallvec::SmallVec;
use std::sync::Arc;

/// Which normalized form of the utterance a match was found in. Spans are
/// only meaningful relative to that form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScript {
    Latin,
    Arabic,
}

/// One recognized expression inside an utterance. Ephemeral, produced per
/// [`CulturalContextResolver::resolve`] call.
#[derive(Debug, Clone)]
pub struct EnrichmentMatch {
    pub entity: Arc<CulturalEntity>,
    pub category: String,
    /// `(start, end)` char offsets into the searched normalized form.
    /// Latin forms are case-folded before the search; spans refer to the
    /// folded form.
    pub span: (usize, usize),
    /// The catalog variation that produced the hit.
    pub matched_variant: String,
    pub script: MatchScript,
    /// Coverage heuristic: span length over searched-form length.
    pub score: f32,
}

impl EnrichmentMatch {
    /// Span length in chars.
    pub fn span_len(&self) -> usize {
        self.span.1 - self.span.0
    }
}

/// Finds catalog entities inside utterances. Holds shared, read-only
/// handles; safe to call from many threads at once.
pub struct CulturalContextResolver {
    engine: Arc<TransliterationEngine>,
    catalog: Arc<CulturalEntityCatalog>,
}

impl CulturalContextResolver {
    pub fn new(engine: Arc<TransliterationEngine>, catalog: Arc<CulturalEntityCatalog>) -> Self {
        Self { engine, catalog }
    }

    pub fn catalog(&self) -> &CulturalEntityCatalog {
        &self.catalog
    }

    /// Every catalog entity recognized in `utterance`, ordered by span
    /// start ascending, longer spans first on ties. Empty input or an empty
    /// catalog yields an empty vec, never an error.
    pub fn resolve(&self, utterance: &str) -> Vec<EnrichmentMatch> {
        if utterance.is_empty() {
            return Vec::new();
        }

        let form = self.engine.normalize(utterance);

        // Latin matching is case-insensitive: the search runs over a
        // case-folded copy of the Latin form, and Latin needles are folded
        // the same way below.
        let latin_haystack = form.latin.to_lowercase();

        // Which utterance form(s) to search: the detected script's own
        // form, or both when the script is ambiguous.
        let mut haystacks: SmallVec<[(MatchScript, &str); 2]> = SmallVec::new();
        match form.detected_script {
            ScriptKind::Latin => haystacks.push((MatchScript::Latin, &latin_haystack)),
            ScriptKind::Arabic => haystacks.push((MatchScript::Arabic, &form.arabic)),
            ScriptKind::Mixed | ScriptKind::Unknown => {
                haystacks.push((MatchScript::Latin, &latin_haystack));
                haystacks.push((MatchScript::Arabic, &form.arabic));
            }
        }

        let mut matches = Vec::new();
        for (category, entities) in self.catalog.snapshot() {
            for entity in entities {
                // Distinct variations often normalize to the same form
                // ("ahla" and "أهلا" both become `ahla`); report each
                // (script, span) hit once, for the first-registered one.
                let mut seen: SmallVec<[(MatchScript, usize, usize); 8]> = SmallVec::new();

                for variation in &entity.variations {
                    let var_form = self.engine.normalize(variation);
                    for &(script, haystack) in &haystacks {
                        let needle = match script {
                            MatchScript::Latin => var_form.latin.to_lowercase(),
                            MatchScript::Arabic => var_form.arabic.clone(),
                        };
                        if needle.is_empty() {
                            continue;
                        }

                        let haystack_chars = haystack.chars().count();
                        let needle_chars = needle.chars().count();
                        for pos in memmem::find_iter(haystack.as_bytes(), needle.as_bytes()) {
                            let start = haystack[..pos].chars().count();
                            let span = (start, start + needle_chars);
                            if seen.contains(&(script, span.0, span.1)) {
                                continue;
                            }
                            seen.push((script, span.0, span.1));
                            matches.push(EnrichmentMatch {
                                entity: Arc::clone(&entity),
                                category: category.clone(),
                                span,
                                matched_variant: variation.clone(),
                                script,
                                score: needle_chars as f32 / haystack_chars as f32,
                            });
                        }
                    }
                }
            }
        }

        // Start ascending, longest span first on ties; stable for the rest.
        matches.sort_by(|a, b| {
            a.span
                .0
                .cmp(&b.span.0)
                .then_with(|| b.span_len().cmp(&a.span_len()))
        });
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CulturalEntity;
    use crate::data::default_table;

    fn resolver_with(entries: &[(&str, &str, &str, &[&str])]) -> CulturalContextResolver {
        let catalog = CulturalEntityCatalog::new();
        for &(category, name, meaning, variations) in entries {
            catalog
                .add_entity(
                    category,
                    CulturalEntity::new(name, meaning, "", variations.iter().copied()),
                )
                .unwrap();
        }
        CulturalContextResolver::new(
            Arc::new(TransliterationEngine::new(default_table())),
            Arc::new(catalog),
        )
    }

    #[test]
    fn single_match_with_coverage_score() {
        let resolver = resolver_with(&[("expressions", "ahla", "hello", &["أهلا"])]);

        let matches = resolver.resolve("ahla bik");
        assert_eq!(matches.len(), 1);

        let m = &matches[0];
        assert_eq!(m.entity.canonical_name, "ahla");
        assert_eq!(m.span, (0, 4));
        assert_eq!(m.script, MatchScript::Latin);
        assert!((m.score - 4.0 / 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn capitalized_arabizi_still_resolves() {
        let resolver = resolver_with(&[("expressions", "ahla bik", "hello", &[])]);

        let matches = resolver.resolve("Ahla Bik");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity.canonical_name, "ahla bik");
        assert_eq!(matches[0].span, (0, 8));

        // Shouting is still the same greeting.
        assert_eq!(resolver.resolve("AHLA BIK ya sa7bi").len(), 1);
    }

    #[test]
    fn arabic_utterance_matches_latin_registered_variant() {
        let resolver = resolver_with(&[("expressions", "ahla", "hello", &[])]);

        let matches = resolver.resolve("أهلا بيك");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].script, MatchScript::Arabic);
        assert_eq!(matches[0].span, (0, 4));
    }

    #[test]
    fn matches_are_ordered_by_start_then_longest() {
        let resolver = resolver_with(&[
            ("expressions", "ahla", "hello", &[]),
            ("expressions", "ahla w sahla", "warm welcome", &[]),
            ("expressions", "labess", "how are you", &[]),
        ]);

        let matches = resolver.resolve("ahla w sahla, labess?");
        let order: Vec<_> = matches
            .iter()
            .map(|m| (m.entity.canonical_name.as_str(), m.span))
            .collect();
        // Overlapping spans at offset 0: the longer expression comes first.
        // The second `ahla` hit sits inside `sahla`; suppressing such
        // overlaps is the caller's business, not the resolver's.
        assert_eq!(
            order,
            vec![
                ("ahla w sahla", (0, 12)),
                ("ahla", (0, 4)),
                ("ahla", (8, 12)),
                ("labess", (14, 20)),
            ]
        );
    }

    #[test]
    fn repeated_occurrences_all_reported() {
        let resolver = resolver_with(&[("expressions", "barcha", "a lot", &[])]);

        let matches = resolver.resolve("barcha barcha");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].span, (0, 6));
        assert_eq!(matches[1].span, (7, 13));
    }

    #[test]
    fn empty_input_and_empty_catalog_are_no_matches() {
        let resolver = resolver_with(&[("expressions", "ahla", "hello", &[])]);
        assert!(resolver.resolve("").is_empty());

        let empty = CulturalContextResolver::new(
            Arc::new(TransliterationEngine::new(default_table())),
            Arc::new(CulturalEntityCatalog::new()),
        );
        assert!(empty.resolve("ahla bik").is_empty());
    }

    #[test]
    fn no_catalog_hit_is_empty_not_error() {
        let resolver = resolver_with(&[("expressions", "ahla", "hello", &[])]);
        assert!(resolver.resolve("bonjour tout le monde").is_empty());
    }
}
