//! In-memory store of recognized dialect expressions.
//!
//! Entities are grouped by category (`expressions`, `food`, `places`, …) and
//! kept in registration order. The catalog is the only mutable shared state
//! in the crate: a single `RwLock` guards it, so concurrent resolver reads
//! see either the fully-prior or fully-post state of any `add_entity` call,
//! never a partial one. Readers receive `Arc` views; entities are never
//! mutated through them.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// A variation spelling is ambiguous within its category: it already
/// belongs to a different canonical entity. The rejected add leaves the
/// catalog unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("variation `{variant}` in category `{category}` already belongs to `{existing}`")]
pub struct DuplicateVariantError {
    pub category: String,
    pub variant: String,
    pub existing: String,
}

/// A recognized expression with its structured meaning.
///
/// All fields are explicit at construction; `variations` always contains
/// `canonical_name`, and every variation is non-empty and unique within the
/// entity (the constructor enforces both).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CulturalEntity {
    pub canonical_name: String,
    pub meaning: String,
    pub context_note: String,
    pub variations: Vec<String>,
}

impl CulturalEntity {
    pub fn new(
        canonical_name: impl Into<String>,
        meaning: impl Into<String>,
        context_note: impl Into<String>,
        variations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let canonical_name = canonical_name.into();
        let mut seen = vec![canonical_name.clone()];
        for v in variations {
            let v = v.into();
            if !v.is_empty() && !seen.contains(&v) {
                seen.push(v);
            }
        }
        Self {
            canonical_name,
            meaning: meaning.into(),
            context_note: context_note.into(),
            variations: seen,
        }
    }
}

struct Category {
    name: String,
    entities: Vec<Arc<CulturalEntity>>,
}

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

/// Category-keyed entity store. See the module docs for the concurrency
/// contract.
#[derive(Default)]
pub struct CulturalEntityCatalog {
    inner: RwLock<Inner>,
}

impl CulturalEntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entity` under `category`, or replace the entity already
    /// registered there under the same `canonical_name` (replacement keeps
    /// the original position).
    ///
    /// Rejects the add atomically when one of the entity's variations is
    /// already a variation of a *different* canonical entity in the same
    /// category. The same spelling under another category is fine.
    pub fn add_entity(
        &self,
        category: &str,
        entity: CulturalEntity,
    ) -> Result<(), DuplicateVariantError> {
        let mut inner = self.inner.write().expect("catalog lock poisoned");

        // Validate before touching anything so a rejection is a no-op.
        if let Some(&idx) = inner.index.get(category) {
            for existing in &inner.categories[idx].entities {
                if existing.canonical_name == entity.canonical_name {
                    continue;
                }
                for variant in &entity.variations {
                    if existing.variations.contains(variant) {
                        return Err(DuplicateVariantError {
                            category: category.to_owned(),
                            variant: variant.clone(),
                            existing: existing.canonical_name.clone(),
                        });
                    }
                }
            }
        }

        let idx = match inner.index.get(category).copied() {
            Some(idx) => idx,
            None => {
                let idx = inner.categories.len();
                inner.categories.push(Category {
                    name: category.to_owned(),
                    entities: Vec::new(),
                });
                inner.index.insert(category.to_owned(), idx);
                idx
            }
        };

        let entities = &mut inner.categories[idx].entities;
        let entity = Arc::new(entity);
        match entities
            .iter()
            .position(|e| e.canonical_name == entity.canonical_name)
        {
            Some(pos) => {
                debug!(
                    "replacing `{}` in category `{category}`",
                    entity.canonical_name
                );
                entities[pos] = entity;
            }
            None => {
                debug!("adding `{}` to category `{category}`", entity.canonical_name);
                entities.push(entity);
            }
        }
        Ok(())
    }

    /// Entities of a category in registration order; empty for an unknown
    /// category.
    pub fn lookup_category(&self, category: &str) -> Vec<Arc<CulturalEntity>> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        match inner.index.get(category) {
            Some(&idx) => inner.categories[idx].entities.clone(),
            None => Vec::new(),
        }
    }

    /// Exact-match search across every category's variations, first hit by
    /// category-then-insertion order. Fast path used before the resolver's
    /// span search.
    pub fn find_by_variant(&self, token: &str) -> Option<Arc<CulturalEntity>> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        for category in &inner.categories {
            for entity in &category.entities {
                if entity.variations.iter().any(|v| v == token) {
                    return Some(Arc::clone(entity));
                }
            }
        }
        None
    }

    /// Category names in registration order.
    pub fn categories(&self) -> Vec<String> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        inner.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// One consistent view of the whole catalog, taken under a single read
    /// lock. This is what the resolver iterates.
    pub fn snapshot(&self) -> Vec<(String, Vec<Arc<CulturalEntity>>)> {
        let inner = self.inner.read().expect("catalog lock poisoned");
        inner
            .categories
            .iter()
            .map(|c| (c.name.clone(), c.entities.clone()))
            .collect()
    }

    /// Total entity count across categories.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("catalog lock poisoned");
        inner.categories.iter().map(|c| c.entities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, meaning: &str, variations: &[&str]) -> CulturalEntity {
        CulturalEntity::new(name, meaning, "", variations.iter().copied())
    }

    #[test]
    fn constructor_enforces_entity_invariants() {
        let e = CulturalEntity::new("ahla", "hello", "greeting", ["أهلا", "", "ahla", "أهلا"]);
        assert_eq!(e.variations, vec!["ahla", "أهلا"]);
    }

    #[test]
    fn lookup_unknown_category_is_empty_not_error() {
        let catalog = CulturalEntityCatalog::new();
        assert!(catalog.lookup_category("nope").is_empty());
        assert!(catalog.find_by_variant("ahla").is_none());
    }

    #[test]
    fn ambiguous_variation_rejected_within_category() {
        let catalog = CulturalEntityCatalog::new();
        catalog
            .add_entity("expressions", entity("3andi", "I have", &["3andi"]))
            .unwrap();

        let err = catalog
            .add_entity("expressions", entity("other", "something else", &["3andi"]))
            .unwrap_err();
        assert_eq!(
            err,
            DuplicateVariantError {
                category: "expressions".into(),
                variant: "3andi".into(),
                existing: "3andi".into(),
            }
        );

        // Rejection left the original intact.
        let entities = catalog.lookup_category("expressions");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].canonical_name, "3andi");

        // Same spelling under a different category is legitimate.
        catalog
            .add_entity("slang", entity("other", "something else", &["3andi"]))
            .unwrap();
        assert_eq!(catalog.lookup_category("slang").len(), 1);
    }

    #[test]
    fn replace_by_canonical_name_keeps_latest_meaning() {
        let catalog = CulturalEntityCatalog::new();
        catalog
            .add_entity("expressions", entity("barcha", "a lot", &["barsha"]))
            .unwrap();
        catalog
            .add_entity("expressions", entity("yezzi", "enough", &[]))
            .unwrap();
        catalog
            .add_entity("expressions", entity("barcha", "very much", &["barsha"]))
            .unwrap();

        let entities = catalog.lookup_category("expressions");
        assert_eq!(entities.len(), 2);
        // Replacement kept the original position.
        assert_eq!(entities[0].canonical_name, "barcha");
        assert_eq!(entities[0].meaning, "very much");
    }

    #[test]
    fn find_by_variant_respects_category_then_insertion_order() {
        let catalog = CulturalEntityCatalog::new();
        catalog
            .add_entity("expressions", entity("ahla", "hello", &["أهلا"]))
            .unwrap();
        catalog
            .add_entity("greetings", entity("ahla w sahla", "welcome", &["أهلا"]))
            .unwrap();

        // "أهلا" exists in both categories; the first-registered category wins.
        assert_eq!(
            catalog.find_by_variant("أهلا").unwrap().canonical_name,
            "ahla"
        );
        // The canonical name itself is always findable.
        assert_eq!(
            catalog.find_by_variant("ahla w sahla").unwrap().canonical_name,
            "ahla w sahla"
        );
    }

    #[test]
    fn concurrent_reads_during_writes_see_consistent_state() {
        use std::thread;

        let catalog = std::sync::Arc::new(CulturalEntityCatalog::new());
        let writer = {
            let catalog = std::sync::Arc::clone(&catalog);
            thread::spawn(move || {
                for i in 0..200 {
                    let name = format!("entity-{i}");
                    catalog
                        .add_entity("stress", entity(&name, "m", &[]))
                        .unwrap();
                }
            })
        };

        let reader = {
            let catalog = std::sync::Arc::clone(&catalog);
            thread::spawn(move || {
                for _ in 0..200 {
                    for e in catalog.lookup_category("stress") {
                        // Entities are never observed half-built.
                        assert!(!e.canonical_name.is_empty());
                        assert!(e.variations.contains(&e.canonical_name));
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(catalog.len(), 200);
    }
}
