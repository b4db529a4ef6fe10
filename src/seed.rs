//! Bulk load of mapping tables and catalogs from JSON seed documents.
//!
//! The core itself does no file I/O; callers hand in the document text and
//! keep ownership of where it came from. Seed formats:
//!
//! ```json
//! [{ "latin": "ch", "arabic": "ش", "weight": 1 }]
//! ```
//!
//! ```json
//! [{ "category": "expressions", "canonical_name": "ahla bik",
//!    "meaning": "Hello", "context_note": "Common greeting",
//!    "variations": ["ahla", "أهلا بيك"] }]
//! ```

use crate::catalog::{CulturalEntity, CulturalEntityCatalog, DuplicateVariantError};
use crate::mapping::{InvalidMappingError, MappingEntry, ScriptMapTable};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// A seed document was rejected. All variants are fatal to the load; the
/// catalog/table under construction is discarded.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidMapping(#[from] InvalidMappingError),

    #[error(transparent)]
    DuplicateVariant(#[from] DuplicateVariantError),
}

/// One mapping-table row. `weight` defaults to 0 when absent.
#[derive(Debug, Deserialize)]
pub struct MappingRecord {
    pub latin: String,
    pub arabic: String,
    #[serde(default)]
    pub weight: u32,
}

/// One catalog row.
#[derive(Debug, Deserialize)]
pub struct EntityRecord {
    pub category: String,
    pub canonical_name: String,
    pub meaning: String,
    #[serde(default)]
    pub context_note: String,
    #[serde(default)]
    pub variations: Vec<String>,
}

/// Parse mapping records without building a table. Useful for callers that
/// merge several sources before construction.
pub fn mappings_from_json(json: &str) -> Result<Vec<MappingEntry>, SeedError> {
    let records: Vec<MappingRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(|r| MappingEntry::new(r.latin, r.arabic, r.weight))
        .collect())
}

/// Parse and build a [`ScriptMapTable`] in one step.
pub fn table_from_json(json: &str) -> Result<ScriptMapTable, SeedError> {
    let entries = mappings_from_json(json)?;
    debug!("loaded {} mapping entries from seed", entries.len());
    Ok(ScriptMapTable::new(entries)?)
}

/// Build a fresh catalog from entity records.
pub fn catalog_from_json(json: &str) -> Result<CulturalEntityCatalog, SeedError> {
    let catalog = CulturalEntityCatalog::new();
    let added = extend_catalog_from_json(&catalog, json)?;
    debug!("seeded catalog with {added} entities");
    Ok(catalog)
}

/// Add entity records to an existing catalog, returning how many were
/// applied. Stops at the first ambiguous record; entities applied before
/// it remain (each `add_entity` is individually atomic).
pub fn extend_catalog_from_json(
    catalog: &CulturalEntityCatalog,
    json: &str,
) -> Result<usize, SeedError> {
    let records: Vec<EntityRecord> = serde_json::from_str(json)?;
    let mut added = 0usize;
    for record in records {
        catalog.add_entity(
            &record.category,
            CulturalEntity::new(
                record.canonical_name,
                record.meaning,
                record.context_note,
                record.variations,
            ),
        )?;
        added += 1;
    }
    Ok(added)
}
