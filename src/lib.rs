pub mod catalog;
pub mod data;
pub mod engine;
pub mod mapping;
pub mod resolver;
pub mod script;
pub mod seed;
pub mod tokenizer;

pub use catalog::{CulturalEntity, CulturalEntityCatalog, DuplicateVariantError};
pub use data::{default_catalog, default_table};
pub use engine::{NormalizedForm, TransliterationEngine};
pub use mapping::{InvalidMappingError, MappingEntry, ScriptMapTable};
pub use resolver::{CulturalContextResolver, EnrichmentMatch, MatchScript};
pub use script::ScriptKind;
pub use seed::SeedError;
