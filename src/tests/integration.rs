#[cfg(test)]
mod integration_tests {

    use crate::{
        CulturalContextResolver, CulturalEntity, MatchScript, TransliterationEngine,
        default_catalog, default_table, seed,
    };
    use std::sync::Arc;

    fn full_stack() -> (Arc<TransliterationEngine>, CulturalContextResolver) {
        let engine = Arc::new(TransliterationEngine::new(default_table()));
        let resolver =
            CulturalContextResolver::new(Arc::clone(&engine), Arc::new(default_catalog()));
        (engine, resolver)
    }

    #[test]
    fn arabizi_greeting_is_recognized_end_to_end() {
        let (engine, resolver) = full_stack();

        let input = "ahla bik, labess?";
        let form = engine.normalize(input);
        assert_eq!(form.arabic, "اهلا بيك, لاباسس?");

        let matches = resolver.resolve(input);
        let names: Vec<_> = matches
            .iter()
            .map(|m| m.entity.canonical_name.as_str())
            .collect();
        assert!(names.contains(&"ahla bik"));
        assert!(names.contains(&"labess"));
    }

    #[test]
    fn arabic_script_input_matches_latin_seeded_entities() {
        let (_, resolver) = full_stack();

        // "برشا" is registered as a variation of "barcha".
        let matches = resolver.resolve("يعجبني برشا");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity.canonical_name, "barcha");
        assert_eq!(matches[0].script, MatchScript::Arabic);
        assert_eq!(matches[0].entity.meaning, "A lot / very much");
    }

    #[test]
    fn mixed_script_input_resolves_in_both_scripts() {
        let (engine, resolver) = full_stack();

        let input = "ahla bik يا صديقي، couscous اليوم؟";
        assert_eq!(
            engine.normalize(input).detected_script,
            crate::ScriptKind::Mixed
        );

        let matches = resolver.resolve(input);
        let names: Vec<_> = matches
            .iter()
            .map(|m| m.entity.canonical_name.as_str())
            .collect();
        assert!(names.contains(&"ahla bik"));
        assert!(names.contains(&"couscous"));
    }

    #[test]
    fn catalog_update_is_visible_to_subsequent_resolves() {
        let engine = Arc::new(TransliterationEngine::new(default_table()));
        let catalog = Arc::new(default_catalog());
        let resolver = CulturalContextResolver::new(Arc::clone(&engine), Arc::clone(&catalog));

        assert!(resolver.resolve("harissa fi kol blasa").is_empty());

        catalog
            .add_entity(
                "food",
                CulturalEntity::new(
                    "harissa",
                    "Hot chili paste",
                    "Served with nearly everything",
                    ["هريسة"],
                ),
            )
            .unwrap();

        let matches = resolver.resolve("harissa fi kol blasa");
        assert_eq!(matches[0].entity.canonical_name, "harissa");
    }

    #[test]
    fn seeded_table_and_catalog_drive_the_resolver() {
        let table = seed::table_from_json(
            r#"[
                { "latin": "a", "arabic": "ا", "weight": 2 },
                { "latin": "h", "arabic": "ه", "weight": 2 },
                { "latin": "l", "arabic": "ل", "weight": 2 },
                { "latin": "b", "arabic": "ب", "weight": 2 },
                { "latin": "i", "arabic": "ي", "weight": 2 },
                { "latin": "k", "arabic": "ك", "weight": 2 }
            ]"#,
        )
        .unwrap();
        let catalog = seed::catalog_from_json(
            r#"[
                { "category": "expressions", "canonical_name": "ahla",
                  "meaning": "hello", "variations": ["أهلا"] }
            ]"#,
        )
        .unwrap();

        let resolver = CulturalContextResolver::new(
            Arc::new(TransliterationEngine::new(table)),
            Arc::new(catalog),
        );

        let matches = resolver.resolve("ahla bik");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span, (0, 4));
        assert!((matches[0].score - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fast_path_variant_lookup_agrees_with_resolver() {
        let (_, resolver) = full_stack();

        let entity = resolver.catalog().find_by_variant("yezzi").unwrap();
        assert_eq!(entity.meaning, "Enough / stop it");
        assert_eq!(
            resolver.resolve("yezzi mel klem")[0].entity.canonical_name,
            entity.canonical_name
        );
    }
}
