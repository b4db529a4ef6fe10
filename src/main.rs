use std::io::{self, BufRead, Write};
use std::sync::Arc;

use derja::{CulturalContextResolver, TransliterationEngine, default_catalog, default_table};

fn main() {
    env_logger::init();

    let engine = Arc::new(TransliterationEngine::new(default_table()));
    let resolver = CulturalContextResolver::new(Arc::clone(&engine), Arc::new(default_catalog()));

    println!("derja demo — type Tunisian text in any script, empty line to quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("stdin error: {e}");
                break;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let form = engine.normalize(line);
        println!("script:     {:?}", form.detected_script);
        println!("latin:      {}", form.latin);
        println!("arabic:     {}", form.arabic);
        println!("confidence: {:.2}", form.confidence);

        for m in resolver.resolve(line) {
            println!(
                "  [{}] {} — {} ({}) at {:?}",
                m.category, m.entity.canonical_name, m.entity.meaning, m.entity.context_note, m.span
            );
        }
    }
}
