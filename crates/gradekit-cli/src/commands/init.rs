//! The `gradekit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create starter catalog
    std::fs::create_dir_all("catalogs")?;
    let catalog_path = std::path::Path::new("catalogs/industrial-revolution.toml");
    if catalog_path.exists() {
        println!("catalogs/industrial-revolution.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, STARTER_CATALOG)?;
        println!("Created catalogs/industrial-revolution.toml");
    }

    // Create sample answer files
    std::fs::create_dir_all("samples")?;
    for (name, content) in [
        ("samples/ideal.txt", SAMPLE_IDEAL),
        ("samples/student.txt", SAMPLE_STUDENT),
        ("samples/instructions.txt", SAMPLE_INSTRUCTIONS),
    ] {
        let path = std::path::Path::new(name);
        if path.exists() {
            println!("{name} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {name}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: gradekit validate --catalog catalogs/industrial-revolution.toml");
    println!("  2. Run: gradekit grade --student samples/student.txt --ideal samples/ideal.txt");
    println!("  3. Adjust --strictness (0-100) and re-grade to see the mode change");

    Ok(())
}

const STARTER_CATALOG: &str = r#"# gradekit catalog
# Weighted key concepts for semantic matching, plus ordered factual-error
# rules. Rules are tried top to bottom; the first match per sentence wins.

[catalog]
id = "industrial-revolution"
name = "Industrial Revolution"
description = "Key concepts and known misconceptions for short answers on the Industrial Revolution."

[[concepts]]
term = "industrial revolution"
weight = 1.0
category = "main_topic"

[[concepts]]
term = "technological change"
weight = 0.9
category = "concept"

[[concepts]]
term = "steam engine"
weight = 0.95
category = "key_invention"

[[concepts]]
term = "factory"
weight = 0.8
category = "result"

[[concepts]]
term = "production"
weight = 0.85
category = "concept"

[[concepts]]
term = "working class"
weight = 0.75
category = "social"

[[concepts]]
term = "urbanization"
weight = 0.7
category = "social"

[[concepts]]
term = "village"
weight = 0.6
category = "social"

[[concepts]]
term = "economy"
weight = 0.7
category = "economic"

[[concepts]]
term = "england"
weight = 0.8
category = "location"

[[concepts]]
term = "james watt"
weight = 0.95
category = "key_person"

[[concepts]]
term = "18th century"
weight = 0.85
category = "time_period"

[[concepts]]
term = "machine"
weight = 0.75
category = "concept"

[[concepts]]
term = "transformation"
weight = 0.8
category = "concept"

[[rules]]
pattern = 'einstein.*steam\s*engine'
severity = "high"
correct_info = "The steam engine was developed by James Watt, not Einstein."
concept_note = "The student understands the machine's significance but misattributes its inventor."

[[rules]]
pattern = '1905.*steam|steam.*1905'
severity = "medium"
correct_info = "The steam engine was developed between 1760 and 1780."
concept_note = "The date is wrong, but the notion of a historical period is present."
"#;

const SAMPLE_IDEAL: &str = "The Industrial Revolution was a great economic and technological \
transformation that began in England in the late 18th century and deeply affected the world. \
James Watt's development of the steam engine is one of the most important milestones of this \
revolution. Thanks to steam power, factories were established and production moved from manual \
labor to machine manufacturing. This process deeply shaped the social structure, urbanization, \
and the formation of the working class.\n";

const SAMPLE_STUDENT: &str = "The Industrial Revolution was a huge technological change and it \
changed the world. Einstein invented the steam engine in 1905 and thanks to this, factories \
opened. People moved from villages to cities, and the working class emerged. Thanks to machines, \
production accelerated and the economy grew.\n";

const SAMPLE_INSTRUCTIONS: &str = "Naming the inventor of the steam engine correctly is very \
important. If the student wrote James Watt correctly they should receive full credit. A date \
error is a minor deficiency. Mentioning the social effects of the Industrial Revolution can \
earn bonus credit.\n";
