//! The `gradekit catalog` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradekit_core::catalog::Catalog;
use gradekit_core::parser;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = match &catalog_path {
        Some(path) => parser::parse_catalog(path)?,
        None => Catalog::builtin().clone(),
    };

    println!("Catalog: {} ({})", catalog.name, catalog.id);
    if !catalog.description.is_empty() {
        println!("{}", catalog.description);
    }

    let mut concepts = Table::new();
    concepts.set_header(vec!["Term", "Weight", "Category"]);
    for concept in &catalog.concepts {
        concepts.add_row(vec![
            Cell::new(&concept.term),
            Cell::new(format!("{:.2}", concept.weight)),
            Cell::new(concept.category.to_string()),
        ]);
    }
    println!("\nConcepts ({}):", catalog.concepts.len());
    println!("{concepts}");

    let mut rules = Table::new();
    rules.set_header(vec!["Pattern", "Severity", "Correction"]);
    for rule in &catalog.rules {
        rules.add_row(vec![
            Cell::new(rule.pattern.as_str()),
            Cell::new(rule.severity.to_string()),
            Cell::new(&rule.correct_info),
        ]);
    }
    println!("\nRules ({}):", catalog.rules.len());
    println!("{rules}");

    Ok(())
}
