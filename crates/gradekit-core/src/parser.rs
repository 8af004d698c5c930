//! TOML catalog parser.
//!
//! Loads grading catalogs from TOML files and directories, and validates
//! them for common issues.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{Catalog, FactualRule};
use crate::model::{Concept, ConceptCategory, Severity};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    concepts: Vec<TomlConcept>,
    #[serde(default)]
    rules: Vec<TomlRule>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlConcept {
    term: String,
    weight: f64,
    category: String,
}

#[derive(Debug, Deserialize)]
struct TomlRule {
    pattern: String,
    severity: String,
    correct_info: String,
    #[serde(default)]
    concept_note: String,
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let concepts = parsed
        .concepts
        .into_iter()
        .map(|c| {
            let category: ConceptCategory = c
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;
            Ok(Concept {
                term: c.term,
                weight: c.weight,
                category,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let rules = parsed
        .rules
        .into_iter()
        .map(|r| {
            let severity: Severity = r
                .severity
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;
            let rule = FactualRule::new(&r.pattern, severity, r.correct_info, r.concept_note)?;
            Ok(rule)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        concepts,
        rules,
    })
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending term or pattern (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.concepts.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "catalog has no concepts; all semantic scores will be 0".into(),
        });
    }

    // Check for duplicate terms (case-insensitive)
    let mut seen_terms = std::collections::HashSet::new();
    for concept in &catalog.concepts {
        if !seen_terms.insert(concept.term.to_lowercase()) {
            warnings.push(ValidationWarning {
                subject: Some(concept.term.clone()),
                message: format!("duplicate concept term: {}", concept.term),
            });
        }
    }

    // Check for empty terms and weights outside (0, 1]
    for concept in &catalog.concepts {
        if concept.term.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: None,
                message: "concept term is empty".into(),
            });
        }
        if concept.weight <= 0.0 || concept.weight > 1.0 {
            warnings.push(ValidationWarning {
                subject: Some(concept.term.clone()),
                message: format!(
                    "weight {} for '{}' is outside (0, 1]",
                    concept.weight, concept.term
                ),
            });
        }
    }

    // Check for rules without a correction
    for rule in &catalog.rules {
        if rule.correct_info.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: Some(rule.pattern.as_str().to_string()),
                message: "rule has no correct_info text".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[catalog]
id = "test-catalog"
name = "Test Catalog"
description = "A test grading catalog"

[[concepts]]
term = "steam engine"
weight = 0.95
category = "key_invention"

[[concepts]]
term = "james watt"
weight = 0.95
category = "key_person"

[[rules]]
pattern = 'einstein.*steam\s*engine'
severity = "high"
correct_info = "The steam engine was developed by James Watt, not Einstein."
concept_note = "Inventor misattributed."
"#;

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.id, "test-catalog");
        assert_eq!(catalog.concepts.len(), 2);
        assert_eq!(catalog.rules.len(), 1);
        assert_eq!(catalog.concepts[0].category, ConceptCategory::KeyInvention);
        assert_eq!(catalog.rules[0].severity, Severity::High);
        assert!(catalog.rules[0].matches("Einstein invented the steam engine."));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[catalog]
id = "minimal"
name = "Minimal"

[[concepts]]
term = "economy"
weight = 0.7
category = "economic"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.description, "");
        assert!(catalog.rules.is_empty());
    }

    #[test]
    fn parse_rejects_bad_regex() {
        let toml = r#"
[catalog]
id = "bad"
name = "Bad"

[[rules]]
pattern = "(unclosed"
severity = "low"
correct_info = "n/a"
"#;
        let result = parse_catalog_str(toml, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("invalid rule pattern"));
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let toml = r#"
[catalog]
id = "bad"
name = "Bad"

[[concepts]]
term = "x"
weight = 0.5
category = "mystery"
"#;
        assert!(parse_catalog_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_catalog_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_duplicate_terms() {
        let toml = r#"
[catalog]
id = "dupes"
name = "Dupes"

[[concepts]]
term = "Economy"
weight = 0.7
category = "economic"

[[concepts]]
term = "economy"
weight = 0.6
category = "economic"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_weight_out_of_range() {
        let toml = r#"
[catalog]
id = "heavy"
name = "Heavy"

[[concepts]]
term = "x"
weight = 1.5
category = "concept"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("outside (0, 1]")));
    }

    #[test]
    fn validate_empty_catalog() {
        let toml = r#"
[catalog]
id = "empty"
name = "Empty"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("no concepts")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let catalogs = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].id, "test-catalog");
    }
}
