//! Concept and factual-error rule catalogs.
//!
//! A catalog is the immutable data a grading run scores against: weighted
//! key concepts for semantic matching and ordered regex rules for known
//! factual errors. Rules are data, not code, so a rule set can be extended
//! without touching scoring logic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CatalogError;
use crate::model::{Concept, ConceptCategory, Severity};

/// A predefined incorrect-claim pattern.
///
/// Rules are applied in catalog order; the first rule whose pattern matches
/// a sentence wins and no later rules are consulted for that sentence.
#[derive(Debug, Clone)]
pub struct FactualRule {
    pub pattern: Regex,
    pub severity: Severity,
    /// The correction shown to the student.
    pub correct_info: String,
    /// Note on the underlying concept the student did or did not grasp.
    pub concept_note: String,
}

impl FactualRule {
    /// Build a rule from a pattern string. Matching is case-insensitive.
    pub fn new(
        pattern: &str,
        severity: Severity,
        correct_info: impl Into<String>,
        concept_note: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let pattern =
            Regex::new(&format!("(?i){pattern}")).map_err(|source| CatalogError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern,
            severity,
            correct_info: correct_info.into(),
            concept_note: concept_note.into(),
        })
    }

    pub fn matches(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }
}

/// An immutable grading catalog: concepts plus factual-error rules.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    pub description: String,
    pub concepts: Vec<Concept>,
    pub rules: Vec<FactualRule>,
}

impl Catalog {
    /// Sum of all concept weights. This is the semantic-score denominator:
    /// a sentence is scored against the whole concept universe, so even a
    /// strong sentence rarely approaches 100 unless it covers every term.
    pub fn total_weight(&self) -> f64 {
        self.concepts.iter().map(|c| c.weight).sum()
    }

    /// The built-in Industrial Revolution catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }
}

const BUILTIN_CONCEPTS: &[(&str, f64, ConceptCategory)] = &[
    ("industrial revolution", 1.0, ConceptCategory::MainTopic),
    ("technological change", 0.9, ConceptCategory::Concept),
    ("steam engine", 0.95, ConceptCategory::KeyInvention),
    ("factory", 0.8, ConceptCategory::Outcome),
    ("production", 0.85, ConceptCategory::Concept),
    ("working class", 0.75, ConceptCategory::Social),
    ("urbanization", 0.7, ConceptCategory::Social),
    ("village", 0.6, ConceptCategory::Social),
    ("economy", 0.7, ConceptCategory::Economic),
    ("england", 0.8, ConceptCategory::Location),
    ("james watt", 0.95, ConceptCategory::KeyPerson),
    ("18th century", 0.85, ConceptCategory::TimePeriod),
    ("machine", 0.75, ConceptCategory::Concept),
    ("transformation", 0.8, ConceptCategory::Concept),
];

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let concepts = BUILTIN_CONCEPTS
        .iter()
        .map(|&(term, weight, category)| Concept {
            term: term.to_string(),
            weight,
            category,
        })
        .collect();

    // Pattern compilation of the built-in table cannot fail.
    let rules = vec![
        FactualRule::new(
            r"einstein.*steam\s*engine",
            Severity::High,
            "The steam engine was developed by James Watt, not Einstein.",
            "The student understands the machine's significance but misattributes its inventor.",
        )
        .expect("built-in rule pattern"),
        FactualRule::new(
            r"1905.*steam|steam.*1905",
            Severity::Medium,
            "The steam engine was developed between 1760 and 1780.",
            "The date is wrong, but the notion of a historical period is present.",
        )
        .expect("built-in rule pattern"),
    ];

    Catalog {
        id: "industrial-revolution".to_string(),
        name: "Industrial Revolution".to_string(),
        description: "Key concepts and known misconceptions for short answers \
                      on the Industrial Revolution."
            .to_string(),
        concepts,
        rules,
    }
});
