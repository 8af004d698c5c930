//! Core data model types for gradekit.
//!
//! These are the fundamental types the entire gradekit system uses to
//! represent concepts, sentences, and analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weighted key concept searched for in student answers.
///
/// Matching is a case-insensitive substring test of `term` against the
/// sentence text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// The literal term searched for in the text.
    pub term: String,
    /// Relative importance in [0, 1].
    pub weight: f64,
    /// What kind of concept this is.
    pub category: ConceptCategory,
}

/// Classification of a key concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    MainTopic,
    Concept,
    KeyInvention,
    #[serde(rename = "result")]
    Outcome,
    Social,
    Economic,
    Location,
    KeyPerson,
    TimePeriod,
}

impl fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConceptCategory::MainTopic => "main_topic",
            ConceptCategory::Concept => "concept",
            ConceptCategory::KeyInvention => "key_invention",
            ConceptCategory::Outcome => "result",
            ConceptCategory::Social => "social",
            ConceptCategory::Economic => "economic",
            ConceptCategory::Location => "location",
            ConceptCategory::KeyPerson => "key_person",
            ConceptCategory::TimePeriod => "time_period",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ConceptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "main_topic" => Ok(ConceptCategory::MainTopic),
            "concept" => Ok(ConceptCategory::Concept),
            "key_invention" => Ok(ConceptCategory::KeyInvention),
            "result" => Ok(ConceptCategory::Outcome),
            "social" => Ok(ConceptCategory::Social),
            "economic" => Ok(ConceptCategory::Economic),
            "location" => Ok(ConceptCategory::Location),
            "key_person" => Ok(ConceptCategory::KeyPerson),
            "time_period" => Ok(ConceptCategory::TimePeriod),
            other => Err(format!("unknown concept category: {other}")),
        }
    }
}

/// How severely a factual error is penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Grading mode derived from the strictness level.
///
/// This is the single classification point: both factual penalties and
/// the final weight blend key off the value returned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Strict,
    Balanced,
    Generous,
}

impl Mode {
    /// Classify a strictness level: strict above 60, generous below 40,
    /// balanced in between (inclusive).
    pub fn from_strictness(strictness: u8) -> Self {
        if strictness > 60 {
            Mode::Strict
        } else if strictness < 40 {
            Mode::Generous
        } else {
            Mode::Balanced
        }
    }

    /// Points subtracted from the running factual score for one error.
    pub fn factual_penalty(self, severity: Severity) -> f64 {
        match (self, severity) {
            (Mode::Strict, Severity::High) => 40.0,
            (Mode::Strict, _) => 25.0,
            (Mode::Generous, Severity::High) => 15.0,
            (Mode::Generous, _) => 10.0,
            (Mode::Balanced, Severity::High) => 25.0,
            (Mode::Balanced, _) => 15.0,
        }
    }

    /// Blend weights for (semantic, factual, structural).
    pub fn blend_weights(self) -> (f64, f64, f64) {
        match self {
            Mode::Strict => (0.3, 0.5, 0.2),
            Mode::Generous => (0.6, 0.2, 0.2),
            Mode::Balanced => (0.4, 0.35, 0.25),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Strict => write!(f, "strict"),
            Mode::Balanced => write!(f, "balanced"),
            Mode::Generous => write!(f, "generous"),
        }
    }
}

/// Per-sentence grading outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceStatus {
    Pending,
    Match,
    Partial,
    Error,
}

impl SentenceStatus {
    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            SentenceStatus::Match => "matched",
            SentenceStatus::Partial => "partial",
            SentenceStatus::Error => "error",
            SentenceStatus::Pending => "neutral",
        }
    }

    /// Marker glyph used in text reports.
    pub fn marker(self) -> &'static str {
        match self {
            SentenceStatus::Match => "✓",
            SentenceStatus::Partial => "◐",
            SentenceStatus::Error => "✗",
            SentenceStatus::Pending => "○",
        }
    }
}

/// An annotation attached to a sentence during analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    /// The correction or remark text.
    pub text: String,
    /// Note on what the student did grasp conceptually.
    #[serde(default)]
    pub concept_note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Error,
}

/// One tokenized sentence of an answer, with its per-sentence results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Stable sequential identifier (`sent-1`, `sent-2`, ...).
    pub id: String,
    /// Zero-based position in the answer.
    pub index: usize,
    /// Trimmed sentence text, terminators included.
    pub text: String,
    pub status: SentenceStatus,
    /// Semantic match score in [0, 100].
    pub match_score: f64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub related_concepts: Vec<Concept>,
}

impl Sentence {
    pub fn new(index: usize, text: String) -> Self {
        Self {
            id: format!("sent-{}", index + 1),
            index,
            text,
            status: SentenceStatus::Pending,
            match_score: 0.0,
            comments: Vec::new(),
            related_concepts: Vec::new(),
        }
    }
}

/// The four integer scores of an analysis, each clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: u8,
    pub semantic: u8,
    pub factual: u8,
    pub structural: u8,
}

/// A factual-error rule match recorded against a specific sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactualError {
    /// Id of the sentence the rule matched.
    pub sentence_id: String,
    pub severity: Severity,
    /// The correction shown to the student.
    pub correct_info: String,
    /// Note on the underlying concept the student did or did not grasp.
    pub concept_note: String,
}

/// Complete result of one grading run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tokenized and scored student answer.
    pub student_sentences: Vec<Sentence>,
    /// Tokenized ideal answer. Carried for display; not compared.
    pub ideal_sentences: Vec<Sentence>,
    pub scores: ScoreBreakdown,
    pub factual_errors: Vec<FactualError>,
    /// Strictness level the run was made with, 0-100.
    pub strictness: u8,
    pub mode: Mode,
    /// Free-text grading instructions. Accepted and carried through, but
    /// not consulted by scoring (incomplete upstream feature).
    #[serde(default)]
    pub special_instructions: String,
}

impl AnalysisResult {
    /// Generated free-text commentary for this result.
    pub fn commentary(&self) -> String {
        crate::commentary::generate(self)
    }
}
