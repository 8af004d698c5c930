//! Grade report types with JSON persistence and baseline comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::model::AnalysisResult;

/// A complete grade report: one analysis plus its commentary and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the catalog the run was graded against.
    pub catalog: CatalogSummary,
    /// The analysis result.
    pub result: AnalysisResult,
    /// Generated commentary text.
    pub commentary: String,
}

/// Summary of a catalog (without the full concept and rule tables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub concept_count: usize,
    pub rule_count: usize,
}

impl GradeReport {
    /// Build a report from a finished analysis.
    pub fn new(catalog: &Catalog, result: AnalysisResult) -> Self {
        let commentary = result.commentary();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog: CatalogSummary {
                id: catalog.id.clone(),
                name: catalog.name.clone(),
                concept_count: catalog.concepts.len(),
                rule_count: catalog.rules.len(),
            },
            result,
            commentary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline, dimension by dimension.
    ///
    /// Useful after editing a catalog: re-grade the same answer and see
    /// which score dimensions moved by more than `threshold` points.
    pub fn compare(&self, baseline: &GradeReport, threshold: u8) -> ScoreComparison {
        let pairs = [
            ("overall", baseline.result.scores.overall, self.result.scores.overall),
            ("semantic", baseline.result.scores.semantic, self.result.scores.semantic),
            ("factual", baseline.result.scores.factual, self.result.scores.factual),
            ("structural", baseline.result.scores.structural, self.result.scores.structural),
        ];

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;

        for (dimension, baseline_score, current_score) in pairs {
            let delta = current_score as i32 - baseline_score as i32;
            let entry = ScoreDelta {
                dimension: dimension.to_string(),
                baseline: baseline_score,
                current: current_score,
                delta,
            };
            if delta < -(threshold as i32) {
                regressions.push(entry);
            } else if delta > threshold as i32 {
                improvements.push(entry);
            } else {
                unchanged += 1;
            }
        }

        ScoreComparison {
            regressions,
            improvements,
            unchanged,
        }
    }
}

/// Result of comparing two grade reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreComparison {
    /// Dimensions where the score went down beyond the threshold.
    pub regressions: Vec<ScoreDelta>,
    /// Dimensions where the score went up beyond the threshold.
    pub improvements: Vec<ScoreDelta>,
    /// Dimensions with no significant change.
    pub unchanged: usize,
}

/// A per-dimension score change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub dimension: String,
    pub baseline: u8,
    pub current: u8,
    pub delta: i32,
}

impl ScoreComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            md.push_str("| Dimension | Baseline | Current | Delta |\n");
            md.push_str("|-----------|----------|---------|-------|\n");
            for d in &self.regressions {
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    d.dimension, d.baseline, d.current, d.delta
                ));
            }
            md.push('\n');
        }

        if !self.improvements.is_empty() {
            md.push_str("### Improvements\n\n");
            md.push_str("| Dimension | Baseline | Current | Delta |\n");
            md.push_str("|-----------|----------|---------|-------|\n");
            for d in &self.improvements {
                md.push_str(&format!(
                    "| {} | {} | {} | +{} |\n",
                    d.dimension, d.baseline, d.current, d.delta
                ));
            }
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GradingEngine;

    fn make_report(answer: &str, strictness: u8) -> GradeReport {
        let engine = GradingEngine::new();
        let result = engine.analyze(answer, "", strictness, "");
        GradeReport::new(engine.catalog(), result)
    }

    #[test]
    fn report_carries_catalog_summary_and_commentary() {
        let report = make_report("James watt built the steam engine.", 50);
        assert_eq!(report.catalog.id, "industrial-revolution");
        assert_eq!(report.catalog.concept_count, 14);
        assert_eq!(report.catalog.rule_count, 2);
        assert!(report.commentary.contains("Grading mode: BALANCED"));
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report("Einstein invented the steam engine.", 80);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradeReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.result, report.result);
        assert_eq!(loaded.commentary, report.commentary);
    }

    #[test]
    fn compare_identical_reports() {
        let report = make_report("The steam engine.", 50);
        let comparison = report.compare(&report, 5);
        assert!(comparison.regressions.is_empty());
        assert!(comparison.improvements.is_empty());
        assert_eq!(comparison.unchanged, 4);
    }

    #[test]
    fn compare_detects_regression() {
        // Same answer, but graded strictly against a factual error:
        // factual drops from 85 (generous) to 60 (strict).
        let baseline = make_report("Einstein invented the steam engine.", 20);
        let current = make_report("Einstein invented the steam engine.", 80);

        let comparison = current.compare(&baseline, 5);
        assert!(comparison.has_regressions());
        assert!(comparison
            .regressions
            .iter()
            .any(|d| d.dimension == "factual" && d.delta == -25));
    }

    #[test]
    fn markdown_output() {
        let baseline = make_report("Einstein invented the steam engine.", 20);
        let current = make_report("Einstein invented the steam engine.", 80);

        let md = current.compare(&baseline, 5).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("factual"));
    }
}
