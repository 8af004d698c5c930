//! Plain-text report generator.
//!
//! Produces the downloadable report document: header, scores, commentary,
//! and a sentence-by-sentence breakdown.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use gradekit_core::report::GradeReport;

const RULE_HEAVY: &str = "========================================";
const RULE_LIGHT: &str = "----------------------------------------";

/// Render a grade report as a plain-text document.
pub fn generate_text(report: &GradeReport) -> String {
    let scores = &report.result.scores;
    let mut out = String::new();

    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "            GRADE REPORT");
    let _ = writeln!(out, "{RULE_HEAVY}");
    out.push('\n');
    let _ = writeln!(out, "Date: {}", report.created_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "Time: {}", report.created_at.format("%H:%M:%S UTC"));
    let _ = writeln!(out, "Report: {}", report.id);
    let _ = writeln!(
        out,
        "Catalog: {} ({} concepts, {} rules)",
        report.catalog.name, report.catalog.concept_count, report.catalog.rule_count
    );
    out.push('\n');

    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "                SCORES");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "Overall: {}/100", scores.overall);
    let _ = writeln!(out, "Semantic match: {}%", scores.semantic);
    let _ = writeln!(out, "Factual accuracy: {}%", scores.factual);
    let _ = writeln!(out, "Structural quality: {}%", scores.structural);
    out.push('\n');
    let _ = writeln!(
        out,
        "Grading mode: {} (strictness {})",
        report.result.mode, report.result.strictness
    );

    if !report.result.special_instructions.is_empty() {
        let _ = writeln!(
            out,
            "Special instructions (not applied to scoring): {}",
            report.result.special_instructions
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "              COMMENTARY");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "{}", report.commentary);
    out.push('\n');

    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out, "          SENTENCE ANALYSIS");
    let _ = writeln!(out, "{RULE_LIGHT}");

    for sentence in &report.result.student_sentences {
        out.push('\n');
        let _ = writeln!(
            out,
            "[{}] {} {}",
            sentence.id.to_uppercase(),
            sentence.status.marker(),
            sentence.status.label()
        );
        let _ = writeln!(out, "\"{}\"", sentence.text);
        if let Some(comment) = sentence.comments.first() {
            let _ = writeln!(out, "   -> {}", comment.text);
        }
    }

    out.push('\n');
    let _ = writeln!(out, "{RULE_HEAVY}");

    out
}

/// Write a plain-text report to a file.
pub fn write_text_report(report: &GradeReport, path: &Path) -> Result<()> {
    let text = generate_text(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradekit_core::engine::GradingEngine;
    use gradekit_core::report::GradeReport;

    fn make_report() -> GradeReport {
        let engine = GradingEngine::new();
        let result = engine.analyze(
            "Einstein invented the steam engine. Factories spread across england.",
            "James watt developed the steam engine.",
            80,
            "",
        );
        GradeReport::new(engine.catalog(), result)
    }

    #[test]
    fn text_report_contains_scores_and_sentences() {
        let report = make_report();
        let text = generate_text(&report);

        assert!(text.contains("GRADE REPORT"));
        assert!(text.contains(&format!("Overall: {}/100", report.result.scores.overall)));
        assert!(text.contains("[SENT-1] ✗ error"));
        assert!(text.contains("-> The steam engine was developed by James Watt, not Einstein."));
        assert!(text.contains("Grading mode: strict (strictness 80)"));
    }

    #[test]
    fn text_report_embeds_commentary() {
        let report = make_report();
        let text = generate_text(&report);
        assert!(text.contains("Grading mode: STRICT"));
        assert!(text.contains("Factual accuracy ("));
    }

    #[test]
    fn write_to_file() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        write_text_report(&report, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("GRADE REPORT"));
    }
}
