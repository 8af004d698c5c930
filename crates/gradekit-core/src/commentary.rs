//! Free-text commentary generation.
//!
//! A pure function of a finished [`AnalysisResult`]: band thresholds select
//! fixed sentences per scoring dimension, the recorded factual errors are
//! listed with their corrections, and a paragraph explains the grading mode.
//! The "no analysis yet" case belongs to the caller — whoever holds no
//! result renders no commentary.

use std::fmt::Write;

use crate::model::{AnalysisResult, Mode};

/// Generate the commentary text for an analysis result.
pub fn generate(result: &AnalysisResult) -> String {
    let scores = &result.scores;
    let mut out = String::new();

    // Overall verdict
    if scores.overall >= 80 {
        out.push_str("✓ A successful answer overall. ");
    } else if scores.overall >= 60 {
        out.push_str("◐ Above-average performance, though some gaps remain. ");
    } else if scores.overall >= 40 {
        out.push_str("⚠ The core concepts are understood, but there are significant errors. ");
    } else {
        out.push_str("✗ The answer is insufficient; the topic needs to be restudied. ");
    }
    out.push_str("\n\n");

    // Semantic coverage
    let _ = write!(out, "Semantic match ({}%): ", scores.semantic);
    if scores.semantic >= 70 {
        out.push_str(
            "The student expresses the main concepts accurately and uses terminology consistently.\n\n",
        );
    } else if scores.semantic >= 40 {
        out.push_str("Some key concepts are present, but a deeper understanding is needed.\n\n");
    } else {
        out.push_str("Conceptual gaps are pronounced. Core terminology is missing.\n\n");
    }

    // Factual accuracy
    let _ = write!(out, "Factual accuracy ({}%): ", scores.factual);
    if result.factual_errors.is_empty() {
        out.push_str("All factual statements are correct.\n\n");
    } else {
        let _ = writeln!(out, "{} factual error(s) detected.", result.factual_errors.len());
        for (i, error) in result.factual_errors.iter().enumerate() {
            let _ = writeln!(out, "   {}. {}", i + 1, error.correct_info);
            if result.mode == Mode::Generous {
                let _ = writeln!(out, "      Note: {}", error.concept_note);
            }
        }
        out.push('\n');
    }

    // Mode explanation
    match result.mode {
        Mode::Generous => {
            out.push_str("Grading mode: GENEROUS\n");
            out.push_str(
                "Conceptual understanding takes priority in this mode. Minor factual slips \
                 are penalized lightly on the assumption that the student has grasped the \
                 overall concept. Meaning is weighted ahead of detail even where details \
                 are wrong.\n\n",
            );
        }
        Mode::Strict => {
            out.push_str("Grading mode: STRICT\n");
            out.push_str(
                "Factual accuracy is critical in this mode. Errors in dates, names, and \
                 technical details are penalized heavily. An academic standard of \
                 correctness is applied.\n\n",
            );
        }
        Mode::Balanced => {
            out.push_str("Grading mode: BALANCED\n");
            out.push_str(
                "Conceptual understanding and factual accuracy are weighted equally.\n\n",
            );
        }
    }

    // Structural quality
    let _ = write!(out, "Structural quality ({}%): ", scores.structural);
    if scores.structural >= 80 {
        out.push_str("The text is well organized with sound sentence structure and a fluent flow.");
    } else if scores.structural >= 60 {
        out.push_str("Organization is acceptable, with some issues in flow.");
    } else {
        out.push_str("The text is poorly organized and needs a more orderly presentation.");
    }

    out
}
