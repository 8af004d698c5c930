//! The `gradekit grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradekit_core::catalog::Catalog;
use gradekit_core::engine::GradingEngine;
use gradekit_core::parser;
use gradekit_core::report::GradeReport;
use gradekit_report::html::write_html_report;
use gradekit_report::text::write_text_report;

use crate::playback;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    student_path: PathBuf,
    ideal_path: PathBuf,
    strictness: u8,
    instructions: Option<String>,
    catalog_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
    play: bool,
    no_delay: bool,
) -> Result<()> {
    anyhow::ensure!(strictness <= 100, "strictness must be between 0 and 100");

    let catalog = match &catalog_path {
        Some(path) => parser::parse_catalog(path)?,
        None => Catalog::builtin().clone(),
    };

    for warning in parser::validate_catalog(&catalog) {
        eprintln!("Catalog warning: {}", warning.message);
    }

    let student_answer = std::fs::read_to_string(&student_path)
        .with_context(|| format!("failed to read student answer: {}", student_path.display()))?;
    let ideal_answer = std::fs::read_to_string(&ideal_path)
        .with_context(|| format!("failed to read ideal answer: {}", ideal_path.display()))?;

    if play {
        playback::play(strictness, no_delay);
    }

    let engine = GradingEngine::with_catalog(catalog);
    let result = engine.analyze(
        &student_answer,
        &ideal_answer,
        strictness,
        instructions.as_deref().unwrap_or(""),
    );
    let report = GradeReport::new(engine.catalog(), result);
    tracing::info!(report = %report.id, mode = %report.result.mode, "analysis complete");

    print_summary(&report);
    print_sentences(&report);
    println!("\n{}", report.commentary);

    // Save outputs
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "text", "html"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "text" => {
                let path = output.join(format!("report-{timestamp}.txt"));
                write_text_report(&report, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let scores = &report.result.scores;
    let mut table = Table::new();
    table.set_header(vec!["Overall", "Semantic", "Factual", "Structural", "Mode"]);
    table.add_row(vec![
        Cell::new(format!("{}/100", scores.overall)),
        Cell::new(format!("{}%", scores.semantic)),
        Cell::new(format!("{}%", scores.factual)),
        Cell::new(format!("{}%", scores.structural)),
        Cell::new(report.result.mode.to_string()),
    ]);

    println!("{table}");
}

fn print_sentences(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    if report.result.student_sentences.is_empty() {
        println!("\nNo sentences found in the student answer.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Status", "Match", "Sentence"]);
    for sentence in &report.result.student_sentences {
        table.add_row(vec![
            Cell::new(&sentence.id),
            Cell::new(sentence.status.label()),
            Cell::new(format!("{:.0}%", sentence.match_score)),
            Cell::new(&sentence.text),
        ]);
    }

    println!("\n{table}");
}
