//! The `gradekit compare` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekit_core::report::GradeReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: u8,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = GradeReport::load_json(&baseline_path)?;
    let current = GradeReport::load_json(&current_path)?;

    let comparison = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", comparison.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                comparison.regressions.len(),
                comparison.improvements.len(),
                comparison.unchanged
            );

            if !comparison.regressions.is_empty() {
                println!("\nRegressions:");
                for d in &comparison.regressions {
                    println!("  {} {} -> {} ({:+})", d.dimension, d.baseline, d.current, d.delta);
                }
            }

            if !comparison.improvements.is_empty() {
                println!("\nImprovements:");
                for d in &comparison.improvements {
                    println!("  {} {} -> {} (+{})", d.dimension, d.baseline, d.current, d.delta);
                }
            }
        }
    }

    if fail_on_regression && comparison.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
