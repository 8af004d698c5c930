//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gradekit_core::model::SentenceStatus;
use gradekit_core::report::GradeReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn status_class(status: SentenceStatus) -> &'static str {
    match status {
        SentenceStatus::Match => "match",
        SentenceStatus::Partial => "partial",
        SentenceStatus::Error => "error",
        SentenceStatus::Pending => "pending",
    }
}

/// Generate an HTML report from a grade report.
pub fn generate_html(report: &GradeReport) -> String {
    let scores = &report.result.scores;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradekit report — {}</title>\n",
        html_escape(&report.catalog.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>gradekit report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Catalog: <strong>{}</strong> | {} sentences | mode: {} (strictness {}) | {}</p>\n",
        html_escape(&report.catalog.name),
        report.result.student_sentences.len(),
        report.result.mode,
        report.result.strictness,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Scores</h2>\n");

    html.push_str("<table class=\"summary\">\n");
    html.push_str(
        "<thead><tr><th>Overall</th><th>Semantic</th><th>Factual</th><th>Structural</th></tr></thead>\n",
    );
    html.push_str(&format!(
        "<tbody><tr><td>{}/100</td><td>{}%</td><td>{}%</td><td>{}%</td></tr></tbody>\n",
        scores.overall, scores.semantic, scores.factual, scores.structural
    ));
    html.push_str("</table>\n");

    html.push_str(&generate_bar_chart(report));
    html.push_str("</section>\n");

    // Commentary
    html.push_str("<section class=\"commentary\">\n");
    html.push_str("<h2>Commentary</h2>\n");
    html.push_str("<pre class=\"commentary-text\">");
    html.push_str(&html_escape(&report.commentary));
    html.push_str("</pre>\n");
    html.push_str("</section>\n");

    // Per-sentence results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Sentence analysis</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str(
        "<thead><tr><th>Id</th><th>Status</th><th>Match</th><th>Sentence</th><th>Comment</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");

    for sentence in &report.result.student_sentences {
        let class = status_class(sentence.status);
        let comment = sentence
            .comments
            .first()
            .map(|c| html_escape(&c.text))
            .unwrap_or_default();
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td class=\"{}\">{}</td><td>{:.0}%</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&sentence.id),
            class,
            sentence.status.label(),
            sentence.match_score,
            html_escape(&sentence.text),
            comment
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &GradeReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(report: &GradeReport) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let scores = &report.result.scores;
    let dimensions: [(&str, u8); 4] = [
        ("overall", scores.overall),
        ("semantic", scores.semantic),
        ("factual", scores.factual),
        ("structural", scores.structural),
    ];

    let total_height = dimensions.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, score)) in dimensions.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = *score as usize * max_width / 100;

        let color = if *score >= 70 {
            "#22c55e"
        } else if *score >= 50 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            label
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --match: #dcfce7; --partial: #fef9c3; --error: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --match: #064e3b; --partial: #713f12; --error: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.match { background: var(--match); }
.partial { background: var(--partial); }
.error { background: var(--error); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
.commentary-text { white-space: pre-wrap; font-family: inherit; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
