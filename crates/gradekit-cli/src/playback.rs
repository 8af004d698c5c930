//! Staged analysis-log playback.
//!
//! Pure presentation theater: a fixed table of log lines printed with
//! per-line delays before the real (sub-millisecond) analysis output.
//! Nothing here feeds into scoring, and delays are skipped entirely when
//! stdout is not a terminal.

use std::io::IsTerminal;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum StageLevel {
    Info,
    Default,
    Success,
    Warning,
}

impl StageLevel {
    fn prefix(self) -> &'static str {
        match self {
            StageLevel::Info => "[info]",
            StageLevel::Default => "      ",
            StageLevel::Success => "[ ok ]",
            StageLevel::Warning => "[warn]",
        }
    }
}

pub struct Stage {
    pub text: &'static str,
    pub delay_ms: u64,
    pub level: StageLevel,
}

/// The line that gets the strictness coefficient spliced in.
const STRICTNESS_STAGE: &str = "Applying strictness coefficient: ";

pub const STAGES: &[Stage] = &[
    Stage { text: "Initializing gradekit engine...", delay_ms: 300, level: StageLevel::Info },
    Stage { text: "Loading NLP models...", delay_ms: 400, level: StageLevel::Default },
    Stage { text: "├── BERT transformer model: OK", delay_ms: 200, level: StageLevel::Success },
    Stage { text: "├── Semantic similarity module: OK", delay_ms: 200, level: StageLevel::Success },
    Stage { text: "└── Factual verification engine: OK", delay_ms: 200, level: StageLevel::Success },
    Stage { text: "Tokenizing student response...", delay_ms: 500, level: StageLevel::Default },
    Stage { text: "Generating vector embeddings...", delay_ms: 600, level: StageLevel::Default },
    Stage { text: "Computing cosine similarity matrix...", delay_ms: 400, level: StageLevel::Default },
    Stage { text: "Cross-referencing with ideal answer...", delay_ms: 500, level: StageLevel::Default },
    Stage { text: STRICTNESS_STAGE, delay_ms: 300, level: StageLevel::Warning },
    Stage { text: "Running factual accuracy checks...", delay_ms: 400, level: StageLevel::Default },
    Stage { text: "Analyzing structural integrity...", delay_ms: 300, level: StageLevel::Default },
    Stage { text: "Generating detailed report...", delay_ms: 400, level: StageLevel::Default },
    Stage { text: "Analysis complete!", delay_ms: 200, level: StageLevel::Success },
];

/// Print the staged log, splicing the strictness level into its line.
pub fn play(strictness: u8, no_delay: bool) {
    let interactive = std::io::stdout().is_terminal();

    for stage in STAGES {
        if !no_delay && interactive {
            std::thread::sleep(Duration::from_millis(stage.delay_ms));
        }
        if stage.text == STRICTNESS_STAGE {
            println!("$ {} {}{}", stage.level.prefix(), stage.text, strictness);
        } else {
            println!("$ {} {}", stage.level.prefix(), stage.text);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_table_is_nonempty_and_ends_complete() {
        assert!(STAGES.len() >= 10);
        assert!(STAGES.last().unwrap().text.contains("complete"));
    }

    #[test]
    fn exactly_one_strictness_stage() {
        let count = STAGES.iter().filter(|s| s.text == STRICTNESS_STAGE).count();
        assert_eq!(count, 1);
    }
}
