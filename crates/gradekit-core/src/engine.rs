//! The deterministic grading engine.
//!
//! Tokenizes a student answer into sentences, scores weighted concept
//! coverage per sentence, applies ordered factual-error rules, scores the
//! structural quality of the raw text, and blends the three dimensions into
//! an overall score according to the strictness mode.
//!
//! The engine holds only its immutable catalog; every run returns a fresh
//! [`AnalysisResult`] and the caller owns it. Grading is a pure function of
//! (inputs, catalog): identical arguments produce identical results.

use crate::catalog::{Catalog, FactualRule};
use crate::model::{
    AnalysisResult, Comment, CommentKind, Concept, FactualError, Mode, ScoreBreakdown, Sentence,
    SentenceStatus,
};

/// Result of matching one sentence against the concept catalog.
#[derive(Debug, Clone)]
pub struct SemanticMatch {
    /// Coverage score in [0, 100].
    pub score: f64,
    /// Concepts whose terms occur in the sentence.
    pub found_concepts: Vec<Concept>,
}

/// Split text into terminated sentence runs: a contiguous run of
/// non-terminator characters followed by one or more `.`/`!`/`?`.
/// Unterminated trailing text is dropped; leading terminators match nothing.
fn split_terminated(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    let mut in_terminators = false;

    for ch in text.chars() {
        let is_terminator = matches!(ch, '.' | '!' | '?');
        if is_terminator {
            if current.is_empty() {
                continue;
            }
            current.push(ch);
            in_terminators = true;
        } else {
            if in_terminators {
                runs.push(std::mem::take(&mut current));
                in_terminators = false;
            }
            current.push(ch);
        }
    }
    if in_terminators && !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Tokenize text into sentences with sequential ids.
///
/// If the text contains no sentence terminator at all, the whole text is a
/// single sentence. Empty or whitespace-only input yields no sentences.
pub fn tokenize(text: &str) -> Vec<Sentence> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut runs = split_terminated(text);
    if runs.is_empty() {
        runs.push(text.to_string());
    }

    runs.into_iter()
        .enumerate()
        .map(|(index, run)| Sentence::new(index, run.trim().to_string()))
        .collect()
}

/// Structural quality score of the raw answer text, in [0, 100].
///
/// Starts from a baseline of 50 and adds bonuses for sentence count,
/// average sentence length, and vocabulary richness; empty text scores 0.
/// Bonuses only ever add, so any non-empty text scores at least 50.
pub fn structural_score(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let sentence_count = split_terminated(text).len();
    let words: Vec<&str> = text.split_whitespace().collect();
    let unique_words: std::collections::HashSet<String> =
        words.iter().map(|w| w.to_lowercase()).collect();

    let avg_words_per_sentence = if sentence_count > 0 {
        words.len() as f64 / sentence_count as f64
    } else {
        0.0
    };
    let vocabulary_richness = if words.is_empty() {
        0.0
    } else {
        unique_words.len() as f64 / words.len() as f64
    };

    let mut score: f64 = 50.0;

    // Sentence count (3-10 is ideal)
    if (3..=10).contains(&sentence_count) {
        score += 20.0;
    } else if sentence_count > 0 {
        score += 10.0;
    }

    // Average sentence length (10-20 words is ideal)
    if (10.0..=20.0).contains(&avg_words_per_sentence) {
        score += 15.0;
    } else if avg_words_per_sentence > 5.0 {
        score += 8.0;
    }

    // Vocabulary richness
    if vocabulary_richness > 0.6 {
        score += 15.0;
    } else if vocabulary_richness > 0.4 {
        score += 10.0;
    }

    score.min(100.0)
}

/// The grading engine: an immutable catalog plus pure scoring functions.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    catalog: Catalog,
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GradingEngine {
    /// Engine over the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin().clone(),
        }
    }

    /// Engine over a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Read-only access to the catalog this engine scores against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Score one sentence's concept coverage.
    ///
    /// The denominator is the weight sum of the ENTIRE catalog, not just the
    /// matched terms: the score measures coverage of the concept universe.
    /// This keeps realistic sentence scores well below 100 and is preserved
    /// deliberately; changing it would change grading outcomes.
    pub fn semantic_match(&self, sentence: &str) -> SemanticMatch {
        let lower = sentence.to_lowercase();
        let mut matched_weight = 0.0;
        let mut found_concepts = Vec::new();

        for concept in &self.catalog.concepts {
            if lower.contains(&concept.term.to_lowercase()) {
                matched_weight += concept.weight;
                found_concepts.push(concept.clone());
            }
        }

        let total_weight = self.catalog.total_weight();
        let score = if total_weight > 0.0 {
            matched_weight / total_weight * 100.0
        } else {
            0.0
        };

        SemanticMatch {
            score,
            found_concepts,
        }
    }

    /// First factual-error rule matching the sentence, in catalog order.
    pub fn check_factual_accuracy(&self, sentence: &str) -> Option<&FactualRule> {
        self.catalog.rules.iter().find(|rule| rule.matches(sentence))
    }

    /// Grade a student answer against the catalog.
    ///
    /// The ideal answer is tokenized and carried in the result for display
    /// but is not compared against the student answer. `special_instructions`
    /// is stored verbatim and never consulted by scoring.
    pub fn analyze(
        &self,
        student_answer: &str,
        ideal_answer: &str,
        strictness: u8,
        special_instructions: &str,
    ) -> AnalysisResult {
        let mode = Mode::from_strictness(strictness);
        let mut student_sentences = tokenize(student_answer);
        let ideal_sentences = tokenize(ideal_answer);

        let mut total_semantic = 0.0;
        // Starts at full marks; every error subtracts. Multiple errors
        // compound, and the floor is enforced only at the end.
        let mut factual_score = 100.0;
        let mut factual_errors = Vec::new();

        for sentence in &mut student_sentences {
            let semantic = self.semantic_match(&sentence.text);
            sentence.match_score = semantic.score;
            sentence.related_concepts = semantic.found_concepts;

            if let Some(rule) = self.check_factual_accuracy(&sentence.text) {
                tracing::debug!(
                    sentence = %sentence.id,
                    severity = %rule.severity,
                    "factual error detected"
                );
                factual_errors.push(FactualError {
                    sentence_id: sentence.id.clone(),
                    severity: rule.severity,
                    correct_info: rule.correct_info.clone(),
                    concept_note: rule.concept_note.clone(),
                });
                factual_score -= mode.factual_penalty(rule.severity);
                sentence.status = if mode == Mode::Strict {
                    SentenceStatus::Error
                } else {
                    SentenceStatus::Partial
                };
                sentence.comments.push(Comment {
                    kind: CommentKind::Error,
                    text: rule.correct_info.clone(),
                    concept_note: rule.concept_note.clone(),
                });
            } else if sentence.match_score > 50.0 {
                sentence.status = SentenceStatus::Match;
            } else if sentence.match_score > 20.0 {
                sentence.status = SentenceStatus::Partial;
            } else {
                sentence.status = SentenceStatus::Pending;
            }

            total_semantic += sentence.match_score;
        }

        let avg_semantic = if student_sentences.is_empty() {
            0.0
        } else {
            total_semantic / student_sentences.len() as f64
        };

        let structural = structural_score(student_answer);

        let (semantic_w, factual_w, structural_w) = mode.blend_weights();
        let overall =
            avg_semantic * semantic_w + factual_score * factual_w + structural * structural_w;

        let scores = ScoreBreakdown {
            overall: overall.clamp(0.0, 100.0).round() as u8,
            semantic: avg_semantic.round() as u8,
            factual: factual_score.max(0.0).round() as u8,
            structural: structural.round() as u8,
        };

        tracing::debug!(
            overall = scores.overall,
            semantic = scores.semantic,
            factual = scores.factual,
            structural = scores.structural,
            %mode,
            "analysis complete"
        );

        AnalysisResult {
            student_sentences,
            ideal_sentences,
            scores,
            factual_errors,
            strictness,
            mode,
            special_instructions: special_instructions.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    #[test]
    fn tokenize_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\n\t").is_empty());
    }

    #[test]
    fn tokenize_three_sentences() {
        let sentences = tokenize("A. B! C?");
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "A.");
        assert_eq!(sentences[1].text, "B!");
        assert_eq!(sentences[2].text, "C?");
        assert_eq!(sentences[0].id, "sent-1");
        assert_eq!(sentences[1].id, "sent-2");
        assert_eq!(sentences[2].id, "sent-3");
    }

    #[test]
    fn tokenize_drops_unterminated_tail() {
        let sentences = tokenize("First sentence. trailing fragment");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "First sentence.");
    }

    #[test]
    fn tokenize_no_terminator_is_single_sentence() {
        let sentences = tokenize("no terminator here");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].text, "no terminator here");
    }

    #[test]
    fn tokenize_groups_terminator_runs() {
        let sentences = tokenize("Really?! Yes...");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Really?!");
        assert_eq!(sentences[1].text, "Yes...");
    }

    #[test]
    fn semantic_score_is_monotonic_in_matched_concepts() {
        let engine = GradingEngine::new();
        let one = engine.semantic_match("The steam engine changed things.");
        let two = engine.semantic_match("The steam engine of James Watt changed things.");
        let three =
            engine.semantic_match("The steam engine of James Watt changed England's economy.");
        assert!(one.score < two.score);
        assert!(two.score < three.score);
    }

    #[test]
    fn semantic_denominator_is_whole_catalog() {
        let engine = GradingEngine::new();
        let result = engine.semantic_match("The steam engine.");
        let total = engine.catalog().total_weight();
        // Only "steam engine" (0.95) matches, but the divisor is the full
        // catalog weight.
        assert_eq!(result.found_concepts.len(), 1);
        assert!((result.score - 0.95 / total * 100.0).abs() < 1e-9);
    }

    #[test]
    fn semantic_match_is_case_insensitive() {
        let engine = GradingEngine::new();
        let result = engine.semantic_match("JAMES WATT and the STEAM ENGINE");
        assert_eq!(result.found_concepts.len(), 2);
    }

    #[test]
    fn factual_rules_are_order_dependent() {
        let engine = GradingEngine::new();
        // Matches both the inventor rule and the date rule; only the
        // first-listed rule is reported.
        let rule = engine
            .check_factual_accuracy("Einstein invented the steam engine in 1905.")
            .unwrap();
        assert_eq!(rule.severity, Severity::High);
        assert!(rule.correct_info.contains("James Watt"));
    }

    #[test]
    fn strict_mode_penalizes_high_severity_hard() {
        let engine = GradingEngine::new();
        let result = engine.analyze("Einstein invented the steam engine.", "", 80, "");
        assert_eq!(result.mode, Mode::Strict);
        assert_eq!(result.student_sentences[0].status, SentenceStatus::Error);
        assert_eq!(result.scores.factual, 60);
        assert_eq!(result.factual_errors.len(), 1);
    }

    #[test]
    fn generous_mode_penalizes_lightly() {
        let engine = GradingEngine::new();
        let result = engine.analyze("Einstein invented the steam engine.", "", 20, "");
        assert_eq!(result.mode, Mode::Generous);
        assert_eq!(result.student_sentences[0].status, SentenceStatus::Partial);
        assert_eq!(result.scores.factual, 85);
    }

    #[test]
    fn balanced_mode_penalty() {
        let engine = GradingEngine::new();
        let result = engine.analyze("Einstein invented the steam engine.", "", 50, "");
        assert_eq!(result.mode, Mode::Balanced);
        assert_eq!(result.scores.factual, 75);
    }

    #[test]
    fn factual_penalties_compound_across_sentences() {
        let engine = GradingEngine::new();
        let answer = "Einstein invented the steam engine. \
                      Einstein also built a steam engine later.";
        let result = engine.analyze(answer, "", 80, "");
        assert_eq!(result.factual_errors.len(), 2);
        assert_eq!(result.scores.factual, 20);
    }

    #[test]
    fn factual_score_floors_at_zero() {
        let engine = GradingEngine::new();
        let answer = "Einstein made the steam engine. \
                      Einstein improved the steam engine. \
                      Einstein sold the steam engine.";
        let result = engine.analyze(answer, "", 80, "");
        assert_eq!(result.scores.factual, 0);
    }

    #[test]
    fn statuses_follow_semantic_thresholds() {
        let engine = GradingEngine::new();
        // >50 needs more than half the total weight (11.4) in one sentence.
        let heavy = "The industrial revolution brought technological change, the steam engine, \
                     factory production, the working class, urbanization and the economy of england.";
        let result = engine.analyze(heavy, "", 50, "");
        assert_eq!(result.student_sentences[0].status, SentenceStatus::Match);

        let light = engine.analyze("The steam engine and james watt mattered.", "", 50, "");
        assert_eq!(light.student_sentences[0].status, SentenceStatus::Pending);

        let mid = engine.analyze(
            "The industrial revolution, the steam engine and james watt.",
            "",
            50,
            "",
        );
        assert_eq!(mid.student_sentences[0].status, SentenceStatus::Partial);
    }

    #[test]
    fn empty_answer_degrades_to_zero() {
        let engine = GradingEngine::new();
        let result = engine.analyze("", "", 50, "");
        assert!(result.student_sentences.is_empty());
        assert_eq!(result.scores.semantic, 0);
        assert_eq!(result.scores.structural, 0);
        assert_eq!(result.scores.factual, 100);
        // 0.4*0 + 0.35*100 + 0.25*0 = 35
        assert_eq!(result.scores.overall, 35);
    }

    #[test]
    fn overall_is_always_in_range() {
        let engine = GradingEngine::new();
        for strictness in [0u8, 20, 40, 50, 60, 80, 100] {
            for answer in [
                "",
                "word",
                "Einstein invented the steam engine in 1905. Einstein again.",
                "The industrial revolution transformed england. James watt built the steam engine.",
            ] {
                let result = engine.analyze(answer, "", strictness, "");
                assert!(result.scores.overall <= 100);
                assert!(result.scores.semantic <= 100);
                assert!(result.scores.factual <= 100);
                assert!(result.scores.structural <= 100);
            }
        }
    }

    #[test]
    fn analyze_is_idempotent() {
        let engine = GradingEngine::new();
        let answer = "Einstein invented the steam engine in 1905. Factories spread across england.";
        let ideal = "James watt developed the steam engine in the 18th century.";
        let a = engine.analyze(answer, ideal, 72, "check the inventor");
        let b = engine.analyze(answer, ideal, 72, "check the inventor");
        assert_eq!(a, b);
    }

    #[test]
    fn ideal_answer_is_tokenized_but_not_scored() {
        let engine = GradingEngine::new();
        let result = engine.analyze("Short answer.", "One. Two. Three.", 50, "");
        assert_eq!(result.ideal_sentences.len(), 3);
        assert!(result
            .ideal_sentences
            .iter()
            .all(|s| s.status == SentenceStatus::Pending && s.match_score == 0.0));
    }

    #[test]
    fn special_instructions_do_not_affect_scores() {
        let engine = GradingEngine::new();
        let plain = engine.analyze("The steam engine.", "", 50, "");
        let instructed = engine.analyze("The steam engine.", "", 50, "grade very leniently");
        assert_eq!(plain.scores, instructed.scores);
        assert_eq!(instructed.special_instructions, "grade very leniently");
    }

    #[test]
    fn structural_score_rich_text_lands_high() {
        let text = "The industrial revolution began in england during the eighteenth century. \
                    Steam power allowed factories to replace manual production almost everywhere. \
                    Workers migrated from villages into rapidly growing industrial cities. \
                    New social classes emerged as labor moved into organized factory work. \
                    The economy expanded quickly while living conditions changed unevenly.";
        let score = structural_score(text);
        assert!((85.0..=100.0).contains(&score), "got {score}");
    }

    #[test]
    fn structural_score_monotone_text_lands_low() {
        let score = structural_score("word word word word.");
        assert!((50.0..=60.0).contains(&score), "got {score}");
    }

    #[test]
    fn structural_score_empty_is_zero() {
        assert_eq!(structural_score(""), 0.0);
    }

    #[test]
    fn structural_score_unterminated_text_gets_no_sentence_bonus() {
        // No terminator at all: zero sentences, so no sentence-count bonus
        // and no length bonus (average is defined as 0).
        let score = structural_score("several distinct interesting unique words here");
        assert_eq!(score, 65.0);
    }
}
