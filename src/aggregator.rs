use crate::word::Word;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// How a single word ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    Correct,
    Skipped,
    TimedOut,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub word: Word,
    pub kind: OutcomeKind,
    pub submitted: String,
}

/// Summary of a finished quiz, ready to hand to a history store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub total: usize,
    pub correct: usize,
    pub skipped: usize,
    pub timed_out: usize,
    pub outcomes: Vec<WordOutcome>,
}

impl SessionResult {
    /// Correct answers over total words, 0.0 for an empty log.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }

    /// Ratio as a rounded percentage.
    pub fn accuracy(&self) -> f64 {
        (self.ratio() * 100.0).round()
    }

    /// Words that were not answered correctly, in the order they came up.
    pub fn missed(&self) -> impl Iterator<Item = &WordOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.kind != OutcomeKind::Correct)
    }
}

/// Fold an outcome log into a [`SessionResult`], preserving its order.
pub fn finalize(outcomes: &[WordOutcome]) -> SessionResult {
    let counts = outcomes.iter().counts_by(|o| o.kind);
    let count = |kind: OutcomeKind| counts.get(&kind).copied().unwrap_or(0);

    SessionResult {
        total: outcomes.len(),
        correct: count(OutcomeKind::Correct),
        skipped: count(OutcomeKind::Skipped),
        timed_out: count(OutcomeKind::TimedOut),
        outcomes: outcomes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(original: &str, kind: OutcomeKind) -> WordOutcome {
        WordOutcome {
            word: Word::new(original, vec![format!("{original}-t")]),
            kind,
            submitted: String::new(),
        }
    }

    #[test]
    fn test_finalize_counts_by_kind() {
        let log = vec![
            outcome("a", OutcomeKind::Correct),
            outcome("b", OutcomeKind::Skipped),
            outcome("c", OutcomeKind::TimedOut),
            outcome("d", OutcomeKind::Correct),
        ];

        let result = finalize(&log);
        assert_eq!(result.total, 4);
        assert_eq!(result.correct, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.timed_out, 1);
        assert_eq!(result.ratio(), 0.5);
        assert_eq!(result.accuracy(), 50.0);
    }

    #[test]
    fn test_finalize_preserves_order() {
        let log = vec![
            outcome("z", OutcomeKind::Skipped),
            outcome("a", OutcomeKind::Correct),
        ];
        let result = finalize(&log);
        let order: Vec<_> = result.outcomes.iter().map(|o| o.word.original.as_str()).collect();
        assert_eq!(order, vec!["z", "a"]);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let log = vec![outcome("a", OutcomeKind::TimedOut)];
        assert_eq!(finalize(&log), finalize(&log));
    }

    #[test]
    fn test_empty_log() {
        let result = finalize(&[]);
        assert_eq!(result.total, 0);
        assert_eq!(result.ratio(), 0.0);
    }

    #[test]
    fn test_missed_words() {
        let log = vec![
            outcome("a", OutcomeKind::Correct),
            outcome("b", OutcomeKind::TimedOut),
        ];
        let result = finalize(&log);
        let missed: Vec<_> = result.missed().map(|o| o.word.original.clone()).collect();
        assert_eq!(missed, vec!["b"]);
    }

    #[test]
    fn test_outcome_kind_display() {
        assert_eq!(OutcomeKind::TimedOut.to_string(), "timed_out");
        assert_eq!(OutcomeKind::Correct.to_string(), "correct");
    }
}
