use serde::{Deserialize, Serialize};

/// Verdict for one submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluation {
    Correct,
    Incorrect,
    /// Nothing but whitespace was submitted.
    Empty,
}

/// Comparison policy. Both sides are trimmed; the match is exact.
/// Case-sensitive unless configured otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPolicy {
    pub case_sensitive: bool,
}

impl Default for AnswerPolicy {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

impl AnswerPolicy {
    pub fn evaluate<S: AsRef<str>>(&self, submitted: &str, accepted: &[S]) -> Evaluation {
        let submitted = submitted.trim();
        if submitted.is_empty() {
            return Evaluation::Empty;
        }

        let matches = accepted.iter().any(|a| {
            let a = a.as_ref().trim();
            if self.case_sensitive {
                a == submitted
            } else {
                a.to_lowercase() == submitted.to_lowercase()
            }
        });

        if matches {
            Evaluation::Correct
        } else {
            Evaluation::Incorrect
        }
    }
}

/// Evaluate with the default (case-sensitive) policy.
pub fn evaluate<S: AsRef<str>>(submitted: &str, accepted: &[S]) -> Evaluation {
    AnswerPolicy::default().evaluate(submitted, accepted)
}
