use crate::aggregator::{finalize, OutcomeKind, SessionResult, WordOutcome};
use crate::error::QuizError;
use crate::evaluator::{AnswerPolicy, Evaluation};
use crate::timer::{CountdownTimer, TimerSignal, TimerToken};
use crate::word::{QuizDefinition, Word};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum SessionPhase {
    #[strum(serialize = "not started")]
    NotStarted,
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "ended")]
    Ended,
    #[strum(serialize = "abandoned")]
    Abandoned,
}

/// Why an answer was not accepted. The session is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Rejection),
}

/// Everything a presentation layer needs to follow a session.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    WordShown {
        index: usize,
        total: usize,
        word: Word,
        seconds: u32,
        token: TimerToken,
    },
    Tick {
        remaining: u32,
    },
    AnswerRejected(Rejection),
    AnswerAccepted,
    OutcomeRecorded(WordOutcome),
    Paused {
        remaining: u32,
    },
    Resumed {
        token: TimerToken,
    },
    Ended(SessionResult),
    Abandoned,
}

/// One run of a quiz, from `set_quiz` until it ends or is abandoned.
///
/// All transitions take `&mut self`; the owner serializes access. Ticks from
/// a host scheduler go through [`QuizSession::on_tick`], which drops anything
/// not stamped with the live timer token.
pub struct QuizSession {
    phase: SessionPhase,
    policy: AnswerPolicy,
    rng: Box<dyn RngCore + Send>,
    seconds_per_word: u32,
    order: Vec<Word>,
    index: Option<usize>,
    answered: bool,
    timer: CountdownTimer,
    outcomes: Vec<WordOutcome>,
    result: Option<SessionResult>,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("index", &self.index)
            .field("answered", &self.answered)
            .field("words", &self.order.len())
            .field("outcomes", &self.outcomes.len())
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Use a caller-supplied random source for the shuffle.
    pub fn with_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            policy: AnswerPolicy::default(),
            rng: Box::new(rng),
            seconds_per_word: 0,
            order: Vec::new(),
            index: None,
            answered: false,
            timer: CountdownTimer::new(),
            outcomes: Vec::new(),
            result: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: AnswerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn set_quiz(&mut self, definition: &QuizDefinition) -> Result<(), QuizError> {
        self.require(SessionPhase::NotStarted, "set a quiz")?;

        if definition.words.is_empty() {
            return Err(QuizError::InvalidArgument(
                "quiz has no words".to_string(),
            ));
        }
        if definition.seconds_per_word == 0 {
            return Err(QuizError::InvalidArgument(
                "seconds per word must be positive".to_string(),
            ));
        }
        if let Some(word) = definition.words.iter().find(|w| !w.is_answerable()) {
            return Err(QuizError::InvalidArgument(format!(
                "word '{}' has no translations",
                word.original
            )));
        }

        let mut order = definition.words.clone();
        order.shuffle(&mut *self.rng);

        self.order = order;
        self.seconds_per_word = definition.seconds_per_word;
        self.index = None;
        self.answered = false;
        self.outcomes.clear();
        self.result = None;
        self.phase = SessionPhase::InProgress;

        tracing::debug!(
            words = self.order.len(),
            seconds_per_word = self.seconds_per_word,
            "quiz session started"
        );

        self.step_forward();
        Ok(())
    }

    /// Move on after a correct answer.
    ///
    /// Correct answers deliberately do not advance on their own; skip and
    /// timeout do. Calling this before the current word has been answered
    /// is an `InvalidState`.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        self.require(SessionPhase::InProgress, "advance")?;
        if !self.answered {
            return Err(QuizError::InvalidState {
                action: "advance past an unanswered word",
                state: self.phase,
            });
        }
        self.step_forward();
        Ok(())
    }

    pub fn submit_answer(&mut self, text: &str) -> Result<Submission, QuizError> {
        self.require(SessionPhase::InProgress, "submit an answer")?;
        if self.answered {
            return Err(QuizError::InvalidState {
                action: "answer a word twice",
                state: self.phase,
            });
        }

        let Some(word) = self.current_word() else {
            return Err(QuizError::InvalidState {
                action: "submit an answer",
                state: self.phase,
            });
        };

        match self.policy.evaluate(text, &word.translations) {
            Evaluation::Empty => {
                self.emit(SessionEvent::AnswerRejected(Rejection::Empty));
                Ok(Submission::Rejected(Rejection::Empty))
            }
            Evaluation::Incorrect => {
                self.emit(SessionEvent::AnswerRejected(Rejection::Incorrect));
                Ok(Submission::Rejected(Rejection::Incorrect))
            }
            Evaluation::Correct => {
                self.timer.cancel();
                self.answered = true;
                self.emit(SessionEvent::AnswerAccepted);
                self.record(OutcomeKind::Correct, text.trim());
                Ok(Submission::Accepted)
            }
        }
    }

    /// Give up on the current word. A word already answered correctly keeps
    /// its `Correct` outcome.
    pub fn skip(&mut self) -> Result<(), QuizError> {
        self.require(SessionPhase::InProgress, "skip")?;
        self.timer.cancel();
        if !self.answered {
            self.record(OutcomeKind::Skipped, "");
        }
        self.step_forward();
        Ok(())
    }

    /// Feed one host clock tick. Returns whether the tick was applied;
    /// stale ticks are dropped.
    pub fn on_tick(&mut self, token: TimerToken) -> bool {
        if self.phase != SessionPhase::InProgress {
            tracing::trace!(token = %token, phase = %self.phase, "tick outside a running quiz");
            return false;
        }

        match self.timer.on_tick(token) {
            Some(TimerSignal::Tick { remaining }) => {
                self.emit(SessionEvent::Tick { remaining });
                true
            }
            Some(TimerSignal::Expired) => {
                self.expire();
                true
            }
            None => false,
        }
    }

    /// Terminal signal from a host timer that fires a single expiry instead
    /// of per-second ticks. Stale tokens are dropped.
    pub fn on_timer_expired(&mut self, token: TimerToken) -> bool {
        if self.phase != SessionPhase::InProgress || !self.timer.accepts(token) {
            tracing::trace!(token = %token, phase = %self.phase, "discarding stale expiry");
            return false;
        }
        self.timer.cancel();
        self.expire();
        true
    }

    pub fn pause(&mut self) -> Result<(), QuizError> {
        self.require(SessionPhase::InProgress, "pause")?;
        if self.timer.pause() {
            self.emit(SessionEvent::Paused {
                remaining: self.timer.remaining(),
            });
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), QuizError> {
        self.require(SessionPhase::InProgress, "resume")?;
        if let Some(token) = self.timer.resume() {
            self.emit(SessionEvent::Resumed { token });
        }
        Ok(())
    }

    /// Tear the session down without producing a result.
    pub fn abandon(&mut self) -> Result<(), QuizError> {
        match self.phase {
            SessionPhase::NotStarted | SessionPhase::InProgress => {
                self.timer.cancel();
                self.phase = SessionPhase::Abandoned;
                tracing::debug!(recorded = self.outcomes.len(), "quiz session abandoned");
                self.emit(SessionEvent::Abandoned);
                Ok(())
            }
            state => Err(QuizError::InvalidState {
                action: "abandon",
                state,
            }),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Position in the shuffled order; `None` before the first word.
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.index.and_then(|i| self.order.get(i))
    }

    pub fn word_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn outcomes(&self) -> &[WordOutcome] {
        &self.outcomes
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    /// Token the host scheduler should stamp ticks with, while the timer runs.
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.token()
    }

    fn require(&self, expected: SessionPhase, action: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                action,
                state: self.phase,
            })
        }
    }

    fn expire(&mut self) {
        tracing::debug!(index = ?self.index, "word timed out");
        self.record(OutcomeKind::TimedOut, "");
        self.step_forward();
    }

    fn record(&mut self, kind: OutcomeKind, submitted: &str) {
        let Some(word) = self.current_word().cloned() else {
            return;
        };
        let outcome = WordOutcome {
            word,
            kind,
            submitted: submitted.to_string(),
        };
        self.outcomes.push(outcome.clone());
        self.emit(SessionEvent::OutcomeRecorded(outcome));
    }

    fn step_forward(&mut self) {
        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        self.answered = false;

        if next >= self.order.len() {
            self.timer.cancel();
            self.phase = SessionPhase::Ended;
            let result = finalize(&self.outcomes);
            tracing::info!(
                total = result.total,
                correct = result.correct,
                skipped = result.skipped,
                timed_out = result.timed_out,
                "quiz session ended"
            );
            self.result = Some(result.clone());
            self.emit(SessionEvent::Ended(result));
            return;
        }

        let token = self.timer.start(self.seconds_per_word);
        let word = self.order[next].clone();
        self.emit(SessionEvent::WordShown {
            index: next,
            total: self.order.len(),
            word,
            seconds: self.seconds_per_word,
            token,
        });
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
