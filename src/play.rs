//! Line-oriented quiz loop: feeds user input and scheduled ticks into a
//! [`QuizSession`] and renders its events to a writer.

use crate::aggregator::{OutcomeKind, SessionResult};
use crate::error::QuizError;
use crate::runtime::{EventSource, HostEvent, Runner, TickScheduler, Ticker};
use crate::session::{QuizSession, Rejection, SessionEvent, SessionPhase};
use crate::word::{QuizDefinition, Word};
use crossterm::style::{style, Stylize};
use std::io::{self, Write};

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// What a line of input means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Answer(String),
    Skip,
    Next,
    Pause,
    Resume,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        match line.trim() {
            ":skip" | ":s" => Command::Skip,
            ":next" | ":n" => Command::Next,
            ":pause" | ":p" => Command::Pause,
            ":resume" | ":r" => Command::Resume,
            ":quit" | ":q" => Command::Quit,
            _ => Command::Answer(line.to_string()),
        }
    }
}

pub struct Player<E: EventSource, T: Ticker, W: Write> {
    runner: Runner<E>,
    scheduler: TickScheduler<T>,
    out: W,
    styled: bool,
}

impl<E: EventSource, T: Ticker, W: Write> Player<E, T, W> {
    pub fn new(runner: Runner<E>, scheduler: TickScheduler<T>, out: W) -> Self {
        Self {
            runner,
            scheduler,
            out,
            styled: false,
        }
    }

    /// Emit ANSI colors.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run `definition` to completion. `None` when the quiz was abandoned.
    pub fn play(
        &mut self,
        session: &mut QuizSession,
        definition: &QuizDefinition,
    ) -> Result<Option<SessionResult>, PlayError> {
        let events = session.subscribe();
        session.set_quiz(definition)?;
        writeln!(
            self.out,
            "Type the translation and press enter. :skip, :pause, :resume, :quit"
        )?;

        loop {
            for event in events.try_iter() {
                self.schedule(&event);
                self.render(&event)?;
            }

            match session.phase() {
                SessionPhase::Ended => return Ok(session.result().cloned()),
                SessionPhase::Abandoned => return Ok(None),
                _ => {}
            }

            match self.runner.step() {
                HostEvent::Tick(token) => {
                    session.on_tick(token);
                }
                HostEvent::Line(line) => self.handle_line(session, &line)?,
                HostEvent::Closed => self.handle_closed(session)?,
                HostEvent::Idle => {}
            }
        }
    }

    /// Input ran out. An answered word still counts; anything unanswered
    /// abandons the quiz.
    fn handle_closed(&mut self, session: &mut QuizSession) -> Result<(), PlayError> {
        if session.is_answered() {
            session.advance()?;
        }
        if session.phase() == SessionPhase::InProgress {
            session.abandon()?;
        }
        Ok(())
    }

    fn handle_line(&mut self, session: &mut QuizSession, line: &str) -> Result<(), PlayError> {
        match Command::parse(line) {
            Command::Quit => session.abandon()?,
            Command::Skip => session.skip()?,
            Command::Pause => session.pause()?,
            Command::Resume => session.resume()?,
            Command::Next | Command::Answer(_) if session.is_answered() => session.advance()?,
            Command::Next => writeln!(self.out, "answer the word or :skip first")?,
            Command::Answer(text) => {
                session.submit_answer(&text)?;
            }
        }
        Ok(())
    }

    fn schedule(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::WordShown { token, .. } | SessionEvent::Resumed { token } => {
                self.scheduler.arm(*token)
            }
            SessionEvent::AnswerAccepted
            | SessionEvent::Paused { .. }
            | SessionEvent::Ended(_)
            | SessionEvent::Abandoned => self.scheduler.disarm(),
            _ => {}
        }
    }

    fn render(&mut self, event: &SessionEvent) -> io::Result<()> {
        match event {
            SessionEvent::WordShown {
                index,
                total,
                word,
                seconds,
                ..
            } => {
                let heading = format!("[{}/{}] {}", index + 1, total, display_word(word));
                let heading = if self.styled {
                    style(heading).bold().cyan().to_string()
                } else {
                    heading
                };
                writeln!(self.out, "{heading}  ({seconds}s)")
            }
            SessionEvent::Tick { remaining } => {
                if *remaining <= 3 || remaining % 5 == 0 {
                    writeln!(self.out, "  {remaining}s left")
                } else {
                    Ok(())
                }
            }
            SessionEvent::AnswerRejected(Rejection::Empty) => {
                writeln!(self.out, "  type an answer, or :skip")
            }
            SessionEvent::AnswerRejected(Rejection::Incorrect) => {
                let msg = self.paint("  not quite, try again", false);
                writeln!(self.out, "{msg}")
            }
            SessionEvent::AnswerAccepted => {
                let msg = self.paint("  correct! press enter for the next word", true);
                writeln!(self.out, "{msg}")
            }
            SessionEvent::OutcomeRecorded(outcome) => match outcome.kind {
                OutcomeKind::Correct => Ok(()),
                OutcomeKind::Skipped => writeln!(
                    self.out,
                    "  skipped: {} = {}",
                    outcome.word.original,
                    outcome.word.translations.join(", ")
                ),
                OutcomeKind::TimedOut => {
                    let msg = format!(
                        "  time's up: {} = {}",
                        outcome.word.original,
                        outcome.word.translations.join(", ")
                    );
                    let msg = self.paint(&msg, false);
                    writeln!(self.out, "{msg}")
                }
            },
            SessionEvent::Paused { remaining } => {
                writeln!(self.out, "  paused with {remaining}s left, :resume to continue")
            }
            SessionEvent::Resumed { .. } => writeln!(self.out, "  resumed"),
            SessionEvent::Ended(result) => write_summary(&mut self.out, result),
            SessionEvent::Abandoned => writeln!(self.out, "quiz abandoned"),
        }
    }

    fn paint(&self, text: &str, good: bool) -> String {
        match (self.styled, good) {
            (false, _) => text.to_string(),
            (true, true) => style(text).green().to_string(),
            (true, false) => style(text).red().to_string(),
        }
    }
}

pub fn display_word(word: &Word) -> String {
    match word.phonetic {
        Some(ref phonetic) => format!("{} [{}]", word.original, phonetic),
        None => word.original.clone(),
    }
}

/// Final score followed by the words that were missed.
pub fn write_summary<W: Write>(out: &mut W, result: &SessionResult) -> io::Result<()> {
    writeln!(
        out,
        "{}/{} correct ({}%), {} skipped, {} timed out",
        result.correct,
        result.total,
        result.accuracy(),
        result.skipped,
        result.timed_out
    )?;
    for missed in result.missed() {
        writeln!(
            out,
            "  {} = {}",
            missed.word.original,
            missed.word.translations.join(", ")
        )?;
    }
    Ok(())
}
