// Library surface for the binary and for headless/integration tests.
pub mod aggregator;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod import;
pub mod play;
pub mod runtime;
pub mod session;
pub mod store;
pub mod timer;
pub mod word;

pub use aggregator::{finalize, OutcomeKind, SessionResult, WordOutcome};
pub use error::{QuizError, StoreError};
pub use evaluator::{evaluate, AnswerPolicy, Evaluation};
pub use session::{QuizSession, Rejection, SessionEvent, SessionPhase, Submission};
pub use timer::{CountdownTimer, TimerSignal, TimerToken};
pub use word::{QuizDefinition, Word};
