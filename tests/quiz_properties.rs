use assert_matches::assert_matches;
use lexiquiz::{
    OutcomeKind, QuizDefinition, QuizError, QuizSession, SessionPhase, Submission, Word,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn vocabulary(n: usize) -> Vec<Word> {
    (0..n)
        .map(|i| Word::new(format!("word{i}"), vec![format!("palabra{i}")]))
        .collect()
}

fn session(seed: u64) -> QuizSession {
    QuizSession::with_rng(StdRng::seed_from_u64(seed))
}

#[test]
fn skipping_every_word_ends_with_all_skipped() {
    for n in 1..=6 {
        let mut s = session(n as u64);
        s.set_quiz(&QuizDefinition::new(5, vocabulary(n))).unwrap();

        for _ in 0..n {
            s.skip().unwrap();
        }

        assert_eq!(s.phase(), SessionPhase::Ended);
        let result = s.result().unwrap();
        assert_eq!(result.total, n);
        assert_eq!(result.skipped, n);
        assert!(result
            .outcomes
            .iter()
            .all(|o| o.kind == OutcomeKind::Skipped));
    }
}

#[test]
fn outcome_log_is_a_permutation_of_the_input() {
    let words = vocabulary(8);
    let mut expected: Vec<_> = words.iter().map(|w| w.original.clone()).collect();
    expected.sort();

    for seed in 0..20 {
        let mut s = session(seed);
        s.set_quiz(&QuizDefinition::new(5, words.clone())).unwrap();
        while s.phase() == SessionPhase::InProgress {
            s.skip().unwrap();
        }

        let mut seen: Vec<_> = s
            .result()
            .unwrap()
            .outcomes
            .iter()
            .map(|o| o.word.original.clone())
            .collect();
        seen.sort();
        assert_eq!(seen, expected, "seed {seed}");
    }
}

#[test]
fn shuffle_is_deterministic_for_a_seed() {
    let order = |seed| {
        let mut s = session(seed);
        s.set_quiz(&QuizDefinition::new(5, vocabulary(10))).unwrap();
        let mut order = Vec::new();
        while let Some(word) = s.current_word() {
            order.push(word.original.clone());
            s.skip().unwrap();
        }
        order
    };

    assert_eq!(order(42), order(42));
}

#[test]
fn empty_submission_never_moves_the_index() {
    let mut s = session(1);
    s.set_quiz(&QuizDefinition::new(5, vocabulary(3))).unwrap();

    for text in ["", " ", "\t\n"] {
        assert_eq!(
            s.submit_answer(text).unwrap(),
            Submission::Rejected(lexiquiz::Rejection::Empty)
        );
        assert_eq!(s.current_index(), Some(0));
    }
}

#[test]
fn cat_dog_scenario() {
    let def = QuizDefinition::new(
        5,
        vec![
            Word::new("cat", vec!["gato".into()]),
            Word::new("dog", vec!["perro".into()]),
        ],
    );

    // Find a seed that shows "cat" first so the scenario reads as written.
    let mut s = (0..64)
        .map(session)
        .find_map(|mut s| {
            s.set_quiz(&def).unwrap();
            (s.current_word().unwrap().original == "cat").then_some(s)
        })
        .expect("some seed shows cat first");

    assert_eq!(s.submit_answer("gato").unwrap(), Submission::Accepted);
    assert!(s.timer_token().is_none());
    assert_eq!(s.current_index(), Some(0));

    s.skip().unwrap();
    assert_eq!(s.current_word().unwrap().original, "dog");

    s.skip().unwrap();
    let result = s.result().unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.correct, 1);
    assert_eq!(result.skipped, 1);
}

#[test]
fn single_word_times_out_after_one_second() {
    let mut s = session(9);
    s.set_quiz(&QuizDefinition::new(1, vec![Word::new("cat", vec!["gato".into()])]))
        .unwrap();

    let token = s.timer_token().unwrap();
    assert!(s.on_tick(token));

    assert_eq!(s.phase(), SessionPhase::Ended);
    let result = s.result().unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.correct, 0);
    assert_eq!(result.outcomes[0].kind, OutcomeKind::TimedOut);
}

#[test]
fn skip_after_end_is_invalid_and_keeps_result() {
    let mut s = session(2);
    s.set_quiz(&QuizDefinition::new(5, vocabulary(1))).unwrap();
    s.skip().unwrap();
    let stored = s.result().cloned();

    assert_matches!(s.skip(), Err(QuizError::InvalidState { state: SessionPhase::Ended, .. }));
    assert_eq!(s.result().cloned(), stored);
}
