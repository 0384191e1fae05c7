use crate::aggregator::{SessionResult, WordOutcome};
use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use crate::word::{QuizDefinition, Word};
use chrono::{DateTime, Local, Utc};
use itertools::Itertools;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Supplies the words of a dictionary before a quiz starts.
pub trait WordSource {
    fn load_words(&self, dictionary_id: i64) -> Result<Vec<Word>>;
}

/// Accepts finished quiz results.
pub trait HistoryStore {
    /// Returns the id of the stored history entry.
    fn save_result(&self, quiz_id: i64, result: &SessionResult) -> Result<i64>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dictionary {
    pub id: i64,
    pub name: String,
    pub source_language: String,
    pub target_language: String,
}

/// A saved quiz: which dictionary, how long per word, optional tag filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRecord {
    pub id: i64,
    pub name: String,
    pub dictionary_id: i64,
    pub seconds_per_word: u32,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub quiz_id: i64,
    pub taken_at: DateTime<Local>,
    pub total: usize,
    pub correct: usize,
    pub skipped: usize,
    pub timed_out: usize,
    pub outcomes: Vec<WordOutcome>,
}

impl HistoryEntry {
    /// The stored result, using the counts saved with it.
    pub fn result(&self) -> SessionResult {
        SessionResult {
            total: self.total,
            correct: self.correct,
            skipped: self.skipped,
            timed_out: self.timed_out,
            outcomes: self.outcomes.clone(),
        }
    }
}

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS dictionaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        source_language TEXT NOT NULL,
        target_language TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS words (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        dictionary_id INTEGER NOT NULL REFERENCES dictionaries(id) ON DELETE CASCADE,
        original TEXT NOT NULL,
        phonetic TEXT,
        translations TEXT NOT NULL,
        tags TEXT NOT NULL DEFAULT '[]'
    );

    CREATE INDEX IF NOT EXISTS idx_words_dictionary ON words(dictionary_id);

    CREATE TABLE IF NOT EXISTS quizzes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        dictionary_id INTEGER NOT NULL REFERENCES dictionaries(id) ON DELETE CASCADE,
        seconds_per_word INTEGER NOT NULL,
        tag TEXT
    );

    CREATE TABLE IF NOT EXISTS quiz_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        quiz_id INTEGER NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
        taken_at TEXT NOT NULL, -- RFC 3339, UTC
        total INTEGER NOT NULL,
        correct INTEGER NOT NULL,
        skipped INTEGER NOT NULL,
        timed_out INTEGER NOT NULL,
        outcomes TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_quiz_history_quiz ON quiz_history(quiz_id);
"#;

/// SQLite-backed dictionaries, words, saved quizzes and quiz history.
#[derive(Debug)]
pub struct QuizStore {
    conn: Connection,
}

struct WordRow {
    id: i64,
    original: String,
    phonetic: Option<String>,
    translations: String,
    tags: String,
}

impl WordRow {
    fn into_word(self) -> Result<Word> {
        Ok(Word {
            id: Some(self.id),
            original: self.original,
            phonetic: self.phonetic,
            translations: serde_json::from_str(&self.translations)?,
            tags: serde_json::from_str(&self.tags)?,
        })
    }
}

impl QuizStore {
    /// Open the store at the default location, creating it if needed.
    pub fn open_default() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("lexiquiz.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!(path = %path.display(), "opening quiz store");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(QuizStore { conn })
    }

    pub fn create_dictionary(
        &self,
        name: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO dictionaries (name, source_language, target_language) VALUES (?1, ?2, ?3)",
            params![name, source_language, target_language],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_dictionaries(&self) -> Result<Vec<Dictionary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, source_language, target_language FROM dictionaries ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Dictionary {
                id: row.get(0)?,
                name: row.get(1)?,
                source_language: row.get(2)?,
                target_language: row.get(3)?,
            })
        })?;

        let mut dictionaries = Vec::new();
        for row in rows {
            dictionaries.push(row?);
        }
        Ok(dictionaries)
    }

    pub fn find_dictionary(&self, name: &str) -> Result<Dictionary> {
        self.conn
            .query_row(
                "SELECT id, name, source_language, target_language FROM dictionaries WHERE name = ?1",
                [name],
                |row| {
                    Ok(Dictionary {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        source_language: row.get(2)?,
                        target_language: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("dictionary '{name}'")))
    }

    /// Deletes the dictionary together with its words, quizzes and history.
    pub fn delete_dictionary(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM dictionaries WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StoreError::NotFound(format!("dictionary {id}")));
        }
        Ok(())
    }

    fn ensure_dictionary(&self, id: i64) -> Result<()> {
        let exists: Option<i64> = self
            .conn
            .query_row("SELECT id FROM dictionaries WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;
        exists
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("dictionary {id}")))
    }

    pub fn add_word(&self, dictionary_id: i64, word: &Word) -> Result<i64> {
        self.ensure_dictionary(dictionary_id)?;
        if !word.is_answerable() {
            return Err(StoreError::InvalidRecord(format!(
                "word '{}' has no translations",
                word.original
            )));
        }

        self.conn.execute(
            r#"
            INSERT INTO words (dictionary_id, original, phonetic, translations, tags)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                dictionary_id,
                word.original,
                word.phonetic,
                serde_json::to_string(&word.translations)?,
                serde_json::to_string(&word.tags)?,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many words in one transaction; nothing is stored if any word is invalid.
    pub fn add_words_batch(&mut self, dictionary_id: i64, words: &[Word]) -> Result<usize> {
        self.ensure_dictionary(dictionary_id)?;
        if let Some(bad) = words.iter().find(|w| !w.is_answerable()) {
            return Err(StoreError::InvalidRecord(format!(
                "word '{}' has no translations",
                bad.original
            )));
        }

        let tx = self.conn.transaction()?;
        for word in words {
            tx.execute(
                r#"
                INSERT INTO words (dictionary_id, original, phonetic, translations, tags)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    dictionary_id,
                    word.original,
                    word.phonetic,
                    serde_json::to_string(&word.translations)?,
                    serde_json::to_string(&word.tags)?,
                ],
            )?;
        }
        tx.commit()?;

        tracing::info!(dictionary_id, count = words.len(), "words added");
        Ok(words.len())
    }

    pub fn delete_word(&self, id: i64) -> Result<()> {
        let affected = self.conn.execute("DELETE FROM words WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(StoreError::NotFound(format!("word {id}")));
        }
        Ok(())
    }

    fn query_words(&self, dictionary_id: i64) -> Result<Vec<Word>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, original, phonetic, translations, tags
            FROM words
            WHERE dictionary_id = ?1
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map([dictionary_id], |row| {
            Ok(WordRow {
                id: row.get(0)?,
                original: row.get(1)?,
                phonetic: row.get(2)?,
                translations: row.get(3)?,
                tags: row.get(4)?,
            })
        })?;

        let mut words = Vec::new();
        for row in rows {
            words.push(row?.into_word()?);
        }
        Ok(words)
    }

    /// Words whose original text or any translation contains `query`, ignoring case.
    pub fn search_words(&self, dictionary_id: i64, query: &str) -> Result<Vec<Word>> {
        let needle = query.trim().to_lowercase();
        let words = self.load_words(dictionary_id)?;
        if needle.is_empty() {
            return Ok(words);
        }
        Ok(words
            .into_iter()
            .filter(|w| {
                w.original.to_lowercase().contains(&needle)
                    || w
                        .translations
                        .iter()
                        .any(|t| t.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Every distinct tag used in the dictionary, sorted.
    pub fn tags(&self, dictionary_id: i64) -> Result<Vec<String>> {
        Ok(self
            .load_words(dictionary_id)?
            .into_iter()
            .flat_map(|w| w.tags)
            .sorted()
            .dedup()
            .collect())
    }

    pub fn create_quiz(
        &self,
        name: &str,
        dictionary_id: i64,
        seconds_per_word: u32,
        tag: Option<&str>,
    ) -> Result<i64> {
        self.ensure_dictionary(dictionary_id)?;
        if seconds_per_word == 0 {
            return Err(StoreError::InvalidRecord(
                "seconds per word must be positive".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO quizzes (name, dictionary_id, seconds_per_word, tag) VALUES (?1, ?2, ?3, ?4)",
            params![name, dictionary_id, seconds_per_word, tag],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_quizzes(&self) -> Result<Vec<QuizRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, dictionary_id, seconds_per_word, tag FROM quizzes ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(QuizRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                dictionary_id: row.get(2)?,
                seconds_per_word: row.get(3)?,
                tag: row.get(4)?,
            })
        })?;

        let mut quizzes = Vec::new();
        for row in rows {
            quizzes.push(row?);
        }
        Ok(quizzes)
    }

    pub fn find_quiz(&self, name: &str) -> Result<QuizRecord> {
        self.conn
            .query_row(
                "SELECT id, name, dictionary_id, seconds_per_word, tag FROM quizzes WHERE name = ?1",
                [name],
                |row| {
                    Ok(QuizRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        dictionary_id: row.get(2)?,
                        seconds_per_word: row.get(3)?,
                        tag: row.get(4)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("quiz '{name}'")))
    }

    /// Build the definition for a saved quiz, applying its tag filter.
    pub fn load_definition(&self, quiz: &QuizRecord) -> Result<QuizDefinition> {
        let words = self.load_words(quiz.dictionary_id)?;
        let mut definition = QuizDefinition::new(quiz.seconds_per_word, words).for_quiz(quiz.id);
        if let Some(ref tag) = quiz.tag {
            definition = definition.filtered_by_tag(tag);
        }
        Ok(definition)
    }

    /// History entries, newest first, optionally for one quiz.
    pub fn history(&self, quiz_id: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, quiz_id, taken_at, total, correct, skipped, timed_out, outcomes
            FROM quiz_history
            WHERE ?1 IS NULL OR quiz_id = ?1
            ORDER BY taken_at DESC, id DESC
            "#,
        )?;
        let rows = stmt.query_map([quiz_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, quiz_id, taken_at, total, correct, skipped, timed_out, outcomes) = row?;
            let taken_at = DateTime::parse_from_rfc3339(&taken_at)
                .map_err(|e| StoreError::InvalidRecord(format!("taken_at: {e}")))?
                .with_timezone(&Local);
            entries.push(HistoryEntry {
                id,
                quiz_id,
                taken_at,
                total: total as usize,
                correct: correct as usize,
                skipped: skipped as usize,
                timed_out: timed_out as usize,
                outcomes: serde_json::from_str(&outcomes)?,
            });
        }
        Ok(entries)
    }
}

impl WordSource for QuizStore {
    fn load_words(&self, dictionary_id: i64) -> Result<Vec<Word>> {
        self.ensure_dictionary(dictionary_id)?;
        self.query_words(dictionary_id)
    }
}

impl HistoryStore for QuizStore {
    fn save_result(&self, quiz_id: i64, result: &SessionResult) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO quiz_history
            (quiz_id, taken_at, total, correct, skipped, timed_out, outcomes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                quiz_id,
                Utc::now().to_rfc3339(),
                result.total as i64,
                result.correct as i64,
                result.skipped as i64,
                result.timed_out as i64,
                serde_json::to_string(&result.outcomes)?,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::info!(quiz_id, history_id = id, correct = result.correct, total = result.total, "quiz result saved");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{finalize, OutcomeKind};
    use assert_matches::assert_matches;

    fn store_with_dictionary() -> (QuizStore, i64) {
        let store = QuizStore::open_in_memory().unwrap();
        let id = store.create_dictionary("spanish", "en", "es").unwrap();
        (store, id)
    }

    fn animals() -> Vec<Word> {
        vec![
            Word::new("cat", vec!["gato".into(), "minino".into()])
                .with_tags(vec!["animals".into()]),
            Word::new("dog", vec!["perro".into()])
                .with_phonetic("dɒɡ")
                .with_tags(vec!["animals".into(), "pets".into()]),
            Word::new("bread", vec!["pan".into()]).with_tags(vec!["food".into()]),
        ]
    }

    #[test]
    fn test_create_and_find_dictionary() {
        let (store, id) = store_with_dictionary();
        let dict = store.find_dictionary("spanish").unwrap();
        assert_eq!(dict.id, id);
        assert_eq!(dict.target_language, "es");
        assert_eq!(store.list_dictionaries().unwrap().len(), 1);
    }

    #[test]
    fn test_find_missing_dictionary() {
        let store = QuizStore::open_in_memory().unwrap();
        assert_matches!(
            store.find_dictionary("klingon"),
            Err(StoreError::NotFound(_))
        );
    }

    #[test]
    fn test_duplicate_dictionary_name_rejected() {
        let (store, _) = store_with_dictionary();
        assert_matches!(
            store.create_dictionary("spanish", "en", "es"),
            Err(StoreError::Sqlite(_))
        );
    }

    #[test]
    fn test_add_and_load_words() {
        let (store, id) = store_with_dictionary();
        for w in animals() {
            store.add_word(id, &w).unwrap();
        }

        let words = store.load_words(id).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].original, "cat");
        assert_eq!(words[0].translations, vec!["gato", "minino"]);
        assert_eq!(words[1].phonetic.as_deref(), Some("dɒɡ"));
        assert!(words.iter().all(|w| w.id.is_some()));
    }

    #[test]
    fn test_load_words_unknown_dictionary() {
        let store = QuizStore::open_in_memory().unwrap();
        assert_matches!(store.load_words(42), Err(StoreError::NotFound(_)));
    }

    #[test]
    fn test_add_word_without_translation_rejected() {
        let (store, id) = store_with_dictionary();
        let err = store.add_word(id, &Word::new("cat", vec![])).unwrap_err();
        assert_matches!(err, StoreError::InvalidRecord(_));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let (mut store, id) = store_with_dictionary();
        let mut words = animals();
        words.push(Word::new("ghost", vec![]));

        assert!(store.add_words_batch(id, &words).is_err());
        assert!(store.load_words(id).unwrap().is_empty());

        words.pop();
        assert_eq!(store.add_words_batch(id, &words).unwrap(), 3);
    }

    #[test]
    fn test_search_words() {
        let (mut store, id) = store_with_dictionary();
        store.add_words_batch(id, &animals()).unwrap();

        let found = store.search_words(id, "PER").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].original, "dog");
        assert_eq!(store.search_words(id, "  ").unwrap().len(), 3);
    }

    #[test]
    fn test_tags_are_sorted_and_unique() {
        let (mut store, id) = store_with_dictionary();
        store.add_words_batch(id, &animals()).unwrap();
        assert_eq!(store.tags(id).unwrap(), vec!["animals", "food", "pets"]);
    }

    #[test]
    fn test_delete_word() {
        let (store, id) = store_with_dictionary();
        let word_id = store.add_word(id, &animals()[0]).unwrap();
        store.delete_word(word_id).unwrap();
        assert!(store.load_words(id).unwrap().is_empty());
        assert_matches!(store.delete_word(word_id), Err(StoreError::NotFound(_)));
    }

    #[test]
    fn test_quiz_definition_applies_tag_filter() {
        let (mut store, id) = store_with_dictionary();
        store.add_words_batch(id, &animals()).unwrap();
        store.create_quiz("pets", id, 7, Some("pets")).unwrap();

        let quiz = store.find_quiz("pets").unwrap();
        let def = store.load_definition(&quiz).unwrap();
        assert_eq!(def.seconds_per_word, 7);
        assert_eq!(def.quiz_id, Some(quiz.id));
        assert_eq!(def.words.len(), 1);
        assert_eq!(def.words[0].original, "dog");
    }

    #[test]
    fn test_create_quiz_rejects_zero_seconds() {
        let (store, id) = store_with_dictionary();
        assert_matches!(
            store.create_quiz("fast", id, 0, None),
            Err(StoreError::InvalidRecord(_))
        );
    }

    #[test]
    fn test_save_and_read_history() {
        let (store, id) = store_with_dictionary();
        let quiz_id = store.create_quiz("all", id, 5, None).unwrap();
        let outcomes = vec![
            WordOutcome {
                word: animals()[0].clone(),
                kind: OutcomeKind::Correct,
                submitted: "gato".into(),
            },
            WordOutcome {
                word: animals()[1].clone(),
                kind: OutcomeKind::TimedOut,
                submitted: String::new(),
            },
        ];
        let result = finalize(&outcomes);

        store.save_result(quiz_id, &result).unwrap();
        let history = store.history(Some(quiz_id)).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total, 2);
        assert_eq!(history[0].correct, 1);
        assert_eq!(history[0].timed_out, 1);
        assert_eq!(history[0].result(), result);
        assert_eq!(history[0].result().accuracy(), 50.0);

        assert_eq!(store.history(None).unwrap().len(), 1);
        assert!(store.history(Some(quiz_id + 1)).unwrap().is_empty());
    }

    #[test]
    fn test_history_uses_stored_counts() {
        let (store, id) = store_with_dictionary();
        let quiz_id = store.create_quiz("all", id, 5, None).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO quiz_history (quiz_id, taken_at, total, correct, skipped, timed_out, outcomes)
                 VALUES (?1, '2026-01-01T10:00:00+00:00', 4, 3, 1, 0, '[]')",
                [quiz_id],
            )
            .unwrap();

        let result = store.history(Some(quiz_id)).unwrap()[0].result();
        assert_eq!((result.total, result.correct, result.skipped), (4, 3, 1));
        assert_eq!(result.accuracy(), 75.0);
    }

    #[test]
    fn test_history_timestamps_stored_in_utc() {
        let (store, id) = store_with_dictionary();
        let quiz_id = store.create_quiz("all", id, 5, None).unwrap();
        store.save_result(quiz_id, &finalize(&[])).unwrap();

        let taken_at: String = store
            .conn
            .query_row("SELECT taken_at FROM quiz_history", [], |row| row.get(0))
            .unwrap();
        assert!(taken_at.ends_with("+00:00"), "{taken_at}");
    }

    #[test]
    fn test_history_is_chronological_across_offsets() {
        let (store, id) = store_with_dictionary();
        let quiz_id = store.create_quiz("all", id, 5, None).unwrap();
        // 09:30 UTC is earlier than 10:00 UTC
        for taken_at in ["2026-03-29T10:00:00+00:00", "2026-03-29T09:30:00+00:00"] {
            store
                .conn
                .execute(
                    "INSERT INTO quiz_history (quiz_id, taken_at, total, correct, skipped, timed_out, outcomes)
                     VALUES (?1, ?2, 0, 0, 0, 0, '[]')",
                    params![quiz_id, taken_at],
                )
                .unwrap();
        }
        store.save_result(quiz_id, &finalize(&[])).unwrap();

        let history = store.history(Some(quiz_id)).unwrap();
        let times: Vec<_> = history.iter().map(|h| h.taken_at).collect();
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_delete_dictionary_cascades() {
        let (mut store, id) = store_with_dictionary();
        store.add_words_batch(id, &animals()).unwrap();
        let quiz_id = store.create_quiz("all", id, 5, None).unwrap();
        store.save_result(quiz_id, &finalize(&[])).unwrap();

        store.delete_dictionary(id).unwrap();
        assert!(store.list_quizzes().unwrap().is_empty());
        assert!(store.history(None).unwrap().is_empty());
        assert_matches!(store.load_words(id), Err(StoreError::NotFound(_)));
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quiz.db");
        {
            let store = QuizStore::open(&path).unwrap();
            store.create_dictionary("french", "en", "fr").unwrap();
        }
        let reopened = QuizStore::open(&path).unwrap();
        assert_eq!(reopened.list_dictionaries().unwrap()[0].name, "french");
    }
}
