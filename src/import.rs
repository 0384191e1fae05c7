//! CSV import of vocabulary.
//!
//! Expected header: `original,translations,phonetic,tags`. The last two
//! columns may be omitted. `translations` and `tags` are `;`-separated.

use crate::error::StoreError;
use crate::store::QuizStore;
use crate::word::{split_list, Word};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct WordRecord {
    original: String,
    translations: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

impl WordRecord {
    fn into_word(self, line: u64) -> Result<Word, StoreError> {
        let original = self.original.trim().to_string();
        let translations = split_list(&self.translations);
        if original.is_empty() || translations.is_empty() {
            return Err(StoreError::InvalidRecord(format!(
                "line {line}: a word needs original text and at least one translation"
            )));
        }

        let mut word = Word::new(original, translations)
            .with_tags(self.tags.as_deref().map(split_list).unwrap_or_default());
        if let Some(phonetic) = self.phonetic.map(|p| p.trim().to_string()) {
            if !phonetic.is_empty() {
                word = word.with_phonetic(phonetic);
            }
        }
        Ok(word)
    }
}

pub fn read_words<R: Read>(reader: R) -> Result<Vec<Word>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut words = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: WordRecord = record.deserialize(Some(&headers))?;
        words.push(row.into_word(line)?);
    }
    Ok(words)
}

/// Import every row of the CSV at `path` into the dictionary; all or nothing.
pub fn import_file<P: AsRef<Path>>(
    store: &mut QuizStore,
    dictionary_id: i64,
    path: P,
) -> Result<usize, StoreError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), dictionary_id, "importing words");
    let words = read_words(File::open(path)?)?;
    store.add_words_batch(dictionary_id, &words)
}
