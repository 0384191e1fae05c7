use serde::{Deserialize, Serialize};

/// A vocabulary entry: the text shown to the user plus every translation
/// that counts as a correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub translations: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Word {
    pub fn new<S: Into<String>>(original: S, translations: Vec<String>) -> Self {
        Self {
            id: None,
            original: original.into(),
            phonetic: None,
            translations,
            tags: Vec::new(),
        }
    }

    pub fn with_phonetic<S: Into<String>>(mut self, phonetic: S) -> Self {
        self.phonetic = Some(phonetic.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// True when at least one translation is non-blank.
    pub fn is_answerable(&self) -> bool {
        self.translations.iter().any(|t| !t.trim().is_empty())
    }
}

/// The fixed input of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<i64>,
    pub seconds_per_word: u32,
    pub words: Vec<Word>,
}

impl QuizDefinition {
    pub fn new(seconds_per_word: u32, words: Vec<Word>) -> Self {
        Self {
            quiz_id: None,
            seconds_per_word,
            words,
        }
    }

    pub fn for_quiz(mut self, quiz_id: i64) -> Self {
        self.quiz_id = Some(quiz_id);
        self
    }

    /// Restrict the word list to words carrying `tag`.
    pub fn filtered_by_tag(mut self, tag: &str) -> Self {
        self.words.retain(|w| w.has_tag(tag));
        self
    }
}

/// Split a `;`-separated cell into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
