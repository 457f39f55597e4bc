use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Answers recorded so far, keyed by question id.
///
/// Only answered questions have an entry. Sets built through
/// [`SurveyScoringEngine::record_answer`](crate::SurveyScoringEngine::record_answer)
/// always hold valid labels; a set deserialized from outside input is checked
/// again when it is scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `question_id`.
    ///
    /// Does not validate; the engine does that before calling this.
    pub(crate) fn insert(&mut self, question_id: &str, label: &str) {
        self.answers.insert(question_id.to_owned(), label.to_owned());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }
}
