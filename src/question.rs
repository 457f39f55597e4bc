use serde::{Deserialize, Serialize};

use crate::Error;

/// Number of answer options every question offers.
pub const OPTION_COUNT: usize = 5;

/// Highest contribution a single answer can make to the total score.
pub const MAX_CONTRIBUTION: u32 = (OPTION_COUNT - 1) as u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    /// Higher frequency answers mean lower risk (e.g. "I use sunscreen").
    /// Scored as `4 - index` instead of `index`.
    pub protective: bool,
    /// Ordinal scale of increasing frequency, "Never" through "Always".
    pub options: Vec<String>,
}

impl Question {
    /// Position of `label` among the options. Exact, case-sensitive match.
    pub fn option_index(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|option| option == label)
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    /// Risk points for the option at `index`.
    pub fn contribution(&self, index: usize) -> Result<u32, Error> {
        if index >= self.options.len() {
            return Err(Error::InvalidOption {
                question_id: self.id.clone(),
                option: index.to_string(),
            });
        }
        let index = index as u32;
        let top = (self.options.len() - 1) as u32;
        Ok(if self.protective {
            top - index
        } else {
            index
        })
    }
}

/// The bundled question catalog.
#[derive(Debug, Deserialize)]
pub struct QuestionBank {
    pub title: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Look up a question by its id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
