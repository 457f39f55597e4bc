use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, trace, warn};

mod answer;
mod bulk;
mod error;
mod question;
mod session;
mod tier;

pub use answer::AnswerSet;
pub use bulk::{read_bulk, BulkRow};
pub use error::Error;
pub use question::{Question, QuestionBank, MAX_CONTRIBUTION, OPTION_COUNT};
pub use session::{Step, SurveySession, SurveyState};
pub use tier::{RiskTier, TierCatalog, TierContent};

/// The 20-question skin cancer risk survey.
pub static QUESTIONS: Lazy<QuestionBank> = Lazy::new(|| {
    serde_json::from_str(include_str!("../resources/questions.json"))
        .expect("resources/questions.json is valid")
});

/// Guidance content for each risk tier.
pub static TIERS: Lazy<TierCatalog> = Lazy::new(|| {
    serde_json::from_str(include_str!("../resources/tiers.json"))
        .expect("resources/tiers.json is valid")
});

/// Engine over the bundled catalog.
pub static ENGINE: Lazy<SurveyScoringEngine<'static>> = Lazy::new(|| {
    SurveyScoringEngine::new(&QUESTIONS, &TIERS).expect("bundled catalog is consistent")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub total_score: u32,
    /// Number of answered questions the total was summed over.
    pub answered: usize,
}

impl ScoreResult {
    /// Highest total reachable with this many answers.
    pub fn max_possible(&self) -> u32 {
        self.answered as u32 * MAX_CONTRIBUTION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    pub tier: RiskTier,
    pub content: &'a TierContent,
}

/// Score plus tier, what the results screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment<'a> {
    pub score: ScoreResult,
    pub max_score: u32,
    #[serde(flatten)]
    pub classification: Classification<'a>,
}

/// Scores survey answers and maps the total to a [`RiskTier`].
///
/// Every operation is pure. The caller owns the [`AnswerSet`] and passes it in
/// and out; the engine only reads its catalog.
#[derive(Debug)]
pub struct SurveyScoringEngine<'a> {
    bank: &'a QuestionBank,
    tiers: [&'a TierContent; 4],
}

impl<'a> SurveyScoringEngine<'a> {
    /// Build an engine after checking the catalog: unique question ids,
    /// exactly [`OPTION_COUNT`] options per question, content for every tier.
    pub fn new(bank: &'a QuestionBank, tiers: &'a TierCatalog) -> Result<Self, Error> {
        for (index, question) in bank.questions().iter().enumerate() {
            if question.options.len() != OPTION_COUNT {
                return Err(Error::Catalog(format!(
                    "question {} has {} options, expected {}",
                    question.id,
                    question.options.len(),
                    OPTION_COUNT
                )));
            }
            if bank.questions()[..index].iter().any(|q| q.id == question.id) {
                return Err(Error::Catalog(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }
        let content = |tier: RiskTier| {
            tiers
                .content(tier)
                .ok_or_else(|| Error::Catalog(format!("no content for tier {:?}", tier)))
        };
        Ok(Self {
            bank,
            tiers: [
                content(RiskTier::LowRisk)?,
                content(RiskTier::ModerateRisk)?,
                content(RiskTier::HighRisk)?,
                content(RiskTier::VeryHighRisk)?,
            ],
        })
    }

    pub fn question(&self, index: usize) -> Result<&'a Question, Error> {
        self.bank.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.bank.len(),
        })
    }

    /// All questions, in the same order on every call.
    pub fn questions(&self) -> &'a [Question] {
        self.bank.questions()
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// Total for a fully answered survey.
    pub fn max_score(&self) -> u32 {
        self.bank.len() as u32 * MAX_CONTRIBUTION
    }

    fn lookup(&self, question_id: &str) -> Result<&'a Question, Error> {
        self.bank.question(question_id).ok_or_else(|| {
            warn!(question_id, "unknown question");
            Error::UnknownQuestion(question_id.to_owned())
        })
    }

    /// Record `label` as the answer to `question_id`, replacing any earlier one.
    ///
    /// `label` must match one of the question's options exactly.
    pub fn record_answer(
        &self,
        mut answers: AnswerSet,
        question_id: &str,
        label: &str,
    ) -> Result<AnswerSet, Error> {
        let question = self.lookup(question_id)?;
        if question.option_index(label).is_none() {
            warn!(question_id, label, "rejected answer");
            return Err(Error::InvalidOption {
                question_id: question_id.to_owned(),
                option: label.to_owned(),
            });
        }
        debug!(question_id, label, "recorded answer");
        answers.insert(question_id, label);
        Ok(answers)
    }

    /// Same as [`record_answer`](Self::record_answer) with a zero-based option index.
    pub fn record_answer_index(
        &self,
        answers: AnswerSet,
        question_id: &str,
        index: usize,
    ) -> Result<AnswerSet, Error> {
        let question = self.lookup(question_id)?;
        let label = question.option(index).ok_or_else(|| {
            warn!(question_id, index, "rejected answer index");
            Error::InvalidOption {
                question_id: question_id.to_owned(),
                option: index.to_string(),
            }
        })?;
        self.record_answer(answers, question_id, label)
    }

    /// Sum of risk points over the answered questions.
    ///
    /// Protective questions score `4 - index`, the rest score `index`.
    /// Unanswered questions add nothing, so a partial set scores fine.
    /// A stored label that is not one of its question's options fails the
    /// whole computation.
    pub fn compute_score(&self, answers: &AnswerSet) -> Result<ScoreResult, Error> {
        let mut total_score = 0;
        for (question_id, label) in answers.iter() {
            let question = self.lookup(question_id)?;
            let index = question
                .option_index(label)
                .ok_or_else(|| Error::InvalidOption {
                    question_id: question_id.to_owned(),
                    option: label.to_owned(),
                })?;
            let points = question.contribution(index)?;
            trace!(question_id, label, points, "scored answer");
            total_score += points;
        }
        debug!(total_score, answered = answers.len(), "computed score");
        Ok(ScoreResult {
            total_score,
            answered: answers.len(),
        })
    }

    /// Map a total score to its tier. Scores past the reachable maximum are
    /// accepted and land in the top tier.
    pub fn classify(&self, total_score: i64) -> Result<Classification<'a>, Error> {
        if total_score < 0 {
            warn!(total_score, "rejected negative score");
            return Err(Error::InvalidScore(total_score));
        }
        let tier = u32::try_from(total_score).map_or(RiskTier::VeryHighRisk, RiskTier::from_score);
        Ok(Classification {
            tier,
            content: self.tiers[tier as usize],
        })
    }

    /// [`compute_score`](Self::compute_score) followed by [`classify`](Self::classify).
    pub fn assess(&self, answers: &AnswerSet) -> Result<Assessment<'a>, Error> {
        let score = self.compute_score(answers)?;
        let classification = self.classify(i64::from(score.total_score))?;
        Ok(Assessment {
            score,
            max_score: self.max_score(),
            classification,
        })
    }
}
