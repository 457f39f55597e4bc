use tracing::debug;

use crate::{AnswerSet, Assessment, Error, Question, SurveyScoringEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyState {
    NotStarted,
    InProgress { answered: usize },
    Complete,
    Classified,
}

/// Where the cursor went after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved on to the question at this index.
    Next(usize),
    /// The answered question was the last one.
    End,
}

/// Walks the question bank one question at a time.
///
/// The cursor can move backwards to revise earlier answers; revising never
/// clears answers given after it.
#[derive(Debug, Clone)]
pub struct SurveySession<'e, 'a> {
    engine: &'e SurveyScoringEngine<'a>,
    answers: AnswerSet,
    cursor: usize,
    finished: bool,
}

impl<'e, 'a> SurveySession<'e, 'a> {
    pub fn new(engine: &'e SurveyScoringEngine<'a>) -> Self {
        Self {
            engine,
            answers: AnswerSet::new(),
            cursor: 0,
            finished: false,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&'a Question> {
        self.engine.question(self.cursor).ok()
    }

    /// Answer recorded for the current question, if any.
    pub fn current_answer(&self) -> Option<&str> {
        let question = self.current()?;
        self.answers.get(&question.id)
    }

    /// 1-based position and the total number of questions.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor + 1, self.engine.len())
    }

    pub fn state(&self) -> SurveyState {
        if self.finished {
            SurveyState::Classified
        } else if self.answers.is_empty() {
            SurveyState::NotStarted
        } else if self.answers.len() == self.engine.len() {
            SurveyState::Complete
        } else {
            SurveyState::InProgress {
                answered: self.answers.len(),
            }
        }
    }

    /// Record `label` for the current question and advance.
    pub fn answer(&mut self, label: &str) -> Result<Step, Error> {
        let question = self.engine.question(self.cursor)?;
        self.answers = self
            .engine
            .record_answer(self.answers.clone(), &question.id, label)?;
        self.finished = false;
        Ok(self.advance())
    }

    /// Same as [`answer`](Self::answer) with a zero-based option index.
    pub fn answer_index(&mut self, index: usize) -> Result<Step, Error> {
        let question = self.engine.question(self.cursor)?;
        let label = question.option(index).ok_or_else(|| Error::InvalidOption {
            question_id: question.id.clone(),
            option: index.to_string(),
        })?;
        self.answer(label)
    }

    fn advance(&mut self) -> Step {
        if self.cursor + 1 < self.engine.len() {
            self.cursor += 1;
            Step::Next(self.cursor)
        } else {
            Step::End
        }
    }

    /// Move forward without answering. Only allowed once the current
    /// question has an answer.
    pub fn forward(&mut self) -> Option<Step> {
        self.current_answer()?;
        Some(self.advance())
    }

    /// Move back one question. Returns false at the first question.
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Score whatever has been answered so far.
    pub fn finish(&mut self) -> Result<Assessment<'a>, Error> {
        let assessment = self.engine.assess(&self.answers)?;
        self.finished = true;
        debug!(
            total_score = assessment.score.total_score,
            tier = ?assessment.classification.tier,
            "survey finished"
        );
        Ok(assessment)
    }

    pub fn restart(&mut self) {
        self.answers.clear();
        self.cursor = 0;
        self.finished = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{RiskTier, ENGINE};

    #[test]
    fn test_walk_forward() {
        let mut session = SurveySession::new(&ENGINE);
        assert_eq!(session.state(), SurveyState::NotStarted);
        assert_eq!(session.progress(), (1, 20));
        assert_eq!(session.current().map(|q| q.id.as_str()), Some("q1"));

        assert_eq!(session.answer("Never").unwrap(), Step::Next(1));
        assert_eq!(session.state(), SurveyState::InProgress { answered: 1 });
        assert_eq!(session.progress(), (2, 20));

        for _ in 1..19 {
            assert!(matches!(session.answer("Never").unwrap(), Step::Next(_)));
        }
        assert_eq!(session.current().map(|q| q.id.as_str()), Some("q20"));
        assert_eq!(session.answer("Never").unwrap(), Step::End);
        assert_eq!(session.state(), SurveyState::Complete);
        assert_eq!(session.cursor(), 19);

        let assessment = session.finish().unwrap();
        assert_eq!(assessment.score.total_score, 24);
        assert_eq!(assessment.classification.tier, RiskTier::ModerateRisk);
        assert_eq!(session.state(), SurveyState::Classified);
    }

    #[test]
    fn test_invalid_answer_keeps_state() {
        let mut session = SurveySession::new(&ENGINE);
        session.answer("Often").unwrap();
        assert!(matches!(
            session.answer("Rarely"),
            Err(Error::InvalidOption { .. })
        ));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.answers().get("q1"), Some("Often"));
    }

    #[test]
    fn test_previous_keeps_later_answers() {
        let mut session = SurveySession::new(&ENGINE);
        session.answer("Always").unwrap();
        session.answer("Always").unwrap();
        session.answer("Always").unwrap();
        assert!(session.previous());
        assert!(session.previous());
        assert_eq!(session.current_answer(), Some("Always"));

        session.answer_index(0).unwrap();
        assert_eq!(session.answers().get("q2"), Some("Never"));
        assert_eq!(session.answers().get("q3"), Some("Always"));
        assert_eq!(session.answers().len(), 3);
        // q1 Always = 4, q2 Never = 4, q3 Always = 4
        assert_eq!(ENGINE.compute_score(session.answers()).unwrap().total_score, 12);
    }

    #[test]
    fn test_previous_at_start() {
        let mut session = SurveySession::new(&ENGINE);
        assert!(!session.previous());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut session = SurveySession::new(&ENGINE);
        assert_eq!(session.forward(), None);
        session.answer("Sometimes").unwrap();
        session.previous();
        assert_eq!(session.forward(), Some(Step::Next(1)));
        assert_eq!(session.forward(), None);
    }

    #[test]
    fn test_finish_partial() {
        let mut session = SurveySession::new(&ENGINE);
        session.answer("Always").unwrap();
        let assessment = session.finish().unwrap();
        assert_eq!(assessment.score.total_score, 4);
        assert_eq!(assessment.score.answered, 1);
        assert_eq!(assessment.classification.tier, RiskTier::LowRisk);
    }

    #[test]
    fn test_answer_after_finish_reopens() {
        let mut session = SurveySession::new(&ENGINE);
        session.answer("Never").unwrap();
        session.finish().unwrap();
        session.previous();
        session.answer("Usually").unwrap();
        assert_eq!(session.state(), SurveyState::InProgress { answered: 1 });
    }

    #[test]
    fn test_restart() {
        let mut session = SurveySession::new(&ENGINE);
        session.answer("Usually").unwrap();
        session.answer("Usually").unwrap();
        session.finish().unwrap();
        session.restart();
        assert_eq!(session.state(), SurveyState::NotStarted);
        assert_eq!(session.cursor(), 0);
        assert!(session.answers().is_empty());
    }
}
