use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::question::{OptionIndex, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("finished_at is before started_at")]
    InvalidTimeRange,

    #[error("too many questions for a single quiz: {len}")]
    TooManyQuestions { len: usize },

    #[error("answer count ({answers}) does not match question count ({questions})")]
    CountMismatch { questions: usize, answers: usize },
}

/// Final score for a completed quiz.
///
/// Always computed from scratch over the complete question and answer
/// lists; the session never carries a running score that could go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    total: u32,
    correct: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Score a finished quiz from its full question and answer lists.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `finished_at` is before
    /// `started_at`, `SummaryError::CountMismatch` if the lists differ in
    /// length, and `SummaryError::TooManyQuestions` if the count cannot fit
    /// in `u32`.
    pub fn from_answers(
        questions: &[Question],
        answers: &[OptionIndex],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if finished_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if questions.len() != answers.len() {
            return Err(SummaryError::CountMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        let total = u32::try_from(questions.len()).map_err(|_| SummaryError::TooManyQuestions {
            len: questions.len(),
        })?;
        let correct = questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count() as u32;

        Ok(Self {
            total,
            correct,
            started_at,
            finished_at,
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Score as a rounded percentage (0-100).
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.correct) * 100.0 / f64::from(self.total)).round() as u32
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}
