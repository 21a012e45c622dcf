use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{OptionIndex, QuizSession, QuizStatus, QuizSummary};

use crate::error::QuizError;
use crate::source::QuestionSource;

/// Result of answering a single question in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerResult {
    pub is_complete: bool,
    pub summary: Option<QuizSummary>,
}

/// Orchestrates quiz start and answering against a question source.
///
/// Constructed once at startup with its source and clock; sessions are
/// passed in by the caller, so the service itself holds no mutable state.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self { clock, source }
    }

    /// Start (or retry) a quiz: fetch one batch and activate the session.
    ///
    /// This is the only suspension point in the whole quiz flow. Source
    /// failures are absorbed into the session's error state with the
    /// user-facing retry message; the full error goes to the log.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchInProgress` when a fetch is already
    /// outstanding for this session, and `QuizError::Session` when the
    /// session rejects the transition (e.g. still active).
    pub async fn start(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        if session.status() == QuizStatus::Loading {
            return Err(QuizError::FetchInProgress);
        }
        session.begin_loading()?;

        match self.source.fetch().await {
            Ok(questions) => {
                session.install_questions(questions, self.clock.now())?;
                log::info!("quiz started with {} questions", session.total_questions());
                Ok(())
            }
            Err(err) => {
                log::warn!("question fetch failed: {err}");
                session.fail_loading(err.user_message())?;
                Ok(())
            }
        }
    }

    /// Record the answer for the current question and advance, as one
    /// atomic step from the caller's perspective. Finishing the last
    /// question computes the summary inside the same call.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` when the session is not active, the
    /// question was already answered, or scoring fails.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        answer: OptionIndex,
    ) -> Result<QuizAnswerResult, QuizError> {
        session.submit_answer(answer)?;
        let status = session.advance(self.clock.now())?;

        Ok(QuizAnswerResult {
            is_complete: status == QuizStatus::Finished,
            summary: session.summary().cloned(),
        })
    }
}

impl std::fmt::Debug for QuizLoopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoopService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
