use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::question::{OptionIndex, Question};
use crate::model::summary::{QuizSummary, SummaryError};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors emitted by quiz session transitions.
///
/// An `Err` never corrupts the session: every transition validates its
/// preconditions before touching state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question batch is empty")]
    EmptyBatch,

    #[error("{action} is not allowed while the quiz is {status}")]
    InvalidTransition {
        action: &'static str,
        status: QuizStatus,
    },

    #[error("question {index} already has an answer")]
    AlreadyAnswered { index: usize },

    #[error("no answer recorded for question {index}")]
    NotAnswered { index: usize },

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

//
// ─── STATUS ───────────────────────────────────────────────────────────────────
//

/// Lifecycle status of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizStatus {
    /// Fresh session, nothing fetched yet.
    Idle,
    /// A question fetch is in flight. At most one per session.
    Loading,
    /// Questions installed, user is answering.
    Active,
    /// All questions answered, summary computed.
    Finished,
    /// The last fetch failed; `error_message` holds the user-facing text.
    Error,
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuizStatus::Idle => "idle",
            QuizStatus::Loading => "loading",
            QuizStatus::Active => "active",
            QuizStatus::Finished => "finished",
            QuizStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// One complete quiz attempt, from start to finish or abandonment.
///
/// The session is a synchronous state machine; the only asynchronous step
/// (fetching questions) happens outside, between `begin_loading` and
/// `install_questions`/`fail_loading`. Answer submission and advancement
/// are separate calls, but `advance` refuses to run until the answer for
/// the current question is recorded, so scoring can never observe a
/// half-applied step.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    status: QuizStatus,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<OptionIndex>,
    summary: Option<QuizSummary>,
    error_message: Option<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Creates an idle session with no questions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: QuizStatus::Idle,
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            summary: None,
            error_message: None,
            started_at: None,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[OptionIndex] {
        &self.answers
    }

    /// 0-based index of the question currently presented. Only meaningful
    /// while the session is active.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently presented, while active.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.status == QuizStatus::Active {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Returns a summary of the current progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.total_questions().saturating_sub(self.answered_count()),
            is_complete: self.status == QuizStatus::Finished,
        }
    }

    /// The final score, present exactly when the session is finished.
    #[must_use]
    pub fn summary(&self) -> Option<&QuizSummary> {
        self.summary.as_ref()
    }

    /// The user-facing fetch error, present exactly when the status is
    /// `Error`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    //
    // ─── TRANSITIONS ──────────────────────────────────────────────────────
    //

    /// Enter the loading state ahead of a question fetch.
    ///
    /// Clears any previous error. Allowed from `Idle` and `Error` (retry);
    /// a session that is already loading, active, or finished rejects the
    /// call so two fetches can never race into one session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` from any other status.
    pub fn begin_loading(&mut self) -> Result<(), SessionError> {
        match self.status {
            QuizStatus::Idle | QuizStatus::Error => {
                self.error_message = None;
                self.status = QuizStatus::Loading;
                Ok(())
            }
            status => Err(SessionError::InvalidTransition {
                action: "start",
                status,
            }),
        }
    }

    /// Install a freshly fetched batch and activate the session.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBatch` for an empty batch and
    /// `SessionError::InvalidTransition` when the session is not loading.
    pub fn install_questions(
        &mut self,
        questions: Vec<Question>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.status != QuizStatus::Loading {
            return Err(SessionError::InvalidTransition {
                action: "install questions",
                status: self.status,
            });
        }
        if questions.is_empty() {
            return Err(SessionError::EmptyBatch);
        }

        self.questions = questions;
        self.current_index = 0;
        self.answers = Vec::new();
        self.summary = None;
        self.error_message = None;
        self.started_at = Some(now);
        self.finished_at = None;
        self.status = QuizStatus::Active;
        Ok(())
    }

    /// Record a failed fetch and surface its user-facing message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` when the session is not
    /// loading.
    pub fn fail_loading(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if self.status != QuizStatus::Loading {
            return Err(SessionError::InvalidTransition {
                action: "fail loading",
                status: self.status,
            });
        }

        self.questions = Vec::new();
        self.answers = Vec::new();
        self.error_message = Some(message.into());
        self.status = QuizStatus::Error;
        Ok(())
    }

    /// Record the answer for the current question.
    ///
    /// One submit per question: re-answering the same position is rejected,
    /// matching the UI's single confirm-then-advance flow.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the active state
    /// and `SessionError::AlreadyAnswered` on a duplicate submit.
    pub fn submit_answer(&mut self, answer: OptionIndex) -> Result<(), SessionError> {
        if self.status != QuizStatus::Active {
            return Err(SessionError::InvalidTransition {
                action: "submit answer",
                status: self.status,
            });
        }
        if self.answers.len() > self.current_index {
            return Err(SessionError::AlreadyAnswered {
                index: self.current_index,
            });
        }

        self.answers.push(answer);
        Ok(())
    }

    /// Move past the current question, finishing the quiz on the last one.
    ///
    /// Requires the current answer to be recorded first, which is what
    /// makes submit + advance atomic from the scorer's point of view: the
    /// summary is computed here, once, from the complete lists, and only
    /// after the guard has proven the final answer is in place.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the active state
    /// and `SessionError::NotAnswered` when the current question has no
    /// recorded answer.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<QuizStatus, SessionError> {
        if self.status != QuizStatus::Active {
            return Err(SessionError::InvalidTransition {
                action: "advance",
                status: self.status,
            });
        }
        if self.answers.len() != self.current_index + 1 {
            return Err(SessionError::NotAnswered {
                index: self.current_index,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            return Ok(QuizStatus::Active);
        }

        let started_at = self.started_at.unwrap_or(now);
        let summary = QuizSummary::from_answers(&self.questions, &self.answers, started_at, now)?;
        self.summary = Some(summary);
        self.finished_at = Some(now);
        self.status = QuizStatus::Finished;
        Ok(QuizStatus::Finished)
    }

    /// Reset to a fresh idle session, discarding questions, answers, score,
    /// and any error message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` while loading; a fetch is
    /// still in flight and must settle first.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.status == QuizStatus::Loading {
            return Err(SessionError::InvalidTransition {
                action: "restart",
                status: self.status,
            });
        }

        *self = Self::new();
        Ok(())
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;
    use crate::model::question::QuestionDraft;
    use crate::time::fixed_now;

    fn question(id: u32, correct_index: usize) -> Question {
        QuestionDraft {
            text: format!("Question {id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            explanation: "Pembahasan.".to_string(),
            topic: "Present Perfect".to_string(),
        }
        .validate(QuestionId::new(id))
        .unwrap()
    }

    fn batch() -> Vec<Question> {
        vec![question(0, 0), question(1, 1), question(2, 2)]
    }

    fn opt(index: usize) -> OptionIndex {
        OptionIndex::new(index).unwrap()
    }

    fn active_session() -> QuizSession {
        let mut session = QuizSession::new();
        session.begin_loading().unwrap();
        session.install_questions(batch(), fixed_now()).unwrap();
        session
    }

    #[test]
    fn full_run_with_all_correct_answers() {
        let mut session = active_session();

        for index in [0, 1, 2] {
            session.submit_answer(opt(index)).unwrap();
            session.advance(fixed_now()).unwrap();
        }

        assert_eq!(session.status(), QuizStatus::Finished);
        assert_eq!(session.answered_count(), session.total_questions());
        let summary = session.summary().unwrap();
        assert_eq!(summary.correct(), 3);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn score_counts_only_matching_positions() {
        let mut session = active_session();

        for index in [1, 1, 0] {
            session.submit_answer(opt(index)).unwrap();
            session.advance(fixed_now()).unwrap();
        }

        // Only question 1 (correct index 1) matches.
        assert_eq!(session.summary().unwrap().correct(), 1);
    }

    #[test]
    fn last_advance_finishes_without_overrunning_index() {
        let mut session = active_session();

        session.submit_answer(opt(0)).unwrap();
        session.advance(fixed_now()).unwrap();
        session.submit_answer(opt(0)).unwrap();
        session.advance(fixed_now()).unwrap();

        assert_eq!(session.current_index(), 2);
        session.submit_answer(opt(0)).unwrap();
        let status = session.advance(fixed_now()).unwrap();

        assert_eq!(status, QuizStatus::Finished);
        // The index stays on the last question instead of running past it.
        assert_eq!(session.current_index(), 2);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn advance_requires_a_recorded_answer() {
        let mut session = active_session();

        let err = session.advance(fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::NotAnswered { index: 0 });
        assert_eq!(session.status(), QuizStatus::Active);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn duplicate_submit_is_rejected() {
        let mut session = active_session();

        session.submit_answer(opt(0)).unwrap();
        let err = session.submit_answer(opt(1)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyAnswered { index: 0 });
        assert_eq!(session.answers(), &[opt(0)]);
    }

    #[test]
    fn submit_outside_active_changes_nothing() {
        let mut session = QuizSession::new();
        session.begin_loading().unwrap();

        let err = session.submit_answer(opt(0)).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                action: "submit answer",
                status: QuizStatus::Loading,
            }
        );
        assert!(session.answers().is_empty());
        assert_eq!(session.status(), QuizStatus::Loading);
    }

    #[test]
    fn failed_fetch_surfaces_error_and_clears_questions() {
        let mut session = QuizSession::new();
        session.begin_loading().unwrap();
        session.fail_loading("Gagal membuat soal. Silakan coba lagi.").unwrap();

        assert_eq!(session.status(), QuizStatus::Error);
        assert!(session.questions().is_empty());
        assert_eq!(
            session.error_message(),
            Some("Gagal membuat soal. Silakan coba lagi.")
        );

        // Retry from the error state clears the message again.
        session.begin_loading().unwrap();
        assert_eq!(session.status(), QuizStatus::Loading);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn start_is_rejected_while_loading() {
        let mut session = QuizSession::new();
        session.begin_loading().unwrap();

        let err = session.begin_loading().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                action: "start",
                status: QuizStatus::Loading,
            }
        );
    }

    #[test]
    fn empty_batch_is_rejected() {
        let mut session = QuizSession::new();
        session.begin_loading().unwrap();
        let err = session.install_questions(Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::EmptyBatch);
    }

    #[test]
    fn restart_discards_everything() {
        let mut session = active_session();
        for index in [0, 1, 2] {
            session.submit_answer(opt(index)).unwrap();
            session.advance(fixed_now()).unwrap();
        }
        assert_eq!(session.status(), QuizStatus::Finished);

        session.restart().unwrap();
        assert_eq!(session.status(), QuizStatus::Idle);
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert!(session.summary().is_none());
        assert!(session.error_message().is_none());

        // And from the error state too.
        session.begin_loading().unwrap();
        session.fail_loading("boom").unwrap();
        session.restart().unwrap();
        assert_eq!(session.status(), QuizStatus::Idle);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn answers_never_outrun_the_current_question() {
        let mut session = active_session();

        session.submit_answer(opt(0)).unwrap();
        assert!(session.answered_count() <= session.current_index() + 1);
        session.advance(fixed_now()).unwrap();
        assert!(session.answered_count() <= session.current_index() + 1);
    }
}
