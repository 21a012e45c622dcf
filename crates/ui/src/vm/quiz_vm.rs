use quiz_core::model::{OptionIndex, QuizSession, QuizStatus};
use services::{QuizError, QuizLoopService};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed,
}

/// View-model for one quiz attempt: the session plus the pending option
/// selection for the question on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizVm {
    session: QuizSession,
    selected: Option<OptionIndex>,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.session.status()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.session.error_message()
    }

    /// The option currently highlighted for the question on screen.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected.map(OptionIndex::value)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Highlight an option. Out-of-range indices are ignored; the UI only
    /// renders `OPTION_COUNT` buttons anyway.
    pub fn select(&mut self, index: usize) {
        if let Ok(option) = OptionIndex::new(index) {
            self.selected = Some(option);
        }
    }

    /// Start (or retry) the quiz. The only awaited step in the UI.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the session rejects the start; fetch
    /// failures surface through the session's error state instead.
    pub async fn start(&mut self, quiz_loop: &QuizLoopService) -> Result<(), QuizError> {
        self.selected = None;
        quiz_loop.start(&mut self.session).await
    }

    /// Confirm the highlighted option: submit + advance in one step.
    ///
    /// Without a selection this is a no-op (`Continue`); the confirm button
    /// stays disabled until an option is picked, so the sentinel for
    /// "skipped" never exists.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` when the session is not active.
    pub fn confirm(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizOutcome, QuizError> {
        let Some(answer) = self.selected.take() else {
            return Ok(QuizOutcome::Continue);
        };

        let result = quiz_loop.answer_current(&mut self.session, answer)?;
        Ok(if result.is_complete {
            QuizOutcome::Completed
        } else {
            QuizOutcome::Continue
        })
    }

    /// Discard the attempt and return to the idle start screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Session` while a fetch is still in flight.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.session.restart()?;
        self.selected = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{Question, QuestionDraft, QuestionId};
    use quiz_core::time::fixed_clock;
    use services::{QuestionSource, QuestionSourceError};
    use std::sync::Arc;

    struct FixedSource;

    #[async_trait]
    impl QuestionSource for FixedSource {
        async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
            Ok((0..2)
                .map(|id| {
                    QuestionDraft {
                        text: format!("Question {id}"),
                        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                        correct_index: 0,
                        explanation: "Pembahasan.".to_string(),
                        topic: "Present".to_string(),
                    }
                    .validate(QuestionId::new(id))
                    .unwrap()
                })
                .collect())
        }
    }

    fn quiz_loop() -> QuizLoopService {
        QuizLoopService::new(fixed_clock(), Arc::new(FixedSource))
    }

    #[tokio::test]
    async fn confirm_without_selection_is_a_no_op() {
        let quiz_loop = quiz_loop();
        let mut vm = QuizVm::new();
        vm.start(&quiz_loop).await.unwrap();

        let outcome = vm.confirm(&quiz_loop).unwrap();
        assert_eq!(outcome, QuizOutcome::Continue);
        assert_eq!(vm.session().answered_count(), 0);
    }

    #[tokio::test]
    async fn confirm_clears_the_selection_for_the_next_question() {
        let quiz_loop = quiz_loop();
        let mut vm = QuizVm::new();
        vm.start(&quiz_loop).await.unwrap();

        vm.select(1);
        assert!(vm.has_selection());
        vm.confirm(&quiz_loop).unwrap();
        assert!(!vm.has_selection());
        assert_eq!(vm.session().current_index(), 1);
    }

    #[tokio::test]
    async fn completing_the_last_question_reports_completed() {
        let quiz_loop = quiz_loop();
        let mut vm = QuizVm::new();
        vm.start(&quiz_loop).await.unwrap();

        vm.select(0);
        assert_eq!(vm.confirm(&quiz_loop).unwrap(), QuizOutcome::Continue);
        vm.select(3);
        assert_eq!(vm.confirm(&quiz_loop).unwrap(), QuizOutcome::Completed);
        assert_eq!(vm.status(), QuizStatus::Finished);
        assert_eq!(vm.session().summary().unwrap().correct(), 1);
    }

    #[tokio::test]
    async fn out_of_range_selection_is_ignored() {
        let quiz_loop = quiz_loop();
        let mut vm = QuizVm::new();
        vm.start(&quiz_loop).await.unwrap();

        vm.select(9);
        assert!(!vm.has_selection());
    }

    #[tokio::test]
    async fn restart_returns_to_idle() {
        let quiz_loop = quiz_loop();
        let mut vm = QuizVm::new();
        vm.start(&quiz_loop).await.unwrap();
        vm.select(0);
        vm.confirm(&quiz_loop).unwrap();

        vm.restart().unwrap();
        assert_eq!(vm.status(), QuizStatus::Idle);
        assert!(!vm.has_selection());
        assert!(vm.session().questions().is_empty());
    }
}
