use quiz_core::model::{QuizSession, QuizSummary};

/// One row of the post-quiz review list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItemVm {
    pub id: u32,
    pub number: usize,
    pub text: String,
    pub topic_label: &'static str,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Score header for the result screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreVm {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

#[must_use]
pub fn map_score(summary: &QuizSummary) -> ScoreVm {
    ScoreVm {
        correct: summary.correct(),
        total: summary.total(),
        percentage: summary.percentage(),
    }
}

/// Pair every question with its recorded answer for the review list.
///
/// On a finished session the two lists always have equal length; on any
/// other session this simply maps the answered prefix.
#[must_use]
pub fn map_review_items(session: &QuizSession) -> Vec<ReviewItemVm> {
    session
        .questions()
        .iter()
        .zip(session.answers())
        .enumerate()
        .map(|(index, (question, answer))| ReviewItemVm {
            id: question.id().value(),
            number: index + 1,
            text: question.text().to_string(),
            topic_label: question.topic().label(),
            user_answer: question.option(*answer).to_string(),
            correct_answer: question.option(question.correct()).to_string(),
            is_correct: question.is_correct(*answer),
            explanation: question.explanation().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{OptionIndex, QuestionDraft, QuestionId, QuizSession};
    use quiz_core::time::fixed_now;

    fn finished_session() -> QuizSession {
        let questions = (0..2)
            .map(|id| {
                QuestionDraft {
                    text: format!("Question {id}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_index: 1,
                    explanation: "Pembahasan.".to_string(),
                    topic: "Past".to_string(),
                }
                .validate(QuestionId::new(id))
                .unwrap()
            })
            .collect();

        let mut session = QuizSession::new();
        session.begin_loading().unwrap();
        session.install_questions(questions, fixed_now()).unwrap();
        for answer in [1, 2] {
            session.submit_answer(OptionIndex::new(answer).unwrap()).unwrap();
            session.advance(fixed_now()).unwrap();
        }
        session
    }

    #[test]
    fn review_rows_carry_both_answers() {
        let session = finished_session();
        let items = map_review_items(&session);

        assert_eq!(items.len(), 2);
        assert!(items[0].is_correct);
        assert_eq!(items[0].user_answer, "b");
        assert!(!items[1].is_correct);
        assert_eq!(items[1].user_answer, "c");
        assert_eq!(items[1].correct_answer, "b");
        assert_eq!(items[1].number, 2);
    }

    #[test]
    fn score_maps_summary_fields() {
        let session = finished_session();
        let score = map_score(session.summary().unwrap());

        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 2);
        assert_eq!(score.percentage, 50);
    }
}
