use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Validation errors for question records coming off the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("explanation is empty")]
    EmptyExplanation,

    #[error("expected {OPTION_COUNT} answer options, got {0}")]
    WrongOptionCount(usize),

    #[error("answer option {0} is empty")]
    EmptyOption(usize),

    #[error("option index out of range: {0}")]
    InvalidOptionIndex(usize),

    #[error("unknown topic label: {0}")]
    UnknownTopic(String),
}

//
// ─── TOPIC ────────────────────────────────────────────────────────────────────
//

/// Grammar category a question belongs to.
///
/// The labels match what the question source is instructed to emit, so
/// parsing doubles as schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Present,
    Past,
    #[serde(rename = "Present Perfect")]
    PresentPerfect,
}

impl Topic {
    /// Every topic in the fixed policy, in prompt order.
    pub const ALL: [Topic; 3] = [Topic::Present, Topic::Past, Topic::PresentPerfect];

    /// The wire/display label for this topic.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Topic::Present => "Present",
            Topic::Past => "Past",
            Topic::PresentPerfect => "Present Perfect",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topic {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Present" => Ok(Topic::Present),
            "Past" => Ok(Topic::Past),
            "Present Perfect" => Ok(Topic::PresentPerfect),
            other => Err(QuestionError::UnknownTopic(other.to_string())),
        }
    }
}

//
// ─── OPTION INDEX ─────────────────────────────────────────────────────────────
//

/// Index into a question's option list, validated to `0..OPTION_COUNT`.
///
/// Used both for the correct option and for recorded user answers, so an
/// out-of-range answer is unrepresentable once it reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// Converts a raw index into an `OptionIndex`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidOptionIndex` if the value is not in
    /// the range `0..OPTION_COUNT`.
    pub fn new(index: usize) -> Result<Self, QuestionError> {
        if index < OPTION_COUNT {
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(index as u8))
        } else {
            Err(QuestionError::InvalidOptionIndex(index))
        }
    }

    /// Returns the underlying index.
    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Unvalidated question record as produced by a question source.
///
/// Turn it into a [`Question`] with [`QuestionDraft::validate`]; nothing
/// else in the system accepts a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub topic: String,
}

impl QuestionDraft {
    /// Validate the draft and bind it to its final id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text or explanation is empty, the
    /// option list does not hold exactly [`OPTION_COUNT`] non-empty entries,
    /// the correct index is out of range, or the topic label is unknown.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let explanation = self.explanation.trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }

        let count = self.options.len();
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|_| QuestionError::WrongOptionCount(count))?;
        if let Some(empty) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption(empty));
        }

        let correct = OptionIndex::new(self.correct_index)?;
        let topic = self.topic.parse::<Topic>()?;

        Ok(Question {
            id,
            text,
            options,
            correct,
            explanation,
            topic,
        })
    }
}

/// A validated multiple-choice question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; OPTION_COUNT],
    correct: OptionIndex,
    explanation: String,
    topic: Topic,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The option text at the given index.
    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.value()]
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Whether the given answer selects the correct option.
    #[must_use]
    pub fn is_correct(&self, answer: OptionIndex) -> bool {
        answer == self.correct
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            text: "She ___ to school every day.".to_string(),
            options: vec![
                "go".to_string(),
                "goes".to_string(),
                "went".to_string(),
                "gone".to_string(),
            ],
            correct_index: 1,
            explanation: "Subjek 'she' membutuhkan kata kerja dengan akhiran -es.".to_string(),
            topic: "Present".to_string(),
        }
    }

    #[test]
    fn valid_draft_becomes_question() {
        let question = draft().validate(QuestionId::new(0)).unwrap();

        assert_eq!(question.id(), QuestionId::new(0));
        assert_eq!(question.options().len(), OPTION_COUNT);
        assert_eq!(question.option(question.correct()), "goes");
        assert_eq!(question.topic(), Topic::Present);
        assert!(question.is_correct(OptionIndex::new(1).unwrap()));
        assert!(!question.is_correct(OptionIndex::new(0).unwrap()));
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let mut bad = draft();
        bad.options.pop();
        let err = bad.validate(QuestionId::new(0)).unwrap_err();
        assert_eq!(err, QuestionError::WrongOptionCount(3));
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let mut bad = draft();
        bad.correct_index = 4;
        let err = bad.validate(QuestionId::new(0)).unwrap_err();
        assert_eq!(err, QuestionError::InvalidOptionIndex(4));
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let mut bad = draft();
        bad.topic = "Future".to_string();
        let err = bad.validate(QuestionId::new(0)).unwrap_err();
        assert_eq!(err, QuestionError::UnknownTopic("Future".to_string()));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut bad = draft();
        bad.text = "   ".to_string();
        assert_eq!(
            bad.validate(QuestionId::new(0)).unwrap_err(),
            QuestionError::EmptyText
        );

        let mut bad = draft();
        bad.explanation = String::new();
        assert_eq!(
            bad.validate(QuestionId::new(0)).unwrap_err(),
            QuestionError::EmptyExplanation
        );

        let mut bad = draft();
        bad.options[2] = " ".to_string();
        assert_eq!(
            bad.validate(QuestionId::new(0)).unwrap_err(),
            QuestionError::EmptyOption(2)
        );
    }

    #[test]
    fn topic_labels_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(topic.label().parse::<Topic>().unwrap(), topic);
        }
        assert!("Simple Future".parse::<Topic>().is_err());
    }
}
