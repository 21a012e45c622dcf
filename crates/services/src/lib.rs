#![forbid(unsafe_code)]

pub mod error;
pub mod quiz_loop;
pub mod source;

pub use quiz_core::Clock;

pub use error::{QuestionSourceError, QuizError};
pub use quiz_loop::{QuizAnswerResult, QuizLoopService};
pub use source::{QUESTION_COUNT, QuestionSource, finalize_batch};
pub use source::gemini::{GeminiConfig, GeminiQuestionSource};
