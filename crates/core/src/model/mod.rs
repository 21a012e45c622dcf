mod ids;
mod question;
mod session;
mod summary;

pub use ids::QuestionId;
pub use question::{
    OPTION_COUNT, OptionIndex, Question, QuestionDraft, QuestionError, Topic,
};
pub use session::{QuizProgress, QuizSession, QuizStatus, SessionError};
pub use summary::{QuizSummary, SummaryError};
