mod quiz;
mod result;
mod start;

pub use quiz::QuizView;
pub use result::ResultView;
pub use start::StartView;
