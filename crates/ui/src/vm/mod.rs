mod quiz_vm;
mod review_vm;

pub use quiz_vm::{QuizOutcome, QuizVm};
pub use review_vm::{ReviewItemVm, ScoreVm, map_review_items, map_score};
