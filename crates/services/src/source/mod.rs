//! Question source contract and batch finalization policy.

pub mod gemini;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionDraft, QuestionId};

use crate::error::QuestionSourceError;

/// How many questions a source is asked to produce per batch. Fixed policy,
/// callers supply no parameters.
pub const QUESTION_COUNT: usize = 25;

/// A producer of finalized question batches.
///
/// Sources are pure producers: one outbound call, no session state, no side
/// effects beyond it. A returned batch already satisfies the data-model
/// invariants (validated records, shuffled order, contiguous ids).
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch one complete batch of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` when the request, the payload, or any
    /// single record is invalid; a failure at any stage discards the whole
    /// batch.
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError>;
}

/// Shuffle a batch of drafts and validate them into final questions.
///
/// The uniform shuffle interleaves topics that the source tends to cluster;
/// sequential ids are assigned only afterwards, so they are unique,
/// contiguous, and stable for the rest of the session.
///
/// # Errors
///
/// Returns `QuestionSourceError::EmptyBatch` for an empty input and
/// propagates the first record validation failure.
pub fn finalize_batch(drafts: Vec<QuestionDraft>) -> Result<Vec<Question>, QuestionSourceError> {
    finalize_batch_with_rng(drafts, &mut rand::rng())
}

/// [`finalize_batch`] with a caller-supplied RNG for deterministic tests.
///
/// # Errors
///
/// Same as [`finalize_batch`].
pub fn finalize_batch_with_rng<R: Rng + ?Sized>(
    mut drafts: Vec<QuestionDraft>,
    rng: &mut R,
) -> Result<Vec<Question>, QuestionSourceError> {
    if drafts.is_empty() {
        return Err(QuestionSourceError::EmptyBatch);
    }

    drafts.shuffle(rng);
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let id = QuestionId::new(u32::try_from(index).unwrap_or(u32::MAX));
            draft.validate(id).map_err(QuestionSourceError::from)
        })
        .collect()
}
