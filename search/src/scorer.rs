//! Heuristic scoring types and traits.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::contract::{EmbeddingProvider, HubSet};
use crate::error::PanicStage;

/// Score for a candidate whose embedding (or the target's) is unknown.
///
/// Low priority but never excluded.
pub const UNKNOWN_SCORE: f64 = 1.0;

/// Amount subtracted from a hub page's score.
pub const HUB_BONUS: f64 = 0.05;

/// Trait for candidate scoring.
///
/// Lower scores are better. Implementations must be pure with respect to
/// their inputs and the current cache contents, and must never fail: any
/// missing information degrades to a worse score.
pub trait HeuristicScorer: Send + Sync {
    /// Score `candidate` as a step toward `target`.
    fn score(&self, candidate: &str, target: &str) -> f64;
}

/// Embedding-similarity scorer with a small bonus for hub pages.
///
/// `score = 1 - dot(candidate, target) - (HUB_BONUS if candidate is a hub)`,
/// or [`UNKNOWN_SCORE`] if either vector is missing.
pub struct SemanticScorer<'a> {
    embeddings: &'a dyn EmbeddingProvider,
    hubs: &'a dyn HubSet,
}

impl<'a> SemanticScorer<'a> {
    #[must_use]
    pub fn new(embeddings: &'a dyn EmbeddingProvider, hubs: &'a dyn HubSet) -> Self {
        Self { embeddings, hubs }
    }
}

impl HeuristicScorer for SemanticScorer<'_> {
    fn score(&self, candidate: &str, target: &str) -> f64 {
        let (Some(candidate_vec), Some(target_vec)) =
            (self.embeddings.get(candidate), self.embeddings.get(target))
        else {
            return UNKNOWN_SCORE;
        };

        let distance = 1.0 - dot(&candidate_vec, &target_vec);
        if self.hubs.is_hub(candidate) {
            distance - HUB_BONUS
        } else {
            distance
        }
    }
}

/// Dot product accumulated in `f64`. Extra trailing components of the longer
/// slice are ignored.
#[must_use]
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}

/// Score `candidate` with panic protection.
///
/// A scorer (or a provider it consults, such as a lazily loaded hub set)
/// that panics costs only heuristic quality: the candidate gets
/// [`UNKNOWN_SCORE`].
pub fn score_or_unknown(scorer: &dyn HeuristicScorer, candidate: &str, target: &str) -> f64 {
    catch_unwind(AssertUnwindSafe(|| scorer.score(candidate, target))).unwrap_or_else(|_| {
        warn!(
            %candidate,
            stage = ?PanicStage::Score,
            "scorer panicked; using unknown score"
        );
        UNKNOWN_SCORE
    })
}

/// Scores every candidate equally; the frontier then degrades to insertion
/// order.
#[derive(Debug, Clone, Copy)]
pub struct UniformScorer;

impl HeuristicScorer for UniformScorer {
    fn score(&self, _candidate: &str, _target: &str) -> f64 {
        0.0
    }
}
