//! Title embedding cache and encoders.
//!
//! The cache is append-only and shared: lookups take a read lock, fills take
//! a write lock per encoded batch. Encoding the same title twice stores an
//! equal vector, so racing fills are harmless.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use speedrun_search::contract::EmbeddingProvider;

/// Titles encoded per encoder call.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Output dimension of [`HashedTrigramEncoder::default`].
pub const DEFAULT_DIMENSION: usize = 256;

/// Failure to encode a single title (or a whole batch).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("encoder rejected {title:?}: {detail}")]
    Rejected { title: String, detail: String },
    #[error("encoder unavailable: {detail}")]
    Unavailable { detail: String },
}

/// Trait for title encoders.
///
/// `encode_batch` returns exactly one result per input title, in order.
/// Vectors need not be normalized; the cache normalizes them.
pub trait TitleEncoder: Send + Sync {
    fn encode_batch(&self, titles: &[String]) -> Vec<Result<Vec<f32>, EncodeError>>;
}

/// Deterministic, training-free encoder.
///
/// Each title is split into lowercase words and padded character trigrams;
/// every feature is hashed with SHA-256 into a signed bucket. Titles sharing
/// words or spelling land close together, which is enough signal for
/// offline runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct HashedTrigramEncoder {
    dimension: usize,
}

impl HashedTrigramEncoder {
    const WORD_WEIGHT: f32 = 2.0;
    const TRIGRAM_WEIGHT: f32 = 1.0;

    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_one(&self, title: &str) -> Result<Vec<f32>, EncodeError> {
        if self.dimension == 0 {
            return Err(EncodeError::Unavailable {
                detail: "zero-dimension encoder".into(),
            });
        }
        let lowered = title.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(EncodeError::Rejected {
                title: title.to_string(),
                detail: "empty title".into(),
            });
        }

        let mut vector = vec![0.0f32; self.dimension];
        for word in lowered.split_whitespace() {
            self.accumulate(&mut vector, &format!("w:{word}"), Self::WORD_WEIGHT);

            let padded: Vec<char> = format!(" {word} ").chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                self.accumulate(&mut vector, &format!("t:{trigram}"), Self::TRIGRAM_WEIGHT);
            }
        }
        Ok(vector)
    }

    fn accumulate(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let digest = Sha256::digest(feature.as_bytes());
        let mut bucket = [0u8; 8];
        bucket.copy_from_slice(&digest[..8]);
        let index = u64::from_le_bytes(bucket) % self.dimension as u64;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        #[allow(clippy::cast_possible_truncation)]
        let slot = &mut vector[index as usize];
        *slot += sign * weight;
    }
}

impl Default for HashedTrigramEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl TitleEncoder for HashedTrigramEncoder {
    fn encode_batch(&self, titles: &[String]) -> Vec<Result<Vec<f32>, EncodeError>> {
        titles.iter().map(|title| self.encode_one(title)).collect()
    }
}

/// Scale `vector` to unit length. Zero or non-finite vectors have no
/// direction and yield `None`.
#[must_use]
pub fn unit_normalize(vector: &[f32]) -> Option<Arc<[f32]>> {
    let norm = vector
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let unit: Arc<[f32]> = vector
        .iter()
        .map(|x| (f64::from(*x) / norm) as f32)
        .collect();
    Some(unit)
}

/// Append-only embedding cache in front of a [`TitleEncoder`].
pub struct EmbeddingCache<E> {
    encoder: E,
    batch_size: usize,
    entries: RwLock<HashMap<String, Arc<[f32]>>>,
}

impl<E: TitleEncoder> EmbeddingCache<E> {
    #[must_use]
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            batch_size: DEFAULT_BATCH_SIZE,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Override the number of titles sent per encoder call (minimum 1).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.entries.read().contains_key(title)
    }

    /// Store a precomputed vector. Returns `false` if it has no direction.
    pub fn insert(&self, title: &str, vector: &[f32]) -> bool {
        let Some(unit) = unit_normalize(vector) else {
            return false;
        };
        self.entries.write().insert(title.to_string(), unit);
        true
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    fn missing(&self, titles: &[String]) -> Vec<String> {
        let entries = self.entries.read();
        let mut seen = HashSet::new();
        titles
            .iter()
            .filter(|title| !entries.contains_key(title.as_str()) && seen.insert(title.as_str()))
            .cloned()
            .collect()
    }
}

impl<E: TitleEncoder> EmbeddingProvider for EmbeddingCache<E> {
    fn ensure(&self, titles: &[String]) {
        let missing = self.missing(titles);
        if missing.is_empty() {
            return;
        }

        let mut stored = 0usize;
        for chunk in missing.chunks(self.batch_size) {
            let results = self.encoder.encode_batch(chunk);
            if results.len() != chunk.len() {
                warn!(
                    expected = chunk.len(),
                    actual = results.len(),
                    "encoder returned wrong number of vectors; batch skipped"
                );
                continue;
            }

            let mut entries = self.entries.write();
            for (title, result) in chunk.iter().zip(results) {
                match result {
                    Ok(vector) => match unit_normalize(&vector) {
                        Some(unit) => {
                            entries.insert(title.clone(), unit);
                            stored += 1;
                        }
                        None => debug!(%title, "zero embedding; left unknown"),
                    },
                    Err(error) => warn!(%title, %error, "embedding failed; left unknown"),
                }
            }
        }
        debug!(requested = titles.len(), missing = missing.len(), stored, "embeddings ensured");
    }

    fn get(&self, title: &str) -> Option<Arc<[f32]>> {
        self.entries.read().get(title).cloned()
    }
}
