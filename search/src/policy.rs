//! Search policy types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Search budget and beam configuration for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Upper cap applied on top of the depth schedule.
    pub beam_k: usize,
    /// Depth-dependent beam width.
    pub beam_schedule: BeamSchedule,
    /// Wall-clock budget, measured from the start of the run.
    #[serde(rename = "time_limit_secs", with = "duration_secs")]
    pub time_limit: Duration,
    /// Nodes at or beyond this depth are discarded when popped.
    pub max_depth: u32,
    /// When children are expanded relative to being pushed.
    pub expansion: ExpansionMode,
}

impl SearchPolicy {
    /// Effective number of children kept for a node at `depth`.
    #[must_use]
    pub fn beam_width(&self, depth: u32) -> usize {
        self.beam_schedule.width_at(depth).min(self.beam_k)
    }

    /// Validate that every field can be honored by the search loop.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the beam cap is zero or the
    /// beam schedule is malformed.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.beam_k == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "beam_k must be at least 1".into(),
            });
        }
        self.beam_schedule.validate()
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            beam_k: 5,
            beam_schedule: BeamSchedule::default(),
            time_limit: Duration::from_secs(60),
            max_depth: 20,
            expansion: ExpansionMode::Eager,
        }
    }
}

/// When a node's children get their own children computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    /// Each child is expanded one level ahead, before it is pushed.
    Eager,
    /// A node is expanded only when it is popped from the frontier.
    Lazy,
}

/// One tier of the beam schedule: nodes shallower than `below_depth` keep
/// at most `width` children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamTier {
    pub below_depth: u32,
    pub width: usize,
}

/// Funnel-shaped beam: broad near the start, narrow as depth grows.
///
/// Tiers are consulted in order; the first tier whose `below_depth` exceeds
/// the node's depth wins. Deeper nodes use `tail_width`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamSchedule {
    pub tiers: Vec<BeamTier>,
    pub tail_width: usize,
}

impl BeamSchedule {
    /// Beam width for a node at `depth`.
    #[must_use]
    pub fn width_at(&self, depth: u32) -> usize {
        self.tiers
            .iter()
            .find(|tier| depth < tier.below_depth)
            .map_or(self.tail_width, |tier| tier.width)
    }

    fn validate(&self) -> Result<(), SearchError> {
        if self.tail_width == 0 || self.tiers.iter().any(|t| t.width == 0) {
            return Err(SearchError::InvalidPolicy {
                detail: "beam widths must be at least 1".into(),
            });
        }
        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].below_depth >= pair[1].below_depth)
        {
            return Err(SearchError::InvalidPolicy {
                detail: "beam tiers must have strictly increasing below_depth".into(),
            });
        }
        Ok(())
    }
}

impl Default for BeamSchedule {
    fn default() -> Self {
        Self {
            tiers: vec![
                BeamTier {
                    below_depth: 3,
                    width: 5,
                },
                BeamTier {
                    below_depth: 8,
                    width: 3,
                },
            ],
            tail_width: 1,
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
