//! Composite score structures
//!
//! Scores are recomputed wholesale on every update rather than patched
//! incrementally, so the drivers always agree with the aggregate value.

use serde::{Deserialize, Serialize};

/// Canonical score names used as keys in `TrialState::scores`
pub const SCORE_CROSS_EXAM_VULNERABILITY: &str = "cross_exam_vulnerability";
pub const SCORE_JURY_PERSUASION: &str = "jury_persuasion";
pub const SCORE_SETTLEMENT_LEVERAGE: &str = "settlement_leverage";

/// One factor feeding a composite score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDriver {
    /// Factor name (e.g., "unexploited_contradictions")
    pub factor: String,
    /// Weight applied to the raw sub-score
    pub weight: f64,
    /// Raw sub-score before weighting
    pub raw: f64,
    /// weight × raw
    pub contribution: f64,
    /// Why this factor moved the score
    pub explanation: String,
}

/// Severity bands used to pick the interpretation text
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Below this the score reads as low
    pub low_below: f64,
    /// At or above this the score reads as high
    pub high_at: f64,
}

/// A named composite metric with its full derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    /// Canonical name
    pub name: String,
    /// Value in [0,100]
    pub value: f64,
    /// Confidence [0,1], scaling with events processed
    pub confidence: f64,
    /// Ordered factor breakdown
    pub drivers: Vec<ScoreDriver>,
    /// Bands that selected the interpretation
    pub thresholds: ScoreThresholds,
    /// Human reading of the value
    pub interpretation: String,
    /// What counsel might do about it
    pub recommendations: Vec<String>,
}

impl Score {
    /// Which band the value falls in
    pub fn band(&self) -> ScoreBand {
        if self.value < self.thresholds.low_below {
            ScoreBand::Low
        } else if self.value >= self.thresholds.high_at {
            ScoreBand::High
        } else {
            ScoreBand::Mid
        }
    }
}

/// Severity band of a score value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Mid,
    High,
}

// =============================================================================
// TESTS
// =============================================================================
