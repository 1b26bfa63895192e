//! Trial state aggregate
//!
//! One TrialState per session. The state is never mutated in place: the
//! update engine consumes a snapshot and produces a new one, which keeps
//! prior-vs-current diffing well-defined and makes replay deterministic.
//!
//! Invariants:
//! - momentum stays clamped to [0,100]
//! - events_processed is monotonically non-decreasing
//! - key_moments and contradictions are append-only (status flags may flip)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Contradiction, Score, TrialAction, TrialPhase};

/// Neutral starting momentum for a fresh session
pub const MOMENTUM_NEUTRAL: u8 = 50;

/// Direction the momentum has been moving over recent key moments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTrend {
    Improving,
    Declining,
    Stable,
}

impl MomentumTrend {
    /// ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            MomentumTrend::Improving => "\x1b[32m", // Green
            MomentumTrend::Declining => "\x1b[31m", // Red
            MomentumTrend::Stable => "\x1b[90m",    // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Arrow glyph for the prompt
    pub fn arrow(&self) -> &'static str {
        match self {
            MomentumTrend::Improving => "↑",
            MomentumTrend::Declining => "↓",
            MomentumTrend::Stable => "→",
        }
    }
}

impl std::fmt::Display for MomentumTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MomentumTrend::Improving => "improving",
            MomentumTrend::Declining => "declining",
            MomentumTrend::Stable => "stable",
        };
        write!(f, "{}", name)
    }
}

/// Whether a key moment helped or hurt the represented party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentImpact {
    Positive,
    Negative,
}

/// An event judged to meaningfully move the party's position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMoment {
    /// When the moment occurred
    pub timestamp: DateTime<Utc>,
    /// What happened
    pub description: String,
    /// Which way it cut
    pub impact: MomentImpact,
}

/// The aggregate state for one proceeding/session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialState {
    /// Session identifier
    pub session_id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When the state last absorbed an event
    pub last_updated_at: DateTime<Utc>,
    /// Count of events folded into this state
    pub events_processed: u64,
    /// Phase of the most recent event
    pub current_phase: TrialPhase,
    /// Witness currently on the stand, if any
    pub current_witness: Option<String>,
    /// Bounded running advantage score [0,100]
    pub momentum_score: u8,
    /// Direction over the recent key-moment window
    pub momentum_trend: MomentumTrend,
    /// Append-only, insertion order significant
    pub key_moments: Vec<KeyMoment>,
    /// Append-only; only the `exploited` flag flips after insertion
    pub contradictions_found: Vec<Contradiction>,
    /// Suggested actions not yet acted on
    pub pending_actions: Vec<TrialAction>,
    /// Actions the host has marked done
    pub completed_actions: Vec<TrialAction>,
    /// Composite scores keyed by name ("cross_exam_vulnerability", ...)
    pub scores: HashMap<String, Score>,
}

impl TrialState {
    /// Create a fresh session with neutral defaults
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            created_at: now,
            last_updated_at: now,
            events_processed: 0,
            current_phase: TrialPhase::Opening,
            current_witness: None,
            momentum_score: MOMENTUM_NEUTRAL,
            momentum_trend: MomentumTrend::Stable,
            key_moments: Vec::new(),
            contradictions_found: Vec::new(),
            pending_actions: Vec::new(),
            completed_actions: Vec::new(),
            scores: HashMap::new(),
        }
    }

    /// Count of negative key moments recorded so far
    pub fn negative_moments(&self) -> usize {
        self.key_moments
            .iter()
            .filter(|m| m.impact == MomentImpact::Negative)
            .count()
    }

    /// Count of positive key moments recorded so far
    pub fn positive_moments(&self) -> usize {
        self.key_moments
            .iter()
            .filter(|m| m.impact == MomentImpact::Positive)
            .count()
    }

    /// Contradictions counsel has not yet acted on, oldest first
    pub fn unexploited_contradictions(&self) -> impl Iterator<Item = &Contradiction> {
        self.contradictions_found.iter().filter(|c| !c.exploited)
    }

    /// Mark a recorded contradiction as exploited (host-side toggle).
    /// Returns false if the index is out of range.
    pub fn mark_exploited(&mut self, index: usize) -> bool {
        match self.contradictions_found.get_mut(index) {
            Some(c) => {
                c.exploited = true;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
