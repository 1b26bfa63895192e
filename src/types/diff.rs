//! State diff structures for incremental consumers (dashboards, alerts)

use serde::{Deserialize, Serialize};

/// How much a consumer should care about a field change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Significance::Low => "low",
            Significance::Medium => "medium",
            Significance::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// One field-level delta between two state snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name ("momentum_score", "current_phase", ...)
    pub field: String,
    /// Rendered prior value
    pub from: String,
    /// Rendered current value
    pub to: String,
    /// How salient the change is
    pub significance: Significance,
}

/// Full comparison of two state snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDiff {
    /// Every named field that changed
    pub changes: Vec<FieldChange>,
    /// Net contradictions added since the prior snapshot (clamped at 0)
    pub new_contradictions: usize,
    /// Net key moments added since the prior snapshot (clamped at 0)
    pub new_key_moments: usize,
    /// One-line reading of the most salient changes
    pub summary: String,
}

impl StateDiff {
    /// True when nothing observable changed between the snapshots
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.new_contradictions == 0 && self.new_key_moments == 0
    }

    /// Highest significance across all field changes
    pub fn max_significance(&self) -> Option<Significance> {
        self.changes.iter().map(|c| c.significance).max()
    }
}

// =============================================================================
// TESTS
// =============================================================================
