//! Contradiction records and the prior material they are checked against

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the new statement conflicts with the prior material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionKind {
    /// Outright negation of an established assertion
    Direct,
    /// Figures, dates, or details that do not line up
    Inconsistent,
    /// Claimed memory failure where concrete prior content exists
    Omission,
}

/// How confidently the conflict can be pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionStrength {
    Weak,
    Moderate,
    Strong,
}

impl std::fmt::Display for ContradictionStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContradictionStrength::Weak => "weak",
            ContradictionStrength::Moderate => "moderate",
            ContradictionStrength::Strong => "strong",
        };
        write!(f, "{}", name)
    }
}

/// What the conflicting statement contradicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContradictionSource {
    /// A recorded investigative finding
    Finding { finding_id: String },
    /// A prior statement by the same speaker
    PriorStatement { source: PriorStatementKind, date: String },
}

/// A detected inconsistency between testimony and prior material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contradiction {
    /// The testimony text that conflicts
    pub statement: String,
    /// What it conflicts with
    pub contradicts: ContradictionSource,
    /// Evidence reference counsel would confront with
    pub evidence_ref: String,
    /// Nature of the conflict
    pub kind: ContradictionKind,
    /// How hard it can be pressed
    pub strength: ContradictionStrength,
    /// Flipped by the host once counsel acts on it; never unset
    pub exploited: bool,
}

/// A prior investigative finding (produced by an out-of-scope collaborator)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identifier, referenced by contradictions
    pub id: String,
    /// The finding's assertion
    pub text: String,
    /// Analyst confidence [0,1]
    pub confidence: f64,
    /// Where the finding came from (report, exhibit id, ...)
    pub source: String,
}

/// Kind of prior statement on record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorStatementKind {
    Deposition,
    Interview,
    Email,
}

impl std::fmt::Display for PriorStatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PriorStatementKind::Deposition => "deposition",
            PriorStatementKind::Interview => "interview",
            PriorStatementKind::Email => "email",
        };
        write!(f, "{}", name)
    }
}

/// A prior statement by a named speaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorStatement {
    /// Speaker name, matched exactly against event speakers
    pub speaker: String,
    /// Where the statement was made
    pub source: PriorStatementKind,
    /// When it was made
    pub date: DateTime<Utc>,
    /// Topic tags shared with event topics
    #[serde(default)]
    pub topics: Vec<String>,
    /// The statement content
    pub content: String,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_ordering() {
        assert!(ContradictionStrength::Strong > ContradictionStrength::Moderate);
        assert!(ContradictionStrength::Moderate > ContradictionStrength::Weak);
    }

    #[test]
    fn test_source_serde_tagging() {
        let source = ContradictionSource::Finding {
            finding_id: "f-12".to_string(),
        };
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("\"kind\":\"finding\""));

        let restored: ContradictionSource = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, source);
    }

    #[test]
    fn test_contradiction_defaults_unexploited() {
        let c = Contradiction {
            statement: "I never met him".to_string(),
            contradicts: ContradictionSource::Finding {
                finding_id: "f-1".to_string(),
            },
            evidence_ref: "report p.4".to_string(),
            kind: ContradictionKind::Direct,
            strength: ContradictionStrength::Strong,
            exploited: false,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"exploited\":false"));
    }
}
