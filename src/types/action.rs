//! Suggested tactical actions and the strategy configuration that shapes them

use serde::{Deserialize, Serialize};

/// Urgency tier; P0 means act immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionPriority {
    P0,
    P1,
    P2,
}

impl ActionPriority {
    /// ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ActionPriority::P0 => "\x1b[31m", // Red
            ActionPriority::P1 => "\x1b[33m", // Yellow
            ActionPriority::P2 => "\x1b[90m", // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionPriority::P0 => "P0",
            ActionPriority::P1 => "P1",
            ActionPriority::P2 => "P2",
        };
        write!(f, "{}", name)
    }
}

/// Kind of tactical move being suggested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Confront the witness with a contradiction
    Impeachment,
    /// Procedural challenge to a question
    Objection,
    /// Redirect the narrative toward documented facts
    Reframe,
    /// Put a favorable exhibit in front of the jury
    Exhibit,
    /// Strategically concede a losing point
    Concession,
    /// Ask the court for a sidebar
    SidebarRequest,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Impeachment => "impeachment",
            ActionKind::Objection => "objection",
            ActionKind::Reframe => "reframe",
            ActionKind::Exhibit => "exhibit",
            ActionKind::Concession => "concession",
            ActionKind::SidebarRequest => "sidebar_request",
        };
        write!(f, "{}", name)
    }
}

/// A suggested tactical move, produced fresh per event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialAction {
    /// Urgency tier
    pub priority: ActionPriority,
    /// What kind of move
    pub kind: ActionKind,
    /// Witness name, topic, or evidence id depending on kind
    pub target: String,
    /// What counsel might actually say
    pub suggested_phrasing: String,
    /// Why the engine suggests it
    pub rationale: String,
    /// Evidence references backing the move
    #[serde(default)]
    pub evidence_refs: Vec<String>,
    /// Risk/benefit tradeoff note
    pub risk_note: String,
    /// Engine confidence in the suggestion [0,1]
    pub confidence: f64,
}

/// Overall stance counsel wants the engine to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    Aggressive,
    Balanced,
    Defensive,
}

/// Appetite for high-risk suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

/// Host-supplied strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub posture: Posture,
    pub risk_tolerance: RiskTolerance,
    /// Preferred action kinds, most preferred first. Within a priority
    /// tier, actions sort by their kind's position here; unlisted kinds
    /// sort last.
    pub priorities: Vec<ActionKind>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            posture: Posture::Balanced,
            risk_tolerance: RiskTolerance::Medium,
            priorities: vec![
                ActionKind::Impeachment,
                ActionKind::Objection,
                ActionKind::Exhibit,
                ActionKind::Reframe,
            ],
        }
    }
}

impl StrategyConfig {
    /// Sort key for an action kind under this config: its position in
    /// `priorities`, or one past the end when unlisted.
    pub fn preference_rank(&self, kind: ActionKind) -> usize {
        self.priorities
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(self.priorities.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
