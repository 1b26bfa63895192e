//! Core types for TrialSense

mod action;
mod contradiction;
mod diff;
mod event;
mod score;
mod state;

pub use action::{ActionKind, ActionPriority, Posture, RiskTolerance, StrategyConfig, TrialAction};
pub use contradiction::{
    Contradiction, ContradictionKind, ContradictionSource, ContradictionStrength, Finding,
    PriorStatement, PriorStatementKind,
};
pub use diff::{FieldChange, Significance, StateDiff};
pub use event::{CredibilitySignal, SpeakerRole, TestimonyEvent, TrialPhase};
pub use score::{
    Score, ScoreBand, ScoreDriver, ScoreThresholds, SCORE_CROSS_EXAM_VULNERABILITY,
    SCORE_JURY_PERSUASION, SCORE_SETTLEMENT_LEVERAGE,
};
pub use state::{KeyMoment, MomentImpact, MomentumTrend, TrialState, MOMENTUM_NEUTRAL};
