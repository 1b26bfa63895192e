//! Core engines for TrialSense

pub mod contradiction;
pub mod diff;
pub mod objection;
pub mod pipeline;
pub mod score;
pub mod strategy;
pub mod update;

pub use contradiction::ContradictionAnalyzer;
pub use diff::DiffEngine;
pub use objection::{detect_objections, ObjectionKind, ObjectionRule, PhaseScope, RiskTier, OBJECTION_RULES};
pub use pipeline::{Pipeline, ProcessResult};
pub use score::ScoreCalculator;
pub use strategy::{prioritize, StrategyEngine};
pub use update::{EngineConfig, UpdateEngine, UpdateOutcome};
