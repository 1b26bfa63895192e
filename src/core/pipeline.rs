//! Per-event composition of the engines
//!
//! Runs the full flow for one event: fold into state → detect
//! contradictions → derive actions → recompute scores → diff against the
//! prior snapshot. The host owns the state value and feeds events one at
//! a time; a batch is just N sequential folds.

use crate::core::{
    detect_objections, prioritize, ContradictionAnalyzer, DiffEngine, EngineConfig,
    ScoreCalculator, StrategyEngine, UpdateEngine,
};
use crate::types::{
    Contradiction, Finding, PriorStatement, StateDiff, StrategyConfig, TestimonyEvent, TrialAction,
    TrialState,
};

/// Everything produced for one processed event
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// The new state snapshot
    pub state: TrialState,
    /// Prioritized actions for this event
    pub actions: Vec<TrialAction>,
    /// Contradictions recorded from this event
    pub new_contradictions: Vec<Contradiction>,
    /// Delta versus the prior snapshot
    pub diff: StateDiff,
    /// Human-readable update notes
    pub changes: Vec<String>,
}

/// The composed analysis pipeline
#[derive(Debug, Default)]
pub struct Pipeline {
    update: UpdateEngine,
    analyzer: ContradictionAnalyzer,
    strategy: StrategyEngine,
    scores: ScoreCalculator,
    differ: DiffEngine,
}

impl Pipeline {
    /// Create a pipeline with default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom update policy
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            update: UpdateEngine::with_config(config),
            ..Self::default()
        }
    }

    /// Process one event against the current state
    pub fn process(
        &self,
        state: &TrialState,
        event: &TestimonyEvent,
        findings: &[Finding],
        priors: &[PriorStatement],
        config: &StrategyConfig,
    ) -> ProcessResult {
        let outcome = self.update.apply(state, event);
        let mut next = outcome.state;

        let mut found =
            self.analyzer
                .detect_contradictions(event, findings, &next.contradictions_found);
        found.extend(self.analyzer.compare_with_prior_statements(event, priors));
        next.contradictions_found.extend(found.iter().cloned());

        let mut actions = detect_objections(event);
        actions.extend(self.strategy.generate_actions(&next, event, config));
        prioritize(&mut actions, config);
        next.pending_actions.extend(actions.iter().cloned());

        next.scores = self.scores.calculate_all(&next);

        let diff = self.differ.diff(state, &next);

        ProcessResult {
            state: next,
            actions,
            new_contradictions: found,
            diff,
            changes: outcome.changes,
        }
    }

    /// Fold a batch of events in order, returning the per-event results
    pub fn process_batch(
        &self,
        state: TrialState,
        events: &[TestimonyEvent],
        findings: &[Finding],
        priors: &[PriorStatement],
        config: &StrategyConfig,
    ) -> (TrialState, Vec<ProcessResult>) {
        let mut current = state;
        let mut results = Vec::with_capacity(events.len());

        for event in events {
            let result = self.process(&current, event, findings, priors, config);
            current = result.state.clone();
            results.push(result);
        }

        (current, results)
    }
}

// =============================================================================
// TESTS
// =============================================================================
