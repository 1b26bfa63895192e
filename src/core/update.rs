//! State Update Engine: folds one event into the trial state
//!
//! `apply` is a pure function over its inputs: the prior state is left
//! untouched and a new snapshot is returned together with a readable
//! list of what changed. Events are assumed validated by the ingestion
//! layer before they get here.

use crate::types::{
    CredibilitySignal, KeyMoment, MomentImpact, MomentumTrend, SpeakerRole, TestimonyEvent,
    TrialState,
};
use crate::{MOMENTUM_GAIN_HELPFUL, MOMENTUM_LOSS_HARMFUL, TREND_MARGIN, TREND_WINDOW};

/// Tunable update policy; defaults mirror the crate-root constants
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Momentum added on a helpful signal
    pub momentum_gain: i32,
    /// Momentum removed on a harmful signal
    pub momentum_loss: i32,
    /// Recent key moments considered for the trend
    pub trend_window: usize,
    /// Imbalance needed before the trend leaves Stable
    pub trend_margin: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            momentum_gain: MOMENTUM_GAIN_HELPFUL,
            momentum_loss: MOMENTUM_LOSS_HARMFUL,
            trend_window: TREND_WINDOW,
            trend_margin: TREND_MARGIN,
        }
    }
}

/// New state plus a human-readable change list
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub state: TrialState,
    pub changes: Vec<String>,
}

/// State update engine
#[derive(Debug, Default)]
pub struct UpdateEngine {
    config: EngineConfig,
}

impl UpdateEngine {
    /// Create an engine with default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom policy
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Fold one event into the state, producing a new snapshot
    pub fn apply(&self, state: &TrialState, event: &TestimonyEvent) -> UpdateOutcome {
        let mut next = state.clone();
        let mut changes = Vec::new();

        // 1. Bookkeeping
        next.events_processed += 1;
        next.last_updated_at = event.timestamp;

        // 2. Phase adoption (any phase value accepted, ordering not enforced)
        if event.phase != next.current_phase {
            changes.push(format!(
                "phase: {} → {}",
                next.current_phase, event.phase
            ));
            next.current_phase = event.phase;
        }

        // 3. Witness tracking
        if event.role == SpeakerRole::Witness && next.current_witness.as_deref() != Some(&event.speaker) {
            changes.push(format!("witness on stand: {}", event.speaker));
            next.current_witness = Some(event.speaker.clone());
        }

        // 4. Credibility signal → momentum + key moment
        match event.credibility {
            Some(CredibilitySignal::Helpful) => {
                let before = next.momentum_score;
                next.momentum_score = clamp_momentum(i32::from(before) + self.config.momentum_gain);
                next.key_moments.push(KeyMoment {
                    timestamp: event.timestamp,
                    description: moment_description(event),
                    impact: MomentImpact::Positive,
                });
                changes.push(format!(
                    "momentum {} → {} (helpful testimony)",
                    before, next.momentum_score
                ));
            }
            Some(CredibilitySignal::Harmful) => {
                let before = next.momentum_score;
                next.momentum_score = clamp_momentum(i32::from(before) - self.config.momentum_loss);
                next.key_moments.push(KeyMoment {
                    timestamp: event.timestamp,
                    description: moment_description(event),
                    impact: MomentImpact::Negative,
                });
                changes.push(format!(
                    "momentum {} → {} (harmful testimony)",
                    before, next.momentum_score
                ));
            }
            Some(CredibilitySignal::Neutral) | None => {}
        }

        // 5. Trend over the recent key-moment window
        let trend = self.compute_trend(&next);
        if trend != next.momentum_trend {
            changes.push(format!("trend: {} → {}", next.momentum_trend, trend));
            next.momentum_trend = trend;
        }

        UpdateOutcome {
            state: next,
            changes,
        }
    }

    /// Trend from the sign balance of the last N key moments
    fn compute_trend(&self, state: &TrialState) -> MomentumTrend {
        let window = state
            .key_moments
            .iter()
            .rev()
            .take(self.config.trend_window);

        let mut balance: i32 = 0;
        for moment in window {
            match moment.impact {
                MomentImpact::Positive => balance += 1,
                MomentImpact::Negative => balance -= 1,
            }
        }

        if balance > self.config.trend_margin {
            MomentumTrend::Improving
        } else if balance < -self.config.trend_margin {
            MomentumTrend::Declining
        } else {
            MomentumTrend::Stable
        }
    }
}

/// Clamp into the documented [0,100] momentum range
fn clamp_momentum(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// One-line description of the moment for the history
fn moment_description(event: &TestimonyEvent) -> String {
    let excerpt: String = event.text.chars().take(80).collect();
    format!("{} ({}): {}", event.speaker, event.phase, excerpt)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrialPhase;

    fn witness_event(signal: Option<CredibilitySignal>) -> TestimonyEvent {
        let event = TestimonyEvent::new(
            TrialPhase::Direct,
            SpeakerRole::Witness,
            "Ms. Vale",
            "It happened on the fifth",
        );
        match signal {
            Some(s) => event.with_credibility(s),
            None => event,
        }
    }

    #[test]
    fn test_events_processed_increments() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");

        let outcome = engine.apply(&state, &witness_event(None));
        assert_eq!(outcome.state.events_processed, 1);
        // Prior snapshot untouched
        assert_eq!(state.events_processed, 0);
    }

    #[test]
    fn test_phase_adoption() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");
        assert_eq!(state.current_phase, TrialPhase::Opening);

        let mut event = witness_event(None);
        event.phase = TrialPhase::Cross;
        let outcome = engine.apply(&state, &event);

        assert_eq!(outcome.state.current_phase, TrialPhase::Cross);
        assert!(outcome.changes.iter().any(|c| c.contains("phase")));
    }

    #[test]
    fn test_witness_adoption() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");

        let outcome = engine.apply(&state, &witness_event(None));
        assert_eq!(outcome.state.current_witness.as_deref(), Some("Ms. Vale"));

        // Attorney speech does not change the witness
        let attorney = TestimonyEvent::new(
            TrialPhase::Direct,
            SpeakerRole::Attorney,
            "Counsel",
            "Objection",
        );
        let outcome2 = engine.apply(&outcome.state, &attorney);
        assert_eq!(outcome2.state.current_witness.as_deref(), Some("Ms. Vale"));
    }

    #[test]
    fn test_helpful_signal_raises_momentum() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");

        let outcome = engine.apply(&state, &witness_event(Some(CredibilitySignal::Helpful)));
        assert_eq!(
            outcome.state.momentum_score,
            50 + MOMENTUM_GAIN_HELPFUL as u8
        );
        assert_eq!(outcome.state.positive_moments(), 1);
    }

    #[test]
    fn test_harmful_signal_lowers_momentum() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");

        let outcome = engine.apply(&state, &witness_event(Some(CredibilitySignal::Harmful)));
        assert_eq!(
            outcome.state.momentum_score,
            50 - MOMENTUM_LOSS_HARMFUL as u8
        );
        assert_eq!(outcome.state.negative_moments(), 1);
    }

    #[test]
    fn test_neutral_signal_no_moment_no_momentum() {
        let engine = UpdateEngine::new();
        let state = TrialState::new("s");

        let outcome = engine.apply(&state, &witness_event(Some(CredibilitySignal::Neutral)));
        assert_eq!(outcome.state.momentum_score, 50);
        assert!(outcome.state.key_moments.is_empty());
    }

    #[test]
    fn test_momentum_clamps_at_zero() {
        let engine = UpdateEngine::new();
        let mut state = TrialState::new("s");

        for _ in 0..200 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Harmful)))
                .state;
            assert!(state.momentum_score <= 100);
        }
        assert_eq!(state.momentum_score, 0);
        assert_eq!(state.events_processed, 200);
    }

    #[test]
    fn test_momentum_clamps_at_hundred() {
        let engine = UpdateEngine::new();
        let mut state = TrialState::new("s");

        for _ in 0..200 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Helpful)))
                .state;
        }
        assert_eq!(state.momentum_score, 100);
    }

    #[test]
    fn test_trend_improving_after_run_of_helpful() {
        let engine = UpdateEngine::new();
        let mut state = TrialState::new("s");

        // Margin is 2, so three positives flip the trend
        for _ in 0..3 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Helpful)))
                .state;
        }
        assert_eq!(state.momentum_trend, MomentumTrend::Improving);
    }

    #[test]
    fn test_trend_window_forgets_old_moments() {
        let engine = UpdateEngine::new();
        let mut state = TrialState::new("s");

        // Three old negatives...
        for _ in 0..3 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Harmful)))
                .state;
        }
        assert_eq!(state.momentum_trend, MomentumTrend::Declining);

        // ...pushed out of the 10-moment window by ten positives
        for _ in 0..10 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Helpful)))
                .state;
        }
        assert_eq!(state.momentum_trend, MomentumTrend::Improving);
    }

    #[test]
    fn test_balanced_window_is_stable() {
        let engine = UpdateEngine::new();
        let mut state = TrialState::new("s");

        for _ in 0..2 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Helpful)))
                .state;
        }
        for _ in 0..2 {
            state = engine
                .apply(&state, &witness_event(Some(CredibilitySignal::Harmful)))
                .state;
        }
        assert_eq!(state.momentum_trend, MomentumTrend::Stable);
    }

    #[test]
    fn test_custom_config_steps() {
        let engine = UpdateEngine::with_config(EngineConfig {
            momentum_gain: 10,
            momentum_loss: 20,
            trend_window: 10,
            trend_margin: 2,
        });
        let state = TrialState::new("s");

        let up = engine.apply(&state, &witness_event(Some(CredibilitySignal::Helpful)));
        assert_eq!(up.state.momentum_score, 60);

        let down = engine.apply(&state, &witness_event(Some(CredibilitySignal::Harmful)));
        assert_eq!(down.state.momentum_score, 30);
    }
}
