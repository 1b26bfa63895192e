//! Integration tests for strategy generation across a session
//!
//! Drives the pipeline through multi-event sessions and checks that the
//! right tactical branch engages as the trial picture shifts.

use trialsense::core::{Pipeline, StrategyEngine};
use trialsense::types::{
    ActionKind, ActionPriority, CredibilitySignal, Finding, Posture, SpeakerRole, StrategyConfig,
    TestimonyEvent, TrialPhase, TrialState,
};

fn witness_event(phase: TrialPhase, text: &str) -> TestimonyEvent {
    TestimonyEvent::new(phase, SpeakerRole::Witness, "Mr. Ash", text)
}

fn harmful(phase: TrialPhase, text: &str) -> TestimonyEvent {
    witness_event(phase, text).with_credibility(CredibilitySignal::Harmful)
}

fn helpful(phase: TrialPhase, text: &str) -> TestimonyEvent {
    witness_event(phase, text).with_credibility(CredibilitySignal::Helpful)
}

/// A run of harmful testimony drags the session into recovery mode
#[test]
fn test_declining_session_enters_recovery() {
    let pipeline = Pipeline::new();
    let config = StrategyConfig::default();
    let mut state = TrialState::new("s");

    // Four harmful events: momentum 50 → 38, trend declining
    for _ in 0..4 {
        state = pipeline
            .process(&state, &harmful(TrialPhase::Cross, "that is not right"), &[], &[], &config)
            .state;
    }
    assert_eq!(state.momentum_score, 38);

    // The next harmful event is handled by the recovery branch
    let result = pipeline.process(
        &state,
        &harmful(TrialPhase::Cross, "I may have misspoken earlier"),
        &[],
        &[],
        &config,
    );
    let reframe = result
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::Reframe)
        .expect("recovery reframe suggested");
    assert_eq!(reframe.priority, ActionPriority::P1);
    assert!(reframe.rationale.contains("declining"));
}

/// With momentum high and an aggressive posture, open contradictions
/// get pressed rather than held in reserve
#[test]
fn test_winning_session_presses_contradictions() {
    let pipeline = Pipeline::new();
    let balanced = StrategyConfig::default();
    let mut state = TrialState::new("s");

    // Record a strong contradiction early
    let findings = vec![Finding {
        id: "f-1".to_string(),
        text: "received $9,500 cash payment from vendor X".to_string(),
        confidence: 0.9,
        source: "bank records p.3".to_string(),
    }];
    state = pipeline
        .process(
            &state,
            &witness_event(TrialPhase::Cross, "I never received that cash payment"),
            &findings,
            &[],
            &balanced,
        )
        .state;

    // Then a long favorable run: momentum well above 70, improving
    for _ in 0..11 {
        state = pipeline
            .process(&state, &helpful(TrialPhase::Cross, "yes, counsel, that's right"), &[], &[], &balanced)
            .state;
    }
    assert!(state.momentum_score > 70);

    // Balanced posture holds fire while ahead
    let held = pipeline.process(
        &state,
        &witness_event(TrialPhase::Cross, "nothing further to add"),
        &[],
        &[],
        &balanced,
    );
    assert!(held.actions.iter().all(|a| a.kind != ActionKind::Impeachment));

    // Aggressive posture presses the strong contradiction at P0
    let aggressive = StrategyConfig {
        posture: Posture::Aggressive,
        ..StrategyConfig::default()
    };
    let pressed = pipeline.process(
        &state,
        &witness_event(TrialPhase::Cross, "nothing further to add"),
        &[],
        &[],
        &aggressive,
    );
    assert!(pressed
        .actions
        .iter()
        .any(|a| a.kind == ActionKind::Impeachment && a.priority == ActionPriority::P0));
}

/// Once a contradiction is marked exploited, nothing keeps suggesting it
#[test]
fn test_exploited_contradiction_retires() {
    let pipeline = Pipeline::new();
    let config = StrategyConfig::default();
    let findings = vec![Finding {
        id: "f-1".to_string(),
        text: "witness received payment in June".to_string(),
        confidence: 0.9,
        source: "ledger".to_string(),
    }];

    let state = TrialState::new("s");
    let result = pipeline.process(
        &state,
        &witness_event(TrialPhase::Cross, "I never received the payment"),
        &findings,
        &[],
        &config,
    );
    assert!(result.actions.iter().any(|a| a.kind == ActionKind::Impeachment));

    // Counsel confronts it; the host marks it exploited
    let mut state = result.state;
    assert!(state.mark_exploited(0));

    let after = pipeline.process(
        &state,
        &witness_event(TrialPhase::Cross, "I never received the payment"),
        &findings,
        &[],
        &config,
    );
    assert!(after.actions.iter().all(|a| a.kind != ActionKind::Impeachment));
    assert!(after.new_contradictions.is_empty());
}

/// Damage on cross, then redirect opens the rehabilitation window
#[test]
fn test_redirect_rehabilitation_window() {
    let pipeline = Pipeline::new();
    let config = StrategyConfig::default();
    let mut state = TrialState::new("s");

    state = pipeline
        .process(&state, &harmful(TrialPhase::Cross, "I shredded the draft"), &[], &[], &config)
        .state;

    let result = pipeline.process(
        &state,
        &witness_event(TrialPhase::Redirect, "about the draft I mentioned"),
        &[],
        &[],
        &config,
    );
    assert!(result
        .actions
        .iter()
        .any(|a| a.kind == ActionKind::Reframe && a.rationale.contains("rehabilitate")));
}

/// The concession gate opens only after the pipeline has driven
/// momentum below the threshold
#[test]
fn test_concession_gate_tracks_momentum() {
    let pipeline = Pipeline::new();
    let engine = StrategyEngine::new();
    let config = StrategyConfig::default();
    let mut state = TrialState::new("s");

    // Six harmful events: 50 - 18 = 32, still at or above the gate
    for _ in 0..6 {
        state = pipeline
            .process(&state, &harmful(TrialPhase::Cross, "that's wrong"), &[], &[], &config)
            .state;
    }
    assert_eq!(state.momentum_score, 32);
    assert!(engine.evaluate_concession(&state, "the late filing").is_none());

    // One more pushes below it
    state = pipeline
        .process(&state, &harmful(TrialPhase::Cross, "that's wrong too"), &[], &[], &config)
        .state;
    assert_eq!(state.momentum_score, 29);
    let concession = engine
        .evaluate_concession(&state, "the late filing")
        .expect("concession proposed below the gate");
    assert_eq!(concession.kind, ActionKind::Concession);
    assert!(concession.suggested_phrasing.contains("the late filing"));
}
