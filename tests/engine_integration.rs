//! Integration tests for the analysis pipeline
//!
//! Tests the full path: event → state update → contradiction detection
//! → scoring → diff, through the public `Pipeline` surface.

use pretty_assertions::assert_eq;

use trialsense::core::Pipeline;
use trialsense::types::{
    ActionKind, ActionPriority, ContradictionKind, ContradictionStrength, CredibilitySignal,
    SpeakerRole, StrategyConfig, TestimonyEvent, TrialPhase, TrialState,
    SCORE_CROSS_EXAM_VULNERABILITY, SCORE_JURY_PERSUASION, SCORE_SETTLEMENT_LEVERAGE,
};
use trialsense::types::{Finding, PriorStatement, PriorStatementKind};

fn witness_event(phase: TrialPhase, text: &str) -> TestimonyEvent {
    TestimonyEvent::new(phase, SpeakerRole::Witness, "Mr. Ash", text)
}

/// Full path for the canonical cash-payment denial: harmful testimony
/// that also contradicts a high-confidence finding.
#[test]
fn test_cash_payment_denial_full_path() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let event = witness_event(TrialPhase::Cross, "I never received that cash payment")
        .with_credibility(CredibilitySignal::Harmful);
    let findings = vec![Finding {
        id: "f-payments-3".to_string(),
        text: "received $9,500 cash payment from vendor X".to_string(),
        confidence: 0.9,
        source: "bank records p.3".to_string(),
    }];

    let result = pipeline.process(&state, &event, &findings, &[], &StrategyConfig::default());

    // Harmful testimony moved momentum down and recorded a negative moment
    assert_eq!(result.state.momentum_score, 47);
    assert_eq!(result.state.negative_moments(), 1);
    assert_eq!(result.state.events_processed, 1);

    // The denial contradicts the finding: direct, strong (confidence 0.9)
    assert_eq!(result.new_contradictions.len(), 1);
    assert_eq!(result.new_contradictions[0].kind, ContradictionKind::Direct);
    assert_eq!(
        result.new_contradictions[0].strength,
        ContradictionStrength::Strong
    );

    // A strong contradiction made this very event yields a P0 impeachment
    // pointing at the evidence
    let imp = result
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::Impeachment)
        .expect("impeachment suggested");
    assert_eq!(imp.priority, ActionPriority::P0);
    assert!(imp.evidence_refs.contains(&"bank records p.3".to_string()));
    assert_eq!(imp.target, "Mr. Ash");

    // Vulnerability: 30 base + 10 contradiction + 2 negative + 15 ratio bonus
    let vuln = &result.state.scores[SCORE_CROSS_EXAM_VULNERABILITY];
    assert_eq!(vuln.value, 57.0);

    // The diff reflects exactly what the update did
    assert_eq!(result.diff.new_contradictions, 1);
    assert_eq!(result.diff.new_key_moments, 1);
    assert!(result.diff.summary.contains("momentum_score 50 → 47"));
}

/// A batch is N sequential folds; the count must match exactly
#[test]
fn test_batch_counts_every_event() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let events: Vec<_> = (0..12)
        .map(|i| witness_event(TrialPhase::Direct, &format!("answer {}", i)))
        .collect();

    let (final_state, results) =
        pipeline.process_batch(state, &events, &[], &[], &StrategyConfig::default());

    assert_eq!(final_state.events_processed, 12);
    assert_eq!(results.len(), 12);
    assert_eq!(final_state.current_witness.as_deref(), Some("Mr. Ash"));
}

/// A repeated neutral event changes nothing observable; the diff says so
#[test]
fn test_steady_state_event_yields_empty_diff() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let event = witness_event(TrialPhase::Direct, "yes, that's correct");
    let config = StrategyConfig::default();

    let first = pipeline.process(&state, &event, &[], &[], &config);
    let second = pipeline.process(&first.state, &event, &[], &[], &config);

    assert!(second.diff.is_empty());
    assert_eq!(second.diff.summary, "no observable change");
}

/// 200 harmful events: momentum clamps to exactly 0 and every score
/// stays inside [0,100]
#[test]
fn test_sustained_harmful_run_clamps() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let events: Vec<_> = (0..200)
        .map(|_| {
            witness_event(TrialPhase::Cross, "that part is wrong")
                .with_credibility(CredibilitySignal::Harmful)
        })
        .collect();

    let (final_state, _) =
        pipeline.process_batch(state, &events, &[], &[], &StrategyConfig::default());

    assert_eq!(final_state.momentum_score, 0);
    assert_eq!(final_state.events_processed, 200);
    for score in final_state.scores.values() {
        assert!(score.value >= 0.0 && score.value <= 100.0);
        assert_eq!(score.confidence, 1.0); // saturated well past 50 events
    }
    assert_eq!(
        final_state.scores[SCORE_CROSS_EXAM_VULNERABILITY].value,
        100.0
    );
}

/// Memory failure on a topic the witness testified about in deposition
#[test]
fn test_recall_failure_against_deposition() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let event = witness_event(TrialPhase::Cross, "I don't recall discussing the wire transfer")
        .with_topics(vec!["payments".to_string()]);
    let priors = vec![PriorStatement {
        speaker: "Mr. Ash".to_string(),
        source: PriorStatementKind::Deposition,
        date: chrono::Utc::now(),
        topics: vec!["payments".to_string()],
        content: "We discussed the wire transfer at length and I approved it on the spot"
            .to_string(),
    }];

    let result = pipeline.process(&state, &event, &[], &priors, &StrategyConfig::default());

    assert_eq!(result.new_contradictions.len(), 1);
    assert_eq!(
        result.new_contradictions[0].kind,
        ContradictionKind::Omission
    );
    // Moderate strength → immediate confrontation at P1
    assert!(result
        .actions
        .iter()
        .any(|a| a.kind == ActionKind::Impeachment && a.priority == ActionPriority::P1));
}

/// Attorney questions go through objection screening; output stays sorted
#[test]
fn test_objection_screening_and_ordering() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let event = TestimonyEvent::new(
        TrialPhase::Cross,
        SpeakerRole::Attorney,
        "Counsel",
        "You expect the jury to believe that story?",
    );

    let result = pipeline.process(&state, &event, &[], &[], &StrategyConfig::default());

    assert!(result.actions.iter().any(|a| a.kind == ActionKind::Objection));
    // Priority tiers never regress within the output
    for pair in result.actions.windows(2) {
        assert!(pair[0].priority <= pair[1].priority);
    }
}

/// Snapshots survive a serde round trip unchanged
#[test]
fn test_state_snapshot_round_trip() {
    let pipeline = Pipeline::new();
    let state = TrialState::new("s");
    let event = witness_event(TrialPhase::Direct, "it was raining that morning")
        .with_credibility(CredibilitySignal::Helpful);

    let result = pipeline.process(&state, &event, &[], &[], &StrategyConfig::default());

    let json = serde_json::to_string(&result.state).expect("serialize");
    let restored: TrialState = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored.session_id, result.state.session_id);
    assert_eq!(restored.momentum_score, result.state.momentum_score);
    assert_eq!(restored.events_processed, result.state.events_processed);
    assert_eq!(restored.key_moments.len(), result.state.key_moments.len());
    assert_eq!(restored.scores.len(), 3);
    assert!(restored.scores.contains_key(SCORE_JURY_PERSUASION));
    assert!(restored.scores.contains_key(SCORE_SETTLEMENT_LEVERAGE));
}
