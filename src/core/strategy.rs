//! Strategy Engine: derives prioritized tactical actions from the state
//!
//! A decision tree keyed on momentum and trend picks a branch (recovery,
//! pressure, maintenance), phase-specific overlays are added on top, and
//! the result is sorted by priority tier first, then by the position of
//! the action's kind in the host's preference list. Tier always
//! dominates preference.

use crate::types::{
    ActionKind, ActionPriority, ContradictionStrength, CredibilitySignal, MomentumTrend, Posture,
    SpeakerRole, StrategyConfig, TestimonyEvent, TrialAction, TrialPhase, TrialState,
};
use crate::{
    LONG_ANSWER_CHARS, MOMENTUM_CONCESSION_BELOW, MOMENTUM_PRESSURE_ABOVE,
    MOMENTUM_RECOVERY_BELOW, REDIRECT_LOOKBACK,
};

/// Themes worth reinforcing whenever testimony touches them
const CASE_THEMES: &[&str] = &[
    "timeline",
    "damages",
    "causation",
    "credibility",
    "payments",
    "intent",
];

/// Strategy engine
#[derive(Debug, Default)]
pub struct StrategyEngine;

impl StrategyEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Derive actions for the event just folded into `state`
    pub fn generate_actions(
        &self,
        state: &TrialState,
        event: &TestimonyEvent,
        config: &StrategyConfig,
    ) -> Vec<TrialAction> {
        let mut actions = Vec::new();

        let momentum = state.momentum_score;
        if momentum < MOMENTUM_RECOVERY_BELOW && state.momentum_trend == MomentumTrend::Declining {
            self.recovery_branch(state, event, config, &mut actions);
        } else if momentum > MOMENTUM_PRESSURE_ABOVE
            && state.momentum_trend == MomentumTrend::Improving
        {
            self.pressure_branch(state, config, &mut actions);
        } else {
            self.maintenance_branch(event, &mut actions);
        }

        // Fresh contradictions from this very event are always worth
        // confronting, whatever branch we are in
        self.fresh_contradiction_overlay(state, event, &mut actions);
        self.phase_overlays(state, event, &mut actions);

        prioritize(&mut actions, config);
        actions
    }

    /// Momentum low and falling: stop the bleeding
    fn recovery_branch(
        &self,
        state: &TrialState,
        event: &TestimonyEvent,
        config: &StrategyConfig,
        actions: &mut Vec<TrialAction>,
    ) {
        if event.credibility == Some(CredibilitySignal::Harmful) {
            actions.push(TrialAction {
                priority: ActionPriority::P1,
                kind: ActionKind::Reframe,
                target: event.topics.first().cloned().unwrap_or_else(|| "the record".to_string()),
                suggested_phrasing: "Let's return to what the documents actually show.".to_string(),
                rationale: "Momentum is declining; steer away from the harmful testimony toward documented facts".to_string(),
                evidence_refs: Vec::new(),
                risk_note: "Low risk; an abrupt pivot can look evasive if overdone.".to_string(),
                confidence: 0.7,
            });
        }

        // Oldest unexploited contradiction first; defensive posture skips
        // the confrontation entirely
        if config.posture != Posture::Defensive {
            if let Some(c) = state.unexploited_contradictions().next() {
                actions.push(TrialAction {
                    priority: ActionPriority::P1,
                    kind: ActionKind::Impeachment,
                    target: state
                        .current_witness
                        .clone()
                        .unwrap_or_else(|| "the witness".to_string()),
                    suggested_phrasing: format!(
                        "You testified \"{}\" - I'd like to show you {}.",
                        excerpt(&c.statement),
                        c.evidence_ref
                    ),
                    rationale: "Oldest unexploited contradiction; confronting it can reset the narrative".to_string(),
                    evidence_refs: vec![c.evidence_ref.clone()],
                    risk_note: "A failed confrontation while behind compounds the damage.".to_string(),
                    confidence: 0.6,
                });
            }
        }

        if let Some(exhibit) = event.exhibits.first() {
            actions.push(TrialAction {
                priority: ActionPriority::P2,
                kind: ActionKind::Exhibit,
                target: exhibit.clone(),
                suggested_phrasing: format!("Publishing {} to the jury.", exhibit),
                rationale: "The event references an exhibit; favorable paper can anchor the recovery".to_string(),
                evidence_refs: vec![exhibit.clone()],
                risk_note: "Minimal risk if the exhibit is already admitted.".to_string(),
                confidence: 0.55,
            });
        }
    }

    /// Momentum high and rising: press the advantage (aggressive posture only)
    fn pressure_branch(
        &self,
        state: &TrialState,
        config: &StrategyConfig,
        actions: &mut Vec<TrialAction>,
    ) {
        if config.posture != Posture::Aggressive {
            return;
        }

        actions.push(TrialAction {
            priority: ActionPriority::P1,
            kind: ActionKind::Reframe,
            target: state
                .current_witness
                .clone()
                .unwrap_or_else(|| "the witness".to_string()),
            suggested_phrasing: "So we're clear for the record: your testimony today is that...".to_string(),
            rationale: "Momentum is strongly favorable; lock the helpful testimony in before it can be walked back".to_string(),
            evidence_refs: Vec::new(),
            risk_note: "Pressing too hard while ahead can generate jury sympathy for the witness.".to_string(),
            confidence: 0.65,
        });

        for c in state.unexploited_contradictions() {
            let priority = if c.strength == ContradictionStrength::Strong {
                ActionPriority::P0
            } else {
                ActionPriority::P1
            };
            actions.push(TrialAction {
                priority,
                kind: ActionKind::Impeachment,
                target: state
                    .current_witness
                    .clone()
                    .unwrap_or_else(|| "the witness".to_string()),
                suggested_phrasing: format!(
                    "Let's talk about {} - that's not what you said before, is it?",
                    excerpt(&c.statement)
                ),
                rationale: format!(
                    "Unexploited {} contradiction; pressing it now extends the advantage",
                    c.strength
                ),
                evidence_refs: vec![c.evidence_ref.clone()],
                risk_note: "Stacking impeachments can read as piling on.".to_string(),
                confidence: 0.7,
            });
        }
    }

    /// Neither ahead nor behind: low-priority reinforcement on case themes
    fn maintenance_branch(&self, event: &TestimonyEvent, actions: &mut Vec<TrialAction>) {
        let theme = event
            .topics
            .iter()
            .find(|t| CASE_THEMES.iter().any(|c| t.eq_ignore_ascii_case(c)));

        if let Some(theme) = theme {
            actions.push(TrialAction {
                priority: ActionPriority::P2,
                kind: ActionKind::Reframe,
                target: theme.clone(),
                suggested_phrasing: format!("Staying with {} for a moment...", theme),
                rationale: format!("Testimony touched the case-critical theme '{}'", theme),
                evidence_refs: Vec::new(),
                risk_note: "Routine reinforcement; negligible downside.".to_string(),
                confidence: 0.5,
            });
        }
    }

    /// Contradictions recorded from this event get an immediate
    /// confrontation suggestion regardless of branch
    fn fresh_contradiction_overlay(
        &self,
        state: &TrialState,
        event: &TestimonyEvent,
        actions: &mut Vec<TrialAction>,
    ) {
        for c in state
            .unexploited_contradictions()
            .filter(|c| c.statement == event.text)
        {
            let priority = if c.strength == ContradictionStrength::Strong {
                ActionPriority::P0
            } else {
                ActionPriority::P1
            };
            actions.push(TrialAction {
                priority,
                kind: ActionKind::Impeachment,
                target: event.speaker.clone(),
                suggested_phrasing: format!(
                    "You just testified \"{}\" - let me show you {}.",
                    excerpt(&c.statement),
                    c.evidence_ref
                ),
                rationale: format!(
                    "The statement just made conflicts with {} ({} contradiction)",
                    c.evidence_ref, c.strength
                ),
                evidence_refs: vec![c.evidence_ref.clone()],
                risk_note: "Impeaching immediately is most effective while the statement is fresh.".to_string(),
                confidence: match c.strength {
                    ContradictionStrength::Strong => 0.85,
                    ContradictionStrength::Moderate => 0.7,
                    ContradictionStrength::Weak => 0.5,
                },
            });
        }
    }

    /// Overlays added unconditionally for the current phase
    fn phase_overlays(
        &self,
        state: &TrialState,
        event: &TestimonyEvent,
        actions: &mut Vec<TrialAction>,
    ) {
        match event.phase {
            TrialPhase::Cross => {
                if event.role == SpeakerRole::Witness && event.text.chars().count() > LONG_ANSWER_CHARS {
                    actions.push(TrialAction {
                        priority: ActionPriority::P1,
                        kind: ActionKind::Objection,
                        target: event.speaker.clone(),
                        suggested_phrasing: "Objection, non-responsive. Move to strike.".to_string(),
                        rationale: format!(
                            "Witness answer ran {} characters on cross; likely beyond the question",
                            event.text.chars().count()
                        ),
                        evidence_refs: Vec::new(),
                        risk_note: "Striking a long answer can draw attention to its content.".to_string(),
                        confidence: 0.6,
                    });
                }
                if event.role == SpeakerRole::Witness
                    && event.credibility == Some(CredibilitySignal::Helpful)
                {
                    actions.push(TrialAction {
                        priority: ActionPriority::P1,
                        kind: ActionKind::Reframe,
                        target: event.speaker.clone(),
                        suggested_phrasing: "Let me make sure the record is clear on what you just said.".to_string(),
                        rationale: "Helpful admission on cross; reinforce it before moving on".to_string(),
                        evidence_refs: Vec::new(),
                        risk_note: "Re-asking can give the witness a chance to qualify the admission.".to_string(),
                        confidence: 0.7,
                    });
                }
            }
            TrialPhase::Redirect => {
                let recent_negative = state
                    .key_moments
                    .iter()
                    .rev()
                    .take(REDIRECT_LOOKBACK)
                    .any(|m| m.impact == crate::types::MomentImpact::Negative);
                if recent_negative {
                    actions.push(TrialAction {
                        priority: ActionPriority::P1,
                        kind: ActionKind::Reframe,
                        target: state
                            .current_witness
                            .clone()
                            .unwrap_or_else(|| "the witness".to_string()),
                        suggested_phrasing: "Let's give you a chance to explain what you meant earlier.".to_string(),
                        rationale: "Recent negative moments; redirect is the window to rehabilitate".to_string(),
                        evidence_refs: Vec::new(),
                        risk_note: "Rehabilitation reopens the topic for recross.".to_string(),
                        confidence: 0.65,
                    });
                }
            }
            TrialPhase::Opening | TrialPhase::Direct | TrialPhase::Closing => {}
        }
    }

    /// Propose conceding a point, but only from a position of weakness.
    /// Above the momentum gate a concession gives ground for nothing.
    pub fn evaluate_concession(&self, state: &TrialState, point: &str) -> Option<TrialAction> {
        if state.momentum_score >= MOMENTUM_CONCESSION_BELOW {
            return None;
        }

        Some(TrialAction {
            priority: ActionPriority::P1,
            kind: ActionKind::Concession,
            target: point.to_string(),
            suggested_phrasing: format!(
                "We don't dispute {}; the real question is what follows from it.",
                point
            ),
            rationale: format!(
                "Momentum is at {}; conceding a losing point buys credibility for the points that matter",
                state.momentum_score
            ),
            evidence_refs: Vec::new(),
            risk_note: "A concession cannot be walked back; only concede what is already lost.".to_string(),
            confidence: 0.6,
        })
    }
}

/// Two-level sort: priority tier dominates, preference order breaks ties,
/// insertion order breaks remaining ties (stable sort).
pub fn prioritize(actions: &mut [TrialAction], config: &StrategyConfig) {
    actions.sort_by_key(|a| (a.priority, config.preference_rank(a.kind)));
}

fn excerpt(text: &str) -> String {
    let mut s: String = text.chars().take(60).collect();
    if text.chars().count() > 60 {
        s.push('…');
    }
    s
}

// =============================================================================
// TESTS
// =============================================================================
