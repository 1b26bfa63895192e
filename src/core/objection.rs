//! Objection Mapper: scans attorney questions against a declarative rule set
//!
//! Each rule is data (trigger patterns + metadata) evaluated by one
//! generic matcher, so objection types can be added or removed without
//! touching control flow. Output preserves rule-declaration order;
//! priority sorting happens downstream in the strategy engine.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{
    ActionKind, ActionPriority, SpeakerRole, TestimonyEvent, TrialAction, TrialPhase,
};

/// Recognized objection grounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectionKind {
    Leading,
    Hearsay,
    Speculation,
    Compound,
    Argumentative,
    AssumesFacts,
    Narrative,
    Opinion,
}

impl ObjectionKind {
    /// Ground as it would be stated to the court
    pub fn ground(&self) -> &'static str {
        match self {
            ObjectionKind::Leading => "leading",
            ObjectionKind::Hearsay => "hearsay",
            ObjectionKind::Speculation => "calls for speculation",
            ObjectionKind::Compound => "compound question",
            ObjectionKind::Argumentative => "argumentative",
            ObjectionKind::AssumesFacts => "assumes facts not in evidence",
            ObjectionKind::Narrative => "calls for a narrative",
            ObjectionKind::Opinion => "improper opinion",
        }
    }
}

/// Examination phases a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseScope {
    DirectOnly,
    CrossOnly,
    Both,
}

impl PhaseScope {
    fn matches(&self, phase: TrialPhase) -> bool {
        match self {
            PhaseScope::DirectOnly => phase == TrialPhase::Direct,
            PhaseScope::CrossOnly => phase == TrialPhase::Cross,
            PhaseScope::Both => true,
        }
    }
}

/// How likely the objection is to annoy the court if overused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    fn risk_note(&self) -> &'static str {
        match self {
            RiskTier::Low => "Routine objection; little downside if overruled.",
            RiskTier::Medium => "Reasonable objection; repeated overruling may read as obstruction.",
            RiskTier::High => "High-visibility objection; an overrule here draws jury attention to the answer.",
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            RiskTier::Low => 0.8,
            RiskTier::Medium => 0.65,
            RiskTier::High => 0.5,
        }
    }
}

/// One declarative objection rule
pub struct ObjectionRule {
    pub kind: ObjectionKind,
    pub triggers: Vec<Regex>,
    pub scope: PhaseScope,
    pub risk: RiskTier,
}

fn rx(pattern: &str) -> Regex {
    // Patterns are compile-time literals; a bad one is a programming error
    Regex::new(pattern).unwrap()
}

lazy_static! {
    /// Declaration order is output order
    pub static ref OBJECTION_RULES: Vec<ObjectionRule> = vec![
        // Leading is objectionable on direct; on cross it is fair game
        ObjectionRule {
            kind: ObjectionKind::Leading,
            triggers: vec![
                rx(r"(?i)\b(isn't it true|isn't that (?:correct|right|so)|wouldn't you agree|you would agree|didn't you\s*\?)"),
            ],
            scope: PhaseScope::DirectOnly,
            risk: RiskTier::Low,
        },
        ObjectionRule {
            kind: ObjectionKind::Hearsay,
            triggers: vec![
                rx(r"(?i)\b(?:he|she|they|someone)\s+(?:told|said to)\s+(?:me|you|us)\b"),
                rx(r"(?i)\bi heard (?:that|him|her|them)\b"),
                rx(r"(?i)\bout of court\b"),
            ],
            scope: PhaseScope::Both,
            risk: RiskTier::Low,
        },
        ObjectionRule {
            kind: ObjectionKind::Speculation,
            triggers: vec![
                rx(r"(?i)\b(?:what|why) (?:would|could|might) (?:he|she|they|that)\b"),
                rx(r"(?i)\b(?:do you think|what was .{0,30}thinking|must have been|could have happened)\b"),
                rx(r"(?i)\bif you had to guess\b"),
            ],
            scope: PhaseScope::Both,
            risk: RiskTier::Medium,
        },
        // Two question marks in one utterance
        ObjectionRule {
            kind: ObjectionKind::Compound,
            triggers: vec![rx(r"\?[^?]*\?")],
            scope: PhaseScope::Both,
            risk: RiskTier::Low,
        },
        ObjectionRule {
            kind: ObjectionKind::Argumentative,
            triggers: vec![
                rx(r"(?i)\byou expect (?:the jury|us|anyone) to believe\b"),
                rx(r"(?i)\b(?:how dare you|that's a lie, isn't it|you're lying)\b"),
            ],
            scope: PhaseScope::CrossOnly,
            risk: RiskTier::High,
        },
        ObjectionRule {
            kind: ObjectionKind::AssumesFacts,
            triggers: vec![
                rx(r"(?i)\bwhen did you stop\b"),
                rx(r"(?i)\b(?:after|when) you (?:decided to|chose to)\b"),
                rx(r"(?i)\bwhy did you hide\b"),
            ],
            scope: PhaseScope::Both,
            risk: RiskTier::Medium,
        },
        ObjectionRule {
            kind: ObjectionKind::Narrative,
            triggers: vec![
                rx(r"(?i)\b(?:tell|describe|walk) (?:us|the jury|me) (?:through )?everything\b"),
                rx(r"(?i)\bin your own words, (?:tell|describe)\b"),
            ],
            scope: PhaseScope::DirectOnly,
            risk: RiskTier::Medium,
        },
        ObjectionRule {
            kind: ObjectionKind::Opinion,
            triggers: vec![
                rx(r"(?i)\bin your opinion\b"),
                rx(r"(?i)\b(?:would you say|do you believe) that\b"),
            ],
            scope: PhaseScope::Both,
            risk: RiskTier::High,
        },
    ];
}

/// Scan one event against the rule table.
///
/// Only attorney speech is evaluated: objections are raised against
/// questions, not answers. One action per firing rule, in declaration
/// order.
pub fn detect_objections(event: &TestimonyEvent) -> Vec<TrialAction> {
    if event.role != SpeakerRole::Attorney {
        return Vec::new();
    }

    OBJECTION_RULES
        .iter()
        .filter(|rule| rule.scope.matches(event.phase))
        .filter(|rule| rule.triggers.iter().any(|t| t.is_match(&event.text)))
        .map(|rule| rule_to_action(rule, event))
        .collect()
}

fn rule_to_action(rule: &ObjectionRule, event: &TestimonyEvent) -> TrialAction {
    TrialAction {
        priority: ActionPriority::P1,
        kind: ActionKind::Objection,
        target: event.speaker.clone(),
        suggested_phrasing: format!("Objection, {}.", rule.kind.ground()),
        rationale: format!(
            "Question from {} matches the {} pattern during {}",
            event.speaker,
            rule.kind.ground(),
            event.phase
        ),
        evidence_refs: Vec::new(),
        risk_note: rule.risk.risk_note().to_string(),
        confidence: rule.risk.confidence(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
