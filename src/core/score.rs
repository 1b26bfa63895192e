//! Score Calculator: three composite metrics recomputed from scratch
//!
//! Each score is derived wholesale from the full state on every update
//! rather than patched incrementally, so the driver breakdown can never
//! drift from the aggregate value. All values clamp into [0,100]
//! regardless of how extreme the accumulated state is.

use std::collections::HashMap;

use crate::types::{
    MomentImpact, Score, ScoreDriver, ScoreThresholds, TrialState, SCORE_CROSS_EXAM_VULNERABILITY,
    SCORE_JURY_PERSUASION, SCORE_SETTLEMENT_LEVERAGE,
};
use crate::{
    CONFIDENCE_SATURATION_EVENTS, LEVERAGE_WEIGHT_MOMENTUM, LEVERAGE_WEIGHT_PERSUASION,
    LEVERAGE_WEIGHT_RESILIENCE, VULN_BASE, VULN_NEGATIVE_RATIO_BONUS, VULN_NEGATIVE_RATIO_CAP,
    VULN_PER_CONTRADICTION, VULN_PER_NEGATIVE_MOMENT,
};

const BANDS: ScoreThresholds = ScoreThresholds {
    low_below: 35.0,
    high_at: 65.0,
};

/// Score calculator
#[derive(Debug, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Create a new calculator
    pub fn new() -> Self {
        Self
    }

    /// Recompute all three scores, keyed by canonical name
    pub fn calculate_all(&self, state: &TrialState) -> HashMap<String, Score> {
        let vulnerability = self.cross_exam_vulnerability(state);
        let persuasion = self.jury_persuasion(state);
        let leverage = self.settlement_leverage(state, vulnerability.value, persuasion.value);

        let mut scores = HashMap::new();
        scores.insert(SCORE_CROSS_EXAM_VULNERABILITY.to_string(), vulnerability);
        scores.insert(SCORE_JURY_PERSUASION.to_string(), persuasion);
        scores.insert(SCORE_SETTLEMENT_LEVERAGE.to_string(), leverage);
        scores
    }

    /// How exposed the represented party is on cross. Higher = worse.
    pub fn cross_exam_vulnerability(&self, state: &TrialState) -> Score {
        let unexploited = state.unexploited_contradictions().count() as f64;
        let negatives = state.negative_moments() as f64;

        let negative_ratio = if state.events_processed > 0 {
            negatives / state.events_processed as f64
        } else {
            0.0
        };
        let ratio_bonus = if negative_ratio > VULN_NEGATIVE_RATIO_CAP {
            VULN_NEGATIVE_RATIO_BONUS
        } else {
            0.0
        };

        let drivers = vec![
            driver("base", 1.0, VULN_BASE, "Baseline exposure every witness carries"),
            driver(
                "unexploited_contradictions",
                VULN_PER_CONTRADICTION,
                unexploited,
                "Each unexploited contradiction is an open line of attack",
            ),
            driver(
                "negative_moments",
                VULN_PER_NEGATIVE_MOMENT,
                negatives,
                "Recorded harmful moments accumulate exposure",
            ),
            driver(
                "negative_ratio_bonus",
                1.0,
                ratio_bonus,
                "Negative signals exceed 30% of all processed events",
            ),
        ];

        let value = clamp_score(drivers.iter().map(|d| d.contribution).sum());
        let interpretation = match band(value) {
            Band::Low => "Limited exposure; cross-examination holds few openings.",
            Band::Mid => "Meaningful exposure; expect pointed cross on the open contradictions.",
            Band::High => "Severe exposure; the witness is a liability under cross.",
        };
        let recommendations = match band(value) {
            Band::Low => vec!["Maintain current preparation.".to_string()],
            Band::Mid => vec![
                "Prepare the witness on each unexploited contradiction.".to_string(),
                "Draft rehabilitation questions for redirect.".to_string(),
            ],
            Band::High => vec![
                "Consider limiting the witness's scope of testimony.".to_string(),
                "Prepare the witness on each unexploited contradiction.".to_string(),
                "Weigh whether settlement discussions should accelerate.".to_string(),
            ],
        };

        make_score(
            SCORE_CROSS_EXAM_VULNERABILITY,
            value,
            self.confidence(state),
            drivers,
            interpretation,
            recommendations,
        )
    }

    /// How the narrative is landing with the jury
    pub fn jury_persuasion(&self, state: &TrialState) -> Score {
        let momentum = f64::from(state.momentum_score);
        let total_moments = state.key_moments.len();
        // Neutral ratio before any key moment exists
        let positive_ratio = if total_moments > 0 {
            state.positive_moments() as f64 / total_moments as f64
        } else {
            0.5
        };

        let drivers = vec![
            driver(
                "momentum",
                0.5,
                momentum,
                "Current courtroom momentum, half weight",
            ),
            driver(
                "positive_moment_ratio",
                0.5,
                positive_ratio * 100.0,
                "Share of recorded key moments that favored us, half weight",
            ),
        ];

        let value = clamp_score(drivers.iter().map(|d| d.contribution).sum());
        let interpretation = match band(value) {
            Band::Low => "The jury narrative is running against us.",
            Band::Mid => "The jury could go either way; the narrative is contested.",
            Band::High => "The narrative is landing; the jury leans our way.",
        };
        let recommendations = match band(value) {
            Band::Low => vec![
                "Re-anchor the story on documented facts.".to_string(),
                "Seek favorable moments to rebuild the ledger.".to_string(),
            ],
            Band::Mid => vec!["Reinforce case themes at every opening.".to_string()],
            Band::High => vec!["Protect the lead; avoid unnecessary risks.".to_string()],
        };

        make_score(
            SCORE_JURY_PERSUASION,
            value,
            self.confidence(state),
            drivers,
            interpretation,
            recommendations,
        )
    }

    /// Negotiating strength from momentum, persuasion, and cross resilience
    pub fn settlement_leverage(
        &self,
        state: &TrialState,
        vulnerability: f64,
        persuasion: f64,
    ) -> Score {
        let momentum = f64::from(state.momentum_score);
        let resilience = 100.0 - vulnerability;

        let drivers = vec![
            driver(
                "momentum",
                LEVERAGE_WEIGHT_MOMENTUM,
                momentum,
                "Courtroom momentum translates directly to the table",
            ),
            driver(
                "jury_persuasion",
                LEVERAGE_WEIGHT_PERSUASION,
                persuasion,
                "A persuaded jury is the strongest negotiating asset",
            ),
            driver(
                "cross_exam_resilience",
                LEVERAGE_WEIGHT_RESILIENCE,
                resilience,
                "Low vulnerability means little to fear from continuing",
            ),
        ];

        let value = clamp_score(drivers.iter().map(|d| d.contribution).sum());
        let interpretation = match band(value) {
            Band::Low => "Weak position; opposing counsel has little reason to move.",
            Band::Mid => "Workable position; a reasonable settlement range exists.",
            Band::High => "Strong position; negotiate from strength or keep trying the case.",
        };
        let recommendations = match band(value) {
            Band::Low => vec![
                "Shore up vulnerabilities before opening negotiations.".to_string(),
            ],
            Band::Mid => vec!["Explore settlement while preserving trial posture.".to_string()],
            Band::High => vec![
                "Set the opening number high; the record supports it.".to_string(),
            ],
        };

        make_score(
            SCORE_SETTLEMENT_LEVERAGE,
            value,
            self.confidence(state),
            drivers,
            interpretation,
            recommendations,
        )
    }

    /// Confidence scales with events processed, saturating at 50
    fn confidence(&self, state: &TrialState) -> f64 {
        (state.events_processed as f64 / CONFIDENCE_SATURATION_EVENTS as f64).min(1.0)
    }
}

enum Band {
    Low,
    Mid,
    High,
}

fn band(value: f64) -> Band {
    if value < BANDS.low_below {
        Band::Low
    } else if value >= BANDS.high_at {
        Band::High
    } else {
        Band::Mid
    }
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn driver(factor: &str, weight: f64, raw: f64, explanation: &str) -> ScoreDriver {
    ScoreDriver {
        factor: factor.to_string(),
        weight,
        raw,
        contribution: weight * raw,
        explanation: explanation.to_string(),
    }
}

fn make_score(
    name: &str,
    value: f64,
    confidence: f64,
    drivers: Vec<ScoreDriver>,
    interpretation: &str,
    recommendations: Vec<String>,
) -> Score {
    Score {
        name: name.to_string(),
        value,
        confidence,
        drivers,
        thresholds: BANDS,
        interpretation: interpretation.to_string(),
        recommendations,
    }
}

// =============================================================================
// TESTS
// =============================================================================
