//! Diff Engine: field-level comparison of two state snapshots
//!
//! Pure comparison; neither input is mutated. Consumers (dashboards,
//! alerts) use the significance classification to decide what to
//! surface. Count deltas clamp at zero so snapshots handed over out of
//! causal order never produce negative "new item" counts.

use crate::types::{FieldChange, Significance, StateDiff, TrialState};
use crate::{DIFF_HIGH_DELTA, DIFF_MEDIUM_DELTA};

/// Diff engine
#[derive(Debug, Default)]
pub struct DiffEngine;

impl DiffEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Compare two snapshots, prior vs current
    pub fn diff(&self, prior: &TrialState, current: &TrialState) -> StateDiff {
        let mut changes = Vec::new();

        if prior.momentum_score != current.momentum_score {
            let delta =
                (i64::from(current.momentum_score) - i64::from(prior.momentum_score)).abs();
            changes.push(FieldChange {
                field: "momentum_score".to_string(),
                from: prior.momentum_score.to_string(),
                to: current.momentum_score.to_string(),
                significance: delta_significance(delta),
            });
        }

        if prior.current_phase != current.current_phase {
            changes.push(FieldChange {
                field: "current_phase".to_string(),
                from: prior.current_phase.to_string(),
                to: current.current_phase.to_string(),
                significance: Significance::High,
            });
        }

        if prior.current_witness != current.current_witness {
            changes.push(FieldChange {
                field: "current_witness".to_string(),
                from: render_witness(&prior.current_witness),
                to: render_witness(&current.current_witness),
                significance: Significance::High,
            });
        }

        if prior.momentum_trend != current.momentum_trend {
            changes.push(FieldChange {
                field: "momentum_trend".to_string(),
                from: prior.momentum_trend.to_string(),
                to: current.momentum_trend.to_string(),
                significance: Significance::Medium,
            });
        }

        for (name, current_score) in &current.scores {
            let prior_value = prior.scores.get(name).map(|s| s.value);
            match prior_value {
                Some(pv) if (pv - current_score.value).abs() < f64::EPSILON => {}
                Some(pv) => {
                    let delta = (current_score.value - pv).abs().round() as i64;
                    changes.push(FieldChange {
                        field: name.clone(),
                        from: format!("{:.1}", pv),
                        to: format!("{:.1}", current_score.value),
                        significance: delta_significance(delta),
                    });
                }
                // Score appearing for the first time is not a change
                None => {}
            }
        }

        let new_contradictions = current
            .contradictions_found
            .len()
            .saturating_sub(prior.contradictions_found.len());
        let new_key_moments = current
            .key_moments
            .len()
            .saturating_sub(prior.key_moments.len());

        let summary = summarize(&changes, new_contradictions, new_key_moments);

        StateDiff {
            changes,
            new_contradictions,
            new_key_moments,
            summary,
        }
    }
}

fn delta_significance(delta: i64) -> Significance {
    if delta >= DIFF_HIGH_DELTA {
        Significance::High
    } else if delta >= DIFF_MEDIUM_DELTA {
        Significance::Medium
    } else {
        Significance::Low
    }
}

fn render_witness(witness: &Option<String>) -> String {
    witness.clone().unwrap_or_else(|| "(none)".to_string())
}

/// One line, most salient changes first
fn summarize(changes: &[FieldChange], new_contradictions: usize, new_key_moments: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut ordered: Vec<&FieldChange> = changes.iter().collect();
    ordered.sort_by(|a, b| b.significance.cmp(&a.significance));

    for change in ordered.iter().take(3) {
        parts.push(format!(
            "{} {} → {}",
            change.field, change.from, change.to
        ));
    }
    if new_contradictions > 0 {
        parts.push(format!("{} new contradiction(s)", new_contradictions));
    }
    if new_key_moments > 0 {
        parts.push(format!("{} new key moment(s)", new_key_moments));
    }

    if parts.is_empty() {
        "no observable change".to_string()
    } else {
        parts.join("; ")
    }
}

// =============================================================================
// TESTS
// =============================================================================
