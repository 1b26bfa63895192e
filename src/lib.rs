//! TrialSense: Real-time trial testimony analysis engine
//!
//! Event flow: TestimonyEvent → UpdateEngine → detectors → StrategyEngine
//! → ScoreCalculator → DiffEngine. The host owns the TrialState value and
//! threads it through every call; the engine never mutates in place.

pub mod core;
pub mod types;

// =============================================================================
// MOMENTUM POLICY [C]
// =============================================================================

/// Momentum gained on a helpful credibility signal
pub const MOMENTUM_GAIN_HELPFUL: i32 = 2;

/// Momentum lost on a harmful credibility signal (larger than the gain:
/// damaging testimony moves the needle faster than favorable testimony)
pub const MOMENTUM_LOSS_HARMFUL: i32 = 3;

/// Number of recent key moments considered for the trend
pub const TREND_WINDOW: usize = 10;

/// Positive/negative imbalance required before the trend leaves Stable
pub const TREND_MARGIN: i32 = 2;

// =============================================================================
// STRATEGY THRESHOLDS [C]
// =============================================================================

/// Below this momentum (while declining) the recovery branch activates
pub const MOMENTUM_RECOVERY_BELOW: u8 = 40;

/// Above this momentum (while improving) the pressure branch activates
pub const MOMENTUM_PRESSURE_ABOVE: u8 = 70;

/// Concessions are only proposed below this momentum
pub const MOMENTUM_CONCESSION_BELOW: u8 = 30;

/// Witness answers longer than this (chars) during cross may be non-responsive
pub const LONG_ANSWER_CHARS: usize = 200;

/// Key moments inspected during redirect for rehabilitation need
pub const REDIRECT_LOOKBACK: usize = 5;

// =============================================================================
// CONTRADICTION DETECTOR THRESHOLDS [C]
// =============================================================================

/// Finding confidence above which a keyword-negation hit is Strong
pub const FINDING_CONFIDENCE_STRONG: f64 = 0.7;

/// Relative amount divergence that records an inconsistency
pub const AMOUNT_DIVERGENCE_MODERATE: f64 = 0.20;

/// Relative amount divergence that escalates to Strong
pub const AMOUNT_DIVERGENCE_STRONG: f64 = 0.50;

/// Content keywords must be longer than this many characters
pub const KEYWORD_MIN_LEN: usize = 3;

// =============================================================================
// SCORE WEIGHTS [C]
// =============================================================================

/// Cross-exam vulnerability: base value before penalty terms
pub const VULN_BASE: f64 = 30.0;

/// Cross-exam vulnerability: points per unexploited contradiction
pub const VULN_PER_CONTRADICTION: f64 = 10.0;

/// Cross-exam vulnerability: points per negative key moment
pub const VULN_PER_NEGATIVE_MOMENT: f64 = 2.0;

/// Cross-exam vulnerability: bonus when negative signals exceed the ratio cap
pub const VULN_NEGATIVE_RATIO_BONUS: f64 = 15.0;

/// Negative-signal ratio over processed events that triggers the bonus
pub const VULN_NEGATIVE_RATIO_CAP: f64 = 0.30;

/// Settlement leverage weights (sum = 1.0)
pub const LEVERAGE_WEIGHT_MOMENTUM: f64 = 0.3;
pub const LEVERAGE_WEIGHT_PERSUASION: f64 = 0.4;
pub const LEVERAGE_WEIGHT_RESILIENCE: f64 = 0.3;

/// Events processed at which score confidence saturates
pub const CONFIDENCE_SATURATION_EVENTS: u64 = 50;

// =============================================================================
// DIFF SIGNIFICANCE BANDS [C]
// =============================================================================

/// Momentum/score delta at or above which a change is High
pub const DIFF_HIGH_DELTA: i64 = 10;

/// Momentum/score delta at or above which a change is Medium
pub const DIFF_MEDIUM_DELTA: i64 = 5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
