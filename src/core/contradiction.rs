//! Contradiction Analyzer: compares testimony against prior material
//!
//! Three independent detectors run against recorded findings (keyword
//! negation, amount divergence, date divergence) plus a separate entry
//! point for prior-statement comparison. Detectors intentionally
//! overlap; downstream consumers deduplicate or treat the redundancy as
//! corroboration. Unparseable amounts or dates are skipped silently -
//! partial detection is expected.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::types::{
    Contradiction, ContradictionKind, ContradictionSource, ContradictionStrength, Finding,
    PriorStatement, TestimonyEvent,
};
use crate::{
    AMOUNT_DIVERGENCE_MODERATE, AMOUNT_DIVERGENCE_STRONG, FINDING_CONFIDENCE_STRONG,
    KEYWORD_MIN_LEN,
};

lazy_static! {
    // Negation immediately preceding a content word ("not X", "never X")
    static ref RE_NEGATED_WORD: Regex = Regex::new(
        r"(?i)\b(?:not|never|no|didn't|did not|don't|do not|doesn't|does not|wasn't|was not|haven't|have not)\s+(\w+)"
    ).unwrap();

    // Negation followed by a 2-3 word phrase
    static ref RE_NEGATED_PHRASE: Regex = Regex::new(
        r"(?i)\b(?:never|not|didn't|did not|don't|do not)\s+(\w+\s+\w+(?:\s+\w+)?)"
    ).unwrap();

    // Monetary-amount-shaped substrings: "$9,500", "$12.40", "9500 dollars"
    static ref RE_AMOUNT: Regex = Regex::new(
        r"\$\s?(\d[\d,]*(?:\.\d+)?)|(\d[\d,]*(?:\.\d+)?)\s?(?:dollars|usd)\b"
    ).unwrap();

    // Date-shaped substrings: 3/15/2024, 2024-03-15, March 15, 2024
    static ref RE_DATE: Regex = Regex::new(
        r"(?i)\b(?:\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{2}-\d{2}|(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}(?:,\s*\d{4})?)\b"
    ).unwrap();

    // Claimed memory failure
    static ref RE_RECALL_FAILURE: Regex = Regex::new(
        r"(?i)\bi\s+(?:don't|do not|can't|cannot|don't really)\s+(?:recall|remember)\b|\bno recollection\b"
    ).unwrap();
}

/// Tokens carrying no content; filtered before keyword matching
const STOPWORDS: &[&str] = &[
    "that", "this", "with", "from", "have", "been", "were", "will", "would", "could", "should",
    "their", "there", "about", "which", "when", "what", "then", "than", "them", "they", "some",
    "very", "into", "over", "under", "after", "before", "because", "while", "where", "these",
    "those", "here", "also", "such", "each", "other", "more", "most", "said",
];

/// Contradiction analyzer over findings and prior statements
#[derive(Debug, Default)]
pub struct ContradictionAnalyzer;

impl ContradictionAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Run the finding-based detectors against one event.
    ///
    /// `prior_contradictions` suppresses exact repeats of what has
    /// already been recorded this session.
    pub fn detect_contradictions(
        &self,
        event: &TestimonyEvent,
        findings: &[Finding],
        prior_contradictions: &[Contradiction],
    ) -> Vec<Contradiction> {
        let mut found = Vec::new();

        for finding in findings {
            if let Some(c) = self.keyword_negation(event, finding) {
                found.push(c);
            }
            if let Some(c) = self.amount_divergence(event, finding) {
                found.push(c);
            }
            if let Some(c) = self.date_divergence(event, finding) {
                found.push(c);
            }
        }

        found.retain(|c| !is_already_recorded(c, prior_contradictions));
        found
    }

    /// Detector 1: negation in the event of a keyword the finding asserts
    /// positively. Strength tracks the finding's confidence.
    fn keyword_negation(&self, event: &TestimonyEvent, finding: &Finding) -> Option<Contradiction> {
        let event_negated = negated_words(&event.text);
        if event_negated.is_empty() {
            return None;
        }
        let finding_negated = negated_words(&finding.text);

        content_keywords(&finding.text)
            .into_iter()
            .find(|kw| event_negated.contains(kw) && !finding_negated.contains(kw))?;

        let strength = if finding.confidence > FINDING_CONFIDENCE_STRONG {
            ContradictionStrength::Strong
        } else {
            ContradictionStrength::Moderate
        };

        Some(Contradiction {
            statement: event.text.clone(),
            contradicts: ContradictionSource::Finding {
                finding_id: finding.id.clone(),
            },
            evidence_ref: finding.source.clone(),
            kind: ContradictionKind::Direct,
            strength,
            exploited: false,
        })
    }

    /// Detector 2: first extracted amounts diverge by more than 20%
    /// (strong above 50%). Relative difference uses the larger amount
    /// as denominator.
    fn amount_divergence(&self, event: &TestimonyEvent, finding: &Finding) -> Option<Contradiction> {
        let event_amount = first_amount(&event.text)?;
        let finding_amount = first_amount(&finding.text)?;

        let larger = event_amount.max(finding_amount);
        if larger <= 0.0 {
            return None;
        }
        let divergence = (event_amount - finding_amount).abs() / larger;
        if divergence <= AMOUNT_DIVERGENCE_MODERATE {
            return None;
        }

        let strength = if divergence > AMOUNT_DIVERGENCE_STRONG {
            ContradictionStrength::Strong
        } else {
            ContradictionStrength::Moderate
        };

        Some(Contradiction {
            statement: event.text.clone(),
            contradicts: ContradictionSource::Finding {
                finding_id: finding.id.clone(),
            },
            evidence_ref: finding.source.clone(),
            kind: ContradictionKind::Inconsistent,
            strength,
            exploited: false,
        })
    }

    /// Detector 3: both sides carry a date and the first ones differ
    fn date_divergence(&self, event: &TestimonyEvent, finding: &Finding) -> Option<Contradiction> {
        let event_date = first_date(&event.text)?;
        let finding_date = first_date(&finding.text)?;
        if event_date == finding_date {
            return None;
        }

        Some(Contradiction {
            statement: event.text.clone(),
            contradicts: ContradictionSource::Finding {
                finding_id: finding.id.clone(),
            },
            evidence_ref: finding.source.clone(),
            kind: ContradictionKind::Inconsistent,
            strength: ContradictionStrength::Moderate,
            exploited: false,
        })
    }

    /// Separate entry point: compare against prior statements by the
    /// same speaker.
    pub fn compare_with_prior_statements(
        &self,
        event: &TestimonyEvent,
        priors: &[PriorStatement],
    ) -> Vec<Contradiction> {
        let mut found = Vec::new();

        for prior in priors.iter().filter(|p| p.speaker == event.speaker) {
            // Claimed memory failure vs concrete prior content on a shared topic
            if RE_RECALL_FAILURE.is_match(&event.text)
                && shares_topic(&event.topics, &prior.topics)
                && has_concrete_content(&prior.content)
            {
                found.push(Contradiction {
                    statement: event.text.clone(),
                    contradicts: prior_source(prior),
                    evidence_ref: format!("{} of {}", prior.source, prior.date.format("%Y-%m-%d")),
                    kind: ContradictionKind::Omission,
                    strength: ContradictionStrength::Moderate,
                    exploited: false,
                });
            }

            // Direct negation of a phrase the prior statement asserts
            let prior_lower = prior.content.to_lowercase();
            for cap in RE_NEGATED_PHRASE.captures_iter(&event.text) {
                let phrase = cap[1].to_lowercase();
                if prior_lower.contains(&phrase) && !negates_phrase(&prior_lower, &phrase) {
                    found.push(Contradiction {
                        statement: event.text.clone(),
                        contradicts: prior_source(prior),
                        evidence_ref: format!(
                            "{} of {}",
                            prior.source,
                            prior.date.format("%Y-%m-%d")
                        ),
                        kind: ContradictionKind::Direct,
                        strength: ContradictionStrength::Strong,
                        exploited: false,
                    });
                    break;
                }
            }
        }

        found
    }
}

fn prior_source(prior: &PriorStatement) -> ContradictionSource {
    ContradictionSource::PriorStatement {
        source: prior.source,
        date: prior.date.format("%Y-%m-%d").to_string(),
    }
}

/// Words appearing right after a negation, lowercased
fn negated_words(text: &str) -> HashSet<String> {
    RE_NEGATED_WORD
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect()
}

/// Stopword-filtered content tokens longer than KEYWORD_MIN_LEN
fn content_keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.len() > KEYWORD_MIN_LEN)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// First monetary amount in the text, if one parses
fn first_amount(text: &str) -> Option<f64> {
    let cap = RE_AMOUNT.captures(text)?;
    let raw = cap.get(1).or_else(|| cap.get(2))?.as_str().replace(',', "");
    raw.parse::<f64>().ok()
}

/// First date-shaped substring, normalized for comparison
fn first_date(text: &str) -> Option<String> {
    RE_DATE
        .find(text)
        .map(|m| m.as_str().to_lowercase().replace(',', ""))
}

fn shares_topic(event_topics: &[String], prior_topics: &[String]) -> bool {
    event_topics
        .iter()
        .any(|t| prior_topics.iter().any(|p| p.eq_ignore_ascii_case(t)))
}

/// Prior content counts as concrete when it is substantive and not
/// itself an evasion
fn has_concrete_content(content: &str) -> bool {
    content.split_whitespace().count() >= 8 && !RE_RECALL_FAILURE.is_match(content)
}

/// True when the text negates this exact phrase
fn negates_phrase(text_lower: &str, phrase: &str) -> bool {
    for cap in RE_NEGATED_PHRASE.captures_iter(text_lower) {
        if cap[1].to_lowercase() == phrase {
            return true;
        }
    }
    false
}

fn is_already_recorded(candidate: &Contradiction, recorded: &[Contradiction]) -> bool {
    recorded.iter().any(|r| {
        r.statement == candidate.statement
            && r.contradicts == candidate.contradicts
            && r.kind == candidate.kind
    })
}

// =============================================================================
// TESTS
// =============================================================================
