//! Testimony event model
//!
//! One utterance in the proceeding, produced by an external
//! transcription/ingestion collaborator. Immutable once created; the
//! ingestion layer validates required fields before events reach the
//! engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase of the proceeding an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    Opening,
    Direct,
    Cross,
    Redirect,
    Closing,
}

impl std::fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrialPhase::Opening => "opening",
            TrialPhase::Direct => "direct",
            TrialPhase::Cross => "cross",
            TrialPhase::Redirect => "redirect",
            TrialPhase::Closing => "closing",
        };
        write!(f, "{}", name)
    }
}

/// Who is speaking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerRole {
    Attorney,
    Witness,
    Judge,
}

impl std::fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpeakerRole::Attorney => "attorney",
            SpeakerRole::Witness => "witness",
            SpeakerRole::Judge => "judge",
        };
        write!(f, "{}", name)
    }
}

/// How the utterance cuts for the represented party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredibilitySignal {
    Helpful,
    Harmful,
    Neutral,
}

/// A single testimony utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonyEvent {
    /// When the utterance occurred
    pub timestamp: DateTime<Utc>,
    /// Phase of the proceeding
    pub phase: TrialPhase,
    /// Role of the speaker
    pub role: SpeakerRole,
    /// Speaker name (e.g., "Dr. Hayes")
    pub speaker: String,
    /// The utterance text
    pub text: String,
    /// Topic tags attached by the ingestion layer
    #[serde(default)]
    pub topics: Vec<String>,
    /// Exhibit identifiers referenced by the utterance
    #[serde(default)]
    pub exhibits: Vec<String>,
    /// Optional credibility assessment from the ingestion layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credibility: Option<CredibilitySignal>,
}

impl TestimonyEvent {
    /// Create an event stamped with the current time
    pub fn new(
        phase: TrialPhase,
        role: SpeakerRole,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            phase,
            role,
            speaker: speaker.into(),
            text: text.into(),
            topics: Vec::new(),
            exhibits: Vec::new(),
            credibility: None,
        }
    }

    /// Attach a credibility signal
    pub fn with_credibility(mut self, signal: CredibilitySignal) -> Self {
        self.credibility = Some(signal);
        self
    }

    /// Attach topic tags
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// Attach exhibit references
    pub fn with_exhibits(mut self, exhibits: Vec<String>) -> Self {
        self.exhibits = exhibits;
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = TestimonyEvent::new(TrialPhase::Cross, SpeakerRole::Witness, "Ms. Vale", "I was there")
            .with_credibility(CredibilitySignal::Harmful)
            .with_topics(vec!["timeline".to_string()]);

        assert_eq!(event.phase, TrialPhase::Cross);
        assert_eq!(event.credibility, Some(CredibilitySignal::Harmful));
        assert_eq!(event.topics.len(), 1);
        assert!(event.exhibits.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let event = TestimonyEvent::new(TrialPhase::Direct, SpeakerRole::Attorney, "Counsel", "Isn't it true?");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"direct\""));
        assert!(json.contains("\"attorney\""));

        let restored: TestimonyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, TrialPhase::Direct);
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{
            "timestamp": "2026-03-01T10:00:00Z",
            "phase": "cross",
            "role": "witness",
            "speaker": "Mr. Ash",
            "text": "I never signed it"
        }"#;
        let event: TestimonyEvent = serde_json::from_str(json).unwrap();
        assert!(event.topics.is_empty());
        assert!(event.credibility.is_none());
    }
}
