//! Wire types for the advisory API
//!
//! Request and response shapes exchanged with the remote analysis services.
//! Field names follow the backend contract (snake_case JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text symptom description submitted for analysis
#[derive(Debug, Clone, Serialize)]
pub struct SymptomCheckRequest {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// A symptom the backend extracted from the free text
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymptomSuggestion {
    pub name: String,
    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

/// Structured result of a symptom check
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SymptomCheckResult {
    pub extracted_symptoms: Vec<SymptomSuggestion>,
    pub suggested_actions: Vec<String>,
    pub caution_flags: Vec<String>,
}

/// Medical-claim text submitted for a misinformation scan
#[derive(Debug, Clone, Serialize)]
pub struct MisinformationScanRequest {
    pub text: String,
}

/// Risk classification for a single claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimRisk {
    Info,
    Low,
    Medium,
    High,
}

/// Assessment of one claim found in the scanned text
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClaimAssessment {
    pub claim: String,
    pub risk: ClaimRisk,
    pub rationale: String,
    #[serde(default)]
    pub references: Vec<String>,
}

/// Structured result of a misinformation scan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MisinformationScanResult {
    pub high_risk_count: u32,
    pub summary: String,
    pub assessments: Vec<ClaimAssessment>,
}

/// One cluster from the symptom-pattern summary
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymptomPatternCluster {
    pub label: i64,
    pub count: u64,
    pub terms: Vec<String>,
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityLogEntry {
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub result_summary: Option<String>,
}

/// User verdict on a feature's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Up,
    Down,
    Neutral,
}

/// Fire-and-forget feedback submission
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEvent {
    /// Feature the feedback refers to, e.g. "symptom_check"
    pub context: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
