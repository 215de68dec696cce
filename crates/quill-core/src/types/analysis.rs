//! Analysis result returned by the review pipeline.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Summary used by the sentinel result when the model reply cannot be parsed.
pub const PARSE_ERROR_SUMMARY: &str = "Error parsing AI response.";

/// Sentinel summary used by the standalone analysis module of earlier
/// releases. Kept selectable through `Analyzer::with_fallback_summary`
/// until consumers agree on a single wording.
pub const LEGACY_PARSE_ERROR_SUMMARY: &str = "Parsing error";

/// Overall tone of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[default]
    Unknown,
}

impl Sentiment {
    /// Map a free-form label to a sentiment. Anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Unknown,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Sentiment::from_label(&label))
    }
}

/// Grammar, tone and compliance review of a document.
///
/// Always serialized with the same five keys, whether it came from a
/// parsed model reply or from [`AnalysisResult::parse_failure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Brief overview of the document.
    pub summary: String,
    /// Grammar score between 0 and 100. Kept as a JSON number so an
    /// integer reply stays an integer on the wire.
    pub grammar_score: serde_json::Number,
    /// Overall tone.
    pub sentiment: Sentiment,
    /// Structural and formatting recommendations, in model order.
    pub recommendations: Vec<String>,
    /// Compliance score, usually a percentage such as `"95%"`.
    #[serde(deserialize_with = "string_or_number")]
    pub compliance_score: String,
}

impl AnalysisResult {
    /// Sentinel result substituted when the model reply is unusable.
    pub fn parse_failure(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            grammar_score: serde_json::Number::from(0),
            sentiment: Sentiment::Unknown,
            recommendations: Vec::new(),
            compliance_score: "N/A".to_string(),
        }
    }

    /// Check whether this is a sentinel result.
    pub fn is_parse_failure(&self) -> bool {
        self.sentiment == Sentiment::Unknown
            && self.recommendations.is_empty()
            && self.compliance_score == "N/A"
            && self.grammar_score.as_u64() == Some(0)
            && (self.summary == PARSE_ERROR_SUMMARY || self.summary == LEGACY_PARSE_ERROR_SUMMARY)
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::parse_failure(PARSE_ERROR_SUMMARY)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for compliance_score, got {}",
            other
        ))),
    }
}
