//! JSON parsing helpers for AI backend responses
//!
//! Model output often wraps the JSON payload in prose or code fences, so the
//! object between the first `{` and the last `}` is extracted first.

use serde::Deserialize;

use crate::error::{Error, Result};

use super::types::{Recommendation, RecommendationType};

/// Priority used when the model omits or garbles one
const DEFAULT_PRIORITY: u8 = 3;

#[derive(Debug, Deserialize)]
struct RecommendationEnvelope {
    #[serde(default)]
    recommendations: Vec<RawRecommendation>,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", alias = "recommendation_type", default)]
    kind: String,
    #[serde(default)]
    priority: serde_json::Value,
}

/// Extract the outermost JSON object from a model response
fn extract_json(response: &str) -> Result<&str> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            truncate_raw(response)
        ))),
    }
}

fn truncate_raw(s: &str) -> String {
    if s.chars().count() > 200 {
        format!("{}...", s.chars().take(200).collect::<String>())
    } else {
        s.to_string()
    }
}

fn parse_priority(value: &serde_json::Value) -> u8 {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(p) if p.is_finite() => p.round().clamp(1.0, 5.0) as u8,
        _ => DEFAULT_PRIORITY,
    }
}

/// Parse recommendations from an AI response
///
/// Entries without a title or with an unknown type are dropped. Priorities are
/// clamped to 1-5 and the result is sorted most urgent first.
pub fn parse_recommendations(response: &str) -> Result<Vec<Recommendation>> {
    let json_str = extract_json(response)?;
    let envelope: RecommendationEnvelope = serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid recommendations JSON from AI: {} | Raw: {}",
            e,
            truncate_raw(json_str)
        ))
    })?;

    let mut recommendations: Vec<Recommendation> = envelope
        .recommendations
        .into_iter()
        .filter_map(|raw| {
            let title = raw.title.trim().to_string();
            if title.is_empty() {
                tracing::warn!("Dropping recommendation without a title");
                return None;
            }
            let recommendation_type = match raw.kind.parse::<RecommendationType>() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "Dropping recommendation");
                    return None;
                }
            };
            Some(Recommendation {
                title,
                description: raw.description.trim().to_string(),
                recommendation_type,
                priority: parse_priority(&raw.priority),
            })
        })
        .collect();

    if recommendations.is_empty() {
        return Err(Error::Ai("No valid recommendations in AI response".into()));
    }

    recommendations.sort_by_key(|r| r.priority);
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wrapped_response() {
        let response = r#"Here are your recommendations:
```json
{"recommendations": [
  {"title": "Pay down card", "description": "High APR", "type": "debt", "priority": 2},
  {"title": "Emergency fund", "description": "Three months", "type": "Savings", "priority": 1},
  {"title": "Index funds", "description": "Low cost", "type": "investment", "priority": "4"}
]}
```"#;

        let recs = parse_recommendations(response).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title, "Emergency fund");
        assert_eq!(recs[0].recommendation_type, RecommendationType::Savings);
        assert_eq!(recs[1].priority, 2);
        assert_eq!(recs[2].priority, 4);
    }

    #[test]
    fn test_priority_clamped_and_defaulted() {
        let response = r#"{"recommendations": [
            {"title": "A", "type": "budgeting", "priority": 9},
            {"title": "B", "type": "insurance", "priority": 0},
            {"title": "C", "type": "savings"}
        ]}"#;

        let recs = parse_recommendations(response).unwrap();
        let priorities: Vec<u8> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 3, 5]);
        assert_eq!(recs[0].title, "B");
    }

    #[test]
    fn test_invalid_entries_dropped() {
        let response = r#"{"recommendations": [
            {"title": "", "type": "savings", "priority": 1},
            {"title": "Crypto moonshot", "type": "gambling", "priority": 1},
            {"title": "Budget", "type": "budget", "priority": 2}
        ]}"#;
        let recs = parse_recommendations(response).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].recommendation_type, RecommendationType::Budgeting);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_recommendations("no json here"),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            parse_recommendations(r#"{"recommendations": "nope"}"#),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            parse_recommendations(r#"{"recommendations": []}"#),
            Err(Error::Ai(_))
        ));
    }
}
