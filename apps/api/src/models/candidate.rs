#![allow(dead_code)]

// Candidate record — the structured per-resume output of the pipeline, plus
// the ranking and CSV helpers the result consumer applies to it. Ranking and
// export happen on the consumer side; the helpers live here because their
// ordering and round-trip behavior are part of the externally visible contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parsed resume, as reported by the inference backend.
///
/// Field names on the wire match the prompt's JSON schema exactly.
/// `TotalExperienceYears` and `FitScoreOutOf100` are kept as raw JSON values:
/// the model sometimes replies with strings ("3"), sometimes with numbers (3),
/// and neither is validated or clamped server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "FullName", default)]
    pub full_name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "SkillsMatched", default)]
    pub skills_matched: Vec<String>,
    #[serde(rename = "TotalExperienceYears", default)]
    pub total_experience_years: Value,
    #[serde(rename = "FitScoreOutOf100", default)]
    pub fit_score_out_of_100: Value,
}

impl CandidateRecord {
    /// Fit score as a number for ranking purposes only.
    /// Missing or non-numeric scores rank as 0; the stored value is untouched.
    pub fn fit_score(&self) -> f64 {
        match &self.fit_score_out_of_100 {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Sorts records by descending fit score. Stable: ties and unscored records
/// keep their relative input order, so sorting a sorted set is a no-op.
pub fn sort_by_fit_score(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| {
        b.fit_score()
            .partial_cmp(&a.fit_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

const CSV_HEADERS: [&str; 6] = [
    "FullName",
    "Email",
    "Phone",
    "SkillsMatched",
    "TotalExperienceYears",
    "FitScoreOutOf100",
];

/// Renders records as CSV with CRLF line endings, skills joined by "; ".
/// No quoting or escaping — a comma inside a field will shift columns, the
/// same as the original export this reproduces.
pub fn to_csv(records: &[CandidateRecord]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADERS.join(","));
    out.push_str("\r\n");
    for record in records {
        let row = [
            record.full_name.clone(),
            record.email.clone(),
            record.phone.clone(),
            record.skills_matched.join("; "),
            value_to_cell(&record.total_experience_years),
            value_to_cell(&record.fit_score_out_of_100),
        ];
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
