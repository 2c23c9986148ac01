//! Diagnosis reporting - turns a raw label index into the enriched,
//! user-facing result.
//!
//! The three knowledge lookups are independent: a miss in one table never
//! blocks the other two.

use crate::context::TriageContext;
use crate::error::{MiraError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity advisory, a pure threshold over the severity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityAdvice {
    High,
    Moderate,
}

impl SeverityAdvice {
    /// Classify a severity score; unknown counts as moderate
    pub fn from_score(score: Option<i32>, alert_threshold: i32) -> Self {
        match score {
            Some(s) if s > alert_threshold => Self::High,
            _ => Self::Moderate,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::High => {
                "Severity level is high. You should take consultation from a doctor."
            }
            Self::Moderate => {
                "Severity level is moderate. It might not be that bad, but you should take precautions."
            }
        }
    }
}

/// The enriched diagnosis shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub disease: String,
    pub precautions: Vec<String>,
    pub severity: Option<i32>,
    pub severity_advice: SeverityAdvice,
    pub description: String,
    pub generated_at: DateTime<Utc>,
}

impl DiagnosisReport {
    /// Render human-readable summary for the console transcript
    pub fn render_summary(&self) -> String {
        let mut lines = vec![format!("Predicted Disease: {}", self.disease), String::new()];

        lines.push("Precautions:".into());
        if self.precautions.is_empty() {
            lines.push("  (none on record)".into());
        } else {
            for p in &self.precautions {
                lines.push(format!("  - {}", p));
            }
        }

        lines.push("Severity:".into());
        lines.push(format!("  - {}", self.severity_advice.message()));

        lines.push("Description:".into());
        if self.description.is_empty() {
            lines.push("  (none on record)".into());
        } else {
            lines.push(format!("  - {}", self.description));
        }

        lines.join("\n")
    }
}

/// Composes the classifier verdict with the knowledge base
pub struct DiagnosisReporter<'a> {
    ctx: &'a TriageContext,
}

impl<'a> DiagnosisReporter<'a> {
    pub fn new(ctx: &'a TriageContext) -> Self {
        Self { ctx }
    }

    /// Resolve a predicted label index into a full report
    pub fn report(&self, label_index: usize) -> Result<DiagnosisReport> {
        let disease = self
            .ctx
            .forest
            .label_name(label_index)
            .ok_or_else(|| {
                MiraError::Classifier(format!("label index {} out of range", label_index))
            })?
            .to_string();

        let precautions = self.ctx.knowledge.precautions(&disease);
        let severity = self.ctx.knowledge.severity(&disease);
        let description = self.ctx.knowledge.description(&disease);
        let severity_advice = SeverityAdvice::from_score(
            severity,
            self.ctx.config.elicitation.severity_alert_threshold,
        );

        Ok(DiagnosisReport {
            disease,
            precautions,
            severity,
            severity_advice,
            description,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_threshold_is_pure() {
        assert_eq!(SeverityAdvice::from_score(Some(4), 3), SeverityAdvice::High);
        assert_eq!(SeverityAdvice::from_score(Some(7), 3), SeverityAdvice::High);
        assert_eq!(
            SeverityAdvice::from_score(Some(3), 3),
            SeverityAdvice::Moderate
        );
        assert_eq!(
            SeverityAdvice::from_score(Some(0), 3),
            SeverityAdvice::Moderate
        );
        assert_eq!(SeverityAdvice::from_score(None, 3), SeverityAdvice::Moderate);
    }

    #[test]
    fn summary_renders_missing_enrichment() {
        let report = DiagnosisReport {
            disease: "RareX".to_string(),
            precautions: vec![],
            severity: None,
            severity_advice: SeverityAdvice::Moderate,
            description: String::new(),
            generated_at: Utc::now(),
        };
        let summary = report.render_summary();
        assert!(summary.contains("RareX"));
        assert!(summary.contains("(none on record)"));
        assert!(summary.contains("moderate"));
    }
}
