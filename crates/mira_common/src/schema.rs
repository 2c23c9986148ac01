//! Symptom schema - the ordered feature columns plus the terminal class
//! attribute, fixed at load time.
//!
//! The "next symptom" walk is strictly positional: the entry immediately
//! after the previous symptom's column, never a search over unanswered
//! symptoms.

use crate::error::{MiraError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomSchema {
    symptoms: Vec<String>,
    class_attribute: String,
}

impl SymptomSchema {
    /// Build from an ordered column list; the last column is the class
    /// attribute. Rejects duplicates (case-insensitive).
    pub fn from_columns(columns: Vec<String>) -> Result<Self> {
        if columns.len() < 2 {
            return Err(MiraError::Schema(format!(
                "need at least one symptom column plus the class attribute, got {}",
                columns.len()
            )));
        }

        let mut seen: Vec<String> = Vec::with_capacity(columns.len());
        for col in &columns {
            let lower = col.trim().to_lowercase();
            if lower.is_empty() {
                return Err(MiraError::Schema("empty column name".to_string()));
            }
            if seen.contains(&lower) {
                return Err(MiraError::Schema(format!("duplicate column name: {}", col)));
            }
            seen.push(lower);
        }

        let mut symptoms = columns;
        let class_attribute = symptoms.pop().map(|c| c.trim().to_string()).ok_or_else(|| {
            MiraError::Schema("missing class attribute column".to_string())
        })?;
        let symptoms = symptoms.into_iter().map(|c| c.trim().to_string()).collect();

        Ok(Self {
            symptoms,
            class_attribute,
        })
    }

    /// Ordered symptom feature names (class attribute excluded)
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Name of the terminal class attribute
    pub fn class_attribute(&self) -> &str {
        &self.class_attribute
    }

    /// Number of symptom features
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Case-insensitive position lookup
    pub fn symptom_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.symptoms
            .iter()
            .position(|s| s.eq_ignore_ascii_case(name))
    }

    /// Whether a name is a known symptom feature
    pub fn contains(&self, name: &str) -> bool {
        self.symptom_index(name).is_some()
    }

    /// The symptom asked after `previous`: the schema entry immediately
    /// following its position. `None` when `previous` is the final feature
    /// or is not in the schema.
    pub fn next_after(&self, previous: &str) -> Option<&str> {
        let idx = self.symptom_index(previous)?;
        self.symptoms.get(idx + 1).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SymptomSchema {
        SymptomSchema::from_columns(vec![
            "feverish".to_string(),
            "cough".to_string(),
            "fatigue".to_string(),
            "headache".to_string(),
            "prognosis".to_string(),
        ])
        .expect("valid schema")
    }

    #[test]
    fn class_attribute_is_last_column() {
        let s = schema();
        assert_eq!(s.class_attribute(), "prognosis");
        assert_eq!(s.len(), 4);
        assert_eq!(s.symptoms()[0], "feverish");
    }

    #[test]
    fn next_after_is_positional() {
        let s = schema();
        assert_eq!(s.next_after("feverish"), Some("cough"));
        assert_eq!(s.next_after("cough"), Some("fatigue"));
        assert_eq!(s.next_after("headache"), None);
        assert_eq!(s.next_after("not_a_symptom"), None);
    }

    #[test]
    fn next_after_is_deterministic() {
        let s = schema();
        assert_eq!(s.next_after("cough"), s.next_after("cough"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let s = schema();
        assert_eq!(s.symptom_index("FEVERISH"), Some(0));
        assert!(s.contains("Cough"));
        assert_eq!(s.next_after("Feverish"), Some("cough"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = SymptomSchema::from_columns(vec![
            "cough".to_string(),
            "Cough".to_string(),
            "prognosis".to_string(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn too_few_columns_are_rejected() {
        assert!(SymptomSchema::from_columns(vec!["prognosis".to_string()]).is_err());
    }
}
