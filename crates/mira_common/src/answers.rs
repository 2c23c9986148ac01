//! Answer set - the yes/no evidence gathered during one elicitation session.
//!
//! Keys are stored lowercased so a symptom revisited by the positional walk
//! overwrites its earlier answer instead of duplicating it.

use crate::schema::SymptomSchema;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct AnswerSet {
    values: HashMap<String, bool>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a yes/no answer for a symptom
    pub fn record(&mut self, symptom: &str, yes: bool) {
        self.values.insert(symptom.trim().to_lowercase(), yes);
    }

    pub fn get(&self, symptom: &str) -> Option<bool> {
        self.values.get(&symptom.trim().to_lowercase()).copied()
    }

    /// Number of answered symptoms
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of "yes" answers
    pub fn yes_count(&self) -> usize {
        self.values.values().filter(|v| **v).count()
    }

    /// Dense feature vector in schema order, one slot per symptom feature,
    /// unanswered symptoms default to 0.0.
    pub fn feature_vector(&self, schema: &SymptomSchema) -> Vec<f64> {
        schema
            .symptoms()
            .iter()
            .map(|s| {
                if self.get(s).unwrap_or(false) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SymptomSchema;

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
    fn feature_vector_in_schema_order_with_zero_defaults() {
        let mut answers = AnswerSet::new();
        answers.record("feverish", true);
        answers.record("cough", true);
        answers.record("fatigue", true);

        let vector = answers.feature_vector(&schema());
        assert_eq!(vector, vec![1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn vector_width_matches_symptom_count() {
        let answers = AnswerSet::new();
        let vector = answers.feature_vector(&schema());
        assert_eq!(vector.len(), schema().len());
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn yes_count_ignores_no_answers() {
        let mut answers = AnswerSet::new();
        answers.record("feverish", true);
        answers.record("cough", false);
        answers.record("fatigue", true);
        assert_eq!(answers.yes_count(), 2);
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn revisited_symptom_overwrites() {
        let mut answers = AnswerSet::new();
        answers.record("cough", false);
        answers.record("Cough", true);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("cough"), Some(true));
    }
}
