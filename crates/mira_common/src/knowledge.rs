//! Knowledge base - precaution, severity, and description lookups keyed by
//! disease name.
//!
//! All three tables share one scanner: a linear walk over the rows matching
//! the first field case-insensitively, first match wins. A missing entry is
//! not an error; callers get an empty payload instead.

use crate::error::{MiraError, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One loaded reference table
#[derive(Debug, Clone, Default)]
struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MiraError::Knowledge(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        debug!(path = %path.display(), rows = rows.len(), "reference table loaded");
        Ok(Self { rows })
    }

    fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// First row whose key field matches, mapped to a payload. Scan
    /// short-circuits on the first hit. Rows without a payload are skipped.
    fn lookup<T>(&self, key: &str, map: impl FnOnce(&[String]) -> T) -> Option<T> {
        let key = key.trim();
        self.rows
            .iter()
            .find(|r| r.len() >= 2 && r[0].trim().eq_ignore_ascii_case(key))
            .map(|r| map(&r[1..]))
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    precautions: Table,
    severity: Table,
    description: Table,
}

impl KnowledgeBase {
    /// Load the three reference tables from disk
    pub fn load(precautions: &Path, severity: &Path, description: &Path) -> Result<Self> {
        Ok(Self {
            precautions: Table::load(precautions)?,
            severity: Table::load(severity)?,
            description: Table::load(description)?,
        })
    }

    /// Build from in-memory rows (tests and simulations)
    pub fn from_rows(
        precautions: Vec<Vec<String>>,
        severity: Vec<Vec<String>>,
        description: Vec<Vec<String>>,
    ) -> Self {
        Self {
            precautions: Table::from_rows(precautions),
            severity: Table::from_rows(severity),
            description: Table::from_rows(description),
        }
    }

    /// Precaution list for a disease; empty when unknown
    pub fn precautions(&self, disease: &str) -> Vec<String> {
        self.precautions
            .lookup(disease, |payload| {
                payload
                    .iter()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Severity score for a disease; `None` when unknown or non-numeric
    pub fn severity(&self, disease: &str) -> Option<i32> {
        self.severity
            .lookup(disease, |payload| payload[0].trim().parse::<i32>().ok())
            .flatten()
    }

    /// Description text for a disease; empty when unknown. Payload fields
    /// are rejoined with ", " since descriptions may contain commas.
    pub fn description(&self, disease: &str) -> String {
        self.description
            .lookup(disease, |payload| {
                payload
                    .iter()
                    .map(|p| p.trim())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::from_rows(
            vec![
                vec![
                    "Flu".to_string(),
                    "rest".to_string(),
                    "drink fluids".to_string(),
                    "".to_string(),
                ],
                vec!["Flu".to_string(), "shadowed entry".to_string()],
            ],
            vec![
                vec!["Flu".to_string(), "5".to_string()],
                vec!["Migraine".to_string(), "not-a-number".to_string()],
            ],
            vec![vec![
                "Flu".to_string(),
                "An acute viral infection".to_string(),
                "often seasonal".to_string(),
            ]],
        )
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let kb = kb();
        assert_eq!(kb.precautions("Flu"), kb.precautions("flu"));
        assert_eq!(kb.severity("FLU"), Some(5));
        assert_eq!(kb.description("fLu"), kb.description("Flu"));
    }

    #[test]
    fn first_match_wins() {
        let kb = kb();
        assert_eq!(kb.precautions("flu"), vec!["rest", "drink fluids"]);
    }

    #[test]
    fn missing_disease_yields_empty_payloads() {
        let kb = kb();
        assert!(kb.precautions("RareX").is_empty());
        assert_eq!(kb.severity("RareX"), None);
        assert_eq!(kb.description("RareX"), "");
    }

    #[test]
    fn non_numeric_severity_is_unknown() {
        let kb = kb();
        assert_eq!(kb.severity("Migraine"), None);
    }

    #[test]
    fn description_fields_rejoin_with_commas() {
        let kb = kb();
        assert_eq!(kb.description("Flu"), "An acute viral infection, often seasonal");
    }
}
