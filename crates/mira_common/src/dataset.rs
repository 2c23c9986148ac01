//! Dataset loading and train/test splitting.
//!
//! The dataset is delimited text: a header row naming the symptom columns
//! (last column = class attribute), then one row per labeled case with 0/1
//! symptom values and the disease name in the final field. The split is
//! positional (first fraction trains, remainder tests) and both halves are
//! written back out for inspection.

use crate::error::{MiraError, Result};
use crate::schema::SymptomSchema;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Feature rows with numeric label indices. `label_names` maps an index back
/// to the disease name; both split halves share the same mapping.
#[derive(Debug, Clone)]
pub struct LabeledRows {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    pub label_names: Vec<String>,
}

impl LabeledRows {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    schema: SymptomSchema,
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    label_names: Vec<String>,
}

impl Dataset {
    /// Load a dataset from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MiraError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;
        let mut rdr = csv::Reader::from_reader(file);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let schema = SymptomSchema::from_columns(headers)?;
        let width = schema.len();

        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut label_names: Vec<String> = Vec::new();

        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() != width + 1 {
                return Err(MiraError::Dataset(format!(
                    "{} row {}: expected {} fields, got {}",
                    path.display(),
                    line + 2,
                    width + 1,
                    record.len()
                )));
            }

            let mut row = Vec::with_capacity(width);
            for (col, field) in record.iter().take(width).enumerate() {
                let value: f64 = field.trim().parse().map_err(|_| {
                    MiraError::Dataset(format!(
                        "{} row {}, column {}: non-numeric value {:?}",
                        path.display(),
                        line + 2,
                        schema.symptoms()[col],
                        field
                    ))
                })?;
                row.push(value);
            }

            let disease = record
                .get(width)
                .map(|f| f.trim().to_string())
                .unwrap_or_default();
            if disease.is_empty() {
                return Err(MiraError::Dataset(format!(
                    "{} row {}: empty class label",
                    path.display(),
                    line + 2
                )));
            }

            let label = match label_names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(&disease))
            {
                Some(i) => i,
                None => {
                    label_names.push(disease);
                    label_names.len() - 1
                }
            };

            features.push(row);
            labels.push(label);
        }

        if features.is_empty() {
            return Err(MiraError::Dataset(format!(
                "{}: no data rows",
                path.display()
            )));
        }

        info!(
            rows = features.len(),
            symptoms = schema.len(),
            diseases = label_names.len(),
            "dataset loaded"
        );

        Ok(Self {
            schema,
            features,
            labels,
            label_names,
        })
    }

    pub fn schema(&self) -> &SymptomSchema {
        &self.schema
    }

    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Split rows positionally: the first `train_fraction` trains, the rest
    /// tests. Both halves carry the full label-name mapping.
    pub fn split(&self, train_fraction: f64) -> (LabeledRows, LabeledRows) {
        let cut = ((self.features.len() as f64) * train_fraction) as usize;
        let cut = cut.clamp(1, self.features.len());

        let train = LabeledRows {
            features: self.features[..cut].to_vec(),
            labels: self.labels[..cut].to_vec(),
            label_names: self.label_names.clone(),
        };
        let test = LabeledRows {
            features: self.features[cut..].to_vec(),
            labels: self.labels[cut..].to_vec(),
            label_names: self.label_names.clone(),
        };
        (train, test)
    }

    /// Write a split back out as CSV with the original header
    pub fn write_rows(&self, rows: &LabeledRows, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut wtr = csv::Writer::from_path(path)?;
        let mut header: Vec<&str> = self.schema.symptoms().iter().map(|s| s.as_str()).collect();
        header.push(self.schema.class_attribute());
        wtr.write_record(&header)?;

        for (row, &label) in rows.features.iter().zip(rows.labels.iter()) {
            let mut record: Vec<String> = row.iter().map(|v| format!("{}", v)).collect();
            record.push(
                rows.label_names
                    .get(label)
                    .cloned()
                    .unwrap_or_default(),
            );
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "feverish,cough,fatigue,headache,prognosis").unwrap();
        for _ in 0..4 {
            writeln!(file, "1,1,1,0,Flu").unwrap();
            writeln!(file, "0,0,1,1,Migraine").unwrap();
        }
        writeln!(file, "1,1,1,0,Flu").unwrap();
        writeln!(file, "0,0,1,1,Migraine").unwrap();
        file
    }

    #[test]
    fn header_becomes_schema_with_class_last() {
        let file = sample_csv();
        let dataset = Dataset::load(file.path()).expect("load");
        assert_eq!(dataset.schema().class_attribute(), "prognosis");
        assert_eq!(dataset.schema().len(), 4);
        assert_eq!(dataset.label_names(), &["Flu", "Migraine"]);
        assert_eq!(dataset.len(), 10);
    }

    #[test]
    fn split_is_positional_and_shares_labels() {
        let file = sample_csv();
        let dataset = Dataset::load(file.path()).expect("load");
        let (train, test) = dataset.split(0.8);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(train.label_names, test.label_names);
    }

    #[test]
    fn non_numeric_symptom_value_is_rejected() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "cough,prognosis").unwrap();
        writeln!(file, "maybe,Flu").unwrap();
        assert!(Dataset::load(file.path()).is_err());
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "cough,fatigue,prognosis").unwrap();
        writeln!(file, "1,Flu").unwrap();
        assert!(Dataset::load(file.path()).is_err());
    }

    #[test]
    fn split_round_trips_through_write() {
        let file = sample_csv();
        let dataset = Dataset::load(file.path()).expect("load");
        let (train, _) = dataset.split(0.8);

        let out = NamedTempFile::new().expect("temp file");
        dataset.write_rows(&train, out.path()).expect("write");

        let reloaded = Dataset::load(out.path()).expect("reload");
        assert_eq!(reloaded.len(), train.len());
        assert_eq!(reloaded.schema().len(), dataset.schema().len());
    }
}
