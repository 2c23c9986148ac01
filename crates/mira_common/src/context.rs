//! Triage context - the collaborators loaded once at startup.
//!
//! Schema, classifier, and knowledge base are immutable for the process
//! lifetime and passed by reference into the engine and reporter; there is
//! no ambient global state. A load failure here is fatal: no session may
//! begin without a trained classifier.

use crate::classifier::Forest;
use crate::config::TriageConfig;
use crate::dataset::{Dataset, LabeledRows};
use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::schema::SymptomSchema;
use tracing::{info, warn};

pub struct TriageContext {
    pub config: TriageConfig,
    pub schema: SymptomSchema,
    pub forest: Forest,
    pub knowledge: KnowledgeBase,
    /// Held-out rows kept for `evaluate`
    pub test_rows: LabeledRows,
}

impl TriageContext {
    /// Assemble from already-built collaborators (tests and simulations)
    pub fn new(
        config: TriageConfig,
        schema: SymptomSchema,
        forest: Forest,
        knowledge: KnowledgeBase,
        test_rows: LabeledRows,
    ) -> Self {
        Self {
            config,
            schema,
            forest,
            knowledge,
            test_rows,
        }
    }

    /// Load the dataset, train the classifier, and load the reference tables
    pub fn load(config: TriageConfig) -> Result<Self> {
        let dataset = Dataset::load(&config.paths.dataset)?;
        let (train, test) = dataset.split(config.training.effective_train_fraction());

        // The persisted split is a convenience artifact, not a precondition
        if let Err(e) = dataset.write_rows(&train, &config.paths.training_out) {
            warn!(error = %e, "could not persist training split");
        }
        if let Err(e) = dataset.write_rows(&test, &config.paths.testing_out) {
            warn!(error = %e, "could not persist testing split");
        }

        let forest = Forest::train(
            &train,
            config.training.effective_trees(),
            config.training.effective_max_depth(),
            config.training.seed,
        )?;
        info!(
            trees = forest.num_trees(),
            features = forest.num_features(),
            train_rows = train.len(),
            test_rows = test.len(),
            "classifier trained"
        );

        let knowledge = KnowledgeBase::load(
            &config.paths.precautions,
            &config.paths.severity,
            &config.paths.description,
        )?;

        Ok(Self {
            schema: dataset.schema().clone(),
            config,
            forest,
            knowledge,
            test_rows: test,
        })
    }
}
