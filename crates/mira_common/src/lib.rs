//! Mira Common - core library for the Mira triage assistant
//!
//! Adaptive symptom questioning, feature-vector assembly, a decision-tree
//! ensemble classifier, and keyed knowledge lookups. No I/O with the user
//! happens here; front ends drive the engine through discrete events.

pub mod answers;
pub mod classifier;
pub mod config;
pub mod context;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod report;
pub mod schema;

pub use answers::AnswerSet;
pub use classifier::Forest;
pub use config::TriageConfig;
pub use context::TriageContext;
pub use dataset::{Dataset, LabeledRows};
pub use engine::{ElicitationEngine, EngineReply, SessionOutcome};
pub use error::{MiraError, Result};
pub use knowledge::KnowledgeBase;
pub use report::{DiagnosisReport, DiagnosisReporter, SeverityAdvice};
pub use schema::SymptomSchema;
