//! End-to-end: collaborators loaded from disk, one full session.

use mira_common::config::TriageConfig;
use mira_common::context::TriageContext;
use mira_common::engine::{ElicitationEngine, EngineReply, SessionOutcome};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_fixtures(dir: &Path) -> TriageConfig {
    let dataset = dir.join("dataset.csv");
    let mut rows = String::from("feverish,cough,fatigue,headache,prognosis\n");
    for _ in 0..5 {
        rows.push_str("1,1,1,0,Flu\n");
        rows.push_str("0,0,1,1,Migraine\n");
    }
    fs::write(&dataset, rows).expect("write dataset");

    let precautions = dir.join("symptom_precaution.csv");
    fs::write(&precautions, "Flu,rest,drink fluids,avoid crowds\nMigraine,dark room,hydrate\n")
        .expect("write precautions");

    let severity = dir.join("Symptom_severity.csv");
    fs::write(&severity, "Flu,5\nMigraine,2\n").expect("write severity");

    let description = dir.join("symptom_Description.csv");
    fs::write(
        &description,
        "Flu,An acute viral infection of the respiratory tract\nMigraine,A recurrent throbbing headache\n",
    )
    .expect("write description");

    let mut config = TriageConfig::default();
    config.paths.dataset = dataset;
    config.paths.training_out = dir.join("trainingSet.csv");
    config.paths.testing_out = dir.join("testingSet.csv");
    config.paths.precautions = precautions;
    config.paths.severity = severity;
    config.paths.description = description;
    config
}

#[test]
fn load_trains_and_persists_the_split() {
    let dir = TempDir::new().expect("temp dir");
    let config = write_fixtures(dir.path());
    let training_out = config.paths.training_out.clone();
    let testing_out = config.paths.testing_out.clone();

    let ctx = TriageContext::load(config).expect("context");
    assert_eq!(ctx.schema.len(), 4);
    assert_eq!(ctx.schema.class_attribute(), "prognosis");
    assert_eq!(ctx.test_rows.len(), 2);
    assert!(training_out.exists());
    assert!(testing_out.exists());
}

#[test]
fn full_session_from_files_diagnoses_flu() {
    let dir = TempDir::new().expect("temp dir");
    let ctx = TriageContext::load(write_fixtures(dir.path())).expect("context");

    let mut engine = ElicitationEngine::new(&ctx);
    engine.handle_line("feverish");
    engine.handle_line("yes");
    engine.handle_line("yes");
    engine.handle_line("yes");
    let reply = engine.handle_line("no");

    match reply {
        EngineReply::Finished {
            outcome: SessionOutcome::Diagnosed { report },
        } => {
            assert_eq!(report.disease, "Flu");
            assert_eq!(report.precautions.len(), 3);
            assert_eq!(report.severity, Some(5));
            assert!(report.description.contains("respiratory"));
        }
        other => panic!("expected a flu diagnosis, got {:?}", other),
    }
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = write_fixtures(dir.path());
    config.paths.dataset = dir.path().join("absent.csv");
    assert!(TriageContext::load(config).is_err());
}

#[test]
fn missing_reference_table_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let mut config = write_fixtures(dir.path());
    config.paths.severity = dir.path().join("absent.csv");
    assert!(TriageContext::load(config).is_err());
}
