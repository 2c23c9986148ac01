//! Elicitation engine - drives one symptom-gathering session.
//!
//! The engine is a state machine driven by discrete external events: one
//! call to `handle_line` per user answer, no blocking I/O. Any front end
//! (console, GUI, simulator) can run a session through the same contract.
//!
//! The next question is strictly positional: the schema entry immediately
//! after the last answered symptom. The walk stops when the schema runs out
//! or the answer cap is reached, and the classifier only runs once enough
//! yes answers have accumulated.

use crate::answers::AnswerSet;
use crate::context::TriageContext;
use crate::report::{DiagnosisReport, DiagnosisReporter};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Sentinel token that abandons the session
pub const DONE_TOKEN: &str = "done";

/// Interpret free-text yes/no input. Anything that is not an affirmative
/// token counts as "no" - a deliberate leniency policy, never an error.
pub fn parse_yes_no(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "yes" | "y")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineState {
    AwaitingFirstSymptom,
    AwaitingFirstResponse { symptom: String },
    AwaitingNextResponse { symptom: String },
    Closed,
}

/// What the engine wants from the front end after an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineReply {
    /// Ask a yes/no question about a symptom
    AskYesNo { symptom: String },
    /// First symptom was not recognized; ask for a symptom name again
    UnknownSymptom { input: String },
    /// The session is over
    Finished { outcome: SessionOutcome },
}

/// Terminal result of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionOutcome {
    Diagnosed { report: DiagnosisReport },
    InsufficientEvidence { yes_count: usize },
    PredictionFailed { reason: String },
    Abandoned,
}

pub struct ElicitationEngine<'a> {
    ctx: &'a TriageContext,
    session_id: String,
    state: EngineState,
    answers: AnswerSet,
    last_outcome: Option<SessionOutcome>,
}

impl<'a> ElicitationEngine<'a> {
    pub fn new(ctx: &'a TriageContext) -> Self {
        Self {
            ctx,
            session_id: Uuid::new_v4().to_string(),
            state: EngineState::AwaitingFirstSymptom,
            answers: AnswerSet::new(),
            last_outcome: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.state == EngineState::Closed
    }

    /// The prompt shown before the first event
    pub fn opening_prompt(&self) -> String {
        format!("Enter a symptom to begin (or '{}' to finish)", DONE_TOKEN)
    }

    /// Feed one line of user input; exactly one event per answer
    pub fn handle_line(&mut self, input: &str) -> EngineReply {
        let input = input.trim();

        if input.eq_ignore_ascii_case(DONE_TOKEN) {
            debug!(session = %self.session_id, "session abandoned");
            return self.finish(SessionOutcome::Abandoned);
        }

        match self.state.clone() {
            EngineState::AwaitingFirstSymptom => self.handle_first_symptom(input),
            EngineState::AwaitingFirstResponse { symptom }
            | EngineState::AwaitingNextResponse { symptom } => {
                let yes = parse_yes_no(input);
                self.answers.record(&symptom, yes);
                self.advance(&symptom)
            }
            EngineState::Closed => EngineReply::Finished {
                outcome: self
                    .last_outcome
                    .clone()
                    .unwrap_or(SessionOutcome::Abandoned),
            },
        }
    }

    fn handle_first_symptom(&mut self, input: &str) -> EngineReply {
        match self.ctx.schema.symptom_index(input) {
            Some(idx) => {
                // Use the schema's spelling from here on
                let symptom = self.ctx.schema.symptoms()[idx].clone();
                self.state = EngineState::AwaitingFirstResponse {
                    symptom: symptom.clone(),
                };
                EngineReply::AskYesNo { symptom }
            }
            None => {
                warn!(session = %self.session_id, input, "unrecognized symptom");
                EngineReply::UnknownSymptom {
                    input: input.to_string(),
                }
            }
        }
    }

    /// Move the positional walk forward, or classify when it ends
    fn advance(&mut self, answered: &str) -> EngineReply {
        let cap = self.ctx.config.elicitation.effective_max_questions();
        if self.answers.len() >= cap {
            debug!(session = %self.session_id, cap, "answer cap reached");
            return self.classify();
        }

        match self.ctx.schema.next_after(answered) {
            Some(next) => {
                let next = next.to_string();
                self.state = EngineState::AwaitingNextResponse {
                    symptom: next.clone(),
                };
                EngineReply::AskYesNo { symptom: next }
            }
            None => self.classify(),
        }
    }

    fn classify(&mut self) -> EngineReply {
        let min_yes = self.ctx.config.elicitation.effective_min_yes_answers();
        let yes_count = self.answers.yes_count();

        if yes_count < min_yes {
            debug!(session = %self.session_id, yes_count, min_yes, "insufficient evidence");
            return self.finish(SessionOutcome::InsufficientEvidence { yes_count });
        }

        let vector = self.answers.feature_vector(&self.ctx.schema);
        let outcome = match self.ctx.forest.classify(&vector) {
            Ok(label_index) => match DiagnosisReporter::new(self.ctx).report(label_index) {
                Ok(report) => SessionOutcome::Diagnosed { report },
                Err(e) => {
                    warn!(session = %self.session_id, error = %e, "report assembly failed");
                    SessionOutcome::PredictionFailed {
                        reason: e.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "prediction failed");
                SessionOutcome::PredictionFailed {
                    reason: e.to_string(),
                }
            }
        };
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: SessionOutcome) -> EngineReply {
        self.state = EngineState::Closed;
        self.last_outcome = Some(outcome.clone());
        EngineReply::Finished { outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_yes_no_counts_as_no() {
        assert!(parse_yes_no("yes"));
        assert!(parse_yes_no(" YES "));
        assert!(parse_yes_no("y"));
        assert!(!parse_yes_no("no"));
        assert!(!parse_yes_no("maybe"));
        assert!(!parse_yes_no(""));
        assert!(!parse_yes_no("yes please"));
    }
}
