//! The three-step assessment workflow.
//!
//! ```text
//!            Start               Submit (all required answers present)
//!  Welcome ────────▶ DataCollection ────────────────────────▶ Results
//!          ◀────────                ◀────────────────────────
//!            Home                              Edit
//! ```
//!
//! Each session owns its step and answers exclusively. Moving back to Welcome keeps the
//! answers so the form is pre-filled on return. There is no terminal step.

use crate::answers::{AnswerUpdate, CollectedAnswers};
use crate::assessment::{self, Assessment};
use crate::error::{WorkflowError, WorkflowResult};
use crate::lab::LabWarning;
use crate::model::Models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A step of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    DataCollection,
    Results,
}

impl Step {
    /// The 1-based position of the step, as shown to the user ("step 2 of 3").
    pub fn number(self) -> u8 {
        match self {
            Step::Welcome => 1,
            Step::DataCollection => 2,
            Step::Results => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Step::Welcome => "welcome",
            Step::DataCollection => "data collection",
            Step::Results => "results",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user action that moves between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Welcome → DataCollection.
    Start,
    /// DataCollection → Results, guarded by the required answers.
    Submit,
    /// DataCollection → Welcome.
    Home,
    /// Results → DataCollection.
    Edit,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Transition::Start => "start",
            Transition::Submit => "submit answers",
            Transition::Home => "return home",
            Transition::Edit => "edit answers",
        })
    }
}

/// One user's pass through the workflow.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    step: Step,
    answers: CollectedAnswers,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a new session on the welcome step with no answers.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            step: Step::Welcome,
            answers: CollectedAnswers::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn answers(&self) -> &CollectedAnswers {
        &self.answers
    }

    /// Apply a transition.
    ///
    /// # Returns
    ///
    /// The step the session is on afterwards.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError` if:
    /// - the transition is not available from the current step,
    /// - `Submit` is attempted while required answers are missing (the missing names
    ///   are reported in display order).
    ///
    /// The step is unchanged on error.
    pub fn apply(&mut self, transition: Transition) -> WorkflowResult<Step> {
        let next = match (self.step, transition) {
            (Step::Welcome, Transition::Start) => Step::DataCollection,
            (Step::DataCollection, Transition::Submit) => {
                let missing = self.answers.missing_required();
                if !missing.is_empty() {
                    return Err(WorkflowError::IncompleteAnswers { missing });
                }
                Step::Results
            }
            (Step::DataCollection, Transition::Home) => Step::Welcome,
            (Step::Results, Transition::Edit) => Step::DataCollection,
            (from, transition) => {
                return Err(WorkflowError::InvalidTransition { from, transition });
            }
        };

        tracing::debug!("session {}: {} -> {}", self.id, self.step, next);
        self.step = next;
        Ok(next)
    }

    /// Merge a partial answer update. Only allowed during data collection.
    ///
    /// # Returns
    ///
    /// Non-blocking lab warnings raised by the update.
    pub fn update_answers(&mut self, update: AnswerUpdate) -> WorkflowResult<Vec<LabWarning>> {
        if self.step != Step::DataCollection {
            return Err(WorkflowError::NotCollecting(self.step));
        }
        Ok(self.answers.apply(update)?)
    }

    /// Recompute the assessment shown on the results step.
    pub fn results(&self, models: &Models) -> WorkflowResult<Assessment> {
        if self.step != Step::Results {
            return Err(WorkflowError::ResultsUnavailable(self.step));
        }
        Ok(assessment::assess(&self.answers, models))
    }

    /// Submit the answers and compute the assessment in one step.
    pub fn submit(&mut self, models: &Models) -> WorkflowResult<Assessment> {
        self.apply(Transition::Submit)?;
        self.results(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::tests::complete_update;
    use crate::error::AnswerError;
    use crate::risk::RiskTier;
    use crate::scoring::tests::FixedClassifier;
    use std::sync::Arc;

    fn models(lifestyle_p: f64, combined_p: f64) -> Models {
        Models::new(
            Arc::new(FixedClassifier::new(
                &crate::constants::REQUIRED_FIELDS,
                lifestyle_p,
            )),
            Arc::new(FixedClassifier::new(
                &crate::constants::KNOWN_FEATURES,
                combined_p,
            )),
        )
    }

    fn collecting_session() -> Session {
        let mut session = Session::new();
        session.apply(Transition::Start).expect("start from welcome");
        session
    }

    #[test]
    fn test_new_session_starts_on_welcome_with_no_answers() {
        let session = Session::new();
        assert_eq!(session.step(), Step::Welcome);
        assert_eq!(session.step().number(), 1);
        assert_eq!(session.answers(), &CollectedAnswers::new());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = collecting_session();
        let b = collecting_session();
        a.update_answers(complete_update()).expect("valid update");
        assert_ne!(a.id(), b.id());
        assert!(b.answers().age.is_none());
    }

    #[test]
    fn test_submit_is_refused_with_exact_missing_fields() {
        let mut session = collecting_session();
        session
            .update_answers(AnswerUpdate {
                age: Some(45),
                diet_quality: Some(3),
                health_literacy: Some(4),
                ..Default::default()
            })
            .expect("valid update");

        let err = session
            .apply(Transition::Submit)
            .expect_err("incomplete answers must block submit");

        assert_eq!(
            err,
            WorkflowError::IncompleteAnswers {
                missing: vec![
                    "Smoking",
                    "Hypertension",
                    "FamilyHistoryDiabetes",
                    "FrequentUrination",
                    "ExcessiveThirst",
                    "UnexplainedWeightLoss",
                ]
            }
        );
        assert_eq!(session.step(), Step::DataCollection);
    }

    #[test]
    fn test_submit_advances_when_complete() {
        let mut session = collecting_session();
        session.update_answers(complete_update()).expect("valid update");
        assert_eq!(session.apply(Transition::Submit), Ok(Step::Results));
        assert_eq!(session.step().number(), 3);
    }

    #[test]
    fn test_invalid_transitions_leave_step_unchanged() {
        let mut session = Session::new();
        for transition in [Transition::Submit, Transition::Home, Transition::Edit] {
            let err = session.apply(transition).expect_err("invalid from welcome");
            assert_eq!(
                err,
                WorkflowError::InvalidTransition {
                    from: Step::Welcome,
                    transition
                }
            );
            assert_eq!(session.step(), Step::Welcome);
        }

        let mut session = collecting_session();
        assert!(session.apply(Transition::Start).is_err());
        assert!(session.apply(Transition::Edit).is_err());
        assert_eq!(session.step(), Step::DataCollection);
    }

    #[test]
    fn test_answers_persist_across_navigation() {
        let mut session = collecting_session();
        session.update_answers(complete_update()).expect("valid update");

        session.apply(Transition::Home).expect("back to welcome");
        assert_eq!(session.answers().age, Some(45));
        session.apply(Transition::Start).expect("start again");
        session.apply(Transition::Submit).expect("still complete");
        session.apply(Transition::Edit).expect("back to data collection");
        assert_eq!(session.step(), Step::DataCollection);
        assert_eq!(session.answers().age, Some(45));
    }

    #[test]
    fn test_answers_can_only_change_during_data_collection() {
        let mut session = Session::new();
        let err = session
            .update_answers(complete_update())
            .expect_err("welcome step has no form");
        assert_eq!(err, WorkflowError::NotCollecting(Step::Welcome));
    }

    #[test]
    fn test_update_answers_surfaces_validation_errors() {
        let mut session = collecting_session();
        let err = session
            .update_answers(AnswerUpdate {
                age: Some(95),
                ..Default::default()
            })
            .expect_err("age out of range");
        assert!(matches!(
            err,
            WorkflowError::Answer(AnswerError::OutOfRange { field: "Age", .. })
        ));
    }

    #[test]
    fn test_results_only_on_results_step() {
        let models = models(0.3, 0.7);
        let session = collecting_session();
        assert_eq!(
            session.results(&models),
            Err(WorkflowError::ResultsUnavailable(Step::DataCollection))
        );
    }

    #[test]
    fn test_end_to_end_lab_answers_use_combined_model() {
        let models = models(0.3, 0.7);
        let mut session = collecting_session();
        let warnings = session
            .update_answers(AnswerUpdate {
                hba1c: Some("6.8".into()),
                fasting_blood_sugar: Some("140".into()),
                ..complete_update()
            })
            .expect("valid update");
        assert!(warnings.is_empty());

        let assessment = session.submit(&models).expect("complete answers");

        assert!(assessment.lab_completeness.is_available());
        assert_eq!(assessment.lifestyle.tier, RiskTier::Low);
        assert_eq!(assessment.effective_tier, RiskTier::High);
        assert_eq!(session.results(&models), Ok(assessment));
    }
}
