//! Conversions between core types and wire types.

use crate::error::ApiError;
use api_shared::{
    AnswersDto, BinaryInput, GlobalFactsDto, LabInput, LabWarningDto, LegendEntryDto,
    MapRegionDto, PredictionDto, RecommendationDto, ResultsRes, SessionRes, UpdateAnswersReq,
    WorldMapRes,
};
use dialens_core::constants::{
    FEATURE_EXCESSIVE_THIRST, FEATURE_FAMILY_HISTORY_DIABETES, FEATURE_FREQUENT_URINATION,
    FEATURE_HYPERTENSION, FEATURE_SMOKING, FEATURE_UNEXPLAINED_WEIGHT_LOSS,
};
use dialens_core::facts::GlobalFacts;
use dialens_core::{
    AnswerUpdate, Assessment, Binary, CollectedAnswers, LabCompleteness, LabIssue, LabWarning,
    ModelPrediction, Recommendation, Session, WorldMap,
};

fn binary(field: &'static str, input: Option<BinaryInput>) -> Result<Option<Binary>, ApiError> {
    input
        .map(|value| match value {
            BinaryInput::Bool(b) => Ok(Binary::from(b)),
            BinaryInput::Int(i) => {
                Binary::new(i).map_err(|e| ApiError::BadRequest(format!("{field}: {e}")))
            }
        })
        .transpose()
}

pub fn answer_update(req: UpdateAnswersReq) -> Result<AnswerUpdate, ApiError> {
    Ok(AnswerUpdate {
        age: req.age,
        diet_quality: req.diet_quality,
        health_literacy: req.health_literacy,
        smoking: binary(FEATURE_SMOKING, req.smoking)?,
        hypertension: binary(FEATURE_HYPERTENSION, req.hypertension)?,
        family_history_diabetes: binary(
            FEATURE_FAMILY_HISTORY_DIABETES,
            req.family_history_diabetes,
        )?,
        frequent_urination: binary(FEATURE_FREQUENT_URINATION, req.frequent_urination)?,
        excessive_thirst: binary(FEATURE_EXCESSIVE_THIRST, req.excessive_thirst)?,
        unexplained_weight_loss: binary(
            FEATURE_UNEXPLAINED_WEIGHT_LOSS,
            req.unexplained_weight_loss,
        )?,
        hba1c: req.hba1c.map(LabInput::into_text),
        fasting_blood_sugar: req.fasting_blood_sugar.map(LabInput::into_text),
    })
}

fn answers(answers: &CollectedAnswers) -> AnswersDto {
    AnswersDto {
        age: answers.age,
        diet_quality: answers.diet_quality,
        health_literacy: answers.health_literacy,
        smoking: answers.smoking.map(Binary::as_u8),
        hypertension: answers.hypertension.map(Binary::as_u8),
        family_history_diabetes: answers.family_history_diabetes.map(Binary::as_u8),
        frequent_urination: answers.frequent_urination.map(Binary::as_u8),
        excessive_thirst: answers.excessive_thirst.map(Binary::as_u8),
        unexplained_weight_loss: answers.unexplained_weight_loss.map(Binary::as_u8),
        hba1c: answers.hba1c,
        fasting_blood_sugar: answers.fasting_blood_sugar,
    }
}

pub fn session(session: &Session) -> SessionRes {
    SessionRes {
        id: session.id().to_string(),
        step: session.step().as_str().to_string(),
        step_number: session.step().number(),
        created_at: session.created_at().to_rfc3339(),
        answers: answers(session.answers()),
        missing_fields: session
            .answers()
            .missing_required()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

pub fn lab_warning(warning: &LabWarning) -> LabWarningDto {
    let issue = match warning.issue {
        LabIssue::Unparseable => "unparseable",
        LabIssue::NotProvided => "not_provided",
        LabIssue::OutOfRange => "out_of_range",
    };
    LabWarningDto {
        field: warning.kind.feature_name().to_string(),
        issue: issue.to_string(),
        message: warning.message(),
    }
}

fn prediction(prediction: &ModelPrediction) -> PredictionDto {
    PredictionDto {
        probability: prediction.probability.value(),
        percent: prediction.probability.as_percent(),
        tier: prediction.tier.to_string(),
    }
}

fn recommendation(recommendation: &Recommendation) -> RecommendationDto {
    RecommendationDto {
        headline: recommendation.headline.to_string(),
        actions: recommendation.actions.iter().map(|a| a.to_string()).collect(),
        note: recommendation.note.map(String::from),
    }
}

fn global_facts(facts: &GlobalFacts) -> GlobalFactsDto {
    GlobalFactsDto {
        title: facts.title.to_string(),
        facts: facts.facts.iter().map(|f| f.to_string()).collect(),
        source_url: facts.source_url.to_string(),
    }
}

fn lab_completeness(completeness: LabCompleteness) -> (&'static str, Option<String>) {
    match completeness {
        LabCompleteness::None => ("none", None),
        LabCompleteness::Partial => (
            "partial",
            Some("Some lab values were assumed normal because they were not provided.".into()),
        ),
        LabCompleteness::Complete => (
            "complete",
            Some("Prediction strengthened with your laboratory results.".into()),
        ),
    }
}

pub fn world_map(map: &WorldMap) -> WorldMapRes {
    WorldMapRes {
        title: map.title.to_string(),
        source_url: map.source_url.to_string(),
        legend: map
            .legend
            .iter()
            .map(|entry| LegendEntryDto {
                label: entry.label.to_string(),
                color: entry.color.to_string(),
            })
            .collect(),
        regions: map
            .regions
            .iter()
            .map(|region| MapRegionDto {
                location: region.location.clone(),
                value: region.value,
                band: region.band.label().to_string(),
                color: region.color.to_string(),
            })
            .collect(),
    }
}

pub fn results(
    session: &Session,
    assessment: &Assessment,
    facts: &GlobalFacts,
    map: Option<&WorldMap>,
) -> ResultsRes {
    let (completeness, lab_notice) = lab_completeness(assessment.lab_completeness);
    ResultsRes {
        session_id: session.id().to_string(),
        lifestyle: prediction(&assessment.lifestyle),
        combined: assessment.combined.as_ref().map(prediction),
        lab_completeness: completeness.to_string(),
        lab_notice,
        effective: prediction(assessment.effective_prediction()),
        recommendation: recommendation(assessment.recommendation),
        global_facts: global_facts(facts),
        world_map: map.map(world_map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_update_converts_checkbox_and_integer_inputs() {
        let update = answer_update(UpdateAnswersReq {
            smoking: Some(BinaryInput::Int(1)),
            excessive_thirst: Some(BinaryInput::Bool(false)),
            hba1c: Some(LabInput::Text("6.1".into())),
            fasting_blood_sugar: Some(LabInput::Number(95.0)),
            ..Default::default()
        })
        .expect("valid request");

        assert_eq!(update.smoking, Some(Binary::Yes));
        assert_eq!(update.excessive_thirst, Some(Binary::No));
        assert_eq!(update.hba1c.as_deref(), Some("6.1"));
        assert_eq!(update.fasting_blood_sugar.as_deref(), Some("95"));
    }

    #[test]
    fn test_answer_update_rejects_non_binary_integers() {
        let err = answer_update(UpdateAnswersReq {
            hypertension: Some(BinaryInput::Int(2)),
            ..Default::default()
        })
        .expect_err("2 is not binary");
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.starts_with("Hypertension")));
    }
}
