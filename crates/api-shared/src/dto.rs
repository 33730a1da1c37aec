//! Request and response types for the DiaLens REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A yes/no answer as sent by a form: `0`/`1` or a checkbox boolean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BinaryInput {
    Int(i64),
    Bool(bool),
}

/// A lab reading as sent by a form: free text or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabInput {
    Number(f64),
    Text(String),
}

impl LabInput {
    /// The reading as text, ready for lab normalisation.
    pub fn into_text(self) -> String {
        match self {
            LabInput::Number(value) => value.to_string(),
            LabInput::Text(text) => text,
        }
    }
}

/// Answers stored for a session. Binary answers are always 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswersDto {
    pub age: Option<u8>,
    pub diet_quality: Option<u8>,
    pub health_literacy: Option<u8>,
    pub smoking: Option<u8>,
    pub hypertension: Option<u8>,
    pub family_history_diabetes: Option<u8>,
    pub frequent_urination: Option<u8>,
    pub excessive_thirst: Option<u8>,
    pub unexplained_weight_loss: Option<u8>,
    /// HbA1c in percent; 0 means not provided.
    pub hba1c: f64,
    /// Fasting blood sugar in mg/dL; 0 means not provided.
    pub fasting_blood_sugar: f64,
}

/// Partial answer update. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswersReq {
    pub age: Option<i64>,
    pub diet_quality: Option<i64>,
    pub health_literacy: Option<i64>,
    #[schema(value_type = Option<u8>)]
    pub smoking: Option<BinaryInput>,
    #[schema(value_type = Option<u8>)]
    pub hypertension: Option<BinaryInput>,
    #[schema(value_type = Option<u8>)]
    pub family_history_diabetes: Option<BinaryInput>,
    #[schema(value_type = Option<u8>)]
    pub frequent_urination: Option<BinaryInput>,
    #[schema(value_type = Option<u8>)]
    pub excessive_thirst: Option<BinaryInput>,
    #[schema(value_type = Option<u8>)]
    pub unexplained_weight_loss: Option<BinaryInput>,
    /// HbA1c reading as text or number, e.g. "5.7"; 0 means not provided.
    #[schema(value_type = Option<String>)]
    pub hba1c: Option<LabInput>,
    /// Fasting blood sugar reading as text or number, e.g. "95"; 0 means not provided.
    #[schema(value_type = Option<String>)]
    pub fasting_blood_sugar: Option<LabInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRes {
    pub id: String,
    pub step: String,
    pub step_number: u8,
    pub created_at: String,
    pub answers: AnswersDto,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabWarningDto {
    pub field: String,
    pub issue: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswersRes {
    pub session: SessionRes,
    pub warnings: Vec<LabWarningDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDto {
    pub probability: f64,
    /// Probability as a percentage, one decimal place.
    pub percent: f64,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    pub headline: String,
    pub actions: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFactsDto {
    pub title: String,
    pub facts: Vec<String>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntryDto {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapRegionDto {
    pub location: String,
    /// Adults with diabetes, in thousands.
    pub value: f64,
    pub band: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorldMapRes {
    pub title: String,
    pub source_url: String,
    pub legend: Vec<LegendEntryDto>,
    pub regions: Vec<MapRegionDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRes {
    pub session_id: String,
    pub lifestyle: PredictionDto,
    /// Present only when at least one lab reading was provided.
    pub combined: Option<PredictionDto>,
    pub lab_completeness: String,
    /// Note about how lab data was used, when any was provided.
    pub lab_notice: Option<String>,
    pub effective: PredictionDto,
    pub recommendation: RecommendationDto,
    pub global_facts: GlobalFactsDto,
    /// Omitted when the map dataset is unavailable.
    pub world_map: Option<WorldMapRes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRes {
    pub message: String,
    /// Required answers still missing, when that is why the request was refused.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}
