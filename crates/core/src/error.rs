use std::path::PathBuf;

/// Errors raised while configuring the service or loading model artifacts.
///
/// These are fatal at startup: the service refuses to run without both models.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read model artifact {}: {source}", .path.display())]
    ModelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON model artifact {}: {source}", .path.display())]
    ModelJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse YAML model artifact {}: {source}", .path.display())]
    ModelYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unsupported model artifact format: {0}")]
    UnsupportedModelFormat(String),
    #[error("invalid model artifact: {0}")]
    InvalidModel(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised when an answer fails validation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnswerError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        value: i64,
    },
}

/// Errors raised by the session workflow.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WorkflowError {
    #[error("required answers are missing: {}", .missing.join(", "))]
    IncompleteAnswers { missing: Vec<&'static str> },
    #[error("cannot {transition} from the {from} step")]
    InvalidTransition {
        from: crate::session::Step,
        transition: crate::session::Transition,
    },
    #[error("answers can only be changed during data collection (current step: {0})")]
    NotCollecting(crate::session::Step),
    #[error("results are only available on the results step (current step: {0})")]
    ResultsUnavailable(crate::session::Step),
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

/// Reasons a model could not produce a usable probability.
///
/// The scoring adapter folds every variant to the neutral probability; the variants
/// exist so the cause can be logged and asserted on.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ScoringError {
    #[error("no model is loaded")]
    ModelMissing,
    #[error("model does not produce class probabilities")]
    NoProbabilityOutput,
    #[error("feature {0} is missing from the input")]
    MissingFeature(String),
    #[error("model failed to score: {0}")]
    Model(String),
    #[error("model returned malformed output: {0}")]
    MalformedOutput(String),
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;

/// Errors raised while building the world map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map data {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map data is empty")]
    Empty,
    #[error("map data is missing the {0} column")]
    MissingColumn(&'static str),
    #[error("map data has no usable rows")]
    NoRows,
}

pub type MapResult<T> = std::result::Result<T, MapError>;
