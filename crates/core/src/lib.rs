//! # DiaLens Core
//!
//! Core business logic for the DiaLens diabetes risk assessment:
//! - Scoring adapter around the lifestyle-only and combined classifiers
//! - Lab value normalisation and imputation
//! - Risk classification and recommendations
//! - The three-step session workflow
//! - The world map built from global diabetes statistics
//!
//! **No API concerns**: HTTP servers, session storage and wire types belong in `api-rest`
//! and `api-shared`.

pub mod answers;
pub mod assessment;
pub mod config;
pub mod constants;
pub mod error;
pub mod facts;
pub mod lab;
pub mod model;
pub mod recommendation;
pub mod risk;
pub mod scoring;
pub mod session;
pub mod world_map;

pub use answers::{AnswerUpdate, CollectedAnswers, FeatureMap};
pub use assessment::{Assessment, ModelPrediction};
pub use config::CoreConfig;
pub use dialens_types::{Binary, Probability};
pub use error::{
    AnswerError, CoreError, CoreResult, MapError, ScoringError, WorkflowError, WorkflowResult,
};
pub use lab::{LabCompleteness, LabIssue, LabKind, LabWarning};
pub use model::{LogisticModel, Models};
pub use recommendation::Recommendation;
pub use risk::RiskTier;
pub use scoring::Classifier;
pub use session::{Session, Step, Transition};
pub use world_map::{CaseBand, WorldMap};
