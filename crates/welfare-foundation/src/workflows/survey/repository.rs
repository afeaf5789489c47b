use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{BeneficiaryCard, SurveyDocument, SurveyId, SurveyStatus};
use crate::workflows::assessment::{AssessmentScores, Category, CategoryColor};

/// Repository record containing the document, calculated scores, and status metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    pub survey_id: SurveyId,
    pub document: SurveyDocument,
    pub status: SurveyStatus,
    pub calculated_scores: Option<AssessmentScores>,
    pub beneficiary_card: Option<BeneficiaryCard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurveyRecord {
    pub fn status_view(&self) -> SurveyStatusView {
        let scores = self.calculated_scores.as_ref();
        SurveyStatusView {
            survey_id: self.survey_id.clone(),
            status: self.status.label(),
            provisional: self.status == SurveyStatus::Draft,
            total_score: scores.map(|scores| scores.total_score),
            category: scores.map(|scores| scores.category),
            category_color: scores.map(|scores| scores.category_color),
        }
    }
}

/// Storage abstraction so the workflow service can be exercised in isolation.
pub trait SurveyRepository: Send + Sync {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError>;
    /// Replace the stored record only while it still carries the `expected` status.
    fn update(&self, record: SurveyRecord, expected: SurveyStatus) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError>;
    fn by_status(&self, status: SurveyStatus) -> Result<Vec<SurveyRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("survey status changed concurrently (expected {expected:?}, found {found:?})")]
    StaleStatus {
        expected: SurveyStatus,
        found: SurveyStatus,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a survey's exposed status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStatusView {
    pub survey_id: SurveyId,
    pub status: &'static str,
    pub provisional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_color: Option<CategoryColor>,
}
