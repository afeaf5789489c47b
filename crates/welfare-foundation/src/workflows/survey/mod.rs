//! Field survey workflow: intake, scoring, verification, approval, and sponsorship ordering.
//!
//! Surveys are scored provisionally as drafts, rescored on every edit until verification, and
//! frozen afterwards. Approval copies the stored scores onto a beneficiary card.

pub mod domain;
pub mod import;
pub mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BeneficiaryCard, ExpenseBreakdown, HouseholdMember, HousingDetails, HousingOwnership,
    IncomeBreakdown, SurveyDocument, SurveyId, SurveyStatus,
};
pub use import::{ImportedSurvey, SurveyCsvImporter, SurveyImportError};
pub use intake::{IntakeViolation, SurveyIntake};
pub use report::AssessmentReport;
pub use repository::{RepositoryError, SurveyRecord, SurveyRepository, SurveyStatusView};
pub use router::survey_router;
pub use service::{
    Clock, SurveyServiceError, SurveyWorkflowService, SystemClock, DEFAULT_QUEUE_LIMIT,
};
