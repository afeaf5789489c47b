use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::assessment::{
    AssessmentScores, Category, CategoryColor, HousingCondition, OfficerReport,
};

/// Identifier wrapper for field surveys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurveyId(pub String);

impl std::fmt::Display for SurveyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Survey document as captured by the field officer, before flattening for scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyDocument {
    pub applicant_name: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub income: IncomeBreakdown,
    pub expenses: ExpenseBreakdown,
    pub family_members: Vec<HouseholdMember>,
    pub housing: HousingDetails,
    pub officer_report: Option<OfficerReport>,
}

/// Household income streams reported for the applicant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeBreakdown {
    pub primary_income: Option<f64>,
    pub secondary_income: Option<f64>,
    pub other_income: Option<f64>,
}

/// Monthly household expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseBreakdown {
    pub rent: Option<f64>,
    pub utilities: Option<f64>,
    pub education: Option<f64>,
    pub medical: Option<f64>,
    pub food: Option<f64>,
    pub other: Option<f64>,
}

/// Household member entry including any individual earnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdMember {
    pub name: String,
    pub age: Option<f64>,
    pub relationship: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub is_dependent: bool,
    pub has_disability: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HousingDetails {
    pub condition: Option<HousingCondition>,
    pub ownership: Option<HousingOwnership>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingOwnership {
    Owned,
    Rented,
    Shared,
    Homeless,
}

/// High level status tracked throughout the survey workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    Draft,
    Submitted,
    Verified,
    Approved,
    Rejected,
}

impl SurveyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Submitted => "submitted",
            SurveyStatus::Verified => "verified",
            SurveyStatus::Approved => "approved",
            SurveyStatus::Rejected => "rejected",
        }
    }

    /// Scores may be recalculated only until the survey is verified.
    pub const fn scores_editable(self) -> bool {
        matches!(self, SurveyStatus::Draft | SurveyStatus::Submitted)
    }

    pub const fn can_transition_to(self, next: SurveyStatus) -> bool {
        matches!(
            (self, next),
            (SurveyStatus::Draft, SurveyStatus::Submitted)
                | (SurveyStatus::Submitted, SurveyStatus::Verified)
                | (SurveyStatus::Verified, SurveyStatus::Approved)
                | (SurveyStatus::Submitted, SurveyStatus::Rejected)
                | (SurveyStatus::Verified, SurveyStatus::Rejected)
        )
    }
}

/// Beneficiary card issued when a survey is approved; scores are copied, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryCard {
    pub survey_id: SurveyId,
    pub beneficiary_name: String,
    pub category: Category,
    pub category_color: CategoryColor,
    pub total_score: f64,
    pub financial_score: f64,
    pub dependents_score: f64,
    pub social_status_score: f64,
    pub officer_score: f64,
    pub approved_at: DateTime<Utc>,
}

impl BeneficiaryCard {
    pub fn issue(
        survey_id: SurveyId,
        beneficiary_name: String,
        scores: &AssessmentScores,
        approved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            survey_id,
            beneficiary_name,
            category: scores.category,
            category_color: scores.category_color,
            total_score: scores.total_score,
            financial_score: scores.financial_score,
            dependents_score: scores.dependents_score,
            social_status_score: scores.social_status_score,
            officer_score: scores.officer_score,
            approved_at,
        }
    }
}
