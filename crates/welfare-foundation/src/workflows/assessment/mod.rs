//! Beneficiary assessment engine.
//!
//! Turns a flattened household survey into financial, dependents, social-status and officer
//! sub-scores, a total on the 0–20 scale, and a category/color band. Everything in this module is
//! pure: the only time value, `calculated_at`, is supplied by the caller.

pub(crate) mod household;
pub mod input;
pub(crate) mod normalize;
pub mod policy;
pub mod rules;

#[cfg(test)]
mod tests;

pub use household::infer_widow_headed;
pub use input::{FamilyMember, HousingCondition, OfficerReport, SurveyInput, VerificationStatus};
pub use policy::{Category, CategoryColor};

use chrono::{DateTime, Utc};
use normalize::normalize_input;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the fixed assessment rubric.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentEngine;

impl AssessmentEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, input: &SurveyInput, calculated_at: DateTime<Utc>) -> AssessmentScores {
        self.explain(input, calculated_at).scores
    }

    /// Score a survey and keep the per-factor notes for reports and audits.
    pub fn explain(
        &self,
        input: &SurveyInput,
        calculated_at: DateTime<Utc>,
    ) -> AssessmentBreakdown {
        let normalized = normalize_input(input);
        let (sub_scores, components) = rules::score_input(&normalized);

        let total_score = sub_scores.financial
            + sub_scores.dependents
            + sub_scores.social_status
            + sub_scores.officer;
        let category = Category::from_total(total_score);

        let scores = AssessmentScores {
            financial_score: sub_scores.financial,
            dependents_score: sub_scores.dependents,
            social_status_score: sub_scores.social_status,
            officer_score: sub_scores.officer,
            total_score,
            per_capita_income: sub_scores.per_capita_income,
            category,
            category_color: category.color(),
            calculated_at,
        };

        AssessmentBreakdown { scores, components }
    }
}

/// Score a survey with the standard rubric.
pub fn calculate_assessment(input: &SurveyInput, calculated_at: DateTime<Utc>) -> AssessmentScores {
    AssessmentEngine::new().assess(input, calculated_at)
}

/// Calculated scores stored verbatim alongside the survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    pub financial_score: f64,
    pub dependents_score: f64,
    pub social_status_score: f64,
    pub officer_score: f64,
    pub total_score: f64,
    pub per_capita_income: f64,
    pub category: Category,
    pub category_color: CategoryColor,
    pub calculated_at: DateTime<Utc>,
}

impl AssessmentScores {
    /// Equality on everything except the calculation timestamp.
    pub fn same_scores(&self, other: &AssessmentScores) -> bool {
        self.financial_score.to_bits() == other.financial_score.to_bits()
            && self.dependents_score.to_bits() == other.dependents_score.to_bits()
            && self.social_status_score.to_bits() == other.social_status_score.to_bits()
            && self.officer_score.to_bits() == other.officer_score.to_bits()
            && self.total_score.to_bits() == other.total_score.to_bits()
            && self.per_capita_income.to_bits() == other.per_capita_income.to_bits()
            && self.category == other.category
            && self.category_color == other.category_color
    }
}

/// Scoring factors surfaced in breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentFactor {
    Financial,
    Dependents,
    SocialStatus,
    Officer,
}

impl AssessmentFactor {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentFactor::Financial => "Financial",
            AssessmentFactor::Dependents => "Dependents",
            AssessmentFactor::SocialStatus => "Social status",
            AssessmentFactor::Officer => "Officer",
        }
    }
}

/// Discrete contribution to an assessment, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: AssessmentFactor,
    pub score: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBreakdown {
    pub scores: AssessmentScores,
    pub components: Vec<ScoreComponent>,
}
