//! Single coercion point for untrusted survey values.
//!
//! Missing, non-finite or negative amounts become zero, family size never drops below one and
//! officer scores are clamped into their rubric range. Nothing here fails: a partially filled
//! survey still yields a provisional score.

use super::household::{is_head_relationship, is_orphan_relationship, ADULT_AGE, ELDERLY_AGE};
use super::input::{HousingCondition, SurveyInput};

pub(crate) const MAX_MEMBER_AGE: f64 = 120.0;
pub(crate) const MAX_SUB_SCORE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NormalizedInput {
    pub earnings: f64,
    pub expenses: f64,
    pub family_size: u32,
    pub members: Vec<NormalizedMember>,
    pub housing: Option<HousingCondition>,
    pub officer_score: f64,
    pub widow_headed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NormalizedMember {
    pub age: Option<f64>,
    pub relationship: String,
    pub is_dependent: bool,
    pub has_disability: bool,
}

impl NormalizedMember {
    pub fn is_child(&self) -> bool {
        self.age.map(|age| age < ADULT_AGE).unwrap_or(false)
    }

    pub fn is_elderly_dependent(&self) -> bool {
        self.is_dependent && self.age.map(|age| age >= ELDERLY_AGE).unwrap_or(false)
    }

    pub fn is_head(&self) -> bool {
        is_head_relationship(&self.relationship)
    }

    pub fn is_orphan(&self) -> bool {
        is_orphan_relationship(&self.relationship)
    }
}

pub(crate) fn normalize_input(input: &SurveyInput) -> NormalizedInput {
    let members = input
        .family_members
        .iter()
        .map(|member| NormalizedMember {
            age: member.age.and_then(normalize_age),
            relationship: member
                .relationship
                .as_deref()
                .map(|value| value.trim().to_lowercase())
                .unwrap_or_default(),
            is_dependent: member.is_dependent,
            has_disability: member.has_disability,
        })
        .collect();

    NormalizedInput {
        earnings: non_negative_amount(input.total_monthly_earnings),
        expenses: non_negative_amount(input.total_monthly_expenses),
        family_size: family_size(input.family_size),
        members,
        housing: input.housing_condition,
        officer_score: officer_score(
            input
                .officer_report
                .as_ref()
                .and_then(|report| report.officer_score),
        ),
        widow_headed: input.is_widow_headed,
    }
}

pub(crate) fn non_negative_amount(value: Option<f64>) -> f64 {
    match value {
        Some(amount) if amount.is_finite() && amount > 0.0 => amount,
        _ => 0.0,
    }
}

/// Family size used as the per-capita divisor; 0, negative or missing behave like 1.
pub(crate) fn family_size(value: Option<f64>) -> u32 {
    match value {
        Some(size) if size.is_finite() && size >= 1.0 => {
            // `as` saturates, so absurdly large sizes land on u32::MAX.
            size.floor() as u32
        }
        _ => 1,
    }
}

pub(crate) fn officer_score(value: Option<f64>) -> f64 {
    match value {
        Some(score) if score.is_finite() => score.clamp(0.0, MAX_SUB_SCORE),
        _ => 0.0,
    }
}

fn normalize_age(age: f64) -> Option<f64> {
    if age.is_finite() && age >= 0.0 {
        Some(age.min(MAX_MEMBER_AGE))
    } else {
        None
    }
}
