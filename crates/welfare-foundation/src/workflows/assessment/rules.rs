use super::input::HousingCondition;
use super::normalize::{NormalizedInput, MAX_SUB_SCORE};
use super::{AssessmentFactor, ScoreComponent};

/// Monthly per-capita income bands (upper bound inclusive, INR) and the need score they earn.
/// Anything above the last bound scores zero.
pub const FINANCIAL_BANDS: [(f64, f64); 5] = [
    (1_500.0, 5.0),
    (3_000.0, 4.0),
    (5_000.0, 3.0),
    (8_000.0, 2.0),
    (12_000.0, 1.0),
];

pub const DISABLED_MEMBER_WEIGHT: f64 = 1.5;
pub const ELDERLY_DEPENDENT_WEIGHT: f64 = 1.0;
pub const CHILD_WEIGHT: f64 = 0.5;
pub const OTHER_DEPENDENT_WEIGHT: f64 = 0.5;

pub const WIDOW_HEADED_WEIGHT: f64 = 2.5;
pub const ORPHAN_WEIGHT: f64 = 1.5;
pub const DISABILITY_PRESENT_WEIGHT: f64 = 1.0;
pub const DISABLED_HEAD_BONUS: f64 = 0.5;

pub(crate) struct SubScores {
    pub per_capita_income: f64,
    pub financial: f64,
    pub dependents: f64,
    pub social_status: f64,
    pub officer: f64,
}

pub(crate) fn score_input(input: &NormalizedInput) -> (SubScores, Vec<ScoreComponent>) {
    let per_capita_income = per_capita_income(input.earnings, input.expenses, input.family_size);
    let financial = financial_component(per_capita_income);
    let dependents = dependents_component(input);
    let social_status = social_status_component(input);
    let officer = ScoreComponent {
        factor: AssessmentFactor::Officer,
        score: input.officer_score,
        notes: format!("officer score {:.1}", input.officer_score),
    };

    let scores = SubScores {
        per_capita_income,
        financial: financial.score,
        dependents: dependents.score,
        social_status: social_status.score,
        officer: officer.score,
    };

    (scores, vec![financial, dependents, social_status, officer])
}

/// Net household income per member; deficits stay negative.
pub fn per_capita_income(earnings: f64, expenses: f64, family_size: u32) -> f64 {
    (earnings - expenses) / f64::from(family_size.max(1))
}

/// Need score for a per-capita income, non-increasing as income rises.
pub fn financial_score(per_capita_income: f64) -> f64 {
    FINANCIAL_BANDS
        .iter()
        .find(|(upper, _)| per_capita_income <= *upper)
        .map(|(_, score)| *score)
        .unwrap_or(0.0)
}

pub fn housing_need(condition: Option<HousingCondition>) -> f64 {
    match condition {
        Some(HousingCondition::VeryPoor) => 2.0,
        Some(HousingCondition::Poor) => 1.5,
        Some(HousingCondition::Fair) => 0.5,
        Some(HousingCondition::Good) | None => 0.0,
    }
}

fn financial_component(per_capita_income: f64) -> ScoreComponent {
    let score = financial_score(per_capita_income);
    let notes = if per_capita_income < 0.0 {
        format!("household deficit of {:.2} per member", per_capita_income.abs())
    } else {
        format!("per-capita income {:.2}", per_capita_income)
    };

    ScoreComponent {
        factor: AssessmentFactor::Financial,
        score,
        notes,
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DependentCounts {
    pub disabled: u32,
    pub elderly_dependents: u32,
    pub children: u32,
    pub other_dependents: u32,
}

pub(crate) fn dependent_counts(input: &NormalizedInput) -> DependentCounts {
    let mut counts = DependentCounts::default();
    for member in &input.members {
        let elderly = member.is_elderly_dependent();
        let child = member.is_child();
        if member.has_disability {
            counts.disabled += 1;
        }
        if elderly {
            counts.elderly_dependents += 1;
        }
        if child {
            counts.children += 1;
        }
        if member.is_dependent && !elderly && !child && !member.has_disability {
            counts.other_dependents += 1;
        }
    }
    counts
}

fn dependents_component(input: &NormalizedInput) -> ScoreComponent {
    let counts = dependent_counts(input);
    let raw = f64::from(counts.disabled) * DISABLED_MEMBER_WEIGHT
        + f64::from(counts.elderly_dependents) * ELDERLY_DEPENDENT_WEIGHT
        + f64::from(counts.children) * CHILD_WEIGHT
        + f64::from(counts.other_dependents) * OTHER_DEPENDENT_WEIGHT;

    ScoreComponent {
        factor: AssessmentFactor::Dependents,
        score: raw.min(MAX_SUB_SCORE),
        notes: format!(
            "{} disabled, {} elderly dependent(s), {} child(ren), {} other dependent(s)",
            counts.disabled, counts.elderly_dependents, counts.children, counts.other_dependents
        ),
    }
}

fn social_status_component(input: &NormalizedInput) -> ScoreComponent {
    let mut raw = 0.0;
    let mut indicators = Vec::new();

    if input.widow_headed {
        raw += WIDOW_HEADED_WEIGHT;
        indicators.push("widow-headed".to_string());
    }
    if input.members.iter().any(|member| member.is_orphan()) {
        raw += ORPHAN_WEIGHT;
        indicators.push("orphan in household".to_string());
    }
    if input.members.iter().any(|member| member.has_disability) {
        raw += DISABILITY_PRESENT_WEIGHT;
        indicators.push("disability in household".to_string());
        if input
            .members
            .iter()
            .any(|member| member.has_disability && member.is_head())
        {
            raw += DISABLED_HEAD_BONUS;
            indicators.push("disabled head of household".to_string());
        }
    }

    let housing = housing_need(input.housing);
    raw += housing;
    if let Some(condition) = input.housing {
        indicators.push(format!("{} housing", condition.label()));
    }

    // Stacked indicators cap at the sub-score maximum.
    let score = raw.min(MAX_SUB_SCORE);
    let notes = if indicators.is_empty() {
        "no social-status indicators".to_string()
    } else {
        indicators.join(", ")
    };

    ScoreComponent {
        factor: AssessmentFactor::SocialStatus,
        score,
        notes,
    }
}
