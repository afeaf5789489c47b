use super::domain::{ExpenseBreakdown, HouseholdMember, IncomeBreakdown, SurveyDocument};
use crate::workflows::assessment::household::is_head_relationship;
use crate::workflows::assessment::normalize::non_negative_amount;
use crate::workflows::assessment::{infer_widow_headed, FamilyMember, SurveyInput};

/// Validation errors raised before a survey leaves draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("applicant name is required before submission")]
    MissingApplicantName,
    #[error("officer report is required before submission")]
    MissingOfficerReport,
}

/// Flattens survey documents into the engine's input contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurveyIntake;

impl SurveyIntake {
    /// Aggregate the document into a `SurveyInput`. Never fails; absent amounts count as zero.
    pub fn assemble(document: &SurveyDocument) -> SurveyInput {
        let family_members: Vec<FamilyMember> = document
            .family_members
            .iter()
            .map(|member| FamilyMember {
                age: member.age,
                relationship: member.relationship.clone(),
                is_dependent: member.is_dependent,
                has_disability: member.has_disability,
            })
            .collect();

        SurveyInput {
            total_monthly_earnings: Some(total_earnings(
                &document.income,
                &document.family_members,
            )),
            total_monthly_expenses: Some(total_expenses(&document.expenses)),
            family_size: Some(f64::from(household_size(&document.family_members))),
            is_widow_headed: infer_widow_headed(&family_members),
            family_members,
            housing_condition: document.housing.condition,
            officer_report: document.officer_report.clone(),
        }
    }

    /// Checks that only apply once the officer submits the survey for verification.
    pub fn check_submission(document: &SurveyDocument) -> Result<(), IntakeViolation> {
        if document.applicant_name.trim().is_empty() {
            return Err(IntakeViolation::MissingApplicantName);
        }
        if document.officer_report.is_none() {
            return Err(IntakeViolation::MissingOfficerReport);
        }
        Ok(())
    }
}

/// Primary, secondary and other income plus every member's own earnings.
pub fn total_earnings(income: &IncomeBreakdown, members: &[HouseholdMember]) -> f64 {
    let household = non_negative_amount(income.primary_income)
        + non_negative_amount(income.secondary_income)
        + non_negative_amount(income.other_income);

    members
        .iter()
        .map(|member| non_negative_amount(member.monthly_income))
        .fold(household, |total, amount| total + amount)
}

pub fn total_expenses(expenses: &ExpenseBreakdown) -> f64 {
    [
        expenses.rent,
        expenses.utilities,
        expenses.education,
        expenses.medical,
        expenses.food,
        expenses.other,
    ]
    .into_iter()
    .map(non_negative_amount)
    .sum()
}

/// Members plus the applicant, unless the applicant is already listed as a member.
pub fn household_size(members: &[HouseholdMember]) -> u32 {
    let listed = u32::try_from(members.len()).unwrap_or(u32::MAX);
    let applicant_listed = members.iter().any(|member| {
        member
            .relationship
            .as_deref()
            .map(|relationship| is_head_relationship(&relationship.to_lowercase()))
            .unwrap_or(false)
    });

    if applicant_listed {
        listed.max(1)
    } else {
        listed.saturating_add(1)
    }
}
