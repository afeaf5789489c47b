use super::common::*;

use crate::workflows::survey::domain::{HouseholdMember, SurveyDocument};
use crate::workflows::survey::intake::{
    household_size, total_earnings, total_expenses, IntakeViolation, SurveyIntake,
};

#[test]
fn assemble_sums_income_streams_and_member_earnings() {
    let mut document = widow_document();
    document.family_members[1].monthly_income = Some(1_200.0);

    let input = SurveyIntake::assemble(&document);

    assert_eq!(input.total_monthly_earnings, Some(7_700.0));
    assert_eq!(input.total_monthly_expenses, Some(7_000.0));
    assert_eq!(input.family_size, Some(5.0));
    assert_eq!(input.family_members.len(), 4);
    assert!(input.is_widow_headed);
}

#[test]
fn negative_or_missing_amounts_count_as_zero() {
    let mut document = salaried_document();
    document.income.secondary_income = Some(-8_000.0);
    document.expenses.food = Some(f64::NAN);
    document.family_members[0].monthly_income = Some(-50.0);

    assert_eq!(
        total_earnings(&document.income, &document.family_members),
        42_000.0
    );
    assert_eq!(total_expenses(&document.expenses), 1_000.0);
}

#[test]
fn listed_applicant_is_not_counted_twice() {
    let applicant = member("Rahim", 52.0, "Self", None);
    let son = member("Adil", 20.0, "son", Some(9_000.0));

    assert_eq!(household_size(&[]), 1);
    assert_eq!(household_size(&[son.clone()]), 2);
    assert_eq!(household_size(&[applicant.clone(), son]), 2);
    assert_eq!(household_size(&[applicant]), 1);
}

#[test]
fn husband_entry_clears_widow_flag() {
    let input = SurveyIntake::assemble(&salaried_document());
    assert!(!input.is_widow_headed);
}

#[test]
fn submission_requires_name_and_officer_report() {
    assert_eq!(SurveyIntake::check_submission(&widow_document()), Ok(()));

    let unnamed = SurveyDocument {
        applicant_name: "   ".to_string(),
        ..widow_document()
    };
    assert_eq!(
        SurveyIntake::check_submission(&unnamed),
        Err(IntakeViolation::MissingApplicantName)
    );

    let unvisited = SurveyDocument {
        officer_report: None,
        ..widow_document()
    };
    assert_eq!(
        SurveyIntake::check_submission(&unvisited),
        Err(IntakeViolation::MissingOfficerReport)
    );
}

#[test]
fn empty_document_still_assembles() {
    let input = SurveyIntake::assemble(&SurveyDocument::default());

    assert_eq!(input.total_monthly_earnings, Some(0.0));
    assert_eq!(input.total_monthly_expenses, Some(0.0));
    assert_eq!(input.family_size, Some(1.0));
    assert!(input.family_members.is_empty());
    assert!(input.officer_report.is_none());
}

#[test]
fn member_flags_carry_into_engine_input() {
    let document = SurveyDocument {
        family_members: vec![HouseholdMember {
            is_dependent: true,
            has_disability: true,
            ..member("Bilal", 9.0, "orphan nephew", None)
        }],
        ..SurveyDocument::default()
    };

    let input = SurveyIntake::assemble(&document);
    let carried = &input.family_members[0];
    assert_eq!(carried.age, Some(9.0));
    assert_eq!(carried.relationship.as_deref(), Some("orphan nephew"));
    assert!(carried.is_dependent && carried.has_disability);
}
