use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::assessment::{
    FamilyMember, HousingCondition, OfficerReport, SurveyInput, VerificationStatus,
};

pub(super) fn assessed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn officer_report(score: f64) -> OfficerReport {
    OfficerReport {
        officer_score: Some(score),
        verification_status: VerificationStatus::Verified,
        remarks: Some("home visit completed".to_string()),
    }
}

/// Destitute widow-headed household with no recorded members.
pub(super) fn destitute_survey() -> SurveyInput {
    SurveyInput {
        total_monthly_earnings: Some(0.0),
        total_monthly_expenses: Some(0.0),
        family_size: Some(5.0),
        family_members: Vec::new(),
        housing_condition: Some(HousingCondition::VeryPoor),
        officer_report: Some(officer_report(5.0)),
        is_widow_headed: true,
    }
}

/// Comfortable two-person household with a single earning adult.
pub(super) fn comfortable_survey() -> SurveyInput {
    SurveyInput {
        total_monthly_earnings: Some(50_000.0),
        total_monthly_expenses: Some(10_000.0),
        family_size: Some(2.0),
        family_members: vec![FamilyMember::new(30.0, "self")],
        housing_condition: Some(HousingCondition::Good),
        officer_report: Some(officer_report(0.0)),
        is_widow_headed: false,
    }
}

/// Mid-range household used as a baseline for single-field perturbations.
pub(super) fn baseline_survey() -> SurveyInput {
    SurveyInput {
        total_monthly_earnings: Some(18_000.0),
        total_monthly_expenses: Some(9_000.0),
        family_size: Some(4.0),
        family_members: vec![
            FamilyMember::new(41.0, "self"),
            FamilyMember::new(38.0, "wife"),
            FamilyMember::new(12.0, "son").dependent(),
            FamilyMember::new(67.0, "mother").dependent(),
        ],
        housing_condition: Some(HousingCondition::Fair),
        officer_report: Some(officer_report(2.5)),
        is_widow_headed: false,
    }
}
