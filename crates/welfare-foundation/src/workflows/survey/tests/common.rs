use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::assessment::{HousingCondition, OfficerReport, VerificationStatus};
use crate::workflows::survey::domain::{
    ExpenseBreakdown, HouseholdMember, HousingDetails, HousingOwnership, IncomeBreakdown,
    SurveyDocument, SurveyId, SurveyStatus,
};
use crate::workflows::survey::repository::{RepositoryError, SurveyRecord, SurveyRepository};
use crate::workflows::survey::service::{Clock, SurveyWorkflowService};

pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Clock that advances one minute per reading so orderings are deterministic.
#[derive(Default)]
pub(super) struct SteppingClock {
    ticks: AtomicI64,
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        epoch() + Duration::minutes(tick)
    }
}

pub(super) fn member(
    name: &str,
    age: f64,
    relationship: &str,
    monthly_income: Option<f64>,
) -> HouseholdMember {
    HouseholdMember {
        name: name.to_string(),
        age: Some(age),
        relationship: Some(relationship.to_string()),
        occupation: None,
        monthly_income,
        is_dependent: false,
        has_disability: false,
    }
}

pub(super) fn officer_report(score: f64) -> OfficerReport {
    OfficerReport {
        officer_score: Some(score),
        verification_status: VerificationStatus::Pending,
        remarks: Some("visited on site".to_string()),
    }
}

/// Widow with two children, one elderly dependent in-law, living in a rented kacha house.
pub(super) fn widow_document() -> SurveyDocument {
    SurveyDocument {
        applicant_name: "Shabana Begum".to_string(),
        contact_number: Some("+91-98200-00000".to_string()),
        address: Some("Ward 7, Malvani".to_string()),
        income: IncomeBreakdown {
            primary_income: Some(6_000.0),
            secondary_income: None,
            other_income: Some(500.0),
        },
        expenses: ExpenseBreakdown {
            rent: Some(2_500.0),
            utilities: Some(400.0),
            education: Some(600.0),
            medical: Some(700.0),
            food: Some(2_800.0),
            other: None,
        },
        family_members: vec![
            member("Shabana Begum", 38.0, "Wife", Some(0.0)),
            HouseholdMember {
                is_dependent: true,
                ..member("Ayaan", 11.0, "son", None)
            },
            HouseholdMember {
                is_dependent: true,
                ..member("Sana", 7.0, "daughter", None)
            },
            HouseholdMember {
                is_dependent: true,
                has_disability: true,
                ..member("Rukhsana", 71.0, "mother-in-law", None)
            },
        ],
        housing: HousingDetails {
            condition: Some(HousingCondition::Poor),
            ownership: Some(HousingOwnership::Rented),
        },
        officer_report: Some(officer_report(4.0)),
    }
}

/// Salaried couple in owned housing.
pub(super) fn salaried_document() -> SurveyDocument {
    SurveyDocument {
        applicant_name: "Imran Shaikh".to_string(),
        income: IncomeBreakdown {
            primary_income: Some(42_000.0),
            secondary_income: Some(8_000.0),
            other_income: None,
        },
        expenses: ExpenseBreakdown {
            food: Some(9_000.0),
            utilities: Some(1_000.0),
            ..ExpenseBreakdown::default()
        },
        family_members: vec![
            member("Imran Shaikh", 44.0, "husband", None),
            member("Farah Shaikh", 40.0, "wife", None),
        ],
        housing: HousingDetails {
            condition: Some(HousingCondition::Good),
            ownership: Some(HousingOwnership::Owned),
        },
        officer_report: Some(officer_report(0.5)),
        ..SurveyDocument::default()
    }
}

pub(super) fn build_service() -> (SurveyWorkflowService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service =
        SurveyWorkflowService::with_clock(repository.clone(), Arc::new(SteppingClock::default()));
    (service, repository)
}

/// Drive a document through draft, submission and verification.
pub(super) fn verified_survey(
    service: &SurveyWorkflowService<MemoryRepository>,
    document: SurveyDocument,
) -> SurveyId {
    let record = service.save_draft(document).expect("draft saves");
    service.submit(&record.survey_id).expect("submits");
    service.verify(&record.survey_id).expect("verifies");
    record.survey_id
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SurveyId, SurveyRecord>>>,
}

impl MemoryRepository {
    /// Simulate another writer moving the survey on behind the service's back.
    pub(super) fn force_status(&self, id: &SurveyId, status: SurveyStatus) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(record) = guard.get_mut(id) {
            record.status = status;
        }
    }
}

impl SurveyRepository for MemoryRepository {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.survey_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.survey_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SurveyRecord, expected: SurveyStatus) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .get_mut(&record.survey_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.status != expected {
            return Err(RepositoryError::StaleStatus {
                expected,
                found: stored.status,
            });
        }
        *stored = record;
        Ok(())
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn by_status(&self, status: SurveyStatus) -> Result<Vec<SurveyRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect())
    }
}

/// Serves reads with a stale status while writes still check the stored one.
pub(super) struct StaleReadRepository {
    pub(super) inner: MemoryRepository,
    pub(super) reported: SurveyStatus,
}

impl SurveyRepository for StaleReadRepository {
    fn insert(&self, record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SurveyRecord, expected: SurveyStatus) -> Result<(), RepositoryError> {
        self.inner.update(record, expected)
    }

    fn fetch(&self, id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Ok(self.inner.fetch(id)?.map(|mut record| {
            record.status = self.reported;
            record
        }))
    }

    fn by_status(&self, status: SurveyStatus) -> Result<Vec<SurveyRecord>, RepositoryError> {
        self.inner.by_status(status)
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn insert(&self, _record: SurveyRecord) -> Result<SurveyRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SurveyRecord, _expected: SurveyStatus) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SurveyId) -> Result<Option<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_status(&self, _status: SurveyStatus) -> Result<Vec<SurveyRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
